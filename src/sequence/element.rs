//! Bar elements
//!
//! An [`Element`] is one bar of the visualization. Its `key` is the sort
//! criterion; everything else (`position`, `width`, `extent`, `color`) is
//! display state that the algorithms move around.

/// Display state of a bar, as set by the step machines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarColor {
    #[default]
    Normal,
    /// The element the algorithm is currently carrying or inserting
    Active,
    /// Elements touched by the latest comparison
    Compare,
    /// Final slot settled for the rest of the sort
    ConfirmedSorted,
    /// Freshly placed by a merge
    Merging,
    /// Quicksort pivot of the active partition
    Pivot,
}

impl BarColor {
    pub const ALL: [BarColor; 6] = [
        BarColor::Normal,
        BarColor::Active,
        BarColor::Compare,
        BarColor::ConfirmedSorted,
        BarColor::Merging,
        BarColor::Pivot,
    ];

    /// Short label for legends and the change log
    pub fn label(self) -> &'static str {
        match self {
            BarColor::Normal => "normal",
            BarColor::Active => "active",
            BarColor::Compare => "compare",
            BarColor::ConfirmedSorted => "sorted",
            BarColor::Merging => "merging",
            BarColor::Pivot => "pivot",
        }
    }
}

/// A single bar in a [`Sequence`](super::Sequence)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Sort key (the element's rank among all keys)
    pub key: u32,
    /// Vertical display extent, scaled from `key` to the display height
    pub extent: u32,
    /// Horizontal display offset of the bar
    pub position: u32,
    /// Horizontal display width of the bar
    pub width: u32,
    pub color: BarColor,
    /// Consumed by a merge placement; no longer redrawn or recolored
    pub frozen: bool,
}

impl Element {
    pub fn new(key: u32, extent: u32, position: u32, width: u32) -> Self {
        Element {
            key,
            extent,
            position,
            width,
            color: BarColor::Normal,
            frozen: false,
        }
    }

    /// Exchange the horizontal slot of two elements, leaving keys alone
    pub fn swap_slots(a: &mut Element, b: &mut Element) {
        std::mem::swap(&mut a.position, &mut b.position);
        std::mem::swap(&mut a.width, &mut b.width);
    }

    /// Build the element that replaces `slot` during a merge: the donor's key,
    /// extent and color at the slot's position and width.
    pub fn merged_into(donor: &Element, slot: &Element) -> Element {
        Element {
            key: donor.key,
            extent: donor.extent,
            position: slot.position,
            width: slot.width,
            color: donor.color,
            frozen: false,
        }
    }

    /// Whether the presenter should see changes to this element
    pub fn is_visible(&self) -> bool {
        !self.frozen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_slots_keeps_keys() {
        let mut a = Element::new(3, 30, 0, 2);
        let mut b = Element::new(7, 70, 2, 3);
        Element::swap_slots(&mut a, &mut b);

        assert_eq!((a.key, a.position, a.width), (3, 2, 3));
        assert_eq!((b.key, b.position, b.width), (7, 0, 2));
    }

    #[test]
    fn test_merged_into() {
        let mut donor = Element::new(5, 50, 8, 2);
        donor.color = BarColor::Merging;
        let slot = Element::new(1, 10, 0, 2);

        let placed = Element::merged_into(&donor, &slot);
        assert_eq!(placed.key, 5);
        assert_eq!(placed.extent, 50);
        assert_eq!(placed.position, 0);
        assert_eq!(placed.color, BarColor::Merging);
        assert!(!placed.frozen);
    }
}
