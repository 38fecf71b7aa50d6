//! The sequence of bars being sorted
//!
//! - [`element`]: the [`Element`] bar type and its [`BarColor`] states
//! - [`presenter`]: the [`Presenter`] boundary notified after every mutation
//!
//! # Ordering model
//!
//! Container index order is left-to-right visual order. Algorithms reorder the
//! sequence with [`Sequence::swap_positions`], which exchanges both the display
//! slots and the container slots of two elements so that the two orders never
//! drift apart. Merge sort is the exception: it copies donors into destination
//! slots with [`Sequence::place`].
//!
//! # Comparison convention
//!
//! [`Sequence::compare`]`(i, j)` is `key(i).cmp(&key(j))`. `Less` means `i`
//! belongs before `j` in ascending order.

pub mod element;
pub mod presenter;

pub use element::{BarColor, Element};
pub use presenter::{Change, EventLog, NullPresenter, Presenter};

use crate::config::{MAX_ELEMENTS, MIN_ELEMENTS};
use crate::engine::errors::SortError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Initial ordering of a freshly built sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Arrangement {
    #[default]
    Random,
    Ascending,
    Descending,
}

impl Arrangement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arrangement::Random => "random",
            Arrangement::Ascending => "ascending",
            Arrangement::Descending => "descending",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "random" | "permuted" | "shuffled" => Some(Arrangement::Random),
            "ascending" | "sorted" => Some(Arrangement::Ascending),
            "descending" | "reversed" | "reverse-sorted" => Some(Arrangement::Descending),
            _ => None,
        }
    }
}

/// Display area the bars are laid out in, in abstract display units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub const fn new(width: u32, height: u32) -> Self {
        Extent { width, height }
    }
}

/// Ordered, fixed-length container of [`Element`]s
pub struct Sequence {
    elements: Vec<Element>,
    extent: Extent,
    /// Bumped on every rebuild so step machines can detect staleness
    generation: u64,
    presenter: Box<dyn Presenter>,
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("keys", &self.keys())
            .field("extent", &self.extent)
            .field("generation", &self.generation)
            .finish()
    }
}

impl Sequence {
    /// Create an empty sequence reporting to `presenter`
    pub fn new(extent: Extent, presenter: Box<dyn Presenter>) -> Self {
        Sequence {
            elements: Vec::new(),
            extent,
            generation: 0,
            presenter,
        }
    }

    /// Build a sequence from explicit keys, in the given left-to-right order
    pub fn from_keys(keys: &[u32], extent: Extent) -> Result<Self, SortError> {
        let mut sequence = Sequence::new(extent, Box::new(NullPresenter));
        sequence.replace_keys(keys)?;
        Ok(sequence)
    }

    /// Replace the presenter, returning the previous one
    pub fn set_presenter(&mut self, presenter: Box<dyn Presenter>) -> Box<dyn Presenter> {
        let previous = std::mem::replace(&mut self.presenter, presenter);
        self.presenter.rebuilt(&self.elements);
        previous
    }

    /// Replace all elements with `n` fresh ones in the requested arrangement.
    ///
    /// On error the current elements are left untouched.
    pub fn build<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        arrangement: Arrangement,
        rng: &mut R,
    ) -> Result<(), SortError> {
        Self::bar_width(n, self.extent)?;

        let mut keys: Vec<u32> = (0..n as u32).collect();
        match arrangement {
            Arrangement::Ascending => {}
            Arrangement::Descending => keys.reverse(),
            Arrangement::Random => keys.shuffle(rng),
        }

        self.replace_keys(&keys)
    }

    fn replace_keys(&mut self, keys: &[u32]) -> Result<(), SortError> {
        let bar_width = Self::bar_width(keys.len(), self.extent)?;
        let max_key = keys.iter().copied().max().unwrap_or(0);

        self.elements = keys
            .iter()
            .enumerate()
            .map(|(slot, &key)| {
                Element::new(
                    key,
                    Self::scaled_extent(key, max_key, self.extent.height),
                    slot as u32 * bar_width,
                    bar_width,
                )
            })
            .collect();
        self.generation += 1;
        self.presenter.rebuilt(&self.elements);
        Ok(())
    }

    /// Lay the current elements out again for a new display area.
    ///
    /// Order, keys and colors are preserved, so an active step machine stays valid.
    /// The new extent is recorded even when the current elements do not fit,
    /// so later builds are checked against the real display.
    pub fn relayout(&mut self, extent: Extent) -> Result<(), SortError> {
        self.extent = extent;
        let bar_width = if self.elements.is_empty() {
            0
        } else {
            Self::bar_width(self.elements.len(), extent)?
        };
        let max_key = self.elements.iter().map(|e| e.key).max().unwrap_or(0);

        for (slot, element) in self.elements.iter_mut().enumerate() {
            element.position = slot as u32 * bar_width;
            element.width = bar_width;
            element.extent = Self::scaled_extent(element.key, max_key, extent.height);
        }
        self.presenter.rebuilt(&self.elements);
        Ok(())
    }

    /// Width of one bar, or `InvalidSize` when `n` cannot be laid out
    fn bar_width(n: usize, extent: Extent) -> Result<u32, SortError> {
        let fits = n as u64 <= extent.width as u64;
        if !(MIN_ELEMENTS..=MAX_ELEMENTS).contains(&n) || !fits {
            return Err(SortError::InvalidSize {
                requested: n,
                min: MIN_ELEMENTS,
                max: MAX_ELEMENTS.min(extent.width as usize),
            });
        }
        Ok(extent.width / n as u32)
    }

    fn scaled_extent(key: u32, max_key: u32, height: u32) -> u32 {
        let scaled = (key as u64 + 1) * height as u64 / (max_key as u64 + 1);
        (scaled as u32).max(1)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, slot: usize) -> &Element {
        &self.elements[slot]
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Keys in left-to-right order
    pub fn keys(&self) -> Vec<u32> {
        self.elements.iter().map(|e| e.key).collect()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Compare the keys at `i` and `j`; `Less` means `i` sorts first ascending
    pub fn compare(&self, i: usize, j: usize) -> Ordering {
        self.elements[i].key.cmp(&self.elements[j].key)
    }

    /// Exchange the display slots of `i` and `j`, then their container slots
    pub fn swap_positions(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let (lo, hi) = (i.min(j), i.max(j));
        let (left, right) = self.elements.split_at_mut(hi);
        Element::swap_slots(&mut left[lo], &mut right[0]);
        self.elements.swap(lo, hi);
        self.notify(lo);
        self.notify(hi);
    }

    pub fn set_color(&mut self, slot: usize, color: BarColor) {
        let element = &mut self.elements[slot];
        if element.frozen || element.color == color {
            return;
        }
        element.color = color;
        self.notify(slot);
    }

    /// Recolor every element currently colored `from`
    pub fn recolor(&mut self, from: BarColor, to: BarColor) {
        for slot in 0..self.elements.len() {
            if self.elements[slot].color == from {
                self.set_color(slot, to);
            }
        }
    }

    /// Recolor every element not colored `keep`
    pub fn recolor_unless(&mut self, keep: BarColor, to: BarColor) {
        for slot in 0..self.elements.len() {
            if self.elements[slot].color != keep {
                self.set_color(slot, to);
            }
        }
    }

    pub fn recolor_all(&mut self, to: BarColor) {
        for slot in 0..self.elements.len() {
            self.set_color(slot, to);
        }
    }

    /// Merge placement: replace `slot` with a fresh element carrying `donor`'s
    /// key at the slot's position.
    ///
    /// `source` is where the donor originally sat. If that slot has not been
    /// overwritten yet, its stale original is frozen so nothing recolors or
    /// redraws it before it is overwritten in turn.
    pub fn place(&mut self, slot: usize, donor: &Element, source: usize) {
        let placed = Element::merged_into(donor, &self.elements[slot]);
        if source > slot {
            self.elements[source].frozen = true;
        }
        self.elements[slot] = placed;
        self.notify(slot);
    }

    fn notify(&mut self, slot: usize) {
        let element = &self.elements[slot];
        if element.is_visible() {
            self.presenter.changed(slot, element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const AREA: Extent = Extent::new(200, 80);

    fn built(n: usize, arrangement: Arrangement) -> Sequence {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut sequence = Sequence::new(AREA, Box::new(NullPresenter));
        sequence.build(n, arrangement, &mut rng).unwrap();
        sequence
    }

    #[test]
    fn test_build_arrangements() {
        assert_eq!(built(5, Arrangement::Ascending).keys(), vec![0, 1, 2, 3, 4]);
        assert_eq!(built(5, Arrangement::Descending).keys(), vec![4, 3, 2, 1, 0]);

        let mut keys = built(20, Arrangement::Random).keys();
        keys.sort_unstable();
        assert_eq!(keys, (0..20).collect::<Vec<u32>>());
    }

    #[test]
    fn test_layout_fills_width() {
        let sequence = built(10, Arrangement::Ascending);
        for (slot, element) in sequence.elements().iter().enumerate() {
            assert_eq!(element.width, 20);
            assert_eq!(element.position, slot as u32 * 20);
        }
        assert_eq!(sequence.get(9).extent, AREA.height);
        assert!(sequence.get(0).extent >= 1);
    }

    #[test]
    fn test_invalid_size_keeps_previous() {
        let mut sequence = built(5, Arrangement::Ascending);
        let generation = sequence.generation();
        let mut rng = Pcg32::seed_from_u64(1);

        let err = sequence.build(1, Arrangement::Random, &mut rng).unwrap_err();
        assert!(matches!(err, SortError::InvalidSize { requested: 1, .. }));
        assert!(sequence.build(101, Arrangement::Random, &mut rng).is_err());

        assert_eq!(sequence.keys(), vec![0, 1, 2, 3, 4]);
        assert_eq!(sequence.generation(), generation);
    }

    #[test]
    fn test_rejects_sizes_wider_than_display() {
        let mut sequence = Sequence::new(Extent::new(8, 10), Box::new(NullPresenter));
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(sequence.build(9, Arrangement::Ascending, &mut rng).is_err());
        assert!(sequence.build(8, Arrangement::Ascending, &mut rng).is_ok());
    }

    #[test]
    fn test_swap_positions_keeps_visual_order() {
        let mut sequence = built(4, Arrangement::Ascending);
        sequence.swap_positions(3, 1);

        assert_eq!(sequence.keys(), vec![0, 3, 2, 1]);
        let positions: Vec<u32> = sequence.elements().iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![0, 50, 100, 150]);
    }

    #[test]
    fn test_compare_convention() {
        let sequence = Sequence::from_keys(&[3, 1, 4], AREA).unwrap();
        assert_eq!(sequence.compare(0, 1), Ordering::Greater);
        assert_eq!(sequence.compare(1, 2), Ordering::Less);
        assert_eq!(sequence.compare(2, 2), Ordering::Equal);
    }

    #[test]
    fn test_presenter_sees_mutations() {
        let log = EventLog::new(16);
        let mut sequence = Sequence::from_keys(&[2, 0, 1], AREA).unwrap();
        sequence.set_presenter(Box::new(log.clone()));

        sequence.set_color(0, BarColor::Active);
        sequence.set_color(0, BarColor::Active); // no-op, already active
        sequence.swap_positions(0, 1);

        let changes = log.recent(16);
        assert_eq!(changes.len(), 4);
        assert_eq!(changes[0], Change::Rebuilt { len: 3 });
        assert!(matches!(
            changes[1],
            Change::Element { slot: 0, color: BarColor::Active, .. }
        ));
    }

    #[test]
    fn test_place_freezes_stale_donor() {
        let mut sequence = Sequence::from_keys(&[5, 2, 7], AREA).unwrap();
        let donor = sequence.get(1).clone();
        sequence.place(0, &donor, 1);

        assert_eq!(sequence.get(0).key, 2);
        assert_eq!(sequence.get(0).position, 0);
        assert!(sequence.get(1).frozen);

        sequence.set_color(1, BarColor::Compare);
        assert_eq!(sequence.get(1).color, BarColor::Normal);
    }

    #[test]
    fn test_failed_relayout_records_extent() {
        let mut sequence = built(10, Arrangement::Ascending);
        let mut rng = Pcg32::seed_from_u64(2);
        assert!(sequence.relayout(Extent::new(6, 8)).is_err());

        assert_eq!(sequence.extent(), Extent::new(6, 8));
        assert_eq!(sequence.get(9).position, 9 * 20);
        assert!(sequence.build(8, Arrangement::Ascending, &mut rng).is_err());
        sequence.build(6, Arrangement::Ascending, &mut rng).unwrap();
        assert_eq!(sequence.get(5).position, 5);
    }

    #[test]
    fn test_relayout_preserves_order() {
        let mut sequence = built(4, Arrangement::Descending);
        sequence.set_color(2, BarColor::Pivot);
        sequence.relayout(Extent::new(40, 8)).unwrap();

        assert_eq!(sequence.keys(), vec![3, 2, 1, 0]);
        assert_eq!(sequence.get(1).position, 10);
        assert_eq!(sequence.get(2).color, BarColor::Pivot);
        assert!(sequence.relayout(Extent::new(3, 8)).is_err());
    }
}
