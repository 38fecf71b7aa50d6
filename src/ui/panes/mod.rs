//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`bars`]: the sequence as vertical bars colored by state
//! - [`info`]: algorithm, settings, run statistics and color legend
//! - [`changes`]: recent presenter changes
//! - [`status`]: status bar with keybindings and run state
//! - [`prompt`]: centered input popup for size and delay
//!
//! Each pane module exports a `render_*` function taking the frame and its area.

pub mod bars;
pub mod info;
pub mod changes;
pub mod prompt;
pub mod status;

pub use bars::{bars_extent, render_bars_pane};
pub use info::{render_info_pane, INFO_PANE_HEIGHT};
pub use changes::render_changes_pane;
pub use prompt::render_prompt;
pub use status::{render_status_bar, StatusRenderData};
