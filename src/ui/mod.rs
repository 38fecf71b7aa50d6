//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]**: application state, keyboard event loop, input prompts
//! - **[`panes`]**: stateless render functions for each visible pane (bars,
//!   info, changes, status bar, prompt)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! Construct an [`App`] around a [`Controller`] and call [`App::run`] to start
//! the event loop.
//!
//! [`Controller`]: crate::engine::Controller
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
