//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `StatusBar`: top line with the revision and the live-region text
//! - `BoardView`: columns and cards, with focus, flash and drop styling
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `ActionMenu`: keyboard move commands for the focused card or column
//!
//! Components receive external data as props, never by reaching into
//! `TuiState` themselves:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! StatusBar::new(state.revision(), status.clone()).render(frame, area);
//! ```

mod action_menu;
mod board_view;
mod status_bar;

pub use action_menu::{ActionMenu, ActionMenuState, MenuEvent};
pub use board_view::BoardView;
pub use status_bar::StatusBar;
