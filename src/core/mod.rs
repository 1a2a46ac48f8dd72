//! # Core Board Logic
//!
//! Everything that decides what a drag or a keyboard command does to the
//! board. It knows nothing about terminals or rendering.
//!
//! ```text
//!   gesture / command ──► MoveRequest ──► BoardStore::apply ──► update()
//!                                               │
//!                                         CommitNotice
//!                                               ▼
//!                  IdentityRegistry ──► EffectDispatcher ──► Vec<Effect>
//!                                               │
//!            ┌──────────────────────────────────┼────────────────┐
//!            ▼                                  ▼                ▼
//!      ┌────────────┐                    ┌────────────┐    ┌────────────┐
//!      │   flash    │                    │  announce  │    │   focus    │
//!      └────────────┘                    └────────────┘    └────────────┘
//!                    (executed by the TUI adapter)
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `BoardState`, `Container`, `Item`
//! - [`destination`]: where a drop lands, from target index and edge
//! - [`outcome`]: the three transitions and the `Operation` they record
//! - [`action`]: `MoveRequest` and `update()`
//! - [`gesture`]: pointer drops and keyboard commands into requests
//! - [`store`]: the committed state and its commit channel
//! - [`registry`]: id to visual handle lookup
//! - [`effects`]: highlight, announce and focus decisions
//! - [`seed`]: initial boards
//! - [`config`]: layered settings

pub mod action;
pub mod config;
pub mod destination;
pub mod effects;
pub mod error;
pub mod gesture;
pub mod outcome;
pub mod registry;
pub mod seed;
pub mod state;
pub mod store;
