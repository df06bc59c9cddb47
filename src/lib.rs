//! Core logic for the certificate mailer.
//!
//! The library is independent of the UI toolkit so it can be exercised from
//! tests. The binary in `main.rs` wires it to the slint window.
//!
//! - `state` - annotation surface (image + name box + drag state)
//! - `roster` - CSV upload validation and parsing
//! - `email` - draft, preview and personalization
//! - `dispatch` - progress model and the mailer seam
//! - `layout` - certificate layout export
//! - `config` - TOML configuration
//! - `logging` - logger setup

pub mod config;
pub mod dispatch;
pub mod email;
pub mod error;
pub mod layout;
pub mod logging;
pub mod roster;
pub mod state;

pub use error::{ConfigError, DispatchError, ImageError, LayoutError, RosterError};
