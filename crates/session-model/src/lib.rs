//! Chacha Photobooth Session Model
//!
//! Defines the core data contracts of a photobooth session:
//! - **Photo:** One encoded, mirrored still captured at a shutter event
//! - **Session:** Step counter, ordered photos, and the pure transitions
//!   between them
//! - **View:** The presentation snapshot handed to a `SessionRenderer`

pub mod photo;
pub mod session;
pub mod view;

pub use chacha_common::theme::{Theme, UnknownTheme};
pub use photo::*;
pub use session::*;
pub use view::*;
