//! Application module: the terminal page the player renders into.
//!
//! `App` lives in `app::model`. It implements
//! [`PlayerSurface`](crate::player::PlayerSurface) and also holds the
//! terminal-only state: the list cursor, the filter input and pending
//! notifications.

mod model;

pub use model::*;
