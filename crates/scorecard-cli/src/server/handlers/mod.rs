//! Request handlers.

mod analyze;
mod home;
mod ping;
mod upload;

pub use analyze::*;
pub use home::*;
pub use ping::*;
