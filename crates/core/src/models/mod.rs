//! Data models for QRcade reward entities

mod avatar;
mod earnings;
mod reward;

pub use avatar::*;
pub use earnings::*;
pub use reward::*;
