//! Core data types for install operations.

mod dest_dir;
mod unit;

pub use dest_dir::DestDir;
pub use unit::Unit;
pub use unit::UnitKey;
