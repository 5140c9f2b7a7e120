//! Replay frames and the legacy timeline codec.

mod frame;
mod timeline;

pub use frame::*;
pub use timeline::{decode_timeline, encode_timeline};
