//! Protocol module - Defines the loot notification wire format
//!
//! The notification uses a simple count-prefixed binary format:
//! - 4 bytes record count (big-endian)
//! - `count` item records, each laid out as:
//!   - 2 bytes kind length (big-endian)
//!   - Variable length kind identifier (UTF-8)
//!   - 4 bytes item count (big-endian)
//!   - 4 bytes auxiliary data length (big-endian)
//!   - Variable length auxiliary data

mod message;
mod codec;

pub use message::*;
pub use codec::*;

/// Protocol version for compatibility checking
pub const PROTOCOL_VERSION: u32 = 1;

/// Channel identifier the loot notification is dispatched on
pub const LOOT_CHANNEL: &str = "lootlink:player_received_loot";
