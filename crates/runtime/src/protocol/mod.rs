//! Wire protocol: one JSON value per line in each direction.
//!
//! [`MessageReader`] turns the inbound stream into JSON values and
//! [`messages`] knows the shape of each phase's payload.
pub mod messages;
pub mod reader;

pub use messages::{END, END_INIT, TurnUpdate, init_updates, is_sentinel, parse_handshake};
pub use reader::{MessageReader, ReadError};
