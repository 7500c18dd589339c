mod combat_event;
mod error;
mod parser;
mod reader;
mod streamer;
mod value;

pub use combat_event::*;
pub use error::{LogOp, ParseError, StreamError};
pub use parser::{LineFields, LogParser, split_fields, split_named_id};
pub use reader::Reader;
pub use streamer::{LogCursor, LogStreamer, split_complete_lines};
pub use value::parse_value;
