//! Reader for exported chat logs.
//!
//! A log is a JSON array of message records. Records are kept as generic
//! ordered maps since exports differ in the fields they carry; only the
//! timestamp is required.

pub mod discussion;
pub mod message;

pub use discussion::Discussion;
pub use message::{parse_timestamp, Message};
