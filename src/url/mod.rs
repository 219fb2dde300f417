//! URL splitting.
//!
//! This module contains the structural side of URL inspection:
//! - Lenient splitting of a URL string into components
//! - Authority (user info, host, port) extraction

pub mod authority;
pub mod parser;

// Re-export main functionality
pub use authority::{parse_port, Authority};
pub use parser::parse;
