//! Readers and writers for route lists.
//!
//! A route list is a sequence of edge tokens such as `AB5`, separated by
//! commas and/or whitespace. Lines starting with `#` are comments.

mod error;
pub use crate::error::{Error, ParseError};

pub mod io;
