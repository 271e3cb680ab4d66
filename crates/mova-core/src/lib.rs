//! MovaType Core - Foundation types for movable-type audio editing
//!
//! This crate provides the fundamental types used throughout MovaType:
//! - Time spans in seconds (TimeSpan)
//! - The workspace-wide error taxonomy (MovaError)

pub mod error;
pub mod time;

pub use error::{MovaError, Result};
pub use time::TimeSpan;
