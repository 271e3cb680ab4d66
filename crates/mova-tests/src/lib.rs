//! Integration test crate for MovaType.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on multiple mova crates to verify they work together.

#[cfg(test)]
mod compose;

#[cfg(test)]
mod segment;

#[cfg(test)]
mod timeline;
