//! Integration test crate for EmoLabel.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on multiple emolabel crates to verify they work together.

#[cfg(test)]
mod timeline;

#[cfg(test)]
mod text;

#[cfg(test)]
mod session;
