//! Backend test support utilities
//!
//! This crate provides utilities specifically for backend testing: unified
//! logging initialization and assertions over the JSON response envelope.

pub mod envelope;
pub mod logging;
