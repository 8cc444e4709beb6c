//! Core types for CipherH.

mod channel;

pub use channel::*;
