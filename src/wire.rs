//! Helpers for the Protocol Buffers binary encoding.

pub mod zigzag;
