//! Zig-zag encoding of signed integers, as used by `sint32` and `sint64`.
//!
//! Small magnitudes map to small unsigned values regardless of sign:
//! `0 -> 0`, `-1 -> 1`, `1 -> 2`, `-2 -> 3`.

pub fn encode32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

pub fn decode32(n: u32) -> i32 {
    ((n >> 1) as i32) ^ -((n & 1) as i32)
}

pub fn encode64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

pub fn decode64(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}
