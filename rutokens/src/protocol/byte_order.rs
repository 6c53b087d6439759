// rutokens/src/protocol/byte_order.rs

/// Exchange every non-overlapping byte pair in place. A trailing odd byte is
/// left untouched.
pub fn swap_pairs(buf: &mut [u8]) {
    for pair in buf.chunks_exact_mut(2) {
        pair.swap(0, 1);
    }
}

/// Reverse every 4-byte group in place (outer bytes exchanged, then the inner
/// pair). Trailing bytes that do not form a full group are left untouched.
pub fn swap_quads(buf: &mut [u8]) {
    for quad in buf.chunks_exact_mut(4) {
        quad.swap(0, 3);
        swap_pairs(&mut quad[1..3]);
    }
}
