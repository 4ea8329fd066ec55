//! Fixed, little-endian wire records for block transfer.
//!
//! Every message is either a count header (`WireCount`) or a run of element
//! records (`WireElem`). All multi-byte integers are **little-endian** on the
//! wire: stored pre-LE with `.to_le()` and decoded with `.from_le()`.

use bytemuck::{Pod, Zeroable};
use std::mem::{align_of, size_of};

pub fn cast_slice<T: Pod>(v: &[T]) -> &[u8] {
    bytemuck::cast_slice(v)
}

pub fn cast_slice_from<T: Pod>(v: &[u8]) -> &[T] {
    bytemuck::cast_slice(v)
}

/// Count of element records in the payload frame that follows.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct WireCount {
    pub n_le: u32,
}

impl WireCount {
    pub fn new(n: usize) -> Self {
        Self {
            n_le: (n as u32).to_le(),
        }
    }
    pub fn get(&self) -> usize {
        u32::from_le(self.n_le) as usize
    }
}

/// One sort key carried on the wire.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct WireElem {
    pub v_le: i64,
}

impl WireElem {
    pub fn of(v: i64) -> Self {
        Self { v_le: v.to_le() }
    }
    pub fn get(&self) -> i64 {
        i64::from_le(self.v_le)
    }
}

/// Encode a block of keys into its wire representation.
pub fn encode_block(block: &[i64]) -> Vec<WireElem> {
    block.iter().map(|&v| WireElem::of(v)).collect()
}

/// Decode a wire frame back into keys.
pub fn decode_block(frame: &[WireElem]) -> Vec<i64> {
    frame.iter().map(WireElem::get).collect()
}

// ===== Compile-time sanity checks =========================================

const _: () = {
    // Pod/Zeroable ensures no padding contains uninit when cast to bytes.
    assert!(size_of::<WireCount>() == 4);
    assert!(size_of::<WireElem>() == 8);
    assert!(align_of::<WireElem>() == 8);
};

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::cast_slice_mut;

    #[test]
    fn roundtrip_count() {
        let c = WireCount::new(10_007);
        let bytes: Vec<u8> = cast_slice(std::slice::from_ref(&c)).to_vec();
        let mut out = [WireCount::zeroed()];
        cast_slice_mut(&mut out).copy_from_slice(&bytes);
        assert_eq!(out[0].get(), 10_007);
    }

    #[test]
    fn roundtrip_elems() {
        let block = vec![i64::MIN, -1, 0, 42, i64::MAX];
        let frame = encode_block(&block);
        let bytes: Vec<u8> = cast_slice(&frame).to_vec();
        let decoded = decode_block(cast_slice_from::<WireElem>(&bytes));
        assert_eq!(decoded, block);
    }
}
