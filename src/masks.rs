//! Bit patterns for packing [`BitBool`] states into chunks.
//!
//! A chunk is a `u32` divided into `SLOTS_PER_CHUNK` slots of `BITS_PER_SLOT` bits each.
//! Slot `i` occupies bits `2*i` and `2*i+1`, least significant first. The tables below hold,
//! for each slot, the chunk value with only that slot's bits set to a given pattern.

use crate::BitBool;

/// The storage word of a packed boolean column.
pub type Chunk = u32;

pub const BITS_PER_SLOT: usize = 2;
pub const SLOTS_PER_CHUNK: usize = Chunk::BITS as usize / BITS_PER_SLOT;

const fn spread(code: u8) -> [Chunk; SLOTS_PER_CHUNK] {
    let mut masks = [0; SLOTS_PER_CHUNK];
    let mut slot = 0;
    while slot < SLOTS_PER_CHUNK {
        masks[slot] = (code as Chunk) << (slot * BITS_PER_SLOT);
        slot += 1;
    }
    masks
}

const fn fill(code: u8) -> Chunk {
    let mut chunk = 0;
    let mut slot = 0;
    while slot < SLOTS_PER_CHUNK {
        chunk |= (code as Chunk) << (slot * BITS_PER_SLOT);
        slot += 1;
    }
    chunk
}

/// All bits of each slot; also the `True` pattern.
pub const BIT_MASKS: [Chunk; SLOTS_PER_CHUNK] = spread(BitBool::True.code());
pub const NAN_MASKS: [Chunk; SLOTS_PER_CHUNK] = spread(BitBool::NaN.code());
pub const NULL_MASKS: [Chunk; SLOTS_PER_CHUNK] = spread(BitBool::Null.code());
/// A chunk with every slot `Null`; the fill for unused capacity.
pub const CHUNK_NULL: Chunk = fill(BitBool::Null.code());

/// The chunk index and in-chunk slot of a position.
#[inline(always)]
pub const fn locate(position: usize) -> (usize, usize) {
    (position / SLOTS_PER_CHUNK, position % SLOTS_PER_CHUNK)
}

/// The number of chunks required to hold `slots` slots.
#[inline(always)]
pub const fn chunks_for(slots: usize) -> usize {
    slots.div_ceil(SLOTS_PER_CHUNK)
}

/// The pattern `state` takes when written to `slot`.
#[inline(always)]
pub fn pattern(state: BitBool, slot: usize) -> Chunk {
    match state {
        BitBool::False => 0,
        BitBool::True => BIT_MASKS[slot],
        BitBool::NaN => NAN_MASKS[slot],
        BitBool::Null => NULL_MASKS[slot],
    }
}

/// Reads the state held in `slot` of `chunk`.
#[inline(always)]
pub fn decode(chunk: Chunk, slot: usize) -> BitBool {
    let bits = chunk & BIT_MASKS[slot];
    if bits == 0 {
        BitBool::False
    } else if bits == BIT_MASKS[slot] {
        BitBool::True
    } else if bits == NAN_MASKS[slot] {
        BitBool::NaN
    } else {
        BitBool::Null
    }
}

/// Returns `chunk` with `slot` overwritten by `state`.
#[inline(always)]
pub fn encode(chunk: Chunk, slot: usize, state: BitBool) -> Chunk {
    (chunk & !BIT_MASKS[slot]) | pattern(state, slot)
}

/// The number of slots preceding the first `Null` slot, or `SLOTS_PER_CHUNK` if there is none.
#[inline]
pub fn leading_len(chunk: Chunk) -> usize {
    (0 .. SLOTS_PER_CHUNK)
        .find(|&slot| chunk & BIT_MASKS[slot] == NULL_MASKS[slot])
        .unwrap_or(SLOTS_PER_CHUNK)
}

#[cfg(test)]
mod test {

    use super::*;

    const STATES: [BitBool; 4] = [BitBool::False, BitBool::True, BitBool::NaN, BitBool::Null];

    #[test]
    fn tables() {
        assert_eq!(SLOTS_PER_CHUNK, 16);
        assert_eq!(CHUNK_NULL, 0xAAAA_AAAA);
        assert_eq!(BIT_MASKS[0], 0b11);
        assert_eq!(BIT_MASKS[15], 0b11 << 30);
        assert_eq!(NAN_MASKS[1], 0b0100);
        assert_eq!(NULL_MASKS[1], 0b1000);
        for slot in 0 .. SLOTS_PER_CHUNK {
            assert_eq!(NAN_MASKS[slot] | NULL_MASKS[slot], BIT_MASKS[slot]);
            assert_eq!(NAN_MASKS[slot] & NULL_MASKS[slot], 0);
        }
    }

    #[test]
    fn encode_decode() {
        for slot in 0 .. SLOTS_PER_CHUNK {
            for background in [0, Chunk::MAX, CHUNK_NULL, 0x1234_5678] {
                for state in STATES {
                    let chunk = encode(background, slot, state);
                    assert_eq!(decode(chunk, slot), state);
                    // Other slots are untouched.
                    assert_eq!(chunk & !BIT_MASKS[slot], background & !BIT_MASKS[slot]);
                }
            }
        }
    }

    #[test]
    fn null_scan() {
        assert_eq!(leading_len(CHUNK_NULL), 0);
        assert_eq!(leading_len(0), SLOTS_PER_CHUNK);
        assert_eq!(leading_len(Chunk::MAX), SLOTS_PER_CHUNK);
        let chunk = encode(encode(CHUNK_NULL, 0, BitBool::True), 1, BitBool::NaN);
        assert_eq!(leading_len(chunk), 2);
        // A value after the first `Null` is not counted.
        assert_eq!(leading_len(encode(chunk, 5, BitBool::False)), 2);
    }

    #[test]
    fn positions() {
        assert_eq!(locate(0), (0, 0));
        assert_eq!(locate(15), (0, 15));
        assert_eq!(locate(16), (1, 0));
        assert_eq!(locate(37), (2, 5));
        assert_eq!(chunks_for(0), 0);
        assert_eq!(chunks_for(1), 1);
        assert_eq!(chunks_for(16), 1);
        assert_eq!(chunks_for(17), 2);
    }
}
