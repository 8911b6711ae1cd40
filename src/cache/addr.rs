/// Splits a raw access address into the (tag, set index) pair the cache model
/// works with. Block-offset bits are discarded outright: hit/miss
/// classification never looks inside a block.
///
/// Bit layout, high to low: `| tag | set_bits | block_bits |`.
pub fn decode(addr: u64, set_bits: u32, block_bits: u32) -> (u64, usize) {
    let tag = shr_or_zero(addr, set_bits + block_bits);
    let set_idx = shr_or_zero(addr, block_bits) & set_mask(set_bits);
    (tag, set_idx as usize)
}

// A shift by the full word width must yield 0, not wrap the shift amount.
fn shr_or_zero(value: u64, shift: u32) -> u64 {
    value.checked_shr(shift).unwrap_or(0)
}

fn set_mask(set_bits: u32) -> u64 {
    if set_bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << set_bits) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::decode;

    #[test]
    fn splits_tag_and_set_fields() {
        // 4 set bits, 4 block bits: 0x1234 -> tag 0x12, set 0x3
        assert_eq!(decode(0x1234, 4, 4), (0x12, 0x3));
    }

    #[test]
    fn zero_set_bits_maps_everything_to_set_zero() {
        assert_eq!(decode(0xdead_beef, 0, 4), (0xdead_bee, 0));
        assert_eq!(decode(u64::MAX, 0, 0), (u64::MAX, 0));
    }

    #[test]
    fn zero_block_bits_uses_low_bits_as_set_index() {
        assert_eq!(decode(0b1011_01, 2, 0), (0b1011, 0b01));
    }

    #[test]
    fn full_width_fields_leave_no_tag() {
        // s + b == 64: every address bit is set index or offset.
        assert_eq!(decode(u64::MAX, 32, 32), (0, u32::MAX as usize));
    }

    #[test]
    fn adjacent_addresses_in_one_block_decode_identically() {
        assert_eq!(decode(0x40, 2, 4), decode(0x4f, 2, 4));
        assert_ne!(decode(0x40, 2, 4), decode(0x50, 2, 4));
    }
}
