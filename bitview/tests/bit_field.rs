use bitview::prelude::*;
use quickcheck::quickcheck;
use seq_macro::seq;

#[test]
fn test_every_offset_u32() {
    seq!(OFFSET in 0..=28 {
        let mut word = u32::MAX;
        BitField::<OFFSET, 4, u32>::set(&mut word, 0b0101);
        assert_eq!(BitField::<OFFSET, 4, u32>::get(word), 0b0101);
        assert_eq!(word | (0b1010 << OFFSET), u32::MAX);
        assert_eq!(word & !(0b1111 << OFFSET), u32::MAX & !(0b1111 << OFFSET));
    });
}

#[test]
fn test_every_width_u64() {
    seq!(WIDTH in 1..=64 {
        let value = u64::MAX >> (64 - WIDTH);
        assert_eq!(BitField::<0, WIDTH, u64>::get(u64::MAX), value);
        assert_eq!(BitField::<0, WIDTH, u64>::with(0, u64::MAX), value);
        assert_eq!(BitField::<0, WIDTH, u64>::mask(), value);
    });
}

#[test]
fn test_most_negative_value_in_every_signed_width() {
    seq!(WIDTH in 1..=16 {
        let min = -(1i32 << (WIDTH - 1));
        let mut word = 0i32;
        BitField::<8, WIDTH, i32>::set(&mut word, min);
        assert_eq!(BitField::<8, WIDTH, i32>::get(word), min);
    });
}

#[test]
fn test_signed_nibble() {
    type Nibble = BitField<4, 4, i8>;

    let mut word = 0i8;
    Nibble::set(&mut word, -8);
    assert_eq!(Nibble::get(word), -8);
    assert_eq!(word as u8, 0b1000_0000);

    Nibble::set(&mut word, 7);
    assert_eq!(Nibble::get(word), 7);

    Nibble::set(&mut word, -1);
    assert_eq!(Nibble::get(word), -1);
    assert_eq!(word as u8, 0b1111_0000);
}

#[test]
fn test_signed_field_ignores_neighbors() {
    type Middle = BitField<8, 8, i32>;

    let word = 0x7f80_ff7fu32 as i32;
    assert_eq!(Middle::get(word), -1);
    assert_eq!(Middle::get(0x0000_8000), -128);
    assert_eq!(Middle::get(0x0000_7f00), 127);
}

#[test]
fn test_full_width_fields() {
    assert_eq!(BitField::<0, 8, u8>::get(0xa5), 0xa5);
    assert_eq!(BitField::<0, 16, i16>::get(-12345), -12345);
    assert_eq!(BitField::<0, 64, i64>::get(i64::MIN), i64::MIN);
    assert_eq!(BitField::<0, 64, u64>::with(7, u64::MAX), u64::MAX);
}

#[test]
fn test_overlapping_fields() {
    type Mask = BitField<32, 4, u64>;
    type Upper = BitField<32, 32, u64>;

    let mut word = 0u64;
    Upper::set(&mut word, 0xdead_beef);
    assert_eq!(Mask::get(word), 0xf);

    Mask::set(&mut word, 0x3);
    assert_eq!(Upper::get(word), 0xdead_bee3);
    assert_eq!(word, 0xdead_bee3_0000_0000);
}

quickcheck! {
    fn prop_assign_then_read_unsigned(word: u32, value: u32) -> bool {
        let value = value & 0x3ff;
        let mut word = word;
        BitField::<7, 10, u32>::set(&mut word, value);
        BitField::<7, 10, u32>::get(word) == value
    }

    fn prop_assign_then_read_signed(word: i32, value: i16) -> bool {
        let value = i32::from(value) >> 5;
        let mut word = word;
        BitField::<13, 11, i32>::set(&mut word, value);
        BitField::<13, 11, i32>::get(word) == value
    }

    fn prop_assign_preserves_outside_bits(word: u64, value: u64) -> bool {
        let mut assigned = word;
        BitField::<20, 13, u64>::set(&mut assigned, value);
        let outside = !BitField::<20, 13, u64>::mask();
        assigned & outside == word & outside
    }

    fn prop_disjoint_fields_are_independent(word: u32, low: u32, high: u32) -> bool {
        type Low = BitField<0, 12, u32>;
        type High = BitField<16, 16, u32>;

        let mut word = word;
        High::set(&mut word, high);
        let high_before = High::get(word);
        Low::set(&mut word, low);
        High::get(word) == high_before && Low::get(word) == low & 0xfff
    }

    fn prop_flag_matches_bit(word: u16, value: bool) -> bool {
        let word = BitFlag::<9, u16>::with(word, value);
        BitFlag::<9, u16>::get(word) == value && ((word >> 9) & 1 == 1) == value
    }
}
