//! Seven-segment glyph table
//!
//! Patterns use common-anode (active-low) logic: a `0` bit means the segment
//! is lit. Bit `n` drives segment output `n`, ordered A..G then the decimal
//! point in bit 7.

/// One of the eight segment outputs of a digit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Segment {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    /// Decimal point
    Dp = 7,
}

impl Segment {
    /// The seven glyph segments, in output order (decimal point excluded)
    pub const GLYPH: [Segment; 7] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
    ];

    /// Bit position of this segment inside a [`SegmentPattern`]
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

/// Active-low segment code for one digit position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPattern(pub u8);

impl SegmentPattern {
    /// Every segment dark, decimal point included
    pub const BLANK: SegmentPattern = SegmentPattern(0xFF);

    /// Look up the glyph for a decimal digit
    ///
    /// Returns `None` for values above 9.
    pub const fn for_digit(digit: u8) -> Option<Self> {
        if (digit as usize) < SEGMENT_TABLE.len() {
            Some(SEGMENT_TABLE[digit as usize])
        } else {
            None
        }
    }

    /// Raw bit level for a segment output (`false` = drive LOW = lit)
    #[inline]
    pub const fn level(self, segment: Segment) -> bool {
        (self.0 >> segment.bit()) & 0x01 != 0
    }

    #[inline]
    pub const fn is_lit(self, segment: Segment) -> bool {
        !self.level(segment)
    }

    /// Same glyph with the decimal point lit
    pub const fn with_decimal_point(self) -> Self {
        SegmentPattern(self.0 & !(1 << Segment::Dp.bit()))
    }
}

/// Glyphs for digits 0-9, bit order `DP G F E D C B A`
pub const SEGMENT_TABLE: [SegmentPattern; 10] = [
    SegmentPattern(0b1100_0000), // 0
    SegmentPattern(0b1111_1001), // 1
    SegmentPattern(0b1010_0100), // 2
    SegmentPattern(0b1011_0000), // 3
    SegmentPattern(0b1001_1001), // 4
    SegmentPattern(0b1001_0010), // 5
    SegmentPattern(0b1000_0010), // 6
    SegmentPattern(0b1111_1000), // 7
    SegmentPattern(0b1000_0000), // 8
    SegmentPattern(0b1001_0000), // 9
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_common_anode_codes() {
        let expected = [0xC0, 0xF9, 0xA4, 0xB0, 0x99, 0x92, 0x82, 0xF8, 0x80, 0x90];
        for (digit, code) in expected.iter().enumerate() {
            assert_eq!(SEGMENT_TABLE[digit].0, *code, "digit {}", digit);
        }
    }

    #[test]
    fn test_eight_lights_every_glyph_segment() {
        let eight = SegmentPattern::for_digit(8).unwrap();
        for segment in Segment::GLYPH {
            assert!(eight.is_lit(segment));
        }
        // Decimal point is driven separately
        assert!(!eight.is_lit(Segment::Dp));
    }

    #[test]
    fn test_decimal_point_never_in_table() {
        for pattern in SEGMENT_TABLE {
            assert!(pattern.level(Segment::Dp));
        }
    }

    #[test]
    fn test_one_lights_b_and_c_only() {
        let one = SegmentPattern::for_digit(1).unwrap();
        let lit: heapless::Vec<Segment, 8> =
            Segment::GLYPH.into_iter().filter(|s| one.is_lit(*s)).collect();
        assert_eq!(lit.as_slice(), &[Segment::B, Segment::C]);
    }

    #[test]
    fn test_out_of_range_digit() {
        assert_eq!(SegmentPattern::for_digit(10), None);
        assert_eq!(SegmentPattern::for_digit(255), None);
    }

    #[test]
    fn test_with_decimal_point() {
        let five = SegmentPattern::for_digit(5).unwrap().with_decimal_point();
        assert!(five.is_lit(Segment::Dp));
        assert_eq!(five.0, 0x12);
        assert!(SegmentPattern::BLANK.with_decimal_point().is_lit(Segment::Dp));
    }
}
