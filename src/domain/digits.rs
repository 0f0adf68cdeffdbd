//! Decimal digit buffer shared between the sampler and the multiplexer

use core::fmt::Write;

/// Number of digit positions on the display
pub const DIGIT_COUNT: usize = 3;

/// Position that carries the decimal point (`2`, `5.`, `3` for 25.3)
pub const DECIMAL_POSITION: usize = 1;

/// Current display state: one decimal digit per position, each 0..=9
///
/// The buffer only changes as a whole through [`DigitBuffer::from_celsius`],
/// so the multiplexer never sees a partially updated value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitBuffer([u8; DIGIT_COUNT]);

impl DigitBuffer {
    /// All digits zero (startup state)
    pub const ZERO: DigitBuffer = DigitBuffer([0; DIGIT_COUNT]);

    /// Build a buffer from explicit digits
    ///
    /// Returns `None` if any digit is above 9.
    pub fn new(digits: [u8; DIGIT_COUNT]) -> Option<Self> {
        if digits.iter().all(|d| *d <= 9) {
            Some(Self(digits))
        } else {
            None
        }
    }

    /// Decompose a Celsius value into display digits
    ///
    /// The value is scaled by ten and truncated toward zero. Negative values
    /// are decomposed from their magnitude and the hundreds-of-degrees digit
    /// is dropped, so -5.0 shows as `0 5. 0` and 123.4 as `2 3. 4`.
    pub fn from_celsius(celsius: f32) -> Self {
        Self::from_scaled(scale(celsius))
    }

    /// Decompose a tenths-of-a-degree integer
    pub fn from_scaled(scaled: i32) -> Self {
        let magnitude = scaled.unsigned_abs();
        Self([
            ((magnitude / 100) % 10) as u8,
            ((magnitude / 10) % 10) as u8,
            (magnitude % 10) as u8,
        ])
    }

    /// Digit at a display position
    #[inline]
    pub fn get(&self, position: usize) -> u8 {
        self.0[position % DIGIT_COUNT]
    }

    pub fn digits(&self) -> [u8; DIGIT_COUNT] {
        self.0
    }

    /// Value shown on the display, in tenths of a degree (0..=999)
    pub fn as_scaled(&self) -> u16 {
        self.0[0] as u16 * 100 + self.0[1] as u16 * 10 + self.0[2] as u16
    }

    /// Text as it appears on the glass, e.g. `"25.3"`
    pub fn render(&self) -> heapless::String<8> {
        let mut text = heapless::String::new();
        for (position, digit) in self.0.iter().enumerate() {
            // Capacity covers 3 digits plus one point
            let _ = write!(text, "{}", digit);
            if position == DECIMAL_POSITION {
                let _ = text.push('.');
            }
        }
        text
    }
}

/// Scale Celsius to tenths, truncating toward zero
///
/// `as` saturates at the `i32` limits and maps NaN to 0.
#[inline]
pub fn scale(celsius: f32) -> i32 {
    (celsius * 10.0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typical_reading() {
        let digits = DigitBuffer::from_celsius(25.3);
        assert_eq!(digits.digits(), [2, 5, 3]);
        assert_eq!(digits.render().as_str(), "25.3");
    }

    #[test]
    fn test_truncates_instead_of_rounding() {
        assert_eq!(DigitBuffer::from_celsius(21.99).digits(), [2, 1, 9]);
        assert_eq!(DigitBuffer::from_celsius(0.0625).digits(), [0, 0, 0]);
    }

    #[test]
    fn test_negative_uses_magnitude() {
        assert_eq!(scale(-5.0), -50);
        let digits = DigitBuffer::from_celsius(-5.0);
        assert_eq!(digits.digits(), [0, 5, 0]);
        assert_eq!(digits.render().as_str(), "05.0");

        assert_eq!(DigitBuffer::from_celsius(-10.0).digits(), [1, 0, 0]);
        // -0.05 truncates to zero, no sign survives
        assert_eq!(DigitBuffer::from_celsius(-0.05).digits(), [0, 0, 0]);
    }

    #[test]
    fn test_hundreds_digit_dropped() {
        assert_eq!(DigitBuffer::from_celsius(123.4).digits(), [2, 3, 4]);
        assert_eq!(DigitBuffer::from_scaled(1000).digits(), [0, 0, 0]);
    }

    #[test]
    fn test_sentinel_and_extremes_stay_in_range() {
        // -127.0 disconnect sentinel: 1270 -> 270
        assert_eq!(DigitBuffer::from_celsius(-127.0).digits(), [2, 7, 0]);
        assert_eq!(DigitBuffer::from_celsius(f32::NAN), DigitBuffer::ZERO);
        for value in [f32::INFINITY, f32::NEG_INFINITY, f32::MAX, f32::MIN] {
            let digits = DigitBuffer::from_celsius(value);
            assert!(digits.digits().iter().all(|d| *d <= 9));
        }
        assert!(DigitBuffer::from_scaled(i32::MIN).digits().iter().all(|d| *d <= 9));
    }

    #[test]
    fn test_decomposition_property_over_sensor_range() {
        // -10.0 ..= 99.9 in 0.1 steps, plus quarter-step sensor values
        let tenths = (-100..=999).map(|t| t as f32 / 10.0);
        let sixteenths = (-160..=1598).map(|t| t as f32 / 16.0);
        for celsius in tenths.chain(sixteenths) {
            let digits = DigitBuffer::from_celsius(celsius);
            assert!(digits.digits().iter().all(|d| *d <= 9));
            let expected = (scale(celsius).unsigned_abs() % 1000) as u16;
            assert_eq!(digits.as_scaled(), expected, "celsius {}", celsius);
        }
    }

    #[test]
    fn test_new_rejects_out_of_range_digit() {
        assert!(DigitBuffer::new([1, 2, 3]).is_some());
        assert!(DigitBuffer::new([1, 10, 3]).is_none());
    }

    #[test]
    fn test_get_wraps_position() {
        let digits = DigitBuffer::new([4, 5, 6]).unwrap();
        assert_eq!(digits.get(1), 5);
        assert_eq!(digits.get(4), 5);
    }
}
