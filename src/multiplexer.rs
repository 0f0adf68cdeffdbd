//! Display multiplexer - time-multiplexed common-anode 7-segment driver
//!
//! One call to [`Multiplexer::render_next`] lights one digit position for a
//! short dwell and then switches it off again. Cycling through the three
//! positions fast enough makes the whole number appear steady.
//!
//! Segment outputs are active-low (driven LOW to light a segment). Digit
//! select outputs are active-high (driven HIGH to power a digit's anode).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::domain::{DigitBuffer, Segment, SegmentPattern, DECIMAL_POSITION, DIGIT_COUNT};

/// Time one digit stays lit per render (microseconds)
pub const DWELL_US: u32 = 200;

/// Segment outputs per digit: A..G plus decimal point
pub const SEGMENT_COUNT: usize = 8;

/// Error type for display operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// A segment or digit-select output could not be driven
    Pin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MultiplexConfig {
    /// How long each digit stays lit (microseconds)
    pub dwell_us: u32,
    /// Position whose decimal point is lit
    pub decimal_position: usize,
}

impl Default for MultiplexConfig {
    fn default() -> Self {
        Self {
            dwell_us: DWELL_US,
            decimal_position: DECIMAL_POSITION,
        }
    }
}

/// Owns the display pins and the digit cursor
pub struct Multiplexer<P, D> {
    /// Segment outputs ordered A..G, DP
    segments: [P; SEGMENT_COUNT],
    /// Digit-select outputs, one per position
    digit_selects: [P; DIGIT_COUNT],
    delay: D,
    index: usize,
    config: MultiplexConfig,
}

impl<P: OutputPin, D: DelayNs> Multiplexer<P, D> {
    /// Take the pins and drive them to the resting state
    ///
    /// Resting state is every segment HIGH (dark) and every digit LOW
    /// (unpowered).
    pub fn new(
        segments: [P; SEGMENT_COUNT],
        digit_selects: [P; DIGIT_COUNT],
        delay: D,
        config: MultiplexConfig,
    ) -> Result<Self, DisplayError> {
        let mut mux = Self {
            segments,
            digit_selects,
            delay,
            index: 0,
            config,
        };
        mux.blank()?;
        info!(
            "Display ready: {} digits, {} us dwell",
            DIGIT_COUNT, mux.config.dwell_us
        );
        Ok(mux)
    }

    /// Switch every digit off and darken every segment
    pub fn blank(&mut self) -> Result<(), DisplayError> {
        for select in self.digit_selects.iter_mut() {
            drive(select, false)?;
        }
        for segment in self.segments.iter_mut() {
            drive(segment, true)?;
        }
        Ok(())
    }

    /// Light the current position for one dwell, then advance the cursor
    ///
    /// Segments are set before the digit is enabled, and the digit is
    /// disabled again before returning, so at most one position is ever
    /// powered and the next pattern cannot bleed into this one.
    pub fn render_next(&mut self, digits: &DigitBuffer) -> Result<(), DisplayError> {
        let position = self.index;
        let pattern =
            SegmentPattern::for_digit(digits.get(position)).unwrap_or(SegmentPattern::BLANK);

        self.write_segments(pattern, position == self.config.decimal_position)?;

        drive(&mut self.digit_selects[position], true)?;
        self.delay.delay_us(self.config.dwell_us);
        let released = drive(&mut self.digit_selects[position], false);

        self.index = (position + 1) % DIGIT_COUNT;
        released
    }

    /// Render all positions once, starting from the current cursor
    pub fn render_frame(&mut self, digits: &DigitBuffer) -> Result<(), DisplayError> {
        for _ in 0..DIGIT_COUNT {
            self.render_next(digits)?;
        }
        Ok(())
    }

    fn write_segments(
        &mut self,
        pattern: SegmentPattern,
        decimal_point: bool,
    ) -> Result<(), DisplayError> {
        for segment in Segment::GLYPH {
            let pin = &mut self.segments[segment.bit() as usize];
            drive(pin, pattern.level(segment))?;
        }
        // LOW lights the point
        drive(&mut self.segments[Segment::Dp.bit() as usize], !decimal_point)
    }

    /// Position that the next render will light
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn config(&self) -> &MultiplexConfig {
        &self.config
    }

    /// Give the pins and delay back
    pub fn release(self) -> ([P; SEGMENT_COUNT], [P; DIGIT_COUNT], D) {
        (self.segments, self.digit_selects, self.delay)
    }
}

#[inline]
fn drive<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), DisplayError> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| DisplayError::Pin)
}
