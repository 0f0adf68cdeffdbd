//! ADC temperature calibration
//!
//! Linear conversion from raw on-chip ADC counts to Celsius, used by the
//! RP2350 sensor adapter.

/// `temperature = raw * scale + offset`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcCalibration {
    pub scale: f32,
    pub offset: f32,
}

impl AdcCalibration {
    /// RP2350 empirical calibration
    ///
    /// The RP2040 datasheet formula does not hold on the RP2350, whose ADC
    /// reads around 57 counts at room temperature (~27 C).
    pub const RP2350_DEFAULT: Self = Self {
        scale: 0.474,
        offset: 0.0,
    };

    /// RP2040 datasheet formula `27 - (V - 0.706) / 0.001721` with
    /// `V = raw * 3.3 / 4096`
    pub const RP2040_DEFAULT: Self = Self {
        scale: -0.468,
        offset: 437.2,
    };

    pub const fn new(scale: f32, offset: f32) -> Self {
        Self { scale, offset }
    }

    #[inline]
    pub fn celsius_from_raw(self, raw: u16) -> f32 {
        self.celsius_from_mean(raw as f32)
    }

    /// Convert an averaged (fractional) ADC value
    #[inline]
    pub fn celsius_from_mean(self, raw: f32) -> f32 {
        raw * self.scale + self.offset
    }

    /// Fit the line through two known (raw, Celsius) points
    ///
    /// Returns `None` when both points share the same raw value.
    pub fn from_two_points(raw1: u16, celsius1: f32, raw2: u16, celsius2: f32) -> Option<Self> {
        if raw1 == raw2 {
            return None;
        }
        let (raw1, raw2) = (raw1 as f32, raw2 as f32);
        let scale = (celsius2 - celsius1) / (raw2 - raw1);
        let offset = celsius1 - scale * raw1;
        Some(Self { scale, offset })
    }
}

impl Default for AdcCalibration {
    fn default() -> Self {
        Self::RP2350_DEFAULT
    }
}
