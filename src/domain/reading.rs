//! Temperature reading domain entity
//!
//! Defines the sampled value, how a raw sensor value is classified, and the
//! sensor resolution settings.

/// Value the sensor driver reports when the device stopped answering
pub const DEVICE_DISCONNECTED_C: f32 = -127.0;

/// Lowest temperature the sensor can measure
pub const MIN_VALID_C: f32 = -55.0;

/// Highest temperature the sensor can measure
pub const MAX_VALID_C: f32 = 125.0;

/// The last acquired temperature
///
/// Replaced wholesale on every accepted acquisition; no history is kept.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureReading {
    /// Temperature in Celsius
    pub celsius: f32,
    /// Acquisition time in milliseconds since boot
    pub timestamp_ms: u64,
}

impl TemperatureReading {
    /// Startup value, before the first acquisition
    pub const INITIAL: TemperatureReading = TemperatureReading {
        celsius: 0.0,
        timestamp_ms: 0,
    };

    pub const fn new(celsius: f32, timestamp_ms: u64) -> Self {
        Self {
            celsius,
            timestamp_ms,
        }
    }

    pub fn status(&self) -> ReadingStatus {
        ReadingStatus::classify(self.celsius)
    }
}

/// Classification of a raw value returned by the sensor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadingStatus {
    /// Inside the sensor's measurable range
    Valid,
    /// The disconnect sentinel (or anything at or below it)
    Disconnected,
    /// Outside the measurable range but not the sentinel
    OutOfRange,
    /// Not a number
    Invalid,
    /// The sensor returned an error instead of a value
    Unreadable,
}

impl ReadingStatus {
    pub fn classify(celsius: f32) -> Self {
        if celsius.is_nan() {
            ReadingStatus::Invalid
        } else if celsius <= DEVICE_DISCONNECTED_C {
            ReadingStatus::Disconnected
        } else if !(MIN_VALID_C..=MAX_VALID_C).contains(&celsius) {
            ReadingStatus::OutOfRange
        } else {
            ReadingStatus::Valid
        }
    }

    #[inline]
    pub const fn is_fault(self) -> bool {
        !matches!(self, ReadingStatus::Valid)
    }
}

/// Sensor conversion resolution
///
/// Higher resolution gives finer steps at the cost of a longer conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 0.5 C steps
    Bits9,
    /// 0.25 C steps
    Bits10,
    /// 0.125 C steps
    #[default]
    Bits11,
    /// 0.0625 C steps
    Bits12,
}

impl Resolution {
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            9 => Some(Resolution::Bits9),
            10 => Some(Resolution::Bits10),
            11 => Some(Resolution::Bits11),
            12 => Some(Resolution::Bits12),
            _ => None,
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            Resolution::Bits9 => 9,
            Resolution::Bits10 => 10,
            Resolution::Bits11 => 11,
            Resolution::Bits12 => 12,
        }
    }

    /// Worst-case conversion time in microseconds
    pub const fn conversion_time_us(self) -> u32 {
        // 750 ms at 12 bits, halved per bit dropped
        750_000 >> (12 - self.bits())
    }

    /// Smallest temperature step in Celsius
    pub fn step_celsius(self) -> f32 {
        1.0 / (1u32 << (self.bits() - 8)) as f32
    }
}
