//! Sensor port - abstraction over the temperature sensor collaborator
//!
//! The firmware only needs four operations from the sensor: start the bus,
//! pick a resolution, trigger a conversion and read the result back in
//! Celsius. Bus framing, addressing and CRC checks belong to the adapter.

use crate::domain::Resolution;

/// Milliseconds between two acquisitions
pub const SAMPLING_INTERVAL_MS: u64 = 700;

/// Resolution selected at startup
pub const DEFAULT_RESOLUTION: Resolution = Resolution::Bits11;

/// Index of the sensor on the bus that drives the display
pub const DEFAULT_SENSOR_INDEX: u8 = 0;

/// Error type for sensor operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// `begin` was not called or failed
    NotInitialized,
    /// Failed to read from sensor
    ReadFailed,
    /// The sensor does not support the requested resolution
    InvalidResolution,
    /// No sensor at the requested index
    NoSuchSensor,
    /// Timeout waiting for sensor
    Timeout,
}

/// What to show when the sensor reports a fault
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultPolicy {
    /// Keep the last good digits on the display
    #[default]
    HoldLastGood,
    /// Decompose and show whatever value the sensor returned
    PassThrough,
}

/// Configuration for the sampler
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerConfig {
    /// Minimum time between acquisitions (milliseconds, inclusive)
    pub interval_ms: u64,
    /// Conversion resolution applied at startup
    pub resolution: Resolution,
    /// Which sensor on the bus to read
    pub sensor_index: u8,
    pub fault_policy: FaultPolicy,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_ms: SAMPLING_INTERVAL_MS,
            resolution: DEFAULT_RESOLUTION,
            sensor_index: DEFAULT_SENSOR_INDEX,
            fault_policy: FaultPolicy::HoldLastGood,
        }
    }
}

impl SamplerConfig {
    /// Coarse but quick: 9-bit conversions every 200 ms
    pub const fn fast() -> Self {
        Self {
            interval_ms: 200,
            resolution: Resolution::Bits9,
            sensor_index: DEFAULT_SENSOR_INDEX,
            fault_policy: FaultPolicy::HoldLastGood,
        }
    }

    /// Full resolution, one reading every 5 seconds
    pub const fn low_power() -> Self {
        Self {
            interval_ms: 5000,
            resolution: Resolution::Bits12,
            sensor_index: DEFAULT_SENSOR_INDEX,
            fault_policy: FaultPolicy::HoldLastGood,
        }
    }

    pub const fn with_fault_policy(mut self, fault_policy: FaultPolicy) -> Self {
        self.fault_policy = fault_policy;
        self
    }
}

/// Port for the temperature sensor collaborator
///
/// All calls are blocking. `request_conversion` may block for the whole
/// conversion time; the cooperative loop accepts that pause once per
/// sampling interval.
///
/// # Example Implementation
///
/// ```ignore
/// impl TemperatureSensor for Ds18b20Bus {
///     fn request_conversion(&mut self) -> Result<(), SensorError> {
///         self.driver.start_all(&mut self.delay).map_err(|_| SensorError::ReadFailed)
///     }
///
///     fn read_celsius(&mut self, index: u8) -> Result<f32, SensorError> {
///         let device = self.devices.get(index as usize).ok_or(SensorError::NoSuchSensor)?;
///         Ok(self.driver.read(device)?.celsius())
///     }
///     // ...
/// }
/// ```
pub trait TemperatureSensor {
    /// Bring up the sensor bus
    fn begin(&mut self) -> Result<(), SensorError>;

    fn set_resolution(&mut self, resolution: Resolution) -> Result<(), SensorError>;

    /// Start a temperature conversion on every sensor
    fn request_conversion(&mut self) -> Result<(), SensorError>;

    /// Read the last conversion result in Celsius
    ///
    /// A disconnected device may still yield `Ok` with a sentinel value;
    /// callers classify the value with [`crate::domain::ReadingStatus`].
    fn read_celsius(&mut self, sensor_index: u8) -> Result<f32, SensorError>;

    /// Last raw value (for diagnostics)
    ///
    /// Returns `None` if the sensor doesn't expose raw values.
    fn last_raw_value(&self) -> Option<u16> {
        None
    }
}

impl<T: TemperatureSensor + ?Sized> TemperatureSensor for &mut T {
    fn begin(&mut self) -> Result<(), SensorError> {
        T::begin(self)
    }

    fn set_resolution(&mut self, resolution: Resolution) -> Result<(), SensorError> {
        T::set_resolution(self, resolution)
    }

    fn request_conversion(&mut self) -> Result<(), SensorError> {
        T::request_conversion(self)
    }

    fn read_celsius(&mut self, sensor_index: u8) -> Result<f32, SensorError> {
        T::read_celsius(self, sensor_index)
    }

    fn last_raw_value(&self) -> Option<u16> {
        T::last_raw_value(self)
    }
}
