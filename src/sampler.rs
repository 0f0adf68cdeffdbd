//! Sampler - periodic, non-blocking temperature acquisition
//!
//! On every loop iteration the sampler checks whether the sampling interval
//! has elapsed. Only then does it talk to the sensor, which is the one slow
//! call in the whole loop. The result is decomposed into a [`DigitBuffer`]
//! that the multiplexer reads.

use crate::domain::{DigitBuffer, ReadingStatus, TemperatureReading};
use crate::ports::sensor::{FaultPolicy, SamplerConfig, SensorError, TemperatureSensor};

/// Outcome of one sampling check
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Refresh {
    /// Interval not elapsed, nothing touched
    Idle,
    /// New digits were written
    Updated(DigitBuffer),
    /// Acquisition ran but the display keeps its previous digits
    Held(ReadingStatus),
}

/// Counters for diagnostics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerStats {
    /// Acquisitions attempted
    pub acquisitions: u32,
    /// Acquisitions that returned a fault or an error
    pub faults: u32,
    /// Of those, how many were sensor errors rather than bad values
    pub sensor_errors: u32,
    /// Raw value reported by the sensor on the last acquisition
    pub last_raw: Option<u16>,
}

/// Owns the last reading, the acquisition timestamp and the digit buffer
#[derive(Debug)]
pub struct Sampler {
    config: SamplerConfig,
    reading: TemperatureReading,
    last_acquisition_ms: u64,
    digits: DigitBuffer,
    stats: SamplerStats,
}

impl Sampler {
    /// Startup state: reading 0.0, timestamp 0, digits all zero
    pub const fn new(config: SamplerConfig) -> Self {
        Self {
            config,
            reading: TemperatureReading::INITIAL,
            last_acquisition_ms: 0,
            digits: DigitBuffer::ZERO,
            stats: SamplerStats {
                acquisitions: 0,
                faults: 0,
                sensor_errors: 0,
                last_raw: None,
            },
        }
    }

    /// Bring up the sensor and apply the configured resolution
    pub fn start<S: TemperatureSensor>(&mut self, sensor: &mut S) -> Result<(), SensorError> {
        sensor.begin()?;
        sensor.set_resolution(self.config.resolution)?;
        info!(
            "Sensor ready: {} bit resolution, {} ms interval",
            self.config.resolution.bits(),
            self.config.interval_ms
        );
        Ok(())
    }

    /// Whether an acquisition is due at `now_ms` (inclusive threshold)
    #[inline]
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms.wrapping_sub(self.last_acquisition_ms) >= self.config.interval_ms
    }

    /// Acquire a new reading if the sampling interval has elapsed
    ///
    /// Calling this again without time advancing is a no-op.
    pub fn maybe_refresh<S: TemperatureSensor>(&mut self, sensor: &mut S, now_ms: u64) -> Refresh {
        if !self.is_due(now_ms) {
            return Refresh::Idle;
        }
        self.acquire(sensor, now_ms)
    }

    /// Run one synchronous acquisition regardless of the interval
    pub fn acquire<S: TemperatureSensor>(&mut self, sensor: &mut S, now_ms: u64) -> Refresh {
        let raw = sensor
            .request_conversion()
            .and_then(|()| sensor.read_celsius(self.config.sensor_index));
        self.record_raw(sensor.last_raw_value());
        self.accept(raw, now_ms)
    }

    /// Apply a sensor result obtained at `now_ms`
    ///
    /// The timestamp advances even on a fault, so a dead sensor is retried
    /// once per interval rather than on every loop iteration.
    pub fn accept(&mut self, raw: Result<f32, SensorError>, now_ms: u64) -> Refresh {
        self.last_acquisition_ms = now_ms;
        self.stats.acquisitions = self.stats.acquisitions.wrapping_add(1);

        let celsius = match raw {
            Ok(celsius) => celsius,
            Err(e) => {
                warn!("Sensor read failed: {:?}", e);
                self.stats.faults = self.stats.faults.wrapping_add(1);
                self.stats.sensor_errors = self.stats.sensor_errors.wrapping_add(1);
                return Refresh::Held(ReadingStatus::Unreadable);
            }
        };

        let status = ReadingStatus::classify(celsius);
        if status.is_fault() {
            self.stats.faults = self.stats.faults.wrapping_add(1);
            if self.config.fault_policy == FaultPolicy::HoldLastGood {
                warn!(
                    "Sensor fault {:?} ({} C), holding {}",
                    status,
                    celsius,
                    self.digits.render()
                );
                return Refresh::Held(status);
            }
        }

        self.reading = TemperatureReading::new(celsius, now_ms);
        self.digits = DigitBuffer::from_celsius(celsius);
        debug!("Acquired {} C -> {}", celsius, self.digits.render());
        Refresh::Updated(self.digits)
    }

    pub(crate) fn record_raw(&mut self, raw: Option<u16>) {
        self.stats.last_raw = raw;
    }

    #[inline]
    pub fn digits(&self) -> &DigitBuffer {
        &self.digits
    }

    pub fn reading(&self) -> TemperatureReading {
        self.reading
    }

    pub fn last_acquisition_ms(&self) -> u64 {
        self.last_acquisition_ms
    }

    pub fn stats(&self) -> SamplerStats {
        self.stats
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(SamplerConfig::default())
    }
}
