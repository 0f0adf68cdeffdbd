//! RP2350 onboard temperature sensor adapter
//!
//! Implements [`TemperatureSensor`] on top of the RP2350's internal
//! temperature diode, read through the ADC. There is no separate conversion
//! step on this sensor: `request_conversion` samples the ADC (averaging more
//! samples at higher resolutions) and `read_celsius` returns the result.

use embassy_rp::adc::{Adc, Blocking, Channel as AdcChannel};

use crate::domain::{AdcCalibration, Resolution};
use crate::ports::sensor::{SensorError, TemperatureSensor};

/// The onboard sensor is the only device on this "bus"
const ONBOARD_INDEX: u8 = 0;

/// RP2350 onboard temperature sensor adapter
pub struct Rp2350TempSensor<'a> {
    /// ADC peripheral (blocking mode, no DMA)
    adc: Adc<'a, Blocking>,
    /// Temperature sensor channel
    channel: AdcChannel<'a>,
    calibration: AdcCalibration,
    /// Samples averaged per conversion
    oversampling: u8,
    ready: bool,
    last_raw: Option<u16>,
    last_celsius: Option<f32>,
}

impl<'a> Rp2350TempSensor<'a> {
    pub fn new(adc: Adc<'a, Blocking>, channel: AdcChannel<'a>) -> Self {
        Self::with_calibration(adc, channel, AdcCalibration::RP2350_DEFAULT)
    }

    pub fn with_calibration(
        adc: Adc<'a, Blocking>,
        channel: AdcChannel<'a>,
        calibration: AdcCalibration,
    ) -> Self {
        Self {
            adc,
            channel,
            calibration,
            oversampling: oversampling_for(Resolution::default()),
            ready: false,
            last_raw: None,
            last_celsius: None,
        }
    }

    pub fn set_calibration(&mut self, calibration: AdcCalibration) {
        self.calibration = calibration;
    }

    pub fn calibration(&self) -> AdcCalibration {
        self.calibration
    }
}

/// ADC samples averaged for a given resolution: 1, 2, 4 or 8
const fn oversampling_for(resolution: Resolution) -> u8 {
    1 << (resolution.bits() - 9)
}

impl<'a> TemperatureSensor for Rp2350TempSensor<'a> {
    fn begin(&mut self) -> Result<(), SensorError> {
        // One throwaway read confirms the channel answers
        self.adc
            .blocking_read(&mut self.channel)
            .map_err(|_| SensorError::NotInitialized)?;
        self.ready = true;
        Ok(())
    }

    fn set_resolution(&mut self, resolution: Resolution) -> Result<(), SensorError> {
        self.oversampling = oversampling_for(resolution);
        info!(
            "Onboard sensor: {} bit resolution, averaging {} samples",
            resolution.bits(),
            self.oversampling
        );
        Ok(())
    }

    fn request_conversion(&mut self) -> Result<(), SensorError> {
        if !self.ready {
            return Err(SensorError::NotInitialized);
        }
        self.last_celsius = None;

        let mut sum: u32 = 0;
        let mut raw = 0;
        for _ in 0..self.oversampling {
            raw = self
                .adc
                .blocking_read(&mut self.channel)
                .map_err(|_| SensorError::ReadFailed)?;
            sum += raw as u32;
        }
        self.last_raw = Some(raw);

        let mean = sum as f32 / self.oversampling as f32;
        self.last_celsius = Some(self.calibration.celsius_from_mean(mean));
        Ok(())
    }

    fn read_celsius(&mut self, sensor_index: u8) -> Result<f32, SensorError> {
        if sensor_index != ONBOARD_INDEX {
            return Err(SensorError::NoSuchSensor);
        }
        self.last_celsius.ok_or(SensorError::ReadFailed)
    }

    fn last_raw_value(&self) -> Option<u16> {
        self.last_raw
    }
}
