//! Controller - the single owner of all display and sampling state
//!
//! One [`Controller::tick`] is one iteration of the firmware loop: the
//! sampler may refresh the digit buffer, then the multiplexer lights the
//! next digit. Everything runs on one thread of control, so the buffer is
//! never read while it is being written.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::domain::DigitBuffer;
use crate::multiplexer::{DisplayError, Multiplexer};
use crate::ports::sensor::{SensorError, TemperatureSensor};
use crate::sampler::{Refresh, Sampler};

/// Error type for the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError {
    Sensor(SensorError),
    Display(DisplayError),
}

impl From<SensorError> for ControllerError {
    fn from(e: SensorError) -> Self {
        ControllerError::Sensor(e)
    }
}

impl From<DisplayError> for ControllerError {
    fn from(e: DisplayError) -> Self {
        ControllerError::Display(e)
    }
}

pub struct Controller<S, P, D> {
    sensor: S,
    sampler: Sampler,
    display: Multiplexer<P, D>,
}

impl<S, P, D> Controller<S, P, D>
where
    S: TemperatureSensor,
    P: OutputPin,
    D: DelayNs,
{
    /// Start the sensor and take ownership of everything the loop needs
    ///
    /// The display pins are expected to be in their resting state already,
    /// which [`Multiplexer::new`] guarantees.
    pub fn new(
        mut sensor: S,
        mut sampler: Sampler,
        display: Multiplexer<P, D>,
    ) -> Result<Self, ControllerError> {
        sampler.start(&mut sensor)?;
        Ok(Self {
            sensor,
            sampler,
            display,
        })
    }

    /// Run one loop iteration at `now_ms` (monotonic milliseconds)
    ///
    /// Only the acquisition, at most once per sampling interval, takes more
    /// than a dwell time.
    pub fn tick(&mut self, now_ms: u64) -> Result<Refresh, ControllerError> {
        let refresh = self.sampler.maybe_refresh(&mut self.sensor, now_ms);
        self.display.render_next(self.sampler.digits())?;
        Ok(refresh)
    }

    pub fn digits(&self) -> &DigitBuffer {
        self.sampler.digits()
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    pub fn display(&self) -> &Multiplexer<P, D> {
        &self.display
    }

    /// Darken the display and hand back the parts
    pub fn shutdown(mut self) -> Result<(S, Sampler, Multiplexer<P, D>), ControllerError> {
        self.display.blank()?;
        Ok((self.sensor, self.sampler, self.display))
    }
}
