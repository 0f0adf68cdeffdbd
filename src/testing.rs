//! Host-side test doubles for the sensor, pins and delays

use core::cell::RefCell;
use core::convert::Infallible;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use crate::domain::Resolution;
use crate::ports::sensor::{SensorError, TemperatureSensor};

/// Sensor that plays back scripted results
pub struct MockSensor {
    values: VecDeque<Result<f32, SensorError>>,
    pub begun: bool,
    pub fail_begin: bool,
    pub resolution: Option<Resolution>,
    pub conversions: u32,
    pub last_index: Option<u8>,
    pub raw: Option<u16>,
}

impl MockSensor {
    pub fn new(values: &[Result<f32, SensorError>]) -> Self {
        Self {
            values: values.iter().copied().collect(),
            begun: false,
            fail_begin: false,
            resolution: None,
            conversions: 0,
            last_index: None,
            raw: None,
        }
    }
}

impl TemperatureSensor for MockSensor {
    fn begin(&mut self) -> Result<(), SensorError> {
        if self.fail_begin {
            return Err(SensorError::NotInitialized);
        }
        self.begun = true;
        Ok(())
    }

    fn set_resolution(&mut self, resolution: Resolution) -> Result<(), SensorError> {
        self.resolution = Some(resolution);
        Ok(())
    }

    fn request_conversion(&mut self) -> Result<(), SensorError> {
        self.conversions += 1;
        Ok(())
    }

    fn read_celsius(&mut self, sensor_index: u8) -> Result<f32, SensorError> {
        self.last_index = Some(sensor_index);
        self.values.pop_front().unwrap_or(Err(SensorError::ReadFailed))
    }

    fn last_raw_value(&self) -> Option<u16> {
        self.raw
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinId {
    Segment(usize),
    Digit(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Set { pin: PinId, high: bool },
    Delay { ns: u32 },
}

/// Ordered record of every pin write and delay
#[derive(Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<Event>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn take(&self) -> Vec<Event> {
        core::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn pin(&self, id: PinId) -> MockPin {
        MockPin {
            id,
            log: self.clone(),
        }
    }

    pub fn segment_pins(&self) -> [MockPin; 8] {
        core::array::from_fn(|i| self.pin(PinId::Segment(i)))
    }

    pub fn digit_pins(&self) -> [MockPin; 3] {
        core::array::from_fn(|i| self.pin(PinId::Digit(i)))
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay { log: self.clone() }
    }
}

/// Tracks pin levels while replaying a log
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinState {
    pub segments: [bool; 8],
    pub digits: [bool; 3],
}

impl PinState {
    pub fn apply(&mut self, event: &Event) {
        if let Event::Set { pin, high } = *event {
            match pin {
                PinId::Segment(i) => self.segments[i] = high,
                PinId::Digit(i) => self.digits[i] = high,
            }
        }
    }

    pub fn active_digits(&self) -> usize {
        self.digits.iter().filter(|d| **d).count()
    }
}

pub struct MockPin {
    id: PinId,
    log: EventLog,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::Set {
            pin: self.id,
            high: false,
        });
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::Set {
            pin: self.id,
            high: true,
        });
        Ok(())
    }
}

/// Pin whose writes always fail
pub struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = ErrorKind;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

/// Delay that returns immediately and logs the requested duration
pub struct MockDelay {
    log: EventLog,
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Event::Delay { ns });
    }
}

impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.push(Event::Delay { ns });
    }
}
