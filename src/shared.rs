//! Split operation: sampling in its own task, display in another
//!
//! The cooperative loop stalls the display for the whole sensor conversion.
//! When an async executor is available the sampler can instead run as a
//! separate task that awaits the conversion time and then publishes a
//! complete [`DigitBuffer`] snapshot. The display loop takes one snapshot
//! per render, so it never sees a half-written buffer and never waits on
//! the sensor.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal_async::delay::DelayNs;

use crate::domain::DigitBuffer;
use crate::ports::sensor::{SensorError, TemperatureSensor};
use crate::sampler::{Refresh, Sampler};

/// Digit buffer shared between the sampler task and the display loop
pub struct SharedDisplay {
    digits: Mutex<CriticalSectionRawMutex, Cell<DigitBuffer>>,
    updates: Mutex<CriticalSectionRawMutex, Cell<u32>>,
}

impl SharedDisplay {
    pub const fn new() -> Self {
        Self {
            digits: Mutex::new(Cell::new(DigitBuffer::ZERO)),
            updates: Mutex::new(Cell::new(0)),
        }
    }

    /// Replace the whole buffer
    pub fn publish(&self, digits: DigitBuffer) {
        self.digits.lock(|cell| cell.set(digits));
        self.updates.lock(|cell| cell.set(cell.get().wrapping_add(1)));
    }

    /// Copy of the current buffer
    pub fn snapshot(&self) -> DigitBuffer {
        self.digits.lock(|cell| cell.get())
    }

    /// Number of buffers published so far
    pub fn updates(&self) -> u32 {
        self.updates.lock(|cell| cell.get())
    }
}

impl Default for SharedDisplay {
    fn default() -> Self {
        Self::new()
    }
}

/// Sampler driven by an async delay instead of blocking on the sensor
pub struct AsyncSampler<'a, S, D> {
    sampler: Sampler,
    sensor: S,
    delay: D,
    shared: &'a SharedDisplay,
}

impl<'a, S, D> AsyncSampler<'a, S, D>
where
    S: TemperatureSensor,
    D: DelayNs,
{
    pub fn new(sampler: Sampler, sensor: S, delay: D, shared: &'a SharedDisplay) -> Self {
        Self {
            sampler,
            sensor,
            delay,
            shared,
        }
    }

    pub fn start(&mut self) -> Result<(), SensorError> {
        self.sampler.start(&mut self.sensor)
    }

    /// Request a conversion, await its completion, then read and publish
    ///
    /// Only accepted readings are published; a held fault leaves the shared
    /// buffer untouched.
    pub async fn acquire(&mut self, now_ms: u64) -> Refresh {
        let config = *self.sampler.config();
        let raw = match self.sensor.request_conversion() {
            Ok(()) => {
                self.delay
                    .delay_us(config.resolution.conversion_time_us())
                    .await;
                self.sensor.read_celsius(config.sensor_index)
            }
            Err(e) => Err(e),
        };
        self.sampler.record_raw(self.sensor.last_raw_value());

        let refresh = self.sampler.accept(raw, now_ms);
        if let Refresh::Updated(digits) = refresh {
            self.shared.publish(digits);
        }
        refresh
    }

    /// One acquisition followed by a wait for the rest of the interval
    pub async fn cycle<C: Fn() -> u64>(&mut self, clock: &C) -> Refresh {
        let started = clock();
        let refresh = self.acquire(started).await;

        let elapsed = clock().wrapping_sub(started);
        let remaining = self.sampler.config().interval_ms.saturating_sub(elapsed);
        if remaining > 0 {
            let remaining = u32::try_from(remaining).unwrap_or(u32::MAX);
            self.delay.delay_ms(remaining).await;
        }
        refresh
    }

    /// Sample forever, one acquisition per interval
    ///
    /// `clock` returns monotonic milliseconds.
    pub async fn run<C: Fn() -> u64>(mut self, clock: C) -> ! {
        loop {
            self.cycle(&clock).await;
        }
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEVICE_DISCONNECTED_C;
    use crate::testing::{Event, EventLog, MockDelay, MockSensor};
    use embassy_futures::block_on;

    fn async_sampler<'a>(
        values: &[Result<f32, SensorError>],
        shared: &'a SharedDisplay,
        log: &EventLog,
    ) -> AsyncSampler<'a, MockSensor, MockDelay> {
        let mut sampler = AsyncSampler::new(
            Sampler::default(),
            MockSensor::new(values),
            log.delay(),
            shared,
        );
        sampler.start().unwrap();
        sampler
    }

    #[test]
    fn test_shared_starts_zeroed() {
        let shared = SharedDisplay::new();
        assert_eq!(shared.snapshot(), DigitBuffer::ZERO);
        assert_eq!(shared.updates(), 0);
    }

    #[test]
    fn test_acquire_awaits_conversion_then_publishes() {
        let shared = SharedDisplay::new();
        let log = EventLog::new();
        let mut sampler = async_sampler(&[Ok(25.3)], &shared, &log);

        let refresh = block_on(sampler.acquire(700));

        assert!(matches!(refresh, Refresh::Updated(_)));
        assert_eq!(shared.snapshot().render().as_str(), "25.3");
        assert_eq!(shared.updates(), 1);
        // 11-bit conversion: 375 ms
        assert_eq!(log.take(), [Event::Delay { ns: 375_000_000 }]);
    }

    #[test]
    fn test_fault_is_not_published() {
        let shared = SharedDisplay::new();
        let log = EventLog::new();
        let mut sampler = async_sampler(&[Ok(19.5), Ok(DEVICE_DISCONNECTED_C)], &shared, &log);

        block_on(sampler.acquire(700));
        block_on(sampler.acquire(1400));

        assert_eq!(shared.snapshot().render().as_str(), "19.5");
        assert_eq!(shared.updates(), 1);
        assert_eq!(sampler.sampler().stats().faults, 1);
    }

    #[test]
    fn test_cycle_waits_out_the_interval() {
        let shared = SharedDisplay::new();
        let log = EventLog::new();
        let mut sampler = async_sampler(&[Ok(30.0)], &shared, &log);

        // Clock advances 400 ms across the acquisition
        let clock = Cell::new(1000u64);
        let now = || {
            let t = clock.get();
            clock.set(t + 400);
            t
        };
        block_on(sampler.cycle(&now));

        assert_eq!(
            log.take(),
            [
                Event::Delay { ns: 375_000_000 },
                Event::Delay { ns: 300_000_000 },
            ]
        );
        assert_eq!(sampler.sampler().last_acquisition_ms(), 1000);
    }

    #[test]
    fn test_cycle_skips_wait_when_late() {
        let shared = SharedDisplay::new();
        let log = EventLog::new();
        let mut sampler = async_sampler(&[Ok(30.0)], &shared, &log);

        let clock = Cell::new(0u64);
        let now = || {
            let t = clock.get();
            clock.set(t + 900);
            t
        };
        block_on(sampler.cycle(&now));

        assert_eq!(log.take(), [Event::Delay { ns: 375_000_000 }]);
    }
}
