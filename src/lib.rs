//! Multiplexed 7-segment thermometer
//!
//! Firmware core for a 3-digit common-anode display that shows the last
//! sampled temperature with one decimal (`25.3`), organised in hexagonal
//! layers so everything but the adapters can be tested on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                │
//! │  - TemperatureReading, ReadingStatus, Resolution                │
//! │  - DigitBuffer (value -> 3 decimal digits)                      │
//! │  - SegmentPattern table (active-low glyphs)                     │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                              │
//! │  - TemperatureSensor: begin / resolution / convert / read       │
//! │  - embedded-hal OutputPin and DelayNs                           │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Services                                    │
//! │  - Sampler: interval check + acquisition                        │
//! │  - Multiplexer: one digit per call, 200 us dwell                │
//! │  - Controller: tick(now) = sample, then render                  │
//! │  - AsyncSampler + SharedDisplay: split-task variant             │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters (feature `rp`)                     │
//! │  - Rp2350TempSensor: ADC temperature sensor                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module
pub(crate) mod fmt;

/// Domain layer - pure display and temperature logic
pub mod domain;

/// Ports - traits defining hardware boundaries
pub mod ports;

pub mod controller;
pub mod multiplexer;
pub mod sampler;
pub mod shared;

/// Adapters - concrete implementations
#[cfg(feature = "rp")]
pub mod adapters;

#[cfg(test)]
mod testing;

pub use controller::{Controller, ControllerError};
pub use domain::{DigitBuffer, ReadingStatus, Resolution, SegmentPattern, TemperatureReading};
pub use multiplexer::{DisplayError, MultiplexConfig, Multiplexer, DWELL_US};
pub use ports::{FaultPolicy, SamplerConfig, SensorError, TemperatureSensor};
pub use sampler::{Refresh, Sampler, SamplerStats};
pub use shared::{AsyncSampler, SharedDisplay};

#[cfg(feature = "rp")]
pub use adapters::Rp2350TempSensor;
