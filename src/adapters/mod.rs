//! Adapters - concrete implementations of ports
//!
//! - **rp2350_temp**: RP2350 onboard temperature sensor via ADC
//!
//! Display pins need no adapter: `embassy_rp::gpio::Output` already
//! implements `embedded_hal::digital::OutputPin`, and `embassy_time::Delay`
//! provides the dwell.

pub mod rp2350_temp;

pub use rp2350_temp::Rp2350TempSensor;
