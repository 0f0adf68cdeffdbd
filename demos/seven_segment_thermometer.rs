//! Seven-Segment Thermometer (cooperative loop)
//!
//! Samples the RP2350 onboard temperature sensor every 700 ms and shows the
//! value on a 3-digit common-anode display, one digit per loop iteration.
//!
//! # Wiring
//!
//! ```text
//! GPIO2..GPIO8   segments A..G   (LOW = lit)
//! GPIO9          decimal point   (LOW = lit)
//! GPIO10..GPIO12 digit 1..3 anode select (HIGH = on)
//! ```
//!
//! There is no scheduler: `main` polls the monotonic clock and calls
//! `Controller::tick` forever. The display pauses for the duration of each
//! acquisition.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output};
use embassy_time::{Delay, Instant};
use {defmt_rtt as _, panic_probe as _};

use segtemp::{
    Controller, MultiplexConfig, Multiplexer, Refresh, Rp2350TempSensor, Sampler, SamplerConfig,
};

#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

#[entry]
fn main() -> ! {
    info!("=== Seven-Segment Thermometer ===");

    let p = embassy_rp::init(Default::default());

    // ========================================================================
    // Display
    // ========================================================================

    let segments = [
        Output::new(p.PIN_2, Level::High),
        Output::new(p.PIN_3, Level::High),
        Output::new(p.PIN_4, Level::High),
        Output::new(p.PIN_5, Level::High),
        Output::new(p.PIN_6, Level::High),
        Output::new(p.PIN_7, Level::High),
        Output::new(p.PIN_8, Level::High),
        Output::new(p.PIN_9, Level::High),
    ];
    let digit_selects = [
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_12, Level::Low),
    ];
    let display = unwrap!(Multiplexer::new(
        segments,
        digit_selects,
        Delay,
        MultiplexConfig::default(),
    ));

    // ========================================================================
    // Sensor
    // ========================================================================

    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let sensor = Rp2350TempSensor::new(adc, AdcChannel::new_temp_sensor(p.ADC_TEMP_SENSOR));

    let mut controller = unwrap!(Controller::new(
        sensor,
        Sampler::new(SamplerConfig::default()),
        display,
    ));

    info!("Entering display loop");

    loop {
        match controller.tick(Instant::now().as_millis()) {
            Ok(Refresh::Idle) => {}
            Ok(Refresh::Updated(digits)) => debug!("Showing {}", digits.render()),
            Ok(Refresh::Held(status)) => warn!("Display held: {:?}", status),
            Err(e) => error!("Loop error: {:?}", e),
        }
    }
}
