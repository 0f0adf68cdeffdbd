//! Seven-Segment Thermometer (split tasks)
//!
//! Same wiring as `seven_segment_thermometer`, but acquisition runs in its
//! own embassy task and awaits the conversion time instead of blocking.
//! The display loop renders from a snapshot of the shared digit buffer and
//! yields after every digit, so the sampler never stalls multiplexing.

#![no_std]
#![no_main]

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output};
use embassy_time::{Delay, Instant};
use {defmt_rtt as _, panic_probe as _};

use segtemp::{
    AsyncSampler, MultiplexConfig, Multiplexer, Rp2350TempSensor, Sampler, SamplerConfig,
    SharedDisplay,
};

#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Digits published by the sampler task, read by the display loop
static SHARED: SharedDisplay = SharedDisplay::new();

type OnboardSampler = AsyncSampler<'static, Rp2350TempSensor<'static>, Delay>;

#[embassy_executor::main]
async fn main(spawner: embassy_executor::Spawner) {
    info!("=== Seven-Segment Thermometer (split tasks) ===");

    let p = embassy_rp::init(Default::default());

    // Sensor task
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let sensor = Rp2350TempSensor::new(adc, AdcChannel::new_temp_sensor(p.ADC_TEMP_SENSOR));
    let mut sampler = AsyncSampler::new(
        Sampler::new(SamplerConfig::default()),
        sensor,
        Delay,
        &SHARED,
    );
    if let Err(e) = sampler.start() {
        error!("Sensor start failed: {:?}", e);
    }
    unwrap!(spawner.spawn(sampler_task(sampler)));

    // Display loop
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
    let mut display = unwrap!(Multiplexer::new(
        segments,
        digit_selects,
        Delay,
        MultiplexConfig::default(),
    ));

    info!("Entering display loop");

    loop {
        let digits = SHARED.snapshot();
        if let Err(e) = display.render_next(&digits) {
            error!("Render failed: {:?}", e);
        }
        yield_now().await;
    }
}

#[embassy_executor::task]
async fn sampler_task(sampler: OnboardSampler) {
    info!("Sampler task started");
    sampler.run(|| Instant::now().as_millis()).await
}
