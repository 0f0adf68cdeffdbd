//! Ports (interfaces) defining the boundaries of the firmware
//!
//! - **TemperatureSensor**: the sensor collaborator (on-chip ADC, 1-Wire, mock)
//! - Display pins use `embedded_hal::digital::OutputPin` directly, and the
//!   dwell and conversion waits use the embedded-hal `DelayNs` traits.

pub mod sensor;

pub use sensor::{
    FaultPolicy, SamplerConfig, SensorError, TemperatureSensor, DEFAULT_RESOLUTION,
    DEFAULT_SENSOR_INDEX, SAMPLING_INTERVAL_MS,
};
