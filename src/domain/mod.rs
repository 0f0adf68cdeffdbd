//! Domain layer - display and temperature logic independent of hardware
//!
//! Nothing in here touches a pin, a bus or a clock: values go in, digits
//! and segment codes come out.

pub mod calibration;
pub mod digits;
pub mod reading;
pub mod segments;

pub use calibration::AdcCalibration;
pub use digits::{DigitBuffer, DECIMAL_POSITION, DIGIT_COUNT};
pub use reading::{ReadingStatus, Resolution, TemperatureReading, DEVICE_DISCONNECTED_C};
pub use segments::{Segment, SegmentPattern, SEGMENT_TABLE};
