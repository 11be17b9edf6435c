/// Volts per ADC count for a 3.3 V reference scaled to 16 bits.
const VOLTS_PER_COUNT: f32 = 3.3 / 65535.0;

/// Sensor voltage at 27 °C.
const VOLTS_AT_27C: f32 = 0.706;

/// Sensor slope in volts per °C.
const VOLTS_PER_DEGREE: f32 = 0.001721;

/// Convert a raw on-board temperature ADC sample to degrees Celsius.
pub fn raw_to_celsius(raw: u16) -> f32 {
    let volts = raw as f32 * VOLTS_PER_COUNT;
    27.0 - (volts - VOLTS_AT_27C) / VOLTS_PER_DEGREE
}

/// A temperature reading rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSample {
    celsius: f32,
}

impl TemperatureSample {
    pub fn from_raw(raw: u16) -> Self {
        Self::from_celsius(raw_to_celsius(raw))
    }

    pub fn from_celsius(celsius: f32) -> Self {
        Self {
            celsius: libm::roundf(celsius * 10.0) / 10.0,
        }
    }

    pub fn celsius(&self) -> f32 {
        self.celsius
    }
}
