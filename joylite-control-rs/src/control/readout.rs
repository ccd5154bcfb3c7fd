use core::fmt;

use super::cycle::MarkerPosition;

/// Per-cycle diagnostic values: mapped PWM, raw ADC and marker position.
///
/// Formats as three lines through [`core::fmt::Display`]. With the `defmt`
/// feature, `defmt::Format` logs the same text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readout {
    pub pwm_x: u16,
    pub pwm_y: u16,
    pub adc_x: u16,
    pub adc_y: u16,
    pub marker: MarkerPosition,
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "JOYSTICK - PWM X = {} / PWM Y = {}", self.pwm_x, self.pwm_y)?;
        writeln!(f, "JOYSTICK - ADC X = {} / ADC Y = {}", self.adc_x, self.adc_y)?;
        write!(
            f,
            "MARKER   - Top   = {} / Left  = {}",
            self.marker.top, self.marker.left
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Readout {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", defmt::Display2Format(self))
    }
}
