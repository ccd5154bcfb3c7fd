use super::actuator::{drive, ChannelBrightness, LedChannel, PwmOutput};
use super::mapping::map_value;
use super::readout::Readout;
use super::{
    ADC_MAX, ADC_MIN, MARKER_LEFT_MAX, MARKER_LEFT_MIN, MARKER_TOP_MAX, MARKER_TOP_MIN, PWM_WRAP,
    X_DEADZONE, Y_DEADZONE,
};

/// Raw readings of both joystick axes, `0..=4095` each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickSample {
    pub x: u16,
    pub y: u16,
}

impl JoystickSample {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Top-left corner of the on-screen marker, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MarkerPosition {
    pub top: i32,
    pub left: i32,
}

impl MarkerPosition {
    /// Marker for `sample`. X runs left to right; Y is inverted so pushing
    /// the stick up moves the marker up.
    pub const fn from_sample(sample: JoystickSample) -> Self {
        Self {
            left: map_value(sample.x as i32, ADC_MIN, ADC_MAX, MARKER_LEFT_MIN, MARKER_LEFT_MAX),
            top: map_value(sample.y as i32, ADC_MIN, ADC_MAX, MARKER_TOP_MAX, MARKER_TOP_MIN),
        }
    }
}

/// Everything one loop iteration derives from a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlFrame {
    pub sample: JoystickSample,
    pub brightness: ChannelBrightness,
    pub marker: MarkerPosition,
}

impl ControlFrame {
    /// Map `sample` onto PWM duty and marker coordinates.
    pub fn from_sample(sample: JoystickSample) -> Self {
        Self {
            sample,
            brightness: ChannelBrightness {
                red: to_duty(sample.x),
                blue: to_duty(sample.y),
            },
            marker: MarkerPosition::from_sample(sample),
        }
    }

    /// Drive both LED channels, blue (Y) first, under the actuation flag.
    pub fn actuate<P: PwmOutput>(&self, pwm: &mut P, enabled: bool) {
        drive(
            pwm,
            LedChannel::Blue,
            self.sample.y,
            self.brightness.blue,
            Y_DEADZONE,
            enabled,
        );
        drive(
            pwm,
            LedChannel::Red,
            self.sample.x,
            self.brightness.red,
            X_DEADZONE,
            enabled,
        );
    }

    /// Diagnostic readout of this frame.
    pub fn readout(&self) -> Readout {
        Readout {
            pwm_x: self.brightness.red,
            pwm_y: self.brightness.blue,
            adc_x: self.sample.x,
            adc_y: self.sample.y,
            marker: self.marker,
        }
    }
}

fn to_duty(raw: u16) -> u16 {
    // ADC readings never exceed 12 bits, so the result is within [0, PWM_WRAP].
    map_value(raw as i32, ADC_MIN, ADC_MAX, 0, PWM_WRAP as i32).clamp(0, PWM_WRAP as i32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::actuator::tests::RecordingPwm;

    #[test]
    fn marker_stays_inside_drawable_area() {
        for raw in 0..=4095u16 {
            let m = MarkerPosition::from_sample(JoystickSample::new(raw, raw));
            assert!((3..=117).contains(&m.left), "x={} left={}", raw, m.left);
            assert!((3..=56).contains(&m.top), "y={} top={}", raw, m.top);
        }
    }

    #[test]
    fn y_axis_is_inverted() {
        assert_eq!(MarkerPosition::from_sample(JoystickSample::new(0, 0)).top, 56);
        assert_eq!(MarkerPosition::from_sample(JoystickSample::new(0, 4095)).top, 3);
    }

    #[test]
    fn full_scale_maps_to_wrap() {
        let frame = ControlFrame::from_sample(JoystickSample::new(4095, 0));
        assert_eq!(frame.brightness, ChannelBrightness { red: PWM_WRAP, blue: 0 });
    }

    #[test]
    fn corner_with_actuation_enabled() {
        let frame = ControlFrame::from_sample(JoystickSample::new(0, 4095));
        assert_eq!(frame.marker, MarkerPosition { top: 3, left: 3 });

        let mut pwm = RecordingPwm::default();
        frame.actuate(&mut pwm, true);
        assert_eq!(
            pwm.calls(),
            &[
                Some((LedChannel::Blue, PWM_WRAP)),
                Some((LedChannel::Red, 0)),
            ]
        );
    }

    #[test]
    fn actuation_disabled_leaves_channels_alone() {
        let frame = ControlFrame::from_sample(JoystickSample::new(4095, 4095));
        let mut pwm = RecordingPwm::default();
        frame.actuate(&mut pwm, false);
        assert!(pwm.calls().is_empty());
    }

    #[test]
    fn resting_stick_turns_both_channels_off() {
        let frame = ControlFrame::from_sample(JoystickSample::new(2000, 2080));
        let mut pwm = RecordingPwm::default();
        frame.actuate(&mut pwm, true);
        assert_eq!(
            pwm.calls(),
            &[Some((LedChannel::Blue, 0)), Some((LedChannel::Red, 0))]
        );
    }

    #[test]
    fn readout_carries_raw_mapped_and_marker() {
        let frame = ControlFrame::from_sample(JoystickSample::new(3000, 1000));
        let r = frame.readout();
        assert_eq!(r.adc_x, 3000);
        assert_eq!(r.adc_y, 1000);
        assert_eq!(r.pwm_x, frame.brightness.red);
        assert_eq!(r.pwm_y, frame.brightness.blue);
        assert_eq!(r.marker, frame.marker);
    }
}
