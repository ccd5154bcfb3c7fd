//! LED actuation policy.
//!
//! The red LED follows the X axis and the blue LED follows the Y axis. Each
//! channel is gated twice: by the actuation toggle and by a per-axis
//! deadzone. The deadzones are deliberately not centred and not equal.

/// Inclusive range of raw axis readings treated as "at rest".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadzone {
    pub min: u16,
    pub max: u16,
}

impl Deadzone {
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    /// `true` if `value` lies in `[min, max]`.
    pub const fn contains(&self, value: u16) -> bool {
        value >= self.min && value <= self.max
    }
}

/// PWM-driven LED channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedChannel {
    /// Driven by the X axis.
    Red,
    /// Driven by the Y axis.
    Blue,
}

/// Mapped duty for both channels, in `[0, PWM_WRAP]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelBrightness {
    pub red: u16,
    pub blue: u16,
}

/// Sink for duty-cycle updates.
///
/// Implemented by the firmware over the RP2350 PWM slice and by recording
/// mocks in tests.
pub trait PwmOutput {
    /// Set the compare value of `channel`. `duty` is in `[0, PWM_WRAP]`.
    fn set_duty(&mut self, channel: LedChannel, duty: u16);
}

/// Decide the duty for one channel.
///
/// - `enabled == false` → `None`: the channel keeps whatever level it had.
/// - `axis_value` inside `deadzone` → `Some(0)`.
/// - otherwise → `Some(mapped_pwm)`.
pub const fn duty_for(
    axis_value: u16,
    mapped_pwm: u16,
    deadzone: Deadzone,
    enabled: bool,
) -> Option<u16> {
    if !enabled {
        None
    } else if deadzone.contains(axis_value) {
        Some(0)
    } else {
        Some(mapped_pwm)
    }
}

/// Apply [`duty_for`] to `channel`. Issues no call at all when the result
/// is `None`.
pub fn drive<P: PwmOutput>(
    pwm: &mut P,
    channel: LedChannel,
    axis_value: u16,
    mapped_pwm: u16,
    deadzone: Deadzone,
    enabled: bool,
) {
    if let Some(duty) = duty_for(axis_value, mapped_pwm, deadzone, enabled) {
        pwm.set_duty(channel, duty);
    }
}
