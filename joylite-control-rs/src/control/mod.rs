//! Joystick control core: input state, mapping and actuation policy.
//!
//! This module holds everything the firmware computes between reading the
//! ADC and touching the PWM slice or the display. It is split so that each
//! piece can be exercised on the host:
//!
//! ```text
//! button edge ──► DebounceGate ──► InputState ──► EdgeAction (LED / border)
//!                                      │
//!                                      ▼ snapshot()
//! ADC sample ──► map_value ──► ControlFrame ──► PwmOutput (red / blue)
//!                                      └──────► MarkerPosition ──► display
//! ```
//!
//! # Shared state
//!
//! [`InputState`] is the only value touched from more than one task. It is
//! written exclusively by the button edge handlers and read by the main
//! loop. Every read-modify-write happens inside a critical section, and
//! readers receive a copied [`Toggles`] snapshot, so a half-applied edge is
//! never observable.
//!
//! # Constants
//!
//! All thresholds and geometry below are fixed. They define the observable
//! behaviour of the device and are not tuned at runtime.

mod actuator;
mod cycle;
mod debounce;
mod input;
mod mapping;
mod readout;

pub use actuator::{drive, duty_for, ChannelBrightness, Deadzone, LedChannel, PwmOutput};
pub use cycle::{ControlFrame, JoystickSample, MarkerPosition};
pub use debounce::DebounceGate;
pub use input::{ButtonId, EdgeAction, InputState, Toggles};
pub use mapping::map_value;
pub use readout::Readout;

// ── Timing ───────────────────────────────────────────────────────────────

/// Minimum spacing between two accepted button edges, in microseconds.
///
/// Shared by both buttons: an accepted edge on one source suppresses an
/// edge on the other for the same window.
pub const DEBOUNCE_WINDOW_US: u64 = 200_000;

// ── Analog input ─────────────────────────────────────────────────────────

/// Lowest raw reading of the 12-bit ADC.
pub const ADC_MIN: i32 = 0;

/// Highest raw reading of the 12-bit ADC.
pub const ADC_MAX: i32 = 4095;

/// Raw reading assumed for an axis before its first successful conversion.
pub const ADC_CENTRE: u16 = 2048;

// ── PWM ──────────────────────────────────────────────────────────────────

/// Base clock the PWM wrap is derived from, in Hz.
pub const PWM_CLOCK_BASE_HZ: u32 = 125_000_000;

/// PWM slice clock divider.
pub const PWM_CLOCK_DIVIDER: u8 = 125;

/// Target PWM frequency in Hz.
pub const PWM_FREQUENCY_HZ: u32 = 50;

/// Counter top of the LED PWM slice: `base / (freq * divider)` = 20 000.
pub const PWM_WRAP: u16 =
    (PWM_CLOCK_BASE_HZ / (PWM_FREQUENCY_HZ * PWM_CLOCK_DIVIDER as u32)) as u16;

/// Red channel (X axis) deadzone, inclusive.
pub const X_DEADZONE: Deadzone = Deadzone::new(0, 2045);

/// Blue channel (Y axis) deadzone, inclusive.
pub const Y_DEADZONE: Deadzone = Deadzone::new(0, 2090);

// ── Marker geometry ──────────────────────────────────────────────────────

/// Leftmost marker column (X = 0).
pub const MARKER_LEFT_MIN: i32 = 3;

/// Rightmost marker column (X = 4095).
pub const MARKER_LEFT_MAX: i32 = 117;

/// Marker row for Y = 4095. The Y axis is inverted on screen.
pub const MARKER_TOP_MIN: i32 = 3;

/// Marker row for Y = 0.
pub const MARKER_TOP_MAX: i32 = 56;

/// Marker drawn at start-up, before the first sample: centred on a
/// 128×64 panel with an 8 px marker.
pub const MARKER_START: MarkerPosition = MarkerPosition {
    top: 64 / 2 - 4,
    left: 128 / 2 - 4,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pwm_wrap_is_derived_from_clock_parameters() {
        assert_eq!(PWM_WRAP, 20_000);
    }

    #[test]
    fn start_marker_is_centred() {
        assert_eq!(MARKER_START, MarkerPosition { top: 28, left: 60 });
    }

    #[test]
    fn deadzones_are_asymmetric() {
        assert_eq!(X_DEADZONE, Deadzone::new(0, 2045));
        assert_eq!(Y_DEADZONE, Deadzone::new(0, 2090));
    }
}
