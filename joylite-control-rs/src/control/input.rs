use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::debounce::DebounceGate;

/// Physical button that raised a falling edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Button A: toggles LED actuation.
    Primary,
    /// Joystick push-button: toggles the green LED and flashes the
    /// decorative border.
    Joystick,
}

/// Latched toggle flags, copied out as one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Toggles {
    /// Whether the red/blue PWM channels follow the joystick.
    pub actuation_enabled: bool,
    /// Level of the auxiliary (green) LED.
    pub auxiliary_on: bool,
}

/// Side effects of an accepted edge, for the caller to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeAction {
    /// Actuation was toggled. Nothing to drive; the main loop picks the new
    /// value up on its next cycle.
    Actuation { enabled: bool },
    /// Auxiliary LED was toggled. The caller sets the LED to `led_on`, then
    /// draws the decorative border once and flushes the display.
    Auxiliary { led_on: bool },
}

/// Process-wide button state shared between the edge handlers and the
/// main loop.
///
/// # Ownership
///
/// - **Writers:** the button edge handlers, through
///   [`handle_edge()`](Self::handle_edge) only.
/// - **Readers:** the main loop, through [`snapshot()`](Self::snapshot).
///
/// The debounce check and the toggle are applied inside one critical
/// section, so a reader sees either the state before the edge or the state
/// after it, never a mix.
pub struct InputState {
    gate: DebounceGate,
    toggles: Mutex<CriticalSectionRawMutex, Cell<Toggles>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Both toggles off, debounce baseline at boot.
    pub const fn new() -> Self {
        Self::with_gate(DebounceGate::new())
    }

    /// Build around an existing gate (custom window in tests).
    pub const fn with_gate(gate: DebounceGate) -> Self {
        Self {
            gate,
            toggles: Mutex::new(Cell::new(Toggles {
                actuation_enabled: false,
                auxiliary_on: false,
            })),
        }
    }

    /// Handle a falling edge from `button` observed at `now_us`.
    ///
    /// Returns `None` when the debounce gate rejects the edge; in that case
    /// nothing changes. Otherwise flips the toggle owned by `button` and
    /// returns the resulting [`EdgeAction`].
    pub fn handle_edge(&self, button: ButtonId, now_us: u64) -> Option<EdgeAction> {
        self.toggles.lock(|toggles| {
            if !self.gate.accept_edge(now_us) {
                return None;
            }

            let mut next = toggles.get();
            let action = match button {
                ButtonId::Primary => {
                    next.actuation_enabled = !next.actuation_enabled;
                    EdgeAction::Actuation {
                        enabled: next.actuation_enabled,
                    }
                }
                ButtonId::Joystick => {
                    next.auxiliary_on = !next.auxiliary_on;
                    EdgeAction::Auxiliary {
                        led_on: next.auxiliary_on,
                    }
                }
            };
            toggles.set(next);
            Some(action)
        })
    }

    /// Copy of the current toggle flags.
    pub fn snapshot(&self) -> Toggles {
        self.toggles.lock(Cell::get)
    }

    /// Shorthand for `snapshot().actuation_enabled`.
    pub fn actuation_enabled(&self) -> bool {
        self.snapshot().actuation_enabled
    }

    /// The shared debounce gate.
    pub fn gate(&self) -> &DebounceGate {
        &self.gate
    }
}
