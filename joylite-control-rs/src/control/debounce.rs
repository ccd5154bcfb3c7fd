use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::DEBOUNCE_WINDOW_US;

/// Time-windowed edge filter shared by every button.
///
/// Holds a single baseline: the timestamp of the last accepted edge. An
/// edge is accepted only when it arrives strictly more than `window_us`
/// after that baseline, and acceptance moves the baseline to the new edge
/// no matter which button produced it.
///
/// The baseline starts at 0 µs, so edges within the first window after boot
/// are ignored. Timestamps earlier than the baseline are rejected.
///
/// The compare-and-update runs inside a critical section, so two edge
/// handlers racing for the gate never both succeed against the same
/// baseline.
pub struct DebounceGate {
    window_us: u64,
    last_accepted_us: Mutex<CriticalSectionRawMutex, Cell<u64>>,
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new()
    }
}

impl DebounceGate {
    /// Gate with the fixed [`DEBOUNCE_WINDOW_US`] window.
    pub const fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW_US)
    }

    /// Gate with a custom window, in microseconds.
    pub const fn with_window(window_us: u64) -> Self {
        Self {
            window_us,
            last_accepted_us: Mutex::new(Cell::new(0)),
        }
    }

    /// Offer an edge observed at `now_us` (microseconds since boot).
    ///
    /// Returns `true` and records `now_us` as the new baseline if the edge
    /// falls outside the window, `false` otherwise.
    pub fn accept_edge(&self, now_us: u64) -> bool {
        self.last_accepted_us.lock(|last| {
            let accepted = match now_us.checked_sub(last.get()) {
                Some(elapsed) => elapsed > self.window_us,
                None => false,
            };
            if accepted {
                last.set(now_us);
            }
            accepted
        })
    }

    /// Timestamp of the last accepted edge.
    pub fn last_accepted_us(&self) -> u64 {
        self.last_accepted_us.lock(Cell::get)
    }

    /// Length of the window in microseconds.
    pub fn window_us(&self) -> u64 {
        self.window_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_inside_first_window_after_boot_are_rejected() {
        let gate = DebounceGate::new();
        assert!(!gate.accept_edge(0));
        assert!(!gate.accept_edge(150_000));
        assert!(!gate.accept_edge(200_000));
        assert_eq!(gate.last_accepted_us(), 0);
    }

    #[test]
    fn edge_after_window_is_accepted() {
        let gate = DebounceGate::new();
        assert!(gate.accept_edge(250_000));
        assert_eq!(gate.last_accepted_us(), 250_000);
    }

    #[test]
    fn second_edge_within_window_is_rejected() {
        let gate = DebounceGate::new();
        let t0 = 1_000_000;
        assert!(gate.accept_edge(t0));
        assert!(!gate.accept_edge(t0 + 150_000));
        // Rejection leaves the baseline alone.
        assert_eq!(gate.last_accepted_us(), t0);
        assert!(gate.accept_edge(t0 + 250_000));
    }

    #[test]
    fn window_boundary_is_exclusive() {
        let gate = DebounceGate::new();
        assert!(gate.accept_edge(1_000_000));
        assert!(!gate.accept_edge(1_200_000));
        assert!(gate.accept_edge(1_200_001));
    }

    #[test]
    fn rejected_edges_do_not_extend_the_window() {
        let gate = DebounceGate::new();
        assert!(gate.accept_edge(1_000_000));
        for t in (1_010_000..1_200_000).step_by(10_000) {
            assert!(!gate.accept_edge(t));
        }
        assert!(gate.accept_edge(1_200_001));
    }

    #[test]
    fn timestamp_before_baseline_is_rejected() {
        let gate = DebounceGate::new();
        assert!(gate.accept_edge(5_000_000));
        assert!(!gate.accept_edge(1_000_000));
        assert_eq!(gate.last_accepted_us(), 5_000_000);
    }

    #[test]
    fn custom_window() {
        let gate = DebounceGate::with_window(10);
        assert_eq!(gate.window_us(), 10);
        assert!(gate.accept_edge(11));
        assert!(!gate.accept_edge(21));
        assert!(gate.accept_edge(22));
    }
}
