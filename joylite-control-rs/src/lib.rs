//! Hardware-independent core of the joylite firmware.
//!
//! Everything in [`control`] is `no_std`, allocation-free and runs
//! unchanged on the host, which is where its unit tests execute.

#![no_std]

pub mod control;

// Host tests take their critical-section implementation from the `std`
// feature of this crate.
#[cfg(test)]
use critical_section as _;
