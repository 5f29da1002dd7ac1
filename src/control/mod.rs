//! Actuation control: turns detection events into pump pulses.

pub mod actuation;
