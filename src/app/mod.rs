//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the cat deterrent:
//! the detection service and the values it exchanges with the outside
//! world.  All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod events;
pub mod ports;
pub mod service;
