//! CatDeterrent controller library.
//!
//! Exposes the pure-logic modules for integration testing and the host
//! runner.  Hardware is reached only through the port traits in
//! [`app::ports`]; drivers are generic over `embedded-hal` pins.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod detection;
pub mod diagnostics;
pub mod error;
pub mod safety;

pub mod adapters;
pub mod drivers;
pub mod sensors;
