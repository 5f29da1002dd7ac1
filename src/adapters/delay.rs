//! Reactor-driven delay for the pump hold.
//!
//! `async_io_mini::Timer` registers with the reactor instead of sleeping
//! the thread, so the executor keeps servicing other tasks (display,
//! shutdown) while the pump is on.  Dropping the future cancels the timer.
//!
//! The timer schedules its wake-ups on the `embassy-time` driver.  On host
//! that is the `std` driver (a background alarm thread), enabled in
//! `Cargo.toml`.

use core::time::Duration;

// Links the time driver the reactor timers schedule on.
use embassy_time as _;

use crate::app::ports::DelayPort;

#[derive(Debug, Default, Clone, Copy)]
pub struct AsyncIoDelay;

impl AsyncIoDelay {
    pub fn new() -> Self {
        Self
    }
}

impl DelayPort for AsyncIoDelay {
    async fn delay(&mut self, duration: Duration) {
        async_io_mini::Timer::after(duration).await;
    }
}
