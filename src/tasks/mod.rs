//! Background tasks module
//!
//! This module contains the driver that owns the timer and the interval task
//! that feeds it ticks.

pub mod driver;
pub mod ticker;

// Re-export main types
pub use driver::{timer_driver_task, TimerCommand};
pub use ticker::{IntervalTicker, TickId, TickScheduler, TICK_QUANTUM};
