//! # Tally Library
//!
//! This library provides the core timing functionality for the tally task
//! timer. It includes the up-counting time-accounting engine, the session
//! controller with its commit lockout, alarm scheduling for the host loop,
//! and JSON export of completed tasks.

pub mod clock;
pub mod export;
pub mod sched;
pub mod session;
pub mod timer;
