// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Gentle Alert scheduling engine

mod engine;
mod error;
mod executor;
mod registry;
mod scheduler;

pub use engine::{SchedulingEngine, SlotState, DEFAULT_TIMER_CEILING_MS};
pub use error::EngineError;
pub use executor::{ExecuteError, Executor};
pub use registry::{TimerEntry, TimerRegistry};
pub use scheduler::{Scheduler, TimerKey};
