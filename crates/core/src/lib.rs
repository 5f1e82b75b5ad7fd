// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ga-core: alert model and recurrence rules for the Gentle Alert scheduler
//!
//! This crate provides:
//! - The `Alert` record and its `Recurrence` rules
//! - Pure next-trigger calculation
//! - Global presentation defaults
//! - Effects requested by scheduling transitions

pub mod alert;
pub mod clock;
pub mod effect;
pub mod recurrence;
pub mod settings;
pub mod traced;

pub use alert::{Alert, Display, PresentationParams, Recurrence, Rgb, DATE_FORMAT, TIME_FORMAT};
pub use clock::{Clock, FakeClock, SystemClock};
pub use effect::Effect;
pub use recurrence::{next_trigger, resolve, NoTrigger};
pub use settings::{
    clamp_to, Presentation, Settings, DURATION_MULTIPLIER_RANGE, EXPANSION_TIME_RANGE,
    TEST_ALERT_TEXT,
};
pub use traced::TracedEffect;
