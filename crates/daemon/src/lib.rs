// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Gentle Alert daemon: wire protocol and well-known paths shared with `ga`

pub mod paths;
pub mod protocol;

pub use protocol::{AlertSummary, ProtocolError, Request, Response};
