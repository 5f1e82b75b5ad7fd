// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for presenting alerts and saving them

pub mod persist;
pub mod presenter;
pub mod traced;

pub use persist::{NoOpPersister, PersistError, Persister};
pub use presenter::{DesktopPresenter, NoOpPresenter, PresentError, Presenter};
pub use traced::{TracedPersister, TracedPresenter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use persist::FakePersister;
#[cfg(any(test, feature = "test-support"))]
pub use presenter::{FakePresenter, PresenterCall};
