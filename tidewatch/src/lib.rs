//! Beach-cleanup coordination widget core.
//!
//! The crate renders a multi-day weather outlook for a cleanup location and
//! tracks a user's participation (crew, points, trash collected) in a
//! key/value store. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (forecast parsing, icon rules,
//!   join action, shallow merge). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, storage, HTTP weather
//!   provider, render targets). Isolated behind traits for tests.
//!
//! Orchestration modules ([`forecast`], [`session`], [`view`]) coordinate core
//! logic with I/O for the CLI and the UI server.

pub mod core;
pub mod exit_codes;
pub mod forecast;
pub mod io;
pub mod logging;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod view;
