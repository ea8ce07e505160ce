//! Deterministic, pure logic shared by the widget core.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod catalog;
pub mod forecast;
pub mod icons;
pub mod join;
pub mod merge;
pub mod types;
