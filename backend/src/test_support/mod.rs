//! Shared test doubles, available to unit tests and, through the
//! `test-support` feature, to integration tests.

mod clock;

pub use clock::MutableClock;
