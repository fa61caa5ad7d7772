//! Configuration unit tests.

mod unit;
