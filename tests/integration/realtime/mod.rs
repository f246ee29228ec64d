//! Realtime fan-out integration tests

pub mod fanout_test;
