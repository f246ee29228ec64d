//! Property-based tests

pub mod conversation_proptest;
