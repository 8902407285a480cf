//! Testing infrastructure for salvor integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: Fluent interface for declarative test setup
//! - `assertions`: Custom assertions for salvor-specific validation
//! - `fixtures`: Raw tool-result payloads covering the recovery spectrum

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::TestWorld;
