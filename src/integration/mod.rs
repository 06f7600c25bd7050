//! Integration testing module
//!
//! End-to-end tests for the decision phase:
//! - Fixture sources with realistic track layouts
//! - Planner runs built from configuration files
//! - Remove / pass-through / compress outcomes per track type

pub mod e2e;
pub mod fixtures;
