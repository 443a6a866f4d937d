//! # Integration Tests
//!
//! End-to-end flows through subsystem inbound ports.

pub mod allocation_flows;
