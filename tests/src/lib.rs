//! # Quantum-Chain Test Suite
//!
//! Unified test crate for the allocation ordering subsystem.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Performance tests per subsystem
//! │   └── qc_12_allocation_ordering.rs
//! │
//! ├── fixtures.rs       # Versioned transactions, decoder, block generators
//! │
//! └── integration/      # Assembly and validation flows
//!     └── allocation_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-tests
//!
//! # By category
//! cargo test -p qc-tests integration::
//!
//! # Benchmarks
//! cargo bench -p qc-tests
//! ```

pub mod fixtures;
pub mod integration;
