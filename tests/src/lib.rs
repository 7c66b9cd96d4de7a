//! # Governance Test Suite
//!
//! Unified test crate for the workspace.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/          # Cross-component lifecycle flows
//!     └── lifecycle_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p gov-tests
//!
//! # By category
//! cargo test -p gov-tests integration::
//! ```
