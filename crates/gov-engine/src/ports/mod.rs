//! Driving and driven port definitions.

pub mod inbound;
pub mod outbound;

pub use inbound::GovernanceApi;
pub use outbound::{EventSink, ModuleRegistry, ProposalStore, QuorumOracle};
