//! Domain layer: entities, value objects, pure lifecycle derivation,
//! the closed admin-action set, and record invariants.

pub mod entities;
pub mod invariants;
pub mod lifecycle;
pub mod payload;
pub mod value_objects;

pub use entities::{GovernanceConfig, Proposal, ProposalState, VoteReceipt};
pub use lifecycle::{derive_state, is_terminal};
pub use payload::{kinds, AdminAction, CancelParams, TimingParams};
pub use value_objects::{Address, Bytes, DomainName, Height, ProposalId};
