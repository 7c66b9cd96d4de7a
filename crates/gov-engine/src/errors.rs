//! # Error Types
//!
//! The engine's failure taxonomy. Every precondition violation aborts the
//! whole operation with zero partial state change; every variant carries
//! enough context for a human-readable rejection message. No failure path
//! is silent.

use crate::domain::entities::ProposalState;
use crate::domain::value_objects::{Address, ProposalId};
use thiserror::Error;

/// Errors surfaced by the governance engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    /// The caller is not the module registered for the domain, or does
    /// not hold the role the operation requires.
    #[error("access denied for domain {domain:?}: {reason}")]
    AccessDenied { domain: String, reason: String },

    /// The id names no proposal (ids run from 1 to the current total).
    #[error("invalid proposal id {0}")]
    InvalidProposal(ProposalId),

    /// The proposal's derived state does not admit the operation.
    #[error("proposal {id} is {actual:?}, operation requires {required}")]
    InvalidState {
        id: ProposalId,
        actual: ProposalState,
        required: &'static str,
    },

    /// The voter already holds a receipt for this proposal.
    #[error("voter {voter} already voted on proposal {id}")]
    AlreadyVoted { id: ProposalId, voter: Address },

    /// The payload's administrative action failed; the operation rolled
    /// back, including the executed flag.
    #[error("payload execution failed for proposal {id}: {reason}")]
    PayloadFailure { id: ProposalId, reason: String },

    /// The persistence substrate failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors from the proposal store substrate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Backend-specific failure.
    #[error("store backend error: {0}")]
    Backend(String),
}
