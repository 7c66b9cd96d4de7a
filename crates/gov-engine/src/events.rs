//! # Notifications
//!
//! Externally observable lifecycle notifications. The engine publishes
//! these through the [`crate::ports::outbound::EventSink`] port after an
//! operation commits; it never consumes them itself.

use crate::domain::value_objects::{Address, Bytes, Height, ProposalId};
use serde::{Deserialize, Serialize};

/// A new proposal entered the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalCreated {
    pub proposer: Address,
    pub id: ProposalId,
    pub kind: u32,
    pub payload: Bytes,
    pub height: Height,
}

/// A member recorded a vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCast {
    pub id: ProposalId,
    pub voter: Address,
    pub supported: bool,
    pub height: Height,
}

/// A queued proposal's payload ran to completion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalExecuted {
    pub id: ProposalId,
    pub executor: Address,
    pub height: Height,
}

/// The proposer withdrew a proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalCancelled {
    pub id: ProposalId,
    pub canceller: Address,
    pub height: Height,
}

/// Any lifecycle notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    Created(ProposalCreated),
    Voted(VoteCast),
    Executed(ProposalExecuted),
    Cancelled(ProposalCancelled),
}

impl GovernanceEvent {
    /// The topic string an event bus would publish this event under.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Created(_) => topics::PROPOSAL_CREATED,
            Self::Voted(_) => topics::VOTE_CAST,
            Self::Executed(_) => topics::PROPOSAL_EXECUTED,
            Self::Cancelled(_) => topics::PROPOSAL_CANCELLED,
        }
    }

    /// The proposal the event concerns.
    #[must_use]
    pub fn proposal_id(&self) -> ProposalId {
        match self {
            Self::Created(e) => e.id,
            Self::Voted(e) => e.id,
            Self::Executed(e) => e.id,
            Self::Cancelled(e) => e.id,
        }
    }
}

/// Event topics for the governance subsystem.
pub mod topics {
    /// A proposal was created.
    pub const PROPOSAL_CREATED: &str = "governance.proposal.created";

    /// A vote was recorded.
    pub const VOTE_CAST: &str = "governance.vote.cast";

    /// A proposal executed successfully.
    pub const PROPOSAL_EXECUTED: &str = "governance.proposal.executed";

    /// A proposal was cancelled by its proposer.
    pub const PROPOSAL_CANCELLED: &str = "governance.proposal.cancelled";
}
