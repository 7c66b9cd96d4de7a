//! # Domain Entities
//!
//! The proposal record, its per-voter receipts, the derived lifecycle
//! states, and the engine configuration.

use crate::domain::value_objects::{Address, Bytes, DomainName, Height, ProposalId};
use serde::{Deserialize, Serialize};

// =============================================================================
// PROPOSAL
// =============================================================================

/// A governance proposal.
///
/// Everything except the tallies, the two terminal flags, and `eta` is
/// immutable after creation. The lifecycle state is never stored on the
/// record; it is derived on demand from these fields, the host-supplied
/// current height, and the domain's live quorum (see
/// [`crate::domain::lifecycle::derive_state`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique identifier, assigned sequentially starting at 1. Never reused.
    pub id: ProposalId,
    /// Owning governance namespace. Fixed at creation and used for every
    /// later authorization check, even if the registry's resolution for
    /// the name changes afterwards.
    pub domain: DomainName,
    /// Opaque category tag. Selects the admin action dispatched when the
    /// proposal executes.
    pub kind: u32,
    /// Human-readable description.
    pub message: String,
    /// Identity of the creator.
    pub proposer: Address,
    /// Height the proposal was created at.
    pub creation_height: Height,
    /// First height at which voting is open is `start_height + 1`.
    pub start_height: Height,
    /// Last height at which voting is open.
    pub end_height: Height,
    /// Height anchoring the execution deadline (`eta + execution_window`).
    /// 0 means "not yet queued".
    pub eta: Height,
    /// Count of "for" votes. Incremented by exactly 1 per unique voter.
    pub votes_for: u64,
    /// Count of "against" votes. Incremented by exactly 1 per unique voter.
    pub votes_against: u64,
    /// Set exactly once, never reset. Terminal.
    pub cancelled: bool,
    /// Set exactly once, never reset. Terminal.
    pub executed: bool,
    /// Opaque byte-encoded instruction dispatched on execution.
    pub payload: Bytes,
}

impl Proposal {
    /// Creates a fresh proposal record with zeroed tallies and flags.
    ///
    /// The voting window is `(start_height, end_height]` with
    /// `start_height = creation_height + start_delay` and
    /// `end_height = start_height + voting_period`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ProposalId,
        domain: DomainName,
        kind: u32,
        message: String,
        proposer: Address,
        creation_height: Height,
        payload: Bytes,
        config: &GovernanceConfig,
    ) -> Self {
        let start_height = creation_height + config.start_delay;
        Self {
            id,
            domain,
            kind,
            message,
            proposer,
            creation_height,
            start_height,
            end_height: start_height + config.voting_period,
            eta: 0,
            votes_for: 0,
            votes_against: 0,
            cancelled: false,
            executed: false,
            payload,
        }
    }

    /// Returns true if the proposal has been queued for execution.
    #[must_use]
    pub fn is_queued(&self) -> bool {
        self.eta != 0
    }

    /// Total recorded votes, both stances.
    #[must_use]
    pub fn total_votes(&self) -> u64 {
        self.votes_for + self.votes_against
    }
}

// =============================================================================
// VOTE RECEIPT
// =============================================================================

/// Immutable per-voter record of participation and stance.
///
/// Written at most once per `(proposal, voter)` pair; a second vote attempt
/// by the same voter always fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    /// Whether the voter has voted on the proposal.
    pub has_voted: bool,
    /// The stance recorded (`true` = for).
    pub supported: bool,
}

impl VoteReceipt {
    /// A receipt recording a cast vote with the given stance.
    #[must_use]
    pub const fn cast(supported: bool) -> Self {
        Self {
            has_voted: true,
            supported,
        }
    }
}

// =============================================================================
// DERIVED STATE
// =============================================================================

/// Derived lifecycle state of a proposal.
///
/// Never stored. `Cancelled`, `Defeated`, `Executed`, and `Expired` are
/// terminal: once derived at some height, every later derivation with the
/// same record yields the same terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalState {
    /// Created, voting not yet open.
    Pending,
    /// Voting is open.
    Active,
    /// Withdrawn by the proposer. Terminal.
    Cancelled,
    /// Voting closed without majority or quorum. Terminal.
    Defeated,
    /// Voting closed successfully; not yet queued for execution.
    Succeeded,
    /// Executed. Terminal.
    Executed,
    /// Queued but not executed before the deadline. Terminal.
    Expired,
    /// Queued for execution, deadline not yet passed.
    Queued,
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Engine timing configuration, in height units.
///
/// These encode a specific host's time-per-height assumption and therefore
/// stay configurable; the defaults correspond to roughly two weeks of
/// voting and a four-week execution window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Heights between creation and the opening of voting.
    pub start_delay: Height,
    /// Length of the voting window.
    pub voting_period: Height,
    /// Heights past `eta` during which a queued proposal stays executable.
    pub execution_window: Height,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            start_delay: 1,
            voting_period: 92_550,     // ~2 weeks
            execution_window: 185_100, // ~4 weeks
        }
    }
}

impl GovernanceConfig {
    /// Short windows for testing.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            start_delay: 1,
            voting_period: 10,
            execution_window: 50,
        }
    }
}
