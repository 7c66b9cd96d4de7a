//! # Lifecycle Derivation
//!
//! Pure state derivation for proposals. No I/O, no async, no caching:
//! both the height and the quorum vary independently of the record, so
//! the state is recomputed from scratch on every query.

use crate::domain::entities::{Proposal, ProposalState};
use crate::domain::value_objects::Height;

/// Derives the lifecycle state of a proposal.
///
/// `required_votes` is the domain's quorum as reported by the oracle at
/// the time of the call — never a value snapshotted at creation.
/// `execution_window` is the configured number of heights past `eta`
/// during which a queued proposal stays executable.
///
/// The checks run in a fixed order and the first match wins:
/// 1. cancelled → `Cancelled`
/// 2. voting not yet open → `Pending`
/// 3. voting still open → `Active`
/// 4. no majority, or below quorum → `Defeated`
/// 5. not yet queued → `Succeeded`
/// 6. executed → `Executed`
/// 7. past the deadline → `Expired`
/// 8. otherwise → `Queued`
#[must_use]
pub fn derive_state(
    proposal: &Proposal,
    height: Height,
    required_votes: u64,
    execution_window: Height,
) -> ProposalState {
    if proposal.cancelled {
        ProposalState::Cancelled
    } else if height <= proposal.start_height {
        ProposalState::Pending
    } else if height <= proposal.end_height {
        ProposalState::Active
    } else if proposal.votes_for <= proposal.votes_against
        || proposal.votes_for < required_votes
    {
        ProposalState::Defeated
    } else if proposal.eta == 0 {
        ProposalState::Succeeded
    } else if proposal.executed {
        ProposalState::Executed
    } else if height >= proposal.eta + execution_window {
        ProposalState::Expired
    } else {
        ProposalState::Queued
    }
}

/// Returns true if the state admits no further transitions.
#[must_use]
pub fn is_terminal(state: ProposalState) -> bool {
    matches!(
        state,
        ProposalState::Cancelled
            | ProposalState::Defeated
            | ProposalState::Executed
            | ProposalState::Expired
    )
}
