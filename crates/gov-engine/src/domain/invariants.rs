//! # Domain Invariants
//!
//! Well-formedness checks for proposal records. The engine only ever
//! writes records that pass all of them; the staged-commit path asserts
//! this in debug builds before anything reaches the store.

use crate::domain::entities::{Proposal, VoteReceipt};

/// A detected invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The id is outside the valid range (ids start at 1).
    ZeroId,
    /// The voting window is inverted.
    ScheduleInverted { start: u64, end: u64 },
    /// A proposal cannot be both cancelled and executed.
    ConflictingTerminalFlags,
    /// An executed proposal must have been queued first.
    ExecutedWithoutEta,
}

/// Ids start at 1; 0 never names a proposal.
#[must_use]
pub fn check_id(proposal: &Proposal) -> bool {
    proposal.id >= 1
}

/// Voting opens no later than it closes.
#[must_use]
pub fn check_schedule(proposal: &Proposal) -> bool {
    proposal.start_height <= proposal.end_height
}

/// `cancelled` and `executed` are mutually exclusive: cancellation is
/// rejected once executed, and an executed record is never cancelled.
#[must_use]
pub fn check_terminal_flags(proposal: &Proposal) -> bool {
    !(proposal.cancelled && proposal.executed)
}

/// Execution only happens after queuing assigns a nonzero `eta`.
#[must_use]
pub fn check_executed_queued(proposal: &Proposal) -> bool {
    !proposal.executed || proposal.eta != 0
}

/// A stored receipt always records a cast vote.
#[must_use]
pub fn check_receipt(receipt: &VoteReceipt) -> bool {
    receipt.has_voted
}

/// Runs every record check and collects the violations.
#[must_use]
pub fn check_proposal(proposal: &Proposal) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if !check_id(proposal) {
        violations.push(InvariantViolation::ZeroId);
    }
    if !check_schedule(proposal) {
        violations.push(InvariantViolation::ScheduleInverted {
            start: proposal.start_height,
            end: proposal.end_height,
        });
    }
    if !check_terminal_flags(proposal) {
        violations.push(InvariantViolation::ConflictingTerminalFlags);
    }
    if !check_executed_queued(proposal) {
        violations.push(InvariantViolation::ExecutedWithoutEta);
    }

    violations
}
