//! # Inbound (Driving) Port
//!
//! The API a domain's governance module drives. Mutating operations take
//! `&mut self`: the host ledger serializes calls into a total order, and
//! the single-writer receiver is the in-process equivalent of that
//! guarantee.

use crate::domain::entities::{Proposal, ProposalState, VoteReceipt};
use crate::domain::value_objects::{Address, Bytes, DomainName, Height, ProposalId};
use crate::errors::GovernanceError;

/// The proposal lifecycle API.
///
/// Every mutating operation authorizes the calling module against the
/// proposal's domain (the supplied domain, for `create`), runs atomically
/// with zero partial effect on failure, and emits a notification on
/// success. `height` is always the host's current height; the engine
/// never advances or predicts it.
pub trait GovernanceApi {
    /// Creates a proposal and returns its id. Ids are sequential from 1.
    #[allow(clippy::too_many_arguments)]
    fn create(
        &mut self,
        caller: Address,
        height: Height,
        domain: DomainName,
        kind: u32,
        message: String,
        payload: Bytes,
        proposer: Address,
    ) -> Result<ProposalId, GovernanceError>;

    /// Records a vote on an active proposal. Never idempotent: a repeat
    /// call for the same voter fails.
    fn vote(
        &mut self,
        caller: Address,
        height: Height,
        id: ProposalId,
        support: bool,
        voter: Address,
    ) -> Result<(), GovernanceError>;

    /// Assigns the execution deadline anchor to a succeeded proposal.
    /// The decision of when to queue stays with the host.
    fn queue(
        &mut self,
        caller: Address,
        height: Height,
        id: ProposalId,
        eta: Height,
    ) -> Result<(), GovernanceError>;

    /// Executes a queued proposal's payload, at most once.
    fn execute(
        &mut self,
        caller: Address,
        height: Height,
        id: ProposalId,
        executor: Address,
    ) -> Result<(), GovernanceError>;

    /// Withdraws a proposal. Only the proposer may cancel, from any
    /// state except `Executed`.
    fn cancel(
        &mut self,
        caller: Address,
        height: Height,
        id: ProposalId,
        canceller: Address,
    ) -> Result<(), GovernanceError>;

    /// Derives the proposal's state at the given height.
    fn state(&self, id: ProposalId, height: Height) -> Result<ProposalState, GovernanceError>;

    /// The stored proposal record.
    fn proposal(&self, id: ProposalId) -> Result<Proposal, GovernanceError>;

    /// The voter's receipt, if one exists.
    fn receipt(
        &self,
        id: ProposalId,
        voter: &Address,
    ) -> Result<Option<VoteReceipt>, GovernanceError>;

    /// Total proposals ever created.
    fn proposal_count(&self) -> Result<u64, GovernanceError>;
}
