//! # Outbound (Driven) Ports
//!
//! Dependencies the engine needs from the host: the persistence
//! substrate, the name-to-module registry, the per-domain quorum source,
//! and the notification channel. All of them are collaborators; none of
//! them belongs to this subsystem.

use crate::domain::entities::{Proposal, VoteReceipt};
use crate::domain::value_objects::{Address, ProposalId};
use crate::errors::StoreError;
use crate::events::GovernanceEvent;

/// Typed point-lookup persistence for proposals.
///
/// Point reads and writes only: the substrate offers no enumeration, so
/// the engine alone tracks the running proposal total through
/// `proposal_count` / `set_proposal_count`. The store performs no
/// validation of its own.
pub trait ProposalStore: Send + Sync {
    fn proposal(&self, id: ProposalId) -> Result<Option<Proposal>, StoreError>;
    fn put_proposal(&self, proposal: Proposal) -> Result<(), StoreError>;
    fn receipt(&self, id: ProposalId, voter: &Address) -> Result<Option<VoteReceipt>, StoreError>;
    fn put_receipt(
        &self,
        id: ProposalId,
        voter: Address,
        receipt: VoteReceipt,
    ) -> Result<(), StoreError>;
    fn proposal_count(&self) -> Result<u64, StoreError>;
    fn set_proposal_count(&self, count: u64) -> Result<(), StoreError>;
}

/// Name-to-module registry.
///
/// Resolution is live: the engine queries it on every authorization and
/// never caches the answer on a proposal.
pub trait ModuleRegistry: Send + Sync {
    /// The module currently registered for the domain, if any.
    fn resolve(&self, domain: &str) -> Option<Address>;
}

/// Per-domain quorum source.
///
/// Queried live at every state derivation; the threshold is deliberately
/// not snapshotted at proposal creation and may change while a proposal
/// is in flight.
pub trait QuorumOracle: Send + Sync {
    /// Minimum "for" vote count a proposal in this domain needs.
    fn required_votes(&self, domain: &str) -> u64;
}

/// Notification channel.
///
/// The engine publishes lifecycle events here after an operation commits;
/// it never reads them back.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: GovernanceEvent);
}
