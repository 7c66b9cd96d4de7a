//! # Staged Writes
//!
//! Per-operation write buffer over the proposal store. Reads fall through
//! to the store, writes stage in memory, and `commit` flushes everything
//! at once; dropping the buffer discards it. Each engine operation runs
//! entirely inside one buffer, which yields the all-or-nothing visibility
//! the host ledger would otherwise provide: a failing operation — however
//! deep the failure — leaves the store untouched.
//!
//! Nested (re-entrant) calls during payload execution share the outer
//! operation's buffer, so they observe the staged `executed` flag, and
//! their effects vanish with the buffer if the outer operation fails.

use crate::domain::entities::{Proposal, VoteReceipt};
use crate::domain::invariants;
use crate::domain::value_objects::{Address, ProposalId};
use crate::errors::StoreError;
use crate::ports::outbound::ProposalStore;
use std::collections::HashMap;

/// Write buffer for a single engine operation.
pub struct StagedStore<'a, S: ProposalStore> {
    base: &'a S,
    proposals: HashMap<ProposalId, Proposal>,
    receipts: HashMap<(ProposalId, Address), VoteReceipt>,
    count: Option<u64>,
}

impl<'a, S: ProposalStore> StagedStore<'a, S> {
    pub fn new(base: &'a S) -> Self {
        Self {
            base,
            proposals: HashMap::new(),
            receipts: HashMap::new(),
            count: None,
        }
    }

    /// Staged record if one exists, otherwise the stored record.
    pub fn proposal(&self, id: ProposalId) -> Result<Option<Proposal>, StoreError> {
        if let Some(proposal) = self.proposals.get(&id) {
            return Ok(Some(proposal.clone()));
        }
        self.base.proposal(id)
    }

    /// Stages a proposal write.
    pub fn stage_proposal(&mut self, proposal: Proposal) {
        debug_assert!(
            invariants::check_proposal(&proposal).is_empty(),
            "staged proposal violates invariants: {:?}",
            invariants::check_proposal(&proposal)
        );
        self.proposals.insert(proposal.id, proposal);
    }

    /// Staged receipt if one exists, otherwise the stored receipt.
    pub fn receipt(
        &self,
        id: ProposalId,
        voter: &Address,
    ) -> Result<Option<VoteReceipt>, StoreError> {
        if let Some(receipt) = self.receipts.get(&(id, *voter)) {
            return Ok(Some(*receipt));
        }
        self.base.receipt(id, voter)
    }

    /// Stages a receipt write.
    pub fn stage_receipt(&mut self, id: ProposalId, voter: Address, receipt: VoteReceipt) {
        debug_assert!(invariants::check_receipt(&receipt));
        self.receipts.insert((id, voter), receipt);
    }

    /// Staged count if set, otherwise the stored count.
    pub fn count(&self) -> Result<u64, StoreError> {
        match self.count {
            Some(count) => Ok(count),
            None => self.base.proposal_count(),
        }
    }

    /// Stages the running proposal total.
    pub fn stage_count(&mut self, count: u64) {
        self.count = Some(count);
    }

    /// Flushes every staged write to the store.
    pub fn commit(self) -> Result<(), StoreError> {
        for (_, proposal) in self.proposals {
            self.base.put_proposal(proposal)?;
        }
        for ((id, voter), receipt) in self.receipts {
            self.base.put_receipt(id, voter, receipt)?;
        }
        if let Some(count) = self.count {
            self.base.set_proposal_count(count)?;
        }
        Ok(())
    }
}
