//! In-memory implementation of the proposal store.
//!
//! Proposals live in an id-indexed map; the multiplexing key-hash scheme
//! a shared ledger store would need has no semantic value here and is
//! deliberately absent.

use crate::domain::entities::{Proposal, VoteReceipt};
use crate::domain::value_objects::{Address, ProposalId};
use crate::errors::StoreError;
use crate::ports::outbound::ProposalStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory proposal store.
pub struct InMemoryProposalStore {
    proposals: RwLock<HashMap<ProposalId, Proposal>>,
    receipts: RwLock<HashMap<(ProposalId, Address), VoteReceipt>>,
    count: RwLock<u64>,
}

impl InMemoryProposalStore {
    pub fn new() -> Self {
        Self {
            proposals: RwLock::new(HashMap::new()),
            receipts: RwLock::new(HashMap::new()),
            count: RwLock::new(0),
        }
    }
}

impl Default for InMemoryProposalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProposalStore for InMemoryProposalStore {
    fn proposal(&self, id: ProposalId) -> Result<Option<Proposal>, StoreError> {
        let proposals = self.proposals.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(proposals.get(&id).cloned())
    }

    fn put_proposal(&self, proposal: Proposal) -> Result<(), StoreError> {
        let mut proposals = self.proposals.write().map_err(|_| StoreError::LockPoisoned)?;
        proposals.insert(proposal.id, proposal);
        Ok(())
    }

    fn receipt(&self, id: ProposalId, voter: &Address) -> Result<Option<VoteReceipt>, StoreError> {
        let receipts = self.receipts.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(receipts.get(&(id, *voter)).copied())
    }

    fn put_receipt(
        &self,
        id: ProposalId,
        voter: Address,
        receipt: VoteReceipt,
    ) -> Result<(), StoreError> {
        let mut receipts = self.receipts.write().map_err(|_| StoreError::LockPoisoned)?;
        receipts.insert((id, voter), receipt);
        Ok(())
    }

    fn proposal_count(&self) -> Result<u64, StoreError> {
        let count = self.count.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(*count)
    }

    fn set_proposal_count(&self, count: u64) -> Result<(), StoreError> {
        let mut stored = self.count.write().map_err(|_| StoreError::LockPoisoned)?;
        *stored = count;
        Ok(())
    }
}
