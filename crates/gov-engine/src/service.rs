//! # Lifecycle Engine
//!
//! The proposal lifecycle service: create, vote, queue, execute, cancel,
//! and state derivation, over the outbound ports.
//!
//! Every mutating operation runs inside a [`StagedStore`] buffer and
//! commits only on success, so a failure at any depth leaves zero
//! observable effect. Notifications are staged alongside the writes and
//! published strictly after commit.
//!
//! Execution flips the `executed` flag *before* dispatching the payload
//! action. The action runs inside the same buffer, so a re-entrant call
//! back into the engine observes the proposal as already executed; if the
//! action fails, the buffer is discarded and the flag flip rolls back
//! with it.

use crate::domain::entities::{GovernanceConfig, Proposal, ProposalState, VoteReceipt};
use crate::domain::lifecycle;
use crate::domain::payload::AdminAction;
use crate::domain::value_objects::{Address, Bytes, DomainName, Height, ProposalId};
use crate::errors::GovernanceError;
use crate::events::{
    GovernanceEvent, ProposalCancelled, ProposalCreated, ProposalExecuted, VoteCast,
};
use crate::guard::AccessGuard;
use crate::ports::inbound::GovernanceApi;
use crate::ports::outbound::{EventSink, ModuleRegistry, ProposalStore, QuorumOracle};
use crate::staging::StagedStore;
use tracing::{debug, info, warn};

/// In-flight state of a single engine operation: the write buffer, the
/// configuration as the operation sees it (timing updates stage here),
/// and the notifications to publish on commit.
struct OpContext<'a, S: ProposalStore> {
    txn: StagedStore<'a, S>,
    config: GovernanceConfig,
    config_dirty: bool,
    events: Vec<GovernanceEvent>,
}

impl<'a, S: ProposalStore> OpContext<'a, S> {
    fn new(store: &'a S, config: GovernanceConfig) -> Self {
        Self {
            txn: StagedStore::new(store),
            config,
            config_dirty: false,
            events: Vec::new(),
        }
    }
}

/// The proposal lifecycle engine.
///
/// Generic over the four host collaborators: the proposal store, the
/// name-to-module registry, the quorum oracle, and the notification sink.
pub struct GovernanceEngine<S, R, Q, E> {
    store: S,
    registry: R,
    quorum: Q,
    events: E,
    config: GovernanceConfig,
}

impl<S, R, Q, E> GovernanceEngine<S, R, Q, E>
where
    S: ProposalStore,
    R: ModuleRegistry,
    Q: QuorumOracle,
    E: EventSink,
{
    pub fn new(store: S, registry: R, quorum: Q, events: E, config: GovernanceConfig) -> Self {
        Self {
            store,
            registry,
            quorum,
            events,
            config,
        }
    }

    /// Current timing configuration.
    #[must_use]
    pub fn config(&self) -> GovernanceConfig {
        self.config
    }

    /// The registry collaborator.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// The quorum oracle collaborator.
    pub fn quorum_oracle(&self) -> &Q {
        &self.quorum
    }

    /// The notification sink collaborator.
    pub fn event_sink(&self) -> &E {
        &self.events
    }

    // =========================================================================
    // OPERATION PLUMBING
    // =========================================================================

    /// Commits a finished operation: flush the buffer, apply a staged
    /// timing update, publish the staged notifications.
    fn commit_op(
        config_slot: &mut GovernanceConfig,
        sink: &E,
        cx: OpContext<'_, S>,
    ) -> Result<(), GovernanceError> {
        cx.txn.commit()?;
        if cx.config_dirty {
            *config_slot = cx.config;
        }
        for event in cx.events {
            sink.publish(event);
        }
        Ok(())
    }

    fn load(&self, cx: &OpContext<'_, S>, id: ProposalId) -> Result<Proposal, GovernanceError> {
        cx.txn
            .proposal(id)?
            .ok_or(GovernanceError::InvalidProposal(id))
    }

    /// Derives a proposal's state against the live quorum.
    fn derive_with(
        &self,
        config: &GovernanceConfig,
        proposal: &Proposal,
        height: Height,
    ) -> ProposalState {
        let required = self.quorum.required_votes(proposal.domain.as_str());
        let state = lifecycle::derive_state(proposal, height, required, config.execution_window);
        debug!(id = proposal.id, height, required, ?state, "derived proposal state");
        state
    }

    // =========================================================================
    // OPERATION BODIES
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    fn create_in(
        &self,
        cx: &mut OpContext<'_, S>,
        caller: Address,
        height: Height,
        domain: DomainName,
        kind: u32,
        message: String,
        payload: Bytes,
        proposer: Address,
    ) -> Result<ProposalId, GovernanceError> {
        // No proposal exists yet, so the guard runs against the domain
        // the caller declares; creation binds it into the record for good.
        AccessGuard::new(&self.registry).authorize(&domain, caller)?;

        let id = cx.txn.count()? + 1;
        let proposal = Proposal::new(
            id, domain, kind, message, proposer, height, payload, &cx.config,
        );

        cx.events.push(GovernanceEvent::Created(ProposalCreated {
            proposer,
            id,
            kind,
            payload: proposal.payload.clone(),
            height,
        }));
        cx.txn.stage_proposal(proposal);
        cx.txn.stage_count(id);
        Ok(id)
    }

    fn vote_in(
        &self,
        cx: &mut OpContext<'_, S>,
        caller: Address,
        height: Height,
        id: ProposalId,
        support: bool,
        voter: Address,
    ) -> Result<(), GovernanceError> {
        let mut proposal = self.load(cx, id)?;

        let state = self.derive_with(&cx.config, &proposal, height);
        if state != ProposalState::Active {
            return Err(GovernanceError::InvalidState {
                id,
                actual: state,
                required: "Active",
            });
        }

        if cx.txn.receipt(id, &voter)?.is_some() {
            return Err(GovernanceError::AlreadyVoted { id, voter });
        }

        AccessGuard::new(&self.registry).authorize(&proposal.domain, caller)?;

        if support {
            proposal.votes_for += 1;
        } else {
            proposal.votes_against += 1;
        }
        cx.txn.stage_proposal(proposal);
        cx.txn.stage_receipt(id, voter, VoteReceipt::cast(support));
        cx.events.push(GovernanceEvent::Voted(VoteCast {
            id,
            voter,
            supported: support,
            height,
        }));
        Ok(())
    }

    fn queue_in(
        &self,
        cx: &mut OpContext<'_, S>,
        caller: Address,
        height: Height,
        id: ProposalId,
        eta: Height,
    ) -> Result<(), GovernanceError> {
        let mut proposal = self.load(cx, id)?;

        let state = self.derive_with(&cx.config, &proposal, height);
        if state != ProposalState::Succeeded || eta == 0 {
            return Err(GovernanceError::InvalidState {
                id,
                actual: state,
                required: "Succeeded, with a nonzero eta",
            });
        }

        AccessGuard::new(&self.registry).authorize(&proposal.domain, caller)?;

        proposal.eta = eta;
        cx.txn.stage_proposal(proposal);
        Ok(())
    }

    fn execute_in(
        &self,
        cx: &mut OpContext<'_, S>,
        caller: Address,
        height: Height,
        id: ProposalId,
        executor: Address,
    ) -> Result<(), GovernanceError> {
        let proposal = self.load(cx, id)?;

        let state = self.derive_with(&cx.config, &proposal, height);
        if state != ProposalState::Queued {
            return Err(GovernanceError::InvalidState {
                id,
                actual: state,
                required: "Queued",
            });
        }

        AccessGuard::new(&self.registry).authorize(&proposal.domain, caller)?;

        // Flag before effect: the staged flip is visible to any call the
        // action makes back into the engine, and is discarded with the
        // rest of the buffer if the action fails.
        let mut updated = proposal.clone();
        updated.executed = true;
        cx.txn.stage_proposal(updated);

        let action = AdminAction::decode(proposal.kind, &proposal.payload)
            .map_err(|err| GovernanceError::PayloadFailure {
                id,
                reason: err.to_string(),
            })?;
        self.apply_action(cx, action, caller, executor, height)
            .map_err(|err| GovernanceError::PayloadFailure {
                id,
                reason: err.to_string(),
            })?;

        cx.events.push(GovernanceEvent::Executed(ProposalExecuted {
            id,
            executor,
            height,
        }));
        Ok(())
    }

    fn cancel_in(
        &self,
        cx: &mut OpContext<'_, S>,
        caller: Address,
        height: Height,
        id: ProposalId,
        canceller: Address,
    ) -> Result<(), GovernanceError> {
        let mut proposal = self.load(cx, id)?;

        let state = self.derive_with(&cx.config, &proposal, height);
        if state == ProposalState::Executed {
            return Err(GovernanceError::InvalidState {
                id,
                actual: state,
                required: "any state except Executed",
            });
        }

        if canceller != proposal.proposer {
            return Err(GovernanceError::AccessDenied {
                domain: proposal.domain.as_str().to_string(),
                reason: format!("only the proposer may cancel, got {canceller}"),
            });
        }

        AccessGuard::new(&self.registry).authorize(&proposal.domain, caller)?;

        proposal.cancelled = true;
        cx.txn.stage_proposal(proposal);
        cx.events.push(GovernanceEvent::Cancelled(ProposalCancelled {
            id,
            canceller,
            height,
        }));
        Ok(())
    }

    /// Dispatches a decoded admin action against the engine's own
    /// administrative surface. Nested lifecycle calls run in the outer
    /// operation's buffer, with the outer caller as caller context and
    /// the executor as the acting member.
    fn apply_action(
        &self,
        cx: &mut OpContext<'_, S>,
        action: AdminAction,
        caller: Address,
        executor: Address,
        height: Height,
    ) -> Result<(), GovernanceError> {
        match action {
            AdminAction::Text => Ok(()),
            AdminAction::UpdateTiming(params) => {
                cx.config = GovernanceConfig {
                    start_delay: params.start_delay,
                    voting_period: params.voting_period,
                    execution_window: params.execution_window,
                };
                cx.config_dirty = true;
                Ok(())
            }
            AdminAction::CancelProposal(params) => {
                self.cancel_in(cx, caller, height, params.id, executor)
            }
        }
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

impl<S, R, Q, E> GovernanceApi for GovernanceEngine<S, R, Q, E>
where
    S: ProposalStore,
    R: ModuleRegistry,
    Q: QuorumOracle,
    E: EventSink,
{
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
    ) -> Result<ProposalId, GovernanceError> {
        let mut cx = OpContext::new(&self.store, self.config);
        let result = self.create_in(&mut cx, caller, height, domain, kind, message, payload, proposer);
        match result {
            Ok(id) => {
                Self::commit_op(&mut self.config, &self.events, cx)?;
                info!(id, height, %proposer, "proposal created");
                Ok(id)
            }
            Err(err) => {
                warn!(height, %err, "create rejected");
                Err(err)
            }
        }
    }

    fn vote(
        &mut self,
        caller: Address,
        height: Height,
        id: ProposalId,
        support: bool,
        voter: Address,
    ) -> Result<(), GovernanceError> {
        let mut cx = OpContext::new(&self.store, self.config);
        match self.vote_in(&mut cx, caller, height, id, support, voter) {
            Ok(()) => {
                Self::commit_op(&mut self.config, &self.events, cx)?;
                info!(id, height, %voter, support, "vote recorded");
                Ok(())
            }
            Err(err) => {
                warn!(id, height, %voter, %err, "vote rejected");
                Err(err)
            }
        }
    }

    fn queue(
        &mut self,
        caller: Address,
        height: Height,
        id: ProposalId,
        eta: Height,
    ) -> Result<(), GovernanceError> {
        let mut cx = OpContext::new(&self.store, self.config);
        match self.queue_in(&mut cx, caller, height, id, eta) {
            Ok(()) => {
                Self::commit_op(&mut self.config, &self.events, cx)?;
                info!(id, height, eta, "proposal queued");
                Ok(())
            }
            Err(err) => {
                warn!(id, height, eta, %err, "queue rejected");
                Err(err)
            }
        }
    }

    fn execute(
        &mut self,
        caller: Address,
        height: Height,
        id: ProposalId,
        executor: Address,
    ) -> Result<(), GovernanceError> {
        let mut cx = OpContext::new(&self.store, self.config);
        match self.execute_in(&mut cx, caller, height, id, executor) {
            Ok(()) => {
                Self::commit_op(&mut self.config, &self.events, cx)?;
                info!(id, height, %executor, "proposal executed");
                Ok(())
            }
            Err(err) => {
                // The buffer is dropped, rolling back the flag flip and
                // anything the action staged before failing.
                warn!(id, height, %executor, %err, "execute rejected");
                Err(err)
            }
        }
    }

    fn cancel(
        &mut self,
        caller: Address,
        height: Height,
        id: ProposalId,
        canceller: Address,
    ) -> Result<(), GovernanceError> {
        let mut cx = OpContext::new(&self.store, self.config);
        match self.cancel_in(&mut cx, caller, height, id, canceller) {
            Ok(()) => {
                Self::commit_op(&mut self.config, &self.events, cx)?;
                info!(id, height, %canceller, "proposal cancelled");
                Ok(())
            }
            Err(err) => {
                warn!(id, height, %canceller, %err, "cancel rejected");
                Err(err)
            }
        }
    }

    fn state(&self, id: ProposalId, height: Height) -> Result<ProposalState, GovernanceError> {
        let proposal = self
            .store
            .proposal(id)?
            .ok_or(GovernanceError::InvalidProposal(id))?;
        Ok(self.derive_with(&self.config, &proposal, height))
    }

    fn proposal(&self, id: ProposalId) -> Result<Proposal, GovernanceError> {
        self.store
            .proposal(id)?
            .ok_or(GovernanceError::InvalidProposal(id))
    }

    fn receipt(
        &self,
        id: ProposalId,
        voter: &Address,
    ) -> Result<Option<VoteReceipt>, GovernanceError> {
        self.store
            .proposal(id)?
            .ok_or(GovernanceError::InvalidProposal(id))?;
        Ok(self.store.receipt(id, voter)?)
    }

    fn proposal_count(&self) -> Result<u64, GovernanceError> {
        Ok(self.store.proposal_count()?)
    }
}
