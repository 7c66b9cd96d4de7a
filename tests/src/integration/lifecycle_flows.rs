//! # Lifecycle Integration Flows
//!
//! End-to-end flows across the engine, the in-memory adapters, and the
//! live collaborators:
//!
//! 1. **Quorum-gated outcomes**: the same voting record succeeds or is
//!    defeated depending on the oracle's answer at derivation time.
//! 2. **Queue → execute → expire**: time-bounded execution against the
//!    host-supplied height.
//! 3. **Live authorization**: registry changes redirect authority for
//!    in-flight proposals immediately.
//! 4. **Id allocation**: sequential ids regardless of how many domains
//!    interleave their calls.

#[cfg(test)]
mod tests {
    use gov_engine::adapters::{
        InMemoryModuleRegistry, InMemoryProposalStore, RecordingEventSink, StaticQuorumOracle,
    };
    use gov_engine::domain::payload::{kinds, AdminAction, CancelParams, TimingParams};
    use gov_engine::{
        Address, DomainName, GovernanceApi, GovernanceConfig, GovernanceEngine, GovernanceError,
        ProposalId, ProposalState,
    };
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    type TestEngine = GovernanceEngine<
        InMemoryProposalStore,
        InMemoryModuleRegistry,
        StaticQuorumOracle,
        RecordingEventSink,
    >;

    fn addr(byte: u8) -> Address {
        Address::new([byte; 20])
    }

    const TREASURY_MODULE: Address = Address::new([0x11; 20]);
    const PROPOSER: Address = Address::new([0xA1; 20]);

    /// Engine with "treasury" registered and short timing windows
    /// (start_delay 1, voting_period 10, execution_window 50).
    fn engine(default_quorum: u64) -> TestEngine {
        let registry = InMemoryModuleRegistry::new();
        registry.register("treasury", TREASURY_MODULE);
        GovernanceEngine::new(
            InMemoryProposalStore::new(),
            registry,
            StaticQuorumOracle::new(default_quorum),
            RecordingEventSink::new(),
            GovernanceConfig::for_testing(),
        )
    }

    fn create_treasury_text(engine: &mut TestEngine, height: u64) -> ProposalId {
        engine
            .create(
                TREASURY_MODULE,
                height,
                DomainName::from("treasury"),
                kinds::TEXT,
                "treasury proposal".to_string(),
                vec![],
                PROPOSER,
            )
            .unwrap()
    }

    // =============================================================================
    // QUORUM-GATED OUTCOMES
    // =============================================================================

    /// Quorum 3; 2 for / 1 against. The majority holds but quorum does
    /// not, so voting closes into Defeated and execution is impossible.
    #[test]
    fn test_two_for_one_against_is_defeated_under_quorum_three() {
        let mut engine = engine(3);
        let id = create_treasury_text(&mut engine, 100);

        engine.vote(TREASURY_MODULE, 105, id, true, addr(0x01)).unwrap();
        engine.vote(TREASURY_MODULE, 105, id, true, addr(0x02)).unwrap();
        engine.vote(TREASURY_MODULE, 105, id, false, addr(0x03)).unwrap();

        assert_eq!(engine.state(id, 105).unwrap(), ProposalState::Active);
        assert_eq!(engine.state(id, 112).unwrap(), ProposalState::Defeated);

        let err = engine.execute(TREASURY_MODULE, 112, id, PROPOSER).unwrap_err();
        assert!(matches!(err, GovernanceError::InvalidState { .. }));
    }

    /// Quorum 3; 4 for / 1 against. Succeeded at close, queued with
    /// eta 200, executed at 150 (the deadline is the only height bound).
    #[test]
    fn test_successful_proposal_queues_and_executes() {
        let mut engine = engine(3);
        let id = create_treasury_text(&mut engine, 100);

        for voter in [addr(0x01), addr(0x02), addr(0x03), addr(0x04)] {
            engine.vote(TREASURY_MODULE, 105, id, true, voter).unwrap();
        }
        engine.vote(TREASURY_MODULE, 105, id, false, addr(0x05)).unwrap();

        assert_eq!(engine.state(id, 112).unwrap(), ProposalState::Succeeded);

        engine.queue(TREASURY_MODULE, 112, id, 200).unwrap();
        assert_eq!(engine.state(id, 150).unwrap(), ProposalState::Queued);

        engine.execute(TREASURY_MODULE, 150, id, PROPOSER).unwrap();
        assert_eq!(engine.state(id, 150).unwrap(), ProposalState::Executed);
        assert_eq!(engine.state(id, 10_000).unwrap(), ProposalState::Executed);
    }

    /// Same setup, never executed: past eta + execution_window the
    /// proposal expires and execution is rejected for good.
    #[test]
    fn test_unexecuted_proposal_expires_at_deadline() {
        let mut engine = engine(3);
        let id = create_treasury_text(&mut engine, 100);

        for voter in [addr(0x01), addr(0x02), addr(0x03), addr(0x04)] {
            engine.vote(TREASURY_MODULE, 105, id, true, voter).unwrap();
        }
        engine.queue(TREASURY_MODULE, 112, id, 200).unwrap();

        // Deadline is 200 + 50.
        assert_eq!(engine.state(id, 249).unwrap(), ProposalState::Queued);
        assert_eq!(engine.state(id, 250).unwrap(), ProposalState::Expired);

        let err = engine.execute(TREASURY_MODULE, 251, id, PROPOSER).unwrap_err();
        assert_eq!(
            err,
            GovernanceError::InvalidState {
                id,
                actual: ProposalState::Expired,
                required: "Queued",
            }
        );
    }

    /// The oracle is consulted at every derivation: raising the quorum
    /// mid-flight flips an otherwise-succeeding proposal to Defeated,
    /// and lowering it back restores Succeeded.
    #[test]
    fn test_live_quorum_changes_flip_the_outcome() {
        let mut engine = engine(1);
        let id = create_treasury_text(&mut engine, 100);

        engine.vote(TREASURY_MODULE, 105, id, true, addr(0x01)).unwrap();
        engine.vote(TREASURY_MODULE, 105, id, true, addr(0x02)).unwrap();

        assert_eq!(engine.state(id, 112).unwrap(), ProposalState::Succeeded);

        engine.quorum_oracle().set_required("treasury", 3);
        assert_eq!(engine.state(id, 112).unwrap(), ProposalState::Defeated);

        engine.quorum_oracle().set_required("treasury", 2);
        assert_eq!(engine.state(id, 112).unwrap(), ProposalState::Succeeded);
    }

    // =============================================================================
    // LIVE AUTHORIZATION
    // =============================================================================

    /// Re-registering a domain redirects authority immediately, for
    /// proposals created under the old module too.
    #[test]
    fn test_registry_swap_redirects_authority_mid_flight() {
        let mut engine = engine(1);
        let id = create_treasury_text(&mut engine, 100);
        let new_module = addr(0x22);

        engine.vote(TREASURY_MODULE, 105, id, true, addr(0x01)).unwrap();

        engine.registry().register("treasury", new_module);

        // The old module is locked out of the in-flight proposal...
        let err = engine
            .vote(TREASURY_MODULE, 106, id, true, addr(0x02))
            .unwrap_err();
        assert!(matches!(err, GovernanceError::AccessDenied { .. }));

        // ...and the new module can drive it to completion.
        engine.vote(new_module, 106, id, true, addr(0x02)).unwrap();
        engine.queue(new_module, 112, id, 200).unwrap();
        engine.execute(new_module, 150, id, PROPOSER).unwrap();
        assert_eq!(engine.state(id, 150).unwrap(), ProposalState::Executed);
    }

    // =============================================================================
    // ID ALLOCATION
    // =============================================================================

    /// Ids stay dense and sequential no matter how many domains
    /// interleave create calls, and failed creates allocate nothing.
    #[test]
    fn test_sequential_ids_across_interleaved_domains() {
        let mut engine = engine(1);
        let domains = ["treasury", "validators", "grants"];
        let modules = [TREASURY_MODULE, addr(0x22), addr(0x33)];
        engine.registry().register("validators", modules[1]);
        engine.registry().register("grants", modules[2]);

        let mut rng = StdRng::seed_from_u64(7);
        for expected in 1..=30u64 {
            let pick = rng.gen_range(0..domains.len());
            let id = engine
                .create(
                    modules[pick],
                    100 + expected,
                    DomainName::from(domains[pick]),
                    kinds::TEXT,
                    format!("proposal {expected}"),
                    vec![],
                    addr(rng.gen()),
                )
                .unwrap();
            assert_eq!(id, expected);

            // An unauthorized create in between must not burn an id.
            let err = engine
                .create(
                    addr(0xEE),
                    100 + expected,
                    DomainName::from(domains[pick]),
                    kinds::TEXT,
                    "rejected".to_string(),
                    vec![],
                    addr(rng.gen()),
                )
                .unwrap_err();
            assert!(matches!(err, GovernanceError::AccessDenied { .. }));
        }

        assert_eq!(engine.proposal_count().unwrap(), 30);
    }

    /// Every distinct voter lands exactly one receipt; tallies equal the
    /// stance counts and repeat attempts change nothing.
    #[test]
    fn test_tallies_match_distinct_voters() {
        let mut engine = engine(1);
        let id = create_treasury_text(&mut engine, 100);

        let mut rng = StdRng::seed_from_u64(11);
        let mut fors = 0u64;
        let mut againsts = 0u64;
        for byte in 1..=20u8 {
            let support = rng.gen_bool(0.5);
            engine.vote(TREASURY_MODULE, 105, id, support, addr(byte)).unwrap();
            if support {
                fors += 1;
            } else {
                againsts += 1;
            }

            let err = engine
                .vote(TREASURY_MODULE, 105, id, !support, addr(byte))
                .unwrap_err();
            assert!(matches!(err, GovernanceError::AlreadyVoted { .. }));
        }

        let proposal = engine.proposal(id).unwrap();
        assert_eq!(proposal.votes_for, fors);
        assert_eq!(proposal.votes_against, againsts);
        assert_eq!(proposal.total_votes(), 20);
        for byte in 1..=20u8 {
            assert!(engine.receipt(id, &addr(byte)).unwrap().is_some());
        }
    }

    // =============================================================================
    // ADMINISTRATIVE ACTIONS END TO END
    // =============================================================================

    /// A parameters domain rewrites the engine timing; proposals created
    /// afterwards in any domain pick up the new windows.
    #[test]
    fn test_timing_update_flows_across_domains() {
        let mut engine = engine(1);
        let params_module = addr(0x44);
        engine.registry().register("params", params_module);

        let id = engine
            .create(
                params_module,
                100,
                DomainName::from("params"),
                kinds::UPDATE_TIMING,
                "stretch the windows".to_string(),
                AdminAction::UpdateTiming(TimingParams {
                    start_delay: 5,
                    voting_period: 40,
                    execution_window: 200,
                })
                .encode_params(),
                PROPOSER,
            )
            .unwrap();
        engine.vote(params_module, 105, id, true, addr(0x01)).unwrap();
        engine.queue(params_module, 112, id, 130).unwrap();
        engine.execute(params_module, 120, id, PROPOSER).unwrap();

        let treasury_id = create_treasury_text(&mut engine, 300);
        let proposal = engine.proposal(treasury_id).unwrap();
        assert_eq!(proposal.start_height, 305);
        assert_eq!(proposal.end_height, 345);
    }

    /// A cancel payload is bound to its target's domain: the nested
    /// cancellation runs with the executing module as caller, so a
    /// params-domain proposal cannot withdraw a treasury proposal, and
    /// the failed execution leaves no trace anywhere.
    #[test]
    fn test_cross_domain_cancel_payload_rolls_back() {
        let mut engine = engine(1);
        let params_module = addr(0x44);
        engine.registry().register("params", params_module);

        let target = create_treasury_text(&mut engine, 100);
        let id = engine
            .create(
                params_module,
                100,
                DomainName::from("params"),
                kinds::CANCEL_PROPOSAL,
                "withdraw the treasury proposal".to_string(),
                AdminAction::CancelProposal(CancelParams { id: target }).encode_params(),
                PROPOSER,
            )
            .unwrap();
        engine.vote(params_module, 105, id, true, addr(0x01)).unwrap();
        engine.queue(params_module, 112, id, 150).unwrap();

        let events_before = engine.event_sink().events().len();
        let err = engine.execute(params_module, 120, id, PROPOSER).unwrap_err();
        assert!(matches!(err, GovernanceError::PayloadFailure { .. }));

        // The rollback spans both proposals and the notification stream.
        assert!(!engine.proposal(id).unwrap().executed);
        assert!(!engine.proposal(target).unwrap().cancelled);
        assert_eq!(engine.event_sink().events().len(), events_before);
        assert_eq!(engine.state(id, 120).unwrap(), ProposalState::Queued);

        // The same payload driven from the target's own domain succeeds.
        let retry = engine
            .create(
                TREASURY_MODULE,
                120,
                DomainName::from("treasury"),
                kinds::CANCEL_PROPOSAL,
                "withdraw it properly".to_string(),
                AdminAction::CancelProposal(CancelParams { id: target }).encode_params(),
                PROPOSER,
            )
            .unwrap();
        engine.vote(TREASURY_MODULE, 125, retry, true, addr(0x02)).unwrap();
        engine.queue(TREASURY_MODULE, 132, retry, 170).unwrap();
        engine.execute(TREASURY_MODULE, 140, retry, PROPOSER).unwrap();

        assert!(engine.proposal(target).unwrap().cancelled);
        assert_eq!(engine.state(target, 140).unwrap(), ProposalState::Cancelled);
    }

    /// Cancellation is terminal at every later height and blocks both
    /// remaining mutating operations.
    #[test]
    fn test_cancellation_is_terminal_across_heights() {
        let mut engine = engine(1);
        let id = create_treasury_text(&mut engine, 100);

        engine.vote(TREASURY_MODULE, 105, id, true, addr(0x01)).unwrap();
        engine.cancel(TREASURY_MODULE, 106, id, PROPOSER).unwrap();

        for height in [106, 111, 112, 250, 100_000] {
            assert_eq!(engine.state(id, height).unwrap(), ProposalState::Cancelled);
        }
        assert!(engine.vote(TREASURY_MODULE, 107, id, true, addr(0x02)).is_err());
        assert!(engine.execute(TREASURY_MODULE, 150, id, PROPOSER).is_err());
    }
}
