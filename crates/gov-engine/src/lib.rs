//! # gov-engine
//!
//! Proposal lifecycle and voting state machine for ledger-hosted
//! governance domains.
//!
//! ## Role in System
//!
//! A domain's governance module drives the [`GovernanceApi`] operations
//! (create / vote / queue / execute / cancel); the engine authorizes the
//! caller against the live module registry, keeps proposal records in the
//! point-lookup store, consults the domain's quorum oracle whenever it
//! derives a state, and publishes lifecycle notifications through the
//! event sink. The host ledger supplies the current height and serializes
//! operations into a total order.
//!
//! ## Core Guarantees
//!
//! | Guarantee | Enforcement |
//! |-----------|-------------|
//! | Sequential ids, no gaps or reuse | `service.rs` - the engine alone advances the running total |
//! | Derived, uncached state | `domain/lifecycle.rs` - pure function of record, height, live quorum |
//! | At most one vote per (proposal, voter) | `service.rs` - receipt check before tally |
//! | At-most-once execution | `service.rs` - executed flag staged before the payload action runs |
//! | Zero partial effect on failure | `staging.rs` - per-operation write buffer, commit on success only |
//! | Closed admin-action surface | `domain/payload.rs` - tagged handler table, no open-ended dispatch |
//!
//! ## Example
//!
//! ```
//! use gov_engine::adapters::{
//!     InMemoryModuleRegistry, InMemoryProposalStore, RecordingEventSink, StaticQuorumOracle,
//! };
//! use gov_engine::domain::{kinds, Address, DomainName, GovernanceConfig, ProposalState};
//! use gov_engine::ports::GovernanceApi;
//! use gov_engine::service::GovernanceEngine;
//!
//! let module = Address::new([0x11; 20]);
//! let registry = InMemoryModuleRegistry::new();
//! registry.register("treasury", module);
//!
//! let mut engine = GovernanceEngine::new(
//!     InMemoryProposalStore::new(),
//!     registry,
//!     StaticQuorumOracle::new(1),
//!     RecordingEventSink::new(),
//!     GovernanceConfig::for_testing(),
//! );
//!
//! let proposer = Address::new([0xAA; 20]);
//! let id = engine
//!     .create(
//!         module,
//!         100,
//!         DomainName::from("treasury"),
//!         kinds::TEXT,
//!         "signal support".to_string(),
//!         vec![],
//!         proposer,
//!     )
//!     .unwrap();
//!
//! engine.vote(module, 105, id, true, proposer).unwrap();
//! assert_eq!(engine.state(id, 112).unwrap(), ProposalState::Succeeded);
//! ```

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod guard;
pub mod ports;
pub mod service;
pub mod staging;

pub use domain::{
    derive_state, is_terminal, Address, Bytes, DomainName, GovernanceConfig, Height, Proposal,
    ProposalId, ProposalState, VoteReceipt,
};
pub use errors::{GovernanceError, StoreError};
pub use events::GovernanceEvent;
pub use guard::AccessGuard;
pub use ports::{EventSink, GovernanceApi, ModuleRegistry, ProposalStore, QuorumOracle};
pub use service::GovernanceEngine;
