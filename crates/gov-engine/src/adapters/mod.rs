//! In-memory implementations of the outbound ports.

pub mod event_log;
pub mod memory_store;
pub mod quorum;
pub mod registry;

pub use event_log::{RecordingEventSink, TracingEventSink};
pub use memory_store::InMemoryProposalStore;
pub use quorum::StaticQuorumOracle;
pub use registry::InMemoryModuleRegistry;
