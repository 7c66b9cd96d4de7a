//! # Admin Actions
//!
//! The closed set of administrative actions a proposal may trigger on
//! successful execution. The proposal's `kind` tag selects the handler;
//! the payload bytes carry the handler's parameters as JSON. Anything
//! outside this table is an execution failure, never a dispatch.

use crate::domain::value_objects::{Height, ProposalId};
use serde::{Deserialize, Serialize};

/// Action kind tags.
pub mod kinds {
    /// Signalling proposal. No administrative effect.
    pub const TEXT: u32 = 0;

    /// Replace the engine's timing configuration.
    pub const UPDATE_TIMING: u32 = 1;

    /// Cancel another proposal on behalf of its proposer.
    pub const CANCEL_PROPOSAL: u32 = 2;

    /// Returns true if the tag selects a known handler.
    #[must_use]
    pub fn is_known(kind: u32) -> bool {
        matches!(kind, TEXT | UPDATE_TIMING | CANCEL_PROPOSAL)
    }
}

/// Parameters for [`kinds::UPDATE_TIMING`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingParams {
    pub start_delay: Height,
    pub voting_period: Height,
    pub execution_window: Height,
}

/// Parameters for [`kinds::CANCEL_PROPOSAL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelParams {
    pub id: ProposalId,
}

/// A decoded administrative action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminAction {
    /// No effect.
    Text,
    /// Replace the timing configuration.
    UpdateTiming(TimingParams),
    /// Cancel the target proposal.
    CancelProposal(CancelParams),
}

/// Why a payload failed to decode into an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The kind tag selects no handler.
    UnknownKind(u32),
    /// The payload bytes do not parse as the handler's parameters.
    Malformed(String),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownKind(kind) => write!(f, "unknown action kind {kind}"),
            Self::Malformed(reason) => write!(f, "malformed action payload: {reason}"),
        }
    }
}

impl AdminAction {
    /// Decodes an action from a proposal's kind tag and payload bytes.
    ///
    /// Text proposals ignore their payload entirely; the other handlers
    /// parse it as JSON parameters.
    pub fn decode(kind: u32, payload: &[u8]) -> Result<Self, DecodeError> {
        match kind {
            kinds::TEXT => Ok(Self::Text),
            kinds::UPDATE_TIMING => {
                let params: TimingParams = serde_json::from_slice(payload)
                    .map_err(|err| DecodeError::Malformed(err.to_string()))?;
                if params.voting_period == 0 {
                    return Err(DecodeError::Malformed(
                        "voting_period must be nonzero".to_string(),
                    ));
                }
                Ok(Self::UpdateTiming(params))
            }
            kinds::CANCEL_PROPOSAL => {
                let params: CancelParams = serde_json::from_slice(payload)
                    .map_err(|err| DecodeError::Malformed(err.to_string()))?;
                Ok(Self::CancelProposal(params))
            }
            other => Err(DecodeError::UnknownKind(other)),
        }
    }

    /// Encodes the action's parameters as payload bytes.
    ///
    /// Convenience for callers assembling proposals; `decode` is the
    /// inverse for the matching kind tag.
    #[must_use]
    pub fn encode_params(&self) -> Vec<u8> {
        match self {
            Self::Text => Vec::new(),
            // Serializing plain structs of integers cannot fail.
            Self::UpdateTiming(params) => serde_json::to_vec(params).unwrap_or_default(),
            Self::CancelProposal(params) => serde_json::to_vec(params).unwrap_or_default(),
        }
    }

    /// The kind tag that selects this action.
    #[must_use]
    pub fn kind(&self) -> u32 {
        match self {
            Self::Text => kinds::TEXT,
            Self::UpdateTiming(_) => kinds::UPDATE_TIMING,
            Self::CancelProposal(_) => kinds::CANCEL_PROPOSAL,
        }
    }
}
