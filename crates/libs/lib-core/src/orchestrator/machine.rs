//! Pure submission state machine.
//!
//! ```text
//! Idle ─Submit─▶ Validating ─Validated─▶ Submitting ─Signed─▶ AwaitingConfirmation
//!   ▲                │                        │                     │
//!   │             Rejected                 Failed            Confirmed / Failed
//!   │                ▼                        ▼                     ▼
//!   └──────────── Idle(outcome) ◀──Settled── Settling ◀─────────────┘
//! ```
//!
//! [`transition`] never performs I/O; the orchestrator feeds it events as its
//! awaited steps complete.

use crate::error::PreconditionError;
use std::fmt;
use thiserror::Error;

/// How the last attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { signature: String },
    /// Refused locally before any network call.
    Rejected(PreconditionError),
    /// Failed after validation; message kept verbatim.
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState {
    Idle(Option<Outcome>),
    Validating,
    Submitting,
    AwaitingConfirmation { signature: String },
    Settling { signature: String },
}

impl Default for OperationState {
    fn default() -> Self {
        OperationState::Idle(None)
    }
}

impl OperationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, OperationState::Idle(_))
    }

    /// A submission in this state would interleave with another one.
    pub fn is_busy(&self) -> bool {
        !self.is_idle()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            OperationState::Idle(outcome) => outcome.as_ref(),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OperationState::Idle(_) => "idle",
            OperationState::Validating => "validating",
            OperationState::Submitting => "submitting",
            OperationState::AwaitingConfirmation { .. } => "awaiting-confirmation",
            OperationState::Settling { .. } => "settling",
        }
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Explicit user submission.
    Submit,
    Validated,
    Rejected(PreconditionError),
    /// The wallet produced a signature (and the network accepted it).
    Signed { signature: String },
    Confirmed,
    Settled,
    Failed(String),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Submit => "submit",
            Event::Validated => "validated",
            Event::Rejected(_) => "rejected",
            Event::Signed { .. } => "signed",
            Event::Confirmed => "confirmed",
            Event::Settled => "settled",
            Event::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// A submission arrived while another one is in flight.
    #[error("operation already in progress ({0})")]
    Busy(&'static str),

    #[error("event '{event}' is not valid in state '{state}'")]
    Invalid {
        state: &'static str,
        event: &'static str,
    },
}

/// Next state for `event` in `state`.
pub fn transition(state: &OperationState, event: Event) -> Result<OperationState, TransitionError> {
    use OperationState as S;

    match (state, event) {
        (S::Idle(_), Event::Submit) => Ok(S::Validating),
        (busy, Event::Submit) => Err(TransitionError::Busy(busy.name())),

        (S::Validating, Event::Validated) => Ok(S::Submitting),
        (S::Validating, Event::Rejected(reason)) => Ok(S::Idle(Some(Outcome::Rejected(reason)))),

        (S::Submitting, Event::Signed { signature }) => Ok(S::AwaitingConfirmation { signature }),
        (S::AwaitingConfirmation { signature }, Event::Confirmed) => Ok(S::Settling {
            signature: signature.clone(),
        }),
        (S::Settling { signature }, Event::Settled) => Ok(S::Idle(Some(Outcome::Success {
            signature: signature.clone(),
        }))),

        (
            S::Validating | S::Submitting | S::AwaitingConfirmation { .. } | S::Settling { .. },
            Event::Failed(message),
        ) => Ok(S::Idle(Some(Outcome::Failure(message)))),

        (state, event) => Err(TransitionError::Invalid {
            state: state.name(),
            event: event.name(),
        }),
    }
}
