//! Engine error taxonomy.
//!
//! Every rejected action returns an `EngineError` and leaves the run state
//! untouched: validation always happens before mutation. Errors are
//! classified by [`ErrorSeverity`] so callers can tell a rejected player
//! input apart from a broken invariant.

use thiserror::Error;

use super::entity::RuneforgeId;
use crate::artefacts::ArtefactId;

/// Severity level of an engine error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Invalid player input; the action is rejected and play continues.
    Recoverable,

    /// An upstream invariant broke. Correct callers never see this.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Internal => "internal",
        }
    }
}

/// Errors returned by engine transitions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A draft or placement action violates a precondition.
    #[error("invalid selection: {reason}")]
    InvalidSelection { reason: SelectionError },

    /// Center-pool draft attempted while a runeforge is still accessible.
    #[error("center pool unavailable: {accessible} still has runes")]
    SourceUnavailable { accessible: RuneforgeId },

    /// Artefact purchase without enough arcane dust.
    #[error("insufficient funds for {artefact:?}: costs {cost}, have {available}")]
    InsufficientFunds {
        artefact: ArtefactId,
        cost: u64,
        available: u64,
    },

    /// Engine state contradicts one of its own invariants.
    #[error("consistency violation: {0}")]
    ConsistencyViolation(String),
}

impl EngineError {
    /// Shorthand for an `InvalidSelection` error.
    #[must_use]
    pub const fn invalid(reason: SelectionError) -> Self {
        Self::InvalidSelection { reason }
    }

    /// Classify this error.
    #[must_use]
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConsistencyViolation(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Recoverable,
        }
    }
}

/// Why a selection or placement was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("a selection is already in flight")]
    SelectionInFlight,

    #[error("no selection is in flight")]
    NothingSelected,

    #[error("source is disabled")]
    SourceDisabled,

    #[error("source is empty")]
    SourceEmpty,

    #[error("source holds no runes of the requested type")]
    TypeNotInSource,

    #[error("unknown runeforge {0}")]
    UnknownRuneforge(RuneforgeId),

    #[error("pattern line {0} does not exist")]
    UnknownLine(usize),

    #[error("pattern line {0} is locked")]
    LineLocked(usize),

    #[error("pattern line {0} already holds a different rune type")]
    LineTypeMismatch(usize),

    #[error("pattern line {0} is already full")]
    LineFull(usize),

    #[error("wall row {0} already holds that rune type")]
    WallRowHasType(usize),

    #[error("pattern line {0} is not complete")]
    LineNotComplete(usize),

    #[error("a completed pattern line must be resolved first")]
    ResolutionPending,

    #[error("the run is not in progress")]
    RunNotInProgress,

    #[error("the current game has not been won")]
    GameNotWon,

    #[error("no deck-building offer is open")]
    NoOfferOpen,

    #[error("picked {picked} runes but only {allowed} allowed")]
    TooManyPicks { picked: usize, allowed: usize },

    #[error("rune is not part of the offer or deck")]
    UnknownRune,

    #[error("deck cannot shrink below {0} runes")]
    DeckTooSmall(usize),

    #[error("artefact {0:?} is not owned")]
    ArtefactNotOwned(ArtefactId),

    #[error("artefact {0:?} is already owned")]
    ArtefactAlreadyOwned(ArtefactId),

    #[error("artefact selection is full")]
    ArtefactSelectionFull,

    #[error("invalid run configuration: {0}")]
    InvalidConfig(&'static str),
}

impl From<SelectionError> for EngineError {
    fn from(reason: SelectionError) -> Self {
        Self::InvalidSelection { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_classification() {
        assert_eq!(
            EngineError::invalid(SelectionError::SelectionInFlight).severity(),
            ErrorSeverity::Recoverable
        );
        assert_eq!(
            EngineError::SourceUnavailable { accessible: RuneforgeId(0) }.severity(),
            ErrorSeverity::Recoverable
        );
        assert_eq!(
            EngineError::ConsistencyViolation("cell occupied".into()).severity(),
            ErrorSeverity::Internal
        );
    }

    #[test]
    fn test_display() {
        let err: EngineError = SelectionError::LineLocked(2).into();
        assert_eq!(err.to_string(), "invalid selection: pattern line 2 is locked");

        let err = EngineError::InsufficientFunds {
            artefact: ArtefactId::Ring,
            cost: 200,
            available: 50,
        };
        assert_eq!(err.to_string(), "insufficient funds for Ring: costs 200, have 50");
    }
}
