//! GA error type.

/// Errors surfaced by the GA engine.
///
/// Every variant is fatal: the engine never recovers from them and never
/// returns a partial result alongside one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("distance provider has no cities")]
    EmptyInstance,

    #[error("population has no members")]
    EmptyPopulation,

    #[error("tour has zero total distance; fitness is undefined")]
    DegenerateDistance,

    #[error("sequence is not a permutation of 0..{len}")]
    NotAPermutation { len: usize },

    #[error("parents come from different city sets (lengths {left} and {right})")]
    ParentMismatch { left: usize, right: usize },

    #[error("tour visits {tour} cities but the distance provider has {provider}")]
    UniverseMismatch { tour: usize, provider: usize },

    #[error("cannot select {requested} distinct individuals from {available}")]
    SelectionOverflow { requested: usize, available: usize },
}
