//! Error types shared by the tour representation, the operators and the engine.

/// Convenience alias used throughout the crate.
pub type TourResult<T> = Result<T, TourError>;

/// Reasons a sequence of point indices is not a valid anchored tour.
///
/// These only surface from [`Genome::new`](crate::Genome::new) and from
/// consistency checks; the operators shipped with the crate never produce an
/// invalid genome.
///
/// # Examples
/// ```
/// use tourga::{Genome, GenomeError};
/// let err = Genome::new(vec![0, 1, 1, 0], 3).unwrap_err();
/// assert_eq!(err, GenomeError::DuplicateIndex { index: 1 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenomeError {
    /// The sequence does not hold `n_points + 1` entries.
    #[error("genome has {found} entries but a tour over {n_points} points needs {expected}")]
    LengthMismatch {
        /// Number of points the tour should visit.
        n_points: usize,
        /// Expected sequence length.
        expected: usize,
        /// Actual sequence length.
        found: usize,
    },
    /// The first or last entry is not the anchor.
    #[error("tour must start and end at the anchor (found {first} .. {last})")]
    AnchorNotFixed {
        /// First entry of the sequence.
        first: usize,
        /// Last entry of the sequence.
        last: usize,
    },
    /// An interior index appears more than once.
    #[error("point {index} is visited more than once")]
    DuplicateIndex {
        /// The repeated index.
        index: usize,
    },
    /// An interior index is the anchor or lies outside the point set.
    #[error("interior index {index} is outside 1..{n_points}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of points the tour should visit.
        n_points: usize,
    },
}

/// Errors reported while building point sets, validating settings or
/// constructing the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TourError {
    /// Fewer than two points were supplied, so no tour exists.
    #[error("at least two points are required to build a tour (received {found})")]
    EmptyPointSet {
        /// Number of points supplied.
        found: usize,
    },
    /// A coordinate was NaN or infinite.
    #[error("point `{name}` has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Name of the offending point.
        name: String,
    },
    /// The population size was zero.
    #[error("population size must be greater than zero (received {0})")]
    InvalidPopulationSize(usize),
    /// The mutation rate was outside `[0, 1]`.
    #[error("mutation rate must be within [0, 1] (received {0})")]
    InvalidMutationRate(f64),
    /// More elites were requested than the population holds.
    #[error("elite count {elite_count} exceeds population size {population_size}")]
    InvalidEliteCount {
        /// Requested number of elites.
        elite_count: usize,
        /// Configured population size.
        population_size: usize,
    },
    /// A seeded population does not match the configured size.
    #[error("seeded population holds {found} tours but the engine expects {expected}")]
    PopulationSizeMismatch {
        /// Configured population size.
        expected: usize,
        /// Number of tours supplied.
        found: usize,
    },
    /// Tournament selection needs at least one contestant.
    #[error("tournament size must be at least one (received {0})")]
    InvalidTournamentSize(usize),
    /// A genome failed validation.
    #[error(transparent)]
    Genome(#[from] GenomeError),
}
