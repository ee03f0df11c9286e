//! Engine configuration.

use crate::error::{TourError, TourResult};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Number of tours per generation used when nothing else is configured.
pub const DEFAULT_POPULATION_SIZE: usize = 50;
/// Probability that a child gets a swap mutation.
pub const DEFAULT_MUTATION_RATE: f64 = 0.05;
/// Number of best tours copied unchanged into the next generation.
pub const DEFAULT_ELITE_COUNT: usize = 10;
/// Number of contestants per tournament.
pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

/// A settings object holding every knob of the engine.
///
/// You should usually instantiate this using the default method. All member
/// variables are public, so in most cases you simply reassign them:
/// ```
/// let mut settings = tourga::Settings::default();
/// settings.population_size = 20;
/// settings.seed = Some(7);
/// assert!(settings.validate().is_ok());
/// ```
/// The `with_*` helpers allow the same in a single expression:
/// ```
/// let settings = tourga::Settings::default().with_elite_count(2).with_mutation_rate(0.2);
/// assert_eq!(settings.elite_count, 2);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// The number of tours per generation
    pub population_size: usize,
    /// The probability that a freshly bred child is mutated
    pub mutation_rate: f64,
    /// The number of best tours carried unchanged into the next generation
    pub elite_count: usize,
    /// The number of tours sampled per tournament
    pub tournament_size: usize,
    /// Seed for the random source; `None` draws one from the operating system
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            elite_count: DEFAULT_ELITE_COUNT,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            seed: None,
        }
    }
}

impl Settings {
    /// Sets the population size.
    #[must_use]
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the mutation rate.
    #[must_use]
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the elite count.
    #[must_use]
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = count;
        self
    }

    /// Sets the tournament size.
    #[must_use]
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the settings describe a runnable engine.
    ///
    /// # Errors
    /// Returns [`TourError`] when the population is empty, the mutation rate
    /// lies outside `[0, 1]`, more elites than tours are requested, or the
    /// tournament size is zero.
    pub fn validate(&self) -> TourResult<()> {
        if self.population_size == 0 {
            return Err(TourError::InvalidPopulationSize(self.population_size));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TourError::InvalidMutationRate(self.mutation_rate));
        }
        if self.elite_count > self.population_size {
            return Err(TourError::InvalidEliteCount {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        if self.tournament_size == 0 {
            return Err(TourError::InvalidTournamentSize(self.tournament_size));
        }
        Ok(())
    }

    /// Builds the random source described by [`Self::seed`].
    ///
    /// # Examples
    /// ```
    /// use rand::Rng;
    /// let settings = tourga::Settings::default().with_seed(9);
    /// let a: u64 = settings.rng().gen();
    /// let b: u64 = settings.rng().gen();
    /// assert_eq!(a, b);
    /// ```
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
