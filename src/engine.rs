//! High-level generational engine.
//!
//! The [`TourGa`] builder wires the operators defined in [`crate::ops`]
//! together. Users construct the engine through [`TourGa::builder`], optionally
//! swap operators or settings, and then drive it one generation at a time with
//! [`TourGa::step`] or in a batch with [`TourGa::run`].

use crate::core::history::{GenerationReport, RunHistory};
use crate::core::{Genome, PointSet, Population};
use crate::error::{TourError, TourResult};
use crate::ops::fitness::mean;
use crate::ops::{
    CrossoverOperator, FitnessEvaluator, MutationOperator, OrderCrossover, SelectionOperator,
    SwapMutation, TournamentSelection,
};
use crate::settings::Settings;
use rand::{Rng, RngCore};
use std::sync::atomic::{AtomicBool, Ordering};

/// Combines primitive stop conditions.
///
/// Conditions are checked against the engine's whole [`RunHistory`], so
/// generation limits count every generation the engine has run.
#[derive(Debug, Clone)]
pub enum StopCondition {
    /// Stop when the generation counter reaches this limit.
    MaxGenerations {
        /// Maximum number of generations to run.
        limit: usize,
    },
    /// Stop when the best cost drops to or below the provided value.
    TargetCostBelow {
        /// Cost that ends the run.
        threshold: f64,
    },
    /// Stop after this many consecutive generations without a cheaper tour.
    Stagnation {
        /// Number of non-improving generations tolerated.
        generations: usize,
    },
    /// Logical OR that triggers when either child condition is met.
    Or(Box<StopCondition>, Box<StopCondition>),
}

impl StopCondition {
    /// Creates a stop condition that limits the number of generations.
    #[must_use]
    pub fn max_generations(limit: usize) -> Self {
        Self::MaxGenerations { limit }
    }

    /// Creates a stop condition that targets a best cost threshold.
    #[must_use]
    pub fn target_cost_below(threshold: f64) -> Self {
        Self::TargetCostBelow { threshold }
    }

    /// Creates a stop condition that fires when the best cost stalls.
    #[must_use]
    pub fn stagnation(generations: usize) -> Self {
        Self::Stagnation { generations }
    }

    /// Combines two stop conditions using logical OR semantics.
    #[must_use]
    pub fn or(self, other: StopCondition) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Evaluates the condition against a run history.
    #[must_use]
    pub fn is_met(&self, history: &RunHistory) -> bool {
        match self {
            Self::MaxGenerations { limit } => history.generations() >= *limit,
            Self::TargetCostBelow { threshold } => {
                history.best_cost().map_or(false, |cost| cost <= *threshold)
            }
            Self::Stagnation { generations } => {
                history.generations() > 0
                    && history.generations_without_improvement() >= *generations
            }
            Self::Or(left, right) => left.is_met(history) || right.is_met(history),
        }
    }
}

/// Phase of the generation step the engine last completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Waiting for the next step.
    Idle,
    /// Costs of the current generation are known.
    Evaluated,
    /// The current generation is ordered by cost.
    Sorted,
    /// The next generation has been installed.
    Replaced,
}

/// Why [`TourGa::run`] returned.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The stop condition was met.
    Condition,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Outcome of [`TourGa::run`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Total number of generations the engine has run.
    pub generations: usize,
    /// Latest generation report, absent when the run was cancelled before the
    /// first generation.
    pub last: Option<GenerationReport>,
    /// Why the run ended.
    pub stop_reason: StopReason,
}

impl RunSummary {
    /// Cheapest tour of the latest generation.
    #[must_use]
    pub fn best(&self) -> Option<&Genome> {
        self.last.as_ref().map(|report| &report.best)
    }

    /// Cost of [`Self::best`].
    #[must_use]
    pub fn best_cost(&self) -> Option<f64> {
        self.last.as_ref().map(|report| report.best_cost)
    }
}

/// Builder returned by [`TourGa::builder`].
pub struct TourGaBuilder {
    points: PointSet,
    settings: Settings,
    initial_population: Option<Population>,
    selection: Option<Box<dyn SelectionOperator>>,
    crossover: Option<Box<dyn CrossoverOperator>>,
    mutation: Option<Box<dyn MutationOperator>>,
}

impl TourGaBuilder {
    /// Replaces every setting at once.
    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Configures the number of tours per generation.
    #[must_use]
    pub fn population_size(mut self, size: usize) -> Self {
        self.settings.population_size = size;
        self
    }

    /// Configures the swap mutation probability.
    #[must_use]
    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.settings.mutation_rate = rate;
        self
    }

    /// Configures how many of the best tours survive unchanged.
    #[must_use]
    pub fn elite_count(mut self, count: usize) -> Self {
        self.settings.elite_count = count;
        self
    }

    /// Configures the number of contestants per tournament.
    #[must_use]
    pub fn tournament_size(mut self, size: usize) -> Self {
        self.settings.tournament_size = size;
        self
    }

    /// Starts from the given tours instead of random ones.
    #[must_use]
    pub fn initial_population(mut self, population: Population) -> Self {
        self.initial_population = Some(population);
        self
    }

    /// Replaces the selection operator.
    #[must_use]
    pub fn selection(mut self, operator: impl SelectionOperator + 'static) -> Self {
        self.selection = Some(Box::new(operator));
        self
    }

    /// Replaces the crossover operator.
    #[must_use]
    pub fn crossover(mut self, operator: impl CrossoverOperator + 'static) -> Self {
        self.crossover = Some(Box::new(operator));
        self
    }

    /// Replaces the mutation operator.
    #[must_use]
    pub fn mutation(mut self, operator: impl MutationOperator + 'static) -> Self {
        self.mutation = Some(Box::new(operator));
        self
    }

    /// Finalizes the builder into a [`TourGa`] engine, drawing the initial
    /// population from `rng` unless one was supplied.
    ///
    /// # Errors
    /// Returns [`TourError`] when the settings are invalid, or when a supplied
    /// initial population has the wrong size or holds an invalid tour.
    pub fn build<R: Rng>(self, rng: &mut R) -> TourResult<TourGa> {
        self.settings.validate()?;
        let n_points = self.points.len();
        let population = match self.initial_population {
            Some(population) => {
                if population.len() != self.settings.population_size {
                    return Err(TourError::PopulationSizeMismatch {
                        expected: self.settings.population_size,
                        found: population.len(),
                    });
                }
                for genome in population.iter() {
                    genome.validate(n_points)?;
                }
                population
            }
            None => Population::random(self.settings.population_size, n_points, rng),
        };
        let selection: Box<dyn SelectionOperator> = match self.selection {
            Some(operator) => operator,
            None => Box::new(TournamentSelection::new(self.settings.tournament_size)?),
        };
        let crossover: Box<dyn CrossoverOperator> = match self.crossover {
            Some(operator) => operator,
            None => Box::new(OrderCrossover::new()),
        };
        let mutation: Box<dyn MutationOperator> = match self.mutation {
            Some(operator) => operator,
            None => Box::new(SwapMutation::new(self.settings.mutation_rate)?),
        };
        tracing::info!(
            points = n_points,
            population_size = self.settings.population_size,
            elite_count = self.settings.elite_count,
            tournament_size = self.settings.tournament_size,
            mutation_rate = self.settings.mutation_rate,
            "tour engine ready"
        );
        Ok(TourGa {
            points: self.points,
            settings: self.settings,
            population,
            selection,
            crossover,
            mutation,
            generation: 1,
            state: EngineState::Idle,
            history: RunHistory::new(),
            last: None,
        })
    }
}

/// Generational genetic algorithm over anchored tours.
///
/// # Examples
/// ```
/// use tourga::{instances, TourGa};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let mut ga = TourGa::builder(instances::unit_square())
///     .population_size(20)
///     .elite_count(2)
///     .build(&mut rng)
///     .unwrap();
/// let first = ga.step(&mut rng);
/// let second = ga.step(&mut rng);
/// assert_eq!((first.generation, second.generation), (1, 2));
/// assert!(second.best_cost <= first.best_cost);
/// ```
pub struct TourGa {
    points: PointSet,
    settings: Settings,
    population: Population,
    selection: Box<dyn SelectionOperator>,
    crossover: Box<dyn CrossoverOperator>,
    mutation: Box<dyn MutationOperator>,
    generation: usize,
    state: EngineState,
    history: RunHistory,
    last: Option<GenerationReport>,
}

impl TourGa {
    /// Creates a builder used to configure the engine.
    #[must_use]
    pub fn builder(points: PointSet) -> TourGaBuilder {
        TourGaBuilder {
            points,
            settings: Settings::default(),
            initial_population: None,
            selection: None,
            crossover: None,
            mutation: None,
        }
    }

    /// Runs one generation: evaluate, sort, report, breed the next
    /// generation and install it.
    ///
    /// The returned report describes the generation that was just evaluated;
    /// its best tour is also the first elite of the next generation.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> GenerationReport {
        let rng: &mut dyn RngCore = rng;

        let mut fitness = self.points.evaluate(self.population.genomes());
        self.state = EngineState::Evaluated;

        self.population.sort_by_fitness(&mut fitness);
        self.state = EngineState::Sorted;

        let report = GenerationReport {
            generation: self.generation,
            best_cost: fitness.first().copied().unwrap_or(f64::INFINITY),
            mean_cost: mean(&fitness),
            best: self
                .population
                .best()
                .cloned()
                .unwrap_or_else(|| Genome::identity(self.points.len())),
            second_best: self.population.second_best().cloned(),
        };
        tracing::debug!(
            generation = report.generation,
            best_cost = report.best_cost,
            mean_cost = report.mean_cost,
            "generation evaluated"
        );
        self.history.record(&report);

        let next = self.breed(rng);
        self.population.replace(next);
        self.state = EngineState::Replaced;

        self.generation += 1;
        self.state = EngineState::Idle;
        self.last = Some(report.clone());
        report
    }

    fn breed(&self, rng: &mut dyn RngCore) -> Population {
        let size = self.settings.population_size;
        let current = self.population.genomes();
        let mut next = Population::with_capacity(size);
        for elite in current.iter().take(self.settings.elite_count) {
            next.push(elite.clone());
        }
        while next.len() < size {
            let Some((parent_a, parent_b)) = self.selection.select_pair(current, &self.points, rng)
            else {
                break;
            };
            let mut child = self.crossover.crossover(parent_a, parent_b, rng);
            self.mutation.mutate_in_place(&mut child, rng);
            debug_assert_eq!(child.validate(self.points.len()), Ok(()));
            next.push(child);
        }
        next
    }

    /// Steps until `stop` is met or `cancel` is raised.
    ///
    /// Both are checked between generations only; a generation that has
    /// started always completes.
    pub fn run<R: Rng>(
        &mut self,
        rng: &mut R,
        stop: &StopCondition,
        cancel: &AtomicBool,
    ) -> RunSummary {
        self.run_observed(rng, stop, cancel, |_| {})
    }

    /// Like [`Self::run`], handing every generation report to `observer`
    /// before the stop condition is checked.
    ///
    /// # Examples
    /// ```
    /// use std::sync::atomic::AtomicBool;
    /// use tourga::{instances, StopCondition, TourGa};
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    /// let mut ga = TourGa::builder(instances::regular_polygon(8, 1.0))
    ///     .population_size(10)
    ///     .elite_count(1)
    ///     .build(&mut rng)
    ///     .unwrap();
    /// let mut seen = Vec::new();
    /// let summary = ga.run_observed(
    ///     &mut rng,
    ///     &StopCondition::max_generations(5),
    ///     &AtomicBool::new(false),
    ///     |report| seen.push(report.generation),
    /// );
    /// assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    /// assert_eq!(summary.generations, 5);
    /// ```
    pub fn run_observed<R, F>(
        &mut self,
        rng: &mut R,
        stop: &StopCondition,
        cancel: &AtomicBool,
        mut observer: F,
    ) -> RunSummary
    where
        R: Rng,
        F: FnMut(&GenerationReport),
    {
        let stop_reason = loop {
            if cancel.load(Ordering::Relaxed) {
                break StopReason::Cancelled;
            }
            if stop.is_met(&self.history) {
                break StopReason::Condition;
            }
            let report = self.step(rng);
            observer(&report);
        };
        tracing::info!(
            generations = self.history.generations(),
            best_cost = ?self.history.best_cost(),
            reason = ?stop_reason,
            "run finished"
        );
        RunSummary {
            generations: self.history.generations(),
            last: self.last.clone(),
            stop_reason,
        }
    }

    /// Number the next generation will carry; starts at 1.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Phase of the generation step the engine last completed.
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The point table the engine optimizes over.
    #[must_use]
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// The validated settings in use.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The generation that the next [`Self::step`] will evaluate.
    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Best cost and tour of every evaluated generation.
    #[must_use]
    pub fn history(&self) -> &RunHistory {
        &self.history
    }

    /// Report of the latest evaluated generation.
    #[must_use]
    pub fn last_report(&self) -> Option<&GenerationReport> {
        self.last.as_ref()
    }

    /// Cheapest tour of the latest evaluated generation.
    #[must_use]
    pub fn best(&self) -> Option<&Genome> {
        self.last.as_ref().map(|report| &report.best)
    }

    /// Runner-up tour of the latest evaluated generation.
    #[must_use]
    pub fn second_best(&self) -> Option<&Genome> {
        self.last.as_ref().and_then(|report| report.second_best.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instances;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn history_of(costs: &[f64]) -> RunHistory {
        let mut history = RunHistory::new();
        for (idx, &cost) in costs.iter().enumerate() {
            history.record(&GenerationReport {
                generation: idx + 1,
                best_cost: cost,
                mean_cost: cost,
                best: Genome::new(vec![0, 1, 0], 2).unwrap(),
                second_best: None,
            });
        }
        history
    }

    #[test]
    fn stop_condition_max_generations() {
        let condition = StopCondition::max_generations(2);
        assert!(!condition.is_met(&history_of(&[5.0])));
        assert!(condition.is_met(&history_of(&[5.0, 4.0])));
    }

    #[test]
    fn stop_condition_target_cost() {
        let condition = StopCondition::target_cost_below(1.0);
        assert!(!condition.is_met(&history_of(&[])));
        assert!(!condition.is_met(&history_of(&[3.0])));
        assert!(condition.is_met(&history_of(&[3.0, 1.0])));
    }

    #[test]
    fn stop_condition_stagnation_and_or() {
        let stalled = history_of(&[4.0, 3.0, 3.0, 3.0]);
        assert!(StopCondition::stagnation(2).is_met(&stalled));
        assert!(!StopCondition::stagnation(3).is_met(&stalled));
        assert!(!StopCondition::stagnation(0).is_met(&history_of(&[])));
        let either = StopCondition::stagnation(10).or(StopCondition::max_generations(4));
        assert!(either.is_met(&stalled));
    }

    #[test]
    fn build_rejects_invalid_settings() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = TourGa::builder(instances::unit_square())
            .population_size(3)
            .elite_count(4)
            .build(&mut rng)
            .err();
        assert_eq!(
            err,
            Some(TourError::InvalidEliteCount {
                elite_count: 4,
                population_size: 3
            })
        );
    }

    #[test]
    fn build_rejects_mismatched_seed_population() {
        let mut rng = StdRng::seed_from_u64(0);
        let seed = Population::random(3, 4, &mut rng);
        let err = TourGa::builder(instances::unit_square())
            .population_size(5)
            .elite_count(1)
            .initial_population(seed)
            .build(&mut rng)
            .err();
        assert_eq!(
            err,
            Some(TourError::PopulationSizeMismatch {
                expected: 5,
                found: 3
            })
        );
    }

    #[test]
    fn build_rejects_tours_over_other_points() {
        let mut rng = StdRng::seed_from_u64(0);
        let seed = Population::random(2, 6, &mut rng);
        let err = TourGa::builder(instances::unit_square())
            .population_size(2)
            .elite_count(0)
            .initial_population(seed)
            .build(&mut rng)
            .err();
        assert!(matches!(err, Some(TourError::Genome(_))));
    }

    #[test]
    fn step_keeps_population_size_and_advances_counter() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut ga = TourGa::builder(instances::regular_polygon(9, 3.0))
            .population_size(12)
            .elite_count(3)
            .build(&mut rng)
            .unwrap();
        assert_eq!(ga.generation(), 1);
        for expected in 1..=5 {
            let report = ga.step(&mut rng);
            assert_eq!(report.generation, expected);
            assert_eq!(ga.population().len(), 12);
            assert_eq!(ga.state(), EngineState::Idle);
        }
        assert_eq!(ga.generation(), 6);
        assert_eq!(ga.history().generations(), 5);
    }

    #[test]
    fn elites_lead_the_next_generation() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut ga = TourGa::builder(instances::regular_polygon(10, 1.0))
            .population_size(15)
            .elite_count(4)
            .build(&mut rng)
            .unwrap();
        let report = ga.step(&mut rng);
        assert_eq!(ga.population().best(), Some(&report.best));
        assert_eq!(ga.population().second_best(), report.second_best.as_ref());
        assert_eq!(ga.best(), Some(&report.best));
        assert_eq!(ga.second_best(), report.second_best.as_ref());
    }

    #[test]
    fn raised_cancel_flag_stops_before_first_generation() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut ga = TourGa::builder(instances::unit_square())
            .population_size(4)
            .elite_count(1)
            .build(&mut rng)
            .unwrap();
        let summary = ga.run(
            &mut rng,
            &StopCondition::max_generations(100),
            &AtomicBool::new(true),
        );
        assert_eq!(summary.stop_reason, StopReason::Cancelled);
        assert_eq!(summary.generations, 0);
        assert!(summary.best().is_none());
    }

    #[test]
    fn observer_can_request_cancellation() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut ga = TourGa::builder(instances::regular_polygon(6, 1.0))
            .population_size(6)
            .elite_count(1)
            .build(&mut rng)
            .unwrap();
        let cancel = AtomicBool::new(false);
        let summary = ga.run_observed(
            &mut rng,
            &StopCondition::max_generations(1_000),
            &cancel,
            |report| {
                if report.generation == 3 {
                    cancel.store(true, Ordering::Relaxed);
                }
            },
        );
        assert_eq!(summary.stop_reason, StopReason::Cancelled);
        assert_eq!(summary.generations, 3);
        assert_eq!(summary.last.map(|report| report.generation), Some(3));
    }
}
