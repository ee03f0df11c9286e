//! Per-generation records handed to reporting collaborators.
//!
//! A [`GenerationReport`] describes one finished generation; [`RunHistory`]
//! accumulates the time series used to draw cost-over-time charts.

use super::Genome;

/// Snapshot of a single generation after it was evaluated and sorted.
///
/// # Examples
/// ```
/// use tourga::{Genome, GenerationReport};
/// let best = Genome::new(vec![0, 1, 2, 0], 3).unwrap();
/// let report = GenerationReport {
///     generation: 1,
///     best_cost: 4.0,
///     mean_cost: 5.0,
///     best,
///     second_best: None,
/// };
/// assert_eq!(report.generation, 1);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Generation number, starting at 1.
    pub generation: usize,
    /// Cost of the cheapest tour in the generation.
    pub best_cost: f64,
    /// Mean cost over the whole generation.
    pub mean_cost: f64,
    /// Cheapest tour in the generation.
    pub best: Genome,
    /// Runner-up tour, absent when the population holds a single genome.
    pub second_best: Option<Genome>,
}

/// Append-only record of every generation of a run.
///
/// # Examples
/// ```
/// use tourga::RunHistory;
/// let history = RunHistory::new();
/// assert_eq!(history.generations(), 0);
/// assert!(history.best_cost().is_none());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunHistory {
    best_costs: Vec<f64>,
    mean_costs: Vec<f64>,
    best_tours: Vec<Genome>,
    lowest_cost: Option<f64>,
    stale: usize,
}

impl RunHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a generation.
    pub fn record(&mut self, report: &GenerationReport) {
        self.best_costs.push(report.best_cost);
        self.mean_costs.push(report.mean_cost);
        self.best_tours.push(report.best.clone());
        let improved = match self.lowest_cost {
            Some(lowest) => report.best_cost < lowest,
            None => !report.best_cost.is_nan(),
        };
        if improved {
            self.lowest_cost = Some(report.best_cost);
            self.stale = 0;
        } else {
            self.stale += 1;
        }
    }

    /// Returns the number of recorded generations.
    #[must_use]
    pub fn generations(&self) -> usize {
        self.best_costs.len()
    }

    /// Best cost of each generation, oldest first.
    #[must_use]
    pub fn best_costs(&self) -> &[f64] {
        &self.best_costs
    }

    /// Mean cost of each generation, oldest first.
    #[must_use]
    pub fn mean_costs(&self) -> &[f64] {
        &self.mean_costs
    }

    /// Best tour of each generation, oldest first.
    #[must_use]
    pub fn best_tours(&self) -> &[Genome] {
        &self.best_tours
    }

    /// Best cost of the latest generation.
    #[must_use]
    pub fn best_cost(&self) -> Option<f64> {
        self.best_costs.last().copied()
    }

    /// Number of trailing generations whose best cost did not improve on the
    /// best cost seen before them.
    ///
    /// # Examples
    /// ```
    /// use tourga::{Genome, GenerationReport, RunHistory};
    /// let best = Genome::new(vec![0, 1, 0], 2).unwrap();
    /// let mut history = RunHistory::new();
    /// for cost in [9.0, 7.0, 7.0, 7.0] {
    ///     history.record(&GenerationReport {
    ///         generation: history.generations() + 1,
    ///         best_cost: cost,
    ///         mean_cost: cost,
    ///         best: best.clone(),
    ///         second_best: None,
    ///     });
    /// }
    /// assert_eq!(history.generations_without_improvement(), 2);
    /// ```
    #[must_use]
    pub fn generations_without_improvement(&self) -> usize {
        self.stale
    }

    /// Lowest best cost recorded so far.
    #[must_use]
    pub fn lowest_cost(&self) -> Option<f64> {
        self.lowest_cost
    }
}
