//! Genetic operators over anchored tours.
//!
//! This module groups the traits that describe how tours are scored, picked,
//! recombined and perturbed. Each sub-module focuses on one step of the
//! generational loop and ships the implementation the engine uses by default.

pub mod crossover;
pub mod fitness;
pub mod mutation;
pub mod selection;

pub use crossover::{CrossoverOperator, OrderCrossover};
pub use fitness::{evaluate, sort_by_fitness, FitnessEvaluator};
pub use mutation::{MutationOperator, SwapMutation};
pub use selection::{SelectionOperator, TournamentSelection};
