//! Genetic-algorithm solver for the closed-tour Traveling Salesman Problem.
//!
//! Routes are permutations of city indices. Each generation is evaluated,
//! reported to an optional observer and bred into the next one with tournament
//! selection, order crossover and segment-reversal mutation. Every strategy is a
//! trait object and can be replaced on [`GeneticOptimizer`].

pub mod cancellation;
pub mod config;
pub mod crossover;
pub mod demo_data;
pub mod engine;
pub mod errors;
pub mod fitness;
pub mod genetic_algorithm;
pub mod geometry;
pub mod mutation;
pub mod population;
pub mod route;
pub mod selection;
pub mod termination;
pub mod visualization;

pub use cancellation::CancellationToken;
pub use config::GaConfig;
pub use crossover::OrderedCrossover;
pub use engine::{run, EngineState, GenerationObserver, GeneticOptimizer, RunOutcome};
pub use errors::{ConfigError, GaError};
pub use fitness::{evaluate, total_distance, DEGENERATE_FITNESS};
pub use genetic_algorithm::{
    CrossoverStrategy, GenerationState, MutationStrategy, SelectionStrategy, TerminationPredicate,
};
pub use geometry::{distance, City};
pub use mutation::{ReverseSequenceMutation, SwapMutation};
pub use population::Population;
pub use route::Route;
pub use selection::{RouletteSelection, TournamentSelection};
pub use termination::{AnyOf, FitnessStagnation, GenerationLimit, TimeBudget};
