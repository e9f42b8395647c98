use crate::route::Route;
use rand::RngCore;
use std::fmt::Debug;
use std::time::Duration;

// Picks one parent out of an evaluated population and returns its index
pub trait SelectionStrategy: Send + Sync + Debug {
    fn select(&self, population: &[Route], rng: &mut dyn RngCore) -> usize;
}

// Combines two parent permutations into a single child permutation
pub trait CrossoverStrategy: Send + Sync + Debug {
    fn cross(&self, parent_a: &[usize], parent_b: &[usize], rng: &mut dyn RngCore) -> Vec<usize>;
}

// Rearranges a route in place, keeping it a permutation
pub trait MutationStrategy: Send + Sync + Debug {
    fn mutate(&self, genes: &mut [usize], rng: &mut dyn RngCore);
}

/// What the driver knows at the end of a generation.
#[derive(Clone, Copy, Debug)]
pub struct GenerationState {
    /// 1-based index of the generation that just completed.
    pub generation: usize,
    pub best_fitness: f64,
    pub best_ever_fitness: f64,
    pub population_size: usize,
    pub elapsed: Duration,
}

// The stopping condition, asked once per generation
pub trait TerminationPredicate: Send + Debug {
    fn has_reached(&mut self, state: &GenerationState) -> bool;
}
