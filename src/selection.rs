//! Parent selection.
//!
//! Both strategies expect an evaluated population and return an index into it.
//! An empty population has no valid index; both return 0 for it instead of
//! panicking, so callers must not index with the result.
//! Tournament selection is the default; its pressure grows with the tournament
//! size. Roulette selection picks proportionally to fitness, which for tours is
//! the inverse of their length.

use crate::genetic_algorithm::SelectionStrategy;
use crate::route::Route;
use rand::prelude::*;
use rand::seq::index;

#[derive(Clone, Debug)]
pub struct TournamentSelection {
    pub size: usize,
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { size: 2 }
    }
}

impl TournamentSelection {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl SelectionStrategy for TournamentSelection {
    /// Samples distinct contestants and keeps the fittest. The first sampled wins ties.
    fn select(&self, population: &[Route], rng: &mut dyn RngCore) -> usize {
        if population.is_empty() {
            return 0;
        }

        let size = self.size.clamp(1, population.len());
        let mut winner: Option<usize> = None;

        for contestant in index::sample(rng, population.len(), size) {
            winner = match winner {
                Some(best) if population[best].fitness() >= population[contestant].fitness() => {
                    Some(best)
                }
                _ => Some(contestant),
            };
        }

        winner.unwrap_or(0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct RouletteSelection;

impl SelectionStrategy for RouletteSelection {
    fn select(&self, population: &[Route], rng: &mut dyn RngCore) -> usize {
        if population.is_empty() {
            return 0;
        }

        let sum_fitness: f64 = population.iter().map(|route| route.fitness()).sum();
        if sum_fitness <= 0.0 || !sum_fitness.is_finite() {
            return rng.gen_range(0..population.len());
        }

        let spin = rng.gen::<f64>() * sum_fitness;
        let mut cumulative = 0.0;

        for (position, route) in population.iter().enumerate() {
            cumulative += route.fitness();
            if cumulative >= spin {
                return position;
            }
        }

        // Rounding can leave the spin just past the final sum
        population.len() - 1
    }
}
