use crate::genetic_algorithm::{GenerationState, TerminationPredicate};
use std::time::Duration;

/// Stops once the given number of generations has run.
#[derive(Clone, Debug)]
pub struct GenerationLimit {
    pub generations: usize,
}

impl GenerationLimit {
    pub fn new(generations: usize) -> Self {
        Self { generations }
    }
}

impl TerminationPredicate for GenerationLimit {
    fn has_reached(&mut self, state: &GenerationState) -> bool {
        state.generation >= self.generations
    }
}

/// Stops when the best-ever fitness has not improved for `patience` generations.
/// A patience of 0 disables the check.
#[derive(Clone, Debug)]
pub struct FitnessStagnation {
    pub patience: usize,
    best_fitness: f64,
    best_fitness_count: usize,
}

impl FitnessStagnation {
    pub fn new(patience: usize) -> Self {
        Self {
            patience,
            best_fitness: f64::NEG_INFINITY,
            best_fitness_count: 0,
        }
    }
}

impl TerminationPredicate for FitnessStagnation {
    fn has_reached(&mut self, state: &GenerationState) -> bool {
        if self.best_fitness < state.best_ever_fitness {
            self.best_fitness = state.best_ever_fitness;
            self.best_fitness_count = 0;
        } else {
            self.best_fitness_count += 1;
        }

        self.patience > 0 && self.best_fitness_count >= self.patience
    }
}

/// Stops once the run has been evolving for longer than the budget.
#[derive(Clone, Debug)]
pub struct TimeBudget {
    pub budget: Duration,
}

impl TimeBudget {
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }
}

impl TerminationPredicate for TimeBudget {
    fn has_reached(&mut self, state: &GenerationState) -> bool {
        state.elapsed >= self.budget
    }
}

/// Stops as soon as any of the inner predicates does. Every predicate is asked
/// each generation so stateful ones keep counting.
#[derive(Debug, Default)]
pub struct AnyOf {
    predicates: Vec<Box<dyn TerminationPredicate>>,
}

impl AnyOf {
    pub fn new(predicates: Vec<Box<dyn TerminationPredicate>>) -> Self {
        Self { predicates }
    }

    pub fn with(mut self, predicate: impl TerminationPredicate + 'static) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl TerminationPredicate for AnyOf {
    fn has_reached(&mut self, state: &GenerationState) -> bool {
        self.predicates
            .iter_mut()
            .fold(false, |reached, predicate| predicate.has_reached(state) || reached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(generation: usize, best_ever_fitness: f64, elapsed_ms: u64) -> GenerationState {
        GenerationState {
            generation,
            best_fitness: best_ever_fitness,
            best_ever_fitness,
            population_size: 10,
            elapsed: Duration::from_millis(elapsed_ms),
        }
    }

    #[test]
    fn test_generation_limit() {
        let mut limit = GenerationLimit::new(3);

        assert!(!limit.has_reached(&state(1, 0.1, 0)));
        assert!(!limit.has_reached(&state(2, 0.1, 0)));
        assert!(limit.has_reached(&state(3, 0.1, 0)));
    }

    #[test]
    fn test_stagnation_resets_on_improvement() {
        let mut stagnation = FitnessStagnation::new(2);

        assert!(!stagnation.has_reached(&state(1, 0.1, 0)));
        assert!(!stagnation.has_reached(&state(2, 0.1, 0)));
        assert!(!stagnation.has_reached(&state(3, 0.2, 0)));
        assert!(!stagnation.has_reached(&state(4, 0.2, 0)));
        assert!(stagnation.has_reached(&state(5, 0.2, 0)));
    }

    #[test]
    fn test_stagnation_with_zero_patience_never_stops() {
        let mut stagnation = FitnessStagnation::new(0);

        for generation in 1..=50 {
            assert!(!stagnation.has_reached(&state(generation, 0.1, 0)));
        }
    }

    #[test]
    fn test_time_budget() {
        let mut budget = TimeBudget::new(Duration::from_millis(50));

        assert!(!budget.has_reached(&state(1, 0.1, 10)));
        assert!(budget.has_reached(&state(2, 0.1, 50)));
    }

    #[test]
    fn test_any_of_asks_every_predicate() {
        let mut any = AnyOf::default()
            .with(GenerationLimit::new(10))
            .with(FitnessStagnation::new(1));

        assert!(!any.has_reached(&state(1, 0.5, 0)));
        assert!(any.has_reached(&state(2, 0.5, 0)));

        let mut empty = AnyOf::default();
        assert!(empty.is_empty());
        assert!(!empty.has_reached(&state(100, 0.5, 0)));
    }
}
