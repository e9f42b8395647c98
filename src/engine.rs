use crate::cancellation::CancellationToken;
use crate::config::GaConfig;
use crate::crossover::OrderedCrossover;
use crate::errors::GaError;
use crate::geometry::City;
use crate::genetic_algorithm::{
    CrossoverStrategy, GenerationState, MutationStrategy, SelectionStrategy, TerminationPredicate,
};
use crate::mutation::ReverseSequenceMutation;
use crate::population::Population;
use crate::route::Route;
use crate::selection::TournamentSelection;
use crate::termination::GenerationLimit;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Per-generation observer: best route of the generation and its 1-based index.
pub type GenerationObserver<'a> = &'a mut dyn FnMut(&[usize], usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Initialized,
    Running,
    Terminated,
}

/// Result of a finished run.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// Best route seen over all generations.
    pub best: Route,
    pub best_distance: f64,
    pub best_fitness: f64,
    pub generations: usize,
    pub cancelled: bool,
    pub state: EngineState,
}

impl RunOutcome {
    pub fn route(&self) -> &[usize] {
        self.best.genes()
    }
}

#[derive(Debug)]
pub struct GeneticOptimizer<'c> {
    cities: &'c [City],
    config: GaConfig,
    population: Population,
    selection: Box<dyn SelectionStrategy>,
    crossover: Box<dyn CrossoverStrategy>,
    mutation: Box<dyn MutationStrategy>,
    limit: GenerationLimit,
    termination: Option<Box<dyn TerminationPredicate>>,
    cancellation: Option<CancellationToken>,
    rng: StdRng,
    state: EngineState,
}

impl<'c> GeneticOptimizer<'c> {
    /// Validates the configuration and seeds the initial population.
    pub fn new(cities: &'c [City], config: GaConfig) -> Result<Self, GaError> {
        config.validate()?;
        GaConfig::validate_cities(cities.len())?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let population = Population::random(
            cities.len(),
            config.population_min,
            config.population_max,
            &mut rng,
        );

        Ok(Self {
            cities,
            selection: Box::new(TournamentSelection::new(config.tournament_size)),
            crossover: Box::new(OrderedCrossover),
            mutation: Box::new(ReverseSequenceMutation),
            limit: GenerationLimit::new(config.generation_count),
            termination: None,
            cancellation: None,
            population,
            config,
            rng,
            state: EngineState::Initialized,
        })
    }

    pub fn with_selection(mut self, selection: impl SelectionStrategy + 'static) -> Self {
        self.selection = Box::new(selection);
        self
    }

    pub fn with_crossover(mut self, crossover: impl CrossoverStrategy + 'static) -> Self {
        self.crossover = Box::new(crossover);
        self
    }

    pub fn with_mutation(mut self, mutation: impl MutationStrategy + 'static) -> Self {
        self.mutation = Box::new(mutation);
        self
    }

    /// Extra stopping condition checked alongside the configured generation count.
    pub fn with_termination(mut self, termination: impl TerminationPredicate + 'static) -> Self {
        self.termination = Some(Box::new(termination));
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Evolves until the generation limit, the termination predicate or a
    /// cancellation stops it. The observer runs synchronously after each generation.
    #[instrument(level = "info", skip_all, fields(cities = self.cities.len()))]
    pub fn run(mut self, mut on_generation: Option<GenerationObserver<'_>>) -> RunOutcome {
        self.state = EngineState::Running;
        info!(
            generations = self.config.generation_count,
            population_min = self.config.population_min,
            population_max = self.config.population_max,
            "evolution started"
        );

        let started = Instant::now();
        let mut best_ever: Option<Route> = None;
        let mut generation = 1;
        let mut cancelled = false;

        loop {
            self.population.evaluate(self.cities);

            let Some(best) = self.population.best().cloned() else {
                break;
            };

            if best_ever
                .as_ref()
                .map_or(true, |current| best.fitness() > current.fitness())
            {
                best_ever = Some(best.clone());
            }

            let best_ever_fitness = best_ever.as_ref().map_or(0.0, Route::fitness);

            debug!(
                generation,
                best_distance = best.distance().unwrap_or_default(),
                best_ever_fitness,
                population = self.population.len(),
                "generation evaluated"
            );

            if let Some(observer) = on_generation.as_deref_mut() {
                observer(best.genes(), generation);
            }

            let state = GenerationState {
                generation,
                best_fitness: best.fitness(),
                best_ever_fitness,
                population_size: self.population.len(),
                elapsed: started.elapsed(),
            };

            if self.limit.has_reached(&state) {
                break;
            }

            if let Some(termination) = self.termination.as_mut() {
                if termination.has_reached(&state) {
                    break;
                }
            }

            if self
                .cancellation
                .as_ref()
                .is_some_and(CancellationToken::is_cancelled)
            {
                cancelled = true;
                break;
            }

            self.next_generation();
            generation += 1;
        }

        self.state = EngineState::Terminated;

        let best = best_ever.unwrap_or_else(|| {
            let mut route = Route::random(self.cities.len(), &mut self.rng);
            route.evaluate(self.cities);
            route
        });

        info!(
            generations = generation,
            best_distance = best.distance().unwrap_or_default(),
            cancelled,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "evolution finished"
        );

        RunOutcome {
            best_distance: best.distance().unwrap_or_default(),
            best_fitness: best.fitness(),
            best,
            generations: generation,
            cancelled,
            state: self.state,
        }
    }

    /// Elites carried over unchanged, then children bred in pairs until they
    /// match the current population size.
    fn next_generation(&mut self) {
        let routes = self.population.routes();
        let mut next = self.population.fittest(self.config.elitism_size);
        let offspring = routes.len();

        let mut children: Vec<Route> = Vec::with_capacity(offspring + 1);
        while children.len() < offspring {
            let parent_a = &routes[self.selection.select(routes, &mut self.rng)];
            let parent_b = &routes[self.selection.select(routes, &mut self.rng)];

            let (genes_a, genes_b) = if self.rng.gen_bool(self.config.crossover_probability) {
                (
                    self.crossover
                        .cross(parent_a.genes(), parent_b.genes(), &mut self.rng),
                    self.crossover
                        .cross(parent_b.genes(), parent_a.genes(), &mut self.rng),
                )
            } else {
                (parent_a.genes().to_vec(), parent_b.genes().to_vec())
            };

            children.push(Route::from_genes(genes_a));
            children.push(Route::from_genes(genes_b));
        }

        for child in children.iter_mut() {
            if self.rng.gen_bool(self.config.mutation_probability) {
                self.mutation.mutate(child.genes_mut(), &mut self.rng);
            }
        }

        next.extend(children);
        self.population.replace(next, self.cities, &mut self.rng);
    }
}

/// Validates, builds and runs an optimizer with the default strategies.
pub fn run(
    cities: &[City],
    config: GaConfig,
    on_generation: Option<GenerationObserver<'_>>,
) -> Result<RunOutcome, GaError> {
    Ok(GeneticOptimizer::new(cities, config)?.run(on_generation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;
    use crate::fitness::total_distance;
    use crate::mutation::SwapMutation;
    use crate::selection::RouletteSelection;
    use crate::termination::FitnessStagnation;

    fn ring(count: usize) -> Vec<City> {
        (0..count)
            .map(|i| {
                let angle = i as f64 / count as f64 * std::f64::consts::TAU;
                City::new(i as u32, 100.0 * angle.cos(), 100.0 * angle.sin())
            })
            .collect()
    }

    fn config(seed: u64) -> GaConfig {
        GaConfig {
            generation_count: 50,
            population_min: 20,
            population_max: 40,
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let cities = ring(5);
        let result = GeneticOptimizer::new(
            &cities,
            GaConfig {
                population_min: 10,
                population_max: 5,
                ..Default::default()
            },
        );

        assert!(matches!(
            result,
            Err(GaError::InvalidConfiguration(
                ConfigError::PopulationBoundsInverted { min: 10, max: 5 }
            ))
        ));
    }

    #[test]
    fn test_new_rejects_single_city() {
        let cities = ring(1);
        let result = GeneticOptimizer::new(&cities, GaConfig::default());

        assert!(matches!(
            result,
            Err(GaError::InvalidConfiguration(ConfigError::TooFewCities(1)))
        ));
    }

    #[test]
    fn test_starts_initialized_with_min_population() {
        let cities = ring(8);
        let optimizer = GeneticOptimizer::new(&cities, config(1)).unwrap();

        assert_eq!(optimizer.state(), EngineState::Initialized);
        assert_eq!(optimizer.population().len(), 20);
    }

    #[test]
    fn test_every_generation_keeps_permutations_and_bounds() {
        let cities = ring(15);
        let mut optimizer = GeneticOptimizer::new(&cities, config(2)).unwrap();

        for _ in 0..30 {
            optimizer.population.evaluate(&cities);
            optimizer.next_generation();

            let population = optimizer.population();
            assert!(population.len() >= 20 && population.len() <= 40);
            assert!(population
                .routes()
                .iter()
                .all(|route| route.is_valid_permutation(15)));
        }
    }

    #[test]
    fn test_observer_sees_each_generation_in_order() {
        let cities = ring(10);
        let mut seen = Vec::new();
        let mut observer = |route: &[usize], generation: usize| {
            assert_eq!(route.len(), 10);
            seen.push(generation);
        };

        let outcome = run(&cities, config(3), Some(&mut observer)).unwrap();

        assert_eq!(seen, (1..=50).collect::<Vec<_>>());
        assert_eq!(outcome.generations, 50);
        assert_eq!(outcome.state, EngineState::Terminated);
        assert!(!outcome.cancelled);
    }

    #[test]
    fn test_best_ever_never_regresses() {
        let cities = ring(12);
        let mut first_fitness = None;
        let mut observer = |route: &[usize], _generation: usize| {
            if first_fitness.is_none() {
                first_fitness = Some(1.0 / total_distance(route, &cities));
            }
        };

        let outcome = run(&cities, config(4), Some(&mut observer)).unwrap();

        assert!(outcome.best_fitness >= first_fitness.unwrap());
        assert!(outcome.best.is_valid_permutation(12));
        assert_eq!(
            outcome.best_distance,
            total_distance(outcome.route(), &cities)
        );
    }

    #[test]
    fn test_same_seed_same_result() {
        let cities = ring(20);

        let a = run(&cities, config(99), None).unwrap();
        let b = run(&cities, config(99), None).unwrap();

        assert_eq!(a.route(), b.route());
        assert_eq!(a.best_distance, b.best_distance);
    }

    #[test]
    fn test_cancellation_stops_at_generation_boundary() {
        let cities = ring(10);
        let token = CancellationToken::new();
        let remote = token.clone();
        let mut observer = |_: &[usize], generation: usize| {
            if generation == 5 {
                remote.cancel();
            }
        };

        let outcome = GeneticOptimizer::new(&cities, config(5))
            .unwrap()
            .with_cancellation(token)
            .run(Some(&mut observer));

        assert!(outcome.cancelled);
        assert_eq!(outcome.generations, 5);
        assert!(outcome.best.is_valid_permutation(10));
    }

    #[test]
    fn test_cancelled_before_start_still_returns_a_route() {
        let cities = ring(6);
        let token = CancellationToken::new();
        token.cancel();

        let outcome = GeneticOptimizer::new(&cities, config(6))
            .unwrap()
            .with_cancellation(token)
            .run(None);

        assert_eq!(outcome.generations, 1);
        assert!(outcome.best.is_valid_permutation(6));
    }

    #[test]
    fn test_custom_termination_stops_early() {
        let cities = ring(4);
        let outcome = GeneticOptimizer::new(
            &cities,
            GaConfig {
                generation_count: 500,
                ..config(7)
            },
        )
        .unwrap()
        .with_termination(FitnessStagnation::new(5))
        .run(None);

        assert!(outcome.generations < 500);
        assert!(!outcome.cancelled);
    }

    #[test]
    fn test_alternative_strategies_keep_routes_valid() {
        let cities = ring(9);
        let outcome = GeneticOptimizer::new(
            &cities,
            GaConfig {
                mutation_probability: 1.0,
                ..config(8)
            },
        )
        .unwrap()
        .with_selection(RouletteSelection)
        .with_mutation(SwapMutation)
        .run(None);

        assert!(outcome.best.is_valid_permutation(9));
    }
}
