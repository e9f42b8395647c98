use crate::errors::ConfigError;
use serde::Serialize;

/// Parameters of a single evolution run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GaConfig {
    pub generation_count: usize,
    pub population_min: usize,
    pub population_max: usize,
    pub mutation_probability: f64,
    pub crossover_probability: f64,
    pub tournament_size: usize,
    /// Best routes copied unchanged into the next generation.
    pub elitism_size: usize,
    /// Fixed seed for reproducible runs, entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            generation_count: 1000,
            population_min: 50,
            population_max: 100,
            mutation_probability: 0.08,
            crossover_probability: 0.75,
            tournament_size: 2,
            elitism_size: 1,
            seed: None,
        }
    }
}

impl GaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation_count == 0 {
            return Err(ConfigError::ZeroGenerations);
        }

        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(ConfigError::MutationProbabilityOutOfRange(
                self.mutation_probability,
            ));
        }

        if !(0.0..=1.0).contains(&self.crossover_probability) {
            return Err(ConfigError::CrossoverProbabilityOutOfRange(
                self.crossover_probability,
            ));
        }

        if self.population_min == 0 {
            return Err(ConfigError::EmptyPopulation);
        }

        if self.population_min > self.population_max {
            return Err(ConfigError::PopulationBoundsInverted {
                min: self.population_min,
                max: self.population_max,
            });
        }

        if self.tournament_size == 0 {
            return Err(ConfigError::TournamentSizeZero);
        }

        if self.elitism_size > self.population_min {
            return Err(ConfigError::ElitismTooLarge {
                elitism: self.elitism_size,
                min: self.population_min,
            });
        }

        Ok(())
    }

    pub fn validate_cities(city_count: usize) -> Result<(), ConfigError> {
        if city_count < 2 {
            return Err(ConfigError::TooFewCities(city_count));
        }

        Ok(())
    }
}
