#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("generation count must be greater than zero")]
    ZeroGenerations,
    #[error("mutation probability must be between 0.0 and 1.0, got {0}")]
    MutationProbabilityOutOfRange(f64),
    #[error("crossover probability must be between 0.0 and 1.0, got {0}")]
    CrossoverProbabilityOutOfRange(f64),
    #[error("minimum population size must be greater than zero")]
    EmptyPopulation,
    #[error("minimum population size {min} exceeds maximum {max}")]
    PopulationBoundsInverted { min: usize, max: usize },
    #[error("tournament size must be greater than zero")]
    TournamentSizeZero,
    #[error("elitism size {elitism} must not exceed the minimum population size {min}")]
    ElitismTooLarge { elitism: usize, min: usize },
    #[error("a tour needs at least 2 cities, got {0}")]
    TooFewCities(usize),
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GaError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}
