use tsp_genetic::{
    distance, run, total_distance, City, ConfigError, GaConfig, GaError, GeneticOptimizer,
    TimeBudget,
};
use std::time::Duration;

fn square() -> Vec<City> {
    vec![
        City::new(0, 0.0, 0.0),
        City::new(1, 10.0, 0.0),
        City::new(2, 10.0, 10.0),
        City::new(3, 0.0, 10.0),
    ]
}

fn is_permutation(route: &[usize], city_count: usize) -> bool {
    let mut sorted = route.to_vec();
    sorted.sort_unstable();
    sorted == (0..city_count).collect::<Vec<_>>()
}

#[test]
fn test_square_converges_to_perimeter() {
    let cities = square();

    for seed in 0..10 {
        let config = GaConfig {
            generation_count: 200,
            population_min: 20,
            population_max: 40,
            seed: Some(seed),
            ..Default::default()
        };

        let outcome = run(&cities, config, None).unwrap();

        assert!(outcome.best_distance <= 40.0 * 1.01, "seed {seed}: {}", outcome.best_distance);
        assert!(is_permutation(outcome.route(), 4));
    }
}

#[test]
fn test_unseeded_run_returns_a_closed_tour() {
    let cities = square();
    let config = GaConfig {
        generation_count: 50,
        population_min: 20,
        population_max: 40,
        ..Default::default()
    };

    let outcome = run(&cities, config, None).unwrap();

    // Any closed tour of the square is at least its perimeter
    assert!(is_permutation(outcome.route(), 4));
    assert!(outcome.best_distance >= 40.0);
    assert_eq!(outcome.best_distance, total_distance(outcome.route(), &cities));
}

#[test]
fn test_two_cities_tour_is_there_and_back() {
    let cities = vec![City::new(0, 1.0, 2.0), City::new(1, 4.0, 6.0)];
    let config = GaConfig {
        generation_count: 5,
        population_min: 4,
        population_max: 8,
        seed: Some(1),
        ..Default::default()
    };

    let outcome = run(&cities, config, None).unwrap();

    assert_eq!(outcome.best_distance, 2.0 * distance(&cities[0], &cities[1]));
    assert_eq!(outcome.best_distance, 10.0);
}

#[test]
fn test_every_reported_route_is_a_permutation() {
    let cities: Vec<City> = (0..30)
        .map(|i| City::new(i, (i * 37 % 101) as f64, (i * 53 % 89) as f64))
        .collect();
    let config = GaConfig {
        generation_count: 100,
        population_min: 30,
        population_max: 60,
        mutation_probability: 0.3,
        seed: Some(12),
        ..Default::default()
    };

    let mut reports = 0;
    let mut observer = |route: &[usize], _generation: usize| {
        assert!(is_permutation(route, 30));
        reports += 1;
    };

    let outcome = run(&cities, config, Some(&mut observer)).unwrap();

    assert_eq!(reports, 100);
    assert!(is_permutation(outcome.route(), 30));
}

#[test]
fn test_best_ever_beats_first_generation() {
    let cities: Vec<City> = (0..25)
        .map(|i| City::new(i, (i * 29 % 97) as f64, (i * 61 % 83) as f64))
        .collect();

    for seed in [3, 17, 256] {
        let mut reported = Vec::new();
        let mut observer = |route: &[usize], _generation: usize| {
            reported.push(total_distance(route, &cities));
        };

        let config = GaConfig {
            generation_count: 150,
            seed: Some(seed),
            ..Default::default()
        };
        let outcome = run(&cities, config, Some(&mut observer)).unwrap();

        let shortest_reported = reported.iter().cloned().fold(f64::INFINITY, f64::min);
        assert!(outcome.best_distance <= reported[0]);
        assert_eq!(outcome.best_distance, shortest_reported);
    }
}

#[test]
fn test_invalid_configuration_is_reported_before_running() {
    let cities = square();
    let mut called = false;
    let mut observer = |_: &[usize], _: usize| called = true;

    let result = run(
        &cities,
        GaConfig {
            mutation_probability: 1.2,
            ..Default::default()
        },
        Some(&mut observer),
    );

    assert_eq!(
        result.unwrap_err(),
        GaError::InvalidConfiguration(ConfigError::MutationProbabilityOutOfRange(1.2))
    );
    assert!(!called);
}

#[test]
fn test_empty_city_list_is_rejected() {
    let result = run(&[], GaConfig::default(), None);

    assert_eq!(
        result.unwrap_err(),
        GaError::InvalidConfiguration(ConfigError::TooFewCities(0))
    );
}

#[test]
fn test_runs_on_a_worker_thread() {
    let cities = square();
    let config = GaConfig {
        generation_count: 1_000_000,
        population_min: 10,
        population_max: 20,
        seed: Some(5),
        ..Default::default()
    };

    let outcome = std::thread::scope(|scope| {
        scope
            .spawn(|| {
                GeneticOptimizer::new(&cities, config)
                    .unwrap()
                    .with_termination(TimeBudget::new(Duration::from_millis(100)))
                    .run(None)
            })
            .join()
            .unwrap()
    });

    assert!(outcome.generations < 1_000_000);
    assert_eq!(outcome.best_distance, 40.0);
}
