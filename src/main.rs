use chrono::Local;
use clap::{arg, ArgMatches, Command};
use colored::Colorize;
use csv::{Writer, WriterBuilder};
use itertools::iproduct;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::error::Error;
use std::fs::{File, OpenOptions};
use std::iter::Sum;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tsp_genetic::demo_data::{clustered_cities, uniform_cities};
use tsp_genetic::visualization::visualize_route;
use tsp_genetic::{
    total_distance, AnyOf, City, FitnessStagnation, GaConfig, GeneticOptimizer, RunOutcome,
    TimeBudget,
};

#[derive(Debug)]
pub struct SweepSchema {
    cities: Vec<usize>,
    population_bounds: Vec<(usize, usize)>,
    mutation_probability: Vec<f64>,
    tournament_size: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct SweepResult {
    pub cities: usize,
    pub repetitions: usize,
    pub generation_count: usize,
    pub population_min: usize,
    pub population_max: usize,
    pub mutation_probability: f64,
    pub crossover_probability: f64,
    pub tournament_size: usize,
    pub elitism_size: usize,
    pub mean_distance: f64,
    pub mean_runtime: f64,
    pub mean_generations: f64,
    pub var_distance: f64,
    pub var_runtime: f64,
    pub var_generations: f64,
}

#[derive(Debug, Serialize)]
struct RouteStop {
    order: usize,
    city_id: u32,
    x: f64,
    y: f64,
}

fn cli() -> Command {
    Command::new("tsp_genetic")
        .about("Evolves short closed tours through random cities")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Runs a single evolution and renders the best route")
                .arg(
                    arg!(--cities [CITIES] "Number of cities to place")
                        .default_value("100")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--generations [GENERATIONS] "Generation limit")
                        .default_value("2000")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"population-min" [MIN] "Minimum population size")
                        .default_value("300")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"population-max" [MAX] "Maximum population size")
                        .default_value("400")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--mutation [PROBABILITY] "Mutation probability per child")
                        .default_value("0.08")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--crossover [PROBABILITY] "Crossover probability per parent pair")
                        .default_value("0.75")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--tournament [SIZE] "Tournament size")
                        .default_value("2")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--elitism [SIZE] "Routes carried over unchanged")
                        .default_value("1")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(arg!(--seed [SEED] "Seed for cities and evolution").value_parser(clap::value_parser!(u64)))
                .arg(
                    arg!(--layout [LAYOUT] "City layout")
                        .default_value("uniform")
                        .value_parser(["uniform", "clustered"]),
                )
                .arg(
                    arg!(--width [WIDTH] "Area width")
                        .default_value("800")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--height [HEIGHT] "Area height")
                        .default_value("600")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--"report-every" [N] "Print every Nth generation")
                        .default_value("50")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"time-budget" [SECONDS] "Stop after this many seconds")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--stagnation [GENERATIONS] "Stop after this many generations without improvement")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                )
                .arg(
                    arg!(--output [PATH] "Route image path")
                        .default_value("route.png")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--"route-csv" [PATH] "Route CSV path")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("sweep")
                .about("Benchmarks a grid of parameters and appends the results to a CSV file")
                .arg(
                    arg!(--repetitions [N] "Runs per scenario")
                        .default_value("5")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--generations [GENERATIONS] "Generation limit per run")
                        .default_value("500")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--output [PATH] "Results CSV path")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
}

fn mean_variance<T: Copy + Into<f64> + Sum<T>>(values: &[T]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let sum: f64 = values.iter().map(|&v| v.into()).sum();
    let mean = sum / n;

    let variance = values
        .iter()
        .map(|&v| {
            let diff = v.into() - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    (mean, variance)
}

fn run_config(matches: &ArgMatches) -> GaConfig {
    GaConfig {
        generation_count: *matches.get_one::<usize>("generations").unwrap_or(&2000),
        population_min: *matches.get_one::<usize>("population-min").unwrap_or(&300),
        population_max: *matches.get_one::<usize>("population-max").unwrap_or(&400),
        mutation_probability: *matches.get_one::<f64>("mutation").unwrap_or(&0.08),
        crossover_probability: *matches.get_one::<f64>("crossover").unwrap_or(&0.75),
        tournament_size: *matches.get_one::<usize>("tournament").unwrap_or(&2),
        elitism_size: *matches.get_one::<usize>("elitism").unwrap_or(&1),
        seed: matches.get_one::<u64>("seed").copied(),
    }
}

fn place_cities(matches: &ArgMatches, rng: &mut StdRng) -> Result<Vec<City>, Box<dyn Error>> {
    let count = *matches.get_one::<usize>("cities").unwrap_or(&100);
    let width = *matches.get_one::<f64>("width").unwrap_or(&800.0);
    let height = *matches.get_one::<f64>("height").unwrap_or(&600.0);

    let cities = match matches.get_one::<String>("layout").map(String::as_str) {
        Some("clustered") => clustered_cities(count, (count / 15).max(2), width, height, rng)?,
        _ => uniform_cities(count, width, height, rng)?,
    };

    Ok(cities)
}

fn write_route_csv(cities: &[City], route: &[usize], path: &str) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path(path)?;

    for (order, &index) in route.iter().enumerate() {
        let city = &cities[index];
        writer.serialize(RouteStop {
            order,
            city_id: city.id,
            x: city.x,
            y: city.y,
        })?;
    }

    writer.flush()?;
    println!("Route saved to {}", path);
    Ok(())
}

/// Runs the optimizer on a worker thread and prints progress on this one.
fn run_single(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let config = run_config(matches);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let cities = place_cities(matches, &mut rng)?;
    let report_every = (*matches.get_one::<usize>("report-every").unwrap_or(&50)).max(1);

    let mut termination = AnyOf::default();
    if let Some(&seconds) = matches.get_one::<u64>("time-budget") {
        termination = termination.with(TimeBudget::new(Duration::from_secs(seconds)));
    }
    if let Some(&patience) = matches.get_one::<u64>("stagnation") {
        termination = termination.with(FitnessStagnation::new(patience as usize));
    }

    let optimizer = GeneticOptimizer::new(&cities, config)?;
    let optimizer = if termination.is_empty() {
        optimizer
    } else {
        optimizer.with_termination(termination)
    };

    let (sender, receiver) = mpsc::channel::<(usize, Vec<usize>)>();

    let outcome: RunOutcome = thread::scope(|scope| {
        let worker = scope.spawn(move || {
            let mut on_generation = |route: &[usize], generation: usize| {
                // The printer may have gone away; evolution carries on regardless
                let _ = sender.send((generation, route.to_vec()));
            };
            optimizer.run(Some(&mut on_generation))
        });

        for (generation, route) in receiver.iter() {
            if generation == 1 || generation % report_every == 0 {
                println!(
                    "{} - Best distance: {:.2}",
                    format!("Generation {:4}", generation).bold().red(),
                    total_distance(&route, &cities),
                );
            }
        }

        worker.join()
    })
    .map_err(|_| "evolution thread panicked")?;

    println!(
        "{} after {} generations{}: distance {:.2}",
        "Best route".bold().green(),
        outcome.generations,
        if outcome.cancelled { " (cancelled)" } else { "" },
        outcome.best_distance,
    );

    if let Some(output) = matches.get_one::<String>("output") {
        let caption = format!(
            "Generation {} - distance {:.2}",
            outcome.generations, outcome.best_distance
        );
        let width = *matches.get_one::<f64>("width").unwrap_or(&800.0);
        let height = *matches.get_one::<f64>("height").unwrap_or(&600.0);
        visualize_route(
            &cities,
            outcome.route(),
            &caption,
            output,
            (width.max(200.0) as u32, height.max(200.0) as u32),
        )?;
        println!("Chart saved to {}", output);
    }

    if let Some(path) = matches.get_one::<String>("route-csv") {
        write_route_csv(&cities, outcome.route(), path)?;
    }

    Ok(())
}

/// Opens `file_path` for appending. The header row is only written into an empty file.
fn append_writer(file_path: &str) -> Result<Writer<File>, Box<dyn Error>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;
    let file_is_empty = file.metadata()?.len() == 0;

    Ok(WriterBuilder::new()
        .has_headers(file_is_empty)
        .from_writer(file))
}

fn collect_benchmarks(
    schemas: &[SweepSchema],
    repetitions: usize,
    generation_count: usize,
    file_path: &str,
) -> Result<(), Box<dyn Error>> {
    let mut writer = append_writer(file_path)?;
    let mut rng = StdRng::from_entropy();

    for schema in schemas {
        for (&city_count, &(population_min, population_max), &mutation_probability, &tournament_size) in iproduct!(
            &schema.cities,
            &schema.population_bounds,
            &schema.mutation_probability,
            &schema.tournament_size
        ) {
            println!(
                "Scenario cities={} population={}..{} mutation={} tournament={} is being run...",
                city_count, population_min, population_max, mutation_probability, tournament_size
            );

            let cities = uniform_cities(city_count, 800.0, 600.0, &mut rng)?;
            let config = GaConfig {
                generation_count,
                population_min,
                population_max,
                mutation_probability,
                tournament_size,
                ..Default::default()
            };

            let mut distances = Vec::with_capacity(repetitions);
            let mut runtimes = Vec::with_capacity(repetitions);
            let mut generations = Vec::with_capacity(repetitions);

            for i in 0..repetitions {
                println!("-- Repetition {} of {} is being run...", i + 1, repetitions);

                let start = Instant::now();
                let outcome = GeneticOptimizer::new(&cities, config.clone())?.run(None);

                runtimes.push(start.elapsed().as_secs_f64());
                distances.push(outcome.best_distance);
                generations.push(outcome.generations as u32);
            }

            let (mean_distance, var_distance) = mean_variance(&distances);
            let (mean_runtime, var_runtime) = mean_variance(&runtimes);
            let (mean_generations, var_generations) = mean_variance(&generations);

            writer.serialize(SweepResult {
                cities: city_count,
                repetitions,
                generation_count: config.generation_count,
                population_min: config.population_min,
                population_max: config.population_max,
                mutation_probability: config.mutation_probability,
                crossover_probability: config.crossover_probability,
                tournament_size: config.tournament_size,
                elitism_size: config.elitism_size,
                mean_distance,
                mean_runtime,
                mean_generations,
                var_distance,
                var_runtime,
                var_generations,
            })?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn sweep(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let schemas = vec![
        SweepSchema {
            cities: vec![25, 50],
            population_bounds: vec![(50, 100), (100, 200)],
            mutation_probability: vec![0.02, 0.08, 0.2],
            tournament_size: vec![2, 3],
        },
        SweepSchema {
            cities: vec![100],
            population_bounds: vec![(300, 400)],
            mutation_probability: vec![0.08],
            tournament_size: vec![2, 5],
        },
    ];

    let repetitions = *matches.get_one::<usize>("repetitions").unwrap_or(&5);
    let generation_count = *matches.get_one::<usize>("generations").unwrap_or(&500);
    let filename = match matches.get_one::<String>("output") {
        Some(path) => path.clone(),
        None => {
            let date_str = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
            format!("sweep_results_{}.csv", date_str)
        }
    };

    collect_benchmarks(&schemas, repetitions, generation_count, &filename)?;
    println!("Results saved to {}", filename);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    match cli().get_matches().subcommand() {
        Some(("run", matches)) => run_single(matches),
        Some(("sweep", matches)) => sweep(matches),
        _ => Ok(()),
    }
}
