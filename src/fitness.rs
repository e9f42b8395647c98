use crate::geometry::City;

/// Fitness assigned to a tour of length zero, where `1 / distance` is undefined.
pub const DEGENERATE_FITNESS: f64 = f64::MAX;

/// Length of the closed tour visiting `genes` in order and returning to the start.
pub fn total_distance(genes: &[usize], cities: &[City]) -> f64 {
    if genes.is_empty() {
        return 0.0;
    }

    let legs: f64 = genes
        .windows(2)
        .map(|pair| cities[pair[0]].distance_to(&cities[pair[1]]))
        .sum();

    let last = &cities[genes[genes.len() - 1]];
    let first = &cities[genes[0]];

    legs + last.distance_to(first)
}

pub fn fitness_for_distance(distance: f64) -> f64 {
    if distance == 0.0 {
        DEGENERATE_FITNESS
    } else {
        1.0 / distance
    }
}

/// Shorter tours score higher.
pub fn evaluate(genes: &[usize], cities: &[City]) -> f64 {
    fitness_for_distance(total_distance(genes, cities))
}
