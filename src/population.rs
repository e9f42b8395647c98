use crate::geometry::City;
use crate::route::Route;
use rand::RngCore;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Routes of one generation, kept within `[min_size, max_size]`.
#[derive(Clone, Debug)]
pub struct Population {
    routes: Vec<Route>,
    min_size: usize,
    max_size: usize,
    city_count: usize,
}

impl Population {
    /// `min_size` freshly shuffled routes.
    pub fn random(city_count: usize, min_size: usize, max_size: usize, rng: &mut dyn RngCore) -> Self {
        let routes = (0..min_size)
            .map(|_| Route::random(city_count, rng))
            .collect();

        Self {
            routes,
            min_size,
            max_size,
            city_count,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Scores every route that has no fitness yet.
    pub fn evaluate(&mut self, cities: &[City]) {
        self.routes
            .par_iter_mut()
            .filter(|route| !route.is_evaluated())
            .for_each(|route| {
                route.evaluate(cities);
            });
    }

    /// Highest fitness, first one wins ties.
    pub fn best(&self) -> Option<&Route> {
        self.routes.iter().fold(None, |best: Option<&Route>, route| match best {
            Some(current) if current.fitness() >= route.fitness() => Some(current),
            _ => Some(route),
        })
    }

    /// The `n` fittest routes, in fitness order. Equal fitness keeps population order.
    pub fn fittest(&self, n: usize) -> Vec<Route> {
        let mut ranked: Vec<&Route> = self.routes.iter().collect();
        ranked.sort_by(|a, b| descending_fitness(a, b));

        ranked.into_iter().take(n).cloned().collect()
    }

    /// Swaps in the next generation and brings it back within bounds: tops up with
    /// random routes below the minimum, drops the least fit above the maximum.
    pub fn replace(&mut self, next: Vec<Route>, cities: &[City], rng: &mut dyn RngCore) {
        self.routes = next;

        while self.routes.len() < self.min_size {
            self.routes.push(Route::random(self.city_count, rng));
        }

        self.evaluate(cities);

        if self.routes.len() > self.max_size {
            self.routes.sort_by(descending_fitness);
            self.routes.truncate(self.max_size);
        }
    }
}

fn descending_fitness(a: &Route, b: &Route) -> Ordering {
    b.fitness()
        .partial_cmp(&a.fitness())
        .unwrap_or(Ordering::Equal)
}
