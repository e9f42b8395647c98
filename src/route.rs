use crate::fitness::{fitness_for_distance, total_distance};
use crate::geometry::City;
use rand::prelude::*;

/// A candidate tour: a permutation of city indices with its cached evaluation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    genes: Vec<usize>,
    fitness: Option<f64>,
    distance: Option<f64>,
}

impl Route {
    /// Uniformly shuffled permutation of `0..city_count`.
    pub fn random(city_count: usize, rng: &mut dyn RngCore) -> Self {
        let mut genes: Vec<usize> = (0..city_count).collect();
        genes.shuffle(rng);

        Self::from_genes(genes)
    }

    pub fn from_genes(genes: Vec<usize>) -> Self {
        Self {
            genes,
            ..Default::default()
        }
    }

    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Mutable access to the genes. Drops the cached evaluation.
    pub fn genes_mut(&mut self) -> &mut [usize] {
        self.fitness = None;
        self.distance = None;
        &mut self.genes
    }

    pub fn into_genes(self) -> Vec<usize> {
        self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Fitness of the last evaluation, `0.0` if the route was never evaluated.
    pub fn fitness(&self) -> f64 {
        self.fitness.unwrap_or(0.0)
    }

    pub fn distance(&self) -> Option<f64> {
        self.distance
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    pub fn evaluate(&mut self, cities: &[City]) -> f64 {
        let distance = total_distance(&self.genes, cities);
        let fitness = fitness_for_distance(distance);

        self.distance = Some(distance);
        self.fitness = Some(fitness);

        fitness
    }

    /// True when every index in `0..city_count` appears exactly once.
    pub fn is_valid_permutation(&self, city_count: usize) -> bool {
        is_permutation(&self.genes, city_count)
    }
}

pub fn is_permutation(genes: &[usize], city_count: usize) -> bool {
    if genes.len() != city_count {
        return false;
    }

    let mut seen = vec![false; city_count];
    for &gene in genes {
        if gene >= city_count || seen[gene] {
            return false;
        }
        seen[gene] = true;
    }

    true
}
