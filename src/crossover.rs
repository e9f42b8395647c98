use crate::genetic_algorithm::CrossoverStrategy;
use rand::prelude::*;

/// Order crossover (OX).
///
/// Copies a random segment of the first parent into the same positions of the
/// child, then fills the remaining positions from left to right with the second
/// parent's genes in their original order, skipping genes already placed.
/// Valid parents always give a valid child.
#[derive(Clone, Debug, Default)]
pub struct OrderedCrossover;

impl OrderedCrossover {
    /// Crossover with an explicit inclusive segment `[start, end]` of `parent_a`.
    pub fn cross_segment(
        parent_a: &[usize],
        parent_b: &[usize],
        start: usize,
        end: usize,
    ) -> Vec<usize> {
        let n = parent_a.len();
        let mut child: Vec<Option<usize>> = vec![None; n];
        let mut placed = vec![false; n];

        for position in start..=end {
            child[position] = Some(parent_a[position]);
            placed[parent_a[position]] = true;
        }

        let mut donors = parent_b.iter().filter(|&&gene| !placed[gene]);
        for slot in child.iter_mut().filter(|slot| slot.is_none()) {
            *slot = donors.next().copied();
        }

        child.into_iter().flatten().collect()
    }
}

impl CrossoverStrategy for OrderedCrossover {
    fn cross(&self, parent_a: &[usize], parent_b: &[usize], rng: &mut dyn RngCore) -> Vec<usize> {
        debug_assert_eq!(parent_a.len(), parent_b.len());

        let n = parent_a.len();
        if n < 2 {
            return parent_a.to_vec();
        }

        let mut start = rng.gen_range(0..n);
        let mut end = rng.gen_range(0..n);
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }

        Self::cross_segment(parent_a, parent_b, start, end)
    }
}
