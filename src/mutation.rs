use crate::genetic_algorithm::MutationStrategy;
use rand::prelude::*;

/// Two distinct positions `i < j`.
fn distinct_positions(len: usize, rng: &mut dyn RngCore) -> (usize, usize) {
    let i = rng.gen_range(0..len);
    let mut j = rng.gen_range(0..len - 1);
    if j >= i {
        j += 1;
    }

    (i.min(j), i.max(j))
}

/// Reverses the sub-sequence between two random positions, both inclusive.
#[derive(Clone, Debug, Default)]
pub struct ReverseSequenceMutation;

impl MutationStrategy for ReverseSequenceMutation {
    fn mutate(&self, genes: &mut [usize], rng: &mut dyn RngCore) {
        if genes.len() < 2 {
            return;
        }

        let (i, j) = distinct_positions(genes.len(), rng);
        genes[i..=j].reverse();
    }
}

/// Exchanges the cities at two random positions.
#[derive(Clone, Debug, Default)]
pub struct SwapMutation;

impl MutationStrategy for SwapMutation {
    fn mutate(&self, genes: &mut [usize], rng: &mut dyn RngCore) {
        if genes.len() < 2 {
            return;
        }

        let (i, j) = distinct_positions(genes.len(), rng);
        genes.swap(i, j);
    }
}
