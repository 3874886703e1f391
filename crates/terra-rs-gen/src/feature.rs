//! The placement contract shared by trees, dungeons and other features.

use std::sync::Arc;

use rand::{Rng, RngCore};
use terra_rs_world::BlockPos;

use crate::world::LocalWorld;

/// Something that can be placed into the world at a position.
pub trait Feature {
    /// Try to place the feature at `pos`. Returns whether anything was placed.
    fn place(&self, world: &dyn LocalWorld, rng: &mut dyn RngCore, pos: BlockPos) -> bool;
}

impl<F> Feature for F
where
    F: Fn(&dyn LocalWorld, &mut dyn RngCore, BlockPos) -> bool,
{
    fn place(&self, world: &dyn LocalWorld, rng: &mut dyn RngCore, pos: BlockPos) -> bool {
        self(world, rng, pos)
    }
}

/// Places one of two features, chosen with equal probability.
pub struct RandomChoice {
    first: Arc<dyn Feature>,
    second: Arc<dyn Feature>,
}

impl RandomChoice {
    pub fn new(first: Arc<dyn Feature>, second: Arc<dyn Feature>) -> Self {
        Self { first, second }
    }
}

impl Feature for RandomChoice {
    fn place(&self, world: &dyn LocalWorld, rng: &mut dyn RngCore, pos: BlockPos) -> bool {
        if rng.gen_bool(0.5) {
            self.first.place(world, rng, pos)
        } else {
            self.second.place(world, rng, pos)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::world::test_support::grid_world;

    fn counting(counter: Arc<AtomicUsize>) -> Arc<dyn Feature> {
        Arc::new(move |_: &dyn LocalWorld, _: &mut dyn RngCore, _: BlockPos| {
            counter.fetch_add(1, Ordering::Relaxed);
            true
        })
    }

    #[test]
    fn random_choice_uses_both_features() {
        let (_, world) = grid_world(0, 0);
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let choice = RandomChoice::new(counting(first.clone()), counting(second.clone()));
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            assert!(choice.place(&world, &mut rng, BlockPos::new(0, 64, 0)));
        }
        let (first, second) = (first.load(Ordering::Relaxed), second.load(Ordering::Relaxed));
        assert_eq!(first + second, 200);
        assert!(first > 0 && second > 0);
    }

    #[test]
    fn random_choice_is_deterministic_per_seed() {
        let (_, world) = grid_world(0, 0);
        let picks = |seed| {
            let first = Arc::new(AtomicUsize::new(0));
            let choice = RandomChoice::new(
                counting(first.clone()),
                counting(Arc::new(AtomicUsize::new(0))),
            );
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..50 {
                choice.place(&world, &mut rng, BlockPos::new(0, 64, 0));
            }
            first.load(Ordering::Relaxed)
        };
        assert_eq!(picks(9), picks(9));
    }
}
