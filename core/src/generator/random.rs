use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Purely random placement driven by a seeded [`SmallRng`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: &GameConfig) -> Result<MineField> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        MineField::generate(config, &mut rng)
    }
}
