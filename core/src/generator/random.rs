use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniform placement by rejection sampling: draw a random tile, redraw if it
/// already holds a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn generate_with_rng<R: Rng>(
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<MineLayout> {
        config.validate()?;

        let (rows, cols) = config.size();
        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        let mut placed: CellCount = 0;
        let mut rejected: u32 = 0;

        while placed < config.mines {
            let pos: Coord2 = (rng.random_range(0..rows), rng.random_range(0..cols));
            let tile = &mut mine_mask[pos.to_nd_index()];
            if *tile {
                rejected += 1;
                continue;
            }
            *tile = true;
            placed += 1;
        }

        log::trace!(
            "Placed {} mines on {}x{} with {} rejected draws",
            placed,
            config.width,
            config.height,
            rejected
        );
        Ok(MineLayout::from_mine_mask(mine_mask))
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: &GameConfig) -> Result<MineLayout> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let layout = Self::generate_with_rng(config, &mut rng)?;
        log::debug!(
            "Generated layout with seed {}: {}x{}, {} mines",
            self.seed,
            config.width,
            config.height,
            layout.mine_count()
        );
        Ok(layout)
    }
}
