use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

mod recur_backtrack;

pub use recur_backtrack::recursive_backtrack;

use crate::maze::{Coord, Maze};

/// Source of the random candidate order used while carving.
///
/// Every [`rand::Rng`] is a `Shuffler`. Tests can plug in a fixed order to get a known maze.
pub trait Shuffler {
    fn shuffle_coords(&mut self, coords: &mut [Coord]);
}

impl<R: Rng + ?Sized> Shuffler for R {
    fn shuffle_coords(&mut self, coords: &mut [Coord]) {
        coords.shuffle(self);
    }
}

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Carve a perfect maze starting from the top-left cell.
pub fn generate_maze(maze: &mut Maze, seed: Option<u64>) {
    let mut rng = get_rng(seed);
    recursive_backtrack(maze, &mut rng);
}
