use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use thiserror::Error;

use crate::Coord;
use crate::flatfile;
use crate::flatfile::FlatFileError;

/// Side length of the standard playing field.
pub const DEFAULT_DIM: usize = 60;

#[derive(Debug, Error)]
pub enum PopulateError {
    #[error("Requested {requested} new cells, but only {available} dead cells remain")]
    Overflow { requested: usize, available: usize },
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Failed to write grid file: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read grid file: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed grid file: {0}")]
    Malformed(#[from] FlatFileError),
}

/// A square Life board with a hard boundary.
///
/// Cells are stored row-major in a flat buffer. Every public operation goes
/// through [`Grid::index`] for its bounds check, so positions outside
/// `[0, dim)` on either axis behave as permanently dead: queries return
/// `false` and mutations are silent no-ops.
pub struct Grid {
    cells: Vec<bool>,

    /// Side length of the board
    dim: usize,

    /// Number of completed [`Grid::step`]s since the last reset
    generation: u64,

    /// Maintained incrementally by `set_alive`/`kill`, recomputed by
    /// counting after `step` and `load`
    live_count: usize,

    /// Last path touched by `save` or `load`
    source: Option<PathBuf>,

    rng: SmallRng,
}

impl Grid {
    /// Create an all-dead `dim` x `dim` grid with an entropy-seeded RNG.
    pub fn new(dim: usize) -> Self {
        Self::with_rng(dim, SmallRng::from_entropy())
    }

    /// Like [`Grid::new`], but with a fixed seed so that `populate_random`
    /// is reproducible.
    pub fn seeded(dim: usize, seed: u64) -> Self {
        Self::with_rng(dim, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(dim: usize, rng: SmallRng) -> Self {
        Self {
            cells: vec![false; dim * dim],
            dim,
            generation: 0,
            live_count: 0,
            source: None,
            rng,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// Last path touched by `save` or `load`, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The single bounds-check choke point. `None` is the permanently-dead
    /// outside of the board.
    fn index(&self, row: Coord, col: Coord) -> Option<usize> {
        let dim = self.dim as Coord;

        if (0..dim).contains(&row) && (0..dim).contains(&col) {
            Some(row as usize * self.dim + col as usize)
        } else {
            None
        }
    }

    /// Mark a cell alive. Already-alive and out-of-bounds positions are
    /// left untouched.
    pub fn set_alive(&mut self, row: Coord, col: Coord) {
        let Some(i) = self.index(row, col) else { return };

        if !self.cells[i] {
            self.cells[i] = true;
            self.live_count += 1;
        }
    }

    /// Mark a cell dead. Already-dead and out-of-bounds positions are left
    /// untouched.
    pub fn kill(&mut self, row: Coord, col: Coord) {
        let Some(i) = self.index(row, col) else { return };

        if self.cells[i] {
            self.cells[i] = false;
            self.live_count -= 1;
        }
    }

    /// Whether the cell is alive. Out-of-bounds positions are dead.
    pub fn is_alive(&self, row: Coord, col: Coord) -> bool {
        self.index(row, col).is_some_and(|i| self.cells[i])
    }

    /// Count the live cells in the 3x3 window around `(row, col)`, the
    /// center excluded. The boundary does not wrap: positions beyond it
    /// count as dead.
    pub fn count_neighbors(&self, row: Coord, col: Coord) -> u8 {
        let mut count = 0;

        for r in row - 1..=row + 1 {
            for c in col - 1..=col + 1 {
                if (r, c) != (row, col) && self.is_alive(r, c) {
                    count += 1;
                }
            }
        }

        count
    }

    /// Turn exactly `count` currently-dead cells alive, chosen uniformly
    /// and without duplicates. Existing live cells and the generation
    /// counter are left as-is.
    pub fn populate_random(&mut self, count: usize) -> Result<(), PopulateError> {
        let dead: Vec<usize> = (0..self.cells.len()).filter(|&i| !self.cells[i]).collect();

        if count > dead.len() {
            return Err(PopulateError::Overflow {
                requested: count,
                available: dead.len(),
            });
        }

        for i in rand::seq::index::sample(&mut self.rng, dead.len(), count) {
            self.cells[dead[i]] = true;
        }

        self.live_count += count;

        Ok(())
    }

    /// Kill every cell and reset the generation counter. The `source` label
    /// survives a clear.
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.live_count = 0;
        self.generation = 0;
    }

    /// Advance one generation.
    ///
    /// The next state of every cell is computed against the current matrix
    /// only, then committed at once: a live cell survives with 2 or 3 live
    /// neighbors, a dead cell is born with exactly 3.
    pub fn step(&mut self) {
        let mut next = vec![false; self.cells.len()];
        let mut live = 0;

        for row in 0..self.dim {
            for col in 0..self.dim {
                let i = row * self.dim + col;
                let neighbors = self.count_neighbors(row as Coord, col as Coord);

                let alive = matches!(
                    (self.cells[i], neighbors),
                    (true, 2 | 3) | (false, 3)
                );

                if alive {
                    live += 1;
                }

                next[i] = alive;
            }
        }

        self.cells = next;
        self.live_count = live;
        self.generation += 1;
    }

    /// Advance `n` generations.
    pub fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Write the grid to `path` in the flat 0/1 text format. On success the
    /// grid remembers `path` as its `source`.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let path = path.as_ref();

        fs::write(path, flatfile::encode(&self.cells, self.dim))?;
        self.source = Some(path.to_path_buf());

        Ok(())
    }

    /// Replace the grid with the contents of `path`.
    ///
    /// The grid is cleared before the file is touched, so a failed load
    /// leaves an empty board rather than a half-written one. Short or
    /// non-numeric files fail with [`LoadError::Malformed`].
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();

        self.clear();

        let text = fs::read_to_string(path)?;
        let cells = flatfile::decode(&text, self.dim)?;

        self.live_count = cells.iter().filter(|&&alive| alive).count();
        self.cells = cells;
        self.source = Some(path.to_path_buf());

        Ok(())
    }

    /// A text snapshot of the board: one line per row of space-separated
    /// `O`/`.` glyphs, a blank line, then a summary of the counters.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(2 * self.dim * (self.dim + 1) + 64);

        for row in self.cells.chunks(self.dim) {
            for (col, &alive) in row.iter().enumerate() {
                if col > 0 {
                    out.push(' ');
                }

                out.push(if alive { 'O' } else { '.' });
            }

            out.push('\n');
        }

        let source = match &self.source {
            Some(path) => path.display().to_string(),
            None => String::from("none"),
        };

        out.push('\n');
        out.push_str(&format!(
            "Live Cells: {} | Generation: {} | File: {}\n",
            self.live_count, self.generation, source
        ));

        out
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_DIM)
    }
}
