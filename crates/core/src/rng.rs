//! RNG module - tile draws for refill and reshuffle
//!
//! Every new tile on the board comes from a [`TileSource`]. The default source
//! is [`SeededTiles`], a palette-aware wrapper around a small seeded LCG so that
//! the same seed always produces the same board. [`ReplayTiles`] feeds a fixed
//! sequence and is meant for tests and replays.

use match3_types::TileKind;

/// Supplies freshly drawn tiles.
///
/// Implementations must return kinds inside their palette; every call is an
/// independent draw.
pub trait TileSource {
    fn draw(&mut self) -> TileKind;
}

impl<S: TileSource + ?Sized> TileSource for &mut S {
    fn draw(&mut self) -> TileKind {
        (**self).draw()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Independent uniform draws over a palette of `palette` kinds
#[derive(Debug, Clone)]
pub struct SeededTiles {
    rng: SimpleRng,
    palette: u8,
}

impl SeededTiles {
    /// Create a source for kinds `0..palette`.
    ///
    /// A palette of zero is treated as one.
    pub fn new(seed: u32, palette: u8) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            palette: palette.max(1),
        }
    }
}

impl TileSource for SeededTiles {
    fn draw(&mut self) -> TileKind {
        TileKind::new(self.rng.next_range(u32::from(self.palette)) as u8)
    }
}

/// Replays a fixed sequence of kinds, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ReplayTiles {
    kinds: Vec<TileKind>,
    next: usize,
}

impl ReplayTiles {
    /// Build from palette indices. An empty sequence replays kind 0.
    pub fn new(indices: &[u8]) -> Self {
        let kinds = if indices.is_empty() {
            vec![TileKind::new(0)]
        } else {
            indices.iter().copied().map(TileKind::new).collect()
        };
        Self { kinds, next: 0 }
    }

    /// Number of tiles drawn so far
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl TileSource for ReplayTiles {
    fn draw(&mut self) -> TileKind {
        let kind = self.kinds[self.next % self.kinds.len()];
        self.next += 1;
        kind
    }
}
