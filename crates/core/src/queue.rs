//! Random piece generation and the upcoming-piece queue.
//!
//! Uses a small deterministic LCG so the same seed always produces the same
//! game. Pieces are drawn uniformly at random; the queue keeps a fixed
//! number of upcoming kinds visible and is topped back up immediately after
//! every draw.

use std::collections::VecDeque;

use blockfall_types::{PieceKind, DEFAULT_LOOKAHEAD, MAX_LOOKAHEAD};

/// Simple deterministic random number generator (Linear Congruential
/// Generator). Good enough for piece selection; not cryptographic.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Creates an RNG with the given seed. Seed 0 is remapped to 1 because
    /// the LCG would otherwise cycle poorly from the zero state.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Generates the next random u32 (Numerical Recipes constants).
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generates a random number in `[0, max)`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Queue of upcoming pieces with a bounded lookahead window.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    upcoming: VecDeque<PieceKind>,
    lookahead: usize,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Creates a queue pre-filled to `lookahead` pieces (clamped to
    /// `1..=MAX_LOOKAHEAD`).
    pub fn new(seed: u32, lookahead: usize) -> Self {
        let mut queue = Self {
            upcoming: VecDeque::with_capacity(MAX_LOOKAHEAD + 1),
            lookahead: lookahead.clamp(1, MAX_LOOKAHEAD),
            rng: SimpleRng::new(seed),
        };
        queue.top_up();
        queue
    }

    fn random_kind(&mut self) -> PieceKind {
        let i = self.rng.next_range(PieceKind::ALL.len() as u32);
        PieceKind::ALL[i as usize]
    }

    fn top_up(&mut self) {
        while self.upcoming.len() < self.lookahead {
            let kind = self.random_kind();
            self.upcoming.push_back(kind);
        }
    }

    /// Takes the next piece and replenishes the queue to the lookahead
    /// length in the same call.
    pub fn draw(&mut self) -> PieceKind {
        let kind = match self.upcoming.pop_front() {
            Some(kind) => kind,
            None => self.random_kind(),
        };
        self.top_up();
        kind
    }

    /// Upcoming piece kinds, soonest first.
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.upcoming.iter().copied()
    }

    /// Pushes a scripted sequence to the front of the queue, so
    /// `kinds[0]` is the next piece drawn. Used for rehearsed openings
    /// and deterministic test scenarios.
    pub fn preload(&mut self, kinds: &[PieceKind]) {
        for &kind in kinds.iter().rev() {
            self.upcoming.push_front(kind);
        }
    }

    /// Number of upcoming pieces the queue keeps visible.
    pub fn lookahead(&self) -> usize {
        self.lookahead
    }

    /// Current RNG state, usable as a seed for a follow-up game.
    pub fn seed(&self) -> u32 {
        self.rng.state
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1, DEFAULT_LOOKAHEAD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PieceQueue::new(777, DEFAULT_LOOKAHEAD);
        let mut b = PieceQueue::new(777, DEFAULT_LOOKAHEAD);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PieceQueue::new(1, DEFAULT_LOOKAHEAD);
        let mut b = PieceQueue::new(2, DEFAULT_LOOKAHEAD);
        let drawn_a: Vec<_> = (0..30).map(|_| a.draw()).collect();
        let drawn_b: Vec<_> = (0..30).map(|_| b.draw()).collect();
        assert_ne!(drawn_a, drawn_b);
    }

    #[test]
    fn queue_replenishes_after_every_draw() {
        let mut queue = PieceQueue::new(7, DEFAULT_LOOKAHEAD);
        assert_eq!(queue.preview().count(), DEFAULT_LOOKAHEAD);
        for _ in 0..10 {
            queue.draw();
            assert_eq!(queue.preview().count(), DEFAULT_LOOKAHEAD);
        }
    }

    #[test]
    fn lookahead_is_clamped() {
        assert_eq!(PieceQueue::new(1, 0).lookahead(), 1);
        assert_eq!(PieceQueue::new(1, 100).lookahead(), MAX_LOOKAHEAD);
    }

    #[test]
    fn preview_matches_draw_order() {
        let mut queue = PieceQueue::new(99, DEFAULT_LOOKAHEAD);
        let previewed: Vec<_> = queue.preview().collect();
        let drawn: Vec<_> = (0..DEFAULT_LOOKAHEAD).map(|_| queue.draw()).collect();
        assert_eq!(previewed, drawn);
    }

    #[test]
    fn preload_front_loads_in_order() {
        let mut queue = PieceQueue::new(1, DEFAULT_LOOKAHEAD);
        queue.preload(&[PieceKind::I, PieceKind::O, PieceKind::T]);
        assert_eq!(queue.draw(), PieceKind::I);
        assert_eq!(queue.draw(), PieceKind::O);
        assert_eq!(queue.draw(), PieceKind::T);
    }

    #[test]
    fn zero_seed_is_usable() {
        let mut queue = PieceQueue::new(0, DEFAULT_LOOKAHEAD);
        queue.draw();
        assert_ne!(queue.seed(), 0);
    }

    #[test]
    fn seed_advances_with_draws() {
        let mut queue = PieceQueue::new(42, DEFAULT_LOOKAHEAD);
        let before = queue.seed();
        queue.draw();
        assert_ne!(queue.seed(), before);
    }

    #[test]
    fn all_kinds_eventually_appear() {
        let mut queue = PieceQueue::new(3, DEFAULT_LOOKAHEAD);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(queue.draw());
        }
        assert_eq!(seen.len(), PieceKind::ALL.len());
    }
}
