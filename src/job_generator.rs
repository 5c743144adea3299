//! Random page counts for arriving jobs.
//!
//! A uniform draw from `0..10` picks the size bucket, then a uniform draw picks
//! the page count inside it:
//!
//! | draw | share | pages  |
//! |------|-------|--------|
//! | 0-3  | 40%   | 1-10   |
//! | 4-6  | 30%   | 11-25  |
//! | 7-8  | 20%   | 26-50  |
//! | 9    | 10%   | 51-99  |

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Supplies the page count of the next arriving job.
pub trait PageSource {
    fn next_pages(&mut self) -> u32;
}

#[derive(Debug, Clone)]
pub struct TieredPageGenerator<R: Rng = StdRng> {
    rng: R,
}

impl TieredPageGenerator<StdRng> {
    /// Seeded generator, or one seeded from OS entropy when `seed` is `None`.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl<R: Rng> TieredPageGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> PageSource for TieredPageGenerator<R> {
    fn next_pages(&mut self) -> u32 {
        match self.rng.random_range(0..10u32) {
            0..=3 => self.rng.random_range(1..=10),
            4..=6 => self.rng.random_range(11..=25),
            7..=8 => self.rng.random_range(26..=50),
            _ => self.rng.random_range(51..=99),
        }
    }
}

/// Replays a fixed list of page counts, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedPages {
    pages: Vec<u32>,
    cursor: usize,
}

impl ScriptedPages {
    /// `None` for an empty list, which has nothing to replay.
    pub fn new(pages: Vec<u32>) -> Option<Self> {
        if pages.is_empty() {
            return None;
        }
        Some(Self { pages, cursor: 0 })
    }
}

impl PageSource for ScriptedPages {
    fn next_pages(&mut self) -> u32 {
        let pages = self.pages[self.cursor];
        self.cursor = (self.cursor + 1) % self.pages.len();
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_stay_in_range() {
        let mut generator = TieredPageGenerator::from_seed(Some(7));
        for _ in 0..10_000 {
            let pages = generator.next_pages();
            assert!((1..=99).contains(&pages), "pages out of range: {pages}");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = TieredPageGenerator::from_seed(Some(42));
        let mut b = TieredPageGenerator::from_seed(Some(42));
        let xs: Vec<u32> = (0..64).map(|_| a.next_pages()).collect();
        let ys: Vec<u32> = (0..64).map(|_| b.next_pages()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_scripted_pages_cycle() {
        let mut pages = ScriptedPages::new(vec![3, 8]).unwrap();
        assert_eq!(pages.next_pages(), 3);
        assert_eq!(pages.next_pages(), 8);
        assert_eq!(pages.next_pages(), 3);
    }

    #[test]
    fn test_scripted_pages_rejects_empty_list() {
        assert!(ScriptedPages::new(Vec::new()).is_none());
    }
}
