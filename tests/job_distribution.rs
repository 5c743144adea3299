// Job size distribution of the tiered generator

use spooler_rs::SizeTier;
use spooler_rs::job_generator::{PageSource, TieredPageGenerator};

#[test]
fn test_tier_shares_over_100k_jobs() {
    const SAMPLES: usize = 100_000;
    let mut generator = TieredPageGenerator::from_seed(Some(2024));
    let mut counts = [0usize; 4];
    for _ in 0..SAMPLES {
        let pages = generator.next_pages();
        assert!((1..=99).contains(&pages));
        let bucket = match SizeTier::from_pages(pages) {
            SizeTier::Small => 0,
            SizeTier::Medium => 1,
            SizeTier::Large => 2,
            SizeTier::VeryLarge => 3,
        };
        counts[bucket] += 1;
    }

    let expected = [0.40, 0.30, 0.20, 0.10];
    for (bucket, (&count, &share)) in counts.iter().zip(expected.iter()).enumerate() {
        let observed = count as f64 / SAMPLES as f64;
        assert!(
            (observed - share).abs() < 0.01,
            "bucket {bucket}: observed {observed:.4}, expected {share:.2}"
        );
    }
}

#[test]
fn test_every_page_count_reachable() {
    let mut generator = TieredPageGenerator::from_seed(Some(1));
    let mut seen = [false; 100];
    for _ in 0..200_000 {
        seen[generator.next_pages() as usize] = true;
    }
    assert!(!seen[0]);
    assert!(seen[1..=99].iter().all(|&hit| hit));
}
