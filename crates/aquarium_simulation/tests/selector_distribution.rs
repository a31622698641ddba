//! Rarity distribution tests
//!
//! Большая выборка через `select`: частоты тиров ≈ веса.

use aquarium_simulation::{select, FishDescriptor, RarityTier, RarityWeights, SpawnCatalog, SurfaceColor};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DRAWS: usize = 100_000;

fn tier_frequencies(weights: RarityWeights, catalog: &SpawnCatalog, seed: u64) -> [f64; 3] {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut hits = [0usize; 3];

    for _ in 0..DRAWS {
        let selection = select(&weights, catalog, &mut rng).expect("catalog is not empty");
        hits[selection.descriptor.tier.ordinal()] += 1;
    }

    hits.map(|count| count as f64 / DRAWS as f64)
}

#[test]
fn test_default_weights_distribution() {
    let frequencies = tier_frequencies(RarityWeights::default(), &SpawnCatalog::default(), 7);

    assert!((frequencies[0] - 0.70).abs() < 0.01, "Common: {}", frequencies[0]);
    assert!((frequencies[1] - 0.25).abs() < 0.01, "Rare: {}", frequencies[1]);
    assert!((frequencies[2] - 0.05).abs() < 0.005, "Epic: {}", frequencies[2]);
}

#[test]
fn test_custom_weights_distribution() {
    let weights = RarityWeights::new(1, 1, 2);
    let frequencies = tier_frequencies(weights, &SpawnCatalog::default(), 99);

    assert!((frequencies[0] - 0.25).abs() < 0.01, "Common: {}", frequencies[0]);
    assert!((frequencies[1] - 0.25).abs() < 0.01, "Rare: {}", frequencies[1]);
    assert!((frequencies[2] - 0.50).abs() < 0.01, "Epic: {}", frequencies[2]);
}

#[test]
fn test_uniform_within_tier() {
    let catalog = SpawnCatalog::default();
    let commons = catalog.of_tier(RarityTier::Common).len();
    let weights = RarityWeights::new(1, 0, 0);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let mut by_name = std::collections::HashMap::<String, usize>::new();
    for _ in 0..DRAWS {
        let selection = select(&weights, &catalog, &mut rng).expect("catalog is not empty");
        *by_name.entry(selection.descriptor.name.clone()).or_default() += 1;
    }

    assert_eq!(by_name.len(), commons);
    let expected = 1.0 / commons as f64;
    for (name, count) in by_name {
        let share = count as f64 / DRAWS as f64;
        assert!((share - expected).abs() < 0.01, "{name}: {share}");
    }
}

#[test]
fn test_fallback_spreads_over_whole_catalog() {
    // Только Common рыбы, но выпадает только Epic → fallback на весь каталог
    let catalog = SpawnCatalog::new(vec![
        FishDescriptor::new("Guppy", RarityTier::Common, 0.4, 2.8, SurfaceColor::rgb(0.9, 0.8, 0.2)),
        FishDescriptor::new("Molly", RarityTier::Common, 0.5, 2.2, SurfaceColor::rgb(0.1, 0.1, 0.1)),
    ])
    .expect("valid catalog");
    let weights = RarityWeights::new(0, 0, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let mut guppies = 0usize;
    for _ in 0..10_000 {
        let selection = select(&weights, &catalog, &mut rng).expect("catalog is not empty");
        assert!(selection.fallback);
        assert_eq!(selection.rolled_tier, RarityTier::Epic);
        if selection.descriptor.name == "Guppy" {
            guppies += 1;
        }
    }

    assert!((4_500..=5_500).contains(&guppies), "guppies: {guppies}");
}
