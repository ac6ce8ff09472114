use rand::seq::SliceRandom;
use rand::Rng;
use shared::SafetyTier;

/// Tags describing reassuring surroundings
pub const POSITIVE_FEATURES: &[&str] = &[
    "well-lit",
    "busy",
    "cctv",
    "police-patrols",
    "open-shops",
    "main-road",
];

/// Tags describing a mix of good and bad surroundings
pub const MIXED_FEATURES: &[&str] = &[
    "residential",
    "moderate-lighting",
    "some-crowds",
    "construction",
    "park",
];

/// Tags describing risky surroundings
pub const NEGATIVE_FEATURES: &[&str] = &[
    "isolated",
    "poor-visibility",
    "poor-lighting",
    "reported-incidents",
    "vacant-lots",
];

/// The vocabulary a tier draws its tags from
pub fn vocabulary(tier: SafetyTier) -> &'static [&'static str] {
    match tier {
        SafetyTier::Safe => POSITIVE_FEATURES,
        SafetyTier::Moderate => MIXED_FEATURES,
        SafetyTier::Caution => NEGATIVE_FEATURES,
    }
}

/// Pick 2 or 3 distinct tags matching the tier
pub fn pick_features<R: Rng>(rng: &mut R, tier: SafetyTier) -> Vec<String> {
    let count = rng.gen_range(2..=3);
    vocabulary(tier)
        .choose_multiple(rng, count)
        .map(|tag| tag.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_features_are_distinct_and_from_vocabulary() {
        let mut rng = StdRng::seed_from_u64(7);
        for tier in [SafetyTier::Safe, SafetyTier::Moderate, SafetyTier::Caution] {
            for _ in 0..50 {
                let tags = pick_features(&mut rng, tier);
                assert!((2..=3).contains(&tags.len()));

                let unique: HashSet<_> = tags.iter().collect();
                assert_eq!(unique.len(), tags.len());
                assert!(tags.iter().all(|t| vocabulary(tier).contains(&t.as_str())));
            }
        }
    }
}
