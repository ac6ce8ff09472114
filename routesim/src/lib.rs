//! Mock walking-route generation.
//!
//! Routes are synthetic: a straight line between two points with every
//! intermediate waypoint nudged by a bounded random offset, a random safety
//! score and tags that match the score.

pub mod features;

use rand::Rng;
use shared::{path_length_km, Location, LocationError, Route, SafetyScore, SafetyTier};
use thiserror::Error;
use uuid::Builder;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("invalid location: {0}")]
    InvalidLocation(#[from] LocationError),

    #[error("invalid generator config: {0}")]
    InvalidConfig(&'static str),
}

/// Tunables for route generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of candidate routes per request
    pub route_count: usize,

    /// Number of legs per route; a route has `steps + 1` waypoints
    pub steps: usize,

    /// Average walking speed used for the ETA
    pub walking_speed_kmh: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            route_count: 3,
            steps: 8,
            walking_speed_kmh: 4.5,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.route_count == 0 {
            return Err(GenerateError::InvalidConfig("route_count must be at least 1"));
        }
        if self.steps == 0 {
            return Err(GenerateError::InvalidConfig("steps must be at least 1"));
        }
        if !(self.walking_speed_kmh.is_finite() && self.walking_speed_kmh > 0.0) {
            return Err(GenerateError::InvalidConfig("walking_speed_kmh must be positive"));
        }
        Ok(())
    }
}

/// Maximum waypoint deviation in degrees; riskier routes wander more
pub fn deviation(tier: SafetyTier) -> f64 {
    match tier {
        SafetyTier::Safe => 0.002,
        SafetyTier::Moderate => 0.003,
        SafetyTier::Caution => 0.006,
    }
}

/// Generate `config.route_count` candidate routes, safest first
pub fn generate_routes<R: Rng>(
    rng: &mut R,
    start: Location,
    end: Location,
    config: &GeneratorConfig,
) -> Result<Vec<Route>, GenerateError> {
    config.validate()?;
    start.validate()?;
    end.validate()?;

    let mut routes: Vec<Route> = (0..config.route_count)
        .map(|_| generate_route(&mut *rng, start, end, config))
        .collect();

    routes.sort_by(|a, b| b.safety_score.cmp(&a.safety_score));

    Ok(routes)
}

fn generate_route<R: Rng>(
    rng: &mut R,
    start: Location,
    end: Location,
    config: &GeneratorConfig,
) -> Route {
    let safety_score = SafetyScore::saturating(rng.gen_range(0..=SafetyScore::MAX));
    let tier = safety_score.tier();

    let waypoints = perturbed_path(rng, start, end, config.steps, deviation(tier));
    let distance_km = path_length_km(&waypoints);
    let eta_minutes = (distance_km / config.walking_speed_kmh * 60.0).ceil() as u32;

    Route {
        id: Builder::from_random_bytes(rng.gen()).into_uuid(),
        name: tier.route_label().to_string(),
        color: tier.color().to_string(),
        waypoints,
        safety_score,
        features: features::pick_features(rng, tier),
        distance_km,
        eta_minutes,
    }
}

/// Straight line from `start` to `end` in `steps` legs with every inner
/// point offset by at most `deviation / 2` on each axis
pub fn perturbed_path<R: Rng>(
    rng: &mut R,
    start: Location,
    end: Location,
    steps: usize,
    deviation: f64,
) -> Vec<Location> {
    let half = deviation / 2.0;
    let mut path = Vec::with_capacity(steps + 1);
    path.push(start);

    for i in 1..steps {
        let t = i as f64 / steps as f64;
        let point = start
            .lerp(&end, t)
            .offset(rng.gen_range(-half..=half), rng.gen_range(-half..=half));
        path.push(point);
    }

    path.push(end);
    path
}
