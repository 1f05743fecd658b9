use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// How two bodies' elasticities combine during a bounce.
///
/// Only consulted when both bodies can move; against an immovable body the
/// moving body's elasticity is used unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RestitutionPolicy {
    #[default]
    Product,
    Min,
    Max,
    Average,
}

impl RestitutionPolicy {
    pub fn combine(self, a: f64, b: f64) -> f64 {
        match self {
            RestitutionPolicy::Product => a * b,
            RestitutionPolicy::Min => a.min(b),
            RestitutionPolicy::Max => a.max(b),
            RestitutionPolicy::Average => (a + b) * 0.5,
        }
    }
}

/// Tunables shared by every rule in a scene.
///
/// Loaded from camelCase JSON; missing fields take the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneConfig {
    /// Speed ceiling applied after a bounce impulse.
    pub max_speed: f64,
    /// Below this centroid distance attraction forces skip the tick.
    pub min_attraction_distance: f64,
    /// Overlap at or below this is treated as touching, not colliding.
    pub collision_epsilon: f64,
    pub restitution: RestitutionPolicy,
}

pub const DEFAULT_MAX_SPEED: f64 = 10_000.0;
pub const DEFAULT_MIN_ATTRACTION_DISTANCE: f64 = 1e-3;
pub const DEFAULT_COLLISION_EPSILON: f64 = 1e-9;

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            min_attraction_distance: DEFAULT_MIN_ATTRACTION_DISTANCE,
            collision_epsilon: DEFAULT_COLLISION_EPSILON,
            restitution: RestitutionPolicy::Product,
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "maxSpeed must be positive and finite, got {}",
                self.max_speed
            )));
        }
        if !(self.min_attraction_distance.is_finite() && self.min_attraction_distance >= 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "minAttractionDistance must be non-negative and finite, got {}",
                self.min_attraction_distance
            )));
        }
        if !(self.collision_epsilon.is_finite() && self.collision_epsilon >= 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "collisionEpsilon must be non-negative and finite, got {}",
                self.collision_epsilon
            )));
        }
        Ok(())
    }
}
