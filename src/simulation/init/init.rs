use crate::domain::config::SceneConfig;
use crate::spatial::BodyArena;
use crate::systems::contacts::CollisionRegistry;
use crate::systems::forces::ForceRegistry;

use super::perf_stats::PerfStats;
use super::SceneCore;

pub(super) fn create_scene_core(config: SceneConfig) -> SceneCore {
    SceneCore {
        arena: BodyArena::new(),
        order: Vec::with_capacity(64),
        forces: ForceRegistry::new(),
        contacts: CollisionRegistry::new(),
        config,
        tick_count: 0,
        elapsed: 0.0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
