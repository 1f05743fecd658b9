use tracing::debug;

use crate::domain::config::SceneConfig;
use crate::domain::error::EngineError;

use super::perf_stats::PerfStats;
use super::SceneCore;

pub(super) fn enable_perf_metrics(scene: &mut SceneCore, enabled: bool) {
    scene.perf_enabled = enabled;
    if !enabled {
        scene.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(scene: &SceneCore) -> PerfStats {
    scene.perf_stats.clone()
}

pub(super) fn set_config(scene: &mut SceneCore, config: SceneConfig) -> Result<(), EngineError> {
    config.validate()?;
    debug!(?config, "scene config updated");
    scene.config = config;
    Ok(())
}
