use wasm_bindgen::prelude::*;

/// Snapshot of the last tick. All zeros while perf metrics are disabled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) tick_ms: f64,
    pub(super) forces_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) collisions_ms: f64,
    pub(super) compact_ms: f64,
    pub(super) body_count: u32,
    pub(super) bodies_removed: u32,
    pub(super) forces_applied: u32,
    pub(super) collisions_fired: u32,
    pub(super) active_forces: u32,
    pub(super) active_collisions: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 { self.tick_ms }
    #[wasm_bindgen(getter)]
    pub fn forces_ms(&self) -> f64 { self.forces_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn collisions_ms(&self) -> f64 { self.collisions_ms }
    #[wasm_bindgen(getter)]
    pub fn compact_ms(&self) -> f64 { self.compact_ms }
    /// Bodies left after compaction
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn bodies_removed(&self) -> u32 { self.bodies_removed }
    #[wasm_bindgen(getter)]
    pub fn forces_applied(&self) -> u32 { self.forces_applied }
    #[wasm_bindgen(getter)]
    pub fn collisions_fired(&self) -> u32 { self.collisions_fired }
    #[wasm_bindgen(getter)]
    pub fn active_forces(&self) -> u32 { self.active_forces }
    #[wasm_bindgen(getter)]
    pub fn active_collisions(&self) -> u32 { self.active_collisions }
}

#[cfg(target_arch = "wasm32")]
type Stamp = f64;
#[cfg(not(target_arch = "wasm32"))]
type Stamp = std::time::Instant;

// `Instant` is unavailable in the browser; wasm builds read the JS clock.
fn stamp() -> Stamp {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::Instant::now()
    }
}

fn ms_between(from: Stamp, to: Stamp) -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        to - from
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        to.duration_since(from).as_secs_f64() * 1000.0
    }
}

/// Splits one tick into consecutive phase timings.
pub(crate) struct PhaseClock {
    tick_start: Stamp,
    phase_start: Stamp,
}

impl PhaseClock {
    pub(crate) fn start() -> Self {
        let now = stamp();
        Self { tick_start: now, phase_start: now }
    }

    /// Milliseconds since the previous lap (or the start); opens the next phase.
    pub(crate) fn lap(&mut self) -> f64 {
        let now = stamp();
        let ms = ms_between(self.phase_start, now);
        self.phase_start = now;
        ms
    }

    /// Milliseconds since the clock started
    pub(crate) fn total(&self) -> f64 {
        ms_between(self.tick_start, stamp())
    }
}
