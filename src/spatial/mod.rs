//! Spatial bookkeeping - stable body handles.

mod arena;

pub use arena::{BodyArena, BodyHandle};
