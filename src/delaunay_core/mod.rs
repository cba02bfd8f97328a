mod engine;
mod orientation;

pub(crate) mod math;

pub use engine::{ConstrainedEngine, DelaunayEngine, Engine, EngineState, InsertionReport};
pub use orientation::{Orientation, EPSILON};
