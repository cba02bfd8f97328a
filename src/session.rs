use alloc::vec::Vec;

use tracing::{debug, warn};

use crate::{
    ConstraintFilter, CoordinateNum, Edge, EdgeFilter, Engine, EngineState, InsertionReport,
    Point2, Triangle, TriangulationError, Unconstrained,
};

/// Outcome of a single [TriangulationSession::step].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStep<S: CoordinateNum> {
    /// The point at `index` of the point list was inserted.
    Inserted {
        /// Index into [TriangulationSession::points]
        index: usize,
        /// Details of the insertion
        report: InsertionReport<S>,
    },
    /// All points were consumed and the super triangle has been stripped.
    Finalized {
        /// Number of triangles of the final mesh
        num_triangles: usize,
    },
    /// The session was already finalized. Nothing happened.
    Finished,
}

/// Drives an [Engine] through a list of points, one insertion per step.
///
/// A session makes intermediate meshes observable: after every [step](Self::step), the
/// working mesh and the cavity boundary of the last insertion can be inspected. Once all
/// points are consumed, the next step finalizes the engine.
///
/// # Example
/// ```
/// use trowel::{DelaunayEngine, DelaunaySession, Point2, SessionStep, TriangulationError};
///
/// # fn main() -> Result<(), TriangulationError> {
/// let points = vec![
///     Point2::new(1.0, 1.0),
///     Point2::new(-1.0, 1.0),
///     Point2::new(-1.0, -1.0),
///     Point2::new(1.0, -1.0),
/// ];
/// let mut session = DelaunaySession::new(DelaunayEngine::default(), points)?;
///
/// assert!(matches!(session.step()?, SessionStep::Inserted { index: 0, .. }));
/// assert_eq!(session.remaining(), 3);
///
/// let triangles = session.run()?;
/// assert_eq!(triangles.len(), 2);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct TriangulationSession<S: CoordinateNum, F = Unconstrained> {
    engine: Engine<S, F>,
    points: Vec<Point2<S>>,
    next_point: usize,
}

/// A session producing an unconstrained Delaunay triangulation.
pub type DelaunaySession<S> = TriangulationSession<S, Unconstrained>;

/// A session respecting a set of constraint segments.
pub type ConstrainedSession<S> = TriangulationSession<S, ConstraintFilter<S>>;

impl<S: CoordinateNum, F: EdgeFilter<S>> TriangulationSession<S, F> {
    /// Creates a new session.
    ///
    /// An engine in [EngineState::Empty] is bootstrapped from its configuration, see
    /// [Engine::bootstrap_from_config]. Engines that are already bootstrapped are used as is.
    pub fn new(
        mut engine: Engine<S, F>,
        points: impl IntoIterator<Item = Point2<S>>,
    ) -> Result<Self, TriangulationError> {
        if engine.state() == EngineState::Empty {
            engine.bootstrap_from_config()?;
        }
        Ok(TriangulationSession {
            engine,
            points: points.into_iter().collect(),
            next_point: 0,
        })
    }

    /// Inserts the next point or finalizes the engine once all points are consumed.
    ///
    /// A point that fails to insert is skipped: the error is returned and the next call
    /// continues with the following point. The mesh is not modified by a failed insertion.
    pub fn step(&mut self) -> Result<SessionStep<S>, TriangulationError> {
        if self.engine.state() == EngineState::Finalized {
            return Ok(SessionStep::Finished);
        }

        match self.points.get(self.next_point).copied() {
            Some(point) => {
                let index = self.next_point;
                self.next_point += 1;
                match self.engine.insert_point(point) {
                    Ok(report) => Ok(SessionStep::Inserted { index, report }),
                    Err(error) => {
                        warn!(index, ?point, %error, "skipping point");
                        Err(error)
                    }
                }
            }
            None => {
                let num_triangles = self.engine.finalize()?.len();
                debug!(num_triangles, "session finished");
                Ok(SessionStep::Finalized { num_triangles })
            }
        }
    }

    /// Steps until the session is finalized and returns the final mesh.
    ///
    /// Stops at the first failing point. Calling `run` again continues after it.
    pub fn run(&mut self) -> Result<&[Triangle<S>], TriangulationError> {
        loop {
            match self.step()? {
                SessionStep::Inserted { .. } => continue,
                SessionStep::Finalized { .. } | SessionStep::Finished => break,
            }
        }
        self.engine.finalize()
    }

    /// Appends a point that will be inserted by a later step.
    pub fn push_point(&mut self, point: Point2<S>) -> Result<(), TriangulationError> {
        if self.engine.state() == EngineState::Finalized {
            return Err(TriangulationError::AlreadyFinalized);
        }
        self.points.push(point);
        Ok(())
    }

    /// Discards all points and triangles and bootstraps the engine again.
    pub fn clear(&mut self) -> Result<(), TriangulationError> {
        self.points.clear();
        self.next_point = 0;
        self.engine.reset();
        self.engine.bootstrap_from_config()
    }

    /// Returns the working mesh, including triangles connected to the super triangle.
    pub fn current_triangles(&self) -> &[Triangle<S>] {
        self.engine.current_triangles()
    }

    /// Returns the final mesh once the session is finalized.
    pub fn final_triangles(&self) -> Option<&[Triangle<S>]> {
        self.engine.final_triangles()
    }

    /// Returns the cavity boundary of the most recent insertion.
    pub fn boundary_edges(&self) -> &[Edge<S>] {
        self.engine.boundary_edges()
    }

    /// Returns all points of this session, including those that have been inserted.
    pub fn points(&self) -> &[Point2<S>] {
        &self.points
    }

    /// Returns the number of points not yet processed.
    pub fn remaining(&self) -> usize {
        self.points.len() - self.next_point
    }

    /// Returns the underlying engine.
    pub fn engine(&self) -> &Engine<S, F> {
        &self.engine
    }
}
