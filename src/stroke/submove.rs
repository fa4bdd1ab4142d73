use std::sync::{Arc, OnceLock};

use crate::config::RuleConfig;
use crate::error::{GeometryError, OperationError, Result, TopologyError};
use crate::geometry::Polyline;
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::{distance, Point2, Vector2, TOLERANCE};
use crate::operations::modification::fold_submove;
use crate::topology::{Color, DirectedEdge, EdgeColor, FaceId, GraphState, Vertex};

/// Why the scan of a stroke stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A sample left the playing area.
    OutOfBounds,
    /// The stroke came within the glue radius of an alive sprout.
    Sprout,
    /// The stroke passed too close to a vertex that cannot end a submove.
    NearBlockedVertex,
    /// The stroke crossed itself.
    SelfIntersection,
    /// The stroke crossed an edge of the face it was drawn in.
    Boundary(EdgeColor),
    /// The stroke ran out of samples.
    StrokeEnded,
}

#[derive(Debug, Clone)]
struct Derivation {
    edge: DirectedEdge,
    termination: Termination,
    face: Option<FaceId>,
    /// First stroke index not consumed by this submove.
    resume: usize,
}

#[derive(Debug)]
struct Inner {
    origin: Vertex,
    origin_position: Point2,
    stroke: Arc<[Point2]>,
    cursor: usize,
    state: Arc<GraphState>,
    config: RuleConfig,
    derived: OnceLock<Derivation>,
    successor: OnceLock<Option<Submove>>,
}

/// One stroke segment between two graph vertices, drawn against a fixed state.
///
/// The candidate edge is derived from the stroke on first request and
/// memoized; the submove that continues past a cobweb crossing is built
/// lazily the same way. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Submove {
    inner: Arc<Inner>,
}

impl Submove {
    /// Starts a submove at `origin`, reading `stroke` from its second sample
    /// (the first sample is the touch point, replaced by the origin position).
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the stroke is empty and
    /// `TopologyError::EntityNotFound` if `origin` is not a vertex of `state`.
    pub fn new(
        origin: Vertex,
        stroke: Arc<[Point2]>,
        state: Arc<GraphState>,
        config: RuleConfig,
    ) -> Result<Self> {
        if stroke.is_empty() {
            return Err(OperationError::InvalidInput("stroke has no points".to_owned()).into());
        }
        if !state.contains_vertex(&origin) {
            return Err(TopologyError::EntityNotFound(format!("origin vertex {origin:?}")).into());
        }
        Self::chained(origin, stroke, 1, state, config)
    }

    fn chained(
        origin: Vertex,
        stroke: Arc<[Point2]>,
        cursor: usize,
        state: Arc<GraphState>,
        config: RuleConfig,
    ) -> Result<Self> {
        let origin_position = origin.position().ok_or_else(|| {
            OperationError::InvalidInput("submove origin has no position".to_owned())
        })?;
        Ok(Self {
            inner: Arc::new(Inner {
                origin,
                origin_position,
                stroke,
                cursor,
                state,
                config,
                derived: OnceLock::new(),
                successor: OnceLock::new(),
            }),
        })
    }

    #[must_use]
    pub fn origin(&self) -> Vertex {
        self.inner.origin
    }

    /// Returns the state this submove is drawn against.
    #[must_use]
    pub fn state(&self) -> &Arc<GraphState> {
        &self.inner.state
    }

    #[must_use]
    pub fn config(&self) -> &RuleConfig {
        &self.inner.config
    }

    /// Returns the stroke samples this submove reads.
    #[must_use]
    pub fn samples(&self) -> &[Point2] {
        let start = self.inner.cursor.min(self.inner.stroke.len());
        &self.inner.stroke[start..]
    }

    /// Returns the derived candidate edge.
    #[must_use]
    pub fn edge(&self) -> &DirectedEdge {
        &self.derivation().edge
    }

    #[must_use]
    pub fn termination(&self) -> Termination {
        self.derivation().termination
    }

    /// Returns the face the stroke was drawn into, once it left the origin.
    #[must_use]
    pub fn face(&self) -> Option<FaceId> {
        self.derivation().face
    }

    #[must_use]
    pub fn destination(&self) -> Vertex {
        self.edge().to()
    }

    /// Returns the initial direction of the drawn edge.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if no stroke sample leaves the origin.
    pub fn direction(&self) -> Result<Vector2> {
        let heading = self.edge().heading();
        if heading.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(heading)
    }

    /// The edge ends on a sprout or on a cobweb crossing.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self.edge().to_color(), Color::Sprout | Color::Cobweb)
    }

    /// The edge ends on a cobweb crossing, so the move continues past it.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.edge().to_color() == Color::Cobweb
    }

    /// Checks node lives against the state the submove is drawn on.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let state = &self.inner.state;
        let origin = self.inner.origin;
        let destination = self.destination();
        if destination.color() == Some(Color::Invalid) {
            return false;
        }
        if origin.is_sprout() && !state.is_alive_sprout(&origin) {
            return false;
        }
        if destination.is_sprout() && !state.is_alive_sprout(&destination) {
            return false;
        }
        if origin == destination {
            // A loop spends two lives of the same sprout.
            return state
                .vertex_degree(&origin, EdgeColor::Move)
                .is_some_and(|d| d + 2 <= crate::topology::SPROUT_LIVES);
        }
        true
    }

    /// Returns the state with this submove's edge folded in.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`fold_submove`].
    pub fn state_after(&self) -> Result<GraphState> {
        fold_submove(&self.inner.state, self.edge())
    }

    /// Returns the submove continuing past a cobweb crossing, drawn against
    /// the state in which the crossed edge is split and this edge is added.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.inner
            .successor
            .get_or_init(|| self.build_successor())
            .clone()
    }

    fn build_successor(&self) -> Option<Self> {
        if !self.has_next() {
            return None;
        }
        let derivation = self.derivation();
        let built = self.state_after().and_then(|state| {
            Self::chained(
                derivation.edge.to(),
                Arc::clone(&self.inner.stroke),
                derivation.resume,
                Arc::new(state),
                self.inner.config,
            )
        });
        match built {
            Ok(successor) => Some(successor),
            Err(error) => {
                tracing::warn!(%error, "cannot continue stroke past cobweb crossing");
                None
            }
        }
    }

    fn derivation(&self) -> &Derivation {
        self.inner.derived.get_or_init(|| self.derive())
    }

    /// Scans the stroke sample by sample, applying the termination checks in
    /// priority order.
    fn derive(&self) -> Derivation {
        let inner = &*self.inner;
        let config = &inner.config;
        let mut points = vec![inner.origin_position];
        let mut prefix = 0.0;
        let mut region: Option<Region> = None;

        for i in inner.cursor..inner.stroke.len() {
            let prev = points[points.len() - 1];
            let p = inner.stroke[i];
            let step = distance(&prev, &p);
            if step < TOLERANCE {
                continue;
            }

            if !config.in_bounds(&p) {
                return self.finish(points, Color::Invalid, Termination::OutOfBounds, region, i);
            }

            let before = prefix;
            prefix += step;
            let deep = prefix >= config.min_segment_length();
            let region = region.get_or_insert_with(|| self.region_towards(&p));

            if deep && points.len() >= 4 {
                if let Some(target) = region.nearest_target(&p, config.glue_radius()) {
                    points.push(target);
                    return self.finish(points, Color::Sprout, Termination::Sprout, Some(region.clone()), i + 1);
                }
            }

            let origin_exempt = before < config.min_segment_length();
            if self.passes_blocked_vertex(&prev, &p, origin_exempt) {
                return self.finish(
                    points,
                    Color::Invalid,
                    Termination::NearBlockedVertex,
                    Some(region.clone()),
                    i,
                );
            }

            if deep {
                if let Some(at) = self_crossing(&points, &prev, &p) {
                    points.push(at);
                    return self.finish(
                        points,
                        Color::Invalid,
                        Termination::SelfIntersection,
                        Some(region.clone()),
                        i,
                    );
                }
                if let Some((at, crossed)) = region.boundary_crossing(&prev, &p) {
                    points.push(at);
                    // A submove may rest on the cobweb but not on another move.
                    let color = match crossed {
                        EdgeColor::Cobweb => Color::Cobweb,
                        EdgeColor::Move => Color::Invalid,
                    };
                    return self.finish(
                        points,
                        color,
                        Termination::Boundary(crossed),
                        Some(region.clone()),
                        i,
                    );
                }
            }

            points.push(p);
        }

        let end = inner.stroke.len();
        self.finish(points, Color::Open, Termination::StrokeEnded, region, end)
    }

    fn finish(
        &self,
        mut points: Vec<Point2>,
        end: Color,
        termination: Termination,
        region: Option<Region>,
        resume: usize,
    ) -> Derivation {
        let origin = self.inner.origin_position;
        if points.len() < 2 {
            points.push(origin);
        }
        let samples = points.len();
        let polyline = Polyline::new(points).unwrap_or_else(|_| Polyline::segment(origin, origin));
        let edge = DirectedEdge::new(
            polyline,
            EdgeColor::Move,
            self.inner.origin.color().unwrap_or(Color::Sprout),
            end,
        )
        .with_hooks(true);
        tracing::debug!(?termination, ?end, samples, "submove derived");
        Derivation {
            edge,
            termination,
            face: region.and_then(|r| r.face),
            resume,
        }
    }

    /// Resolves the face the stroke enters when heading from the origin towards `p`.
    fn region_towards(&self, p: &Point2) -> Region {
        let inner = &*self.inner;
        let candidate = DirectedEdge::new(
            Polyline::segment(inner.origin_position, *p),
            EdgeColor::Move,
            inner.origin.color().unwrap_or(Color::Sprout),
            Color::Open,
        );
        let state = &inner.state;
        let face = match state.drawn_in(&candidate) {
            Ok(face) => face,
            Err(error) => {
                tracing::warn!(%error, "cannot locate the face of a stroke");
                None
            }
        };
        let Some((id, face_data)) = face.and_then(|id| {
            state
                .faces()
                .ok()
                .and_then(|faces| faces.get(id))
                .map(|f| (id, f))
        }) else {
            return Region::default();
        };
        let targets = face_data
            .vertices()
            .into_iter()
            .filter(|v| state.is_alive_sprout(v))
            .filter_map(|v| v.position())
            .collect();
        Region {
            face: Some(id),
            edges: face_data.edges().to_vec(),
            targets,
        }
    }

    /// Returns `true` if segment `a → b` passes within the vertex tolerance of
    /// a cobweb vertex or a dead sprout.
    fn passes_blocked_vertex(&self, a: &Point2, b: &Point2, origin_exempt: bool) -> bool {
        let inner = &*self.inner;
        let tolerance = inner.config.vertex_tolerance();
        inner.state.vertices().any(|v| {
            if origin_exempt && *v == inner.origin {
                return false;
            }
            let blocked = v.is_cobweb() || (v.is_sprout() && !inner.state.is_alive_sprout(v));
            blocked
                && v
                    .position()
                    .is_some_and(|pos| point_to_segment_dist(&pos, a, b) < tolerance)
        })
    }
}

/// The face a stroke is drawn in, with what the scan needs from it.
#[derive(Debug, Clone, Default)]
struct Region {
    face: Option<FaceId>,
    edges: Vec<DirectedEdge>,
    targets: Vec<Point2>,
}

impl Region {
    fn nearest_target(&self, p: &Point2, glue_radius: f64) -> Option<Point2> {
        self.targets
            .iter()
            .map(|t| (*t, distance(t, p)))
            .filter(|(_, d)| *d <= glue_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(t, _)| t)
    }

    fn boundary_crossing(&self, a: &Point2, b: &Point2) -> Option<(Point2, EdgeColor)> {
        self.edges
            .iter()
            .filter_map(|e| e.first_crossing(a, b, TOLERANCE).map(|hit| (hit, e.color())))
            .min_by(|x, y| x.0.t.total_cmp(&y.0.t))
            .and_then(|(hit, color)| hit.at.position().map(|at| (at, color)))
    }
}

/// Finds where segment `a → b` first crosses the polyline drawn so far,
/// ignoring the last drawn segment (which ends at `a`).
fn self_crossing(points: &[Point2], a: &Point2, b: &Point2) -> Option<Point2> {
    if points.len() < 3 {
        return None;
    }
    points[..points.len() - 1]
        .windows(2)
        .filter_map(|w| segment_segment_intersect_2d(a, b, &w[0], &w[1]))
        .filter(|(_, t, _)| *t > TOLERANCE)
        .min_by(|x, y| x.1.total_cmp(&y.1))
        .map(|(at, _, _)| at)
}
