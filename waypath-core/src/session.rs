//! Explicit session state: graph, endpoint selection, last result and the
//! animation replaying it.
//!
//! A session is owned by its host. Whenever the inputs of the current path
//! change (endpoints, edge weights) the path is dropped and its animation is
//! cancelled, so no stale frame can be produced afterwards.

use crate::animator::{AnimationHandle, AnimationState, PathAnimator};
use crate::clock::{Clock, MonotonicClock};
use crate::error::{GraphResult, PathError};
use crate::graph::{Edge, Graph, WeightRange};
use crate::pathfinder::{find_path, PathResult};
use rand::Rng;

/// Tunables for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    /// How long the reveal of a freshly found path takes.
    pub animation_duration_ms: u64,
    /// Range used by [`Session::randomize_weights`].
    pub weight_range: WeightRange,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            animation_duration_ms: 2000,
            weight_range: WeightRange::default(),
        }
    }
}

/// Which endpoint a selection refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Endpoint {
    Origin,
    Destination,
}

pub struct Session<C: Clock = MonotonicClock> {
    graph: Graph,
    clock: C,
    settings: SessionSettings,
    origin: Option<String>,
    destination: Option<String>,
    current: Option<PathResult>,
    animator: PathAnimator,
    handle: Option<AnimationHandle>,
}

impl Session<MonotonicClock> {
    /// Session on the wall clock with default settings.
    pub fn with_graph(graph: Graph) -> Self {
        Self::new(graph, MonotonicClock::new())
    }
}

impl<C: Clock> Session<C> {
    pub fn new(graph: Graph, clock: C) -> Self {
        Self {
            graph,
            clock,
            settings: SessionSettings::default(),
            origin: None,
            destination: None,
            current: None,
            animator: PathAnimator::new(),
            handle: None,
        }
    }

    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    /// The last path found, if it is still valid for the current inputs.
    pub fn current_path(&self) -> Option<&PathResult> {
        self.current.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.handle.is_some() && self.animator.is_running()
    }

    pub fn select_origin(&mut self, id: &str) -> Result<(), PathError> {
        self.select(Endpoint::Origin, id)
    }

    pub fn select_destination(&mut self, id: &str) -> Result<(), PathError> {
        self.select(Endpoint::Destination, id)
    }

    fn select(&mut self, endpoint: Endpoint, id: &str) -> Result<(), PathError> {
        if !self.graph.contains(id) {
            return Err(PathError::InvalidEndpoint { id: id.to_string() });
        }
        let slot = match endpoint {
            Endpoint::Origin => &mut self.origin,
            Endpoint::Destination => &mut self.destination,
        };
        if slot.as_deref() != Some(id) {
            *slot = Some(id.to_string());
            self.clear_path();
        }
        Ok(())
    }

    /// Compute the shortest path between the selected endpoints and start
    /// animating it from the clock's current time.
    pub fn find_path(&mut self) -> Result<PathResult, PathError> {
        let (Some(origin), Some(destination)) = (self.origin.as_deref(), self.destination.as_deref())
        else {
            return Err(PathError::SelectionIncomplete);
        };

        let found = find_path(&self.graph, origin, destination);
        self.clear_path();
        let result = found?;

        // A found path always holds at least the origin, so `begin` cannot fail here.
        self.handle = self
            .animator
            .begin(
                result.path.clone(),
                self.settings.animation_duration_ms,
                self.clock.now_ms(),
            )
            .ok();
        self.current = Some(result.clone());
        tracing::info!(
            "Path {} -> {}: {} hops, distance {}",
            result.source().unwrap_or_default(),
            result.target().unwrap_or_default(),
            result.hops(),
            result.distance
        );
        Ok(result)
    }

    /// Sample the active animation at the clock's current time.
    pub fn frame(&mut self) -> Option<AnimationState> {
        let handle = self.handle?;
        match self.animator.sample_at(handle, self.clock.now_ms()) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!("Dropping stale animation: {}", e);
                self.handle = None;
                None
            }
        }
    }

    /// Replace every edge; the current path and animation are discarded.
    pub fn replace_edges(&mut self, edges: Vec<Edge>) -> GraphResult<()> {
        self.graph.replace_edges(edges)?;
        self.clear_path();
        Ok(())
    }

    /// Draw new weights in the configured range; the current path and animation are discarded.
    pub fn randomize_weights<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.graph.randomize_weights(rng, self.settings.weight_range);
        self.clear_path();
    }

    /// Stop any animation and forget the current path.
    pub fn clear_path(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.animator.cancel(handle);
        }
        self.current = None;
    }
}
