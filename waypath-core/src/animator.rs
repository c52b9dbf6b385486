//! Time-driven reveal of a computed path.
//!
//! The animator is a pure function of `(animation state, sample time)`: the
//! host reads its own clock and calls [`PathAnimator::sample_at`] as often as
//! it likes. How often it samples has no effect on what each sample returns,
//! except that the revealed prefix never shrinks.
//!
//! For a path of `n` nodes and `progress = clamp(elapsed / duration, 0, 1)`:
//!
//! - revealed prefix length is `clamp(floor(progress * n), 1, n)`
//! - the moving point sits on segment `min(floor(progress * (n - 1)), n - 2)`
//!   at the fractional remainder
//! - at `progress == 1` the animation completes and every later sample
//!   returns the same terminal state
//!
//! Only one animation is active per animator; beginning a new one invalidates
//! the previous handle.

use crate::error::AnimationError;
use crate::graph::{Point, PositionLookup};
use crate::pathfinder::contains_edge;
use serde::Serialize;

/// Opaque identifier of an animation issued by a [`PathAnimator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationPhase {
    Running,
    Completed,
}

/// Where the moving marker is: on segment `index`, between `from` and `to`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SegmentCursor {
    pub index: usize,
    pub from: String,
    pub to: String,
    /// Position along the segment in `[0, 1)`.
    pub fraction: f64,
}

/// A snapshot handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnimationState {
    /// Leading part of the path considered already traversed.
    pub revealed: Vec<String>,
    /// Overall progress in `[0, 1]`.
    pub progress: f64,
    /// Active segment; `None` once completed or for single-node paths.
    pub segment: Option<SegmentCursor>,
    pub phase: AnimationPhase,
}

impl AnimationState {
    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == AnimationPhase::Completed
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.iter().any(|r| r == id)
    }

    /// Whether the edge `a -- b` lies on the revealed prefix.
    pub fn is_edge_revealed(&self, a: &str, b: &str) -> bool {
        contains_edge(&self.revealed, a, b)
    }

    /// Interpolated marker position, using the presentation layer's coordinates.
    pub fn point<L: PositionLookup + ?Sized>(&self, positions: &L) -> Option<Point> {
        let segment = self.segment.as_ref()?;
        let from = positions.position_of(&segment.from)?;
        let to = positions.position_of(&segment.to)?;
        Some(Point::lerp(from, to, segment.fraction))
    }
}

#[derive(Debug)]
struct Animation {
    handle: AnimationHandle,
    path: Vec<String>,
    duration_ms: f64,
    started_at_ms: f64,
    last_sample_ms: f64,
    revealed_count: usize,
    completed: bool,
}

impl Animation {
    fn terminal_state(&self) -> AnimationState {
        AnimationState {
            revealed: self.path.clone(),
            progress: 1.0,
            segment: None,
            phase: AnimationPhase::Completed,
        }
    }

    fn sample(&mut self, now_ms: f64) -> AnimationState {
        if self.completed {
            return self.terminal_state();
        }

        let now = if now_ms < self.last_sample_ms {
            tracing::debug!(
                "Animation {}: sample at {}ms precedes previous sample at {}ms, clamping",
                self.handle.0,
                now_ms,
                self.last_sample_ms
            );
            self.last_sample_ms
        } else {
            now_ms
        };
        self.last_sample_ms = now;

        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((now - self.started_at_ms) / self.duration_ms).clamp(0.0, 1.0)
        };

        let n = self.path.len();
        if progress >= 1.0 {
            self.completed = true;
            self.revealed_count = n;
            tracing::debug!("Animation {} completed", self.handle.0);
            return self.terminal_state();
        }

        let count = ((progress * n as f64).floor() as usize).clamp(1, n);
        self.revealed_count = self.revealed_count.max(count);

        let segment_progress = progress * (n - 1) as f64;
        let index = (segment_progress.floor() as usize).min(n - 2);

        AnimationState {
            revealed: self.path[..self.revealed_count].to_vec(),
            progress,
            segment: Some(SegmentCursor {
                index,
                from: self.path[index].clone(),
                to: self.path[index + 1].clone(),
                fraction: segment_progress - index as f64,
            }),
            phase: AnimationPhase::Running,
        }
    }
}

/// Owns the single active path animation of a session.
#[derive(Debug, Default)]
pub struct PathAnimator {
    active: Option<Animation>,
    next_id: u64,
}

impl PathAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating `path` over `duration_ms`, beginning at `now_ms`.
    ///
    /// Any animation already in progress is cancelled first. Paths with fewer
    /// than two nodes complete immediately.
    pub fn begin(
        &mut self,
        path: Vec<String>,
        duration_ms: u64,
        now_ms: f64,
    ) -> Result<AnimationHandle, AnimationError> {
        if path.is_empty() {
            return Err(AnimationError::InvalidPath);
        }
        if let Some(previous) = self.active.take() {
            tracing::debug!("Animation {} replaced before completion", previous.handle.0);
        }

        self.next_id += 1;
        let handle = AnimationHandle(self.next_id);
        let completed = path.len() < 2;
        tracing::debug!(
            "Animation {} started: {} nodes over {}ms",
            handle.0,
            path.len(),
            duration_ms
        );

        self.active = Some(Animation {
            handle,
            revealed_count: if completed { path.len() } else { 1 },
            path,
            duration_ms: duration_ms as f64,
            started_at_ms: now_ms,
            last_sample_ms: now_ms,
            completed,
        });
        Ok(handle)
    }

    /// Snapshot of the animation behind `handle` at `now_ms`.
    pub fn sample_at(
        &mut self,
        handle: AnimationHandle,
        now_ms: f64,
    ) -> Result<AnimationState, AnimationError> {
        match self.active.as_mut() {
            Some(animation) if animation.handle == handle => Ok(animation.sample(now_ms)),
            _ => Err(AnimationError::InvalidHandle(handle.0)),
        }
    }

    /// Invalidate `handle`. Returns `true` if it was the active animation.
    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        match &self.active {
            Some(animation) if animation.handle == handle => {
                self.active = None;
                tracing::debug!("Animation {} cancelled", handle.0);
                true
            }
            _ => false,
        }
    }

    /// Handle of the current animation, running or completed.
    pub fn active(&self) -> Option<AnimationHandle> {
        self.active.as_ref().map(|a| a.handle)
    }

    /// Whether an animation exists and has not completed.
    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(|a| !a.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn path(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn hermes_route() -> Vec<String> {
        path(&["afrodite", "zeus", "hermes"])
    }

    #[test]
    fn test_empty_path_rejected() {
        let mut animator = PathAnimator::new();
        assert_eq!(
            animator.begin(vec![], 2000, 0.0),
            Err(AnimationError::InvalidPath)
        );
        assert!(animator.active().is_none());
    }

    #[test]
    fn test_start_reveals_only_source() {
        let mut animator = PathAnimator::new();
        let handle = animator.begin(hermes_route(), 2000, 1000.0).unwrap();
        let state = animator.sample_at(handle, 1000.0).unwrap();

        assert_eq!(state.revealed, path(&["afrodite"]));
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.phase, AnimationPhase::Running);
        let segment = state.segment.unwrap();
        assert_eq!((segment.index, segment.fraction), (0, 0.0));
        assert_eq!((segment.from.as_str(), segment.to.as_str()), ("afrodite", "zeus"));
    }

    #[test]
    fn test_midway_sample() {
        let mut animator = PathAnimator::new();
        let handle = animator.begin(hermes_route(), 2000, 0.0).unwrap();

        // progress 0.5: floor(0.5 * 3) = 1 revealed, segment progress 1.0 -> segment 1 at 0.0
        let state = animator.sample_at(handle, 1000.0).unwrap();
        assert_eq!(state.revealed_count(), 1);
        assert_eq!(state.progress, 0.5);
        let segment = state.segment.unwrap();
        assert_eq!(segment.index, 1);
        assert_eq!(segment.fraction, 0.0);

        // progress 0.75: floor(2.25) = 2 revealed, segment progress 1.5
        let state = animator.sample_at(handle, 1500.0).unwrap();
        assert_eq!(state.revealed, path(&["afrodite", "zeus"]));
        let segment = state.segment.unwrap();
        assert_eq!(segment.index, 1);
        assert_eq!(segment.fraction, 0.5);
    }

    #[test]
    fn test_completion_is_terminal() {
        let mut animator = PathAnimator::new();
        let handle = animator.begin(hermes_route(), 2000, 0.0).unwrap();

        let done = animator.sample_at(handle, 2000.0).unwrap();
        assert!(done.is_complete());
        assert_eq!(done.revealed, hermes_route());
        assert_eq!(done.progress, 1.0);
        assert!(done.segment.is_none());
        assert!(!animator.is_running());

        // Inert afterwards, even for an earlier timestamp.
        assert_eq!(animator.sample_at(handle, 50_000.0).unwrap(), done);
        assert_eq!(animator.sample_at(handle, 10.0).unwrap(), done);
    }

    #[test]
    fn test_overshoot_completes() {
        let mut animator = PathAnimator::new();
        let handle = animator.begin(hermes_route(), 2000, 0.0).unwrap();
        assert!(animator.sample_at(handle, 9999.0).unwrap().is_complete());
    }

    #[test]
    fn test_revealed_count_is_monotonic() {
        let route = path(&["a", "b", "c", "d", "e", "f", "g"]);
        let mut animator = PathAnimator::new();
        let handle = animator.begin(route.clone(), 1000, 0.0).unwrap();

        let mut last = 0;
        let mut t = 0.0;
        while t <= 1100.0 {
            let state = animator.sample_at(handle, t).unwrap();
            assert!(state.revealed_count() >= last, "shrunk at t={}", t);
            assert!(state.revealed_count() >= 1);
            assert_eq!(state.revealed[..], route[..state.revealed_count()]);
            last = state.revealed_count();
            t += 7.0;
        }
        assert_eq!(last, route.len());
    }

    #[test]
    fn test_out_of_order_sample_is_clamped() {
        let mut animator = PathAnimator::new();
        let handle = animator
            .begin(path(&["a", "b", "c", "d"]), 1000, 0.0)
            .unwrap();

        let later = animator.sample_at(handle, 800.0).unwrap();
        let earlier = animator.sample_at(handle, 100.0).unwrap();
        assert_eq!(earlier, later);
        assert_eq!(earlier.revealed_count(), 3);
    }

    #[test]
    fn test_sample_before_start_clamps_to_start() {
        let mut animator = PathAnimator::new();
        let handle = animator.begin(hermes_route(), 2000, 500.0).unwrap();
        let state = animator.sample_at(handle, 0.0).unwrap();
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.revealed_count(), 1);
    }

    #[test]
    fn test_sampling_frequency_does_not_matter() {
        let mut dense = PathAnimator::new();
        let mut sparse = PathAnimator::new();
        let a = dense.begin(hermes_route(), 2000, 0.0).unwrap();
        let b = sparse.begin(hermes_route(), 2000, 0.0).unwrap();

        for t in (0..1300).step_by(16) {
            dense.sample_at(a, t as f64).unwrap();
        }
        assert_eq!(
            dense.sample_at(a, 1300.0).unwrap(),
            sparse.sample_at(b, 1300.0).unwrap()
        );
    }

    #[test]
    fn test_single_node_path_completes_immediately() {
        let mut animator = PathAnimator::new();
        let handle = animator.begin(path(&["zeus"]), 2000, 0.0).unwrap();
        assert!(!animator.is_running());

        let state = animator.sample_at(handle, 0.0).unwrap();
        assert!(state.is_complete());
        assert_eq!(state.revealed, path(&["zeus"]));
        assert!(state.segment.is_none());
    }

    #[test]
    fn test_zero_duration_completes_on_first_sample() {
        let mut animator = PathAnimator::new();
        let handle = animator.begin(hermes_route(), 0, 0.0).unwrap();
        assert!(animator.sample_at(handle, 0.0).unwrap().is_complete());
    }

    #[test]
    fn test_cancel_invalidates_handle() {
        let mut animator = PathAnimator::new();
        let handle = animator.begin(hermes_route(), 2000, 0.0).unwrap();

        assert!(animator.cancel(handle));
        assert!(!animator.cancel(handle));
        assert_eq!(
            animator.sample_at(handle, 100.0),
            Err(AnimationError::InvalidHandle(handle.id()))
        );
    }

    #[test]
    fn test_new_animation_replaces_old() {
        let mut animator = PathAnimator::new();
        let first = animator.begin(hermes_route(), 2000, 0.0).unwrap();
        let second = animator.begin(path(&["atena", "hermes"]), 2000, 10.0).unwrap();

        assert_ne!(first, second);
        assert_eq!(animator.active(), Some(second));
        assert!(animator.sample_at(first, 20.0).is_err());
        assert!(!animator.cancel(first));
        assert!(animator.sample_at(second, 20.0).is_ok());
    }

    #[test]
    fn test_unknown_handle() {
        let mut animator = PathAnimator::new();
        let mut other = PathAnimator::new();
        let foreign = other.begin(hermes_route(), 10, 0.0).unwrap();
        other.cancel(foreign);
        assert!(matches!(
            animator.sample_at(foreign, 0.0),
            Err(AnimationError::InvalidHandle(_))
        ));
    }

    #[test]
    fn test_point_interpolates_between_positions() {
        let mut positions = HashMap::new();
        positions.insert("afrodite".to_string(), Point::new(400.0, 100.0));
        positions.insert("zeus".to_string(), Point::new(400.0, 300.0));
        positions.insert("hermes".to_string(), Point::new(400.0, 500.0));

        let mut animator = PathAnimator::new();
        let handle = animator.begin(hermes_route(), 2000, 0.0).unwrap();

        // progress 0.25 -> segment progress 0.5 on afrodite -> zeus
        let state = animator.sample_at(handle, 500.0).unwrap();
        assert_eq!(state.point(&positions), Some(Point::new(400.0, 200.0)));

        let done = animator.sample_at(handle, 2000.0).unwrap();
        assert_eq!(done.point(&positions), None);
    }

    #[test]
    fn test_point_needs_known_positions() {
        let mut animator = PathAnimator::new();
        let handle = animator.begin(hermes_route(), 2000, 0.0).unwrap();
        let state = animator.sample_at(handle, 500.0).unwrap();
        assert_eq!(state.point(&HashMap::<String, Point>::new()), None);
    }

    #[test]
    fn test_revealed_membership() {
        let mut animator = PathAnimator::new();
        let handle = animator.begin(hermes_route(), 2000, 0.0).unwrap();
        let state = animator.sample_at(handle, 1500.0).unwrap();

        assert!(state.is_revealed("zeus"));
        assert!(!state.is_revealed("hermes"));
        assert!(state.is_edge_revealed("zeus", "afrodite"));
        assert!(!state.is_edge_revealed("zeus", "hermes"));
    }

    #[test]
    fn test_state_serializes_phase_lowercase() {
        let mut animator = PathAnimator::new();
        let handle = animator.begin(hermes_route(), 2000, 0.0).unwrap();
        let json = serde_json::to_string(&animator.sample_at(handle, 0.0).unwrap()).unwrap();
        assert!(json.contains("\"phase\":\"running\""));
    }
}
