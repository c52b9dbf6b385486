//! Waypath core - shortest paths on small in-memory graphs, replayed over time.
//!
//! Two components composed in sequence:
//!
//! - **Path finding**: [`find_path`] computes the minimum-weight path between
//!   two nodes of an undirected, non-negatively weighted [`Graph`].
//! - **Path animation**: [`PathAnimator`] maps elapsed time onto a growing
//!   revealed prefix of that path plus an interpolated marker position.
//!
//! [`Session`] ties them together for a host: it owns the graph, the endpoint
//! selection and the active animation, and reads time from a [`Clock`].
//!
//! # Usage
//!
//! ```rust
//! use waypath_core::{Graph, ManualClock, Session};
//!
//! let mut session = Session::new(Graph::pantheon(), ManualClock::new(0.0));
//! session.select_origin("afrodite").unwrap();
//! session.select_destination("hermes").unwrap();
//!
//! let result = session.find_path().unwrap();
//! assert_eq!(result.path, ["afrodite", "zeus", "hermes"]);
//! assert_eq!(result.distance, 190.0);
//!
//! session.clock().advance(2000.0);
//! assert!(session.frame().unwrap().is_complete());
//! ```

pub mod animator;
pub mod clock;
pub mod error;
pub mod graph;
pub mod pathfinder;
pub mod session;

pub use animator::{AnimationHandle, AnimationPhase, AnimationState, PathAnimator, SegmentCursor};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::{AnimationError, GraphError, GraphResult, PathError};
pub use graph::{Edge, Graph, GraphData, Node, Point, PositionLookup, WeightRange};
pub use pathfinder::{find_path, PathResult};
pub use session::{Session, SessionSettings};
