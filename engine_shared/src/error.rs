//! Error taxonomy.
//!
//! - [`GeometryError`]: recoverable per entity. The renderer skips the
//!   offending polygon and keeps drawing the frame.
//! - [`SceneLoadError`]: fatal at startup, raised before the first frame.

use thiserror::Error;

/// Degenerate geometry met while building or rendering the scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,
    #[error("lines are parallel or degenerate; no intersection")]
    ParallelLines,
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
    #[error("projected point is not finite")]
    NonFiniteProjection,
    #[error("degenerate collider: {reason}")]
    DegenerateCollider { reason: &'static str },
}

/// Failure while resolving a scene description into entities.
#[derive(Debug, Error)]
pub enum SceneLoadError {
    #[error("read {name}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown {kind} '{name}'")]
    NotFound { kind: &'static str, name: String },
    #[error("{file}:{line}: {message}")]
    Malformed {
        file: String,
        line: usize,
        message: String,
    },
    #[error("{file}:{line}: degenerate geometry")]
    Degenerate {
        file: String,
        line: usize,
        #[source]
        source: GeometryError,
    },
    #[error("include cycle: {}", chain.join(" -> "))]
    IncludeCycle { chain: Vec<String> },
}
