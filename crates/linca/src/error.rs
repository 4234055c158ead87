//! Error types shared by every stage of the pipeline.
//!
//! All errors are fatal to a single computation; there is no partial result
//! and no automatic repair (e.g. re-anchoring a second component).

/// Errors surfaced while reading, configuring or solving a cartogram.
#[derive(Debug, thiserror::Error)]
pub enum LincaError {
    /// An input line could not be parsed (lines with fewer than four tokens
    /// are filtered out by the reader and never reach this variant).
    #[error("malformed input on line {line}: {message}")]
    MalformedInput { line: usize, message: String },

    /// `scale` or `straightness` is not a usable number.
    #[error("invalid parameter `{name}`: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// An indexed edge points past the vertex count handed to the assembler.
    #[error("edge {edge} references vertex {vertex}, but only {vertex_count} vertices exist")]
    VertexOutOfRange {
        edge: usize,
        vertex: usize,
        vertex_count: usize,
    },

    /// The normal equations do not determine a unique layout.
    #[error("singular system: {0}")]
    SingularSystem(#[from] Singularity),
}

/// Why the normal-equations matrix `AᵗA` was rejected.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Singularity {
    /// No vertices at all, so there is no anchor to fix.
    #[error("graph has no vertices")]
    EmptyGraph,
    /// Some vertices are not tied to the anchor through edges with a non-zero
    /// displacement (disconnected component, isolated vertex, or only
    /// self-loops / zero-length edges).
    #[error("vertex {vertex} is not connected to the anchor ({unreachable} unreachable vertices)")]
    Unanchored { vertex: usize, unreachable: usize },
    /// Cholesky factorization hit a non-positive pivot.
    #[error("normal equations are not positive definite")]
    NotPositiveDefinite,
    /// Factorization succeeded but the smallest pivot is numerically zero.
    #[error("normal equations are numerically degenerate (pivot ratio {pivot_ratio:e})")]
    Degenerate { pivot_ratio: f64 },
    /// The solve produced NaN or infinite coordinates.
    #[error("solution contains non-finite coordinates")]
    NonFinite,
}

impl LincaError {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        LincaError::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        LincaError::MalformedInput {
            line,
            message: message.into(),
        }
    }

    /// The singularity reason, if this is a `SingularSystem` error.
    pub fn singularity(&self) -> Option<&Singularity> {
        match self {
            LincaError::SingularSystem(s) => Some(s),
            _ => None,
        }
    }
}
