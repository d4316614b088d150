//! Error handling for camsampler core types
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised when an operation's geometry cannot be used by the pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A polygon ring has fewer than three vertices
    #[error("Degenerate ring with {vertices} vertices")]
    DegenerateRing {
        /// The number of vertices in the ring.
        vertices: usize,
    },

    /// A mesh has no triangles
    #[error("Mesh '{name}' has no triangles")]
    EmptyMesh {
        /// The mesh name.
        name: String,
    },

    /// A coordinate is NaN or infinite
    #[error("Non-finite value in {field}: {value}")]
    NonFinite {
        /// The field holding the value.
        field: String,
        /// The offending value.
        value: f64,
    },
}

/// Main error type for camsampler core
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Operation parameter error
    #[error("Invalid operation parameter '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// Why it is invalid.
        reason: String,
    },
}

impl Error {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_parameter("stepdown", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid operation parameter 'stepdown': must be positive"
        );

        let err: Error = GeometryError::EmptyMesh {
            name: "part".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Geometry(_)));
        assert_eq!(err.to_string(), "Mesh 'part' has no triangles");
    }
}
