use thiserror::Error;

/// Errors raised while building or loading a scene, or saving a render.
///
/// Rendering itself never fails; everything that could poison the shading
/// pipeline (a singular transform, a zero-length direction) is rejected when
/// the scene is assembled.
#[derive(Error, Debug)]
pub enum Error {
    #[error("matrix is not invertible (determinant is zero)")]
    SingularMatrix,

    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,

    #[error("invalid scene: {0}")]
    Scene(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for scene construction.
pub type Result<T> = std::result::Result<T, Error>;
