use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("resource not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    /// Missing, expired, consumed or bound to another caller. Never split
    /// further at the HTTP boundary.
    #[error("invalid anti-forgery token")]
    InvalidToken,

    #[error("token generation failed: {0}")]
    GenerationFailure(String),

    #[error("internal error: {0}")]
    InternalError(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("upstream error: {0}")]
    UpstreamError(String),
}
