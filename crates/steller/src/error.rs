pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A structural invariant of the pipeline does not hold. This is either a
    /// malformed input graph (e.g. an edge endpoint missing from `nodes`) or a
    /// bug in an upstream stage; it is never recoverable.
    #[error("layout invariant violated: {reason}")]
    InvariantViolated { reason: String },

    /// The layout was configured with parameters outside their domain.
    /// Detected before any stage runs.
    #[error("invalid layout configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl Error {
    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolated {
            reason: reason.into(),
        }
    }

    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
