use crate::{Result, SnowflakeId};

/// A minimal interface for producing Snowflake IDs.
///
/// Collaborators that only need a stream of unique identifiers should depend
/// on this trait rather than a concrete generator, so a deterministic or
/// recording implementation can be substituted in tests.
pub trait IdSource {
    /// Generates the next available ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockRegression`] if the time source moved backward
    /// relative to the last issued ID.
    ///
    /// [`Error::ClockRegression`]: crate::Error::ClockRegression
    fn next_id(&self) -> Result<SnowflakeId>;
}
