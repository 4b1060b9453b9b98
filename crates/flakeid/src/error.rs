use std::sync::{MutexGuard, PoisonError};

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All possible errors that `flakeid` can produce.
///
/// The only domain error is [`Error::ClockRegression`]: the generator refuses
/// to mint an ID when the observed wall clock is behind the last recorded
/// tick, since continuing would risk emitting a duplicate or out-of-order ID.
/// The regression is surfaced to the caller immediately and is never retried
/// internally.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The wall clock reported a time earlier than the last recorded tick.
    ///
    /// This signals a local clock anomaly (e.g., the system clock stepped
    /// backward after an NTP correction). The fault is per-call: generator
    /// state is left untouched, and the next call made once the clock has
    /// caught up will succeed.
    #[error("clock regression: last tick {last} ms, observed {observed} ms")]
    ClockRegression {
        /// The last tick recorded by the generator, in milliseconds since its
        /// epoch.
        last: u64,
        /// The tick observed on this call, in milliseconds since the epoch.
        observed: u64,
    },

    /// The operation failed due to a poisoned lock.
    ///
    /// This can happen if another thread panicked while holding the
    /// generator's state lock.
    #[error("generator state lock poisoned")]
    LockPoisoned,
}

// Convert all poisoned lock errors to a simplified `LockPoisoned`
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
