use crate::{Error, IdSource, Result, SnowflakeId, TimeSource};
use core::cmp::Ordering;
use rand::Rng;
use std::sync::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Mutable generator state. Guarded by the lock in [`LockIdGenerator`].
struct State {
    /// The last tick an ID was issued for, in milliseconds since the epoch.
    last_tick: u64,
    /// The sequence of the last ID issued within `last_tick`.
    sequence: u64,
}

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// The generator owns a fixed node id and a small amount of mutable state
/// (`last_tick`, `sequence`) behind a single [`Mutex`]. Every call to
/// [`next_id`] runs entirely under that lock, which is the sole
/// synchronization point: callers queue rather than race, so IDs are strictly
/// increasing in call-return order.
///
/// Throughput is capped at 4096 IDs per millisecond per instance. When the
/// sequence for the current tick is exhausted, the call spins on the time
/// source (still holding the lock) until the clock advances, so exhaustion
/// shows up as sub-millisecond latency rather than an error.
///
/// One instance is expected per process or logical shard; multiple instances
/// are fully independent and rely on distinct node ids to avoid cross-instance
/// collisions.
///
/// [`next_id`]: Self::next_id
pub struct LockIdGenerator<T>
where
    T: TimeSource,
{
    node_id: u64,
    state: Mutex<State>,
    time: T,
}

impl<T> LockIdGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`LockIdGenerator`] with a node id drawn uniformly at
    /// random from `0..=1023`.
    ///
    /// Random assignment needs no coordination service, at the cost of a
    /// collision risk across many simultaneously started instances. Fleets
    /// that need guaranteed-unique node ids should assign them explicitly via
    /// [`Self::with_node_id`].
    ///
    /// # Example
    ///
    /// ```
    /// use flakeid::{LockIdGenerator, SnowflakeId, WallClock};
    ///
    /// let generator = LockIdGenerator::new(WallClock::default());
    /// assert!(generator.node_id() <= SnowflakeId::max_node_id());
    /// ```
    #[must_use]
    pub fn new(time: T) -> Self {
        let node_id = rand::rng().random_range(0..=SnowflakeId::max_node_id());
        Self::with_node_id(node_id, time)
    }

    /// Creates a new [`LockIdGenerator`] with an explicitly assigned node id.
    ///
    /// # Parameters
    ///
    /// - `node_id`: A unique identifier for the node or instance generating
    ///   IDs, in `0..=1023`. This value is encoded into every generated ID
    ///   and never changes for the lifetime of the generator.
    /// - `time`: A [`TimeSource`] implementation (e.g., [`WallClock`]) that
    ///   determines how timestamps are generated.
    ///
    /// Node ids above [`SnowflakeId::max_node_id`] are masked to the 10-bit
    /// field width during packing.
    ///
    /// # Example
    ///
    /// ```
    /// use flakeid::{LockIdGenerator, WallClock};
    ///
    /// let generator = LockIdGenerator::with_node_id(7, WallClock::default());
    /// let id = generator.next_id().unwrap();
    /// assert_eq!(id.node_id(), 7);
    /// ```
    ///
    /// [`WallClock`]: crate::WallClock
    #[must_use]
    pub fn with_node_id(node_id: u64, time: T) -> Self {
        debug_assert!(node_id <= SnowflakeId::max_node_id());
        Self {
            node_id,
            state: Mutex::new(State {
                last_tick: 0,
                sequence: 0,
            }),
            time,
        }
    }

    /// Returns the node id encoded into every ID this generator produces.
    #[must_use]
    pub const fn node_id(&self) -> u64 {
        self.node_id
    }

    /// Generates the next available ID.
    ///
    /// Returns a new, time-ordered, unique ID. IDs from a single instance are
    /// strictly increasing: the sequence field disambiguates IDs minted within
    /// the same millisecond, and when it is exhausted the call waits for the
    /// next tick instead of reusing a value.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockRegression`]: the time source reported a value behind
    ///   the last recorded tick. State is not mutated; once the clock catches
    ///   up, subsequent calls succeed.
    /// - [`Error::LockPoisoned`]: another thread panicked while holding the
    ///   state lock.
    ///
    /// # Example
    ///
    /// ```
    /// use flakeid::{LockIdGenerator, WallClock};
    ///
    /// let generator = LockIdGenerator::with_node_id(0, WallClock::default());
    /// match generator.next_id() {
    ///     Ok(id) => println!("ID: {id}"),
    ///     Err(err) => eprintln!("generator error: {err}"),
    /// }
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<SnowflakeId> {
        let mut state = self.state.lock()?;
        let mut now = self.time.current_millis();

        match now.cmp(&state.last_tick) {
            Ordering::Less => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    last = state.last_tick,
                    observed = now,
                    "wall clock moved backward"
                );
                return Err(Error::ClockRegression {
                    last: state.last_tick,
                    observed: now,
                });
            }
            Ordering::Equal => {
                state.sequence = (state.sequence + 1) & SnowflakeId::max_sequence();
                if state.sequence == 0 {
                    // 4096 IDs already issued this millisecond. Spin until the
                    // clock advances; the lock stays held so queued callers
                    // preserve issue order.
                    now = self.wait_next_tick(state.last_tick);
                }
            }
            Ordering::Greater => {
                state.sequence = 0;
            }
        }

        state.last_tick = now;
        Ok(SnowflakeId::from_components(
            now,
            self.node_id,
            state.sequence,
        ))
    }

    /// Polls the time source until it advances past `last_tick`.
    ///
    /// The expected wait is sub-millisecond, so this spins rather than
    /// sleeping or yielding to a scheduler.
    fn wait_next_tick(&self, last_tick: u64) -> u64 {
        let mut now = self.time.current_millis();
        while now <= last_tick {
            core::hint::spin_loop();
            now = self.time.current_millis();
        }
        now
    }
}

impl Default for LockIdGenerator<crate::WallClock> {
    /// Constructs a generator over the default [`WallClock`] with a randomly
    /// drawn node id.
    ///
    /// [`WallClock`]: crate::WallClock
    fn default() -> Self {
        Self::new(crate::WallClock::default())
    }
}

impl<T> IdSource for LockIdGenerator<T>
where
    T: TimeSource,
{
    fn next_id(&self) -> Result<SnowflakeId> {
        LockIdGenerator::next_id(self)
    }
}
