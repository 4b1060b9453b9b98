use core::fmt;

/// A 64-bit Snowflake-style identifier.
///
/// ## Bit layout
///
/// The ID is packed from **MSB to LSB**:
///
/// ```text
///  Bit Index:  high bits                                        low bits
///              +--------------+----------------+--------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | node id (10) | sequence (12) |
///              +--------------+----------------+--------------+---------------+
///              |<---------------- MSB -- 64 bits -- LSB --------------------->|
/// ```
///
/// - `reserved`: always 0, keeping the value non-negative in signed-64
///   representations
/// - `timestamp`: milliseconds since the configured epoch (valid until ~2159
///   with the default 2024 epoch)
/// - `node id`: identifies the generator instance, `0..=1023`
/// - `sequence`: counter disambiguating IDs minted within the same
///   millisecond, `0..=4095`
///
/// Because `timestamp` occupies the most significant non-reserved bits, the
/// integer ordering of packed IDs equals the `(timestamp, node id, sequence)`
/// lexicographic ordering.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct SnowflakeId {
    id: u64,
}

const _: () = {
    // Compile-time check: total bit width _must_ equal the backing type. This
    // is to avoid aliasing surprises.
    assert!(
        SnowflakeId::RESERVED_BITS
            + SnowflakeId::TIMESTAMP_BITS
            + SnowflakeId::NODE_ID_BITS
            + SnowflakeId::SEQUENCE_BITS
            == u64::BITS as u64,
        "layout must match underlying type width"
    );
};

impl SnowflakeId {
    pub const RESERVED_BITS: u64 = 1;
    pub const TIMESTAMP_BITS: u64 = 41;
    pub const NODE_ID_BITS: u64 = 10;
    pub const SEQUENCE_BITS: u64 = 12;

    pub const SEQUENCE_SHIFT: u64 = 0;
    pub const NODE_ID_SHIFT: u64 = Self::SEQUENCE_SHIFT + Self::SEQUENCE_BITS;
    pub const TIMESTAMP_SHIFT: u64 = Self::NODE_ID_SHIFT + Self::NODE_ID_BITS;
    pub const RESERVED_SHIFT: u64 = Self::TIMESTAMP_SHIFT + Self::TIMESTAMP_BITS;

    pub const RESERVED_MASK: u64 = (1 << Self::RESERVED_BITS) - 1;
    pub const TIMESTAMP_MASK: u64 = (1 << Self::TIMESTAMP_BITS) - 1;
    pub const NODE_ID_MASK: u64 = (1 << Self::NODE_ID_BITS) - 1;
    pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Packs the given components into an ID.
    ///
    /// Each component is masked to its field width, so oversized inputs never
    /// bleed into neighboring fields, and the reserved bit is always zero.
    #[must_use]
    pub const fn from_components(timestamp: u64, node_id: u64, sequence: u64) -> Self {
        let t = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let n = (node_id & Self::NODE_ID_MASK) << Self::NODE_ID_SHIFT;
        let s = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self { id: t | n | s }
    }

    /// Extracts the timestamp from the packed ID.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the node id from the packed ID.
    #[must_use]
    pub const fn node_id(&self) -> u64 {
        (self.id >> Self::NODE_ID_SHIFT) & Self::NODE_ID_MASK
    }

    /// Extracts the sequence from the packed ID.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns the maximum representable timestamp value based on
    /// `Self::TIMESTAMP_BITS`.
    #[must_use]
    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    /// Returns the maximum representable node id value based on
    /// `Self::NODE_ID_BITS`.
    #[must_use]
    pub const fn max_node_id() -> u64 {
        Self::NODE_ID_MASK
    }

    /// Returns the maximum representable sequence value based on
    /// `Self::SEQUENCE_BITS`.
    #[must_use]
    pub const fn max_sequence() -> u64 {
        Self::SEQUENCE_MASK
    }

    /// Converts this type into its raw type representation
    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Converts a raw type into this type
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns `true` if the reserved bit is zero.
    ///
    /// Raw values with the reserved bit set cannot have been produced by a
    /// generator and are rejected during deserialization.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        (self.id >> Self::RESERVED_SHIFT) & Self::RESERVED_MASK == 0
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("timestamp", &self.timestamp())
            .field("node_id", &self.node_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}
