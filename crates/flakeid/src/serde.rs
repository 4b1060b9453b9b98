use crate::SnowflakeId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl Serialize for SnowflakeId {
    /// Serializes a snowflake ID as its native integer representation.
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_raw().serialize(s)
    }
}

impl<'de> Deserialize<'de> for SnowflakeId {
    /// Deserializes a snowflake ID from its native integer representation.
    ///
    /// Fails if the value has the reserved bit set, since no generator can
    /// have produced it.
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(d)?;
        let id = SnowflakeId::from_raw(raw);
        if !id.is_valid() {
            return Err(serde::de::Error::custom(format_args!(
                "reserved bit set in snowflake id: {raw}"
            )));
        }
        Ok(id)
    }
}
