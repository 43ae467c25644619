//! Record identifiers
//!
//! Every row owned by the persistence gateway is keyed by a 64-bit,
//! time-ordered id. Layout:
//! - Bits 63-22: milliseconds since [`RecordId::EPOCH`]
//! - Bits 21-12: worker id (0-1023)
//! - Bits 11-0:  per-millisecond sequence (0-4095)
//!
//! Ids are opaque to API clients and travel as JSON strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Opaque unique id of a stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RecordId(i64);

impl RecordId {
    /// 2025-01-01 00:00:00 UTC in milliseconds
    pub const EPOCH: i64 = 1_735_689_600_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Milliseconds since the Unix epoch at which the id was minted
    #[inline]
    pub fn timestamp_millis(&self) -> i64 {
        (self.0 >> 22) + Self::EPOCH
    }

    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> 12) & 0x3FF) as u16
    }

    pub fn parse(s: &str) -> Result<Self, RecordIdParseError> {
        s.trim()
            .parse::<i64>()
            .ok()
            .filter(|v| *v > 0)
            .map(RecordId)
            .ok_or(RecordIdParseError::InvalidFormat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdParseError {
    #[error("invalid record id")]
    InvalidFormat,
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<RecordId> for i64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl std::str::FromStr for RecordId {
    type Err = RecordIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}

// Serialized as a string so JavaScript clients never lose precision
impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct RecordIdVisitor;

        impl Visitor<'_> for RecordIdVisitor {
            type Value = RecordId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer record id")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<RecordId, E> {
                Ok(RecordId(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<RecordId, E> {
                i64::try_from(value)
                    .map(RecordId)
                    .map_err(|_| E::custom("record id out of range"))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<RecordId, E> {
                RecordId::parse(value).map_err(|_| E::custom("invalid record id string"))
            }
        }

        deserializer.deserialize_any(RecordIdVisitor)
    }
}

/// Lock-free generator of [`RecordId`]s, up to 4096 ids per millisecond per worker
pub struct IdGenerator {
    worker_id: u16,
    state: AtomicI64,
}

impl IdGenerator {
    /// # Panics
    /// Panics if `worker_id >= 1024`
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id < 1024, "Worker ID must be < 1024");
        Self {
            worker_id,
            state: AtomicI64::new(0),
        }
    }

    /// Mint the next id. Ids from one generator are strictly increasing.
    pub fn generate(&self) -> RecordId {
        // state packs (millis since EPOCH) << 12 | sequence
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let now = Self::now_millis() - RecordId::EPOCH;
            let last_millis = current >> 12;
            let next = if now > last_millis {
                now << 12
            } else if current & 0xFFF == 0xFFF {
                // sequence exhausted for this millisecond, borrow the next one
                (last_millis + 1) << 12
            } else {
                current + 1
            };

            match self
                .state
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    let millis = next >> 12;
                    let sequence = next & 0xFFF;
                    return RecordId::new(
                        (millis << 22) | (i64::from(self.worker_id) << 12) | sequence,
                    );
                }
                Err(actual) => current = actual,
            }
        }
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(RecordId::EPOCH)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator")
            .field("worker_id", &self.worker_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_parse_rejects_garbage_and_non_positive() {
        assert_eq!(RecordId::parse("42").unwrap(), RecordId::new(42));
        assert!(RecordId::parse("abc").is_err());
        assert!(RecordId::parse("0").is_err());
        assert!(RecordId::parse("-7").is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let id = RecordId::new(123_456_789_012_345_678);
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"123456789012345678\""
        );
    }

    #[test]
    fn test_deserializes_from_string_or_number() {
        let a: RecordId = serde_json::from_str("\"981\"").unwrap();
        let b: RecordId = serde_json::from_str("981").unwrap();
        assert_eq!(a, b);
        assert!(serde_json::from_str::<RecordId>("\"nope\"").is_err());
    }

    #[test]
    fn test_generator_is_monotonic() {
        let gen = IdGenerator::new(3);
        let mut last = RecordId::default();
        for _ in 0..5000 {
            let id = gen.generate();
            assert!(id > last);
            assert_eq!(id.worker_id(), 3);
            last = id;
        }
    }

    #[test]
    fn test_generator_unique_across_threads() {
        let gen = Arc::new(IdGenerator::new(1));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let gen = Arc::clone(&gen);
                thread::spawn(move || (0..1000).map(|_| gen.generate()).collect::<Vec<_>>())
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.extend(handle.join().unwrap());
        }
        assert_eq!(ids.len(), 4000);
    }

    #[test]
    fn test_timestamp_roughly_now() {
        let gen = IdGenerator::new(0);
        let before = IdGenerator::now_millis();
        let id = gen.generate();
        // sequence overflow may push at most a few millis ahead
        assert!(id.timestamp_millis() >= before);
        assert!(id.timestamp_millis() <= IdGenerator::now_millis() + 5);
    }

    #[test]
    #[should_panic(expected = "Worker ID must be < 1024")]
    fn test_invalid_worker_id() {
        IdGenerator::new(1024);
    }
}
