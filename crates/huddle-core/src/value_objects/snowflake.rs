//! Snowflake ID - 64-bit time-ordered unique identifier
//!
//! Layout, high bit to low: 42 bits of milliseconds since the huddle
//! epoch, 10 bits of worker id, 12 bits of per-millisecond sequence.
//! Sorting by id is sorting by creation time, which the history and
//! notification queries rely on.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch at 2025-01-01 00:00:00 UTC
const HUDDLE_EPOCH_MS: i64 = 1_735_689_600_000;

const TIMESTAMP_SHIFT: u8 = 22;
const WORKER_SHIFT: u8 = 12;
const WORKER_MASK: i64 = 0x3FF;
const SEQUENCE_MASK: i64 = 0xFFF;

/// Highest worker id that fits the 10-bit field
pub const MAX_WORKER_ID: u16 = WORKER_MASK as u16;

/// 64-bit time-ordered unique identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Create a Snowflake from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch when this id was minted
    #[inline]
    pub const fn timestamp_ms(self) -> i64 {
        (self.0 >> TIMESTAMP_SHIFT) + HUDDLE_EPOCH_MS
    }

    /// Worker id of the generator that minted this id
    #[inline]
    pub const fn worker_id(self) -> u16 {
        ((self.0 >> WORKER_SHIFT) & WORKER_MASK) as u16
    }

    /// Per-millisecond sequence number
    #[inline]
    pub const fn sequence(self) -> u16 {
        (self.0 & SEQUENCE_MASK) as u16
    }

    /// Parse from the decimal string form used on the wire
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Strings on the wire: i64 overflows JavaScript's Number
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accept both the canonical string form and a bare integer
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(id) => Ok(Snowflake(id)),
            Raw::Text(s) => Snowflake::parse(&s)
                .map_err(|_| serde::de::Error::custom("invalid snowflake string")),
        }
    }
}

/// Lock-free Snowflake generator
///
/// The last-issued timestamp and sequence live packed in one atomic word,
/// so a generate never observes a torn pair. Up to 4096 ids per
/// millisecond per worker; the 4097th spins into the next millisecond.
pub struct SnowflakeGenerator {
    worker_bits: i64,
    /// `timestamp_ms << 12 | sequence` of the most recently issued id
    state: AtomicI64,
}

impl SnowflakeGenerator {
    /// Create a generator for the given worker id
    ///
    /// # Panics
    /// Panics if `worker_id` exceeds [`MAX_WORKER_ID`]
    pub fn new(worker_id: u16) -> Self {
        assert!(
            worker_id <= MAX_WORKER_ID,
            "worker id {worker_id} exceeds {MAX_WORKER_ID}"
        );
        Self {
            worker_bits: i64::from(worker_id) << WORKER_SHIFT,
            state: AtomicI64::new(0),
        }
    }

    /// Mint the next id
    pub fn generate(&self) -> Snowflake {
        loop {
            let state = self.state.load(Ordering::Acquire);
            let last_ts = state >> WORKER_SHIFT;
            let last_seq = state & SEQUENCE_MASK;

            let now = now_ms();
            // A backwards clock step lands in the now <= last_ts branch
            // and keeps issuing from the last timestamp's sequence space.
            let (ts, seq) = if now > last_ts {
                (now, 0)
            } else if last_seq < SEQUENCE_MASK {
                (last_ts, last_seq + 1)
            } else {
                // Sequence exhausted for this millisecond
                while now_ms() <= last_ts {
                    std::hint::spin_loop();
                }
                (now_ms(), 0)
            };

            let next = (ts << WORKER_SHIFT) | seq;
            if self
                .state
                .compare_exchange(state, next, Ordering::Release, Ordering::Relaxed)
                .is_ok()
            {
                return Snowflake::new(
                    ((ts - HUDDLE_EPOCH_MS) << TIMESTAMP_SHIFT) | self.worker_bits | seq,
                );
            }
            // Lost the race, re-read and retry
        }
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

#[inline]
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as i64)
}
