//! Twelve-byte document identifiers rendered as 24 lowercase hex characters.
//!
//! Layout: 4-byte big-endian seconds timestamp, 5 bytes of per-process
//! randomness, 3-byte big-endian counter seeded randomly at start-up.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use mockable::Clock;
use rand::Rng;
use thiserror::Error;

const COUNTER_MASK: u32 = 0x00FF_FFFF;

/// Raised when text is not a valid [`ObjectId`] rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectIdError {
    /// Input was not exactly 24 characters long.
    #[error("expected {expected} hex characters, found {found}")]
    InvalidLength {
        /// Required length.
        expected: usize,
        /// Observed length.
        found: usize,
    },
    /// Input contained a non-hexadecimal character.
    #[error("identifier contains non-hexadecimal characters")]
    InvalidHex,
}

/// Store-native identifier for user documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Length of the textual rendering.
    pub const HEX_LEN: usize = 24;

    /// Wrap raw identifier bytes.
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Raw identifier bytes.
    pub const fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Seconds since the Unix epoch embedded at generation time.
    pub fn timestamp(&self) -> u32 {
        let [a, b, c, d, ..] = self.0;
        u32::from_be_bytes([a, b, c, d])
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 24-character hex string; either letter case is accepted.
    ///
    /// # Examples
    /// ```
    /// use user_api::outbound::persistence::ObjectId;
    ///
    /// let id = ObjectId::parse_str("65A1F0C2E4B0A1B2C3D4E5F6").expect("valid id");
    /// assert_eq!(id.to_hex(), "65a1f0c2e4b0a1b2c3d4e5f6");
    /// assert!(ObjectId::parse_str("not-a-valid-id").is_err());
    /// ```
    pub fn parse_str(text: &str) -> Result<Self, ObjectIdError> {
        if text.len() != Self::HEX_LEN {
            return Err(ObjectIdError::InvalidLength {
                expected: Self::HEX_LEN,
                found: text.len(),
            });
        }
        let mut bytes = [0_u8; 12];
        hex::decode_to_slice(text, &mut bytes).map_err(|_| ObjectIdError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Thread-safe source of fresh [`ObjectId`]s.
pub struct ObjectIdGenerator {
    clock: Arc<dyn Clock + Send + Sync>,
    process_unique: [u8; 5],
    counter: AtomicU32,
}

impl ObjectIdGenerator {
    /// Create a generator with random process bytes and counter start.
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        let mut rng = rand::thread_rng();
        let process_unique: [u8; 5] = rng.r#gen();
        let counter_start = rng.r#gen::<u32>() & COUNTER_MASK;
        Self::with_seed(clock, process_unique, counter_start)
    }

    /// Create a generator with fixed process bytes and counter start.
    pub fn with_seed(
        clock: Arc<dyn Clock + Send + Sync>,
        process_unique: [u8; 5],
        counter_start: u32,
    ) -> Self {
        Self {
            clock,
            process_unique,
            counter: AtomicU32::new(counter_start & COUNTER_MASK),
        }
    }

    /// Produce the next identifier.
    pub fn generate(&self) -> ObjectId {
        let seconds = self.clock.utc().timestamp();
        let timestamp = u32::try_from(seconds.clamp(0, i64::from(u32::MAX))).unwrap_or(u32::MAX);
        let count = self.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let [t0, t1, t2, t3] = timestamp.to_be_bytes();
        let [p0, p1, p2, p3, p4] = self.process_unique;
        let [_, c0, c1, c2] = count.to_be_bytes();
        ObjectId([t0, t1, t2, t3, p0, p1, p2, p3, p4, c0, c1, c2])
    }
}
