//! Store identifiers.
//!
//! An [`ObjectId`] is 12 bytes: a 4-byte big-endian unix timestamp (seconds),
//! 5 random bytes chosen once per process and a 3-byte big-endian counter
//! seeded randomly. Its external form is 24 lowercase hex characters.

use std::{
    fmt,
    str::FromStr,
    sync::{
        OnceLock,
        atomic::{AtomicU32, Ordering},
    },
};

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

const BYTES: usize = 12;
const COUNTER_MASK: u32 = 0x00ff_ffff;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; BYTES]);

struct Seed {
    process: [u8; 5],
    counter: AtomicU32,
}

fn seed() -> &'static Seed {
    static SEED: OnceLock<Seed> = OnceLock::new();
    SEED.get_or_init(|| {
        let random = Uuid::new_v4().into_bytes();
        let mut process = [0u8; 5];
        process.copy_from_slice(&random[..5]);
        Seed {
            process,
            counter: AtomicU32::new(u32::from_be_bytes([0, random[5], random[6], random[7]])),
        }
    })
}

impl ObjectId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        let seed = seed();
        // Truncation is fine until 2106.
        let timestamp = Utc::now().timestamp() as u32;
        let counter = seed.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; BYTES];
        bytes[..4].copy_from_slice(&timestamp.to_be_bytes());
        bytes[4..9].copy_from_slice(&seed.process);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
        Self(bytes)
    }

    pub fn bytes(&self) -> [u8; BYTES] {
        self.0
    }

    /// Seconds since the unix epoch at generation time.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// Parse the external form: exactly 24 hex characters, either case.
    pub fn parse_str(value: &str) -> ResultEngine<Self> {
        if value.len() != BYTES * 2 {
            return Err(EngineError::InvalidId);
        }

        let mut bytes = [0u8; BYTES];
        for (byte, pair) in bytes.iter_mut().zip(value.as_bytes().chunks_exact(2)) {
            let (Some(high), Some(low)) = (hex_value(pair[0]), hex_value(pair[1])) else {
                return Err(EngineError::InvalidId);
            };
            *byte = (high << 4) | low;
        }

        Ok(Self(bytes))
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for ObjectId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse_str(&value).map_err(de::Error::custom)
    }
}
