use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::event::PendingEvent;

/// A single narrative block in the chain.
///
/// Field names and shapes are the on-disk compatibility contract: the store
/// holds an ordered array of exactly these records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // Unix seconds (UTC), fractional
    pub title: String,
    pub narrative: String,
    pub linked_blocks: Vec<u64>, // indices of earlier blocks; not checked for existence
    pub previous_hash: String,
    pub nonce: u64, // Proof-of-Work nonce
    pub hash: String,
}

/// Canonical hash preimage: every block field except `hash`, with keys in
/// ascending lexicographic order. serde emits struct fields in declaration
/// order, so the order below IS the canonical key order — reordering these
/// fields changes every hash and breaks existing stores.
#[derive(Serialize)]
struct HashPreimage<'a> {
    index: u64,
    linked_blocks: &'a [u64],
    narrative: &'a str,
    nonce: u64,
    previous_hash: &'a str,
    timestamp: f64,
    title: &'a str,
}

/// Wall-clock time as fractional Unix seconds (microsecond resolution).
fn unix_now() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// True when `hash` carries at least `difficulty` leading `'0'` hex chars.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    hash.len() >= difficulty as usize
        && hash.chars().take(difficulty as usize).all(|c| c == '0')
}

impl Block {
    /// Create the genesis block (first block in the chain).
    pub fn genesis() -> Self {
        let mut block = Self {
            index: 0,
            timestamp: unix_now(),
            title: String::from("Genesis"),
            narrative: String::from("The beginning of ChainFlux."),
            linked_blocks: Vec::new(),
            previous_hash: String::from("0"),
            nonce: 0,
            hash: String::new(),
        };
        block.hash = block.canonical_hash();
        block
    }

    /// Create a candidate block from a pending event (not mined yet).
    /// Call `mine()` to perform PoW.
    pub fn new(index: u64, previous_hash: String, event: PendingEvent) -> Self {
        let mut block = Self {
            index,
            timestamp: unix_now(),
            title: event.title,
            narrative: event.narrative,
            linked_blocks: event.linked_blocks,
            previous_hash,
            nonce: 0,
            hash: String::new(),
        };
        block.hash = block.canonical_hash();
        block
    }

    /// Compute the canonical SHA-256 digest of this block.
    ///
    /// The preimage is the compact JSON encoding of all fields except `hash`,
    /// keys sorted ascending. Byte-stable: identical fields always produce
    /// identical digests, and the encoding must never change once chains have
    /// been persisted with it.
    pub fn canonical_hash(&self) -> String {
        let preimage = HashPreimage {
            index: self.index,
            linked_blocks: &self.linked_blocks,
            narrative: &self.narrative,
            nonce: self.nonce,
            previous_hash: &self.previous_hash,
            timestamp: self.timestamp,
            title: &self.title,
        };
        let encoded = serde_json::to_vec(&preimage).expect("serialize block preimage");
        let mut hasher = Sha256::new();
        hasher.update(&encoded);
        hex::encode(hasher.finalize())
    }

    /// Perform Proof-of-Work: search from nonce 0 for a canonical hash with
    /// `difficulty` leading zeros. Unbounded and CPU-bound; expected
    /// iterations ~16^difficulty. Returns the winning hash.
    pub fn mine(&mut self, difficulty: u32) -> String {
        self.nonce = 0;
        loop {
            let attempt = self.canonical_hash();
            if meets_difficulty(&attempt, difficulty) {
                self.hash = attempt.clone();
                return attempt;
            }
            self.nonce = self.nonce.wrapping_add(1);
        }
    }

    /// Validate that the cached `hash` matches the block contents and
    /// satisfies the PoW difficulty. (Does NOT validate chain linkage.)
    pub fn is_valid(&self, difficulty: u32) -> bool {
        self.hash == self.canonical_hash() && meets_difficulty(&self.hash, difficulty)
    }
}
