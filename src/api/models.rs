use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::ledger::{Block, Ledger, PendingEvent};

/// Shared application state: the single-writer ledger behind one lock.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
}

impl AppState {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub difficulty: u32,
    pub chain: &'a [Block],
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: u32,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub status: &'static str,
    pub mined_index: Option<u64>,
    pub hash: Option<String>,
    pub nonce: Option<u64>,
}

/* ---------- Event API Models ---------- */

#[derive(Deserialize)]
pub struct NewEventRequest {
    pub title: String,
    pub narrative: String,
    pub linked_blocks: Vec<u64>,
}

#[derive(Serialize)]
pub struct EventQueuedResponse {
    pub status: &'static str,
    pub pending: usize,
}

#[derive(Serialize)]
pub struct PendingResponse {
    pub size: usize,
    pub events: Vec<PendingEvent>,
}

/* ---------- Stats API Models ---------- */

#[derive(Serialize)]
pub struct StatsResponse {
    pub height: usize,
    pub difficulty: u32,
    pub pending: usize,
    pub last_hash: String,
}
