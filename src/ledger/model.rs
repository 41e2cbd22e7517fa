use std::collections::VecDeque;

use log::{debug, info, warn};

use super::block::meets_difficulty;
use super::error::{LedgerError, RejectReason};
use super::{Block, ChainStore, PendingEvent};

/// The ledger façade: owns the chain, the pending queue and the backing
/// store, and serializes every mutation through `&mut self`.
///
/// Exactly one logical writer may mutate {queue, chain, store} at a time;
/// callers exposing the ledger to concurrent requests must wrap it in a
/// single lock (see `api::AppState`).
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: VecDeque<PendingEvent>,
    difficulty: u32,
    store: ChainStore,
}

impl Ledger {
    /// Open the ledger from its backing store, or start a fresh
    /// single-genesis chain when no store exists yet.
    ///
    /// A present but malformed store halts initialization with
    /// `LedgerError::CorruptStore`.
    pub fn open(store: ChainStore, difficulty: u32) -> Result<Self, LedgerError> {
        let chain = match store.load()? {
            Some(chain) => {
                info!(
                    "loaded {} block(s) from {}",
                    chain.len(),
                    store.path().display()
                );
                chain
            }
            None => vec![Block::genesis()],
        };
        Ok(Self {
            chain,
            pending: VecDeque::new(),
            difficulty,
            store,
        })
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("chain always holds at least the genesis block")
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn pending(&self) -> &VecDeque<PendingEvent> {
        &self.pending
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Queue a narrative event for mining. Strict FIFO: events are mined in
    /// the order they were enqueued.
    pub fn enqueue_event(&mut self, title: String, narrative: String, linked_blocks: Vec<u64>) {
        debug!("queued event '{title}' ({} pending)", self.pending.len() + 1);
        self.pending.push_back(PendingEvent {
            title,
            narrative,
            linked_blocks,
        });
    }

    /// Mine the oldest pending event into a new block.
    ///
    /// `Ok(None)` when the queue is empty — a normal outcome, not an error.
    /// On rejection or store failure the popped event is discarded, not
    /// requeued; the chain is left unchanged.
    pub fn mine_next(&mut self) -> Result<Option<u64>, LedgerError> {
        let Some(event) = self.pending.pop_front() else {
            return Ok(None);
        };

        let mut block = Block::new(
            self.chain.len() as u64,
            self.last_block().hash.clone(),
            event,
        );
        let proof = block.mine(self.difficulty);
        let index = block.index;

        match self.try_append(block, &proof) {
            Ok(()) => Ok(Some(index)),
            Err(e) => {
                warn!("mined block #{index} rejected ({e}); event discarded");
                Err(e)
            }
        }
    }

    /// Validate and append a candidate block under `proof`.
    ///
    /// Checks run in order and short-circuit: continuity, difficulty,
    /// integrity. On success the block (with `hash` set to the proof) is
    /// appended and the whole chain persisted; if persisting fails the
    /// append is rolled back, so no partial state is ever observable.
    pub fn try_append(&mut self, mut block: Block, proof: &str) -> Result<(), LedgerError> {
        if block.previous_hash != self.last_block().hash {
            return Err(LedgerError::Rejected(RejectReason::ContinuityMismatch));
        }
        if !meets_difficulty(proof, self.difficulty) {
            return Err(LedgerError::Rejected(RejectReason::InsufficientDifficulty));
        }
        if proof != block.canonical_hash() {
            return Err(LedgerError::Rejected(RejectReason::HashMismatch));
        }

        block.hash = proof.to_string();
        self.chain.push(block);
        if let Err(e) = self.store.save(&self.chain) {
            self.chain.pop();
            return Err(e);
        }
        info!(
            "sealed block #{} (hash={}, {} pending)",
            self.chain.len() - 1,
            proof,
            self.pending.len()
        );
        Ok(())
    }

    /// Re-verify the whole chain: genesis shape, linkage, and per-block hash
    /// integrity plus PoW for every non-genesis block. Loading trusts the
    /// store, so this is the opt-in answer to a tampered file.
    pub fn is_valid_chain(&self) -> bool {
        let Some(genesis) = self.chain.first() else {
            return false;
        };
        if genesis.index != 0
            || genesis.previous_hash != "0"
            || genesis.hash != genesis.canonical_hash()
        {
            return false;
        }

        for i in 1..self.chain.len() {
            let current = &self.chain[i];
            let prev = &self.chain[i - 1];

            if current.index != i as u64 {
                return false;
            }
            if current.previous_hash != prev.hash {
                return false;
            }
            if !current.is_valid(self.difficulty) {
                return false;
            }
        }

        true
    }
}
