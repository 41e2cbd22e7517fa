//! ChainFlux — an append-only narrative ledger gated by proof-of-work.
//!
//! The [`ledger`] module is the core engine: block hashing, mining,
//! validation and persistence. [`api`] is a thin HTTP adapter (JSON routes
//! plus a server-rendered explorer page); a terminal adapter lives in
//! `src/bin/console.rs`. All adapters drive the same three operations:
//! enqueue an event, mine the next block, read the chain.

pub mod api;
pub mod ledger;
