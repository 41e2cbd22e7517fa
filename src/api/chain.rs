use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, ChainResponse, MineResponse, ValidateResponse};

/// Get the full chain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let resp = ChainResponse {
        length: ledger.len(),
        difficulty: ledger.difficulty(),
        chain: ledger.chain(),
    };
    HttpResponse::Ok().json(resp)
}

/// Re-verify the whole chain (linkage, hashes, PoW).
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let resp = ValidateResponse {
        valid: ledger.is_valid_chain(),
        length: ledger.len(),
        difficulty: ledger.difficulty(),
    };
    HttpResponse::Ok().json(resp)
}

/// Mine the oldest pending event into a new block.
///
/// An empty queue is a normal outcome (`no_pending_events`), not an error.
/// The nonce search is CPU-bound and holds the ledger lock, so it runs on
/// the blocking pool instead of an HTTP worker.
#[post("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let outcome = web::block(move || {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.mine_next().map(|mined| {
            mined.map(|index| {
                let block = &ledger.chain()[index as usize];
                (index, block.hash.clone(), block.nonce)
            })
        })
    })
    .await;

    match outcome {
        Ok(Ok(Some((index, hash, nonce)))) => {
            info!("MINER - sealed block #{index} (hash={hash}, nonce={nonce})");
            HttpResponse::Ok().json(MineResponse {
                status: "block_mined",
                mined_index: Some(index),
                hash: Some(hash),
                nonce: Some(nonce),
            })
        }
        Ok(Ok(None)) => HttpResponse::Ok().json(MineResponse {
            status: "no_pending_events",
            mined_index: None,
            hash: None,
            nonce: None,
        }),
        Ok(Err(e)) => {
            warn!("MINER - {e}");
            HttpResponse::InternalServerError().body(e.to_string())
        }
        Err(e) => {
            warn!("MINER - blocking task failed: {e}");
            HttpResponse::InternalServerError().body("mining task failed")
        }
    }
}
