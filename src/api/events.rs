use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;

use super::models::{AppState, EventQueuedResponse, NewEventRequest, PendingResponse};

/// Queue a narrative event for mining.
#[post("/events/")]
pub async fn post_event(
    state: web::Data<AppState>,
    body: web::Json<NewEventRequest>,
) -> impl Responder {
    let title = body.title.trim();
    if title.is_empty() {
        return HttpResponse::BadRequest().body("title required");
    }

    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    ledger.enqueue_event(
        title.to_string(),
        body.narrative.clone(),
        body.linked_blocks.clone(),
    );
    let pending = ledger.pending_len();
    debug!("POST /events/ - queued '{title}' (pending={pending})");

    HttpResponse::Ok().json(EventQueuedResponse {
        status: "event_queued",
        pending,
    })
}

/// List events still waiting to be mined.
#[get("/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let events = ledger.pending().iter().cloned().collect::<Vec<_>>();
    HttpResponse::Ok().json(PendingResponse {
        size: events.len(),
        events,
    })
}
