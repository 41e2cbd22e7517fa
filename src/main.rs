use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use std::env;

use chainflux::api::{self, AppState};
use chainflux::ledger::{ChainStore, DEFAULT_CHAIN_FILE, DEFAULT_DIFFICULTY, Ledger};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);
    let chain_file = env::var("CHAIN_FILE").unwrap_or_else(|_| DEFAULT_CHAIN_FILE.to_string());
    let difficulty: u32 = env::var("DIFFICULTY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_DIFFICULTY);

    // A corrupt store halts startup here rather than serving a broken chain.
    let ledger = Ledger::open(ChainStore::new(&chain_file), difficulty)
        .map_err(std::io::Error::other)?;

    println!("⛓️ Starting ChainFlux at http://{host}:{port} (store: {chain_file}, difficulty: {difficulty})");

    let state = web::Data::new(AppState::new(ledger));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
