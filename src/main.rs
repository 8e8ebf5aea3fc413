use std::net::SocketAddr;

use adpulse::{config::Config, server, telemetry, AppState};

#[tokio::main]
async fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════╗");
    println!("║   📡  ADPULSE — CONTENT TELEMETRY SERVICE        ║");
    println!("╚══════════════════════════════════════════════════╝");
    println!();

    // ── 1. Load tunables ─────────────────────────────────────────
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };
    println!(
        "⚙  limit {}/window, window {}s, drain tick {}s",
        config.rate_limit, config.rate_period_secs, config.aggregate_tick_secs,
    );

    // ── 2. Build shared state ────────────────────────────────────
    let (state, handoff_rx) = AppState::new(config);

    // ── 3. Spawn the drain task ──────────────────────────────────
    telemetry::spawn_drain(
        state.store.clone(),
        handoff_rx,
        state.config.aggregate_tick(),
    );

    // ── 4. Build Axum router ─────────────────────────────────────
    let app = server::create_router(state.clone());

    // ── 5. Bind & serve ──────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&state.config.listen_addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {}: {e}", state.config.listen_addr));

    println!();
    println!("Server listening on http://{}", state.config.listen_addr);
    println!("Content views   → GET /view/");
    println!("Aggregated stats→ GET /stats/");
    println!();

    // ConnectInfo gives handlers the peer address the limiter keys on.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server exited with error");
}
