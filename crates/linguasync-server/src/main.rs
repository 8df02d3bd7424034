//! LinguaSync relay server.
//!
//! Clients connect over WebSocket, declare a language, and every chat or
//! document edit is fanned out to each live participant translated into that
//! participant's own language. The translation gateway is a strict startup
//! dependency: the process refuses to boot when it is unreachable.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use linguasync_server::translate::http::HttpTranslator;
use linguasync_server::translate::Translator;
use linguasync_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_or_default(config::DEFAULT_PATH).expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let translator =
        Arc::new(HttpTranslator::from_config(&cfg.translator).expect("translator client build failed"));

    // Strict startup dependency: no degraded mode.
    if let Err(e) = translator.probe().await {
        tracing::error!(error = %e, endpoint = %cfg.translator.endpoint, "translation gateway unreachable at startup");
        std::process::exit(1);
    }
    tracing::info!(endpoint = %cfg.translator.endpoint, "translation gateway reachable");

    let state = app_state::AppState::new(cfg, translator);
    let app = router::build_router(state);

    tracing::info!(%listen, "linguasync-server starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
