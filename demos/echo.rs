//! Purpose: Small axum server that echoes strictly decoded JSON back in an envelope.
//! Role: Manual playground for the decoder and responder (`cargo run --example echo`).
//! Invariants: Every reply, success or failure, uses the `{error, message, data}` envelope.
//! Notes: Loopback bind by default; try `curl -d '{"name":"x","extra":1}' localhost:8080/echo`.

use axum::Router;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use clap::Parser;
use jsonkit::api::{BufferedResponse, Config, Envelope, StrictJson, error_json, write_json};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "echo", about = "Echo strictly decoded JSON bodies")]
struct Cli {
    #[arg(long, default_value = "127.0.0.1:8080", help = "Address to bind")]
    bind: SocketAddr,
    #[arg(long, default_value_t = 0, help = "Decode ceiling in bytes (0 = 1 MiB)")]
    max_json_size: usize,
    #[arg(long, help = "Ignore object keys the target does not know")]
    allow_unknown_fields: bool,
}

#[derive(Debug, Deserialize, Serialize)]
struct Greeting {
    name: String,
    #[serde(default)]
    times: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::new()
        .with_max_json_size(cli.max_json_size)
        .with_allow_unknown_fields(cli.allow_unknown_fields);

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/echo", post(echo))
        .route("/teapot", get(teapot))
        .layer(TraceLayer::new_for_http())
        .with_state(config);

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    tracing::info!(bind = %cli.bind, "echo server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

async fn healthz() -> Envelope {
    Envelope::message("ok")
}

async fn echo(StrictJson(greeting): StrictJson<Greeting>) -> Response {
    let mut headers = HeaderMap::new();
    let name = HeaderValue::from_str(&greeting.name).unwrap_or(HeaderValue::from_static("?"));
    headers.insert("x-echo-name", name);
    let payload = Envelope::ok("echo", greeting);
    let mut out = BufferedResponse::new();
    match write_json(&mut out, StatusCode::OK, &payload, Some(&headers)) {
        Ok(()) => out.into_response(),
        Err(err) => err.into_response(),
    }
}

async fn teapot() -> Response {
    let mut out = BufferedResponse::new();
    match error_json(&mut out, "short and stout", Some(StatusCode::IM_A_TEAPOT)) {
        Ok(()) => out.into_response(),
        Err(err) => err.into_response(),
    }
}
