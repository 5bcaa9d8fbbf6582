use axum::Json;
use axum::body::Bytes;
use axum::extract::{Extension, Query};
use axum::http::{HeaderName, StatusCode, header};
use axum::{Router, routing::get};
use clap::Parser;
use distributed_cache::group::{ByteView, GroupHandle, GroupRegistry, LoaderGroup};
use distributed_cache::ring::NodeId;
use distributed_cache::ring::ring::DEFAULT_REPLICAS;
use distributed_cache::router::{PeerRouter, RouterOptions, peer_routes};
use distributed_cache::transport::protocol::{CONTENT_TYPE_VALUE, DEFAULT_BASE_PATH};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// A cache node serving one demo group to its peers.
#[derive(Parser, Debug)]
#[command(name = "cache-node", version)]
struct Args {
    /// This node's address as its peers reach it, e.g. http://127.0.0.1:8001
    #[arg(long, env = "CACHE_ADDR", default_value = "http://127.0.0.1:8001")]
    addr: String,

    /// Socket to bind peer traffic on; derived from --addr when omitted
    #[arg(long, env = "CACHE_LISTEN")]
    listen: Option<String>,

    /// Cluster members, this node included (repeat or comma-separate)
    #[arg(long = "peer", env = "CACHE_PEERS", value_delimiter = ',')]
    peers: Vec<String>,

    /// Bind address for the frontend API
    #[arg(long, env = "CACHE_API")]
    api: Option<SocketAddr>,

    #[arg(long, default_value = DEFAULT_BASE_PATH)]
    base_path: String,

    #[arg(long, default_value_t = DEFAULT_REPLICAS)]
    replicas: usize,

    /// Peer fetch timeout in milliseconds
    #[arg(long, default_value_t = 3000)]
    timeout_ms: u64,
}

#[derive(Deserialize)]
struct ApiParams {
    key: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SetPeersRequest {
    peers: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PeersResponse {
    #[serde(rename = "self")]
    self_id: NodeId,
    peers: Vec<NodeId>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // 1. Peer router:
    let options = RouterOptions {
        base_path: args.base_path.clone(),
        replicas: args.replicas,
        hash_fn: None,
        fetch_timeout: Duration::from_millis(args.timeout_ms),
    };
    let router = Arc::new(PeerRouter::with_options(args.addr.clone(), options)?);

    let peers = if args.peers.is_empty() {
        vec![args.addr.clone()]
    } else {
        args.peers.clone()
    };
    router.set_peers(peers);

    // 2. Groups:
    let scores = create_scores_group();
    scores.register_peers(router.clone())?;

    let registry = GroupRegistry::new();
    registry.register(scores.clone());

    // 3. Frontend API:
    if let Some(api_addr) = args.api {
        let api = Router::new()
            .route("/api", get(handle_api_get))
            .route("/api/peers", get(handle_get_peers).put(handle_set_peers))
            .layer(Extension(router.clone()))
            .layer(Extension(scores.clone()));

        let listener = tokio::net::TcpListener::bind(api_addr).await?;
        tracing::info!("Frontend API listening on {}", api_addr);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, api).await {
                tracing::error!("Frontend API stopped: {}", e);
            }
        });
    }

    // 4. Peer server:
    let listen = args.listen.clone().unwrap_or_else(|| listen_addr(&args.addr));
    let app = peer_routes(router.clone(), registry);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    tracing::info!(
        "Cache node {} serving {} on {}",
        router.self_id(),
        router.base_path(),
        listen
    );
    axum::serve(listener, app).await?;

    Ok(())
}

/// `http://host:port/...` -> `host:port`
fn listen_addr(addr: &str) -> String {
    let without_scheme = addr
        .strip_prefix("http://")
        .or_else(|| addr.strip_prefix("https://"))
        .unwrap_or(addr);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .to_string()
}

fn create_scores_group() -> Arc<LoaderGroup> {
    let db: Arc<HashMap<&'static str, &'static str>> = Arc::new(HashMap::from([
        ("Tom", "630"),
        ("Jack", "589"),
        ("Sam", "567"),
    ]));

    LoaderGroup::new("scores", move |key: String| {
        let db = db.clone();
        async move {
            tracing::info!("[SlowDB] search key {}", key);
            match db.get(key.as_str()) {
                Some(value) => Ok(ByteView::from(*value)),
                None => Err(anyhow::anyhow!("{} not exist", key)),
            }
        }
    })
}

async fn handle_api_get(
    Extension(group): Extension<Arc<LoaderGroup>>,
    Query(params): Query<ApiParams>,
) -> Result<([(HeaderName, &'static str); 1], Bytes), (StatusCode, String)> {
    match group.get(&params.key).await {
        Ok(view) => Ok((
            [(header::CONTENT_TYPE, CONTENT_TYPE_VALUE)],
            view.into_bytes(),
        )),
        Err(e) => {
            tracing::debug!("API lookup for {} failed: {}", params.key, e);
            Err((StatusCode::NOT_FOUND, e.to_string()))
        }
    }
}

async fn handle_get_peers(
    Extension(router): Extension<Arc<PeerRouter>>,
) -> Json<PeersResponse> {
    Json(peers_response(&router))
}

async fn handle_set_peers(
    Extension(router): Extension<Arc<PeerRouter>>,
    Json(req): Json<SetPeersRequest>,
) -> (StatusCode, Json<PeersResponse>) {
    if req.peers.is_empty() {
        tracing::warn!("Rejected empty peer set");
        return (StatusCode::BAD_REQUEST, Json(peers_response(&router)));
    }

    router.set_peers(req.peers);
    (StatusCode::OK, Json(peers_response(&router)))
}

fn peers_response(router: &PeerRouter) -> PeersResponse {
    PeersResponse {
        self_id: router.self_id().clone(),
        peers: router.peers(),
    }
}
