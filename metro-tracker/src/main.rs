use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use metro_tracker::cache::{CacheConfig, CachedPlanner};
use metro_tracker::config::ServerConfig;
use metro_tracker::graph::{Network, Topology};
use metro_tracker::notify::{FanOut, LogSink, Notifier, WebhookConfig, WebhookSink};
use metro_tracker::planner::PlannerConfig;
use metro_tracker::web::{AppState, TripSettings, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("metro_tracker=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Load the network
    let network = match &config.topology_path {
        Some(path) => {
            info!(path = %path.display(), "loading topology");
            Network::build(&Topology::from_path(path)?)?
        }
        None => Network::reference()?,
    };

    let planner = CachedPlanner::new(
        Arc::new(network),
        PlannerConfig::default(),
        &CacheConfig::default(),
    );

    // Alerts always go to the log, and to the webhook when one is configured
    let mut sinks = vec![Notifier::Log(LogSink)];
    if let Some(url) = &config.webhook_url {
        let webhook = WebhookConfig::new(url).with_timeout(config.webhook_timeout_secs);
        sinks.push(Notifier::Webhook(WebhookSink::new(webhook)?));
        info!(%url, "webhook notifications enabled");
    }

    let state = AppState::new(planner, FanOut::new(sinks), TripSettings::default());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "metro tracker listening");
    info!("  GET    /health         - Health check");
    info!("  GET    /stations       - List stations");
    info!("  GET    /route          - Plan a route");
    info!("  POST   /trip           - Start tracking a trip");
    info!("  POST   /trip/fix       - Push a position fix");
    info!("  POST   /trip/motion    - Push a motion sample");
    info!("  GET    /trip/status    - Live trip status");
    info!("  DELETE /trip           - Stop tracking");

    axum::serve(listener, app).await?;
    Ok(())
}
