use std::sync::Arc;
use std::time::Duration;

use task_database::config::{DatabaseConfig, USAGE};
use task_database::discovery::client::DiscoveryClient;
use task_database::tasks::handlers::router;
use task_database::tasks::service::TaskService;

const STATS_INTERVAL: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = match DatabaseConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Starting task database on {} (advertised as {})",
        config.bind_addr,
        config.advertise_addr
    );

    // 1. Discovery registration. Nothing is served unless this works.
    let discovery = DiscoveryClient::new(config.discovery_addr.clone());
    if let Err(e) = discovery
        .register(&config.registration_key, &config.advertise_addr)
        .await
    {
        tracing::error!("Failed to register in discovery store: {}", e);
        std::process::exit(1);
    }

    // 2. Task service:
    let service = TaskService::with_lease(config.lease_duration);

    // 3. Stats reporter:
    let stats_service = Arc::clone(&service);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(STATS_INTERVAL);

        loop {
            interval.tick().await;
            let store = stats_service.store();
            let counts = store.state_counts().await;
            tracing::info!(
                "Task stats: {} pending, {} in progress, {} done (cursor {})",
                counts.pending,
                counts.in_progress,
                counts.done,
                store.cursor().await
            );
        }
    });

    // 4. HTTP server:
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!("HTTP server listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
