use station_server::config::ServerConfig;
use station_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    for source in [&config.stations, &config.lines] {
        if !source.path.exists() {
            // Requests will fail with 500 until the file appears
            error!(path = %source.path.display(), layer = %source.layer, "data file not found");
        }
    }

    let state = AppState::new(config.dataset());
    let app = create_router(state);

    let addr = config.bind_addr;
    info!(
        stations = %config.stations.path.display(),
        lines = %config.lines.path.display(),
        "Station server listening on http://{addr}"
    );
    info!("API Endpoints:");
    info!("  GET  /                  - Status");
    info!("  GET  /stations_list     - Stations with geometry");
    info!("  GET  /nearest           - Nearest stations (?lat=&lon=&n=)");
    info!("  GET  /distance          - Distance between stations (?from=&to=)");
    info!("  GET  /stations.geojson  - Stations layer as GeoJSON");
    info!("  GET  /lines.geojson     - Railway layer as GeoJSON");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
