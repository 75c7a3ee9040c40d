use bus_board::config::ServerConfig;
use bus_board::schedule::TransitData;
use bus_board::search::FavoritesStore;
use bus_board::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bus_board=info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Load the dataset (fail fast if it is missing or inconsistent)
    info!(path = %config.data_path.display(), "loading dataset");
    let data = TransitData::load(&config.data_path).expect("Failed to load dataset");

    let store = FavoritesStore::new(&config.favorites_path);
    let favorites = store.load().expect("Failed to load favorites");
    info!(count = favorites.len(), path = %store.path().display(), "loaded favorites");

    let state = AppState::new(data, config.board.clone(), favorites, store);
    let app = create_router(state, &config.static_dir);

    let addr = config.addr;
    info!("Bus board listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET  /health                 - Health check");
    info!("  GET  /api/stops/search?q=    - Search stop groups");
    info!("  GET  /api/board?name=        - Departure board");
    info!("  GET  /api/trips/:trip?stop=  - Trip timeline");
    info!("  POST /api/favorites/toggle   - Toggle a favourite");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
