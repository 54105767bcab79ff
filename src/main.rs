mod config;
mod db;
mod entities;
mod error;
mod models;
mod omdb;
mod routes;
mod store;
mod templates;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, omdb::OmdbClient, store::MovieStore};

pub struct AppState {
    pub store: MovieStore,
    pub omdb: OmdbClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,moviefinder=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let http = reqwest::Client::builder()
        .user_agent("moviefinder/0.1")
        .timeout(Duration::from_secs(30))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = MovieStore::new(db);

    let omdb = OmdbClient::new(
        http,
        config.omdb_api_key.clone(),
        config.omdb_base_url.clone(),
        config.omdb_rps,
        config.max_concurrent,
    );

    let state = Arc::new(AppState { store, omdb });

    let app = Router::new()
        .route("/", get(routes::index))
        .route("/movies", get(routes::all_movies))
        .route("/movies/add", get(routes::add_movie_form).post(routes::add_movie))
        .route("/movies/delete", post(routes::delete_movie))
        .route("/movies/clear", post(routes::clear_movies))
        .route("/search/title", get(routes::search_title))
        .route("/search/title/save", post(routes::save_title_result))
        .route("/search/local/title", get(routes::search_local_title))
        .route("/search/local/actor", get(routes::search_local_actor))
        .route("/search/omdb", get(routes::search_omdb))
        .route("/search/omdb/save", post(routes::save_omdb_results))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
