//! Shared test harness for integration tests.
//!
//! Every provider is pointed at a single [`MockServer`]; the three APIs use
//! disjoint paths so one server can play all of them. [`TestHarness`] builds
//! a full [`AppContext`] from that config, and [`TestHarness::with_server`]
//! starts Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use reelsearch::config::Config;
use reelsearch::server::{create_router, AppContext};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const RT_KEY: &str = "rt-key";
pub const TMDB_KEY: &str = "tmdb-key";
pub const TVDB_KEY: &str = "tvdb-key";

/// Config with all three providers enabled against `server`.
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.search.timeout_secs = 5;

    config.providers.rotten_tomatoes.api_key = RT_KEY.into();
    config.providers.rotten_tomatoes.base_url = server.uri();

    config.providers.tmdb.api_key = TMDB_KEY.into();
    config.providers.tmdb.base_url = server.uri();
    config.providers.tmdb.requests_per_second = 100;

    config.providers.tvdb.api_key = TVDB_KEY.into();
    config.providers.tvdb.base_url = server.uri();
    config
}

/// Rotten Tomatoes answers `q` with one Inception record (bare IMDB id).
pub async fn mount_rotten_tomatoes_inception(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/movies.json"))
        .and(query_param("apikey", RT_KEY))
        .and(query_param("q", "Inception"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "movies": [{
                "id": "12897",
                "title": "Inception",
                "synopsis": "A thief who steals corporate secrets through dreams.",
                "alternate_ids": { "imdb": "1375666" },
                "abridged_cast": [
                    { "name": "Leonardo DiCaprio", "characters": ["Cobb"] },
                    { "name": "Joseph Gordon-Levitt" }
                ],
                "posters": {
                    "thumbnail": "http://content.rottentomatoes.com/inception_tmb.jpg",
                    "original": "http://content.rottentomatoes.com/inception_ori.jpg"
                }
            }]
        })))
        .mount(server)
        .await;
}

/// TMDB search, detail, and credits for Inception (movie 27205).
pub async fn mount_tmdb_inception(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("api_key", TMDB_KEY))
        .and(query_param("query", "Inception"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [{ "id": 27205, "title": "Inception" }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movie/27205"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 27205,
            "imdb_id": "tt1375666",
            "overview": "Cobb, a skilled thief, is offered a chance at redemption.",
            "poster_path": "/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movie/27205/credits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 27205,
            "cast": [
                { "cast_id": 1, "name": "Leonardo DiCaprio", "character": "Cobb" },
                { "cast_id": 3, "name": "Ken Watanabe", "character": "Saito" }
            ],
            "crew": [{ "name": "Christopher Nolan", "job": "Director" }]
        })))
        .mount(server)
        .await;
}

/// TheTVDB finds no series for any query.
pub async fn mount_tvdb_empty(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/GetSeries.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/xml")
                .set_body_string(r#"<?xml version="1.0" encoding="UTF-8" ?><Data></Data>"#),
        )
        .mount(server)
        .await;
}

/// TheTVDB series search that only answers after `delay`.
pub async fn mount_tvdb_slow(server: &MockServer, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/GetSeries.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<Data></Data>")
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Test harness wrapping a fully-constructed [`AppContext`].
pub struct TestHarness {
    pub ctx: AppContext,
}

impl TestHarness {
    pub fn with_config(config: Config) -> Self {
        let ctx = AppContext::from_config(config).expect("failed to build app context");
        Self { ctx }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config);
        let app = create_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}
