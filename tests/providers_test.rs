//! Provider client tests against mocked upstream APIs.

mod common;

use std::io;
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use common::*;
use reelsearch::metadata::providers::{RottenTomatoesProvider, TmdbProvider, TvdbProvider};
use reelsearch::metadata::SearchProvider;
use reelsearch_common::{ProviderError, ProviderId, SearchQuery, StreamLinkTemplate};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn query(raw: &str) -> SearchQuery {
    SearchQuery::parse(raw).unwrap()
}

fn rotten_tomatoes(server: &MockServer) -> RottenTomatoesProvider {
    RottenTomatoesProvider::new(RT_KEY.into(), server.uri(), StreamLinkTemplate::default())
}

fn tmdb(server: &MockServer) -> TmdbProvider {
    TmdbProvider::new(TMDB_KEY.into(), server.uri(), 100, StreamLinkTemplate::default())
}

fn tvdb(server: &MockServer) -> TvdbProvider {
    TvdbProvider::new(
        TVDB_KEY.into(),
        server.uri(),
        "series".into(),
        StreamLinkTemplate::default(),
    )
}

// ---------------------------------------------------------------------------
// Rotten Tomatoes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rotten_tomatoes_maps_movie() {
    let server = MockServer::start().await;
    mount_rotten_tomatoes_inception(&server).await;

    let records = rotten_tomatoes(&server).search(&query("Inception")).await.unwrap();

    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.external_id, "12897");
    assert_eq!(r.title, "Inception");
    assert_eq!(r.imdb_id.as_deref(), Some("tt1375666"));
    assert_eq!(
        r.stream_url.as_deref(),
        Some("http://www.canistream.it/external/imdb/tt1375666?l=default")
    );
    assert_eq!(r.actors, vec!["Leonardo DiCaprio", "Joseph Gordon-Levitt"]);
    assert_eq!(r.banners.len(), 2);
}

#[tokio::test]
async fn rotten_tomatoes_zero_matches_is_empty_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 0, "movies": [] })))
        .mount(&server)
        .await;

    let records = rotten_tomatoes(&server).search(&query("zzzz")).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn rotten_tomatoes_server_error_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = rotten_tomatoes(&server).search(&query("Inception")).await.unwrap_err();
    assert_eq!(
        err,
        ProviderError::Status {
            provider: ProviderId::RottenTomatoes,
            status: 500
        }
    );
}

#[tokio::test]
async fn rotten_tomatoes_garbage_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = rotten_tomatoes(&server).search(&query("Inception")).await.unwrap_err();
    assert_matches!(err, ProviderError::Decode { provider: ProviderId::RottenTomatoes, .. });
}

#[tokio::test]
async fn rotten_tomatoes_api_error_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": "Account Inactive" })),
        )
        .mount(&server)
        .await;

    let err = rotten_tomatoes(&server).search(&query("Inception")).await.unwrap_err();
    assert!(err.to_string().contains("Account Inactive"), "{err}");
}

#[tokio::test]
async fn unreachable_host_is_request_error() {
    let provider = RottenTomatoesProvider::new(
        RT_KEY.into(),
        "http://127.0.0.1:1".into(),
        StreamLinkTemplate::default(),
    );

    let err = provider.search(&query("Inception")).await.unwrap_err();
    assert_matches!(err, ProviderError::Request { provider: ProviderId::RottenTomatoes, .. });
}

// ---------------------------------------------------------------------------
// TMDB
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tmdb_chains_detail_and_credits() {
    let server = MockServer::start().await;
    mount_tmdb_inception(&server).await;

    let records = tmdb(&server).search(&query("Inception")).await.unwrap();

    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.external_id, "27205");
    assert_eq!(r.imdb_id.as_deref(), Some("tt1375666"));
    assert!(r.plot.starts_with("Cobb"));
    assert_eq!(r.actors, vec!["Leonardo DiCaprio", "Ken Watanabe"]);
    assert_eq!(r.banners, vec!["/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg"]);
}

#[tokio::test]
async fn tmdb_credits_failure_fails_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": 27205, "title": "Inception" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/27205"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "imdb_id": "tt1375666" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/27205/credits"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = tmdb(&server).search(&query("Inception")).await.unwrap_err();
    assert_eq!(
        err,
        ProviderError::Status {
            provider: ProviderId::Tmdb,
            status: 503
        }
    );
}

#[tokio::test]
async fn tmdb_zero_matches_makes_no_detail_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let records = tmdb(&server).search(&query("zzzz")).await.unwrap();
    assert!(records.is_empty());
    server.verify().await;
}

// ---------------------------------------------------------------------------
// TheTVDB
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tvdb_chains_actors_and_banners() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/GetSeries.php"))
        .and(query_param("seriesname", "Star Trek"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<?xml version="1.0" encoding="UTF-8" ?>
            <Data>
              <Series>
                <seriesid>73255</seriesid>
                <SeriesName>Star Trek</SeriesName>
                <Overview>Space: the final frontier.</Overview>
                <IMDB_ID>tt0060028</IMDB_ID>
              </Series>
            </Data>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/{TVDB_KEY}/series/73255/actors.xml")))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<Actors><Actor><Name>William Shatner</Name></Actor><Actor><Name>Leonard Nimoy</Name></Actor></Actors>",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/{TVDB_KEY}/series/73255/banners.xml")))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<Banners>\
               <Banner><BannerPath>graphical/73255-g.jpg</BannerPath><BannerType>series</BannerType></Banner>\
               <Banner><BannerPath>fanart/original/73255-1.jpg</BannerPath><BannerType>fanart</BannerType></Banner>\
             </Banners>",
        ))
        .mount(&server)
        .await;

    let records = tvdb(&server).search(&query("Star Trek")).await.unwrap();

    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.external_id, "73255");
    assert_eq!(r.title, "Star Trek");
    assert_eq!(r.plot, "Space: the final frontier.");
    assert_eq!(r.imdb_id.as_deref(), Some("tt0060028"));
    assert_eq!(r.actors, vec!["William Shatner", "Leonard Nimoy"]);
    assert_eq!(r.banners, vec!["graphical/73255-g.jpg"]);
}

#[tokio::test]
async fn tvdb_empty_result() {
    let server = MockServer::start().await;
    mount_tvdb_empty(&server).await;

    let records = tvdb(&server).search(&query("nothing")).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn tvdb_missing_actors_document_fails_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/GetSeries.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<Data><Series><seriesid>1</seriesid><SeriesName>X</SeriesName></Series></Data>",
        ))
        .mount(&server)
        .await;
    // No mock for actors.xml: wiremock answers 404.

    let err = tvdb(&server).search(&query("X")).await.unwrap_err();
    assert_eq!(
        err,
        ProviderError::Status {
            provider: ProviderId::Tvdb,
            status: 404
        }
    );
}

#[tokio::test]
async fn tvdb_non_numeric_series_id_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/GetSeries.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<Data><Series><seriesid>../x</seriesid><SeriesName>X</SeriesName></Series></Data>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let err = tvdb(&server).search(&query("X")).await.unwrap_err();
    assert_matches!(err, ProviderError::Decode { provider: ProviderId::Tvdb, .. });

    // The bad id never reaches a follow-up request path.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    server.verify().await;
}

/// Log sink for asserting on what a provider writes to the log.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn tvdb_api_key_is_not_logged() {
    const KEY: &str = "SECRETKEY123";

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/GetSeries.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<Data><Series><seriesid>1</seriesid><SeriesName>X</SeriesName></Series></Data>",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/{KEY}/series/1/actors.xml")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<Actors></Actors>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/{KEY}/series/1/banners.xml")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<Banners></Banners>"))
        .mount(&server)
        .await;

    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("reelsearch=debug"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let provider = TvdbProvider::new(
        KEY.into(),
        server.uri(),
        "series".into(),
        StreamLinkTemplate::default(),
    );
    let records = provider.search(&query("X")).await.unwrap();
    assert_eq!(records.len(), 1);

    let output = logs.contents();
    assert!(output.contains("actors.xml"), "{output}");
    assert!(output.contains("/***/series/1/"), "{output}");
    assert!(!output.contains(KEY), "{output}");
}
