use anyhow::{Context, Result};
use std::time::Duration;

use tower_http::services::ServeDir;
use tracing::info;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::metrics::{metrics_handler, record_query};
use super::{http_cache, log_requests, state::*, ServerConfig};
use crate::dashboard::{artist_options, DashboardSettings, DashboardState};
use crate::query::{query, ArtistSelector, QueryError, SearchTerm};
use crate::stats::artist_stats;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub artists: usize,
    pub songs: usize,
    pub words: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug, Default)]
struct SelectionParams {
    pub artist: Option<String>,
    pub search: Option<String>,
}

impl SelectionParams {
    fn selector(&self, settings: &DashboardSettings) -> ArtistSelector {
        match &self.artist {
            Some(label) => ArtistSelector::from_label(label, &settings.all_artists_label),
            None => ArtistSelector::AllArtists,
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = match self {
            QueryError::UnknownArtist(_) => StatusCode::NOT_FOUND,
            QueryError::NoSongs(_) => StatusCode::UNPROCESSABLE_ENTITY,
            QueryError::NotAggregated => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status, self.to_string()).into_response()
    }
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        artists: state.corpus.get_artists_count(),
        songs: state.corpus.get_songs_count(),
        words: state.corpus.get_words_count(),
    };
    Json(stats)
}

async fn get_artists(
    State(corpus): State<SharedCorpus>,
    State(settings): State<DashboardSettings>,
) -> impl IntoResponse {
    Json(artist_options(&corpus, &settings))
}

async fn get_dashboard(
    State(corpus): State<SharedCorpus>,
    State(settings): State<DashboardSettings>,
    Query(params): Query<SelectionParams>,
) -> impl IntoResponse {
    let dashboard = DashboardState::new(params.selector(&settings), params.search);
    let view = dashboard.render(&corpus, &settings);
    record_query(dashboard.selector(), view.outcome);
    Json(view)
}

async fn get_chart(
    State(corpus): State<SharedCorpus>,
    State(settings): State<DashboardSettings>,
    Query(params): Query<SelectionParams>,
) -> Result<impl IntoResponse, QueryError> {
    let search_term = SearchTerm::new(params.search.as_deref(), &settings.default_search_term);
    let chart = query(&corpus, &params.selector(&settings), &search_term)?;
    Ok(Json(chart))
}

async fn get_stats(
    State(corpus): State<SharedCorpus>,
    State(settings): State<DashboardSettings>,
    Path(artist): Path<String>,
) -> Response {
    let selector = ArtistSelector::from_label(&artist, &settings.all_artists_label);
    match artist_stats(&corpus, &selector) {
        Ok(Some(stats)) => Json(stats).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn make_app(config: ServerConfig, corpus: SharedCorpus) -> Router {
    let state = ServerState::new(config.clone(), corpus);

    let content_routes: Router = Router::new()
        .route("/artists", get(get_artists))
        .route("/dashboard", get(get_dashboard))
        .route("/chart", get(get_chart))
        .route("/stats/{artist}", get(get_stats))
        .layer(middleware::from_fn_with_state(
            config.content_cache_age_sec,
            http_cache,
        ))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    home_router
        .nest("/v1", content_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

pub async fn run_server(config: ServerConfig, corpus: SharedCorpus) -> Result<()> {
    let address = format!("{}:{}", config.bind_address, config.port);
    let metrics_address = format!("{}:{}", config.bind_address, config.metrics_port);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_address)
        .await
        .with_context(|| format!("Failed to bind metrics server to {}", metrics_address))?;

    info!("Ready to serve at {}", address);
    info!("Metrics available at {}/metrics", metrics_address);

    let app = make_app(config, corpus);
    tokio::try_join!(
        async { axum::serve(listener, app).await },
        async { axum::serve(metrics_listener, make_metrics_app()).await },
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate;
    use crate::corpus::Corpus;
    use axum::{body::Body, http::Request};
    use std::sync::Arc;
    use tower::ServiceExt; // for `oneshot`

    const CORPUS: &str = r#"
    {
        "ArtistX": {
            "Song1": { "lyrics": "i love rap", "word_frequency": { "i": 1, "love": 1, "rap": 1 } },
            "Song2": { "lyrics": "i love music", "word_frequency": [["i", 1], ["love", 1], ["music", 1]] }
        },
        "ArtistY": {
            "Song1": { "lyrics": "ja ja ty", "word_frequency": { "ja": 2, "ty": 1 } }
        },
        "Silent": {}
    }
    "#;

    fn test_corpus() -> SharedCorpus {
        let mut corpus = Corpus::from_json_str(CORPUS).unwrap();
        aggregate(&mut corpus).unwrap();
        Arc::new(corpus)
    }

    fn test_app() -> Router {
        let config = ServerConfig {
            requests_logging_level: super::super::RequestsLoggingLevel::None,
            content_cache_age_sec: 120,
            ..Default::default()
        };
        make_app(config, test_corpus())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[test]
    fn formats_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "0d 00:00:00");
        assert_eq!(format_uptime(Duration::from_secs(90_061)), "1d 01:01:01");
    }

    #[tokio::test]
    async fn home_reports_corpus_counts() {
        let (status, json) = get_json(test_app(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["artists"], 3);
        assert_eq!(json["songs"], 3);
        assert_eq!(json["words"], 6);
    }

    #[tokio::test]
    async fn lists_artist_options() {
        let (status, json) = get_json(test_app(), "/v1/artists").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["options"],
            serde_json::json!(["ArtistX", "ArtistY", "Silent", "All artists"])
        );
        assert_eq!(json["default"], "All artists");
    }

    #[tokio::test]
    async fn dashboard_defaults_to_all_artists() {
        let (status, json) = get_json(test_app(), "/v1/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["selection"], "All artists");
        assert_eq!(json["search_visible"], true);
        assert_eq!(json["stats"], serde_json::Value::Null);
        assert_eq!(json["chart"]["axis"], "artist");
        assert_eq!(json["chart"]["search_term"], "ja");
        assert_eq!(json["chart"]["entries"][0]["label"], "ArtistY");
        assert_eq!(json["chart"]["entries"][0]["value"], 2.0);
    }

    #[tokio::test]
    async fn dashboard_per_artist_view() {
        let (status, json) = get_json(test_app(), "/v1/dashboard?artist=ArtistX&search=rap").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["search_visible"], false);
        assert_eq!(json["chart"]["axis"], "word");
        assert_eq!(json["chart"]["axis_title"], "Word");
        assert_eq!(json["chart"]["entries"].as_array().unwrap().len(), 4);
        assert_eq!(json["stats"]["total_word_count"], 6);
        assert_eq!(json["stats"]["average_word_length"], 3.25);
    }

    #[tokio::test]
    async fn dashboard_degrades_unknown_artist() {
        let (status, json) = get_json(test_app(), "/v1/dashboard?artist=Nobody").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["chart"]["entries"], serde_json::json!([]));
        assert_eq!(json["stats"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn chart_maps_errors_to_status() {
        let (status, json) = get_json(test_app(), "/v1/chart?search=%20LOVE%20").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["search_term"], "love");
        assert_eq!(json["entries"][0]["label"], "ArtistX");
        assert_eq!(json["entries"][0]["value"], 1.0);

        let (status, _) = get_json(test_app(), "/v1/chart?artist=Nobody").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn stats_status_codes() {
        let (status, json) = get_json(test_app(), "/v1/stats/ArtistY").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_song_count"], 1);
        assert_eq!(json["average_unique_words_per_song"], 2.0);

        let (status, _) = get_json(test_app(), "/v1/stats/All%20artists").await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = get_json(test_app(), "/v1/stats/Silent").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = get_json(test_app(), "/v1/stats/Nobody").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn content_routes_are_cacheable() {
        let request = Request::builder()
            .uri("/v1/artists")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get("cache-control").unwrap(),
            "max-age=120"
        );

        let request = Request::builder()
            .uri("/v1/stats/Nobody")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert!(response.headers().get("cache-control").is_none());
    }

    #[tokio::test]
    async fn serves_frontend_when_configured() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>lyrics</h1>").unwrap();
        let config = ServerConfig {
            requests_logging_level: super::super::RequestsLoggingLevel::None,
            frontend_dir_path: Some(dir.path().to_string_lossy().to_string()),
            ..Default::default()
        };
        let app = make_app(config, test_corpus());

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<h1>lyrics</h1>");

        let (status, _) = get_json(app, "/v1/artists").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn static_files_do_not_add_metric_paths() {
        use prometheus::core::Collector;

        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("bundle-81c2e.js"), "void 0").unwrap();
        let config = ServerConfig {
            requests_logging_level: super::super::RequestsLoggingLevel::None,
            frontend_dir_path: Some(dir.path().to_string_lossy().to_string()),
            ..Default::default()
        };
        let app = make_app(config, test_corpus());

        for uri in ["/bundle-81c2e.js", "/missing-81c2e.js"] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            app.clone().oneshot(request).await.unwrap();
        }

        let paths: Vec<String> = super::super::metrics::HTTP_REQUESTS_TOTAL
            .collect()
            .iter()
            .flat_map(|family| family.get_metric().iter())
            .flat_map(|metric| metric.get_label().iter())
            .filter(|label| label.get_name() == "path")
            .map(|label| label.get_value().to_owned())
            .collect();
        assert!(paths.iter().any(|p| p == "fallback"));
        assert!(!paths.iter().any(|p| p.contains("81c2e")));
    }

    #[tokio::test]
    async fn metrics_endpoint_exposes_prefixed_metrics() {
        super::super::metrics::init_metrics();

        let request = Request::builder()
            .uri("/metrics")
            .body(Body::empty())
            .unwrap();
        let response = make_metrics_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("lyrics_stats_process_memory_bytes"));
    }
}
