//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per server endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    pub async fn get_home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }

    pub async fn get_artists(&self) -> Response {
        self.client
            .get(format!("{}/v1/artists", self.base_url))
            .send()
            .await
            .expect("Artists request failed")
    }

    /// `None` values are left out of the query string.
    pub async fn get_dashboard(&self, artist: Option<&str>, search: Option<&str>) -> Response {
        self.client
            .get(format!("{}/v1/dashboard", self.base_url))
            .query(&selection_query(artist, search))
            .send()
            .await
            .expect("Dashboard request failed")
    }

    pub async fn get_chart(&self, artist: Option<&str>, search: Option<&str>) -> Response {
        self.client
            .get(format!("{}/v1/chart", self.base_url))
            .query(&selection_query(artist, search))
            .send()
            .await
            .expect("Chart request failed")
    }

    pub async fn get_stats(&self, artist: &str) -> Response {
        let url = reqwest::Url::parse(&self.base_url)
            .and_then(|base| base.join("/v1/stats/"))
            .map(|mut url| {
                url.path_segments_mut()
                    .expect("Base URL cannot be a base")
                    .pop_if_empty()
                    .push(artist);
                url
            })
            .expect("Invalid stats URL");
        self.client
            .get(url)
            .send()
            .await
            .expect("Stats request failed")
    }
}

fn selection_query<'a>(
    artist: Option<&'a str>,
    search: Option<&'a str>,
) -> Vec<(&'static str, &'a str)> {
    let mut query = vec![];
    if let Some(artist) = artist {
        query.push(("artist", artist));
    }
    if let Some(search) = search {
        query.push(("search", search));
    }
    query
}
