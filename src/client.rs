use std::time::Duration;

use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;

use crate::ShowtimesApi;
use crate::api::{MovieResponse, RawMovieData, RawMovieSummary};
use crate::config::{Settings, USER_AGENT};
use crate::error::{Error, Result};

/// Client for the showtimes JSON API.
pub struct HttpShowtimesApi {
    client: Client,
    base_url: String,
}

impl HttpShowtimesApi {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, settings.base_url()))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// `None` when the API answers 404.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        tracing::debug!(url, "fetching showtimes payload");
        let resp = self
            .client
            .get(url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "application/json,text/javascript,*/*;q=0.1")
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = resp.error_for_status()?.text().await?;

        match serde_json::from_str(&body) {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                let preview: String = body.chars().take(500).collect();
                tracing::error!(url, error = %e, %preview, "failed to parse JSON");
                Err(e.into())
            }
        }
    }
}

#[async_trait::async_trait]
impl ShowtimesApi for HttpShowtimesApi {
    async fn fetch_listing(&self) -> Result<Vec<RawMovieSummary>> {
        let url = format!("{}/", self.base_url);
        let listing = self.get_json::<Vec<RawMovieSummary>>(&url).await?;
        Ok(listing.unwrap_or_default())
    }

    async fn fetch_movie(&self, slug: &str) -> Result<RawMovieData> {
        let url = format!("{}/{}", self.base_url, slug);
        self.get_json::<MovieResponse>(&url)
            .await?
            .map(|movie| movie.data)
            .ok_or_else(|| Error::MovieNotFound(slug.to_string()))
    }
}
