use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use crate::{
    error::{Result, WeatherError},
    model::{Coordinate, UnitGroup},
    schema::WeatherResponse,
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct VisualCrossingProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl VisualCrossingProvider {
    pub fn new(api_key: String, base_url: String, http: Client) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn timeline_url(&self, coordinate: &Coordinate) -> String {
        format!("{}/{coordinate}/today", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for VisualCrossingProvider {
    async fn fetch_today(
        &self,
        coordinate: &Coordinate,
        language: &str,
        unit_group: UnitGroup,
    ) -> Result<WeatherResponse> {
        info!(%coordinate, %unit_group, language, "Fetching today's weather");

        let request = self
            .http
            .get(self.timeline_url(coordinate))
            .query(&[
                ("unitGroup", unit_group.as_str()),
                ("lang", language),
                ("key", self.api_key.as_str()),
                ("contentType", "json"),
                ("include", "days"),
            ])
            .build()?;

        // The URL carries the key; keep it out of anything above debug.
        debug!(url = %request.url(), "Sending Visual Crossing request");

        let res = self.http.execute(request).await.map_err(|err| {
            let err = err.without_url();
            error!(error = %err, "Visual Crossing request failed");
            WeatherError::NetworkError(format!("Failed to send request to Visual Crossing: {err}"))
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            let err = err.without_url();
            WeatherError::NetworkError(format!(
                "Failed to read Visual Crossing response body: {err}"
            ))
        })?;

        if !status.is_success() {
            error!(status = status.as_u16(), "Visual Crossing returned an error status");
            return Err(WeatherError::ProviderError {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: WeatherResponse = serde_json::from_str(&body).map_err(|err| {
            error!(error = %err, "Visual Crossing response does not match the schema");
            WeatherError::MalformedResponse(err.to_string())
        })?;

        debug!(
            days = parsed.days.len(),
            stations = parsed.stations.len(),
            query_cost = parsed.query_cost,
            "Weather data fetched successfully"
        );

        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
