use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    error::{Result, WeatherError},
    model::Coordinate,
};

/// ipinfo.io lookup result. Only `loc` matters for resolution; the rest is
/// passed through for callers that want it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpInfo {
    pub ip: Option<String>,
    pub hostname: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    /// `"latitude,longitude"`
    pub loc: Option<String>,
    pub org: Option<String>,
    pub postal: Option<String>,
    pub timezone: Option<String>,
}

impl IpInfo {
    pub fn coordinate(&self) -> Result<Coordinate> {
        let loc = self
            .loc
            .as_deref()
            .ok_or_else(|| WeatherError::MalformedLocationResponse("missing `loc` field".into()))?;

        loc.parse().map_err(|_| {
            WeatherError::MalformedLocationResponse(format!(
                "`loc` is not latitude,longitude: {loc}"
            ))
        })
    }
}

#[derive(Debug, Clone)]
pub struct GeoIpClient {
    token: String,
    url: String,
    http: Client,
}

impl GeoIpClient {
    pub fn new(token: String, url: String, http: Client) -> Self {
        Self { token, url, http }
    }

    pub async fn lookup(&self) -> Result<IpInfo> {
        let request = self
            .http
            .get(&self.url)
            .query(&[("token", self.token.as_str())])
            .build()?;

        debug!(url = %request.url(), "Sending IP geolocation request");

        let res = self.http.execute(request).await.map_err(|err| {
            let err = err.without_url();
            warn!(error = %err, "IP geolocation request failed");
            WeatherError::NetworkError(format!("IP geolocation request failed: {err}"))
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            let err = err.without_url();
            WeatherError::NetworkError(format!("Failed to read IP geolocation body: {err}"))
        })?;

        if !status.is_success() {
            return Err(WeatherError::NetworkError(format!(
                "IP geolocation request failed with status {status}"
            )));
        }

        serde_json::from_str(&body)
            .map_err(|err| WeatherError::MalformedLocationResponse(err.to_string()))
    }

    pub async fn locate(&self) -> Result<Coordinate> {
        let info = self.lookup().await?;
        let coordinate = info.coordinate()?;

        info!(
            %coordinate,
            city = info.city.as_deref().unwrap_or("-"),
            country = info.country.as_deref().unwrap_or("-"),
            "Resolved coordinates by IP"
        );

        Ok(coordinate)
    }
}
