use crate::{
    Config, WeatherResponse,
    model::{Coordinate, UnitGroup},
    provider::visualcrossing::VisualCrossingProvider,
};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, sync::Arc, time::Duration};

pub mod visualcrossing;

/// Source of today's weather for a coordinate.
///
/// Implementations do not retry; the caller owns that decision.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_today(
        &self,
        coordinate: &Coordinate,
        language: &str,
        unit_group: UnitGroup,
    ) -> crate::Result<WeatherResponse>;
}

/// Construct the weather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.weather_api_key()?;

    let http = Client::builder()
        .timeout(Duration::from_secs(config.weather.timeout_secs))
        .build()?;

    Ok(Arc::new(VisualCrossingProvider::new(
        api_key.to_owned(),
        config.weather.base_url.clone(),
        http,
    )))
}
