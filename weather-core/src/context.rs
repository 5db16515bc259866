use std::{sync::Arc, time::Duration};

use anyhow::Result;
use reqwest::Client;

use crate::{
    config::Config,
    location::{CoordinateResolver, GeoIpClient, platform_locator},
    provider::{WeatherProvider, provider_from_config},
};

/// Services a session needs, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct WeatherContext {
    resolver: Arc<CoordinateResolver>,
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherContext {
    pub fn new(resolver: CoordinateResolver, provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            resolver: Arc::new(resolver),
            provider,
        }
    }

    /// Build the context from config. Both credentials are required; a missing
    /// one is a startup error.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = provider_from_config(config)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.geoip.timeout_secs))
            .build()?;
        let geoip =
            GeoIpClient::new(config.geoip_token()?.to_owned(), config.geoip.url.clone(), http);

        let mut resolver = CoordinateResolver::new(geoip);
        if let Some(device) = platform_locator() {
            resolver = resolver.with_device(device);
        }

        Ok(Self::new(resolver, provider))
    }

    pub fn resolver(&self) -> &CoordinateResolver {
        &self.resolver
    }

    pub fn provider(&self) -> &Arc<dyn WeatherProvider> {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_requires_both_credentials() {
        let mut cfg = Config::default();
        cfg.weather.api_key = Some("KEY".into());

        let err = WeatherContext::from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("geo-IP"));

        cfg.geoip.token = Some("TOKEN".into());
        let ctx = WeatherContext::from_config(&cfg).expect("configured");
        assert_eq!(ctx.resolver().supports_device(), cfg!(windows));
    }
}
