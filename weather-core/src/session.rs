use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    context::WeatherContext,
    error::{Result, WeatherError},
    model::{Coordinate, CoordinateDirective, UnitGroup},
    provider::WeatherProvider,
};

/// A resolved query: coordinates, language and unit group fixed at
/// construction.
///
/// Construction either yields a ready session or fails; there is no
/// half-initialised state to observe.
#[derive(Debug, Clone)]
pub struct WeatherSession {
    coordinate: Coordinate,
    language: String,
    unit_group: UnitGroup,
    symbol: &'static str,
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherSession {
    /// Parse the unit group, then resolve coordinates per `directive`.
    ///
    /// The unit group is checked first so a bad value never costs a network
    /// round trip.
    pub async fn new(
        ctx: &WeatherContext,
        directive: &CoordinateDirective,
        language: &str,
        unit_group: &str,
    ) -> Result<Self> {
        let unit_group: UnitGroup = unit_group.parse()?;

        debug!(%directive, "Resolving coordinates");
        let coordinate = ctx.resolver().resolve(directive).await?;

        Ok(Self::with_coordinate(ctx.provider().clone(), coordinate, language, unit_group))
    }

    pub fn with_coordinate(
        provider: Arc<dyn WeatherProvider>,
        coordinate: Coordinate,
        language: &str,
        unit_group: UnitGroup,
    ) -> Self {
        Self {
            coordinate,
            language: language.to_string(),
            unit_group,
            symbol: unit_group.symbol(),
            provider,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn unit_group(&self) -> UnitGroup {
        self.unit_group
    }

    pub fn unit_symbol(&self) -> &'static str {
        self.symbol
    }

    /// `"{lat},{lon} | {tempmax}{symbol} -> {description}"` for today.
    pub async fn describe_current_weather(&self) -> Result<String> {
        let response = self
            .provider
            .fetch_today(&self.coordinate, &self.language, self.unit_group)
            .await?;

        let today = response.today().ok_or(WeatherError::NoDayData)?;

        info!(
            coordinate = %self.coordinate,
            date = %today.datetime,
            conditions = %today.conditions,
            "Described current weather"
        );

        // `{:?}` keeps one decimal on whole values: 45.0, not 45.
        Ok(format!(
            "{} | {:?}{} -> {}",
            self.coordinate, today.temp_max, self.symbol, today.description
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        location::{CoordinateResolver, GeoIpClient},
        schema::WeatherResponse,
    };
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct StubProvider {
        response: crate::Result<WeatherResponse>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(response: crate::Result<WeatherResponse>) -> Arc<Self> {
            Arc::new(Self { response, calls: AtomicUsize::new(0) })
        }
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn fetch_today(
            &self,
            _coordinate: &Coordinate,
            _language: &str,
            _unit_group: UnitGroup,
        ) -> crate::Result<WeatherResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn response(days: serde_json::Value) -> WeatherResponse {
        serde_json::from_value(json!({
            "queryCost": 1,
            "latitude": 39.9272,
            "longitude": 32.8644,
            "resolvedAddress": "39.927200,32.864400",
            "address": "39.927200,32.864400",
            "timezone": "Europe/Istanbul",
            "tzoffset": 3,
            "days": days,
            "stations": {}
        }))
        .unwrap()
    }

    fn today(tempmax: f64, description: &str) -> serde_json::Value {
        json!({
            "datetime": "2025-01-27", "datetimeEpoch": 1737925200,
            "tempmax": tempmax, "tempmin": 27.8, "temp": 34.4,
            "feelslikemax": 42, "feelslikemin": 27.8, "feelslike": 33.4,
            "dew": 31.7, "humidity": 90.6, "precipcover": 0,
            "windgust": 7.8, "windspeed": 6.9, "winddir": 193.1, "pressure": 1024.1,
            "cloudcover": 77.9, "visibility": 4.3, "solarradiation": 135.7, "solarenergy": 11.6,
            "uvindex": 5, "severerisk": 10, "moonphase": 0.93,
            "conditions": "Partially cloudy", "description": description,
            "icon": "partly-cloudy-day", "stations": ["LTAC"], "source": "comb"
        })
    }

    fn context(provider: Arc<StubProvider>) -> WeatherContext {
        let geoip = GeoIpClient::new(
            "TOKEN".into(),
            "http://127.0.0.1:9/json".into(),
            reqwest::Client::new(),
        );
        WeatherContext::new(CoordinateResolver::new(geoip), provider)
    }

    fn ankara() -> CoordinateDirective {
        CoordinateDirective::Explicit(Coordinate::new(39.9272, 32.8644).unwrap())
    }

    #[tokio::test]
    async fn describes_today_with_metric_symbol() {
        let days = json!([today(45.5, "Partly cloudy throughout the day.")]);
        let provider = StubProvider::new(Ok(response(days)));
        let session = WeatherSession::new(&context(provider.clone()), &ankara(), "tr", "metric")
            .await
            .unwrap();

        assert_eq!(session.unit_symbol(), "°C");
        assert_eq!(session.language(), "tr");
        assert_eq!(
            session.describe_current_weather().await.unwrap(),
            "39.9272,32.8644 | 45.5°C -> Partly cloudy throughout the day."
        );
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn whole_number_values_keep_one_decimal() {
        let provider = StubProvider::new(Ok(response(json!([today(45.0, "Clear.")]))));
        let directive = CoordinateDirective::Explicit(Coordinate::new(40.0, 30.0).unwrap());
        let session = WeatherSession::new(&context(provider), &directive, "en", "metric")
            .await
            .unwrap();

        assert_eq!(
            session.describe_current_weather().await.unwrap(),
            "40.0,30.0 | 45.0°C -> Clear."
        );
    }

    #[tokio::test]
    async fn unit_symbol_per_group() {
        let provider = StubProvider::new(Ok(response(json!([]))));
        let ctx = context(provider);

        for (group, symbol) in [("metric", "°C"), ("us", "°F"), ("uk", "°C"), ("base", "K")] {
            let session = WeatherSession::new(&ctx, &ankara(), "en", group).await.unwrap();
            assert_eq!(session.unit_symbol(), symbol, "{group}");
        }
    }

    #[tokio::test]
    async fn invalid_unit_group_fails_construction() {
        let provider = StubProvider::new(Ok(response(json!([]))));
        let err = WeatherSession::new(&context(provider.clone()), &ankara(), "tr", "kelvin")
            .await
            .unwrap_err();

        assert_eq!(err, WeatherError::InvalidUnitGroup("kelvin".into()));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn gps_without_device_fails_construction() {
        let provider = StubProvider::new(Ok(response(json!([]))));
        let err = WeatherSession::new(&context(provider), &CoordinateDirective::Gps, "tr", "metric")
            .await
            .unwrap_err();

        assert_eq!(err, WeatherError::DeviceLocationUnsupported);
    }

    #[tokio::test]
    async fn empty_days_is_no_day_data() {
        let provider = StubProvider::new(Ok(response(json!([]))));
        let session = WeatherSession::new(&context(provider), &ankara(), "tr", "us").await.unwrap();

        assert_eq!(session.describe_current_weather().await.unwrap_err(), WeatherError::NoDayData);
    }

    #[tokio::test]
    async fn provider_errors_propagate_unchanged() {
        let provider = StubProvider::new(Err(WeatherError::ProviderError {
            status: 401,
            body: "bad key".into(),
        }));
        let session = WeatherSession::with_coordinate(
            provider,
            Coordinate::new(1.0, 2.0).unwrap(),
            "en",
            UnitGroup::Base,
        );

        let err = session.describe_current_weather().await.unwrap_err();
        assert!(matches!(err, WeatherError::ProviderError { status: 401, .. }));
    }
}
