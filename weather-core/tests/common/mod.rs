//! Shared fixtures for the wiremock-backed integration tests.
#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use reqwest::Client;
use serde_json::{Value, json};
use weather_core::{CoordinateResolver, GeoIpClient, VisualCrossingProvider, WeatherContext};

pub const API_KEY: &str = "VC_TEST_KEY";
pub const TOKEN: &str = "IPINFO_TEST_TOKEN";

pub fn http() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client")
}

pub fn provider(server_uri: &str) -> VisualCrossingProvider {
    VisualCrossingProvider::new(API_KEY.into(), format!("{server_uri}/timeline"), http())
}

pub fn geoip(server_uri: &str) -> GeoIpClient {
    GeoIpClient::new(TOKEN.into(), format!("{server_uri}/json"), http())
}

/// Context whose weather and IP services both point at `server_uri`.
pub fn context(server_uri: &str) -> WeatherContext {
    WeatherContext::new(
        CoordinateResolver::new(geoip(server_uri)),
        Arc::new(provider(server_uri)),
    )
}

pub fn day(tempmax: f64, description: &str) -> Value {
    json!({
        "datetime": "2025-01-27",
        "datetimeEpoch": 1737925200,
        "tempmax": tempmax,
        "tempmin": 27.8,
        "temp": 34.4,
        "feelslikemax": 42,
        "feelslikemin": 27.8,
        "feelslike": 33.4,
        "dew": 31.7,
        "humidity": 90.6,
        "precip": 0,
        "precipprob": 0,
        "precipcover": 0,
        "preciptype": null,
        "snow": 0,
        "snowdepth": 0,
        "windgust": 7.8,
        "windspeed": 6.9,
        "winddir": 193.1,
        "pressure": 1024.1,
        "cloudcover": 77.9,
        "visibility": 4.3,
        "solarradiation": 135.7,
        "solarenergy": 11.6,
        "uvindex": 5,
        "severerisk": 10,
        "sunrise": "08:01:16",
        "sunriseEpoch": 1737954076,
        "sunset": "18:01:55",
        "sunsetEpoch": 1737990115,
        "moonphase": 0.93,
        "conditions": "Partially cloudy",
        "description": description,
        "icon": "partly-cloudy-day",
        "stations": ["LTAC", "LTAB", "LTAE"],
        "source": "comb"
    })
}

pub fn weather_body(days: Value) -> Value {
    json!({
        "queryCost": 1,
        "latitude": 39.9272,
        "longitude": 32.8644,
        "resolvedAddress": "39.927200,32.864400",
        "address": "39.927200,32.864400",
        "timezone": "Europe/Istanbul",
        "tzoffset": 3,
        "days": days,
        "stations": {
            "LTAC": {
                "distance": 22252.0,
                "latitude": 39.9272,
                "longitude": 32.8644,
                "useCount": 0,
                "id": "LTAC",
                "name": "LTAC",
                "quality": 50,
                "contribution": 0.0
            }
        }
    })
}

pub fn ankara_body() -> Value {
    weather_body(json!([day(45.5, "Partly cloudy throughout the day.")]))
}

pub fn ipinfo_body() -> Value {
    json!({
        "ip": "123.123.123.123",
        "hostname": "hostname.comunity",
        "city": "Ankara",
        "region": "Ankara",
        "country": "TR",
        "loc": "39.9272,32.8644",
        "org": "Turk Telekom",
        "postal": "t-postal:06636",
        "timezone": "Europe/Istanbul"
    })
}

/// Base URI of a local port nobody is listening on.
pub fn closed_port_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}
