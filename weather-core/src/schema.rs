//! Wire types for the Visual Crossing timeline API.
//!
//! Fields the provider always sends are required; absence is a decode error
//! and signals a broken provider contract. Fields it omits when they do not
//! apply (precipitation detail, snow, sunrise/sunset) are `Option`. Unknown
//! fields are ignored. Every real-valued field is `f64` so both `0` and `0.0`
//! literals decode.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Observation station contributing to a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Metres from the query point.
    pub distance: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "useCount")]
    pub use_count: u32,
    pub id: String,
    pub name: String,
    pub quality: u32,
    /// Signed weight of this station in the combined result.
    pub contribution: f64,
}

/// One calendar day of observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub datetime: NaiveDate,
    #[serde(rename = "datetimeEpoch")]
    pub datetime_epoch: i64,

    #[serde(rename = "tempmax")]
    pub temp_max: f64,
    #[serde(rename = "tempmin")]
    pub temp_min: f64,
    pub temp: f64,
    #[serde(rename = "feelslikemax")]
    pub feels_like_max: f64,
    #[serde(rename = "feelslikemin")]
    pub feels_like_min: f64,
    #[serde(rename = "feelslike")]
    pub feels_like: f64,
    pub dew: f64,
    pub humidity: f64,

    #[serde(default)]
    pub precip: Option<f64>,
    #[serde(rename = "precipprob", default)]
    pub precip_prob: Option<f64>,
    #[serde(rename = "precipcover")]
    pub precip_cover: f64,
    #[serde(rename = "preciptype", default)]
    pub precip_type: Option<Vec<String>>,
    #[serde(default)]
    pub snow: Option<f64>,
    #[serde(rename = "snowdepth", default)]
    pub snow_depth: Option<f64>,

    #[serde(rename = "windgust")]
    pub wind_gust: f64,
    #[serde(rename = "windspeed")]
    pub wind_speed: f64,
    #[serde(rename = "winddir")]
    pub wind_dir: f64,
    pub pressure: f64,
    #[serde(rename = "cloudcover")]
    pub cloud_cover: f64,
    pub visibility: f64,
    #[serde(rename = "solarradiation")]
    pub solar_radiation: f64,
    #[serde(rename = "solarenergy")]
    pub solar_energy: f64,
    #[serde(rename = "uvindex")]
    pub uv_index: f64,
    #[serde(rename = "severerisk")]
    pub severe_risk: f64,

    #[serde(default)]
    pub sunrise: Option<NaiveTime>,
    #[serde(rename = "sunriseEpoch", default)]
    pub sunrise_epoch: Option<i64>,
    #[serde(default)]
    pub sunset: Option<NaiveTime>,
    #[serde(rename = "sunsetEpoch", default)]
    pub sunset_epoch: Option<i64>,
    #[serde(rename = "moonphase")]
    pub moon_phase: f64,

    pub conditions: String,
    pub description: String,
    pub icon: String,
    pub stations: Vec<String>,
    pub source: String,
}

impl Day {
    pub fn is_precipitating(&self) -> bool {
        self.precip_type.as_ref().is_some_and(|types| !types.is_empty())
    }
}

/// Response envelope of a timeline query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    #[serde(rename = "queryCost")]
    pub query_cost: u32,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "resolvedAddress")]
    pub resolved_address: String,
    pub address: String,
    pub timezone: String,
    /// Hours from UTC; fractional for zones like Asia/Kolkata.
    #[serde(rename = "tzoffset")]
    pub tz_offset: f64,
    /// Chronological; the first entry is today.
    #[serde(default)]
    pub days: Vec<Day>,
    #[serde(default)]
    pub stations: HashMap<String, Station>,
}

impl WeatherResponse {
    pub fn today(&self) -> Option<&Day> {
        self.days.first()
    }
}
