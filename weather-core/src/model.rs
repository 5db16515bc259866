use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, WeatherError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(WeatherError::InvalidCoordinateFormat(format!(
                "{latitude},{longitude} is outside latitude [-90, 90] / longitude [-180, 180]"
            )));
        }

        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Whole degrees keep one decimal place: `40.0,30.0`.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?},{:?}", self.latitude, self.longitude)
    }
}

/// Parses `"latitude,longitude"`.
impl FromStr for Coordinate {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WeatherError::InvalidCoordinateFormat(s.to_string());

        let mut parts = s.split(',');
        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

        Coordinate::new(lat, lon)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            latitude: f64,
            longitude: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Coordinate::new(raw.latitude, raw.longitude).map_err(serde::de::Error::custom)
    }
}

/// Measurement system the provider formats values in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitGroup {
    Metric,
    Us,
    Uk,
    Base,
}

impl UnitGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitGroup::Metric => "metric",
            UnitGroup::Us => "us",
            UnitGroup::Uk => "uk",
            UnitGroup::Base => "base",
        }
    }

    /// Temperature symbol for values reported in this unit group.
    pub fn symbol(&self) -> &'static str {
        match self {
            UnitGroup::Metric | UnitGroup::Uk => "°C",
            UnitGroup::Us => "°F",
            UnitGroup::Base => "K",
        }
    }

    pub const fn all() -> &'static [UnitGroup] {
        &[UnitGroup::Metric, UnitGroup::Us, UnitGroup::Uk, UnitGroup::Base]
    }
}

impl fmt::Display for UnitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitGroup {
    type Err = WeatherError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "metric" => Ok(UnitGroup::Metric),
            "us" => Ok(UnitGroup::Us),
            "uk" => Ok(UnitGroup::Uk),
            "base" => Ok(UnitGroup::Base),
            _ => Err(WeatherError::InvalidUnitGroup(value.to_string())),
        }
    }
}

/// Where a session should take its coordinates from.
///
/// There is no fallback between variants: a failed `Gps` lookup is a failed
/// session, not a silent switch to `Ip`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateDirective {
    Gps,
    Ip,
    Explicit(Coordinate),
}

impl CoordinateDirective {
    pub fn name(&self) -> &'static str {
        match self {
            CoordinateDirective::Gps => "gps",
            CoordinateDirective::Ip => "ip",
            CoordinateDirective::Explicit(_) => "explicit",
        }
    }
}

impl fmt::Display for CoordinateDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateDirective::Explicit(c) => write!(f, "c:{c}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Parses `gps`, `ip` or `c:<lat>,<lon>`.
impl FromStr for CoordinateDirective {
    type Err = WeatherError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let lower = trimmed.to_lowercase();

        match lower.as_str() {
            "gps" => Ok(CoordinateDirective::Gps),
            "ip" => Ok(CoordinateDirective::Ip),
            _ => {
                let explicit = lower
                    .strip_prefix("c:")
                    .ok_or_else(|| WeatherError::InvalidCoordinateFormat(value.to_string()))?;

                explicit
                    .parse::<Coordinate>()
                    .map(CoordinateDirective::Explicit)
                    .map_err(|_| WeatherError::InvalidCoordinateFormat(value.to_string()))
            }
        }
    }
}
