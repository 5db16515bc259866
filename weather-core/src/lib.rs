//! Core library for the `daily-weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Coordinate resolution (explicit, device GPS, IP geolocation)
//! - The Visual Crossing client and its response schema
//! - Weather sessions and the background job queue
//!
//! It emits `tracing` events but never installs a subscriber; that is the
//! binary's job.

pub mod config;
pub mod context;
pub mod error;
pub mod job;
pub mod location;
pub mod model;
pub mod provider;
pub mod schema;
pub mod session;

pub use config::{Config, GeoIpConfig, JobConfig, LoggingConfig, WeatherServiceConfig};
pub use context::WeatherContext;
pub use error::{Result, WeatherError};
pub use job::{JobHandle, JobId, JobOutcome, JobQueue, WeatherJob};
pub use location::{CoordinateResolver, DeviceLocator, GeoIpClient, IpInfo};
pub use model::{Coordinate, CoordinateDirective, UnitGroup};
pub use provider::{WeatherProvider, visualcrossing::VisualCrossingProvider};
pub use schema::{Day, Station, WeatherResponse};
pub use session::WeatherSession;
