//! Coordinate resolution: explicit input, device GPS, or IP geolocation.

use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
    error::{Result, WeatherError},
    model::{Coordinate, CoordinateDirective},
};

#[cfg(windows)]
pub mod device;
pub mod geoip;

#[cfg(windows)]
pub use device::WindowsGeolocator;
pub use geoip::{GeoIpClient, IpInfo};

/// Host capability that reports the device's current position.
///
/// Implementations map a refused request to `PermissionDenied`, a missing fix
/// to `LocationUnavailable` and anything else to `LocationProviderError`.
#[async_trait]
pub trait DeviceLocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinate>;
}

/// The device locator for the platform this binary was built for, if any.
pub fn platform_locator() -> Option<Arc<dyn DeviceLocator>> {
    #[cfg(windows)]
    {
        Some(Arc::new(WindowsGeolocator))
    }
    #[cfg(not(windows))]
    {
        None
    }
}

#[derive(Debug, Clone)]
pub struct CoordinateResolver {
    geoip: GeoIpClient,
    device: Option<Arc<dyn DeviceLocator>>,
}

impl CoordinateResolver {
    /// Resolver offering only the explicit and IP strategies.
    pub fn new(geoip: GeoIpClient) -> Self {
        Self { geoip, device: None }
    }

    pub fn with_device(mut self, device: Arc<dyn DeviceLocator>) -> Self {
        self.device = Some(device);
        self
    }

    pub fn supports_device(&self) -> bool {
        self.device.is_some()
    }

    /// Directive names this resolver accepts.
    pub fn available_strategies(&self) -> &'static [&'static str] {
        if self.supports_device() {
            &["gps", "ip", "explicit"]
        } else {
            &["ip", "explicit"]
        }
    }

    /// Reject directives this resolver was not configured for, before any I/O.
    pub fn ensure_supported(&self, directive: &CoordinateDirective) -> Result<()> {
        match directive {
            CoordinateDirective::Gps if !self.supports_device() => {
                Err(WeatherError::DeviceLocationUnsupported)
            }
            _ => Ok(()),
        }
    }

    pub fn resolve_explicit(&self, latitude: f64, longitude: f64) -> Result<Coordinate> {
        Coordinate::new(latitude, longitude)
    }

    pub async fn resolve_by_device(&self) -> Result<Coordinate> {
        let device = self.device.as_ref().ok_or(WeatherError::DeviceLocationUnsupported)?;

        debug!("Querying device location");
        let coordinate = device.current_position().await?;
        info!(%coordinate, "Resolved coordinates by device");

        Ok(coordinate)
    }

    pub async fn resolve_by_ip(&self) -> Result<Coordinate> {
        debug!("Querying IP geolocation");
        self.geoip.locate().await
    }

    pub async fn resolve(&self, directive: &CoordinateDirective) -> Result<Coordinate> {
        self.ensure_supported(directive)?;

        match directive {
            CoordinateDirective::Gps => self.resolve_by_device().await,
            CoordinateDirective::Ip => self.resolve_by_ip().await,
            CoordinateDirective::Explicit(c) => self.resolve_explicit(c.latitude(), c.longitude()),
        }
    }
}
