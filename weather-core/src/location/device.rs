//! Windows.Devices.Geolocation backed locator.

use async_trait::async_trait;
use tracing::{debug, warn};
use windows::{
    Devices::Geolocation::{GeolocationAccessStatus, Geolocator},
    core::HRESULT,
};

use super::DeviceLocator;
use crate::{
    error::{Result, WeatherError},
    model::Coordinate,
};

const E_ACCESSDENIED: HRESULT = HRESULT(0x8007_0005_u32 as i32);

#[derive(Debug, Default)]
pub struct WindowsGeolocator;

#[async_trait]
impl DeviceLocator for WindowsGeolocator {
    async fn current_position(&self) -> Result<Coordinate> {
        // WinRT `get()` blocks the calling thread until the operation completes.
        tokio::task::spawn_blocking(query_position)
            .await
            .map_err(|err| WeatherError::LocationProviderError(err.to_string()))?
    }
}

fn query_position() -> Result<Coordinate> {
    let access = Geolocator::RequestAccessAsync()
        .and_then(|op| op.get())
        .map_err(map_winrt_error)?;

    if access == GeolocationAccessStatus::Denied {
        warn!("Location access denied by the user or system policy");
        return Err(WeatherError::PermissionDenied);
    }
    if access != GeolocationAccessStatus::Allowed {
        return Err(WeatherError::LocationUnavailable);
    }

    let locator = Geolocator::new().map_err(map_winrt_error)?;
    let position = locator
        .GetGeopositionAsync()
        .and_then(|op| op.get())
        .map_err(map_winrt_error)?;

    let point = position
        .Coordinate()
        .and_then(|c| c.Point())
        .and_then(|p| p.Position())
        .map_err(|_| WeatherError::LocationUnavailable)?;

    debug!(latitude = point.Latitude, longitude = point.Longitude, "Device position fix");

    Coordinate::new(point.Latitude, point.Longitude).map_err(|_| WeatherError::LocationUnavailable)
}

fn map_winrt_error(err: windows::core::Error) -> WeatherError {
    if err.code() == E_ACCESSDENIED {
        WeatherError::PermissionDenied
    } else {
        WeatherError::LocationProviderError(err.message().to_string())
    }
}
