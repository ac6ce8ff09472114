use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Churchgate station, the default origin of the demo
pub const START: Location = Location {
    lat: 18.9322,
    lng: 72.8264,
};

/// Gateway of India, the default destination of the demo
pub const END: Location = Location {
    lat: 18.9220,
    lng: 72.8347,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("coordinates must be finite (lat: {lat}, lng: {lng})")]
    NonFinite { lat: f64, lng: f64 },

    #[error("latitude {0} is outside -90..=90")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside -180..=180")]
    LongitudeOutOfRange(f64),
}

/// A point on the map in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    /// Create a location, rejecting NaN, infinities and out-of-range degrees
    pub fn new(lat: f64, lng: f64) -> Result<Self, LocationError> {
        let location = Self { lat, lng };
        location.validate()?;
        Ok(location)
    }

    /// Check a location built without going through `new`
    pub fn validate(&self) -> Result<(), LocationError> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(LocationError::NonFinite {
                lat: self.lat,
                lng: self.lng,
            });
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(LocationError::LatitudeOutOfRange(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(LocationError::LongitudeOutOfRange(self.lng));
        }
        Ok(())
    }

    /// Linear interpolation towards `other`; `t = 0.0` is `self`, `t = 1.0` is `other`
    pub fn lerp(&self, other: &Location, t: f64) -> Location {
        Location {
            lat: self.lat + (other.lat - self.lat) * t,
            lng: self.lng + (other.lng - self.lng) * t,
        }
    }

    /// Shift by a delta in degrees, clamping to the valid coordinate range
    pub fn offset(&self, d_lat: f64, d_lng: f64) -> Location {
        Location {
            lat: (self.lat + d_lat).clamp(-90.0, 90.0),
            lng: (self.lng + d_lng).clamp(-180.0, 180.0),
        }
    }

    /// Haversine great-circle distance in kilometres
    pub fn distance_km(&self, other: &Location) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lng / 2.0).sin().powi(2);

        2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

/// Total length of a polyline in kilometres
pub fn path_length_km(points: &[Location]) -> f64 {
    points.windows(2).map(|w| w[0].distance_km(&w[1])).sum()
}
