use places::{Coordinate, Place, DEFAULT_RADIUS_KM};

use crate::{collaborators::Marker, errors::TrackerError};

pub const SLIDER_MIN_KM: f64 = 0.0;
pub const SLIDER_MAX_KM: f64 = 20.0;
pub const PIN_ICON: &str = "place-pin";

/// When the visible places are filtered again after a position fix.
///
/// Radius changes always trigger a new filtering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecomputePolicy {
    /// Only the first fix filters; later fixes move the camera but leave the
    /// markers as they are.
    #[default]
    FirstFixOnly,
    /// Every fix filters again, so markers follow the walking observer.
    EveryFix,
}

/// How place markers are drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub text_offset: [f32; 2],
    pub text_color: String,
    pub text_size: f32,
    pub icon: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            text_offset: [0.0, -2.0],
            text_color: String::from("#000000"),
            text_size: 12.0,
            icon: String::from(PIN_ICON),
        }
    }
}

impl MarkerStyle {
    pub fn marker_for(&self, place: &Place) -> Marker {
        Marker {
            coordinate: place.coordinate,
            label: place.name.clone(),
            text_offset: self.text_offset,
            text_color: self.text_color.clone(),
            text_size: self.text_size,
            icon: self.icon.clone(),
        }
    }
}

/// Tunables of the nearby places screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSettings {
    pub default_radius_km: f64,
    pub slider_min_km: f64,
    pub slider_max_km: f64,
    pub policy: RecomputePolicy,
    pub marker_style: MarkerStyle,
    /// Where the camera looks before the first fix.
    pub initial_camera: Coordinate,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            default_radius_km: DEFAULT_RADIUS_KM,
            slider_min_km: SLIDER_MIN_KM,
            slider_max_km: SLIDER_MAX_KM,
            policy: RecomputePolicy::default(),
            marker_style: MarkerStyle::default(),
            initial_camera: Coordinate::from_lat_lon(-26.2041, 28.0473),
        }
    }
}

impl ScreenSettings {
    pub fn validate(&self) -> Result<(), TrackerError> {
        if !(self.slider_min_km >= 0.0 && self.slider_max_km > self.slider_min_km) {
            return Err(TrackerError::InvalidSliderRange {
                min: self.slider_min_km,
                max: self.slider_max_km,
            });
        }

        let radius = self.default_radius_km;
        if !(radius > 0.0 && radius >= self.slider_min_km && radius <= self.slider_max_km) {
            return Err(TrackerError::InvalidDefaultRadius(radius));
        }

        Ok(())
    }
}
