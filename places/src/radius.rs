pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// The user-adjustable distance threshold, in kilometers.
///
/// The value itself is not validated: the slider that feeds it keeps it in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRadius(f64);

impl Default for SearchRadius {
    fn default() -> Self {
        Self(DEFAULT_RADIUS_KM)
    }
}

impl SearchRadius {
    pub fn from_km(km: f64) -> Self {
        Self(km)
    }

    pub fn km(&self) -> f64 {
        self.0
    }

    pub fn meters(&self) -> f64 {
        self.0 * 1000.0
    }

    /// Text shown next to the slider. The value is truncated to whole kilometers.
    pub fn label(&self) -> String {
        format!("Search Radius: {} km", self.0 as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_radius() {
        let radius = SearchRadius::default();
        assert_eq!(radius.km(), 5.0);
        assert_eq!(radius.meters(), 5000.0);
    }

    #[test]
    fn test_label_truncates() {
        assert_eq!(SearchRadius::from_km(7.9).label(), "Search Radius: 7 km");
        assert_eq!(SearchRadius::from_km(0.4).label(), "Search Radius: 0 km");
    }
}
