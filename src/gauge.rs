// Gauge geometry - pure layout math for the radial gauge
//
// The gauge is a half-donut spanning -pi/2 (left) to +pi/2 (right),
// filled clockwise in proportion to value/max and colored by threshold
// zone. All of this is plain arithmetic over a GaugeSpec; drawing is
// the TUI layer's job, which keeps the angle and clamping rules unit
// testable.

use std::f64::consts::PI;

/// Angle where the track begins (left end of the half-donut).
pub const START_ANGLE: f64 = -PI / 2.0;
/// Angle where the track ends (right end of the half-donut).
pub const FULL_ANGLE: f64 = PI / 2.0;

/// Threshold defaults match the widget editor's: warn above half,
/// danger above three quarters.
pub const DEFAULT_WARNING: f64 = 0.50;
pub const DEFAULT_DANGER: f64 = 0.75;
pub const DEFAULT_PRECISION: usize = 2;

/// Input to one render call. Owned by the widget configuration; the
/// renderer only reads it.
#[derive(Debug, Clone)]
pub struct GaugeSpec {
    pub value: f64,
    pub max: f64,
    /// Warning threshold as a fraction of max (0-1).
    pub warning: f64,
    /// Danger threshold as a fraction of max (0-1).
    pub danger: f64,
    /// Decimal digits in the label.
    pub precision: usize,
    /// Optional units suffix for the label.
    pub units: Option<String>,
    /// Track thickness override; defaults to width/15.
    pub thickness: Option<f64>,
}

impl GaugeSpec {
    pub fn new(value: f64, max: f64) -> Self {
        Self {
            value,
            max,
            warning: DEFAULT_WARNING,
            danger: DEFAULT_DANGER,
            precision: DEFAULT_PRECISION,
            units: None,
            thickness: None,
        }
    }
}

/// Threshold zone the needle sits in, compared against value/max.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeZone {
    Ok,
    Warning,
    Danger,
}

/// A render call with required fields missing or unusable. Fatal to
/// that call only; the poll loop keeps going.
#[derive(Debug, PartialEq)]
pub enum InvalidSpec {
    MissingValue,
    MissingMax,
    EmptyArea,
}

impl std::fmt::Display for InvalidSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidSpec::MissingValue => write!(f, "gauge needs a finite value"),
            InvalidSpec::MissingMax => write!(f, "gauge needs a positive max"),
            InvalidSpec::EmptyArea => write!(f, "gauge needs a non-empty drawing area"),
        }
    }
}

impl std::error::Error for InvalidSpec {}

/// Everything the drawing layer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeGeometry {
    pub start_angle: f64,
    /// End of the filled arc, clamped to the track.
    pub fill_angle: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    /// value / max, unclamped (over-range reads above 1.0).
    pub percentage: f64,
    pub zone: GaugeZone,
    pub label: String,
}

/// Compute the gauge layout for a drawing area of `width` x `height`.
pub fn layout(spec: &GaugeSpec, width: f64, height: f64) -> Result<GaugeGeometry, InvalidSpec> {
    if !spec.value.is_finite() {
        return Err(InvalidSpec::MissingValue);
    }
    if !spec.max.is_finite() || spec.max <= 0.0 {
        return Err(InvalidSpec::MissingMax);
    }
    if width <= 0.0 || height <= 0.0 {
        return Err(InvalidSpec::EmptyArea);
    }

    let percentage = spec.value / spec.max;

    // Over-range saturates at the end of the track, never past it.
    let fill_angle = if spec.value > spec.max {
        FULL_ANGLE
    } else {
        (percentage * PI - FULL_ANGLE).max(START_ANGLE)
    };

    // The half-donut must fit the box: radius is limited by both the
    // half-width and the full height.
    let outer_radius = (width / 2.0).min(height);
    let thickness = spec.thickness.unwrap_or(width / 15.0).min(outer_radius);
    let inner_radius = outer_radius - thickness;

    let zone = if percentage > spec.danger {
        GaugeZone::Danger
    } else if percentage > spec.warning {
        GaugeZone::Warning
    } else {
        GaugeZone::Ok
    };

    let label = match &spec.units {
        Some(units) if !units.is_empty() => {
            format!("{:.*} {}", spec.precision, spec.value, units)
        }
        _ => format!("{:.*}", spec.precision, spec.value),
    };

    Ok(GaugeGeometry {
        start_angle: START_ANGLE,
        fill_angle,
        outer_radius,
        inner_radius,
        percentage,
        zone,
        label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(value: f64, max: f64) -> GaugeSpec {
        GaugeSpec::new(value, max)
    }

    #[test]
    fn fill_angle_stays_on_the_track() {
        for value in [0.0, 0.1, 0.5, 0.9, 1.0] {
            let geom = layout(&spec(value, 1.0), 30.0, 15.0).unwrap();
            assert!(
                geom.fill_angle >= START_ANGLE && geom.fill_angle <= FULL_ANGLE,
                "value {} put fill angle at {}",
                value,
                geom.fill_angle
            );
        }
    }

    #[test]
    fn half_fill_lands_at_apex() {
        let geom = layout(&spec(0.5, 1.0), 30.0, 15.0).unwrap();
        assert!(geom.fill_angle.abs() < 1e-9);
    }

    #[test]
    fn full_fill_reaches_track_end() {
        let geom = layout(&spec(1.0, 1.0), 30.0, 15.0).unwrap();
        assert!((geom.fill_angle - FULL_ANGLE).abs() < 1e-9);
    }

    #[test]
    fn over_range_saturates_exactly() {
        let geom = layout(&spec(17.0, 1.0), 30.0, 15.0).unwrap();
        assert_eq!(geom.fill_angle, FULL_ANGLE);
        assert!(geom.percentage > 1.0);
    }

    #[test]
    fn zone_danger_above_danger_threshold() {
        let mut s = spec(0.8, 1.0);
        s.danger = 0.75;
        assert_eq!(layout(&s, 30.0, 15.0).unwrap().zone, GaugeZone::Danger);
    }

    #[test]
    fn zone_warning_between_thresholds() {
        let mut s = spec(0.6, 1.0);
        s.warning = 0.5;
        s.danger = 0.75;
        assert_eq!(layout(&s, 30.0, 15.0).unwrap().zone, GaugeZone::Warning);
    }

    #[test]
    fn zone_ok_below_warning() {
        assert_eq!(layout(&spec(0.2, 1.0), 30.0, 15.0).unwrap().zone, GaugeZone::Ok);
    }

    #[test]
    fn zone_compares_percentage_not_raw_value() {
        // 600 of 1000 is 60%: warning with default thresholds
        assert_eq!(
            layout(&spec(600.0, 1000.0), 30.0, 15.0).unwrap().zone,
            GaugeZone::Warning
        );
    }

    #[test]
    fn radius_fits_the_bounding_box() {
        // Wide box: height limits
        let geom = layout(&spec(0.5, 1.0), 100.0, 10.0).unwrap();
        assert_eq!(geom.outer_radius, 10.0);
        // Tall box: half-width limits
        let geom = layout(&spec(0.5, 1.0), 20.0, 50.0).unwrap();
        assert_eq!(geom.outer_radius, 10.0);
    }

    #[test]
    fn default_thickness_is_a_fifteenth_of_width() {
        let geom = layout(&spec(0.5, 1.0), 30.0, 15.0).unwrap();
        assert!((geom.outer_radius - geom.inner_radius - 2.0).abs() < 1e-9);
    }

    #[test]
    fn thickness_override_is_honored() {
        let mut s = spec(0.5, 1.0);
        s.thickness = Some(5.0);
        let geom = layout(&s, 30.0, 15.0).unwrap();
        assert!((geom.outer_radius - geom.inner_radius - 5.0).abs() < 1e-9);
    }

    #[test]
    fn label_formats_precision_and_units() {
        let mut s = spec(1.2345, 10.0);
        s.precision = 2;
        s.units = Some("req/s".to_string());
        assert_eq!(layout(&s, 30.0, 15.0).unwrap().label, "1.23 req/s");

        s.units = None;
        s.precision = 0;
        assert_eq!(layout(&s, 30.0, 15.0).unwrap().label, "1");
    }

    #[test]
    fn missing_value_fails_that_render_only() {
        assert_eq!(
            layout(&spec(f64::NAN, 1.0), 30.0, 15.0),
            Err(InvalidSpec::MissingValue)
        );
    }

    #[test]
    fn non_positive_max_is_invalid() {
        assert_eq!(
            layout(&spec(1.0, 0.0), 30.0, 15.0),
            Err(InvalidSpec::MissingMax)
        );
        assert_eq!(
            layout(&spec(1.0, -5.0), 30.0, 15.0),
            Err(InvalidSpec::MissingMax)
        );
    }

    #[test]
    fn empty_area_is_invalid() {
        assert_eq!(
            layout(&spec(1.0, 2.0), 0.0, 15.0),
            Err(InvalidSpec::EmptyArea)
        );
    }
}
