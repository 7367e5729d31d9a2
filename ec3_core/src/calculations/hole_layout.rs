//! # Positioning of Holes (EN 1993-1-8 §3.5, Table 3.3)
//!
//! Minimum and maximum end distances, edge distances and spacings for bolts.
//! Minima depend on the hole diameter d_0; maxima depend on the thickness t
//! of the thinner outer connected part and on the exposure class:
//!
//! | Distance | Minimum  | Exposed (EN 10025) | Not exposed  | EN 10025-5        |
//! |----------|----------|--------------------|--------------|-------------------|
//! | e_1, e_2 | 1.2 d_0  | 4t + 40            | —            | max(8t, 125)      |
//! | e_3, e_4 | 1.5 d_0  | —                  | —            | —                 |
//! | p_1      | 2.2 d_0  | min(14t, 200)      | min(14t, 200)| min(14t, 175)     |
//! | p_1,0    | —        | min(14t, 200)      | —            | —                 |
//! | p_1,i    | —        | min(28t, 200)      | —            | —                 |
//! | p_2      | 2.4 d_0  | min(14t, 200)      | min(14t, 200)| min(14t, 175)     |
//!
//! A dash means the table sets no limit; those come back as `None`.

use serde::{Deserialize, Serialize};

use crate::calculations::bolt_resistance::BoltLayout;
use crate::calculations::ec3_ref;
use crate::errors::{require_positive, CalcError, CalcResult};

/// Exposure / steel class selecting the maximum-distance column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Exposure {
    /// EN 10025 steel exposed to weather or corrosive influences
    #[default]
    Exposed,
    /// EN 10025 steel not exposed
    NotExposed,
    /// Weathering steel to EN 10025-5, used unprotected
    WeatheringSteel,
}

impl Exposure {
    pub const ALL: [Exposure; 3] = [Exposure::Exposed, Exposure::NotExposed, Exposure::WeatheringSteel];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "exposed" | "exterior" => Ok(Exposure::Exposed),
            "notexposed" | "interior" => Ok(Exposure::NotExposed),
            "weathering" | "weatheringsteel" | "en100255" => Ok(Exposure::WeatheringSteel),
            _ => Err(CalcError::invalid_input(
                "exposure",
                s,
                "Expected one of: exposed, not-exposed, weathering",
            )),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Exposure::Exposed => "EN 10025, exposed",
            Exposure::NotExposed => "EN 10025, not exposed",
            Exposure::WeatheringSteel => "EN 10025-5, unprotected",
        }
    }
}

impl std::fmt::Display for Exposure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which Table 3.3 distance a limit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Distance {
    /// End distance in the load direction
    E1,
    /// Edge distance perpendicular to the load
    E2,
    /// Slotted hole axis to adjacent end or edge
    E3,
    /// Slotted hole end radius centre to adjacent end or edge
    E4,
    /// Spacing in the load direction
    P1,
    /// Spacing in an outer row, compression members
    P10,
    /// Spacing in an inner row, tension members
    P1i,
    /// Spacing perpendicular to the load
    P2,
}

impl Distance {
    pub const ALL: [Distance; 8] = [
        Distance::E1,
        Distance::E2,
        Distance::E3,
        Distance::E4,
        Distance::P1,
        Distance::P10,
        Distance::P1i,
        Distance::P2,
    ];

    /// Symbol as printed in Table 3.3
    pub fn symbol(&self) -> &'static str {
        match self {
            Distance::E1 => "e_1",
            Distance::E2 => "e_2",
            Distance::E3 => "e_3",
            Distance::E4 => "e_4",
            Distance::P1 => "p_1",
            Distance::P10 => "p_1,0",
            Distance::P1i => "p_1,i",
            Distance::P2 => "p_2",
        }
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Min / max bounds for one distance (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceLimits {
    pub distance: Distance,
    pub min_mm: Option<f64>,
    pub max_mm: Option<f64>,
}

/// Table 3.3 limits for a hole diameter and plate thickness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoleLayoutLimits {
    /// Hole diameter d_0 (mm)
    pub d_0_mm: f64,
    /// Thickness of the thinnest outer connected part t (mm)
    pub t_mm: f64,
}

impl HoleLayoutLimits {
    /// Fails with InvalidInput unless d_0 > 0 and t > 0
    pub fn new(d_0_mm: f64, t_mm: f64) -> CalcResult<Self> {
        require_positive("d_0_mm", d_0_mm)?;
        require_positive("t_mm", t_mm)?;
        Ok(HoleLayoutLimits { d_0_mm, t_mm })
    }

    /// Minimum value of a distance
    pub fn minimum(&self, distance: Distance) -> Option<f64> {
        match distance {
            Distance::E1 | Distance::E2 => Some(1.2 * self.d_0_mm),
            Distance::E3 | Distance::E4 => Some(1.5 * self.d_0_mm),
            Distance::P1 => Some(2.2 * self.d_0_mm),
            Distance::P2 => Some(2.4 * self.d_0_mm),
            Distance::P10 | Distance::P1i => None,
        }
    }

    /// Maximum value of a distance for an exposure class
    pub fn maximum(&self, distance: Distance, exposure: Exposure) -> Option<f64> {
        let t = self.t_mm;
        match (distance, exposure) {
            (Distance::E1 | Distance::E2, Exposure::Exposed) => Some(4.0 * t + 40.0),
            (Distance::E1 | Distance::E2, Exposure::WeatheringSteel) => Some((8.0 * t).max(125.0)),
            (Distance::P1 | Distance::P2, Exposure::Exposed | Exposure::NotExposed) => {
                Some((14.0 * t).min(200.0))
            }
            (Distance::P1 | Distance::P2, Exposure::WeatheringSteel) => Some((14.0 * t).min(175.0)),
            (Distance::P10, Exposure::Exposed) => Some((14.0 * t).min(200.0)),
            (Distance::P1i, Exposure::Exposed) => Some((28.0 * t).min(200.0)),
            _ => None,
        }
    }

    /// Both bounds for a distance
    pub fn limits(&self, distance: Distance, exposure: Exposure) -> DistanceLimits {
        DistanceLimits {
            distance,
            min_mm: self.minimum(distance),
            max_mm: self.maximum(distance, exposure),
        }
    }

    /// Full table for one exposure class, in Table 3.3 row order
    pub fn table(&self, exposure: Exposure) -> Vec<DistanceLimits> {
        Distance::ALL.iter().map(|d| self.limits(*d, exposure)).collect()
    }

    /// Check a layout's e_1, e_2, p_1, p_2 against the limits.
    ///
    /// Returns every bound exceeded; an empty list means the layout complies.
    pub fn check(&self, layout: &BoltLayout, exposure: Exposure) -> Vec<SpacingViolation> {
        let measured = [
            (Distance::E1, layout.e_1_mm),
            (Distance::E2, layout.e_2_mm),
            (Distance::P1, layout.p_1_mm),
            (Distance::P2, layout.p_2_mm),
        ];
        let mut violations = Vec::new();
        for (distance, value) in measured {
            let limits = self.limits(distance, exposure);
            if let Some(min) = limits.min_mm {
                if value < min {
                    violations.push(SpacingViolation {
                        distance,
                        value_mm: value,
                        limit_mm: min,
                        bound: Bound::Minimum,
                    });
                }
            }
            if let Some(max) = limits.max_mm {
                if value > max {
                    violations.push(SpacingViolation {
                        distance,
                        value_mm: value,
                        limit_mm: max,
                        bound: Bound::Maximum,
                    });
                }
            }
        }
        violations
    }
}

/// Which side of the limit was crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bound {
    Minimum,
    Maximum,
}

/// A distance outside its Table 3.3 bound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpacingViolation {
    pub distance: Distance,
    pub value_mm: f64,
    pub limit_mm: f64,
    pub bound: Bound,
}

impl std::fmt::Display for SpacingViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = match self.bound {
            Bound::Minimum => "below minimum",
            Bound::Maximum => "above maximum",
        };
        write!(
            f,
            "{} = {:.1} mm {} {:.1} mm ({})",
            self.distance,
            self.value_mm,
            side,
            self.limit_mm,
            ec3_ref::HOLE_POSITIONS
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::bolt_resistance::{LongitudinalRole, TransverseRole};

    fn limits() -> HoleLayoutLimits {
        HoleLayoutLimits::new(22.0, 10.0).unwrap()
    }

    #[test]
    fn test_minimum_distances() {
        let l = limits();
        assert!((l.minimum(Distance::E1).unwrap() - 26.4).abs() < 1e-9);
        assert!((l.minimum(Distance::E3).unwrap() - 33.0).abs() < 1e-9);
        assert!((l.minimum(Distance::P1).unwrap() - 48.4).abs() < 1e-9);
        assert!((l.minimum(Distance::P2).unwrap() - 52.8).abs() < 1e-9);
        assert!(l.minimum(Distance::P1i).is_none());
    }

    #[test]
    fn test_maximum_distances() {
        let l = limits();
        assert_eq!(l.maximum(Distance::E1, Exposure::Exposed), Some(80.0));
        assert_eq!(l.maximum(Distance::E1, Exposure::NotExposed), None);
        assert_eq!(l.maximum(Distance::E2, Exposure::WeatheringSteel), Some(125.0));
        assert_eq!(l.maximum(Distance::P1, Exposure::NotExposed), Some(140.0));
        assert_eq!(l.maximum(Distance::P1i, Exposure::Exposed), Some(200.0));
        assert_eq!(l.maximum(Distance::P10, Exposure::WeatheringSteel), None);
        assert_eq!(l.maximum(Distance::E3, Exposure::Exposed), None);

        let thick = HoleLayoutLimits::new(22.0, 20.0).unwrap();
        assert_eq!(thick.maximum(Distance::P2, Exposure::Exposed), Some(200.0));
        assert_eq!(thick.maximum(Distance::P2, Exposure::WeatheringSteel), Some(175.0));
        assert_eq!(thick.maximum(Distance::E1, Exposure::WeatheringSteel), Some(160.0));
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(HoleLayoutLimits::new(0.0, 10.0).is_err());
        assert!(HoleLayoutLimits::new(22.0, -1.0).is_err());
    }

    #[test]
    fn test_table_rows() {
        let rows = limits().table(Exposure::Exposed);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].distance, Distance::E1);
    }

    #[test]
    fn test_check_layout() {
        let l = limits();
        let ok = BoltLayout::new(40.0, 35.0, 70.0, 70.0, 22.0, TransverseRole::Edge, LongitudinalRole::End).unwrap();
        assert!(l.check(&ok, Exposure::Exposed).is_empty());

        let bad = BoltLayout::new(20.0, 35.0, 150.0, 70.0, 22.0, TransverseRole::Edge, LongitudinalRole::End).unwrap();
        let violations = l.check(&bad, Exposure::Exposed);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].distance, Distance::E1);
        assert_eq!(violations[0].bound, Bound::Minimum);
        assert_eq!(violations[1].distance, Distance::P1);
        assert_eq!(violations[1].bound, Bound::Maximum);
    }

    #[test]
    fn test_exposure_parsing() {
        assert_eq!(Exposure::from_str_flexible("not-exposed").unwrap(), Exposure::NotExposed);
        assert_eq!(Exposure::from_str_flexible("EN 10025-5").unwrap(), Exposure::WeatheringSteel);
        assert!(Exposure::from_str_flexible("submerged").is_err());
    }
}
