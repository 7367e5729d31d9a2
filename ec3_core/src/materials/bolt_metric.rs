//! Bolt Metrics and Hole Geometry
//!
//! ISO metric coarse-thread bolt dimensions used by the resistance engines:
//! nominal diameter d, tensile stress area A_s (ISO 898-1), and hexagon width
//! across flats s (ISO 4014, used for punching shear). The gross shank area
//! A = π d² / 4 is derived, and the hole diameter d_0 follows from the hole
//! type clearance of EN 1090-2 Table 11.
//!
//! The dimension table itself lives in `data/bolt_metrics.toml` and is served
//! through [`crate::reference_data::ReferenceData`].

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::errors::{require_positive, CalcError, CalcResult};

/// Hole type for bolted connections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HoleType {
    /// Normal round clearance hole
    #[default]
    Normal,
    /// Oversized round hole (bearing × 0.8)
    Oversized,
    /// Slotted hole, slot axis perpendicular to the load (bearing × 0.6)
    Slotted,
}

impl HoleType {
    /// All hole types for UI selection
    pub const ALL: [HoleType; 3] = [HoleType::Normal, HoleType::Oversized, HoleType::Slotted];

    /// Nominal clearance d_0 - d (mm) per EN 1090-2 Table 11.
    ///
    /// For slotted holes this is the clearance across the slot width, which
    /// matches the normal round hole.
    pub fn clearance_mm(&self, d_mm: f64) -> f64 {
        match self {
            HoleType::Normal | HoleType::Slotted => {
                if d_mm <= 14.0 {
                    1.0
                } else if d_mm <= 24.0 {
                    2.0
                } else {
                    3.0
                }
            }
            HoleType::Oversized => {
                if d_mm <= 12.0 {
                    3.0
                } else if d_mm <= 22.0 {
                    4.0
                } else if d_mm <= 24.0 {
                    6.0
                } else {
                    8.0
                }
            }
        }
    }

    /// Multiplier applied to the normal-hole bearing resistance F_b,Rd
    /// (EN 1993-1-8 Table 3.4, note 2)
    pub fn bearing_factor(&self) -> f64 {
        match self {
            HoleType::Normal => 1.0,
            HoleType::Oversized => 0.8,
            HoleType::Slotted => 0.6,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "normal" | "round" | "normalround" => Ok(HoleType::Normal),
            "oversized" | "oversize" => Ok(HoleType::Oversized),
            "slotted" | "slot" => Ok(HoleType::Slotted),
            _ => Err(CalcError::invalid_input(
                "hole_type",
                s,
                "Expected one of: normal, oversized, slotted",
            )),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            HoleType::Normal => "Normal round",
            HoleType::Oversized => "Oversized",
            HoleType::Slotted => "Slotted (perpendicular)",
        }
    }
}

impl std::fmt::Display for HoleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Row of the bolt dimension table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltMetricData {
    /// Designation (e.g., "M20")
    pub designation: String,
    /// Nominal diameter d (mm)
    pub d_mm: f64,
    /// Thread pitch (mm)
    pub pitch_mm: f64,
    /// Tensile stress area A_s (mm²)
    pub a_s_mm2: f64,
    /// Hexagon width across flats s (mm)
    pub s_mm: f64,
}

impl BoltMetricData {
    /// Resolve the bolt geometry for a given hole type
    pub fn geometry(&self, hole: HoleType) -> CalcResult<BoltGeometry> {
        let d_0 = self.d_mm + hole.clearance_mm(self.d_mm);
        BoltGeometry::new(self.d_mm, d_0, self.a_s_mm2)
    }
}

/// Normalize a metric designation ("m20", "M 20", "20") to "M20"
pub fn normalize_metric(s: &str) -> String {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact.trim_start_matches(['M', 'm']);
    format!("M{}", digits)
}

/// Bolt geometry used by the resistance engines.
///
/// ## Invariants
///
/// - d_0 > d > 0
/// - 0 < A_s ≤ A, with A = π d² / 4
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoltGeometry {
    /// Nominal diameter d (mm)
    pub d_mm: f64,
    /// Hole diameter d_0 (mm)
    pub d_0_mm: f64,
    /// Gross shank area A (mm²)
    pub a_mm2: f64,
    /// Tensile stress area A_s (mm²)
    pub a_s_mm2: f64,
}

impl BoltGeometry {
    /// Build the geometry, deriving the gross area from d.
    pub fn new(d_mm: f64, d_0_mm: f64, a_s_mm2: f64) -> CalcResult<Self> {
        let geometry = BoltGeometry {
            d_mm,
            d_0_mm,
            a_mm2: gross_area(d_mm),
            a_s_mm2,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Build the geometry with an explicitly given gross area (e.g., a
    /// rounded catalogue value).
    pub fn with_gross_area(d_mm: f64, d_0_mm: f64, a_mm2: f64, a_s_mm2: f64) -> CalcResult<Self> {
        let geometry = BoltGeometry {
            d_mm,
            d_0_mm,
            a_mm2,
            a_s_mm2,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Check the geometric invariants
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("d_mm", self.d_mm)?;
        require_positive("d_0_mm", self.d_0_mm)?;
        require_positive("a_mm2", self.a_mm2)?;
        require_positive("a_s_mm2", self.a_s_mm2)?;
        if self.d_0_mm <= self.d_mm {
            return Err(CalcError::invalid_input(
                "d_0_mm",
                self.d_0_mm.to_string(),
                format!("Hole diameter must exceed bolt diameter d = {} mm", self.d_mm),
            ));
        }
        if self.a_s_mm2 > self.a_mm2 {
            return Err(CalcError::invalid_input(
                "a_s_mm2",
                self.a_s_mm2.to_string(),
                format!("Tensile stress area cannot exceed gross area A = {:.1} mm²", self.a_mm2),
            ));
        }
        Ok(())
    }
}

/// Gross shank area A = π d² / 4 (mm²)
pub fn gross_area(d_mm: f64) -> f64 {
    PI * d_mm * d_mm / 4.0
}
