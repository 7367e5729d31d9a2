//! # Geometric Validity Ranges (EN 1993-1-3 Table 8.4)
//!
//! Minimum end distance, edge distance and spacings for which the thin-gauge
//! bolt resistances of Table 8.4 hold:
//!
//! ```text
//! e_1 ≥ 1.0 d_0     e_2 ≥ 1.5 d_0     p_1 ≥ 3.0 d_0     p_2 ≥ 3.0 d_0
//! ```
//!
//! These are validity floors, not measured joint geometry. They also serve as
//! the conservative layout assumed when a check is run without explicit
//! distances.
//!
//! Table 8.4 further restricts the bolt size, sheet thickness and sheet
//! ultimate strength; [`applicability`] reports which of those conditions a
//! joint falls outside of.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{require_positive, CalcResult};

/// Smallest bolt size covered (M6)
pub const MIN_BOLT_DIAMETER_MM: f64 = 6.0;
/// Lower sheet thickness limit of the bearing formula
pub const MIN_SHEET_THICKNESS_MM: f64 = 0.75;
/// Thinnest DIN 1543 catalogue sheet admitted below the 0.75 mm limit
pub const MIN_CATALOGUE_SHEET_THICKNESS_MM: f64 = 0.5;
/// Sheets at or above this are designed to EN 1993-1-8
pub const MAX_SHEET_THICKNESS_MM: f64 = 3.0;
/// Upper limit on the sheet ultimate strength
pub const MAX_SHEET_F_U: f64 = 550.0;

/// Minimum distances for a hole diameter d_0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometricValidityRanges {
    /// Hole diameter d_0 (mm)
    pub d_0_mm: f64,
}

impl GeometricValidityRanges {
    /// Fails with InvalidInput unless d_0 > 0
    pub fn new(d_0_mm: f64) -> CalcResult<Self> {
        require_positive("d_0_mm", d_0_mm)?;
        Ok(GeometricValidityRanges { d_0_mm })
    }

    /// e_1,min = 1.0 d_0
    pub fn e_1_min(&self) -> f64 {
        self.d_0_mm
    }

    /// e_2,min = 1.5 d_0
    pub fn e_2_min(&self) -> f64 {
        1.5 * self.d_0_mm
    }

    /// p_1,min = 3.0 d_0
    pub fn p_1_min(&self) -> f64 {
        3.0 * self.d_0_mm
    }

    /// p_2,min = 3.0 d_0
    pub fn p_2_min(&self) -> f64 {
        3.0 * self.d_0_mm
    }
}

/// A Table 8.4 condition the joint does not satisfy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "condition")]
pub enum ApplicabilityViolation {
    /// Bolt smaller than M6
    BoltTooSmall { d_mm: f64 },
    /// Catalogue sheet, 0.5 ≤ t < 0.75 mm; noted, not blocking
    CatalogueSheet { t_mm: f64 },
    /// Sheet thinner than 0.5 mm
    SheetTooThin { t_mm: f64 },
    /// Sheet of 3 mm or more
    SheetTooThick { t_mm: f64 },
    /// Sheet f_u above 550 N/mm²
    UltimateStrengthTooHigh { f_u: f64 },
}

impl ApplicabilityViolation {
    /// Human-readable description
    pub fn description(&self) -> String {
        match self {
            ApplicabilityViolation::BoltTooSmall { d_mm } => {
                format!("Bolt d = {} mm is below M6", d_mm)
            }
            ApplicabilityViolation::CatalogueSheet { t_mm } => {
                format!("Sheet t = {} mm is below 0.75 mm, admitted as DIN 1543 catalogue sheet", t_mm)
            }
            ApplicabilityViolation::SheetTooThin { t_mm } => {
                format!("Sheet t = {} mm is below 0.5 mm", t_mm)
            }
            ApplicabilityViolation::SheetTooThick { t_mm } => {
                format!("Sheet t = {} mm is not below 3 mm (use EN 1993-1-8)", t_mm)
            }
            ApplicabilityViolation::UltimateStrengthTooHigh { f_u } => {
                format!("Sheet f_u = {} N/mm² exceeds 550 N/mm²", f_u)
            }
        }
    }
}

impl ApplicabilityViolation {
    /// Whether the condition puts the joint outside the thin-gauge rules
    pub fn is_blocking(&self) -> bool {
        !matches!(self, ApplicabilityViolation::CatalogueSheet { .. })
    }
}

impl std::fmt::Display for ApplicabilityViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Table 8.4 conditions violated by sheet thickness t, sheet f_u and bolt d.
///
/// An empty list, or one holding only non-blocking notes, means the
/// thin-gauge resistances apply. Blocking violations are logged at warn
/// level, notes at info.
pub fn applicability(t_mm: f64, f_u: f64, d_mm: f64) -> Vec<ApplicabilityViolation> {
    let mut violations = Vec::new();
    if d_mm < MIN_BOLT_DIAMETER_MM {
        violations.push(ApplicabilityViolation::BoltTooSmall { d_mm });
    }
    if t_mm < MIN_CATALOGUE_SHEET_THICKNESS_MM {
        violations.push(ApplicabilityViolation::SheetTooThin { t_mm });
    } else if t_mm < MIN_SHEET_THICKNESS_MM {
        violations.push(ApplicabilityViolation::CatalogueSheet { t_mm });
    }
    if t_mm >= MAX_SHEET_THICKNESS_MM {
        violations.push(ApplicabilityViolation::SheetTooThick { t_mm });
    }
    if f_u > MAX_SHEET_F_U {
        violations.push(ApplicabilityViolation::UltimateStrengthTooHigh { f_u });
    }
    for v in &violations {
        if v.is_blocking() {
            warn!(violation = %v, "Outside EN 1993-1-3 Table 8.4 range of validity");
        } else {
            info!(violation = %v, "EN 1993-1-3 Table 8.4 note");
        }
    }
    violations
}
