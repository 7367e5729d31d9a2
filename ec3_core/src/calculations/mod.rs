//! # Connection Design Checks
//!
//! Each check follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, gammas) -> CalcResult<*Result>` - Pure calculation function
//!
//! ## Available Checks
//!
//! - [`bolt_resistance`] - Bolts in general connections (EN 1993-1-8 Table 3.4)
//! - [`thin_gauge`] - Bolts in cold-formed sheet (EN 1993-1-3 Table 8.4)
//! - [`hole_layout`] - End/edge distance and spacing limits (EN 1993-1-8 Table 3.3)
//! - [`validity_ranges`] - Thin-gauge validity floors (EN 1993-1-3 Table 8.4)

pub mod bolt_resistance;
pub mod hole_layout;
pub mod thin_gauge;
pub mod validity_ranges;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::safety_factors::PartialSafetyFactors;

// Re-export commonly used types
pub use bolt_resistance::{
    BoltLayout, BoltResistance, BoltedConnectionInput, FailureMode, LongitudinalRole, ResistanceResult,
    TransverseRole,
};
pub use hole_layout::{Exposure, HoleLayoutLimits, SpacingViolation};
pub use thin_gauge::{NetSectionResistance, ThinGaugeBoltResistance, ThinGaugeInput, ThinGaugeResult};
pub use validity_ranges::{applicability, ApplicabilityViolation, GeometricValidityRanges};

// ============================================================================
// Eurocode Clause References
// ============================================================================

/// Clause references for the design checks.
pub mod ec3_ref {
    /// Nominal steel strengths
    pub const STEEL_STRENGTHS: &str = "EN 1993-1-1 Table 3.1";
    /// Nominal bolt strengths
    pub const BOLT_STRENGTHS: &str = "EN 1993-1-8 Table 3.1";
    /// Partial safety factors
    pub const PARTIAL_FACTORS: &str = "EN 1993-1-8 Table 2.1";
    /// Positioning of holes
    pub const HOLE_POSITIONS: &str = "EN 1993-1-8 Table 3.3";

    // General connections
    /// Shear resistance per shear plane
    pub const SHEAR: &str = "EN 1993-1-8 Table 3.4";
    /// Bearing resistance
    pub const BEARING: &str = "EN 1993-1-8 Table 3.4";
    /// Tension resistance
    pub const TENSION: &str = "EN 1993-1-8 Table 3.4";
    /// Punching shear resistance
    pub const PUNCHING: &str = "EN 1993-1-8 Table 3.4";
    /// Combined shear and tension
    pub const COMBINED: &str = "EN 1993-1-8 Table 3.4";

    // Thin gauge
    /// Bearing, shear and tension of bolts in sheet
    pub const THIN_GAUGE: &str = "EN 1993-1-3 Table 8.4";
    /// Net section resistance of sheet
    pub const THIN_NET_SECTION: &str = "EN 1993-1-3 Table 8.4";
}

/// Enum wrapper for all connection checks.
///
/// Lets a single JSON file carry a mix of checks:
///
/// ```json
/// [
///   { "type": "General", "bolt": { "kind": "metric", "metric": "M20" },
///     "grade": "8.8", "plate": { "kind": "grade", "grade": "S275", "t_mm": 15.0 } },
///   { "type": "ThinGauge", "bolt": { "kind": "metric", "metric": "M12" },
///     "grade": "8.8", "sheet": { "kind": "grade", "grade": "S350GD", "t_mm": 1.5 } }
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConnectionCheck {
    /// Bolted connection to EN 1993-1-8
    General(BoltedConnectionInput),
    /// Bolts in thin sheet to EN 1993-1-3
    ThinGauge(ThinGaugeInput),
}

impl ConnectionCheck {
    /// Get the user-provided label for this check
    pub fn label(&self) -> &str {
        match self {
            ConnectionCheck::General(c) => &c.label,
            ConnectionCheck::ThinGauge(c) => &c.label,
        }
    }

    /// Get the check type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            ConnectionCheck::General(_) => "General",
            ConnectionCheck::ThinGauge(_) => "ThinGauge",
        }
    }

    /// Run the check
    pub fn run(&self, gammas: &PartialSafetyFactors) -> CalcResult<CheckOutcome> {
        match self {
            ConnectionCheck::General(input) => Ok(CheckOutcome::General(bolt_resistance::calculate(input, gammas)?)),
            ConnectionCheck::ThinGauge(input) => Ok(CheckOutcome::ThinGauge(thin_gauge::calculate(input, gammas)?)),
        }
    }
}

/// Result of a [`ConnectionCheck`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CheckOutcome {
    General(ResistanceResult),
    ThinGauge(ThinGaugeResult),
}

impl CheckOutcome {
    pub fn label(&self) -> &str {
        match self {
            CheckOutcome::General(r) => &r.label,
            CheckOutcome::ThinGauge(r) => &r.label,
        }
    }

    pub fn passes(&self) -> bool {
        match self {
            CheckOutcome::General(r) => r.passes(),
            CheckOutcome::ThinGauge(r) => r.passes(),
        }
    }

    /// Governing shear-type mode and its resistance (N)
    pub fn governing_shear(&self) -> (FailureMode, f64) {
        match self {
            CheckOutcome::General(r) => (r.governing_shear_mode, r.governing_shear_resistance_n),
            CheckOutcome::ThinGauge(r) => (r.governing_shear_mode, r.governing_shear_resistance_n),
        }
    }
}
