//! # Bolt Design Resistance (EN 1993-1-8 §3.6, Table 3.4)
//!
//! Design resistances of an individual bolt in a plate of thickness t:
//!
//! ```text
//! Shear        F_v,Rd = α_v f_ub A / γ_M2          (A = A_s through the thread)
//! Bearing      F_b,Rd = k_1 α_b f_u d t / γ_M2
//! Tension      F_t,Rd = k_2 f_ub A_s / γ_M2
//! Punching     B_p,Rd = 0.6 π d_m t_p f_u / γ_M2
//! Interaction  F_v,Ed / F_v,Rd + F_t,Ed / (1.4 F_t,Rd) ≤ 1.0
//! ```
//!
//! with
//!
//! ```text
//! k_1 (edge)   = min(2.8 e_2/d_0 − 1.7, 1.4 p_2/d_0 − 1.7, 2.5)
//! k_1 (inner)  = min(1.4 p_2/d_0 − 1.7, 2.5)
//! α_d (end)    = e_1 / (3 d_0)
//! α_d (inner)  = p_1 / (3 d_0) − 1/4
//! α_b          = min(α_d, f_ub/f_u, 1.0)
//! ```
//!
//! Every coefficient is the minimum of its candidates; the result records
//! which candidate governed. Oversized and slotted holes take straight
//! 0.8 / 0.6 reductions of the normal-hole bearing resistance.
//!
//! ## Example
//!
//! ```rust
//! use ec3_core::calculations::bolt_resistance::BoltResistance;
//! use ec3_core::materials::{BoltGeometry, BoltGrade};
//!
//! let m20 = BoltGeometry::new(20.0, 22.0, 245.0).unwrap();
//! let engine = BoltResistance::new(m20, BoltGrade::Grade88, 15.0, 430.0, 1.25).unwrap();
//!
//! // 0.6 × 800 × 245 / 1.25
//! assert!((engine.shear_resistance(true) - 94_080.0).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

use crate::calculations::ec3_ref;
use crate::calculations::hole_layout::{Exposure, HoleLayoutLimits, SpacingViolation};
use crate::calculations::validity_ranges::GeometricValidityRanges;
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::{BoltGeometry, BoltGrade, HoleType};
use crate::reference_data::ReferenceData;
use crate::safety_factors::PartialSafetyFactors;
use crate::units::{Kilonewtons, Newtons};

/// d_m = (s + s / cos 30°) / 2
pub const MEAN_ACROSS_FLATS_FACTOR: f64 = 1.07735;

// ============================================================================
// Bolt Positions
// ============================================================================

/// Position of the bolt perpendicular to the load (selects the k_1 formula)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransverseRole {
    /// Bolt in an outer line, next to a free edge
    #[default]
    Edge,
    /// Bolt in an inner line
    Inner,
}

impl TransverseRole {
    pub const ALL: [TransverseRole; 2] = [TransverseRole::Edge, TransverseRole::Inner];

    /// Parse "edge" / "inner"; anything else fails with InvalidPosition
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "edge" => Ok(TransverseRole::Edge),
            "inner" => Ok(TransverseRole::Inner),
            _ => Err(CalcError::invalid_position(s, "edge, inner")),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TransverseRole::Edge => "edge",
            TransverseRole::Inner => "inner",
        }
    }
}

impl std::fmt::Display for TransverseRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Position of the bolt in the load direction (selects the α_d formula)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LongitudinalRole {
    /// Bolt in the row nearest the loaded end
    #[default]
    End,
    /// Bolt in an inner row
    Inner,
}

impl LongitudinalRole {
    pub const ALL: [LongitudinalRole; 2] = [LongitudinalRole::End, LongitudinalRole::Inner];

    /// Parse "end" / "inner"; anything else fails with InvalidPosition
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "end" => Ok(LongitudinalRole::End),
            "inner" => Ok(LongitudinalRole::Inner),
            _ => Err(CalcError::invalid_position(s, "end, inner")),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LongitudinalRole::End => "end",
            LongitudinalRole::Inner => "inner",
        }
    }
}

impl std::fmt::Display for LongitudinalRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// End/edge distances and spacings of the bolt being checked (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoltLayout {
    pub e_1_mm: f64,
    pub e_2_mm: f64,
    pub p_1_mm: f64,
    pub p_2_mm: f64,
    pub d_0_mm: f64,
    pub transverse: TransverseRole,
    pub longitudinal: LongitudinalRole,
}

impl BoltLayout {
    pub fn new(
        e_1_mm: f64,
        e_2_mm: f64,
        p_1_mm: f64,
        p_2_mm: f64,
        d_0_mm: f64,
        transverse: TransverseRole,
        longitudinal: LongitudinalRole,
    ) -> CalcResult<Self> {
        let layout = BoltLayout {
            e_1_mm,
            e_2_mm,
            p_1_mm,
            p_2_mm,
            d_0_mm,
            transverse,
            longitudinal,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Layout at the EN 1993-1-3 Table 8.4 validity floors
    pub fn from_validity_ranges(
        ranges: &GeometricValidityRanges,
        transverse: TransverseRole,
        longitudinal: LongitudinalRole,
    ) -> Self {
        BoltLayout {
            e_1_mm: ranges.e_1_min(),
            e_2_mm: ranges.e_2_min(),
            p_1_mm: ranges.p_1_min(),
            p_2_mm: ranges.p_2_min(),
            d_0_mm: ranges.d_0_mm,
            transverse,
            longitudinal,
        }
    }

    /// Layout at the EN 1993-1-8 Table 3.3 minimum distances
    pub fn from_spacing_minimum(
        limits: &HoleLayoutLimits,
        transverse: TransverseRole,
        longitudinal: LongitudinalRole,
    ) -> Self {
        let d_0 = limits.d_0_mm;
        BoltLayout {
            e_1_mm: 1.2 * d_0,
            e_2_mm: 1.2 * d_0,
            p_1_mm: 2.2 * d_0,
            p_2_mm: 2.4 * d_0,
            d_0_mm: d_0,
            transverse,
            longitudinal,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("d_0_mm", self.d_0_mm)?;
        require_positive("e_1_mm", self.e_1_mm)?;
        require_positive("e_2_mm", self.e_2_mm)?;
        require_positive("p_1_mm", self.p_1_mm)?;
        require_positive("p_2_mm", self.p_2_mm)?;
        Ok(())
    }
}

// ============================================================================
// Governing Candidates
// ============================================================================

/// Which k_1 candidate governed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum K1Governs {
    /// 2.8 e_2/d_0 − 1.7
    EdgeDistance,
    /// 1.4 p_2/d_0 − 1.7
    TransverseSpacing,
    /// 2.5
    Cap,
}

/// Which α_b candidate governed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlphaBGoverns {
    /// α_d
    LoadDirection,
    /// f_ub / f_u
    StrengthRatio,
    /// 1.0
    Unity,
}

/// A coefficient with the candidate that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Governed<G> {
    pub value: f64,
    pub governs: G,
}

/// Minimum of the candidates; ties go to the first listed.
fn governing_min<G: Copy>(candidates: &[(f64, G)]) -> Governed<G> {
    let (mut value, mut governs) = candidates[0];
    for &(v, g) in &candidates[1..] {
        if v < value {
            value = v;
            governs = g;
        }
    }
    Governed { value, governs }
}

/// Failure modes of a bolted joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureMode {
    Shear,
    Bearing,
    Tension,
    Punching,
    CombinedShearTension,
    NetSection,
}

impl FailureMode {
    /// Clause reference
    pub fn clause(&self) -> &'static str {
        match self {
            FailureMode::Shear => ec3_ref::SHEAR,
            FailureMode::Bearing => ec3_ref::BEARING,
            FailureMode::Tension => ec3_ref::TENSION,
            FailureMode::Punching => ec3_ref::PUNCHING,
            FailureMode::CombinedShearTension => ec3_ref::COMBINED,
            FailureMode::NetSection => ec3_ref::THIN_NET_SECTION,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FailureMode::Shear => "Shear",
            FailureMode::Bearing => "Bearing",
            FailureMode::Tension => "Tension",
            FailureMode::Punching => "Punching shear",
            FailureMode::CombinedShearTension => "Combined shear and tension",
            FailureMode::NetSection => "Net section",
        }
    }
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Resistance Engine
// ============================================================================

/// Table 3.4 resistances for one bolt grade, bolt geometry and plate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoltResistance {
    pub bolt: BoltGeometry,
    pub grade: BoltGrade,
    /// Plate thickness t (mm)
    pub t_mm: f64,
    /// Plate ultimate strength f_u (N/mm²)
    pub f_u: f64,
    pub gamma_m2: f64,
}

impl BoltResistance {
    /// Fails with InvalidInput when γ_M2 ≤ 0, f_u ≤ 0, t ≤ 0 or the bolt
    /// geometry is inconsistent.
    pub fn new(bolt: BoltGeometry, grade: BoltGrade, t_mm: f64, f_u: f64, gamma_m2: f64) -> CalcResult<Self> {
        bolt.validate()?;
        require_positive("t_mm", t_mm)?;
        require_positive("f_u", f_u)?;
        require_positive("gamma_M2", gamma_m2)?;
        Ok(BoltResistance {
            bolt,
            grade,
            t_mm,
            f_u,
            gamma_m2,
        })
    }

    pub fn f_ub(&self) -> f64 {
        self.grade.f_ub()
    }

    pub fn f_yb(&self) -> f64 {
        self.grade.f_yb()
    }

    // ------------------------------------------------------------------------
    // Shear
    // ------------------------------------------------------------------------

    /// α_v
    pub fn shear_coefficient(&self, plane_through_thread: bool) -> f64 {
        shear_coefficient_of(self.grade, plane_through_thread)
    }

    /// α_v for a grade designation; fails with InvalidGrade on unknown grades
    pub fn shear_coefficient_for_grade(grade: &str, plane_through_thread: bool) -> CalcResult<f64> {
        let grade = BoltGrade::from_str_flexible(grade)?;
        Ok(shear_coefficient_of(grade, plane_through_thread))
    }

    /// Shear area: A_s through the thread, A otherwise
    pub fn shear_area(&self, plane_through_thread: bool) -> f64 {
        if plane_through_thread {
            self.bolt.a_s_mm2
        } else {
            self.bolt.a_mm2
        }
    }

    /// F_v,Rd per shear plane (N)
    pub fn shear_resistance(&self, plane_through_thread: bool) -> f64 {
        let alpha_v = self.shear_coefficient(plane_through_thread);
        let f_v_rd = alpha_v * self.f_ub() * self.shear_area(plane_through_thread) / self.gamma_m2;
        debug!(alpha_v, f_v_rd, plane_through_thread, "Shear resistance");
        f_v_rd
    }

    // ------------------------------------------------------------------------
    // Bearing
    // ------------------------------------------------------------------------

    /// k_1 with its governing candidate
    pub fn coefficient_k1_governed(
        &self,
        e_2_mm: f64,
        p_2_mm: f64,
        d_0_mm: f64,
        role: TransverseRole,
    ) -> CalcResult<Governed<K1Governs>> {
        require_positive("d_0_mm", d_0_mm)?;
        let spacing = 1.4 * p_2_mm / d_0_mm - 1.7;
        let k_1 = match role {
            TransverseRole::Edge => {
                let edge = 2.8 * e_2_mm / d_0_mm - 1.7;
                governing_min(&[
                    (edge, K1Governs::EdgeDistance),
                    (spacing, K1Governs::TransverseSpacing),
                    (2.5, K1Governs::Cap),
                ])
            }
            TransverseRole::Inner => {
                governing_min(&[(spacing, K1Governs::TransverseSpacing), (2.5, K1Governs::Cap)])
            }
        };
        debug!(k_1 = k_1.value, governs = ?k_1.governs, role = %role, "Coefficient k_1");
        Ok(k_1)
    }

    /// k_1
    pub fn coefficient_k1(&self, e_2_mm: f64, p_2_mm: f64, d_0_mm: f64, role: TransverseRole) -> CalcResult<f64> {
        Ok(self.coefficient_k1_governed(e_2_mm, p_2_mm, d_0_mm, role)?.value)
    }

    /// α_d
    pub fn coefficient_alpha_d(
        &self,
        e_1_mm: f64,
        p_1_mm: f64,
        d_0_mm: f64,
        role: LongitudinalRole,
    ) -> CalcResult<f64> {
        require_positive("d_0_mm", d_0_mm)?;
        let alpha_d = match role {
            LongitudinalRole::End => e_1_mm / (3.0 * d_0_mm),
            LongitudinalRole::Inner => p_1_mm / (3.0 * d_0_mm) - 0.25,
        };
        debug!(alpha_d, role = %role, "Coefficient α_d");
        Ok(alpha_d)
    }

    /// α_b with its governing candidate
    pub fn coefficient_alpha_b_governed(
        &self,
        e_1_mm: f64,
        p_1_mm: f64,
        d_0_mm: f64,
        role: LongitudinalRole,
    ) -> CalcResult<Governed<AlphaBGoverns>> {
        let alpha_d = self.coefficient_alpha_d(e_1_mm, p_1_mm, d_0_mm, role)?;
        let alpha_b = governing_min(&[
            (alpha_d, AlphaBGoverns::LoadDirection),
            (self.f_ub() / self.f_u, AlphaBGoverns::StrengthRatio),
            (1.0, AlphaBGoverns::Unity),
        ]);
        debug!(alpha_b = alpha_b.value, governs = ?alpha_b.governs, "Coefficient α_b");
        Ok(alpha_b)
    }

    /// α_b
    pub fn coefficient_alpha_b(&self, e_1_mm: f64, p_1_mm: f64, d_0_mm: f64, role: LongitudinalRole) -> CalcResult<f64> {
        Ok(self.coefficient_alpha_b_governed(e_1_mm, p_1_mm, d_0_mm, role)?.value)
    }

    /// F_b,Rd in a normal round hole (N).
    ///
    /// Fails with InvalidInput when the layout drives k_1 or α_b to zero or
    /// below; bearing has no meaning for such a joint.
    pub fn bearing_resistance(&self, layout: &BoltLayout) -> CalcResult<f64> {
        layout.validate()?;
        let k_1 = self.coefficient_k1_governed(layout.e_2_mm, layout.p_2_mm, layout.d_0_mm, layout.transverse)?;
        if k_1.value <= 0.0 {
            let (field, value) = match k_1.governs {
                K1Governs::EdgeDistance => ("e_2_mm", layout.e_2_mm),
                _ => ("p_2_mm", layout.p_2_mm),
            };
            return Err(CalcError::invalid_input(
                field,
                value.to_string(),
                format!("k_1 = {:.3} is not positive; distance too small for d_0 = {}", k_1.value, layout.d_0_mm),
            ));
        }
        let alpha_b =
            self.coefficient_alpha_b_governed(layout.e_1_mm, layout.p_1_mm, layout.d_0_mm, layout.longitudinal)?;
        if alpha_b.value <= 0.0 {
            let (field, value) = match layout.longitudinal {
                LongitudinalRole::End => ("e_1_mm", layout.e_1_mm),
                LongitudinalRole::Inner => ("p_1_mm", layout.p_1_mm),
            };
            return Err(CalcError::invalid_input(
                field,
                value.to_string(),
                format!("α_b = {:.3} is not positive; distance too small for d_0 = {}", alpha_b.value, layout.d_0_mm),
            ));
        }
        let (k_1, alpha_b) = (k_1.value, alpha_b.value);
        let f_b_rd = k_1 * alpha_b * self.f_u * self.bolt.d_mm * self.t_mm / self.gamma_m2;
        debug!(k_1, alpha_b, f_b_rd, "Bearing resistance");
        Ok(f_b_rd)
    }

    /// F_b,Rd in an oversized hole: 0.8 × normal
    pub fn bearing_resistance_oversized(&self, layout: &BoltLayout) -> CalcResult<f64> {
        self.bearing_resistance_for(layout, HoleType::Oversized)
    }

    /// F_b,Rd in a slotted hole, slot perpendicular to the load: 0.6 × normal
    pub fn bearing_resistance_slotted(&self, layout: &BoltLayout) -> CalcResult<f64> {
        self.bearing_resistance_for(layout, HoleType::Slotted)
    }

    /// F_b,Rd for a hole type
    pub fn bearing_resistance_for(&self, layout: &BoltLayout, hole: HoleType) -> CalcResult<f64> {
        Ok(hole.bearing_factor() * self.bearing_resistance(layout)?)
    }

    // ------------------------------------------------------------------------
    // Tension and punching
    // ------------------------------------------------------------------------

    /// k_2
    pub fn coefficient_k2(countersunk: bool) -> f64 {
        if countersunk {
            0.63
        } else {
            0.9
        }
    }

    /// F_t,Rd (N)
    pub fn tension_resistance(&self, countersunk: bool) -> f64 {
        let k_2 = Self::coefficient_k2(countersunk);
        let f_t_rd = k_2 * self.f_ub() * self.bolt.a_s_mm2 / self.gamma_m2;
        debug!(k_2, f_t_rd, countersunk, "Tension resistance");
        f_t_rd
    }

    /// d_m from the width across flats s of the head or nut (mm)
    pub fn mean_across_flats(s_mm: f64) -> CalcResult<f64> {
        require_positive("s_mm", s_mm)?;
        Ok(MEAN_ACROSS_FLATS_FACTOR * s_mm)
    }

    /// B_p,Rd (N)
    pub fn punching_resistance(&self, s_mm: f64) -> CalcResult<f64> {
        let d_m = Self::mean_across_flats(s_mm)?;
        let b_p_rd = 0.6 * PI * d_m * self.t_mm * self.f_u / self.gamma_m2;
        debug!(d_m, b_p_rd, "Punching shear resistance");
        Ok(b_p_rd)
    }

    /// Shear + tension utilisation F_v,Ed/F_v,Rd + F_t,Ed/(1.4 F_t,Rd)
    pub fn combined_interaction(
        &self,
        f_v_ed: f64,
        f_t_ed: f64,
        plane_through_thread: bool,
        countersunk: bool,
    ) -> CalcResult<f64> {
        require_non_negative("shear_load_n", f_v_ed)?;
        require_non_negative("tension_load_n", f_t_ed)?;
        let f_v_rd = self.shear_resistance(plane_through_thread);
        let f_t_rd = self.tension_resistance(countersunk);
        Ok(f_v_ed / f_v_rd + f_t_ed / (1.4 * f_t_rd))
    }
}

fn shear_coefficient_of(grade: BoltGrade, plane_through_thread: bool) -> f64 {
    if !plane_through_thread || grade.is_ductile_class() {
        0.6
    } else {
        0.5
    }
}

pub(crate) fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Design load must be zero or positive",
        ));
    }
    Ok(())
}

// ============================================================================
// Connection Check Input / Result
// ============================================================================

/// Bolt given by catalogue designation or explicit dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoltSpec {
    /// ISO metric bolt from the reference table (e.g., "M20")
    Metric { metric: String },
    /// Explicit dimensions; d_0 defaults to d + the hole-type clearance
    Explicit {
        d_mm: f64,
        a_s_mm2: f64,
        #[serde(default)]
        d_0_mm: Option<f64>,
        #[serde(default)]
        a_mm2: Option<f64>,
        #[serde(default)]
        s_mm: Option<f64>,
    },
}

/// Plate given by steel grade or explicit ultimate strength
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlateSpec {
    /// Hot-rolled grade from EN 1993-1-1 Table 3.1 (e.g., "S275")
    Grade { grade: String, t_mm: f64 },
    Explicit { t_mm: f64, f_u: f64 },
}

impl PlateSpec {
    pub fn t_mm(&self) -> f64 {
        match self {
            PlateSpec::Grade { t_mm, .. } | PlateSpec::Explicit { t_mm, .. } => *t_mm,
        }
    }
}

/// Measured distances of the joint (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointDistances {
    pub e_1_mm: f64,
    pub e_2_mm: f64,
    pub p_1_mm: f64,
    pub p_2_mm: f64,
}

/// Layout assumed when no distances are given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DefaultLayout {
    /// EN 1993-1-3 Table 8.4 validity floors
    #[default]
    ValidityRanges,
    /// EN 1993-1-8 Table 3.3 minimum distances
    SpacingMinimum,
}

/// Where the layout used by a check came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutSource {
    Explicit,
    ValidityRanges,
    SpacingMinimum,
}

fn default_true() -> bool {
    true
}

/// Input for a general bolted connection check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Splice B-1",
///   "bolt": { "kind": "metric", "metric": "M20" },
///   "grade": "8.8",
///   "plate": { "kind": "grade", "grade": "S275", "t_mm": 15.0 },
///   "distances": { "e_1_mm": 40.0, "e_2_mm": 35.0, "p_1_mm": 70.0, "p_2_mm": 70.0 },
///   "shear_load_n": 60000.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltedConnectionInput {
    #[serde(default)]
    pub label: String,
    pub bolt: BoltSpec,
    pub grade: BoltGrade,
    pub plate: PlateSpec,
    #[serde(default)]
    pub hole_type: HoleType,
    /// Shear plane passes through the threaded portion
    #[serde(default = "default_true")]
    pub shear_plane_through_thread: bool,
    #[serde(default)]
    pub countersunk: bool,
    #[serde(default)]
    pub transverse: TransverseRole,
    #[serde(default)]
    pub longitudinal: LongitudinalRole,
    #[serde(default)]
    pub distances: Option<JointDistances>,
    #[serde(default)]
    pub default_layout: DefaultLayout,
    #[serde(default)]
    pub exposure: Exposure,
    /// Design shear force per shear plane F_v,Ed (N)
    #[serde(default)]
    pub shear_load_n: Option<f64>,
    /// Design tension force F_t,Ed (N)
    #[serde(default)]
    pub tension_load_n: Option<f64>,
}

impl BoltedConnectionInput {
    /// Input for a catalogue bolt in a hot-rolled plate, default options
    pub fn new(metric: impl Into<String>, grade: BoltGrade, steel: impl Into<String>, t_mm: f64) -> Self {
        BoltedConnectionInput {
            label: String::new(),
            bolt: BoltSpec::Metric { metric: metric.into() },
            grade,
            plate: PlateSpec::Grade {
                grade: steel.into(),
                t_mm,
            },
            hole_type: HoleType::Normal,
            shear_plane_through_thread: true,
            countersunk: false,
            transverse: TransverseRole::Edge,
            longitudinal: LongitudinalRole::End,
            distances: None,
            default_layout: DefaultLayout::ValidityRanges,
            exposure: Exposure::Exposed,
            shear_load_n: None,
            tension_load_n: None,
        }
    }

    /// Validate the scalar inputs (lookups are validated on resolution)
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("t_mm", self.plate.t_mm())?;
        if let PlateSpec::Explicit { f_u, .. } = self.plate {
            require_positive("f_u", f_u)?;
        }
        if let Some(d) = &self.distances {
            require_positive("e_1_mm", d.e_1_mm)?;
            require_positive("e_2_mm", d.e_2_mm)?;
            require_positive("p_1_mm", d.p_1_mm)?;
            require_positive("p_2_mm", d.p_2_mm)?;
        }
        if let Some(v) = self.shear_load_n {
            require_non_negative("shear_load_n", v)?;
        }
        if let Some(v) = self.tension_load_n {
            require_non_negative("tension_load_n", v)?;
        }
        Ok(())
    }

    /// Plate ultimate strength
    fn resolve_f_u(&self, data: &ReferenceData) -> CalcResult<f64> {
        match &self.plate {
            PlateSpec::Grade { grade, t_mm } => Ok(data.lookup_steel(grade, *t_mm)?.f_u),
            PlateSpec::Explicit { f_u, .. } => Ok(*f_u),
        }
    }
}

/// Bolt geometry and width across flats (if known)
pub(crate) fn resolve_bolt(
    spec: &BoltSpec,
    hole: HoleType,
    data: &ReferenceData,
) -> CalcResult<(BoltGeometry, Option<f64>)> {
    match spec {
        BoltSpec::Metric { metric } => {
            let geometry = data.lookup_bolt_metric(metric, hole)?;
            let s = data.across_flats(metric)?;
            Ok((geometry, Some(s)))
        }
        BoltSpec::Explicit {
            d_mm,
            a_s_mm2,
            d_0_mm,
            a_mm2,
            s_mm,
        } => {
            let d_0 = d_0_mm.unwrap_or(*d_mm + hole.clearance_mm(*d_mm));
            let geometry = match a_mm2 {
                Some(a) => BoltGeometry::with_gross_area(*d_mm, d_0, *a, *a_s_mm2)?,
                None => BoltGeometry::new(*d_mm, d_0, *a_s_mm2)?,
            };
            Ok((geometry, *s_mm))
        }
    }
}

/// Results of a general bolted connection check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResistanceResult {
    pub label: String,
    pub bolt: BoltGeometry,
    pub grade: BoltGrade,
    pub hole_type: HoleType,
    pub f_ub: f64,
    pub f_u: f64,
    pub t_mm: f64,
    pub gamma_m2: f64,

    pub layout: BoltLayout,
    pub layout_source: LayoutSource,
    /// Table 3.3 bounds the layout falls outside of
    pub spacing_violations: Vec<SpacingViolation>,

    pub alpha_v: f64,
    /// F_v,Rd (N)
    pub shear_resistance_n: f64,

    pub k_1: Governed<K1Governs>,
    pub alpha_d: f64,
    pub alpha_b: Governed<AlphaBGoverns>,
    /// F_b,Rd including the hole-type factor (N)
    pub bearing_resistance_n: f64,

    pub k_2: f64,
    /// F_t,Rd (N)
    pub tension_resistance_n: f64,
    /// d_m (mm), when the width across flats is known
    pub d_m_mm: Option<f64>,
    /// B_p,Rd (N), when the width across flats is known
    pub punching_resistance_n: Option<f64>,

    /// min(F_v,Rd, F_b,Rd)
    pub governing_shear_mode: FailureMode,
    pub governing_shear_resistance_n: f64,
    /// min(F_t,Rd, B_p,Rd)
    pub governing_tension_mode: FailureMode,
    pub governing_tension_resistance_n: f64,

    pub shear_utilization: Option<f64>,
    pub tension_utilization: Option<f64>,
    pub combined_utilization: Option<f64>,
}

impl ResistanceResult {
    /// All checked utilisations ≤ 1.0
    pub fn passes(&self) -> bool {
        [self.shear_utilization, self.tension_utilization, self.combined_utilization]
            .iter()
            .flatten()
            .all(|u| *u <= 1.0)
    }

    /// Mode with the highest utilisation, if any load was given
    pub fn governing_mode(&self) -> Option<(FailureMode, f64)> {
        let candidates = [
            (self.governing_shear_mode, self.shear_utilization),
            (self.governing_tension_mode, self.tension_utilization),
            (FailureMode::CombinedShearTension, self.combined_utilization),
        ];
        candidates
            .iter()
            .filter_map(|(mode, u)| u.map(|u| (*mode, u)))
            .fold(None, |best: Option<(FailureMode, f64)>, (mode, u)| match best {
                Some((_, b)) if b >= u => best,
                _ => Some((mode, u)),
            })
    }

    /// Capacities in kN for display: (mode, resistance)
    pub fn capacities_kn(&self) -> Vec<(FailureMode, Kilonewtons)> {
        let mut rows: Vec<(FailureMode, Kilonewtons)> = vec![
            (FailureMode::Shear, Newtons(self.shear_resistance_n).into()),
            (FailureMode::Bearing, Newtons(self.bearing_resistance_n).into()),
            (FailureMode::Tension, Newtons(self.tension_resistance_n).into()),
        ];
        if let Some(b_p) = self.punching_resistance_n {
            rows.push((FailureMode::Punching, Newtons(b_p).into()));
        }
        rows
    }

    /// Multi-line text summary
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Bolt d = {:.0} mm, d_0 = {:.0} mm, class {} ({}), plate t = {:.1} mm, f_u = {:.0} N/mm²\n\
             ------------------------------------------------------------\n\
             α_v = {:.2}   k_1 = {:.3} ({:?})   α_b = {:.3} ({:?})   k_2 = {:.2}\n",
            self.bolt.d_mm,
            self.bolt.d_0_mm,
            self.grade,
            self.hole_type,
            self.t_mm,
            self.f_u,
            self.alpha_v,
            self.k_1.value,
            self.k_1.governs,
            self.alpha_b.value,
            self.alpha_b.governs,
            self.k_2,
        );
        for (mode, kn) in self.capacities_kn() {
            out.push_str(&format!("{:<16} {:>10.2} kN   {}\n", mode.display_name(), kn.0, mode.clause()));
        }
        for v in &self.spacing_violations {
            out.push_str(&format!("WARNING: {}\n", v));
        }
        out
    }
}

/// Run a general bolted connection check.
///
/// Resolves the bolt, grade and plate against the built-in reference data,
/// builds the layout (explicit distances, or the selected default), then
/// computes every resistance in dependency order.
pub fn calculate(input: &BoltedConnectionInput, gammas: &PartialSafetyFactors) -> CalcResult<ResistanceResult> {
    calculate_with(input, gammas, ReferenceData::builtin()?)
}

/// [`calculate`] against custom reference tables
pub fn calculate_with(
    input: &BoltedConnectionInput,
    gammas: &PartialSafetyFactors,
    data: &ReferenceData,
) -> CalcResult<ResistanceResult> {
    input.validate()?;

    let (bolt, s_mm) = resolve_bolt(&input.bolt, input.hole_type, data)?;
    let f_u = input.resolve_f_u(data)?;
    let t_mm = input.plate.t_mm();
    let engine = BoltResistance::new(bolt, input.grade, t_mm, f_u, gammas.gamma_m2)?;

    let limits = HoleLayoutLimits::new(bolt.d_0_mm, t_mm)?;
    let (layout, layout_source) = match (&input.distances, input.default_layout) {
        (Some(d), _) => (
            BoltLayout::new(
                d.e_1_mm,
                d.e_2_mm,
                d.p_1_mm,
                d.p_2_mm,
                bolt.d_0_mm,
                input.transverse,
                input.longitudinal,
            )?,
            LayoutSource::Explicit,
        ),
        (None, DefaultLayout::ValidityRanges) => (
            BoltLayout::from_validity_ranges(
                &GeometricValidityRanges::new(bolt.d_0_mm)?,
                input.transverse,
                input.longitudinal,
            ),
            LayoutSource::ValidityRanges,
        ),
        (None, DefaultLayout::SpacingMinimum) => (
            BoltLayout::from_spacing_minimum(&limits, input.transverse, input.longitudinal),
            LayoutSource::SpacingMinimum,
        ),
    };
    let spacing_violations = limits.check(&layout, input.exposure);

    let through_thread = input.shear_plane_through_thread;
    let alpha_v = engine.shear_coefficient(through_thread);
    let f_v_rd = engine.shear_resistance(through_thread);

    let k_1 = engine.coefficient_k1_governed(layout.e_2_mm, layout.p_2_mm, layout.d_0_mm, layout.transverse)?;
    let alpha_d = engine.coefficient_alpha_d(layout.e_1_mm, layout.p_1_mm, layout.d_0_mm, layout.longitudinal)?;
    let alpha_b =
        engine.coefficient_alpha_b_governed(layout.e_1_mm, layout.p_1_mm, layout.d_0_mm, layout.longitudinal)?;
    let f_b_rd = engine.bearing_resistance_for(&layout, input.hole_type)?;

    let k_2 = BoltResistance::coefficient_k2(input.countersunk);
    let f_t_rd = engine.tension_resistance(input.countersunk);
    let (d_m_mm, punching_resistance_n) = match s_mm {
        Some(s) => (
            Some(BoltResistance::mean_across_flats(s)?),
            Some(engine.punching_resistance(s)?),
        ),
        None => (None, None),
    };

    let (governing_shear_mode, governing_shear_resistance_n) = if f_b_rd < f_v_rd {
        (FailureMode::Bearing, f_b_rd)
    } else {
        (FailureMode::Shear, f_v_rd)
    };
    let (governing_tension_mode, governing_tension_resistance_n) = match punching_resistance_n {
        Some(b_p) if b_p < f_t_rd => (FailureMode::Punching, b_p),
        _ => (FailureMode::Tension, f_t_rd),
    };

    let shear_utilization = input.shear_load_n.map(|v| v / governing_shear_resistance_n);
    let tension_utilization = input.tension_load_n.map(|v| v / governing_tension_resistance_n);
    let combined_utilization = match (input.shear_load_n, input.tension_load_n) {
        (Some(v), Some(t)) => Some(engine.combined_interaction(v, t, through_thread, input.countersunk)?),
        _ => None,
    };

    debug!(
        label = %input.label,
        governing_shear = %governing_shear_mode,
        governing_tension = %governing_tension_mode,
        "Bolted connection check complete"
    );

    Ok(ResistanceResult {
        label: input.label.clone(),
        bolt,
        grade: input.grade,
        hole_type: input.hole_type,
        f_ub: engine.f_ub(),
        f_u,
        t_mm,
        gamma_m2: gammas.gamma_m2,
        layout,
        layout_source,
        spacing_violations,
        alpha_v,
        shear_resistance_n: f_v_rd,
        k_1,
        alpha_d,
        alpha_b,
        bearing_resistance_n: f_b_rd,
        k_2,
        tension_resistance_n: f_t_rd,
        d_m_mm,
        punching_resistance_n,
        governing_shear_mode,
        governing_shear_resistance_n,
        governing_tension_mode,
        governing_tension_resistance_n,
        shear_utilization,
        tension_utilization,
        combined_utilization,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m20_engine() -> BoltResistance {
        let m20 = BoltGeometry::with_gross_area(20.0, 22.0, 314.0, 245.0).unwrap();
        BoltResistance::new(m20, BoltGrade::Grade88, 15.0, 430.0, 1.25).unwrap()
    }

    fn layout(e_1: f64, e_2: f64, p_1: f64, p_2: f64) -> BoltLayout {
        BoltLayout::new(e_1, e_2, p_1, p_2, 22.0, TransverseRole::Edge, LongitudinalRole::End).unwrap()
    }

    #[test]
    fn test_shear_through_thread_m20() {
        // 0.6 × 800 × 245 / 1.25 = 94 080 N
        let engine = m20_engine();
        assert!((engine.shear_resistance(true) - 94_080.0).abs() < 1e-6);
        // Unthreaded shank: 0.6 × 800 × 314 / 1.25
        assert!((engine.shear_resistance(false) - 120_576.0).abs() < 1e-6);
    }

    #[test]
    fn test_shear_coefficients_by_grade() {
        assert_eq!(BoltResistance::shear_coefficient_for_grade("4.6", true).unwrap(), 0.6);
        assert_eq!(BoltResistance::shear_coefficient_for_grade("10.9", true).unwrap(), 0.5);
        for grade in BoltGrade::ALL {
            assert_eq!(shear_coefficient_of(grade, false), 0.6);
        }
        let err = BoltResistance::shear_coefficient_for_grade("9.9", true).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GRADE");
    }

    #[test]
    fn test_constructor_validation() {
        let m20 = BoltGeometry::new(20.0, 22.0, 245.0).unwrap();
        assert!(BoltResistance::new(m20, BoltGrade::Grade88, 15.0, 430.0, 0.0).is_err());
        assert!(BoltResistance::new(m20, BoltGrade::Grade88, 15.0, -1.0, 1.25).is_err());
        assert!(BoltResistance::new(m20, BoltGrade::Grade88, 0.0, 430.0, 1.25).is_err());
    }

    #[test]
    fn test_k1_edge_and_inner() {
        let engine = m20_engine();
        // Edge: min(2.8·30/22 − 1.7, 1.4·70/22 − 1.7, 2.5) = 2.118
        let k_1 = engine
            .coefficient_k1_governed(30.0, 70.0, 22.0, TransverseRole::Edge)
            .unwrap();
        assert!((k_1.value - (2.8 * 30.0 / 22.0 - 1.7)).abs() < 1e-12);
        assert_eq!(k_1.governs, K1Governs::EdgeDistance);

        // Inner with wide spacing hits the 2.5 cap
        let k_1 = engine
            .coefficient_k1_governed(30.0, 100.0, 22.0, TransverseRole::Inner)
            .unwrap();
        assert_eq!(k_1.value, 2.5);
        assert_eq!(k_1.governs, K1Governs::Cap);

        // Inner ignores e_2
        let k_1 = engine.coefficient_k1(1.0, 50.0, 22.0, TransverseRole::Inner).unwrap();
        assert!((k_1 - (1.4 * 50.0 / 22.0 - 1.7)).abs() < 1e-12);
    }

    #[test]
    fn test_alpha_d_positions() {
        let engine = m20_engine();
        let end = engine.coefficient_alpha_d(33.0, 66.0, 22.0, LongitudinalRole::End).unwrap();
        assert!((end - 0.5).abs() < 1e-12);
        let inner = engine.coefficient_alpha_d(33.0, 66.0, 22.0, LongitudinalRole::Inner).unwrap();
        assert!((inner - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_alpha_b_caps() {
        let engine = m20_engine();
        // e_1/(3d_0) = 3.03 exceeds f_ub/f_u = 1.86 and 1.0
        let alpha_b = engine
            .coefficient_alpha_b_governed(200.0, 70.0, 22.0, LongitudinalRole::End)
            .unwrap();
        assert_eq!(alpha_b.value, 1.0);
        assert_eq!(alpha_b.governs, AlphaBGoverns::Unity);

        // Weak bolt in strong plate: f_ub/f_u = 400/510 governs
        let m20 = BoltGeometry::new(20.0, 22.0, 245.0).unwrap();
        let weak = BoltResistance::new(m20, BoltGrade::Grade46, 15.0, 510.0, 1.25).unwrap();
        let alpha_b = weak
            .coefficient_alpha_b_governed(200.0, 70.0, 22.0, LongitudinalRole::End)
            .unwrap();
        assert!((alpha_b.value - 400.0 / 510.0).abs() < 1e-12);
        assert_eq!(alpha_b.governs, AlphaBGoverns::StrengthRatio);
    }

    #[test]
    fn test_non_positive_hole_rejected() {
        let engine = m20_engine();
        for d_0 in [0.0, -22.0] {
            assert_eq!(
                engine.coefficient_k1(30.0, 70.0, d_0, TransverseRole::Edge).unwrap_err().error_code(),
                "INVALID_INPUT"
            );
            assert!(engine.coefficient_alpha_d(30.0, 70.0, d_0, LongitudinalRole::End).is_err());
            assert!(engine.coefficient_alpha_b(30.0, 70.0, d_0, LongitudinalRole::Inner).is_err());
        }
        let bad = BoltLayout {
            d_0_mm: 0.0,
            ..layout(40.0, 35.0, 70.0, 70.0)
        };
        assert!(engine.bearing_resistance(&bad).is_err());
    }

    #[test]
    fn test_position_parsing() {
        assert_eq!(TransverseRole::from_str_flexible("Edge").unwrap(), TransverseRole::Edge);
        assert_eq!(LongitudinalRole::from_str_flexible(" inner ").unwrap(), LongitudinalRole::Inner);
        assert_eq!(
            TransverseRole::from_str_flexible("end").unwrap_err().error_code(),
            "INVALID_POSITION"
        );
        assert_eq!(
            LongitudinalRole::from_str_flexible("middle").unwrap_err().error_code(),
            "INVALID_POSITION"
        );
    }

    #[test]
    fn test_bearing_resistance_and_hole_factors() {
        let engine = m20_engine();
        let l = layout(40.0, 35.0, 70.0, 70.0);
        let k_1 = (2.8f64 * 35.0 / 22.0 - 1.7).min(1.4 * 70.0 / 22.0 - 1.7).min(2.5);
        let alpha_b = (40.0 / 66.0f64).min(800.0 / 430.0).min(1.0);
        let expected = k_1 * alpha_b * 430.0 * 20.0 * 15.0 / 1.25;

        let f_b = engine.bearing_resistance(&l).unwrap();
        assert!((f_b - expected).abs() < 1e-6);
        assert!((engine.bearing_resistance_oversized(&l).unwrap() - 0.8 * expected).abs() < 1e-6);
        assert!((engine.bearing_resistance_slotted(&l).unwrap() - 0.6 * expected).abs() < 1e-6);
    }

    #[test]
    fn test_bearing_rejects_non_positive_coefficients() {
        let engine = m20_engine();

        // Inner bolt with p_1 < 0.75 d_0 drives α_d negative
        let short_pitch = BoltLayout::new(40.0, 35.0, 10.0, 70.0, 22.0, TransverseRole::Inner, LongitudinalRole::Inner)
            .unwrap();
        assert!(engine.coefficient_alpha_d(40.0, 10.0, 22.0, LongitudinalRole::Inner).unwrap() < 0.0);
        let err = engine.bearing_resistance(&short_pitch).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("p_1_mm"));

        // Edge e_2 < 0.607 d_0 drives k_1 negative
        let short_edge = layout(40.0, 10.0, 70.0, 70.0);
        let err = engine.bearing_resistance(&short_edge).unwrap_err();
        assert!(err.to_string().contains("e_2_mm"));

        // Both negative must not multiply into a positive resistance
        let both = BoltLayout::new(40.0, 10.0, 10.0, 70.0, 22.0, TransverseRole::Edge, LongitudinalRole::Inner).unwrap();
        assert!(engine.bearing_resistance(&both).is_err());
        assert!(engine.bearing_resistance_oversized(&both).is_err());
    }

    #[test]
    fn test_calculate_rejects_short_pitch_instead_of_passing() {
        let gammas = PartialSafetyFactors::builtin().unwrap();
        let mut input = BoltedConnectionInput::new("M20", BoltGrade::Grade88, "S275", 15.0);
        input.transverse = TransverseRole::Inner;
        input.longitudinal = LongitudinalRole::Inner;
        input.distances = Some(JointDistances {
            e_1_mm: 40.0,
            e_2_mm: 35.0,
            p_1_mm: 10.0,
            p_2_mm: 70.0,
        });
        input.shear_load_n = Some(60_000.0);
        assert_eq!(calculate(&input, &gammas).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_tension_and_punching() {
        let engine = m20_engine();
        assert_eq!(BoltResistance::coefficient_k2(true), 0.63);
        assert_eq!(BoltResistance::coefficient_k2(false), 0.9);
        // 0.9 × 800 × 245 / 1.25 = 141 120 N
        assert!((engine.tension_resistance(false) - 141_120.0).abs() < 1e-6);
        assert!((engine.tension_resistance(true) - 98_784.0).abs() < 1e-6);

        let d_m = BoltResistance::mean_across_flats(30.0).unwrap();
        assert!((d_m - 32.3205).abs() < 1e-3);
        let b_p = engine.punching_resistance(30.0).unwrap();
        assert!((b_p - 0.6 * PI * d_m * 15.0 * 430.0 / 1.25).abs() < 1e-6);
        assert!(BoltResistance::mean_across_flats(0.0).is_err());
    }

    #[test]
    fn test_combined_interaction() {
        let engine = m20_engine();
        let u = engine.combined_interaction(47_040.0, 98_784.0, true, false).unwrap();
        // 0.5 + 98 784 / (1.4 × 141 120) = 1.0
        assert!((u - 1.0).abs() < 1e-9);
        assert!(engine.combined_interaction(-1.0, 0.0, true, false).is_err());
    }

    #[test]
    fn test_default_layouts() {
        let ranges = GeometricValidityRanges::new(22.0).unwrap();
        let l = BoltLayout::from_validity_ranges(&ranges, TransverseRole::Edge, LongitudinalRole::End);
        assert_eq!((l.e_1_mm, l.e_2_mm, l.p_1_mm, l.p_2_mm), (22.0, 33.0, 66.0, 66.0));

        let limits = HoleLayoutLimits::new(22.0, 10.0).unwrap();
        let l = BoltLayout::from_spacing_minimum(&limits, TransverseRole::Edge, LongitudinalRole::End);
        assert!((l.p_2_mm - 52.8).abs() < 1e-9);
        assert!(limits.check(&l, Exposure::Exposed).is_empty());
    }

    #[test]
    fn test_calculate_m20_end_to_end() {
        let gammas = PartialSafetyFactors::builtin().unwrap();
        let mut input = BoltedConnectionInput::new("M20", BoltGrade::Grade88, "S275", 15.0);
        input.label = "Splice".to_string();
        input.distances = Some(JointDistances {
            e_1_mm: 40.0,
            e_2_mm: 35.0,
            p_1_mm: 70.0,
            p_2_mm: 70.0,
        });
        input.shear_load_n = Some(60_000.0);

        let result = calculate(&input, &gammas).unwrap();
        assert_eq!(result.f_u, 430.0);
        assert_eq!(result.layout_source, LayoutSource::Explicit);
        assert!((result.shear_resistance_n - 94_080.0).abs() < 1e-6);
        assert!(result.spacing_violations.is_empty());
        assert!(result.punching_resistance_n.is_some());
        assert_eq!(
            result.governing_shear_resistance_n,
            result.shear_resistance_n.min(result.bearing_resistance_n)
        );
        assert!(result.combined_utilization.is_none());
        assert!(result.passes());
        assert!(result.summary().contains("Shear"));
    }

    #[test]
    fn test_calculate_default_layout_governs_bearing() {
        let gammas = PartialSafetyFactors::builtin().unwrap();
        let input = BoltedConnectionInput::new("M20", BoltGrade::Grade88, "S275", 15.0);
        let result = calculate(&input, &gammas).unwrap();
        assert_eq!(result.layout_source, LayoutSource::ValidityRanges);
        // e_1 = d_0 puts α_b at 1/3, far below shear
        assert_eq!(result.governing_shear_mode, FailureMode::Bearing);
        assert_eq!(result.alpha_b.governs, AlphaBGoverns::LoadDirection);
        // Validity floors sit below the Table 3.3 e_1 minimum
        assert!(!result.spacing_violations.is_empty());
        assert!(result.governing_mode().is_none());
    }

    #[test]
    fn test_calculate_combined_and_failure() {
        let gammas = PartialSafetyFactors::builtin().unwrap();
        let mut input = BoltedConnectionInput::new("M16", BoltGrade::Grade46, "S355", 10.0);
        input.default_layout = DefaultLayout::SpacingMinimum;
        input.shear_load_n = Some(30_000.0);
        input.tension_load_n = Some(40_000.0);
        let result = calculate(&input, &gammas).unwrap();
        assert_eq!(result.layout_source, LayoutSource::SpacingMinimum);
        assert!(result.combined_utilization.is_some());
        assert!(!result.passes());
        let (_, worst) = result.governing_mode().unwrap();
        assert!(worst > 1.0);
    }

    #[test]
    fn test_calculate_lookup_errors() {
        let gammas = PartialSafetyFactors::builtin().unwrap();
        let input = BoltedConnectionInput::new("M99", BoltGrade::Grade88, "S275", 15.0);
        assert_eq!(calculate(&input, &gammas).unwrap_err().error_code(), "NOT_FOUND");
        let input = BoltedConnectionInput::new("M20", BoltGrade::Grade88, "S275", 120.0);
        assert_eq!(calculate(&input, &gammas).unwrap_err().error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_explicit_bolt_and_plate_json() {
        let json = r#"{
            "bolt": { "kind": "explicit", "d_mm": 20.0, "a_s_mm2": 245.0, "a_mm2": 314.0 },
            "grade": "8.8",
            "plate": { "kind": "explicit", "t_mm": 15.0, "f_u": 430.0 },
            "hole_type": "Oversized"
        }"#;
        let input: BoltedConnectionInput = serde_json::from_str(json).unwrap();
        assert!(input.shear_plane_through_thread);
        let result = calculate(&input, &PartialSafetyFactors::builtin().unwrap()).unwrap();
        assert_eq!(result.bolt.d_0_mm, 24.0);
        assert!((result.shear_resistance_n - 94_080.0).abs() < 1e-6);
        assert!(result.punching_resistance_n.is_none());
    }
}
