//! # Thin-Gauge Bolt Resistance (EN 1993-1-3 §8.3, Table 8.4)
//!
//! Bolts in cold-formed sheet, t < 3 mm. The joint geometry is not measured
//! here: end distance, edge distance and spacings are taken at the Table 8.4
//! validity floors for the hole diameter (see [`GeometricValidityRanges`]).
//!
//! ```text
//! Bearing       F_b,Rd = 2.5 α_b k_t f_u d t / γ_M2
//!               α_b    = min(1.0, e_1 / (3d))
//!               k_t    = (0.8 t + 1.5) / 2.5    t ≤ 1.25 mm
//!                        1.0                    t > 1.25 mm
//! Net section   F_n,Rd = (1 + 3 r (d_0/u − 0.3)) A_net f_u / γ_M2 ≤ A_net f_u / γ_M2
//!               A_net  = (p_2 − d_0) t,   u = min(2 e_2, p_2)
//! Shear         F_v,Rd = 0.6 f_ub A_s / γ_M2   (4.6, 5.6, 8.8)
//!                        0.5 f_ub A_s / γ_M2   (4.8, 5.8, 6.8, 10.9)
//! Tension       F_t,Rd = 0.9 f_ub A_s / γ_M2
//! ```
//!
//! r is the number of bolts in the net section divided by the total number of
//! bolts in the joint. The net section is evaluated for r = 2, 1, 1/2 and 1/3.
//!
//! k_t is applied down to t = 0.5 mm, the thinnest DIN 1543 catalogue sheet,
//! although Table 8.4 states 0.75 mm.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::bolt_resistance::{require_non_negative, resolve_bolt, BoltSpec, FailureMode};
use crate::calculations::validity_ranges::{
    applicability, ApplicabilityViolation, GeometricValidityRanges, MIN_CATALOGUE_SHEET_THICKNESS_MM,
};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::{BoltGeometry, BoltGrade, HoleType};
use crate::reference_data::ReferenceData;
use crate::safety_factors::PartialSafetyFactors;
use crate::units::{Millimeters, NPerMm2, Newtons, SqMillimeters};

/// Thinnest sheet accepted (mm)
pub const MIN_SHEET_THICKNESS_MM: f64 = MIN_CATALOGUE_SHEET_THICKNESS_MM;

/// Net-section bolt ratios r, in evaluation order
pub const NET_SECTION_RATIOS: [f64; 4] = [2.0, 1.0, 0.5, 1.0 / 3.0];

/// Net-section resistance for each ratio of [`NET_SECTION_RATIOS`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetSectionResistance {
    pub ratios: [f64; 4],
    /// F_n,Rd,i (N), capped
    pub resistances_n: [f64; 4],
    /// A_net f_u / γ_M2 (N)
    pub cap_n: f64,
}

impl NetSectionResistance {
    /// Resistance for a listed ratio r
    pub fn for_ratio(&self, r: f64) -> CalcResult<f64> {
        self.ratios
            .iter()
            .position(|ri| (ri - r).abs() < 1e-9)
            .map(|i| self.resistances_n[i])
            .ok_or_else(|| {
                CalcError::invalid_input("net_section_ratio", r.to_string(), "Expected one of: 2, 1, 1/2, 1/3")
            })
    }

    /// (r, F_n,Rd) pairs
    pub fn entries(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ratios.iter().copied().zip(self.resistances_n.iter().copied())
    }
}

/// Table 8.4 resistances for one bolt in thin sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThinGaugeBoltResistance {
    /// Nominal diameter d (mm)
    pub d_mm: f64,
    /// Tensile stress area A_s (mm²)
    pub a_s_mm2: f64,
    pub grade: BoltGrade,
    /// Hole diameter d_0 (mm)
    pub d_0_mm: f64,
    /// Sheet thickness t (mm)
    pub t_mm: f64,
    /// Sheet ultimate strength f_u (N/mm²)
    pub f_u: f64,
    pub gamma_m2: f64,
}

impl ThinGaugeBoltResistance {
    pub fn new(
        d_mm: f64,
        a_s_mm2: f64,
        grade: BoltGrade,
        d_0_mm: f64,
        t_mm: f64,
        f_u: f64,
        gamma_m2: f64,
    ) -> CalcResult<Self> {
        // d_0 > d > 0 and A_s ≤ A
        BoltGeometry::new(d_mm, d_0_mm, a_s_mm2)?;
        require_positive("t_mm", t_mm)?;
        require_positive("f_u", f_u)?;
        require_positive("gamma_M2", gamma_m2)?;
        if t_mm < MIN_SHEET_THICKNESS_MM {
            return Err(CalcError::invalid_input(
                "t_mm",
                t_mm.to_string(),
                format!("Sheet thickness must be at least {} mm", MIN_SHEET_THICKNESS_MM),
            ));
        }
        Ok(ThinGaugeBoltResistance {
            d_mm,
            a_s_mm2,
            grade,
            d_0_mm,
            t_mm,
            f_u,
            gamma_m2,
        })
    }

    /// As [`ThinGaugeBoltResistance::new`], parsing the grade designation
    pub fn with_grade_str(
        d_mm: f64,
        a_s_mm2: f64,
        grade: &str,
        d_0_mm: f64,
        t_mm: f64,
        f_u: f64,
        gamma_m2: f64,
    ) -> CalcResult<Self> {
        let grade = BoltGrade::from_str_flexible(grade)?;
        Self::new(d_mm, a_s_mm2, grade, d_0_mm, t_mm, f_u, gamma_m2)
    }

    /// Validity floors for d_0
    pub fn validity_ranges(&self) -> CalcResult<GeometricValidityRanges> {
        GeometricValidityRanges::new(self.d_0_mm)
    }

    /// Table 8.4 conditions this joint falls outside of
    pub fn applicability(&self) -> Vec<ApplicabilityViolation> {
        applicability(self.t_mm, self.f_u, self.d_mm)
    }

    // ------------------------------------------------------------------------
    // Bearing
    // ------------------------------------------------------------------------

    /// α_b = min(1.0, e_1/(3d)) at e_1 = e_1,min
    pub fn coefficient_alpha_b(&self) -> CalcResult<f64> {
        let e_1 = self.validity_ranges()?.e_1_min();
        Ok((e_1 / (3.0 * self.d_mm)).min(1.0))
    }

    /// k_t
    pub fn coefficient_kt(&self) -> f64 {
        if self.t_mm <= 1.25 {
            (0.8 * self.t_mm + 1.5) / 2.5
        } else {
            1.0
        }
    }

    /// F_b,Rd (N)
    pub fn bearing_resistance(&self) -> CalcResult<f64> {
        let alpha_b = self.coefficient_alpha_b()?;
        let k_t = self.coefficient_kt();
        let f_b_rd = 2.5 * alpha_b * k_t * self.f_u * self.d_mm * self.t_mm / self.gamma_m2;
        debug!(alpha_b, k_t, f_b_rd, "Thin-gauge bearing resistance");
        Ok(f_b_rd)
    }

    // ------------------------------------------------------------------------
    // Net section
    // ------------------------------------------------------------------------

    /// A_net = (p_2 − d_0) t between two bolts (mm²)
    pub fn net_area(&self) -> CalcResult<f64> {
        let p_2 = self.validity_ranges()?.p_2_min();
        Ok((Millimeters(p_2 - self.d_0_mm) * Millimeters(self.t_mm)).value())
    }

    /// u = min(2 e_2, p_2) (mm)
    pub fn coefficient_u(&self) -> CalcResult<f64> {
        let ranges = self.validity_ranges()?;
        Ok((2.0 * ranges.e_2_min()).min(ranges.p_2_min()))
    }

    /// F_n,Rd for r = 2, 1, 1/2, 1/3
    pub fn net_section_resistance(&self) -> CalcResult<NetSectionResistance> {
        let u = self.coefficient_u()?;
        let a_net = self.net_area()?;
        let base: Newtons = NPerMm2(self.f_u) * SqMillimeters(a_net);
        let cap_n = base.value() / self.gamma_m2;
        let resistances_n =
            NET_SECTION_RATIOS.map(|r| ((1.0 + 3.0 * r * (self.d_0_mm / u - 0.3)) * cap_n).min(cap_n));
        debug!(a_net, u, ?resistances_n, "Thin-gauge net section resistance");
        Ok(NetSectionResistance {
            ratios: NET_SECTION_RATIOS,
            resistances_n,
            cap_n,
        })
    }

    // ------------------------------------------------------------------------
    // Shear and tension
    // ------------------------------------------------------------------------

    /// f_yb (N/mm²)
    pub fn bolt_yield_strength(&self) -> f64 {
        self.grade.f_yb()
    }

    /// f_ub (N/mm²)
    pub fn bolt_ultimate_strength(&self) -> f64 {
        self.grade.f_ub()
    }

    /// 0.6 for 4.6, 5.6, 8.8, else 0.5
    pub fn shear_coefficient(&self) -> f64 {
        if self.grade.is_ductile_class() {
            0.6
        } else {
            0.5
        }
    }

    /// F_v,Rd (N)
    pub fn shear_resistance(&self) -> f64 {
        self.shear_coefficient() * self.bolt_ultimate_strength() * self.a_s_mm2 / self.gamma_m2
    }

    /// F_t,Rd (N)
    pub fn tension_resistance(&self) -> f64 {
        0.9 * self.bolt_ultimate_strength() * self.a_s_mm2 / self.gamma_m2
    }
}

// ============================================================================
// Connection Check Input / Result
// ============================================================================

/// Sheet given by EN 1993-1-3 grade or explicit ultimate strength
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SheetSpec {
    /// Sheet steel from EN 1993-1-3 Table 3.1a (e.g., "S280GD")
    Grade { grade: String, t_mm: f64 },
    Explicit { t_mm: f64, f_u: f64 },
}

impl SheetSpec {
    pub fn t_mm(&self) -> f64 {
        match self {
            SheetSpec::Grade { t_mm, .. } | SheetSpec::Explicit { t_mm, .. } => *t_mm,
        }
    }
}

/// Input for a thin-gauge bolted connection check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Purlin lap",
///   "bolt": { "kind": "metric", "metric": "M12" },
///   "grade": "8.8",
///   "sheet": { "kind": "grade", "grade": "S350GD", "t_mm": 1.5 },
///   "net_section_ratio": 1.0,
///   "shear_load_n": 5000.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThinGaugeInput {
    #[serde(default)]
    pub label: String,
    pub bolt: BoltSpec,
    pub grade: BoltGrade,
    pub sheet: SheetSpec,
    #[serde(default)]
    pub hole_type: HoleType,
    /// Ratio r used for the net-section check, one of 2, 1, 1/2, 1/3
    #[serde(default)]
    pub net_section_ratio: Option<f64>,
    #[serde(default)]
    pub shear_load_n: Option<f64>,
    #[serde(default)]
    pub tension_load_n: Option<f64>,
}

impl ThinGaugeInput {
    pub fn new(metric: impl Into<String>, grade: BoltGrade, sheet: impl Into<String>, t_mm: f64) -> Self {
        ThinGaugeInput {
            label: String::new(),
            bolt: BoltSpec::Metric { metric: metric.into() },
            grade,
            sheet: SheetSpec::Grade {
                grade: sheet.into(),
                t_mm,
            },
            hole_type: HoleType::Normal,
            net_section_ratio: None,
            shear_load_n: None,
            tension_load_n: None,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("t_mm", self.sheet.t_mm())?;
        if let SheetSpec::Explicit { f_u, .. } = self.sheet {
            require_positive("f_u", f_u)?;
        }
        if let Some(v) = self.shear_load_n {
            require_non_negative("shear_load_n", v)?;
        }
        if let Some(v) = self.tension_load_n {
            require_non_negative("tension_load_n", v)?;
        }
        Ok(())
    }
}

/// Results of a thin-gauge bolted connection check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThinGaugeResult {
    pub label: String,
    pub d_mm: f64,
    pub d_0_mm: f64,
    pub a_s_mm2: f64,
    pub grade: BoltGrade,
    pub t_mm: f64,
    pub f_u: f64,
    pub gamma_m2: f64,
    pub f_yb: f64,
    pub f_ub: f64,

    pub validity_ranges: GeometricValidityRanges,
    pub e_1_min_mm: f64,
    pub e_2_min_mm: f64,
    pub p_1_min_mm: f64,
    pub p_2_min_mm: f64,
    pub applicability_violations: Vec<ApplicabilityViolation>,

    pub alpha_b: f64,
    pub k_t: f64,
    /// F_b,Rd (N)
    pub bearing_resistance_n: f64,

    pub net_area_mm2: f64,
    pub u_mm: f64,
    pub net_section: NetSectionResistance,
    /// F_n,Rd at the requested ratio (N)
    pub selected_net_section_n: Option<f64>,

    /// F_v,Rd (N)
    pub shear_resistance_n: f64,
    /// F_t,Rd (N)
    pub tension_resistance_n: f64,

    /// Lowest of shear, bearing and the selected net section
    pub governing_shear_mode: FailureMode,
    pub governing_shear_resistance_n: f64,

    pub shear_utilization: Option<f64>,
    pub tension_utilization: Option<f64>,
}

impl ThinGaugeResult {
    /// No blocking Table 8.4 violation and all utilisations ≤ 1.0
    pub fn passes(&self) -> bool {
        !self.applicability_violations.iter().any(|v| v.is_blocking())
            && [self.shear_utilization, self.tension_utilization]
                .iter()
                .flatten()
                .all(|u| *u <= 1.0)
    }
}

/// Run a thin-gauge bolted connection check against the built-in tables
pub fn calculate(input: &ThinGaugeInput, gammas: &PartialSafetyFactors) -> CalcResult<ThinGaugeResult> {
    calculate_with(input, gammas, ReferenceData::builtin()?)
}

/// [`calculate`] against custom reference tables
pub fn calculate_with(
    input: &ThinGaugeInput,
    gammas: &PartialSafetyFactors,
    data: &ReferenceData,
) -> CalcResult<ThinGaugeResult> {
    input.validate()?;

    let (bolt, _) = resolve_bolt(&input.bolt, input.hole_type, data)?;
    let t_mm = input.sheet.t_mm();
    let f_u = match &input.sheet {
        SheetSpec::Grade { grade, .. } => data.lookup_sheet_steel(grade)?.f_u,
        SheetSpec::Explicit { f_u, .. } => *f_u,
    };
    let engine = ThinGaugeBoltResistance::new(
        bolt.d_mm,
        bolt.a_s_mm2,
        input.grade,
        bolt.d_0_mm,
        t_mm,
        f_u,
        gammas.gamma_m2,
    )?;

    let validity_ranges = engine.validity_ranges()?;
    let applicability_violations = engine.applicability();

    let f_b_rd = engine.bearing_resistance()?;
    let net_section = engine.net_section_resistance()?;
    let selected_net_section_n = input
        .net_section_ratio
        .map(|r| net_section.for_ratio(r))
        .transpose()?;
    let f_v_rd = engine.shear_resistance();
    let f_t_rd = engine.tension_resistance();

    let mut governing = (FailureMode::Shear, f_v_rd);
    if f_b_rd < governing.1 {
        governing = (FailureMode::Bearing, f_b_rd);
    }
    if let Some(f_n) = selected_net_section_n {
        if f_n < governing.1 {
            governing = (FailureMode::NetSection, f_n);
        }
    }
    let (governing_shear_mode, governing_shear_resistance_n) = governing;

    debug!(
        label = %input.label,
        governing = %governing_shear_mode,
        violations = applicability_violations.len(),
        "Thin-gauge connection check complete"
    );

    Ok(ThinGaugeResult {
        label: input.label.clone(),
        d_mm: engine.d_mm,
        d_0_mm: engine.d_0_mm,
        a_s_mm2: engine.a_s_mm2,
        grade: engine.grade,
        t_mm,
        f_u,
        gamma_m2: gammas.gamma_m2,
        f_yb: engine.bolt_yield_strength(),
        f_ub: engine.bolt_ultimate_strength(),
        e_1_min_mm: validity_ranges.e_1_min(),
        e_2_min_mm: validity_ranges.e_2_min(),
        p_1_min_mm: validity_ranges.p_1_min(),
        p_2_min_mm: validity_ranges.p_2_min(),
        validity_ranges,
        applicability_violations,
        alpha_b: engine.coefficient_alpha_b()?,
        k_t: engine.coefficient_kt(),
        bearing_resistance_n: f_b_rd,
        net_area_mm2: engine.net_area()?,
        u_mm: engine.coefficient_u()?,
        net_section,
        selected_net_section_n,
        shear_resistance_n: f_v_rd,
        tension_resistance_n: f_t_rd,
        governing_shear_mode,
        governing_shear_resistance_n,
        shear_utilization: input.shear_load_n.map(|v| v / governing_shear_resistance_n),
        tension_utilization: input.tension_load_n.map(|v| v / f_t_rd),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m12_sheet(t_mm: f64) -> ThinGaugeBoltResistance {
        ThinGaugeBoltResistance::new(12.0, 84.3, BoltGrade::Grade88, 13.0, t_mm, 360.0, 1.25).unwrap()
    }

    #[test]
    fn test_constructor_validation() {
        assert!(ThinGaugeBoltResistance::new(12.0, 84.3, BoltGrade::Grade88, 13.0, 0.4, 360.0, 1.25).is_err());
        assert!(ThinGaugeBoltResistance::new(12.0, 84.3, BoltGrade::Grade88, 13.0, 0.5, 360.0, 1.25).is_ok());
        assert!(ThinGaugeBoltResistance::new(12.0, 84.3, BoltGrade::Grade88, 0.0, 1.0, 360.0, 1.25).is_err());
        assert!(ThinGaugeBoltResistance::new(12.0, 84.3, BoltGrade::Grade88, 13.0, 1.0, 360.0, 0.0).is_err());
        // Hole no larger than the bolt, or A_s above the gross area
        let err = ThinGaugeBoltResistance::new(12.0, 84.3, BoltGrade::Grade88, 10.0, 1.0, 360.0, 1.25).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(ThinGaugeBoltResistance::new(12.0, 84.3, BoltGrade::Grade88, 12.0, 1.0, 360.0, 1.25).is_err());
        assert!(ThinGaugeBoltResistance::new(12.0, 200.0, BoltGrade::Grade88, 13.0, 1.0, 360.0, 1.25).is_err());
        let err = ThinGaugeBoltResistance::with_grade_str(12.0, 84.3, "7.7", 13.0, 1.0, 360.0, 1.25).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GRADE");
    }

    #[test]
    fn test_alpha_b_uses_validity_floor() {
        // e_1 = d_0 = 13, α_b = 13 / 36
        let engine = m12_sheet(1.0);
        assert!((engine.coefficient_alpha_b().unwrap() - 13.0 / 36.0).abs() < 1e-12);
    }

    #[test]
    fn test_kt_piecewise() {
        assert!((m12_sheet(0.5).coefficient_kt() - 0.76).abs() < 1e-12);
        assert!((m12_sheet(1.0).coefficient_kt() - 0.92).abs() < 1e-12);
        assert!((m12_sheet(1.25).coefficient_kt() - 1.0).abs() < 1e-12);
        assert_eq!(m12_sheet(2.0).coefficient_kt(), 1.0);
    }

    #[test]
    fn test_bearing_resistance() {
        let engine = m12_sheet(1.0);
        let expected = 2.5 * (13.0 / 36.0) * 0.92 * 360.0 * 12.0 * 1.0 / 1.25;
        assert!((engine.bearing_resistance().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_net_section_r1_d0_12_manual() {
        let engine = ThinGaugeBoltResistance::new(10.0, 58.0, BoltGrade::Grade88, 12.0, 1.5, 360.0, 1.25).unwrap();
        let e_2 = 1.5 * 12.0;
        let p_2 = 3.0 * 12.0;
        let u = (2.0f64 * e_2).min(p_2);
        let a_net = (p_2 - 12.0) * 1.5;
        let cap = a_net * 360.0 / 1.25;
        let manual = ((1.0 + 3.0 * 1.0 * (12.0 / u - 0.3)) * a_net * 360.0 / 1.25).min(cap);

        let net = engine.net_section_resistance().unwrap();
        let f_n = net.for_ratio(1.0).unwrap();
        assert!(((f_n - manual) / manual).abs() < 1e-6);
        assert_eq!(engine.coefficient_u().unwrap(), u);
        assert!((engine.net_area().unwrap() - a_net).abs() < 1e-12);
    }

    #[test]
    fn test_net_section_capped() {
        let net = m12_sheet(1.0).net_section_resistance().unwrap();
        assert_eq!(net.entries().count(), 4);
        for (_, f_n) in net.entries() {
            assert!(f_n <= net.cap_n);
        }
        // d_0/u = 1/3 > 0.3, so every ratio overshoots and hits the cap
        assert_eq!(net.for_ratio(2.0).unwrap(), net.cap_n);
        assert!(net.for_ratio(1.0 / 3.0).is_ok());
        assert!(net.for_ratio(0.75).is_err());
    }

    #[test]
    fn test_shear_and_tension_by_grade() {
        let ductile = m12_sheet(1.0);
        assert!((ductile.shear_resistance() - 0.6 * 800.0 * 84.3 / 1.25).abs() < 1e-9);
        assert!((ductile.tension_resistance() - 0.9 * 800.0 * 84.3 / 1.25).abs() < 1e-9);
        assert_eq!(ductile.bolt_yield_strength(), 640.0);

        let brittle = ThinGaugeBoltResistance::new(12.0, 84.3, BoltGrade::Grade109, 13.0, 1.0, 360.0, 1.25).unwrap();
        assert!((brittle.shear_resistance() - 0.5 * 1000.0 * 84.3 / 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_sheet_connection() {
        let gammas = PartialSafetyFactors::builtin().unwrap();
        let mut input = ThinGaugeInput::new("M12", BoltGrade::Grade88, "S350GD", 1.5);
        input.net_section_ratio = Some(1.0);
        input.shear_load_n = Some(2_000.0);
        let result = calculate(&input, &gammas).unwrap();

        assert_eq!(result.f_u, 420.0);
        assert_eq!(result.d_0_mm, 13.0);
        assert_eq!(result.e_2_min_mm, 19.5);
        assert!(result.applicability_violations.is_empty());
        assert!(result.selected_net_section_n.is_some());
        assert!(result.governing_shear_resistance_n <= result.shear_resistance_n);
        assert!(result.passes());
    }

    #[test]
    fn test_calculate_catalogue_sheet_passes() {
        let gammas = PartialSafetyFactors::builtin().unwrap();
        let input = ThinGaugeInput::new("M12", BoltGrade::Grade88, "S280GD", 0.5);
        let result = calculate(&input, &gammas).unwrap();
        assert!((result.k_t - 0.76).abs() < 1e-12);
        assert_eq!(
            result.applicability_violations,
            vec![ApplicabilityViolation::CatalogueSheet { t_mm: 0.5 }]
        );
        assert!(result.passes());
    }

    #[test]
    fn test_calculate_outside_validity_range() {
        let gammas = PartialSafetyFactors::builtin().unwrap();
        let mut input = ThinGaugeInput::new("M12", BoltGrade::Grade88, "S280GD", 1.0);
        input.sheet = SheetSpec::Explicit { t_mm: 1.0, f_u: 600.0 };
        let result = calculate(&input, &gammas).unwrap();
        assert_eq!(
            result.applicability_violations,
            vec![ApplicabilityViolation::UltimateStrengthTooHigh { f_u: 600.0 }]
        );
        assert!(!result.passes());
    }

    #[test]
    fn test_calculate_bad_ratio() {
        let gammas = PartialSafetyFactors::builtin().unwrap();
        let mut input = ThinGaugeInput::new("M12", BoltGrade::Grade88, "S280GD", 1.0);
        input.net_section_ratio = Some(4.0);
        assert_eq!(calculate(&input, &gammas).unwrap_err().error_code(), "INVALID_INPUT");
        input.net_section_ratio = None;
        input.sheet = SheetSpec::Grade {
            grade: "S999GD".to_string(),
            t_mm: 1.0,
        };
        assert_eq!(calculate(&input, &gammas).unwrap_err().error_code(), "NOT_FOUND");
    }
}
