//! # Reference Data
//!
//! Read-only lookup tables behind every design check:
//!
//! - steel grade + thickness → (f_y, f_u)
//! - bolt grade → (f_yb, f_ub)
//! - bolt metric + hole type → (d, d_0, A, A_s)
//!
//! The built-in tables are embedded TOML (`data/*.toml`), parsed once per
//! process on first access and shared immutably afterwards. A lookup miss is
//! always an error ([`CalcError::NotFound`]), never a default.
//!
//! ## Example
//!
//! ```rust
//! use ec3_core::reference_data::ReferenceData;
//!
//! let data = ReferenceData::builtin().unwrap();
//! let s275 = data.lookup_steel("S275", 15.0).unwrap();
//! assert_eq!((s275.f_y, s275.f_u), (275.0, 430.0));
//!
//! let m20 = data.lookup_bolt_metric_normal("M20").unwrap();
//! assert_eq!(m20.d_0_mm, 22.0);
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::info;

use crate::errors::{CalcError, CalcResult};
use crate::materials::{
    normalize_metric, normalize_steel_grade, BoltGeometry, BoltGrade, BoltMetricData, BoltStrength,
    HoleType, SheetSteelData, SteelGradeData, SteelStrength,
};

const STEEL_GRADES_TOML: &str = include_str!("../data/steel_grades.toml");
const BOLT_METRICS_TOML: &str = include_str!("../data/bolt_metrics.toml");

static BUILTIN: Lazy<CalcResult<ReferenceData>> = Lazy::new(|| {
    let data = ReferenceData::from_toml_str(STEEL_GRADES_TOML, BOLT_METRICS_TOML);
    if let Ok(ref tables) = data {
        info!(
            steel_grades = tables.hot_rolled.len(),
            sheet_steels = tables.sheet.len(),
            bolt_metrics = tables.metrics.len(),
            "Loaded built-in reference tables"
        );
    }
    data
});

#[derive(Debug, Deserialize)]
struct SteelTablesFile {
    hot_rolled: Vec<SteelGradeData>,
    #[serde(default)]
    sheet: Vec<SheetSteelData>,
}

#[derive(Debug, Deserialize)]
struct MetricTableFile {
    metric: Vec<BoltMetricData>,
}

/// Indexed, immutable reference tables
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    hot_rolled: Vec<SteelGradeData>,
    sheet: Vec<SheetSteelData>,
    metrics: Vec<BoltMetricData>,

    /// Normalized name → index into the vectors above
    hot_rolled_index: HashMap<String, usize>,
    sheet_index: HashMap<String, usize>,
    metric_index: HashMap<String, usize>,
}

impl ReferenceData {
    /// Process-wide built-in tables (loaded on first call).
    pub fn builtin() -> CalcResult<&'static ReferenceData> {
        match &*BUILTIN {
            Ok(data) => Ok(data),
            Err(e) => Err(e.clone()),
        }
    }

    /// Build tables from TOML documents with the same layout as the built-in
    /// `steel_grades.toml` and `bolt_metrics.toml`.
    pub fn from_toml_str(steel_toml: &str, metrics_toml: &str) -> CalcResult<Self> {
        let steel: SteelTablesFile = toml::from_str(steel_toml)?;
        let metrics: MetricTableFile = toml::from_str(metrics_toml)?;

        let mut data = ReferenceData::default();
        for grade in steel.hot_rolled {
            for value in [grade.f_y_40, grade.f_u_40, grade.f_y_80, grade.f_u_80] {
                check_table_value("hot_rolled", &grade.name, value)?;
            }
            let key = normalize_steel_grade(&grade.name);
            insert_unique(&mut data.hot_rolled_index, key, data.hot_rolled.len(), "hot_rolled")?;
            data.hot_rolled.push(grade);
        }
        for grade in steel.sheet {
            check_table_value("sheet", &grade.name, grade.f_yb)?;
            check_table_value("sheet", &grade.name, grade.f_u)?;
            let key = normalize_sheet_grade(&grade.name);
            insert_unique(&mut data.sheet_index, key, data.sheet.len(), "sheet")?;
            data.sheet.push(grade);
        }
        for metric in metrics.metric {
            for value in [metric.d_mm, metric.a_s_mm2, metric.s_mm] {
                check_table_value("metric", &metric.designation, value)?;
            }
            let key = normalize_metric(&metric.designation);
            insert_unique(&mut data.metric_index, key, data.metrics.len(), "metric")?;
            data.metrics.push(metric);
        }
        Ok(data)
    }

    // ========================================================================
    // Structural steel
    // ========================================================================

    /// Hot-rolled steel strengths for a grade and nominal thickness
    /// (EN 1993-1-1 Table 3.1).
    pub fn lookup_steel(&self, grade: &str, t_mm: f64) -> CalcResult<SteelStrength> {
        let key = normalize_steel_grade(grade);
        let idx = self
            .hot_rolled_index
            .get(&key)
            .ok_or_else(|| CalcError::not_found("EN 1993-1-1 Table 3.1 steel grades", grade))?;
        self.hot_rolled[*idx].strength(t_mm)
    }

    /// Thin-gauge sheet steel strengths (EN 1993-1-3 Table 3.1a)
    pub fn lookup_sheet_steel(&self, grade: &str) -> CalcResult<SteelStrength> {
        let key = normalize_sheet_grade(grade);
        self.sheet_index
            .get(&key)
            .map(|idx| self.sheet[*idx].strength())
            .ok_or_else(|| CalcError::not_found("EN 1993-1-3 Table 3.1a sheet steels", grade))
    }

    /// All hot-rolled grades in table order
    pub fn steel_grades(&self) -> &[SteelGradeData] {
        &self.hot_rolled
    }

    /// All sheet steel grades in table order
    pub fn sheet_steels(&self) -> &[SheetSteelData] {
        &self.sheet
    }

    // ========================================================================
    // Bolts
    // ========================================================================

    /// Nominal bolt strengths for a grade designation (EN 1993-1-8 Table 3.1)
    pub fn lookup_bolt_grade_limits(&self, grade: &str) -> CalcResult<BoltStrength> {
        Ok(BoltGrade::from_str_flexible(grade)?.strength())
    }

    /// All bolt grades
    pub fn bolt_grades(&self) -> &'static [BoltGrade] {
        &BoltGrade::ALL
    }

    /// Raw dimension row for a metric designation
    pub fn bolt_metric(&self, metric: &str) -> CalcResult<&BoltMetricData> {
        let key = normalize_metric(metric);
        self.metric_index
            .get(&key)
            .map(|idx| &self.metrics[*idx])
            .ok_or_else(|| CalcError::not_found("bolt metrics", metric))
    }

    /// Bolt geometry (d, d_0, A, A_s) for a metric and hole type
    pub fn lookup_bolt_metric(&self, metric: &str, hole: HoleType) -> CalcResult<BoltGeometry> {
        self.bolt_metric(metric)?.geometry(hole)
    }

    /// Bolt geometry in normal round holes
    pub fn lookup_bolt_metric_normal(&self, metric: &str) -> CalcResult<BoltGeometry> {
        self.lookup_bolt_metric(metric, HoleType::Normal)
    }

    /// Hexagon width across flats s (mm)
    pub fn across_flats(&self, metric: &str) -> CalcResult<f64> {
        Ok(self.bolt_metric(metric)?.s_mm)
    }

    /// All bolt metrics in table order
    pub fn bolt_metrics(&self) -> &[BoltMetricData] {
        &self.metrics
    }
}

/// Sheet grades are compared without whitespace, uppercase ("s280 gd" → "S280GD")
fn normalize_sheet_grade(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

fn check_table_value(table: &str, row: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::serialization(format!(
            "Table '{}' row '{}' has non-positive value {}",
            table, row, value
        )));
    }
    Ok(())
}

fn insert_unique(index: &mut HashMap<String, usize>, key: String, idx: usize, table: &str) -> CalcResult<()> {
    if index.contains_key(&key) {
        return Err(CalcError::serialization(format!(
            "Table '{}' has duplicate entry '{}'",
            table, key
        )));
    }
    index.insert(key, idx);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_loads() {
        let data = ReferenceData::builtin().unwrap();
        assert!(data.steel_grades().len() >= 4);
        assert!(data.bolt_metrics().len() >= 10);
        assert_eq!(data.bolt_grades().len(), 7);
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = ReferenceData::builtin().unwrap() as *const ReferenceData;
        let b = ReferenceData::builtin().unwrap() as *const ReferenceData;
        assert_eq!(a, b);
    }

    #[test]
    fn test_lookup_steel_bands() {
        let data = ReferenceData::builtin().unwrap();
        let s355 = data.lookup_steel("S 355", 20.0).unwrap();
        assert_eq!((s355.f_y, s355.f_u), (355.0, 510.0));
        let s355_thick = data.lookup_steel("s355", 50.0).unwrap();
        assert_eq!((s355_thick.f_y, s355_thick.f_u), (335.0, 470.0));
        let s235 = data.lookup_steel("S235", 40.0).unwrap();
        assert_eq!((s235.f_y, s235.f_u), (235.0, 360.0));
    }

    #[test]
    fn test_lookup_steel_misses() {
        let data = ReferenceData::builtin().unwrap();
        assert_eq!(data.lookup_steel("S 999", 10.0).unwrap_err().error_code(), "NOT_FOUND");
        assert_eq!(data.lookup_steel("S 275", 120.0).unwrap_err().error_code(), "NOT_FOUND");
        assert_eq!(data.lookup_steel("S 275", -1.0).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_lookup_sheet_steel() {
        let data = ReferenceData::builtin().unwrap();
        let s280 = data.lookup_sheet_steel("s280gd").unwrap();
        assert_eq!((s280.f_y, s280.f_u), (280.0, 360.0));
        assert!(s280.band.is_none());
        assert!(data.lookup_sheet_steel("DX51D").is_err());
    }

    #[test]
    fn test_lookup_bolt_metric() {
        let data = ReferenceData::builtin().unwrap();
        let m20 = data.lookup_bolt_metric_normal("M20").unwrap();
        assert_eq!(m20.d_mm, 20.0);
        assert_eq!(m20.d_0_mm, 22.0);
        assert_eq!(m20.a_s_mm2, 245.0);
        assert!((m20.a_mm2 - 314.16).abs() < 0.01);

        let m24_oversized = data.lookup_bolt_metric("m24", HoleType::Oversized).unwrap();
        assert_eq!(m24_oversized.d_0_mm, 30.0);

        assert_eq!(data.across_flats("M16").unwrap(), 24.0);
        assert_eq!(data.lookup_bolt_metric_normal("M99").unwrap_err().error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_lookup_bolt_grade_limits() {
        let data = ReferenceData::builtin().unwrap();
        let limits = data.lookup_bolt_grade_limits("8.8").unwrap();
        assert_eq!((limits.f_yb, limits.f_ub), (640.0, 800.0));
        assert_eq!(data.lookup_bolt_grade_limits("7.7").unwrap_err().error_code(), "INVALID_GRADE");
    }

    #[test]
    fn test_custom_tables() {
        let steel = r#"
            [[hot_rolled]]
            name = "S 420"
            standard = "EN 10025-4"
            f_y_40 = 420.0
            f_u_40 = 520.0
            f_y_80 = 390.0
            f_u_80 = 500.0
        "#;
        let metrics = r#"
            [[metric]]
            designation = "M16"
            d_mm = 16.0
            pitch_mm = 2.0
            a_s_mm2 = 157.0
            s_mm = 24.0
        "#;
        let data = ReferenceData::from_toml_str(steel, metrics).unwrap();
        assert_eq!(data.lookup_steel("S420", 10.0).unwrap().f_u, 520.0);
        assert!(data.lookup_steel("S 235", 10.0).is_err());
        assert!(data.sheet_steels().is_empty());
    }

    #[test]
    fn test_rejects_duplicate_rows() {
        let metrics = r#"
            [[metric]]
            designation = "M16"
            d_mm = 16.0
            pitch_mm = 2.0
            a_s_mm2 = 157.0
            s_mm = 24.0

            [[metric]]
            designation = "m16"
            d_mm = 16.0
            pitch_mm = 2.0
            a_s_mm2 = 157.0
            s_mm = 24.0
        "#;
        let err = ReferenceData::from_toml_str("hot_rolled = []", metrics).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = ReferenceData::from_toml_str("not = [valid", "metric = []").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
