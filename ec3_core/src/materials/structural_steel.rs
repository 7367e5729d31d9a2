//! Structural Steel Strengths (EN 1993-1-1 Table 3.1, EN 1993-1-3 Table 3.1a)
//!
//! Nominal yield strength f_y and ultimate tensile strength f_u for hot-rolled
//! structural steel, selected by nominal thickness band:
//!
//! | Band              | Range              |
//! |-------------------|--------------------|
//! | `UpTo40`          | t ≤ 40 mm          |
//! | `Over40UpTo80`    | 40 mm < t ≤ 80 mm  |
//!
//! Thin-gauge sheet steels used by EN 1993-1-3 carry a single basic yield and
//! ultimate strength independent of thickness.
//!
//! The strength tables live in `data/steel_grades.toml`.

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};

/// Nominal thickness band of EN 1993-1-1 Table 3.1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThicknessBand {
    /// t ≤ 40 mm
    UpTo40,
    /// 40 mm < t ≤ 80 mm
    Over40UpTo80,
}

impl ThicknessBand {
    /// Largest nominal thickness covered by the table (mm)
    pub const MAX_THICKNESS_MM: f64 = 80.0;

    /// Select the band for a nominal thickness.
    ///
    /// Fails with InvalidInput for t ≤ 0 and NotFound beyond 80 mm.
    pub fn for_thickness(t_mm: f64) -> CalcResult<Self> {
        require_positive("t_mm", t_mm)?;
        if t_mm <= 40.0 {
            Ok(ThicknessBand::UpTo40)
        } else if t_mm <= Self::MAX_THICKNESS_MM {
            Ok(ThicknessBand::Over40UpTo80)
        } else {
            Err(CalcError::not_found(
                "EN 1993-1-1 Table 3.1 thickness bands",
                format!("t = {} mm (covered up to 80 mm)", t_mm),
            ))
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ThicknessBand::UpTo40 => "t ≤ 40 mm",
            ThicknessBand::Over40UpTo80 => "40 mm < t ≤ 80 mm",
        }
    }
}

impl std::fmt::Display for ThicknessBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Row of the hot-rolled steel table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelGradeData {
    /// Grade name (e.g., "S 355")
    pub name: String,
    /// Product standard (e.g., "EN 10025-2")
    pub standard: String,
    /// f_y for t ≤ 40 mm (N/mm²)
    pub f_y_40: f64,
    /// f_u for t ≤ 40 mm (N/mm²)
    pub f_u_40: f64,
    /// f_y for 40 < t ≤ 80 mm (N/mm²)
    pub f_y_80: f64,
    /// f_u for 40 < t ≤ 80 mm (N/mm²)
    pub f_u_80: f64,
}

impl SteelGradeData {
    /// Strengths for a nominal thickness
    pub fn strength(&self, t_mm: f64) -> CalcResult<SteelStrength> {
        let band = ThicknessBand::for_thickness(t_mm)?;
        let (f_y, f_u) = match band {
            ThicknessBand::UpTo40 => (self.f_y_40, self.f_u_40),
            ThicknessBand::Over40UpTo80 => (self.f_y_80, self.f_u_80),
        };
        Ok(SteelStrength {
            grade: self.name.clone(),
            band: Some(band),
            f_y,
            f_u,
        })
    }
}

/// Row of the thin-gauge sheet steel table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSteelData {
    /// Grade name (e.g., "S280GD")
    pub name: String,
    /// Product standard (e.g., "EN 10346")
    pub standard: String,
    /// Basic yield strength f_yb (N/mm²)
    pub f_yb: f64,
    /// Ultimate tensile strength f_u (N/mm²)
    pub f_u: f64,
}

impl SheetSteelData {
    /// Strengths (no thickness dependence)
    pub fn strength(&self) -> SteelStrength {
        SteelStrength {
            grade: self.name.clone(),
            band: None,
            f_y: self.f_yb,
            f_u: self.f_u,
        }
    }
}

/// Resolved plate strengths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelStrength {
    /// Grade name
    pub grade: String,
    /// Thickness band used (None for sheet steels)
    pub band: Option<ThicknessBand>,
    /// Yield strength f_y (N/mm²)
    pub f_y: f64,
    /// Ultimate tensile strength f_u (N/mm²)
    pub f_u: f64,
}

/// Normalize a hot-rolled grade name to the "S 355" table form.
///
/// "S355", "s 355", "S-355" all map to "S 355"; weathering grades keep their
/// suffix ("S355W" → "S 355 W").
pub fn normalize_steel_grade(s: &str) -> String {
    let compact: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase();
    let body = compact.strip_prefix('S').unwrap_or(&compact);
    let digits: String = body.chars().take_while(|c| c.is_ascii_digit()).collect();
    let suffix = &body[digits.len()..];
    if suffix.is_empty() {
        format!("S {}", digits)
    } else {
        format!("S {} {}", digits, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s275() -> SteelGradeData {
        SteelGradeData {
            name: "S 275".to_string(),
            standard: "EN 10025-2".to_string(),
            f_y_40: 275.0,
            f_u_40: 430.0,
            f_y_80: 255.0,
            f_u_80: 410.0,
        }
    }

    #[test]
    fn test_thickness_bands() {
        assert_eq!(ThicknessBand::for_thickness(10.0).unwrap(), ThicknessBand::UpTo40);
        assert_eq!(ThicknessBand::for_thickness(40.0).unwrap(), ThicknessBand::UpTo40);
        assert_eq!(ThicknessBand::for_thickness(40.5).unwrap(), ThicknessBand::Over40UpTo80);
        assert_eq!(ThicknessBand::for_thickness(80.0).unwrap(), ThicknessBand::Over40UpTo80);
    }

    #[test]
    fn test_thickness_outside_table() {
        assert_eq!(ThicknessBand::for_thickness(0.0).unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(ThicknessBand::for_thickness(100.0).unwrap_err().error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_strength_by_band() {
        let grade = s275();
        let thin = grade.strength(15.0).unwrap();
        assert_eq!((thin.f_y, thin.f_u), (275.0, 430.0));
        let thick = grade.strength(60.0).unwrap();
        assert_eq!((thick.f_y, thick.f_u), (255.0, 410.0));
        assert_eq!(thick.band, Some(ThicknessBand::Over40UpTo80));
    }

    #[test]
    fn test_normalize_steel_grade() {
        assert_eq!(normalize_steel_grade("S355"), "S 355");
        assert_eq!(normalize_steel_grade("s 235"), "S 235");
        assert_eq!(normalize_steel_grade("S-275"), "S 275");
        assert_eq!(normalize_steel_grade("S355W"), "S 355 W");
        assert_eq!(normalize_steel_grade("S 355 W"), "S 355 W");
    }
}
