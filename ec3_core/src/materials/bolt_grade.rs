//! Bolt Property Classes (EN 1993-1-8 Table 3.1)
//!
//! Nominal yield strength f_yb and ultimate tensile strength f_ub of bolts.
//! The ISO 898-1 designation "n1.n2" encodes both values:
//!
//! ```text
//! f_ub = n1 × 100        N/mm²
//! f_yb = n1 × n2 × 10    N/mm²
//! ```
//!
//! Grades are an enum, so an unrecognized designation can only appear at the
//! parsing boundary, where it fails with [`CalcError::InvalidGrade`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{CalcError, CalcResult};

/// Bolt property class per EN 1993-1-8 Table 3.1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoltGrade {
    #[serde(rename = "4.6")]
    Grade46,
    #[serde(rename = "4.8")]
    Grade48,
    #[serde(rename = "5.6")]
    Grade56,
    #[serde(rename = "5.8")]
    Grade58,
    #[serde(rename = "6.8")]
    Grade68,
    #[serde(rename = "8.8")]
    Grade88,
    #[serde(rename = "10.9")]
    Grade109,
}

/// Nominal bolt strengths (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoltStrength {
    /// Yield strength f_yb (N/mm²)
    pub f_yb: f64,
    /// Ultimate tensile strength f_ub (N/mm²)
    pub f_ub: f64,
}

impl BoltGrade {
    /// All bolt grades for iteration and UI selection
    pub const ALL: [BoltGrade; 7] = [
        BoltGrade::Grade46,
        BoltGrade::Grade48,
        BoltGrade::Grade56,
        BoltGrade::Grade58,
        BoltGrade::Grade68,
        BoltGrade::Grade88,
        BoltGrade::Grade109,
    ];

    /// Designation digits (n1, n2)
    pub const fn parts(&self) -> (u32, u32) {
        match self {
            BoltGrade::Grade46 => (4, 6),
            BoltGrade::Grade48 => (4, 8),
            BoltGrade::Grade56 => (5, 6),
            BoltGrade::Grade58 => (5, 8),
            BoltGrade::Grade68 => (6, 8),
            BoltGrade::Grade88 => (8, 8),
            BoltGrade::Grade109 => (10, 9),
        }
    }

    /// Designation string (e.g., "8.8")
    pub fn code(&self) -> &'static str {
        match self {
            BoltGrade::Grade46 => "4.6",
            BoltGrade::Grade48 => "4.8",
            BoltGrade::Grade56 => "5.6",
            BoltGrade::Grade58 => "5.8",
            BoltGrade::Grade68 => "6.8",
            BoltGrade::Grade88 => "8.8",
            BoltGrade::Grade109 => "10.9",
        }
    }

    /// Yield strength f_yb = n1·n2·10 (N/mm²)
    pub fn f_yb(&self) -> f64 {
        let (n1, n2) = self.parts();
        (n1 * n2 * 10) as f64
    }

    /// Ultimate tensile strength f_ub = n1·100 (N/mm²)
    pub fn f_ub(&self) -> f64 {
        let (n1, _) = self.parts();
        (n1 * 100) as f64
    }

    /// Both nominal strengths
    pub fn strength(&self) -> BoltStrength {
        BoltStrength {
            f_yb: self.f_yb(),
            f_ub: self.f_ub(),
        }
    }

    /// Grades whose shear plane through the thread takes α_v = 0.6.
    ///
    /// The remaining classes (4.8, 5.8, 6.8, 10.9) take α_v = 0.5.
    pub fn is_ductile_class(&self) -> bool {
        matches!(
            self,
            BoltGrade::Grade46 | BoltGrade::Grade56 | BoltGrade::Grade88
        )
    }

    /// Parse a "n1.n2" designation.
    ///
    /// Accepts surrounding whitespace, a comma decimal separator ("8,8"), and
    /// an optional "class"/"grade" prefix. Anything else is rejected.
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let cleaned = s.trim().to_lowercase();
        let cleaned = cleaned
            .trim_start_matches("class")
            .trim_start_matches("grade")
            .trim()
            .replace(',', ".");

        let (n1, n2) = cleaned
            .split_once('.')
            .and_then(|(a, b)| Some((a.parse::<u32>().ok()?, b.parse::<u32>().ok()?)))
            .ok_or_else(|| CalcError::invalid_grade(s, Self::expected_list()))?;

        Self::ALL
            .into_iter()
            .find(|g| g.parts() == (n1, n2))
            .ok_or_else(|| CalcError::invalid_grade(s, Self::expected_list()))
    }

    /// Comma-separated list of valid designations, for error messages
    pub fn expected_list() -> String {
        Self::ALL
            .iter()
            .map(|g| g.code())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Get display name
    pub fn display_name(&self) -> String {
        format!("Class {}", self.code())
    }
}

impl FromStr for BoltGrade {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_flexible(s)
    }
}

impl std::fmt::Display for BoltGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_88_strengths() {
        assert_eq!(BoltGrade::Grade88.f_yb(), 640.0);
        assert_eq!(BoltGrade::Grade88.f_ub(), 800.0);
    }

    #[test]
    fn test_table_3_1_values() {
        let expected = [
            (BoltGrade::Grade46, 240.0, 400.0),
            (BoltGrade::Grade48, 320.0, 400.0),
            (BoltGrade::Grade56, 300.0, 500.0),
            (BoltGrade::Grade58, 400.0, 500.0),
            (BoltGrade::Grade68, 480.0, 600.0),
            (BoltGrade::Grade88, 640.0, 800.0),
            (BoltGrade::Grade109, 900.0, 1000.0),
        ];
        for (grade, f_yb, f_ub) in expected {
            assert_eq!(grade.f_yb(), f_yb, "f_yb for {}", grade);
            assert_eq!(grade.f_ub(), f_ub, "f_ub for {}", grade);
        }
    }

    #[test]
    fn test_parsing() {
        assert_eq!(BoltGrade::from_str_flexible("8.8").unwrap(), BoltGrade::Grade88);
        assert_eq!(BoltGrade::from_str_flexible(" 10.9 ").unwrap(), BoltGrade::Grade109);
        assert_eq!(BoltGrade::from_str_flexible("4,6").unwrap(), BoltGrade::Grade46);
        assert_eq!(BoltGrade::from_str_flexible("Class 5.8").unwrap(), BoltGrade::Grade58);
        assert_eq!("6.8".parse::<BoltGrade>().unwrap(), BoltGrade::Grade68);
    }

    #[test]
    fn test_invalid_grades() {
        for bad in ["9.9", "8", "8.8.8", "", "abc", "12.9", "8.x"] {
            let err = BoltGrade::from_str_flexible(bad).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_GRADE", "input {:?}", bad);
        }
    }

    #[test]
    fn test_ductile_classes() {
        let ductile: Vec<_> = BoltGrade::ALL.iter().filter(|g| g.is_ductile_class()).collect();
        assert_eq!(ductile, vec![&BoltGrade::Grade46, &BoltGrade::Grade56, &BoltGrade::Grade88]);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&BoltGrade::Grade109).unwrap();
        assert_eq!(json, "\"10.9\"");
        let parsed: BoltGrade = serde_json::from_str("\"4.8\"").unwrap();
        assert_eq!(parsed, BoltGrade::Grade48);
    }
}
