//! # Materials
//!
//! Material and fastener definitions for Eurocode 3 connection checks.
//!
//! ## Material Types
//!
//! - **Bolt grades**: Property classes 4.6 … 10.9 (EN 1993-1-8 Table 3.1)
//! - **Bolt metrics**: ISO metric dimensions and hole clearances
//! - **Structural steel**: Plate strengths f_y / f_u (EN 1993-1-1 Table 3.1,
//!   EN 1993-1-3 Table 3.1a)
//!
//! ## Example
//!
//! ```rust
//! use ec3_core::materials::{BoltGrade, BoltGeometry};
//!
//! let grade = BoltGrade::from_str_flexible("8.8").unwrap();
//! assert_eq!(grade.f_ub(), 800.0);
//!
//! let m20 = BoltGeometry::new(20.0, 22.0, 245.0).unwrap();
//! assert!(m20.a_mm2 > m20.a_s_mm2);
//! ```

pub mod bolt_grade;
pub mod bolt_metric;
pub mod structural_steel;

pub use bolt_grade::{BoltGrade, BoltStrength};
pub use bolt_metric::{gross_area, normalize_metric, BoltGeometry, BoltMetricData, HoleType};
pub use structural_steel::{
    normalize_steel_grade, SheetSteelData, SteelGradeData, SteelStrength, ThicknessBand,
};
