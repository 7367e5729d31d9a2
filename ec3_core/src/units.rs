//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by EN 1993. These are plain f64
//! newtypes that serialize as bare numbers.
//!
//! ## SI Units (Eurocode convention)
//!
//! - Length: millimetres (mm)
//! - Area: square millimetres (mm²)
//! - Force: newtons (N), kilonewtons (kN) for display
//! - Stress: newtons per square millimetre (N/mm² = MPa)
//!
//! Calculations work in mm, N and N/mm² throughout. The only conversion
//! provided is N ↔ kN for reporting.
//!
//! ## Example
//!
//! ```rust
//! use ec3_core::units::{Kilonewtons, Newtons};
//!
//! let f_v_rd = Newtons(94_080.0);
//! let kn: Kilonewtons = f_v_rd.into();
//! assert!((kn.0 - 94.08).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Mul;

// ============================================================================
// Length and Area
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Area in square millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMillimeters(pub f64);

impl Mul for Millimeters {
    type Output = SqMillimeters;
    fn mul(self, rhs: Self) -> Self::Output {
        SqMillimeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons (1 kN = 1000 N)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / 1000.0)
    }
}

impl From<Kilonewtons> for Newtons {
    fn from(kn: Kilonewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in N/mm² (numerically equal to MPa)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NPerMm2(pub f64);

/// Stress acting over an area gives a force: N/mm² × mm² = N
impl Mul<SqMillimeters> for NPerMm2 {
    type Output = Newtons;
    fn mul(self, rhs: SqMillimeters) -> Self::Output {
        Newtons(self.0 * rhs.0)
    }
}

// ============================================================================
// Raw Values
// ============================================================================

macro_rules! impl_value {
    ($($type:ty),*) => {
        $(
            impl $type {
                /// Get the raw f64 value
                pub fn value(self) -> f64 {
                    self.0
                }
            }
        )*
    };
}

impl_value!(Millimeters, SqMillimeters, Newtons, Kilonewtons, NPerMm2);
