//! # ec3_core - Eurocode 3 Connection Design Engine
//!
//! `ec3_core` computes the design resistances of bolted steel connections to
//! EN 1993-1-1, EN 1993-1-3 and EN 1993-1-8. All inputs and outputs are
//! JSON-serializable, so checks can be driven from files, a CLI, or another
//! program.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **SI Units**: mm, N and N/mm² throughout
//!
//! ## Quick Start
//!
//! ```rust
//! use ec3_core::calculations::bolt_resistance::{calculate, BoltedConnectionInput};
//! use ec3_core::materials::BoltGrade;
//! use ec3_core::safety_factors::PartialSafetyFactors;
//!
//! let gammas = PartialSafetyFactors::builtin().unwrap();
//! let input = BoltedConnectionInput::new("M20", BoltGrade::Grade88, "S275", 15.0);
//! let result = calculate(&input, &gammas).unwrap();
//!
//! assert!((result.shear_resistance_n - 94_080.0).abs() < 1e-6);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Bolt resistance engines and layout limits
//! - [`materials`] - Bolt grades, bolt dimensions, steel strengths
//! - [`reference_data`] - Built-in lookup tables
//! - [`safety_factors`] - Partial factors γ_M
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod materials;
pub mod reference_data;
pub mod safety_factors;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CheckOutcome, ConnectionCheck};
pub use errors::{CalcError, CalcResult};
pub use reference_data::ReferenceData;
pub use safety_factors::PartialSafetyFactors;
