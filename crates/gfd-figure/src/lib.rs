//! The GFD figure engine.
//!
//! A [`Figure`] owns one run's canonical arena, property store and RNG.
//! [`construct`] holds the library of closed-form construction functions,
//! [`checks`] the epsilon relation predicates, and [`registry`] the
//! name-indexed tables the evaluator dispatches through, together with
//! the combinatorial probe that records every relation visible in a
//! single construction call.

pub mod checks;
pub mod construct;
pub mod figure;
pub mod kernel;
pub mod registry;

pub use figure::Figure;
pub use registry::{CheckDef, ConstructionDef, ParamKind, Registry};
