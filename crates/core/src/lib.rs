// Copyright 2025 Irreducible Inc.

//! Constraint systems over a prime field.
//!
//! A [`ConstraintSystem`] is a flat list of named variables and named zero constraints over
//! them. A [`WitnessIndex`] assigns one field element to every variable, and
//! [`validate_witness`] is the reference check that an assignment satisfies the system.

pub mod constraint_system;
pub mod error;
pub mod variable;
pub mod witness;

pub use constraint_system::{
	validate::validate_witness, Boundary, ConstraintSystem, ConstraintSystemStats, ZeroConstraint,
	MAX_CONSTRAINT_DEGREE,
};
pub use error::Error;
pub use variable::{Var, Variable, VariableId, VariableKind, VariableSet};
pub use witness::WitnessIndex;
