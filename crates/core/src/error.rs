// Copyright 2025 Irreducible Inc.

use crate::variable::VariableId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("constraint {name} is not satisfied: evaluates to {value}")]
	ConstraintUnsatisfied { name: String, value: String },

	#[error("computed variable {name} does not match its defining expression")]
	ComputedMismatch { name: String },

	#[error("witness not found for variable {name}")]
	MissingWitness { name: String },

	#[error("witness has {got} entries but the constraint system declares {expected} variables")]
	WitnessSizeMismatch { expected: usize, got: usize },

	#[error("boundary value for {name} does not match the witness")]
	BoundaryMismatch { name: String },

	#[error("boundary {name} does not refer to a public variable")]
	UnknownBoundary { name: String },

	#[error("{name} refers to variable {id}, which is not declared")]
	UnknownVariable { name: String, id: VariableId },

	#[error("constraint {name} has degree {degree}, the maximum is {max}")]
	DegreeTooHigh {
		name: String,
		degree: usize,
		max: usize,
	},

	#[error("math error: {0}")]
	Math(#[from] zkfloat_math::Error),
}
