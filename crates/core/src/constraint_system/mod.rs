// Copyright 2025 Irreducible Inc.

pub mod validate;

use std::fmt;

use itertools::Itertools;
use zkfloat_field::Field;
use zkfloat_math::ArithExpr;
use zkfloat_utils::bail;

use crate::{
	error::Error,
	variable::{Variable, VariableId, VariableKind, VariableSet},
};

/// Largest total degree a constraint may have. Degree-2 constraints translate one-to-one into
/// rank-1 constraints.
pub const MAX_CONSTRAINT_DEGREE: usize = 2;

/// A named polynomial over the variables that must evaluate to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZeroConstraint<F: Field> {
	pub name: String,
	pub expr: ArithExpr<F>,
}

/// A claimed value for a public variable, identified by its full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary<F: Field> {
	pub name: String,
	pub value: F,
}

/// Contains everything that places constraints on witness data:
/// - the declared variables, including the defining expressions of computed variables
/// - the zero constraints
/// - the set of public variables a verifier may state boundaries for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSystem<F: Field> {
	pub variables: VariableSet<F>,
	pub constraints: Vec<ZeroConstraint<F>>,
	pub public: Vec<VariableId>,
}

impl<F: Field> ConstraintSystem<F> {
	pub fn public_variables(&self) -> impl Iterator<Item = &Variable<F>> + '_ {
		self.public
			.iter()
			.filter_map(|&id| self.variables.get(id))
	}

	/// Checks that every constraint only mentions declared variables and stays within
	/// [`MAX_CONSTRAINT_DEGREE`], and that computed variables only depend on earlier ones.
	pub fn check_shape(&self) -> Result<(), Error> {
		let n_vars = self.variables.len();

		for var in self.variables.iter() {
			if let VariableKind::Computed { expr } = &var.kind {
				if let Some(id) = expr.vars().into_iter().find(|&id| id >= var.id) {
					bail!(Error::UnknownVariable {
						name: var.name.clone(),
						id,
					});
				}
			}
		}

		for constraint in &self.constraints {
			if let Some(id) = constraint.expr.vars().into_iter().find(|&id| id >= n_vars) {
				bail!(Error::UnknownVariable {
					name: constraint.name.clone(),
					id,
				});
			}
			let degree = constraint.expr.degree();
			if degree > MAX_CONSTRAINT_DEGREE {
				bail!(Error::DegreeTooHigh {
					name: constraint.name.clone(),
					degree,
					max: MAX_CONSTRAINT_DEGREE,
				});
			}
		}

		if let Some(&id) = self.public.iter().find(|&&id| id >= n_vars) {
			bail!(Error::UnknownVariable {
				name: "public outputs".to_string(),
				id,
			});
		}

		Ok(())
	}

	pub fn stats(&self) -> ConstraintSystemStats {
		let kinds = self
			.variables
			.iter()
			.map(|var| match var.kind {
				VariableKind::PublicInput => "public",
				VariableKind::PrivateInput => "private",
				VariableKind::Hint => "hint",
				VariableKind::Computed { .. } => "computed",
			})
			.counts();
		let count = |kind: &str| kinds.get(kind).copied().unwrap_or(0);

		ConstraintSystemStats {
			n_public_inputs: count("public"),
			n_private_inputs: count("private"),
			n_hints: count("hint"),
			n_computed: count("computed"),
			n_constraints: self.constraints.len(),
			n_public: self.public.len(),
			max_degree: self
				.constraints
				.iter()
				.map(|constraint| constraint.expr.degree())
				.max()
				.unwrap_or(0),
		}
	}
}

/// Size summary of a [`ConstraintSystem`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintSystemStats {
	pub n_public_inputs: usize,
	pub n_private_inputs: usize,
	pub n_hints: usize,
	pub n_computed: usize,
	pub n_constraints: usize,
	pub n_public: usize,
	pub max_degree: usize,
}

impl ConstraintSystemStats {
	pub const fn n_variables(&self) -> usize {
		self.n_public_inputs + self.n_private_inputs + self.n_hints + self.n_computed
	}
}

impl fmt::Display for ConstraintSystemStats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(
			f,
			"variables: {} ({} public inputs, {} private inputs, {} hints, {} computed)",
			self.n_variables(),
			self.n_public_inputs,
			self.n_private_inputs,
			self.n_hints,
			self.n_computed,
		)?;
		writeln!(f, "constraints: {} (max degree {})", self.n_constraints, self.max_degree)?;
		write!(f, "public values: {}", self.n_public)
	}
}
