// Copyright 2024-2025 Irreducible Inc.

use std::{cell::RefCell, rc::Rc};

use anyhow::anyhow;
use tracing::instrument;
use zkfloat_core::{
	ConstraintSystem, Var, VariableKind, VariableSet, WitnessIndex, ZeroConstraint,
};

use crate::builder::{
	types::{Expr, Variable, F},
	witness,
};

#[derive(Default)]
pub struct ConstraintSystemBuilder {
	variables: Rc<RefCell<VariableSet<F>>>,
	constraints: Vec<ZeroConstraint<F>>,
	public: Vec<usize>,
	witness: Option<witness::Builder>,
	namespace_path: Vec<String>,
}

impl ConstraintSystemBuilder {
	/// Creates a builder that only records the constraint system.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a builder that also computes a value for every variable as it is declared.
	pub fn new_with_witness() -> Self {
		let variables = Rc::new(RefCell::new(VariableSet::new()));
		Self {
			witness: Some(witness::Builder::new(variables.clone())),
			variables,
			..Default::default()
		}
	}

	#[instrument(skip_all, level = "debug")]
	pub fn build(self) -> Result<ConstraintSystem<F>, anyhow::Error> {
		let variables = Rc::into_inner(self.variables)
			.ok_or_else(|| {
				anyhow!("Failed to build ConstraintSystem: references still exist to variables")
			})?
			.into_inner();
		let constraint_system = ConstraintSystem {
			variables,
			constraints: self.constraints,
			public: self.public,
		};
		constraint_system.check_shape()?;

		let stats = constraint_system.stats();
		tracing::debug!(
			n_variables = stats.n_variables(),
			n_hints = stats.n_hints,
			n_computed = stats.n_computed,
			n_constraints = stats.n_constraints,
			max_degree = stats.max_degree,
			"built constraint system"
		);
		Ok(constraint_system)
	}

	pub fn witness(&mut self) -> Option<&mut witness::Builder> {
		self.witness.as_mut()
	}

	pub fn take_witness(&mut self) -> Result<WitnessIndex<F>, anyhow::Error> {
		Option::take(&mut self.witness)
			.map(witness::Builder::build)
			.ok_or_else(|| {
				anyhow!(
					"Witness is missing. Are you in verifier mode, or have you already extracted the witness?"
				)
			})
	}

	/// Declares an input that is part of the public statement.
	pub fn add_public_input(&mut self, name: impl ToString) -> Variable {
		let var = self.add_variable(name, VariableKind::PublicInput);
		self.public.push(var.id());
		var
	}

	/// Declares an input known only to the prover.
	pub fn add_private_input(&mut self, name: impl ToString) -> Variable {
		self.add_variable(name, VariableKind::PrivateInput)
	}

	/// Declares a hint. Its value is whatever the witness computation assigns; only constraints
	/// mentioning it restrict it.
	pub fn add_committed(&mut self, name: impl ToString) -> Variable {
		self.add_variable(name, VariableKind::Hint)
	}

	/// Declares a variable defined by `expr` and adds the constraint `var - expr = 0`.
	///
	/// In prover mode the value is computed from the values of the variables `expr` reads, which
	/// must already be assigned.
	pub fn add_computed(
		&mut self,
		name: impl ToString,
		expr: impl Into<Expr>,
	) -> Result<Variable, anyhow::Error> {
		let expr: Expr = expr.into();
		let expr = expr.optimize();
		let var = self.add_variable(name, VariableKind::Computed { expr: expr.clone() });
		if let Some(witness) = self.witness.as_mut() {
			let value = witness.eval(&expr)?;
			witness.set(var, value);
		}
		let name = self.variables.borrow().name(var.id());
		self.constraints.push(ZeroConstraint {
			name,
			expr: (var - expr).optimize(),
		});
		Ok(var)
	}

	/// Adds the constraint `expr = 0`.
	pub fn assert_zero(&mut self, name: impl ToString, expr: impl Into<Expr>) {
		let expr: Expr = expr.into();
		self.constraints.push(ZeroConstraint {
			name: self.scoped_name(name),
			expr: expr.optimize(),
		});
	}

	pub fn assert_equal(&mut self, name: impl ToString, lhs: impl Into<Expr>, rhs: impl Into<Expr>) {
		let lhs: Expr = lhs.into();
		let rhs: Expr = rhs.into();
		self.assert_zero(name, lhs - rhs);
	}

	/// Adds the constraint `var * (1 - var) = 0`.
	pub fn assert_boolean(&mut self, name: impl ToString, var: Variable) {
		self.assert_zero(name, var * (Expr::one() - var));
	}

	/// Marks `var` as a public value a verifier can state a boundary for.
	pub fn expose(&mut self, var: Variable) {
		if !self.public.contains(&var.id()) {
			self.public.push(var.id());
		}
	}

	/// Full name of a declared variable, including the namespace it was declared in.
	pub fn name_of(&self, var: Variable) -> String {
		self.variables.borrow().name(var.id())
	}

	fn add_variable(&mut self, name: impl ToString, kind: VariableKind<F>) -> Variable {
		let name = self.scoped_name(name);
		Var::new(self.variables.borrow_mut().add(name, kind))
	}

	fn scoped_name(&self, name: impl ToString) -> String {
		let name = name.to_string();
		if self.namespace_path.is_empty() {
			name
		} else {
			format!("{}::{name}", self.namespace_path.join("::"))
		}
	}

	/// Anything pushed to the namespace will become part of variable and constraint names, which
	/// is useful for debugging.
	///
	/// Use `pop_namespace(&mut self)` to remove the latest name.
	///
	/// Example
	/// ```
	/// use zkfloat_circuits::builder::ConstraintSystemBuilder;
	///
	/// let mut builder = ConstraintSystemBuilder::new();
	/// builder.push_namespace("a");
	/// let x = builder.add_committed("x");
	/// builder.push_namespace("b");
	/// let y = builder.add_committed("y");
	/// builder.pop_namespace();
	/// builder.pop_namespace();
	/// let z = builder.add_committed("z");
	///
	/// assert_eq!(builder.name_of(x), "a::x");
	/// assert_eq!(builder.name_of(y), "a::b::y");
	/// assert_eq!(builder.name_of(z), "z");
	/// ```
	pub fn push_namespace(&mut self, name: impl ToString) {
		self.namespace_path.push(name.to_string());
	}

	pub fn pop_namespace(&mut self) {
		self.namespace_path.pop();
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use zkfloat_core::{validate_witness, Error};

	use super::*;

	#[test]
	fn test_computed_values_follow_declaration_order() {
		let mut builder = ConstraintSystemBuilder::new_with_witness();
		let x = builder.add_private_input("x");
		builder.witness().unwrap().set(x, 6u64);
		let y = builder.add_computed("y", x * x + F::from(1u64)).unwrap();
		assert_eq!(builder.witness().unwrap().get(y).unwrap(), F::from(37u64));

		let witness = builder.take_witness().unwrap();
		let cs = builder.build().unwrap();
		validate_witness(&cs, &[], &witness).unwrap();
	}

	#[test]
	fn test_unassigned_input_is_named() {
		let mut builder = ConstraintSystemBuilder::new_with_witness();
		builder.push_namespace("gadget");
		let x = builder.add_private_input("x");
		let err = builder.add_computed("y", x + F::from(1u64)).unwrap_err();
		assert!(err.to_string().contains("gadget::x"));
	}

	#[test]
	fn test_verifier_mode_has_no_witness() {
		let mut builder = ConstraintSystemBuilder::new();
		let x = builder.add_private_input("x");
		builder.add_computed("y", x * x).unwrap();
		assert!(builder.witness().is_none());
		assert!(builder.take_witness().is_err());
		assert_eq!(builder.build().unwrap().constraints.len(), 1);
	}

	#[test]
	fn test_build_rejects_high_degree() {
		let mut builder = ConstraintSystemBuilder::new();
		let x = builder.add_private_input("x");
		builder.assert_zero("cube", x * x * x);
		let err = builder.build().unwrap_err();
		assert_matches!(
			err.downcast_ref::<Error>(),
			Some(Error::DegreeTooHigh { degree: 3, .. })
		);
	}

	#[test]
	fn test_constant_folding_keeps_degree_low() {
		let mut builder = ConstraintSystemBuilder::new();
		let x = builder.add_private_input("x");
		let cond = builder.add_private_input("cond");
		// (x * x) * (1 - 1) vanishes, leaving a degree-1 constraint.
		builder.assert_zero("folded", (x * x) * (Expr::one() - Expr::one()) + cond);
		let cs = builder.build().unwrap();
		assert_eq!(cs.stats().max_degree, 1);
	}
}
