// Copyright 2024-2025 Irreducible Inc.

use std::{cell::RefCell, rc::Rc};

use anyhow::{anyhow, Error};
use zkfloat_core::{VariableSet, WitnessIndex};
use zkfloat_field::to_u128;

use super::types::{Expr, Variable, F};

/// Records a value for every variable while the circuit is being built.
pub struct Builder {
	variables: Rc<RefCell<VariableSet<F>>>,
	values: WitnessIndex<F>,
}

impl Builder {
	pub fn new(variables: Rc<RefCell<VariableSet<F>>>) -> Self {
		Self {
			variables,
			values: WitnessIndex::new(),
		}
	}

	/// Value of `var`, failing if nothing has been assigned to it yet.
	pub fn get(&self, var: Variable) -> Result<F, Error> {
		self.values
			.get(var.id())
			.ok_or_else(|| self.missing(var.id()))
	}

	/// Value of `var` as an integer, failing if it does not fit in a `u128`.
	pub fn get_u128(&self, var: Variable) -> Result<u128, Error> {
		let value = self.get(var)?;
		to_u128(value).map_err(|err| anyhow!("{}: {err}", self.variables.borrow().name(var.id())))
	}

	pub fn set(&mut self, var: Variable, value: impl Into<F>) {
		self.values.set(var.id(), value.into());
	}

	/// Evaluates `expr` over the values assigned so far.
	pub fn eval(&self, expr: &Expr) -> Result<F, Error> {
		expr.evaluate_with(&|id| self.values.get(id).ok_or_else(|| self.missing(id)))
	}

	pub fn build(self) -> WitnessIndex<F> {
		let n_vars = self.variables.borrow().len();
		let mut values = self.values;
		// Pad with unassigned entries so validation names the first missing variable.
		if values.len() < n_vars {
			let mut padded = WitnessIndex::with_len(n_vars);
			for (id, value) in values.values().iter().enumerate() {
				if let Some(value) = value {
					padded.set(id, *value);
				}
			}
			values = padded;
		}
		values
	}

	fn missing(&self, id: usize) -> Error {
		anyhow!("witness for {} has not been assigned", self.variables.borrow().name(id))
	}
}
