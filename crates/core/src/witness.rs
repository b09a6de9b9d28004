// Copyright 2025 Irreducible Inc.

use zkfloat_field::Field;

use crate::{
	constraint_system::ConstraintSystem,
	error::Error,
	variable::{VariableId, VariableKind},
};

/// Data structure that indexes witness values by variable ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WitnessIndex<F: Field> {
	values: Vec<Option<F>>,
}

impl<F: Field> WitnessIndex<F> {
	pub const fn new() -> Self {
		Self { values: Vec::new() }
	}

	pub fn with_len(len: usize) -> Self {
		Self {
			values: vec![None; len],
		}
	}

	pub fn get(&self, id: VariableId) -> Option<F> {
		self.values.get(id).copied().flatten()
	}

	/// Assigns `value` to the variable, growing the index if needed.
	pub fn set(&mut self, id: VariableId, value: F) {
		if id >= self.values.len() {
			self.values.resize(id + 1, None);
		}
		self.values[id] = Some(value);
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn values(&self) -> &[Option<F>] {
		&self.values
	}

	/// Recomputes every computed variable from its defining expression, in declaration order.
	///
	/// Inputs and hints are left untouched. After editing hints by hand this restores the
	/// computed part of the assignment, so only the edited hints can make validation fail.
	pub fn update_computed(&mut self, constraint_system: &ConstraintSystem<F>) -> Result<(), Error> {
		for var in constraint_system.variables.iter() {
			if let VariableKind::Computed { expr } = &var.kind {
				let value = expr.evaluate_partial(&self.values)?;
				self.set(var.id, value);
			}
		}
		Ok(())
	}
}
