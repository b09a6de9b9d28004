// Copyright 2025 Irreducible Inc.

use std::{
	marker::PhantomData,
	ops::{Add, Mul, Neg, Sub},
};

use zkfloat_field::Field;
use zkfloat_math::ArithExpr;

/// Identifier of a variable, its position in the [`VariableSet`].
pub type VariableId = usize;

/// How the value of a variable is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableKind<F: Field> {
	/// Supplied by the caller and visible to the verifier.
	PublicInput,
	/// Supplied by the caller and kept private.
	PrivateInput,
	/// Supplied by unconstrained witness computation. Only the constraints mentioning it restrict
	/// its value.
	Hint,
	/// Defined by an expression over earlier variables. The defining equation `var - expr = 0`
	/// is part of the constraint set.
	Computed { expr: ArithExpr<F> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable<F: Field> {
	pub id: VariableId,
	pub name: String,
	pub kind: VariableKind<F>,
}

/// Append-only set of variables, indexed by sequential [`VariableId`]s.
///
/// Computed variables may only refer to variables with smaller IDs, so the declaration order is
/// a valid order to compute the witness in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSet<F: Field> {
	variables: Vec<Variable<F>>,
}

impl<F: Field> VariableSet<F> {
	pub const fn new() -> Self {
		Self {
			variables: Vec::new(),
		}
	}

	pub fn add(&mut self, name: impl ToString, kind: VariableKind<F>) -> VariableId {
		let id = self.variables.len();
		self.variables.push(Variable {
			id,
			name: name.to_string(),
			kind,
		});
		id
	}

	pub fn get(&self, id: VariableId) -> Option<&Variable<F>> {
		self.variables.get(id)
	}

	/// Name of the variable, or a placeholder naming the ID if it is not declared.
	pub fn name(&self, id: VariableId) -> String {
		self.variables
			.get(id)
			.map_or_else(|| format!("<undeclared {id}>"), |var| var.name.clone())
	}

	pub fn find(&self, name: &str) -> Option<&Variable<F>> {
		self.variables.iter().find(|var| var.name == name)
	}

	pub fn len(&self) -> usize {
		self.variables.len()
	}

	pub fn is_empty(&self) -> bool {
		self.variables.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Variable<F>> + '_ {
		self.variables.iter()
	}
}

/// Typed handle to a variable.
///
/// Arithmetic on handles builds [`ArithExpr`]s over the referenced variables, so gadget code can
/// write constraints the way they read on paper: `cond * (lhs - rhs) + rhs`.
#[derive(Debug)]
pub struct Var<F> {
	id: VariableId,
	_marker: PhantomData<F>,
}

impl<F> Clone for Var<F> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<F> Copy for Var<F> {}

impl<F> PartialEq for Var<F> {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl<F> Eq for Var<F> {}

impl<F> Var<F> {
	pub const fn new(id: VariableId) -> Self {
		Self {
			id,
			_marker: PhantomData,
		}
	}

	pub const fn id(&self) -> VariableId {
		self.id
	}
}

impl<F: Field> Var<F> {
	pub const fn expr(self) -> ArithExpr<F> {
		ArithExpr::Var(self.id)
	}
}

impl<F: Field> From<Var<F>> for ArithExpr<F> {
	fn from(var: Var<F>) -> Self {
		var.expr()
	}
}

macro_rules! impl_var_op {
	($trait:ident, $method:ident) => {
		impl<F: Field> $trait for Var<F> {
			type Output = ArithExpr<F>;

			fn $method(self, rhs: Self) -> ArithExpr<F> {
				self.expr().$method(rhs.expr())
			}
		}

		impl<F: Field> $trait<ArithExpr<F>> for Var<F> {
			type Output = ArithExpr<F>;

			fn $method(self, rhs: ArithExpr<F>) -> ArithExpr<F> {
				self.expr().$method(rhs)
			}
		}

		impl<F: Field> $trait<Var<F>> for ArithExpr<F> {
			type Output = ArithExpr<F>;

			fn $method(self, rhs: Var<F>) -> ArithExpr<F> {
				self.$method(rhs.expr())
			}
		}

		impl<F: Field> $trait<F> for Var<F> {
			type Output = ArithExpr<F>;

			fn $method(self, rhs: F) -> ArithExpr<F> {
				self.expr().$method(rhs)
			}
		}
	};
}

impl_var_op!(Add, add);
impl_var_op!(Sub, sub);
impl_var_op!(Mul, mul);

impl<F: Field> Neg for Var<F> {
	type Output = ArithExpr<F>;

	fn neg(self) -> ArithExpr<F> {
		-self.expr()
	}
}

#[cfg(test)]
mod tests {
	use zkfloat_field::Bn254Scalar as F;

	use super::*;

	#[test]
	fn test_handle_arithmetic() {
		let mut vars = VariableSet::<F>::new();
		let a = Var::<F>::new(vars.add("a", VariableKind::PrivateInput));
		let b = Var::<F>::new(vars.add("b", VariableKind::PrivateInput));

		let select = a * (b - F::from(3u64)) + b;
		assert_eq!(select.degree(), 2);

		let values = [F::from(1u64), F::from(5u64)];
		assert_eq!(select.evaluate(&values).unwrap(), F::from(7u64));
		assert_eq!((-a + b).evaluate(&values).unwrap(), F::from(4u64));
	}

	#[test]
	fn test_variable_set_lookup() {
		let mut vars = VariableSet::<F>::new();
		let x = vars.add("gadget::x", VariableKind::Hint);
		assert_eq!(vars.len(), 1);
		assert_eq!(vars.name(x), "gadget::x");
		assert_eq!(vars.find("gadget::x").map(|var| var.id), Some(x));
		assert_eq!(vars.name(7), "<undeclared 7>");
	}
}
