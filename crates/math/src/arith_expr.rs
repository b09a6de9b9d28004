// Copyright 2025 Irreducible Inc.

use std::{
	collections::BTreeSet,
	iter::Sum,
	ops::{Add, Mul, Neg, Sub},
};

use zkfloat_field::Field;

use super::error::Error;

/// Arithmetic expressions that can be evaluated symbolically.
///
/// Arithmetic expressions are trees, where the leaves are either constants or variables, and the
/// non-leaf nodes are arithmetic operations. They are specific representations of multivariate
/// polynomials. Subtraction and negation are expressed through multiplication by `-1`, so the
/// tree only needs addition and multiplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArithExpr<F: Field> {
	Const(F),
	Var(usize),
	Add(Box<ArithExpr<F>>, Box<ArithExpr<F>>),
	Mul(Box<ArithExpr<F>>, Box<ArithExpr<F>>),
}

impl<F: Field> ArithExpr<F> {
	pub fn zero() -> Self {
		Self::Const(F::zero())
	}

	pub fn one() -> Self {
		Self::Const(F::one())
	}

	/// The total degree of the polynomial the expression represents.
	///
	/// This is the syntactic degree; call [`Self::optimize`] first to drop terms that fold away.
	pub fn degree(&self) -> usize {
		match self {
			Self::Const(_) => 0,
			Self::Var(_) => 1,
			Self::Add(left, right) => left.degree().max(right.degree()),
			Self::Mul(left, right) => left.degree() + right.degree(),
		}
	}

	/// Returns `Some(F)` if the expression is a constant.
	pub const fn as_constant(&self) -> Option<F> {
		match self {
			Self::Const(value) => Some(*value),
			_ => None,
		}
	}

	/// Creates a new optimized expression.
	///
	/// Performs constant folding and rewrites around the additive and multiplicative identities.
	pub fn optimize(&self) -> Self {
		match self {
			Self::Const(_) | Self::Var(_) => self.clone(),
			Self::Add(left, right) => {
				let left = left.optimize();
				let right = right.optimize();
				match (left, right) {
					(Self::Const(left), Self::Const(right)) => Self::Const(left + right),
					(Self::Const(left), right) if left.is_zero() => right,
					(left, Self::Const(right)) if right.is_zero() => left,
					(left, right) => Self::Add(Box::new(left), Box::new(right)),
				}
			}
			Self::Mul(left, right) => {
				let left = left.optimize();
				let right = right.optimize();
				match (left, right) {
					(Self::Const(left), Self::Const(right)) => Self::Const(left * right),
					(Self::Const(left), _) | (_, Self::Const(left)) if left.is_zero() => {
						Self::zero()
					}
					(Self::Const(left), right) if left.is_one() => right,
					(left, Self::Const(right)) if right.is_one() => left,
					// c1 * (c2 * x) = (c1 * c2) * x
					(Self::Const(outer), Self::Mul(inner_left, inner_right))
						if inner_left.as_constant().is_some() =>
					{
						let inner = inner_left.as_constant().unwrap_or_else(F::one);
						Self::Mul(Box::new(Self::Const(outer * inner)), inner_right)
					}
					(left, right) => Self::Mul(Box::new(left), Box::new(right)),
				}
			}
		}
	}

	/// Evaluates the expression with variable `i` bound to `vars[i]`.
	pub fn evaluate(&self, vars: &[F]) -> Result<F, Error> {
		self.evaluate_with(&|index| {
			vars.get(index).copied().ok_or(Error::MissingVariable {
				index,
				n_vars: vars.len(),
			})
		})
	}

	/// Evaluates the expression against a partial assignment.
	pub fn evaluate_partial(&self, vars: &[Option<F>]) -> Result<F, Error> {
		self.evaluate_with(&|index| match vars.get(index) {
			Some(Some(value)) => Ok(*value),
			Some(None) => Err(Error::UnassignedVariable { index }),
			None => Err(Error::MissingVariable {
				index,
				n_vars: vars.len(),
			}),
		})
	}

	/// Evaluates the expression, looking variable values up with `value_of`.
	pub fn evaluate_with<E>(&self, value_of: &impl Fn(usize) -> Result<F, E>) -> Result<F, E> {
		let value = match self {
			Self::Const(val) => *val,
			Self::Var(index) => value_of(*index)?,
			Self::Add(left, right) => left.evaluate_with(value_of)? + right.evaluate_with(value_of)?,
			Self::Mul(left, right) => left.evaluate_with(value_of)? * right.evaluate_with(value_of)?,
		};
		Ok(value)
	}

	/// The sorted set of variable indices the expression reads.
	pub fn vars(&self) -> BTreeSet<usize> {
		let mut vars = BTreeSet::new();
		self.collect_vars(&mut vars);
		vars
	}

	fn collect_vars(&self, vars: &mut BTreeSet<usize>) {
		match self {
			Self::Const(_) => (),
			Self::Var(index) => {
				vars.insert(*index);
			}
			Self::Add(left, right) | Self::Mul(left, right) => {
				left.collect_vars(vars);
				right.collect_vars(vars);
			}
		}
	}
}

impl<F: Field> From<F> for ArithExpr<F> {
	fn from(value: F) -> Self {
		Self::Const(value)
	}
}

impl<F: Field> Add for ArithExpr<F> {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self::Add(Box::new(self), Box::new(rhs))
	}
}

impl<F: Field> Add<F> for ArithExpr<F> {
	type Output = Self;

	fn add(self, rhs: F) -> Self {
		self + Self::Const(rhs)
	}
}

impl<F: Field> Neg for ArithExpr<F> {
	type Output = Self;

	fn neg(self) -> Self {
		Self::Mul(Box::new(Self::Const(-F::one())), Box::new(self))
	}
}

impl<F: Field> Sub for ArithExpr<F> {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		self + (-rhs)
	}
}

impl<F: Field> Sub<F> for ArithExpr<F> {
	type Output = Self;

	fn sub(self, rhs: F) -> Self {
		self + Self::Const(-rhs)
	}
}

impl<F: Field> Mul for ArithExpr<F> {
	type Output = Self;

	fn mul(self, rhs: Self) -> Self {
		Self::Mul(Box::new(self), Box::new(rhs))
	}
}

impl<F: Field> Mul<F> for ArithExpr<F> {
	type Output = Self;

	fn mul(self, rhs: F) -> Self {
		Self::Const(rhs) * self
	}
}

impl<F: Field> Sum for ArithExpr<F> {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.reduce(|acc, item| acc + item).unwrap_or_else(Self::zero)
	}
}
