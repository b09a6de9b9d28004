// Copyright 2024-2025 Irreducible Inc.

//! Boolean and selection primitives.
//!
//! `and` and `or` are only meaningful on boolean inputs, and `select` and [`Swap`] only on a
//! boolean condition. None of them constrain their inputs to be boolean; callers pass outputs of
//! gadgets that already do.

use crate::builder::{
	types::{Expr, Variable},
	ConstraintSystemBuilder,
};

pub fn and(
	builder: &mut ConstraintSystemBuilder,
	name: impl ToString,
	xin: Variable,
	yin: Variable,
) -> Result<Variable, anyhow::Error> {
	builder.add_computed(name, xin * yin)
}

pub fn or(
	builder: &mut ConstraintSystemBuilder,
	name: impl ToString,
	xin: Variable,
	yin: Variable,
) -> Result<Variable, anyhow::Error> {
	builder.add_computed(name, xin + yin - xin * yin)
}

/// Returns `lhs` when `cond = 1` and `rhs` when `cond = 0`, as `cond * (lhs - rhs) + rhs`.
///
/// `lhs` and `rhs` must be affine so the result stays within degree 2.
pub fn select(
	builder: &mut ConstraintSystemBuilder,
	name: impl ToString,
	cond: Variable,
	lhs: impl Into<Expr>,
	rhs: impl Into<Expr>,
) -> Result<Variable, anyhow::Error> {
	let lhs: Expr = lhs.into();
	let rhs: Expr = rhs.into();
	builder.add_computed(name, cond * (lhs - rhs.clone()) + rhs)
}

/// Conditionally swaps two values: `(out_left, out_right)` is `(lhs, rhs)` when `sel = 0` and
/// `(rhs, lhs)` when `sel = 1`.
#[derive(Debug, Clone, Copy)]
pub struct Swap {
	pub aux: Variable,
	pub out_left: Variable,
	pub out_right: Variable,
}

impl Swap {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		sel: Variable,
		lhs: impl Into<Expr>,
		rhs: impl Into<Expr>,
	) -> Result<Self, anyhow::Error> {
		let lhs: Expr = lhs.into();
		let rhs: Expr = rhs.into();

		builder.push_namespace(name);
		let aux = builder.add_computed("aux", (rhs.clone() - lhs.clone()) * sel)?;
		let out_left = builder.add_computed("out_left", aux + lhs)?;
		let out_right = builder.add_computed("out_right", rhs - aux)?;
		builder.pop_namespace();

		Ok(Self {
			aux,
			out_left,
			out_right,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::builder::test_utils::{expose_with_value, private_input, test_circuit};

	#[test]
	fn test_boolean_truth_tables() {
		for a in 0..2u64 {
			for b in 0..2u64 {
				test_circuit(|builder| {
					let x = private_input(builder, "a", a);
					let y = private_input(builder, "b", b);
					let and_out = and(builder, "and", x, y)?;
					let or_out = or(builder, "or", x, y)?;
					Ok(vec![
						expose_with_value(builder, and_out, a & b),
						expose_with_value(builder, or_out, a | b),
					])
				})
				.unwrap();
			}
		}
	}

	#[test]
	fn test_select() {
		for cond in 0..2u64 {
			test_circuit(|builder| {
				let cond_var = private_input(builder, "cond", cond);
				let lhs = private_input(builder, "lhs", 11u64);
				let rhs = private_input(builder, "rhs", 22u64);
				let out = select(builder, "select", cond_var, lhs, rhs)?;
				let expected = if cond == 1 { 11u64 } else { 22 };
				Ok(vec![expose_with_value(builder, out, expected)])
			})
			.unwrap();
		}
	}

	#[test]
	fn test_swap() {
		for sel in 0..2u64 {
			test_circuit(|builder| {
				let sel_var = private_input(builder, "sel", sel);
				let lhs = private_input(builder, "lhs", 3u64);
				let rhs = private_input(builder, "rhs", 9u64);
				let swap = Swap::new(builder, "swap", sel_var, lhs, rhs)?;
				let (left, right) = if sel == 1 { (9u64, 3u64) } else { (3, 9) };
				Ok(vec![
					expose_with_value(builder, swap.out_left, left),
					expose_with_value(builder, swap.out_right, right),
				])
			})
			.unwrap();
		}
	}
}
