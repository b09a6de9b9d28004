// Copyright 2025 Irreducible Inc.

//! Range and comparison primitives: bit decomposition, zero and equality tests, less-than.

use anyhow::ensure;
use zkfloat_field::{bits_le, check_comparison_bits, pow2, Field, PrimeField};

use crate::builder::{
	types::{Expr, Variable, F},
	ConstraintSystemBuilder,
};

/// Weighted sum `Σ bits[i] · 2^i` of little-endian bits.
pub fn recompose(bits: &[Variable]) -> Expr {
	bits.iter()
		.enumerate()
		.map(|(i, &bit)| bit * pow2::<F>(i))
		.sum()
}

/// Decomposes a value into `n_bits` boolean hints, least significant first.
///
/// Each bit is constrained boolean and their weighted sum is constrained equal to the input, so
/// the constraints are unsatisfiable when the input does not fit in `n_bits` bits.
#[derive(Debug, Clone)]
pub struct BitDecomposition {
	pub bits: Vec<Variable>,
}

impl BitDecomposition {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		n_bits: usize,
		input: impl Into<Expr>,
	) -> Result<Self, anyhow::Error> {
		ensure!(
			n_bits < F::MODULUS_BIT_SIZE as usize,
			"cannot decompose into {n_bits} bits, the field modulus has {} bits",
			F::MODULUS_BIT_SIZE
		);
		let input: Expr = input.into();

		builder.push_namespace(name);
		let bits = (0..n_bits)
			.map(|i| builder.add_committed(format!("bits[{i}]")))
			.collect::<Vec<_>>();

		if let Some(witness) = builder.witness() {
			let value = witness.eval(&input)?;
			for (&bit, bit_value) in bits.iter().zip(bits_le(value, n_bits)) {
				witness.set(bit, bit_value);
			}
		}

		for (i, &bit) in bits.iter().enumerate() {
			builder.assert_boolean(format!("bits[{i}]::boolean"), bit);
		}
		builder.assert_equal("recompose", recompose(&bits), input);
		builder.pop_namespace();

		Ok(Self { bits })
	}

	pub fn recompose(&self) -> Expr {
		recompose(&self.bits)
	}
}

/// `out = 1` if the input is zero and `0` otherwise.
///
/// The prover supplies `inv = 1/x` (or `0` when `x = 0`); `out = 1 - x·inv` and `x·out = 0`
/// leave no other satisfying choice.
#[derive(Debug, Clone, Copy)]
pub struct IsZero {
	pub inv: Variable,
	pub out: Variable,
}

impl IsZero {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		input: impl Into<Expr>,
	) -> Result<Self, anyhow::Error> {
		let input: Expr = input.into();

		builder.push_namespace(name);
		let inv = builder.add_committed("inv");
		if let Some(witness) = builder.witness() {
			let value = witness.eval(&input)?;
			witness.set(inv, value.inverse().unwrap_or_default());
		}
		let out = builder.add_computed("out", Expr::one() - input.clone() * inv)?;
		builder.assert_zero("input_times_out", input * out);
		builder.pop_namespace();

		Ok(Self { inv, out })
	}
}

/// `out = 1` if `lhs = rhs`, computed as an [`IsZero`] of `rhs - lhs`.
pub fn is_equal(
	builder: &mut ConstraintSystemBuilder,
	name: impl ToString,
	lhs: impl Into<Expr>,
	rhs: impl Into<Expr>,
) -> Result<IsZero, anyhow::Error> {
	let lhs: Expr = lhs.into();
	let rhs: Expr = rhs.into();
	IsZero::new(builder, name, rhs - lhs)
}

/// `out = 1` if `lhs < rhs`, for inputs that both fit in `n_bits` bits.
///
/// Decomposes `lhs + 2^n - rhs` into `n + 1` bits; the top bit is clear exactly when
/// `lhs < rhs`. Inputs wider than `n_bits` give an unsatisfiable decomposition or `out = 0`, so a
/// caller that asserts `out = 1` never accepts an out-of-range `lhs`.
#[derive(Debug, Clone)]
pub struct LessThan {
	pub decomposition: BitDecomposition,
	pub out: Variable,
}

impl LessThan {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		n_bits: usize,
		lhs: impl Into<Expr>,
		rhs: impl Into<Expr>,
	) -> Result<Self, anyhow::Error> {
		check_comparison_bits::<F>(n_bits)?;

		builder.push_namespace(name);
		let lhs: Expr = lhs.into();
		let rhs: Expr = rhs.into();
		let shifted = lhs + pow2::<F>(n_bits) - rhs;
		let decomposition = BitDecomposition::new(builder, "diff", n_bits + 1, shifted)?;
		let out = builder.add_computed("out", Expr::one() - decomposition.bits[n_bits])?;
		builder.pop_namespace();

		Ok(Self { decomposition, out })
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use proptest::prelude::*;
	use zkfloat_core::{validate_witness, Error};

	use super::*;
	use crate::builder::test_utils::{expose_with_value, private_input, test_circuit};

	#[test]
	fn test_decomposition_boundaries() {
		for value in [0u64, 1, 170, 255] {
			test_circuit(|builder| {
				let x = private_input(builder, "x", value);
				let decomposition = BitDecomposition::new(builder, "x_bits", 8, x)?;
				let recomposed = builder.add_computed("recomposed", decomposition.recompose())?;
				Ok(vec![expose_with_value(builder, recomposed, value)])
			})
			.unwrap();
		}
	}

	#[test]
	fn test_decomposition_rejects_wide_input() {
		let mut builder = ConstraintSystemBuilder::new_with_witness();
		let x = private_input(&mut builder, "x", 256u64);
		BitDecomposition::new(&mut builder, "x_bits", 8, x).unwrap();
		let witness = builder.take_witness().unwrap();
		let cs = builder.build().unwrap();
		assert_matches!(
			validate_witness(&cs, &[], &witness),
			Err(Error::ConstraintUnsatisfied { name, .. }) if name == "x_bits::recompose"
		);
	}

	#[test]
	fn test_decomposition_width_limit() {
		let mut builder = ConstraintSystemBuilder::new();
		let x = builder.add_private_input("x");
		assert!(BitDecomposition::new(&mut builder, "x_bits", 254, x).is_err());
	}

	#[test]
	fn test_is_zero_and_is_equal() {
		for (lhs, rhs) in [(0u64, 0u64), (5, 5), (5, 6), (7, 0)] {
			test_circuit(|builder| {
				let a = private_input(builder, "a", lhs);
				let b = private_input(builder, "b", rhs);
				let a_zero = IsZero::new(builder, "a_zero", a)?;
				let equal = is_equal(builder, "equal", a, b)?;
				Ok(vec![
					expose_with_value(builder, a_zero.out, lhs == 0),
					expose_with_value(builder, equal.out, lhs == rhs),
				])
			})
			.unwrap();
		}
	}

	#[test]
	fn test_less_than_wide_comparison() {
		let big = (1u128 << 100) + 12345;
		test_circuit(|builder| {
			let a = private_input(builder, "a", big);
			let b = private_input(builder, "b", big + 1);
			let lt = LessThan::new(builder, "lt", 101, a, b)?;
			let ge = LessThan::new(builder, "ge", 101, b, a)?;
			Ok(vec![
				expose_with_value(builder, lt.out, true),
				expose_with_value(builder, ge.out, false),
			])
		})
		.unwrap();
	}

	#[test]
	fn test_less_than_width_limit() {
		let mut builder = ConstraintSystemBuilder::new();
		let a = builder.add_private_input("a");
		let b = builder.add_private_input("b");
		assert!(LessThan::new(&mut builder, "lt", 252, a, b).is_ok());
		assert!(LessThan::new(&mut builder, "too_wide", 253, a, b).is_err());
	}

	proptest! {
		#[test]
		fn test_less_than_matches_integers(lhs in 0u64..1 << 16, rhs in 0u64..1 << 16) {
			let result = test_circuit(|builder| {
				let a = private_input(builder, "a", lhs);
				let b = private_input(builder, "b", rhs);
				let lt = LessThan::new(builder, "lt", 16, a, b)?;
				Ok(vec![expose_with_value(builder, lt.out, lhs < rhs)])
			});
			prop_assert!(result.is_ok(), "{result:?}");
		}

		#[test]
		fn test_recompose_round_trip(value in any::<u32>()) {
			let result = test_circuit(|builder| {
				let x = private_input(builder, "x", value as u64);
				let decomposition = BitDecomposition::new(builder, "x_bits", 32, x)?;
				let recomposed = builder.add_computed("recomposed", recompose(&decomposition.bits))?;
				Ok(vec![expose_with_value(builder, recomposed, value as u64)])
			});
			prop_assert!(result.is_ok(), "{result:?}");
		}
	}
}
