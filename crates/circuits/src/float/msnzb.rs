// Copyright 2025 Irreducible Inc.

use zkfloat_field::pow2;

use crate::{
	bitwise::{and, or},
	builder::{
		types::{Expr, Variable, F},
		ConstraintSystemBuilder,
	},
	range::{BitDecomposition, LessThan},
};

/// Position of the most significant nonzero bit of a `b`-bit value, as a one-hot vector.
///
/// `one_hot[i] = 1` exactly when `2^i <= x < 2^(i+1)`. The input must be nonzero unless
/// `skip_checks = 1`, in which case a zero input yields an all-zero vector. Uses two comparisons
/// per bit position, so the cost grows quadratically with `b`.
#[derive(Debug, Clone)]
pub struct Msnzb {
	pub decomposition: BitDecomposition,
	pub is_nonzero: LessThan,
	pub nonzero_or_skip: Variable,
	pub below: Vec<LessThan>,
	pub above: Vec<LessThan>,
	pub one_hot: Vec<Variable>,
}

impl Msnzb {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		n_bits: usize,
		input: Variable,
		skip_checks: Variable,
	) -> Result<Self, anyhow::Error> {
		builder.push_namespace(name);
		let decomposition = BitDecomposition::new(builder, "bits", n_bits, input)?;

		let is_nonzero = LessThan::new(builder, "is_nonzero", n_bits, Expr::zero(), input)?;
		let nonzero_or_skip = or(builder, "nonzero_or_skip", is_nonzero.out, skip_checks)?;
		builder.assert_equal("nonzero_or_skip_holds", nonzero_or_skip, Expr::one());

		let mut below = Vec::with_capacity(n_bits);
		let mut above = Vec::with_capacity(n_bits);
		let mut one_hot = Vec::with_capacity(n_bits);
		for i in 0..n_bits {
			let upper = pow2::<F>(i + 1);
			let lower = pow2::<F>(i) - F::from(1u64);
			let lt = LessThan::new(builder, format!("below[{i}]"), n_bits + 1, input, upper)?;
			let gt = LessThan::new(builder, format!("above[{i}]"), n_bits + 1, lower, input)?;
			one_hot.push(and(builder, format!("one_hot[{i}]"), lt.out, gt.out)?);
			below.push(lt);
			above.push(gt);
		}
		builder.pop_namespace();

		Ok(Self {
			decomposition,
			is_nonzero,
			nonzero_or_skip,
			below,
			above,
			one_hot,
		})
	}

	/// `Σ one_hot[i] · i`, the index of the leading bit.
	pub fn index(&self) -> Expr {
		self.one_hot
			.iter()
			.enumerate()
			.map(|(i, &bit)| bit * F::from(i as u64))
			.sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::builder::test_utils::{build_with_witness, private_input};

	fn one_hot(n_bits: usize, value: u64, skip: bool) -> Result<Vec<bool>, anyhow::Error> {
		let (cs, witness, msnzb) = build_with_witness(|builder| {
			let x = private_input(builder, "x", value);
			let skip = private_input(builder, "skip", skip);
			Msnzb::new(builder, "msnzb", n_bits, x, skip)
		})?;
		zkfloat_core::validate_witness(&cs, &[], &witness)?;
		Ok(msnzb
			.one_hot
			.iter()
			.map(|bit| witness.get(bit.id()) == Some(F::from(1u64)))
			.collect())
	}

	#[test]
	fn test_exactly_one_position_is_set() {
		let n_bits = 6;
		for value in 1..1u64 << n_bits {
			let bits = one_hot(n_bits, value, false).unwrap();
			let expected = 63 - value.leading_zeros() as usize;
			for (i, bit) in bits.into_iter().enumerate() {
				assert_eq!(bit, i == expected, "value {value}, position {i}");
			}
		}
	}

	#[test]
	fn test_zero_input() {
		assert!(one_hot(4, 0, false).is_err());
		assert_eq!(one_hot(4, 0, true).unwrap(), vec![false; 4]);
		assert_eq!(one_hot(4, 9, true).unwrap(), vec![false, false, false, true]);
	}

	#[test]
	fn test_input_too_wide() {
		assert!(one_hot(4, 16, false).is_err());
	}
}
