// Copyright 2025 Irreducible Inc.

use zkfloat_field::pow2;

use crate::{
	bitwise::{and, select},
	builder::{
		types::{Expr, Variable, F},
		ConstraintSystemBuilder,
	},
	range::IsZero,
	shift::CheckBitLength,
};

/// Asserts that `(e, m)` is a valid encoding: zero, or a `k`-bit nonzero exponent with a
/// mantissa in `[2^p, 2^(p+1))`.
#[derive(Debug, Clone)]
pub struct CheckWellFormedness {
	pub is_e_zero: IsZero,
	pub is_m_zero: IsZero,
	pub e_in_range: CheckBitLength,
	pub m_in_range: CheckBitLength,
	pub both_in_range: Variable,
	pub is_valid: Variable,
}

impl CheckWellFormedness {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		exponent_bits: usize,
		precision: usize,
		e: Variable,
		m: Variable,
	) -> Result<Self, anyhow::Error> {
		builder.push_namespace(name);
		let is_e_zero = IsZero::new(builder, "is_e_zero", e)?;
		let is_m_zero = IsZero::new(builder, "is_m_zero", m)?;
		let e_in_range = CheckBitLength::new(builder, "e_in_range", exponent_bits, e)?;
		let m_in_range =
			CheckBitLength::new(builder, "m_in_range", precision, m - pow2::<F>(precision))?;
		let both_in_range = and(builder, "both_in_range", e_in_range.out, m_in_range.out)?;
		let is_valid = select(builder, "is_valid", is_e_zero.out, is_m_zero.out, both_in_range)?;
		builder.assert_equal("is_valid_holds", is_valid, Expr::one());
		builder.pop_namespace();

		Ok(Self {
			is_e_zero,
			is_m_zero,
			e_in_range,
			m_in_range,
			both_in_range,
			is_valid,
		})
	}
}
