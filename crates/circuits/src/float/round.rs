// Copyright 2025 Irreducible Inc.

use anyhow::ensure;
use zkfloat_field::pow2;

use crate::{
	bitwise::select,
	builder::{
		types::{Variable, F},
		ConstraintSystemBuilder,
	},
	range::LessThan,
	shift::RightShift,
};

/// Rounds a normalized `(P + 1)`-bit mantissa to `p + 1` bits, half up.
///
/// With `r = P - p`, a mantissa below `2^(P+1) - 2^(r-1)` rounds to `(m + 2^(r-1)) >> r` at the
/// same exponent. Larger mantissas round up to `2^(p+1)`, which is renormalized to `2^p` with the
/// exponent incremented. The exponent is not range-checked afterwards.
#[derive(Debug, Clone)]
pub struct RoundAndCheck {
	pub no_overflow: LessThan,
	pub shifted: RightShift,
	pub e_out: Variable,
	pub m_out: Variable,
}

impl RoundAndCheck {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		precision: usize,
		extended_precision: usize,
		e: Variable,
		m: Variable,
	) -> Result<Self, anyhow::Error> {
		ensure!(
			extended_precision > precision,
			"rounding from precision {extended_precision} to {precision} removes no bits"
		);
		let round_amt = extended_precision - precision;
		let half = pow2::<F>(round_amt - 1);

		builder.push_namespace(name);
		let no_overflow = LessThan::new(
			builder,
			"no_overflow",
			extended_precision + 1,
			m,
			pow2::<F>(extended_precision + 1) - half,
		)?;
		let shifted = RightShift::new(builder, "shifted", extended_precision + 2, round_amt, m + half)?;
		let e_out = select(builder, "e_out", no_overflow.out, e, e + F::from(1u64))?;
		let m_out = select(builder, "m_out", no_overflow.out, shifted.out, pow2::<F>(precision))?;
		builder.pop_namespace();

		Ok(Self {
			no_overflow,
			shifted,
			e_out,
			m_out,
		})
	}
}
