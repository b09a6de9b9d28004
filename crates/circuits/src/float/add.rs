// Copyright 2025 Irreducible Inc.

use tracing::instrument;
use zkfloat_field::{bit_width, pow2};

use super::{
	normalize::Normalize, round::RoundAndCheck, well_formed::CheckWellFormedness, FloatParams,
	FloatVars,
};
use crate::{
	bitwise::{or, select, Swap},
	builder::{
		types::{Variable, F},
		ConstraintSystemBuilder,
	},
	range::{IsZero, LessThan},
	shift::LeftShift,
};

/// Adds two well-formed floating-point numbers.
///
/// Both inputs are checked for well-formedness and ordered by magnitude into `alpha >= beta`.
/// When the exponents differ by more than `p + 1`, or both inputs are zero, the sum rounds to
/// `alpha` and is short-circuited. Otherwise `alpha`'s mantissa is shifted left by the exponent
/// difference, added to `beta`'s at `beta`'s exponent, normalized to `2p + 1` bits and rounded
/// back to `p + 1` bits. Both branches are always built; the output selects between them.
#[derive(Debug, Clone)]
pub struct FloatAdd {
	pub params: FloatParams,
	pub well_formed: [CheckWellFormedness; 2],
	pub lhs_is_smaller: LessThan,
	pub swap_e: Swap,
	pub swap_m: Swap,
	pub alpha: FloatVars,
	pub beta: FloatVars,
	pub diff: Variable,
	pub diff_too_large: LessThan,
	pub alpha_is_zero: IsZero,
	pub short_circuit: Variable,
	pub shift: Variable,
	pub aligned: LeftShift,
	pub sum: Variable,
	pub normalize: Normalize,
	pub round: RoundAndCheck,
	pub out: FloatVars,
}

impl FloatAdd {
	#[instrument(skip_all, name = "FloatAdd::new", level = "debug")]
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		params: FloatParams,
		lhs: FloatVars,
		rhs: FloatVars,
	) -> Result<Self, anyhow::Error> {
		params.validate()?;
		let FloatParams {
			exponent_bits: k,
			precision: p,
		} = params;
		let extended_precision = params.extended_precision();

		builder.push_namespace(name);
		let well_formed = [
			CheckWellFormedness::new(builder, "lhs_well_formed", k, p, lhs.exponent, lhs.mantissa)?,
			CheckWellFormedness::new(builder, "rhs_well_formed", k, p, rhs.exponent, rhs.mantissa)?,
		];

		let mantissa_weight = pow2::<F>(p + 1);
		let lhs_is_smaller = LessThan::new(
			builder,
			"lhs_is_smaller",
			params.magnitude_bits(),
			lhs.exponent * mantissa_weight + lhs.mantissa,
			rhs.exponent * mantissa_weight + rhs.mantissa,
		)?;
		let swap_e = Swap::new(builder, "swap_e", lhs_is_smaller.out, lhs.exponent, rhs.exponent)?;
		let swap_m = Swap::new(builder, "swap_m", lhs_is_smaller.out, lhs.mantissa, rhs.mantissa)?;
		let alpha = FloatVars {
			exponent: swap_e.out_left,
			mantissa: swap_m.out_left,
		};
		let beta = FloatVars {
			exponent: swap_e.out_right,
			mantissa: swap_m.out_right,
		};

		let diff = builder.add_computed("diff", alpha.exponent - beta.exponent)?;
		let max_shift = (p + 1) as u128;
		let diff_too_large = LessThan::new(
			builder,
			"diff_too_large",
			k.max(bit_width(max_shift)),
			F::from(max_shift),
			diff,
		)?;
		let alpha_is_zero = IsZero::new(builder, "alpha_is_zero", alpha.exponent)?;
		let short_circuit = or(builder, "short_circuit", diff_too_large.out, alpha_is_zero.out)?;

		let shift = select(builder, "shift", short_circuit, F::from(1u64), diff)?;
		let aligned =
			LeftShift::new(builder, "aligned", p + 2, alpha.mantissa, shift, short_circuit)?;
		let sum = builder.add_computed("sum", aligned.out + beta.mantissa)?;
		let normalize = Normalize::new(
			builder,
			"normalize",
			p,
			extended_precision,
			beta.exponent,
			sum,
			short_circuit,
		)?;
		let round = RoundAndCheck::new(
			builder,
			"round",
			p,
			extended_precision,
			normalize.e_out,
			normalize.m_out,
		)?;

		let out = FloatVars {
			exponent: select(builder, "e_out", short_circuit, alpha.exponent, round.e_out)?,
			mantissa: select(builder, "m_out", short_circuit, alpha.mantissa, round.m_out)?,
		};
		builder.pop_namespace();

		Ok(Self {
			params,
			well_formed,
			lhs_is_smaller,
			swap_e,
			swap_m,
			alpha,
			beta,
			diff,
			diff_too_large,
			alpha_is_zero,
			short_circuit,
			shift,
			aligned,
			sum,
			normalize,
			round,
			out,
		})
	}
}
