// Copyright 2025 Irreducible Inc.

//! Bit-length checks and shifts.

use anyhow::ensure;
use zkfloat_field::{bit_width, bits_le, pow2, Field, PrimeField};

use crate::{
	bitwise::select,
	builder::{
		types::{Expr, Variable, F},
		ConstraintSystemBuilder,
	},
	range::{is_equal, recompose, BitDecomposition, IsZero, LessThan},
};

/// `out = 1` if the input fits in `n_bits` bits and `0` otherwise, without making the constraint
/// system unsatisfiable in the second case.
///
/// The prover hints candidate bits whose weighted sum is compared with the input. A second
/// comparison of `out · input` against `out · sum` must hold, so `out = 1` always comes with a
/// valid decomposition. The converse is one-sided: a prover may hint wrong bits for an input
/// that fits and obtain `out = 0`.
#[derive(Debug, Clone)]
pub struct CheckBitLength {
	pub bits: Vec<Variable>,
	pub sum_equal: IsZero,
	pub masked_input: Variable,
	pub masked_sum: Variable,
	pub double_check: IsZero,
	pub out: Variable,
}

impl CheckBitLength {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		n_bits: usize,
		input: impl Into<Expr>,
	) -> Result<Self, anyhow::Error> {
		ensure!(
			n_bits < F::MODULUS_BIT_SIZE as usize,
			"cannot check a bit length of {n_bits}, the field modulus has {} bits",
			F::MODULUS_BIT_SIZE
		);
		let input: Expr = input.into();

		builder.push_namespace(name);
		let bits = (0..n_bits)
			.map(|i| builder.add_committed(format!("bits[{i}]")))
			.collect::<Vec<_>>();
		if let Some(witness) = builder.witness() {
			// Inputs that are too wide get truncated bits, which cannot sum to the input.
			let value = witness.eval(&input)?;
			for (&bit, bit_value) in bits.iter().zip(bits_le(value, n_bits)) {
				witness.set(bit, bit_value);
			}
		}
		for (i, &bit) in bits.iter().enumerate() {
			builder.assert_boolean(format!("bits[{i}]::boolean"), bit);
		}

		let sum = recompose(&bits);
		let sum_equal = is_equal(builder, "sum_equal", sum.clone(), input.clone())?;
		let out = sum_equal.out;

		let masked_input = builder.add_computed("masked_input", out * input)?;
		let masked_sum = builder.add_computed("masked_sum", out * sum)?;
		let double_check = is_equal(builder, "double_check", masked_input, masked_sum)?;
		builder.assert_equal("double_check_holds", double_check.out, Expr::one());
		builder.pop_namespace();

		Ok(Self {
			bits,
			sum_equal,
			masked_input,
			masked_sum,
			double_check,
			out,
		})
	}
}

/// Logical right shift by a constant: decomposes the input into `n_bits` bits and recomposes
/// bits `[shift, n_bits)` starting from weight `2^0`.
#[derive(Debug, Clone)]
pub struct RightShift {
	pub decomposition: BitDecomposition,
	pub out: Variable,
}

impl RightShift {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		n_bits: usize,
		shift: usize,
		input: impl Into<Expr>,
	) -> Result<Self, anyhow::Error> {
		ensure!(shift < n_bits, "right shift by {shift} of a {n_bits}-bit value");

		builder.push_namespace(name);
		let decomposition = BitDecomposition::new(builder, "bits", n_bits, input)?;
		let out = builder.add_computed("out", recompose(&decomposition.bits[shift..]))?;
		builder.pop_namespace();

		Ok(Self { decomposition, out })
	}
}

/// Left shift by a variable amount, `out = input · 2^shift`.
///
/// The effective shift `(1 - skip_checks) · shift` is checked to be below `shift_bound` and
/// decomposed into bits `s_i`. The power of two is the running product of the factors
/// `1 + s_i · (2^(2^i) - 1)`, so `constrained` is tied to `input` and the shift by constraints.
///
/// When `skip_checks = 1` the effective shift is zero and `out` is instead the hint
/// `hinted = input · 2^shift`, computed from the unchecked shift. Nothing constrains `hinted`, so
/// callers must not rely on `out` when they skip the checks.
#[derive(Debug, Clone)]
pub struct LeftShift {
	pub effective_shift: Variable,
	pub in_bound: Option<LessThan>,
	pub shift_bits: BitDecomposition,
	pub powers: Vec<Variable>,
	pub constrained: Variable,
	pub hinted: Variable,
	pub out: Variable,
}

impl LeftShift {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		shift_bound: usize,
		input: impl Into<Expr>,
		shift: impl Into<Expr>,
		skip_checks: Variable,
	) -> Result<Self, anyhow::Error> {
		let input: Expr = input.into();
		let shift: Expr = shift.into();

		builder.push_namespace(name);
		let effective_shift =
			builder.add_computed("effective_shift", (Expr::one() - skip_checks) * shift.clone())?;

		let in_bound = if shift_bound > 0 {
			let in_bound = LessThan::new(
				builder,
				"in_bound",
				bit_width(shift_bound as u128),
				effective_shift,
				F::from(shift_bound as u64),
			)?;
			builder.assert_equal("in_bound_holds", in_bound.out, Expr::one());
			Some(in_bound)
		} else {
			None
		};

		// With a zero bound there are no shift bits and the decomposition forces the effective
		// shift to zero.
		let n_shift_bits = bit_width(shift_bound.saturating_sub(1) as u128);
		let shift_bits = BitDecomposition::new(builder, "shift_bits", n_shift_bits, effective_shift)?;

		let mut power = Expr::one();
		let mut powers = Vec::with_capacity(n_shift_bits);
		for (i, &bit) in shift_bits.bits.iter().enumerate() {
			let factor = Expr::one() + bit * (pow2::<F>(1 << i) - F::from(1u64));
			let next = builder.add_computed(format!("power[{i}]"), power * factor)?;
			power = next.expr();
			powers.push(next);
		}
		let constrained = builder.add_computed("constrained", input.clone() * power)?;

		let hinted = builder.add_committed("hinted");
		if let Some(witness) = builder.witness() {
			let shift = witness.eval(&shift)?;
			let value = witness.eval(&input)? * F::from(2u64).pow(shift.into_bigint());
			witness.set(hinted, value);
		}
		let out = select(builder, "out", skip_checks, hinted, constrained)?;
		builder.pop_namespace();

		Ok(Self {
			effective_shift,
			in_bound,
			shift_bits,
			powers,
			constrained,
			hinted,
			out,
		})
	}
}
