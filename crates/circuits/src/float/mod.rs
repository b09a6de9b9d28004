// Copyright 2025 Irreducible Inc.

//! Unsigned floating-point numbers and the gadgets that add them.
//!
//! A number is a pair `(e, m)` of a `k`-bit exponent and a `(p + 1)`-bit mantissa. It is either
//! zero, `e = 0` and `m = 0`, or normalized, `e ∈ [1, 2^k - 1]` and `m ∈ [2^p, 2^(p+1) - 1]`.
//! A normalized pair represents `m · 2^(e - p)`; there is no exponent bias and no sign.

mod add;
mod msnzb;
mod normalize;
pub mod reference;
mod round;
mod well_formed;

pub use add::FloatAdd;
use anyhow::{anyhow, ensure};
pub use msnzb::Msnzb;
pub use normalize::Normalize;
pub use round::RoundAndCheck;
pub use well_formed::CheckWellFormedness;
use zkfloat_core::{Boundary, WitnessIndex};
use zkfloat_field::{bit_width, max_comparison_bits, to_u128};

use crate::builder::{
	types::{Variable, F},
	witness, ConstraintSystemBuilder,
};

/// Bit widths of a floating-point format, fixed when a circuit is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatParams {
	/// `k`, the width of the exponent.
	pub exponent_bits: usize,
	/// `p`, the number of mantissa bits below the leading one.
	pub precision: usize,
}

impl FloatParams {
	pub fn new(exponent_bits: usize, precision: usize) -> Result<Self, anyhow::Error> {
		let params = Self {
			exponent_bits,
			precision,
		};
		params.validate()?;
		Ok(params)
	}

	/// Checks that the widths are positive and that no comparison inside an addition circuit is
	/// wide enough to wrap around the field modulus.
	pub fn validate(&self) -> Result<(), anyhow::Error> {
		ensure!(self.exponent_bits >= 1, "exponent width must be at least 1");
		ensure!(self.precision >= 1, "precision must be at least 1");
		let max = max_comparison_bits::<F>();
		ensure!(
			self.magnitude_bits() <= max,
			"exponent width {} and precision {} need {}-bit magnitude comparisons, at most {max} are supported",
			self.exponent_bits,
			self.precision,
			self.magnitude_bits()
		);
		ensure!(
			self.extended_precision() + 2 <= max,
			"precision {} needs {}-bit rounding comparisons, at most {max} are supported",
			self.precision,
			self.extended_precision() + 2
		);
		Ok(())
	}

	/// `P = 2p + 1`, the precision the exact sum of two mantissas is normalized to before
	/// rounding.
	pub const fn extended_precision(&self) -> usize {
		2 * self.precision + 1
	}

	/// Width of `e · 2^(p+1) + m`, the integer whose order is the order of magnitudes.
	pub const fn magnitude_bits(&self) -> usize {
		self.exponent_bits + self.precision + 1
	}
}

/// A floating-point number as plain integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FloatValue {
	pub exponent: u128,
	pub mantissa: u128,
}

impl FloatValue {
	pub const ZERO: Self = Self::new(0, 0);

	pub const fn new(exponent: u128, mantissa: u128) -> Self {
		Self { exponent, mantissa }
	}

	pub const fn is_zero(&self) -> bool {
		self.exponent == 0 && self.mantissa == 0
	}

	pub fn is_well_formed(&self, params: FloatParams) -> bool {
		if self.exponent == 0 {
			return self.mantissa == 0;
		}
		bit_width(self.exponent) <= params.exponent_bits
			&& bit_width(self.mantissa) == params.precision + 1
	}

	/// Encodes a non-negative finite `f64`, rounding the mantissa half up.
	///
	/// Fails for values whose exponent falls outside `[1, 2^k - 1]`; in particular every nonzero
	/// value below 2 is out of range, since exponent 0 is reserved for zero.
	pub fn from_f64(params: FloatParams, value: f64) -> Result<Self, anyhow::Error> {
		ensure!(
			value.is_finite() && value >= 0.0,
			"{value} is not a finite non-negative number"
		);
		ensure!(params.precision < 126, "precision {} is too wide to encode", params.precision);
		if value == 0.0 {
			return Ok(Self::ZERO);
		}

		const SIGNIFICAND_BITS: usize = 52;
		let bits = value.to_bits();
		let biased_exponent = ((bits >> SIGNIFICAND_BITS) & 0x7ff) as i64;
		ensure!(biased_exponent != 0, "{value} is subnormal and below the smallest exponent");
		let exponent = biased_exponent - 1023;
		ensure!(
			exponent >= 1 && bit_width(exponent as u128) <= params.exponent_bits,
			"{value} has exponent {exponent}, outside [1, 2^{} - 1]",
			params.exponent_bits
		);

		let significand =
			((bits & ((1 << SIGNIFICAND_BITS) - 1)) | (1 << SIGNIFICAND_BITS)) as u128;
		let mut exponent = exponent as u128;
		let mut mantissa = if params.precision >= SIGNIFICAND_BITS {
			significand << (params.precision - SIGNIFICAND_BITS)
		} else {
			let shift = SIGNIFICAND_BITS - params.precision;
			(significand + (1 << (shift - 1))) >> shift
		};
		if bit_width(mantissa) > params.precision + 1 {
			exponent += 1;
			mantissa >>= 1;
		}
		ensure!(
			bit_width(exponent) <= params.exponent_bits,
			"{value} rounds to exponent {exponent}, outside [1, 2^{} - 1]",
			params.exponent_bits
		);
		Ok(Self { exponent, mantissa })
	}

	/// The represented magnitude `m · 2^(e - p)`, as the nearest `f64`.
	pub fn to_f64(&self, params: FloatParams) -> f64 {
		if self.is_zero() {
			return 0.0;
		}
		let scale = i64::try_from(self.exponent)
			.unwrap_or(i64::MAX)
			.saturating_sub(params.precision as i64)
			.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
		self.mantissa as f64 * 2f64.powi(scale)
	}
}

/// Exponent and mantissa variables of a floating-point number inside a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatVars {
	pub exponent: Variable,
	pub mantissa: Variable,
}

impl FloatVars {
	pub fn add_private_input(builder: &mut ConstraintSystemBuilder, name: impl ToString) -> Self {
		builder.push_namespace(name);
		let exponent = builder.add_private_input("e");
		let mantissa = builder.add_private_input("m");
		builder.pop_namespace();
		Self { exponent, mantissa }
	}

	pub fn add_public_input(builder: &mut ConstraintSystemBuilder, name: impl ToString) -> Self {
		builder.push_namespace(name);
		let exponent = builder.add_public_input("e");
		let mantissa = builder.add_public_input("m");
		builder.pop_namespace();
		Self { exponent, mantissa }
	}

	pub fn assign(&self, witness: &mut witness::Builder, value: FloatValue) {
		witness.set(self.exponent, value.exponent);
		witness.set(self.mantissa, value.mantissa);
	}

	/// Reads the value from a witness that is still being built.
	pub fn get(&self, witness: &witness::Builder) -> Result<FloatValue, anyhow::Error> {
		Ok(FloatValue {
			exponent: witness.get_u128(self.exponent)?,
			mantissa: witness.get_u128(self.mantissa)?,
		})
	}

	/// Reads the value from a finished witness.
	pub fn read(&self, witness: &WitnessIndex<F>) -> Result<FloatValue, anyhow::Error> {
		let read = |var: Variable| -> Result<u128, anyhow::Error> {
			let value = witness
				.get(var.id())
				.ok_or_else(|| anyhow!("witness has no value for variable {}", var.id()))?;
			Ok(to_u128(value)?)
		};
		Ok(FloatValue {
			exponent: read(self.exponent)?,
			mantissa: read(self.mantissa)?,
		})
	}

	/// Exposes both variables and states `value` as their boundaries.
	pub fn expose(&self, builder: &mut ConstraintSystemBuilder, value: FloatValue) -> Vec<Boundary<F>> {
		builder.expose(self.exponent);
		builder.expose(self.mantissa);
		vec![
			Boundary {
				name: builder.name_of(self.exponent),
				value: F::from(value.exponent),
			},
			Boundary {
				name: builder.name_of(self.mantissa),
				value: F::from(value.mantissa),
			},
		]
	}
}
