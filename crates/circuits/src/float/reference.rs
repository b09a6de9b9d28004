// Copyright 2025 Irreducible Inc.

//! Plain integer model of [`super::FloatAdd`], used to check circuit outputs.
//!
//! Every step mirrors the circuit, including the exact magnitude ordering, the short circuit on
//! large exponent gaps and the unchecked exponent increment on rounding overflow.

use anyhow::{bail, ensure};
use zkfloat_field::bit_width;

use super::{FloatParams, FloatValue};

/// Largest precision whose extended mantissas fit in a `u128`.
pub const MAX_PRECISION: usize = 62;

pub fn float_add(
	params: FloatParams,
	lhs: FloatValue,
	rhs: FloatValue,
) -> Result<FloatValue, anyhow::Error> {
	let FloatParams {
		exponent_bits: k,
		precision: p,
	} = params;
	ensure!(p <= MAX_PRECISION, "precision {p} is too wide for the reference model");
	ensure!(
		params.magnitude_bits() <= 128,
		"exponent width {k} is too wide for the reference model"
	);
	for (side, value) in [("lhs", lhs), ("rhs", rhs)] {
		if !value.is_well_formed(params) {
			bail!("{side} {value:?} is not a well-formed encoding for {params:?}");
		}
	}

	let magnitude = |value: FloatValue| (value.exponent << (p + 1)) + value.mantissa;
	let (alpha, beta) = if magnitude(lhs) < magnitude(rhs) {
		(rhs, lhs)
	} else {
		(lhs, rhs)
	};

	let diff = alpha.exponent - beta.exponent;
	if (p as u128 + 1) < diff || alpha.exponent == 0 {
		return Ok(alpha);
	}

	let sum = (alpha.mantissa << diff) + beta.mantissa;
	let (exponent, mantissa) = normalize(p, beta.exponent, sum);
	Ok(round(p, exponent, mantissa))
}

/// Shifts the leading bit of `mantissa` to position `2p + 1`.
fn normalize(p: usize, exponent: u128, mantissa: u128) -> (u128, u128) {
	let extended = 2 * p + 1;
	let ell = bit_width(mantissa) - 1;
	(exponent + ell as u128 - p as u128, mantissa << (extended - ell))
}

/// Rounds a `(2p + 2)`-bit mantissa to `p + 1` bits, half up.
fn round(p: usize, exponent: u128, mantissa: u128) -> FloatValue {
	let extended = 2 * p + 1;
	let round_amt = extended - p;
	let half = 1u128 << (round_amt - 1);
	if mantissa < (1u128 << (extended + 1)) - half {
		FloatValue::new(exponent, (mantissa + half) >> round_amt)
	} else {
		FloatValue::new(exponent + 1, 1 << p)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_rounding_cases() {
		// p = 2 rounds a 6-bit mantissa to 3 bits.
		assert_eq!(round(2, 7, 0b101100), FloatValue::new(7, 0b110));
		assert_eq!(round(2, 7, 0b101000), FloatValue::new(7, 0b101));
		assert_eq!(round(2, 7, 0b111100), FloatValue::new(8, 0b100));
	}

	#[test]
	fn test_identity_and_commutativity() {
		let params = FloatParams::new(4, 3).unwrap();
		for e in 1..16 {
			for m in 8..16 {
				let x = FloatValue::new(e, m);
				assert_eq!(float_add(params, x, FloatValue::ZERO).unwrap(), x);
				assert_eq!(float_add(params, FloatValue::ZERO, x).unwrap(), x);
				let y = FloatValue::new(16 - e, 23 - m);
				assert_eq!(float_add(params, x, y).unwrap(), float_add(params, y, x).unwrap());
			}
		}
	}

	#[test]
	fn test_matches_f64_within_rounding() {
		let params = FloatParams::new(8, 4).unwrap();
		for (lhs, rhs) in [(3.0, 3.0), (3.0, 40.0), (100.0, 2.5), (17.0, 1.0e6)] {
			let a = FloatValue::from_f64(params, lhs).unwrap();
			let b = FloatValue::from_f64(params, rhs).unwrap();
			let exact = a.to_f64(params) + b.to_f64(params);
			let sum = float_add(params, a, b).unwrap().to_f64(params);
			assert!((sum - exact).abs() <= exact / 16.0, "{lhs} + {rhs}: {sum} vs {exact}");
		}
	}

	#[test]
	fn test_rejects_malformed() {
		let params = FloatParams::new(4, 3).unwrap();
		assert!(float_add(params, FloatValue::new(0, 8), FloatValue::ZERO).is_err());
		assert!(float_add(params, FloatValue::new(3, 7), FloatValue::ZERO).is_err());
		let wide = FloatParams::new(8, 63).unwrap();
		assert!(float_add(wide, FloatValue::ZERO, FloatValue::ZERO).is_err());
	}
}
