// Copyright 2025 Irreducible Inc.

use ark_ff::{BigInteger, Field, PrimeField};

use crate::Error;

/// Largest bit width `n` such that `a + 2^n - b` cannot wrap around the modulus for any
/// `a, b < 2^n`, i.e. the widest comparison a less-than gadget may perform.
pub fn max_comparison_bits<F: PrimeField>() -> usize {
	F::MODULUS_BIT_SIZE as usize - 2
}

/// Checks that `bits` is a usable comparison width for the field `F`.
pub fn check_comparison_bits<F: PrimeField>(bits: usize) -> Result<(), Error> {
	let max = max_comparison_bits::<F>();
	if bits > max {
		return Err(Error::BitWidthTooLarge { bits, max });
	}
	Ok(())
}

/// Returns `2^n` as a field element.
pub fn pow2<F: Field>(n: usize) -> F {
	F::from(2u64).pow([n as u64])
}

/// The `n` least significant bits of the canonical representative of `value`, least significant
/// first. Bits at positions `n` and above are dropped.
pub fn bits_le<F: PrimeField>(value: F, n: usize) -> Vec<bool> {
	let repr = value.into_bigint();
	(0..n).map(|i| repr.get_bit(i)).collect()
}

/// Number of bits of the canonical representative of `value`; zero for the zero element.
pub fn bit_length<F: PrimeField>(value: F) -> usize {
	value.into_bigint().num_bits() as usize
}

/// Number of bits needed to write `value` in binary; zero for zero.
pub const fn bit_width(value: u128) -> usize {
	(u128::BITS - value.leading_zeros()) as usize
}

/// Converts `value` to a `u128`, failing if its canonical representative is wider.
pub fn to_u128<F: PrimeField>(value: F) -> Result<u128, Error> {
	let bits = bit_length(value);
	if bits > 128 {
		return Err(Error::ValueTooWide { bits, target: 128 });
	}
	let repr = value.into_bigint();
	let limbs = repr.as_ref();
	let low = limbs.first().copied().unwrap_or(0) as u128;
	let high = limbs.get(1).copied().unwrap_or(0) as u128;
	Ok((high << 64) | low)
}
