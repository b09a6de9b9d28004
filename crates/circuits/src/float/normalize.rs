// Copyright 2025 Irreducible Inc.

use anyhow::ensure;
use zkfloat_field::pow2;

use super::msnzb::Msnzb;
use crate::builder::{
	types::{Expr, Variable, F},
	ConstraintSystemBuilder,
};

/// Normalizes an unnormalized `(P + 1)`-bit mantissa `m` with exponent `e`.
///
/// With `ell` the index of the leading bit of `m`, the output is `e_out = e + ell - p` and
/// `m_out = m · 2^(P - ell)`, so the leading bit of `m_out` sits at position `P` and
/// `m_out · 2^(e_out - P) = m · 2^(e - p)`. Both outputs are constrained. When `skip_checks = 1`
/// a zero mantissa is accepted and gives `m_out = 0`.
#[derive(Debug, Clone)]
pub struct Normalize {
	pub msnzb: Msnzb,
	pub ell: Variable,
	pub scale: Variable,
	pub e_out: Variable,
	pub m_out: Variable,
}

impl Normalize {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		precision: usize,
		extended_precision: usize,
		e: Variable,
		m: Variable,
		skip_checks: Variable,
	) -> Result<Self, anyhow::Error> {
		ensure!(
			extended_precision >= precision,
			"cannot normalize to precision {extended_precision} below {precision}"
		);
		builder.push_namespace(name);
		let msnzb = Msnzb::new(builder, "msnzb", extended_precision + 1, m, skip_checks)?;
		let ell = builder.add_computed("ell", msnzb.index())?;
		let e_out = builder.add_computed("e_out", e + ell - F::from(precision as u64))?;

		let scale = builder.add_computed(
			"scale",
			msnzb
				.one_hot
				.iter()
				.enumerate()
				.map(|(i, &bit)| bit * pow2::<F>(extended_precision - i))
				.sum::<Expr>(),
		)?;
		let m_out = builder.add_computed("m_out", m * scale)?;
		builder.pop_namespace();

		Ok(Self {
			msnzb,
			ell,
			scale,
			e_out,
			m_out,
		})
	}
}
