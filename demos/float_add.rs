// Copyright 2025 Irreducible Inc.

use anyhow::{ensure, Result};
use clap::{value_parser, Parser};
use zkfloat_circuits::{
	builder::{types::F, ConstraintSystemBuilder},
	float::{reference, FloatAdd, FloatParams, FloatValue, FloatVars},
};
use zkfloat_core::{validate_witness, Boundary};
use zkfloat_utils::tracing::init_tracing;

#[derive(Debug, Parser)]
struct Args {
	/// Width of the exponent in bits.
	#[arg(short = 'k', long, default_value_t = 8, value_parser = value_parser!(u32).range(1..))]
	exponent_bits: u32,
	/// Number of mantissa bits below the leading one.
	#[arg(short = 'p', long, default_value_t = 23, value_parser = value_parser!(u32).range(1..))]
	precision: u32,
	/// Left operand. Nonzero values must be at least 2.
	#[arg(long, default_value_t = 3.25)]
	lhs: f64,
	/// Right operand. Nonzero values must be at least 2.
	#[arg(long, default_value_t = 1000.5)]
	rhs: f64,
}

/// Declares the public operands, the adder and the claimed sum; the boundaries state `claimed`.
fn build_circuit(
	builder: &mut ConstraintSystemBuilder,
	params: FloatParams,
	lhs: FloatValue,
	rhs: FloatValue,
	claimed: FloatValue,
) -> Result<(FloatAdd, Vec<Boundary<F>>)> {
	let lhs_vars = FloatVars::add_public_input(builder, "lhs");
	let rhs_vars = FloatVars::add_public_input(builder, "rhs");
	if let Some(witness) = builder.witness() {
		lhs_vars.assign(witness, lhs);
		rhs_vars.assign(witness, rhs);
	}
	let add = FloatAdd::new(builder, "add", params, lhs_vars, rhs_vars)?;

	let mut boundaries = lhs_vars.expose(builder, lhs);
	boundaries.extend(rhs_vars.expose(builder, rhs));
	boundaries.extend(add.out.expose(builder, claimed));
	Ok((add, boundaries))
}

fn main() -> Result<()> {
	init_tracing();
	let args = Args::parse();

	let params = FloatParams::new(args.exponent_bits as usize, args.precision as usize)?;
	let lhs = FloatValue::from_f64(params, args.lhs)?;
	let rhs = FloatValue::from_f64(params, args.rhs)?;
	println!(
		"Adding {} + {} with {}-bit exponents and precision {}",
		lhs.to_f64(params),
		rhs.to_f64(params),
		params.exponent_bits,
		params.precision
	);

	let mut prover = ConstraintSystemBuilder::new_with_witness();
	let witness_scope = tracing::info_span!("generating witness").entered();
	let (add, _) = build_circuit(&mut prover, params, lhs, rhs, FloatValue::ZERO)?;
	let sum = add
		.out
		.get(prover.witness().ok_or_else(|| anyhow::anyhow!("prover builder has no witness"))?)?;
	let witness = prover.take_witness()?;
	drop(witness_scope);

	let mut verifier = ConstraintSystemBuilder::new();
	let (_, boundaries) = build_circuit(&mut verifier, params, lhs, rhs, sum)?;
	let constraint_system = verifier.build()?;
	ensure!(
		constraint_system == prover.build()?,
		"prover and verifier built different constraint systems"
	);

	validate_witness(&constraint_system, &boundaries, &witness)?;

	let exact = lhs.to_f64(params) + rhs.to_f64(params);
	println!("Result: e = {}, m = {}", sum.exponent, sum.mantissa);
	println!("Decoded: {} (exact sum {exact})", sum.to_f64(params));
	if params.precision <= reference::MAX_PRECISION && params.magnitude_bits() <= 128 {
		ensure!(
			reference::float_add(params, lhs, rhs)? == sum,
			"circuit disagrees with the integer model"
		);
	}
	println!("{}", constraint_system.stats());
	Ok(())
}
