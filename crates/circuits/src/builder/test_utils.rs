// Copyright 2025 Irreducible Inc.

use anyhow::ensure;
use zkfloat_core::{validate_witness, Boundary, ConstraintSystem, WitnessIndex};

use super::{
	types::{Variable, F},
	ConstraintSystemBuilder,
};

/// Builds the circuit in verifier mode and in prover mode, checks that both produce the same
/// constraint system and boundaries, and validates the prover's witness against it.
pub fn test_circuit(
	build_circuit: impl Fn(&mut ConstraintSystemBuilder) -> Result<Vec<Boundary<F>>, anyhow::Error>,
) -> Result<(), anyhow::Error> {
	let mut verifier_builder = ConstraintSystemBuilder::new();
	let verifier_boundaries = build_circuit(&mut verifier_builder)?;
	let verifier_constraint_system = verifier_builder.build()?;

	let mut prover_builder = ConstraintSystemBuilder::new_with_witness();
	let prover_boundaries = build_circuit(&mut prover_builder)?;
	let prover_witness = prover_builder.take_witness()?;
	let prover_constraint_system = prover_builder.build()?;

	ensure!(
		verifier_constraint_system == prover_constraint_system,
		"verifier and prover modes built different constraint systems"
	);
	ensure!(
		verifier_boundaries == prover_boundaries,
		"verifier and prover modes stated different boundaries"
	);
	validate_witness(&verifier_constraint_system, &verifier_boundaries, &prover_witness)?;
	Ok(())
}

/// Builds the circuit in prover mode only, returning the constraint system, the witness and
/// whatever the build function returns, so tests can tamper with the witness before validating.
pub fn build_with_witness<T>(
	build_circuit: impl FnOnce(&mut ConstraintSystemBuilder) -> Result<T, anyhow::Error>,
) -> Result<(ConstraintSystem<F>, WitnessIndex<F>, T), anyhow::Error> {
	let mut builder = ConstraintSystemBuilder::new_with_witness();
	let output = build_circuit(&mut builder)?;
	let witness = builder.take_witness()?;
	let constraint_system = builder.build()?;
	Ok((constraint_system, witness, output))
}

/// Declares a private input and, in prover mode, assigns `value` to it.
pub fn private_input(
	builder: &mut ConstraintSystemBuilder,
	name: impl ToString,
	value: impl Into<F>,
) -> Variable {
	let var = builder.add_private_input(name);
	if let Some(witness) = builder.witness() {
		witness.set(var, value);
	}
	var
}

/// Exposes `var` and states `value` as its boundary.
pub fn expose_with_value(
	builder: &mut ConstraintSystemBuilder,
	var: Variable,
	value: impl Into<F>,
) -> Boundary<F> {
	builder.expose(var);
	Boundary {
		name: builder.name_of(var),
		value: value.into(),
	}
}
