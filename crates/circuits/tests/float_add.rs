// Copyright 2025 Irreducible Inc.

use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use zkfloat_circuits::{
	builder::{
		test_utils::{build_with_witness, test_circuit},
		ConstraintSystemBuilder,
	},
	float::{reference, FloatAdd, FloatParams, FloatValue, FloatVars},
};
use zkfloat_core::validate_witness;

fn add_circuit(
	builder: &mut ConstraintSystemBuilder,
	params: FloatParams,
	lhs: FloatValue,
	rhs: FloatValue,
) -> Result<FloatAdd, anyhow::Error> {
	let lhs_vars = FloatVars::add_private_input(builder, "lhs");
	let rhs_vars = FloatVars::add_private_input(builder, "rhs");
	if let Some(witness) = builder.witness() {
		lhs_vars.assign(witness, lhs);
		rhs_vars.assign(witness, rhs);
	}
	FloatAdd::new(builder, "add", params, lhs_vars, rhs_vars)
}

/// Runs the circuit in prover mode and returns the output it computed, after validation.
fn circuit_sum(
	params: FloatParams,
	lhs: FloatValue,
	rhs: FloatValue,
) -> Result<FloatValue, anyhow::Error> {
	let (cs, witness, add) = build_with_witness(|builder| add_circuit(builder, params, lhs, rhs))?;
	validate_witness(&cs, &[], &witness)?;
	add.out.read(&witness)
}

fn all_values(params: FloatParams) -> Vec<FloatValue> {
	let max_exponent = (1u128 << params.exponent_bits) - 1;
	let min_mantissa = 1u128 << params.precision;
	let mut values = vec![FloatValue::ZERO];
	for exponent in 1..=max_exponent {
		for mantissa in min_mantissa..2 * min_mantissa {
			values.push(FloatValue::new(exponent, mantissa));
		}
	}
	values
}

fn random_value(rng: &mut StdRng, params: FloatParams) -> FloatValue {
	if rng.gen_ratio(1, 10) {
		return FloatValue::ZERO;
	}
	let exponent = rng.gen_range(1..1u128 << params.exponent_bits);
	let mantissa = rng.gen_range(1u128 << params.precision..1u128 << (params.precision + 1));
	FloatValue::new(exponent, mantissa)
}

#[test]
fn test_exhaustive_small_format() {
	let params = FloatParams::new(2, 2).unwrap();
	let values = all_values(params);
	assert_eq!(values.len(), 13);
	for &lhs in &values {
		for &rhs in &values {
			let expected = reference::float_add(params, lhs, rhs).unwrap();
			let got = circuit_sum(params, lhs, rhs).unwrap();
			assert_eq!(got, expected, "{lhs:?} + {rhs:?}");
		}
	}
}

#[test]
fn test_random_cases_against_reference() {
	let mut rng = StdRng::seed_from_u64(0);
	for params in [
		FloatParams::new(5, 3).unwrap(),
		FloatParams::new(8, 7).unwrap(),
		FloatParams::new(11, 23).unwrap(),
	] {
		for _ in 0..8 {
			let lhs = random_value(&mut rng, params);
			let rhs = random_value(&mut rng, params);
			let expected = reference::float_add(params, lhs, rhs).unwrap();
			assert_eq!(circuit_sum(params, lhs, rhs).unwrap(), expected, "{lhs:?} + {rhs:?}");
		}
	}
}

#[test]
fn test_claimed_result_is_checked_by_verifier() {
	let params = FloatParams::new(8, 4).unwrap();
	let lhs = FloatValue::from_f64(params, 3.0).unwrap();
	let rhs = FloatValue::from_f64(params, 40.0).unwrap();
	let sum = reference::float_add(params, lhs, rhs).unwrap();

	test_circuit(|builder| {
		let add = add_circuit(builder, params, lhs, rhs)?;
		Ok(add.out.expose(builder, sum))
	})
	.unwrap();

	let wrong = FloatValue::new(sum.exponent, sum.mantissa + 1);
	let result = test_circuit(|builder| {
		let add = add_circuit(builder, params, lhs, rhs)?;
		Ok(add.out.expose(builder, wrong))
	});
	assert!(result.is_err());
}

#[test]
fn test_decoded_sum_within_rounding_error() {
	let params = FloatParams::new(8, 4).unwrap();
	let mut rng = StdRng::seed_from_u64(42);
	for _ in 0..10 {
		let lhs = FloatValue::from_f64(params, rng.gen_range(2.0..1000.0)).unwrap();
		let rhs = FloatValue::from_f64(params, rng.gen_range(2.0..1000.0)).unwrap();
		let exact = lhs.to_f64(params) + rhs.to_f64(params);
		let sum = circuit_sum(params, lhs, rhs).unwrap().to_f64(params);
		let tolerance = exact / (1u64 << params.precision) as f64;
		assert!((sum - exact).abs() <= tolerance, "{lhs:?} + {rhs:?}: {sum} vs {exact}");
	}
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(24))]

	#[test]
	fn test_matches_reference(
		lhs_exponent in 1u128..64,
		lhs_mantissa in 32u128..64,
		rhs_exponent in 0u128..64,
		rhs_mantissa in 32u128..64,
	) {
		let params = FloatParams::new(6, 5).unwrap();
		let lhs = FloatValue::new(lhs_exponent, lhs_mantissa);
		let rhs = if rhs_exponent == 0 {
			FloatValue::ZERO
		} else {
			FloatValue::new(rhs_exponent, rhs_mantissa)
		};
		let expected = reference::float_add(params, lhs, rhs).unwrap();
		prop_assert_eq!(circuit_sum(params, lhs, rhs).unwrap(), expected);
		prop_assert_eq!(circuit_sum(params, rhs, lhs).unwrap(), expected);
	}

	#[test]
	fn test_malformed_inputs_are_unsatisfiable(
		exponent in 0u128..16,
		mantissa in 0u128..64,
	) {
		let params = FloatParams::new(4, 4).unwrap();
		let value = FloatValue::new(exponent, mantissa);
		prop_assume!(!value.is_well_formed(params));
		prop_assert!(circuit_sum(params, value, FloatValue::new(3, 20)).is_err());
	}
}
