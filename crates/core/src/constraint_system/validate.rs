// Copyright 2025 Irreducible Inc.

use tracing::instrument;
use zkfloat_field::Field;
use zkfloat_utils::bail;

use super::{Boundary, ConstraintSystem};
use crate::{error::Error, variable::VariableKind, witness::WitnessIndex};

/// Checks that `witness` satisfies every constraint of `constraint_system` and agrees with the
/// claimed `boundaries`.
///
/// The checks run in order: every variable has a value, computed variables match their defining
/// expressions, zero constraints evaluate to zero, boundaries match the public variables they
/// name. The first failure is returned.
#[instrument(skip_all, level = "debug")]
pub fn validate_witness<F: Field>(
	constraint_system: &ConstraintSystem<F>,
	boundaries: &[Boundary<F>],
	witness: &WitnessIndex<F>,
) -> Result<(), Error> {
	let variables = &constraint_system.variables;
	if witness.len() != variables.len() {
		bail!(Error::WitnessSizeMismatch {
			expected: variables.len(),
			got: witness.len(),
		});
	}

	let values = variables
		.iter()
		.map(|var| {
			witness.get(var.id).ok_or_else(|| Error::MissingWitness {
				name: var.name.clone(),
			})
		})
		.collect::<Result<Vec<_>, _>>()?;

	for var in variables.iter() {
		if let VariableKind::Computed { expr } = &var.kind {
			if expr.evaluate(&values)? != values[var.id] {
				bail!(Error::ComputedMismatch {
					name: var.name.clone(),
				});
			}
		}
	}

	for constraint in &constraint_system.constraints {
		let value = constraint.expr.evaluate(&values)?;
		if !value.is_zero() {
			bail!(Error::ConstraintUnsatisfied {
				name: constraint.name.clone(),
				value: value.to_string(),
			});
		}
	}

	for boundary in boundaries {
		let Some(var) = constraint_system
			.public_variables()
			.find(|var| var.name == boundary.name)
		else {
			bail!(Error::UnknownBoundary {
				name: boundary.name.clone(),
			});
		};
		if values[var.id] != boundary.value {
			bail!(Error::BoundaryMismatch {
				name: boundary.name.clone(),
			});
		}
	}

	tracing::debug!(
		n_variables = values.len(),
		n_constraints = constraint_system.constraints.len(),
		n_boundaries = boundaries.len(),
		"witness satisfies the constraint system"
	);
	Ok(())
}
