// Copyright 2025 Irreducible Inc.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("expression reads variable {index} but only {n_vars} values were provided")]
	MissingVariable { index: usize, n_vars: usize },
	#[error("expression reads variable {index}, which has no value")]
	UnassignedVariable { index: usize },
}
