// Copyright 2025 Irreducible Inc.

/// Error thrown when converting between field elements and machine integers fails.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
	#[error("field element needs {bits} bits and does not fit in a {target}-bit integer")]
	ValueTooWide { bits: usize, target: usize },
	#[error("bit width {bits} exceeds the maximum of {max} for this field")]
	BitWidthTooLarge { bits: usize, max: usize },
}
