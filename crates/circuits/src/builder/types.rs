// Copyright 2025 Irreducible Inc.

use zkfloat_core::Var;
use zkfloat_math::ArithExpr;

/// The field every circuit in this crate is built over.
pub type F = zkfloat_field::Bn254Scalar;

pub type Variable = Var<F>;
pub type Expr = ArithExpr<F>;
