// Copyright 2025 Irreducible Inc.

//! Symbolic arithmetic over prime fields.
//!
//! Constraints and enforced variable definitions are multivariate polynomials over witness
//! variables, represented as [`ArithExpr`] trees.

mod arith_expr;
mod error;

pub use arith_expr::*;
pub use error::*;
