// Copyright 2025 Irreducible Inc.

//! Gadgets for floating-point addition over a prime field.
//!
//! Every gadget takes the [`builder::ConstraintSystemBuilder`], a name that becomes the namespace
//! of everything it declares, and its input variables. In prover mode it also computes the values
//! of the variables it declares, so a circuit is built and its witness generated in one pass.

pub mod bitwise;
pub mod builder;
pub mod float;
pub mod range;
pub mod shift;
