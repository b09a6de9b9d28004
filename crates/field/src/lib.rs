// Copyright 2025 Irreducible Inc.

//! Prime field support for the floating-point circuits.
//!
//! Every witness value lives in a single large prime field. The circuits use the scalar field of
//! the BN254 curve, the field most general-purpose SNARK toolchains compile to, and reach it
//! through the `ark-ff` traits so nothing below the circuit layer depends on the concrete choice.
//! The helpers here cover what the gadget hints need on top of field arithmetic: powers of two,
//! little-endian bit extraction and conversion back to machine integers.

pub mod error;
pub mod util;

pub use ark_ff::{BigInteger, Field, One, PrimeField, Zero};
pub use error::*;
pub use util::*;

/// Scalar field of the BN254 curve, a 254-bit prime field.
pub type Bn254Scalar = ark_bn254::Fr;
