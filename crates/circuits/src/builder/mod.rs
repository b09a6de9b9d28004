// Copyright 2024-2025 Irreducible Inc.

pub mod constraint_system;
pub mod test_utils;
pub mod types;
pub mod witness;

pub use constraint_system::ConstraintSystemBuilder;
