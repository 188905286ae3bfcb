//! Crate error type.
//!
//! Precondition violations (caller bugs — malformed shapes, mismatched
//! arrays, non-finite input) surface here. Numerical degeneracy inside a
//! running step never reaches this type; it is absorbed by the floors
//! described alongside the components that need them.

pub use anyhow::{Context, Error, Result, anyhow, bail, ensure};

/// Checks shared by every precondition-validating constructor.
pub(crate) fn ensure_finite(label: &str, v: f32) -> Result<()> {
    ensure!(v.is_finite(), "{label} must be finite, got {v}");
    Ok(())
}

pub(crate) fn ensure_finite_vec(label: &str, v: crate::vector::Vec2) -> Result<()> {
    ensure!(
        v.x.is_finite() && v.y.is_finite(),
        "{label} must be finite, got ({}, {})",
        v.x,
        v.y
    );
    Ok(())
}
