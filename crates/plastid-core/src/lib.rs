//! Core types for Plastid pathway-map conversion.
//!
//! This crate holds the leaf-level building blocks shared by the converter:
//!
//! - [`geometry`] - points, sizes, bounds, affine frames, anchors, and
//!   boundary crossings used to route connectors
//! - [`identifier`] - interned identifiers keying every cross-reference table
//! - [`diagnostic`] - non-fatal condition reporting and accumulation

pub mod diagnostic;
pub mod geometry;
pub mod identifier;
