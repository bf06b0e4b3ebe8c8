//! Conversion utilities for tabulated refractive-index data.
//!
//! Two pipelines share one data model: refractiveindex.info-style CSV
//! exports and Mitsuba2 `.spd` tables both end up as per-material
//! `SampledSpectrumTexture` JSON files for the renderer's material system.

pub mod convert;
pub mod data;
pub mod error;
pub mod scan;
