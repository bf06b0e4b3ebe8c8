//! Data layer: core types, format parsers, and JSON emission.
//!
//! Architecture:
//! ```text
//!  .csv / .eta.spd + .k.spd
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file(s) → SpectralTable(s)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────┐
//!   │ MaterialRecord │  name + Eta + optional K, trimmed to [360, 830] nm
//!   └───────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  writer   │  SampledSpectrumTexture JSON, one file per material
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod writer;
