//! Data layer: canonical records, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  .json / .csv (`,` `;` `|`)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  file → raw rows
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ normalize │  raw row → JobRecord (per source kind)
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  FilterState predicates → filtered indices
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────────────┐
//!   │ aggregate / metrics   │  per-chart datasets
//!   └───────────────────────┘
//! ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod normalize;
