//! Survival analysis over a loaded manifest.
//!
//! ```text
//!   Selection ──► stats    (rates, ages, fares, argmax)
//!        │
//!        ▼
//!      group    (GroupSummary per key of a dimension)
//!        │
//!        ├──► report   (text / JSON analysis file)
//!        └──► summary  (console figures, table preview)
//! ```

pub mod group;
pub mod report;
pub mod stats;
pub mod summary;
