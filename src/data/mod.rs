//! Data layer: passenger types, loading, and selection.
//!
//! Architecture:
//! ```text
//!     titanic.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse rows → Manifest (family size derived here)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Manifest  │  Vec<Passenger>, source order
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  predicates → Selection (borrowed subsets)
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod filter;
