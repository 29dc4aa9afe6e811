/// Data layer: core types, loading, filtering, and the derived views.
///
/// Architecture:
/// ```text
///  .csv / .json
///       │
///       ▼
///  ┌──────────┐
///  │  loader   │  read + clean source → Catalog
///  └──────────┘
///       │
///       ▼
///  ┌──────────┐
///  │ Catalog   │  immutable rows + header, shared per process
///  └──────────┘
///       │
///       ▼
///  ┌──────────┐
///  │  filter   │  Selection predicates → FilteredView
///  └──────────┘
///       │
///       ├─▶ options    cascading dropdown domains
///       ├─▶ aggregate  Data-Mart histogram counts
///       └─▶ export     CSV download payload
/// ```
pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod options;
