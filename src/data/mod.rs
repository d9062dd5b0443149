/// Data layer: input types and the two-phase reader.
///
/// Architecture:
/// ```text
///   annotated .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  header lines → Options,  CSV body → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  categories + Vec<Series> (Option<f64> cells)
///   └──────────┘
///        │
///        ▼
///   table / chart renderers
/// ```

pub mod loader;
pub mod model;
