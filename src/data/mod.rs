/// Data layer: external collaborators of the parsers.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet          .rdf
///        │                            │
///        ▼                            ▼
///   ┌──────────┐               ┌────────────┐
///   │  table    │ path → Table  │    rdf      │ stream → Vec<ReactionRecord>
///   └──────────┘               └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  CellValue, Table (rename / remove columns)
///   └──────────┘
/// ```

pub mod model;
pub mod rdf;
pub mod table;
