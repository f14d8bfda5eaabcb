/// Data layer: tabular core types, CSV I/O, and the wine feature schema.
///
/// Architecture:
/// ```text
///   .csv upload                manual form fields
///        │                            │
///        ▼                            ▼
///   ┌──────────┐               ┌────────────┐
///   │  loader   │  parse file  │  features   │  eleven [min,max,default]
///   └──────────┘               └────────────┘
///        │                            │
///        └──────────┬─────────────────┘
///                   ▼
///             ┌──────────┐
///             │  Table    │  ordered named numeric columns
///             └──────────┘
///                   │
///                   ▼
///            model::Predictor
/// ```

pub mod features;
pub mod loader;
pub mod table;
