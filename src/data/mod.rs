/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  scorecard / genre / top_books / top_authors (.csv / .json)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse files → BookTables (memoized per path)
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ BookTables │  four immutable row tables
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive year range → row subsequence
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  group/sum, top-N, tail collapse
///   └───────────┘
/// ```
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
