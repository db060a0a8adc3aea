use serde::Deserialize;

// ---------------------------------------------------------------------------
// Row types – one struct per source table
// ---------------------------------------------------------------------------

/// One scorecard row: per-year rollup of totals. At most one row per year
/// (the loader rejects duplicates).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScorecardRow {
    pub year: i32,
    pub total_books: u64,
    pub total_reviews: u64,
    pub total_sales: f64,
}

/// Books counted per genre, per year. Multiple rows per year, one per genre.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenreRow {
    pub year: i32,
    pub genre: String,
    pub book_count: u64,
}

/// Sales of a single title in a single year.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopBookRow {
    pub year: i32,
    pub title: String,
    pub author_name: String,
    pub total_sales: f64,
}

/// Sales of a single author in a single year.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopAuthorRow {
    pub year: i32,
    pub author_name: String,
    pub total_sales: f64,
}

// ---------------------------------------------------------------------------
// YearKeyed – the one column every table shares
// ---------------------------------------------------------------------------

/// Rows that carry a published-year column. The range filter is written once
/// against this trait instead of once per table.
pub trait YearKeyed {
    fn year(&self) -> i32;
}

impl YearKeyed for ScorecardRow {
    fn year(&self) -> i32 {
        self.year
    }
}

impl YearKeyed for GenreRow {
    fn year(&self) -> i32 {
        self.year
    }
}

impl YearKeyed for TopBookRow {
    fn year(&self) -> i32 {
        self.year
    }
}

impl YearKeyed for TopAuthorRow {
    fn year(&self) -> i32 {
        self.year
    }
}

// ---------------------------------------------------------------------------
// BookTables – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The four loaded tables. Built once by the loader, then shared immutably
/// for the rest of the session; every downstream table is a fresh derived
/// value, never a mutation of these.
#[derive(Debug, Clone, Default)]
pub struct BookTables {
    pub scorecard: Vec<ScorecardRow>,
    pub genres: Vec<GenreRow>,
    pub top_books: Vec<TopBookRow>,
    pub top_authors: Vec<TopAuthorRow>,
}

impl BookTables {
    /// Minimum and maximum year present in the scorecard, or `None` when it
    /// is empty. These bound the year-range selector.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let mut years = self.scorecard.iter().map(|r| r.year);
        let first = years.next()?;
        let (min, max) = years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
        Some((min, max))
    }

    /// Total number of rows across all four tables.
    pub fn row_count(&self) -> usize {
        self.scorecard.len() + self.genres.len() + self.top_books.len() + self.top_authors.len()
    }
}
