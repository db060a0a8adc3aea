use std::sync::Arc;

use crate::color::GenreColors;
use crate::data::aggregate::{
    collapse_tail, group_sum, shorten_title, sort_desc, top_n, AuthorSales, BookSales,
    GenreShare, GENRE_KEEP, TITLE_MAX_LEN, TOP_N,
};
use crate::data::filter::{filter_by_year, YearRange};
use crate::data::model::{BookTables, ScorecardRow};

/// First year of the default selection, clamped into the dataset's bounds.
const DEFAULT_START_YEAR: i32 = 2000;

// ---------------------------------------------------------------------------
// Derived view – everything the charts read, rebuilt on each selection change
// ---------------------------------------------------------------------------

/// Headline metric totals over the selected years.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total_books: u64,
    pub total_reviews: u64,
    pub total_sales: f64,
}

/// All chart inputs derived from the base tables and the current selection.
/// A fresh value every time; nothing here aliases the base tables.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    /// Filtered scorecard rows, in year order as loaded (sparkline series).
    pub yearly: Vec<ScorecardRow>,
    pub summary: Summary,
    /// Genre aggregation, descending, top 5 plus an optional "Others" row.
    pub genre_shares: Vec<GenreShare>,
    /// Top 10 authors by summed sales, descending.
    pub top_authors: Vec<AuthorSales>,
    /// Top 10 (title, author) pairs by summed sales, descending.
    pub top_books: Vec<BookSales>,
}

impl DashboardView {
    /// Recompute the whole view from the immutable base tables.
    ///
    /// This is the reaction run on every selection change: filter each
    /// table, aggregate, rank. An empty selection degrades to zero totals
    /// and empty charts rather than an error.
    pub fn derive(tables: &BookTables, range: YearRange) -> Self {
        let yearly: Vec<ScorecardRow> = filter_by_year(&tables.scorecard, range)
            .into_iter()
            .cloned()
            .collect();

        let summary = Summary {
            total_books: yearly.iter().map(|r| r.total_books).sum(),
            total_reviews: yearly.iter().map(|r| r.total_reviews).sum(),
            total_sales: yearly.iter().map(|r| r.total_sales).sum(),
        };

        let genres = filter_by_year(&tables.genres, range);
        let genre_totals = group_sum(&genres, |r| r.genre.clone(), |r| r.book_count);
        let sorted = sort_desc(genre_totals)
            .into_iter()
            .map(|(genre, book_count)| GenreShare { genre, book_count })
            .collect();
        let genre_shares = collapse_tail(sorted, GENRE_KEEP);

        let authors = filter_by_year(&tables.top_authors, range);
        let top_authors = top_n(
            group_sum(&authors, |r| r.author_name.clone(), |r| r.total_sales),
            TOP_N,
        )
        .into_iter()
        .map(|(author_name, total_sales)| AuthorSales {
            author_name,
            total_sales,
        })
        .collect();

        let books = filter_by_year(&tables.top_books, range);
        let top_books = top_n(
            group_sum(
                &books,
                |r| (r.title.clone(), r.author_name.clone()),
                |r| r.total_sales,
            ),
            TOP_N,
        )
        .into_iter()
        .map(|((title, author_name), total_sales)| BookSales {
            short_title: shorten_title(&title, TITLE_MAX_LEN),
            title,
            author_name,
            total_sales,
        })
        .collect();

        DashboardView {
            yearly,
            summary,
            genre_shares,
            top_authors,
            top_books,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the startup load hands one over).
    pub tables: Option<Arc<BookTables>>,

    /// Slider bounds: min and max year present in the scorecard.
    pub year_bounds: (i32, i32),

    /// Current year-range selection, `start <= end` always.
    pub selection: YearRange,

    /// Chart inputs derived from `tables` and `selection` (cached).
    pub view: DashboardView,

    /// Colours for the current genre shares.
    pub genre_colors: GenreColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            tables: None,
            year_bounds: (DEFAULT_START_YEAR, DEFAULT_START_YEAR),
            selection: YearRange::new(DEFAULT_START_YEAR, DEFAULT_START_YEAR),
            view: DashboardView::default(),
            genre_colors: GenreColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a loaded dataset: reset bounds, apply the default selection
    /// `[2000 clamped into bounds, max]`, and derive the first view.
    pub fn set_tables(&mut self, tables: Arc<BookTables>) {
        let (min_year, max_year) = tables.year_bounds().unwrap_or((DEFAULT_START_YEAR, DEFAULT_START_YEAR));
        self.year_bounds = (min_year, max_year);
        self.selection = YearRange::new(DEFAULT_START_YEAR.clamp(min_year, max_year), max_year);
        self.tables = Some(tables);
        self.status_message = None;
        self.rederive();
    }

    /// Move the lower end of the selection; pushes the upper end along when
    /// dragged past it.
    pub fn set_selection_start(&mut self, start: i32) {
        self.selection.start = start;
        self.selection.end = self.selection.end.max(start);
        self.rederive();
    }

    /// Move the upper end of the selection; pushes the lower end along when
    /// dragged past it.
    pub fn set_selection_end(&mut self, end: i32) {
        self.selection.end = end;
        self.selection.start = self.selection.start.min(end);
        self.rederive();
    }

    /// Recompute the derived view and genre colours after any change to the
    /// dataset or selection.
    pub fn rederive(&mut self) {
        if let Some(tables) = &self.tables {
            self.view = DashboardView::derive(tables, self.selection);
            self.genre_colors =
                GenreColors::new(self.view.genre_shares.iter().map(|g| g.genre.as_str()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::OTHERS_LABEL;
    use crate::data::model::{GenreRow, TopAuthorRow, TopBookRow};

    fn scorecard_row(year: i32, total_books: u64) -> ScorecardRow {
        ScorecardRow {
            year,
            total_books,
            total_reviews: total_books * 10,
            total_sales: total_books as f64 * 100.0,
        }
    }

    fn sample_tables() -> BookTables {
        BookTables {
            scorecard: vec![
                scorecard_row(1999, 10),
                scorecard_row(2000, 20),
                scorecard_row(2001, 30),
            ],
            genres: vec![
                GenreRow { year: 2000, genre: "Fiction".into(), book_count: 12 },
                GenreRow { year: 2001, genre: "Fiction".into(), book_count: 8 },
                GenreRow { year: 2001, genre: "Mystery".into(), book_count: 10 },
                GenreRow { year: 1999, genre: "Romance".into(), book_count: 99 },
            ],
            top_books: vec![
                TopBookRow {
                    year: 2000,
                    title: "The Great Gatsby and Other Stories".into(),
                    author_name: "F. Scott Fitzgerald".into(),
                    total_sales: 300.0,
                },
                TopBookRow {
                    year: 2001,
                    title: "The Great Gatsby and Other Stories".into(),
                    author_name: "F. Scott Fitzgerald".into(),
                    total_sales: 200.0,
                },
                TopBookRow {
                    year: 2001,
                    title: "Dune".into(),
                    author_name: "Frank Herbert".into(),
                    total_sales: 400.0,
                },
            ],
            top_authors: vec![
                TopAuthorRow { year: 2000, author_name: "F. Scott Fitzgerald".into(), total_sales: 300.0 },
                TopAuthorRow { year: 2001, author_name: "F. Scott Fitzgerald".into(), total_sales: 200.0 },
                TopAuthorRow { year: 2001, author_name: "Frank Herbert".into(), total_sales: 400.0 },
            ],
        }
    }

    #[test]
    fn summary_sums_the_filtered_scorecard() {
        // 1999 is outside the range, so only 20 + 30 count.
        let view = DashboardView::derive(&sample_tables(), YearRange::new(2000, 2001));
        assert_eq!(view.summary.total_books, 50);
        assert_eq!(view.summary.total_reviews, 500);
        assert!((view.summary.total_sales - 5000.0).abs() < 1e-9);
        assert_eq!(view.yearly.len(), 2);
    }

    #[test]
    fn genre_shares_merge_years_and_exclude_out_of_range_rows() {
        let view = DashboardView::derive(&sample_tables(), YearRange::new(2000, 2001));
        let labels: Vec<&str> = view.genre_shares.iter().map(|g| g.genre.as_str()).collect();
        // Fiction 12+8=20 beats Mystery 10; Romance (1999) is filtered out
        // and only two genres remain, so no Others row.
        assert_eq!(labels, vec!["Fiction", "Mystery"]);
        assert_eq!(view.genre_shares[0].book_count, 20);
        assert!(labels.iter().all(|l| *l != OTHERS_LABEL));
    }

    #[test]
    fn top_books_merge_per_title_and_keep_the_full_title() {
        let view = DashboardView::derive(&sample_tables(), YearRange::new(2000, 2001));
        assert_eq!(view.top_books.len(), 2);

        // Gatsby: 300 + 200 = 500 beats Dune's 400.
        let first = &view.top_books[0];
        assert_eq!(first.title, "The Great Gatsby and Other Stories");
        assert_eq!(first.short_title, "The Great Gatsb...");
        assert!((first.total_sales - 500.0).abs() < 1e-9);
        assert_eq!(view.top_books[1].short_title, "Dune");
    }

    #[test]
    fn top_authors_rank_by_summed_sales() {
        let view = DashboardView::derive(&sample_tables(), YearRange::new(2000, 2001));
        assert_eq!(view.top_authors[0].author_name, "F. Scott Fitzgerald");
        assert!((view.top_authors[0].total_sales - 500.0).abs() < 1e-9);
        assert_eq!(view.top_authors[1].author_name, "Frank Herbert");
    }

    #[test]
    fn empty_selection_degrades_to_zero_displays() {
        let view = DashboardView::derive(&sample_tables(), YearRange::new(2010, 2020));
        assert_eq!(view.summary, Summary::default());
        assert!(view.yearly.is_empty());
        assert!(view.genre_shares.is_empty());
        assert!(view.top_authors.is_empty());
        assert!(view.top_books.is_empty());
    }

    #[test]
    fn default_selection_starts_at_2000() {
        let mut state = AppState::default();
        state.set_tables(Arc::new(sample_tables()));
        assert_eq!(state.year_bounds, (1999, 2001));
        assert_eq!(state.selection, YearRange::new(2000, 2001));
    }

    #[test]
    fn default_selection_clamps_when_dataset_starts_after_2000() {
        let tables = BookTables {
            scorecard: vec![scorecard_row(2005, 1), scorecard_row(2006, 2)],
            ..Default::default()
        };
        let mut state = AppState::default();
        state.set_tables(Arc::new(tables));
        assert_eq!(state.selection, YearRange::new(2005, 2006));
    }

    #[test]
    fn dragging_one_end_past_the_other_pushes_it_along() {
        let mut state = AppState::default();
        state.set_tables(Arc::new(sample_tables()));

        state.set_selection_start(2001);
        assert_eq!(state.selection, YearRange::new(2001, 2001));

        state.set_selection_end(1999);
        assert_eq!(state.selection, YearRange::new(1999, 1999));
    }

    #[test]
    fn rederive_rebuilds_view_after_selection_change() {
        let mut state = AppState::default();
        state.set_tables(Arc::new(sample_tables()));
        assert_eq!(state.view.summary.total_books, 50);

        state.set_selection_start(1999);
        assert_eq!(state.view.summary.total_books, 60);
    }
}
