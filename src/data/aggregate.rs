use std::collections::BTreeMap;
use std::ops::AddAssign;

// ---------------------------------------------------------------------------
// Tuning constants shared by derivation and charts
// ---------------------------------------------------------------------------

/// Genre groups kept before the tail is folded into "Others".
pub const GENRE_KEEP: usize = 5;
/// Ranked entries shown in the author/book bar charts.
pub const TOP_N: usize = 10;
/// Display length of a book title before it is shortened.
pub const TITLE_MAX_LEN: usize = 15;
/// Label of the synthetic tail group.
pub const OTHERS_LABEL: &str = "Others";

// ---------------------------------------------------------------------------
// Generic group/sum and top-N
// ---------------------------------------------------------------------------

/// Group `rows` by `key` and sum `value` per group.
///
/// One output entry per distinct key present in the input, in ascending key
/// order. The total over all output sums equals the total over all input
/// values (conservation).
pub fn group_sum<R, K, V>(
    rows: &[&R],
    key: impl Fn(&R) -> K,
    value: impl Fn(&R) -> V,
) -> Vec<(K, V)>
where
    K: Ord,
    V: Copy + Default + AddAssign,
{
    let mut acc: BTreeMap<K, V> = BTreeMap::new();
    for row in rows {
        *acc.entry(key(row)).or_default() += value(row);
    }
    acc.into_iter().collect()
}

/// Sort groups descending by their summed value.
///
/// The sort is stable over the ascending-key output of [`group_sum`], so
/// equal sums stay in ascending key order. Deterministic for any input.
pub fn sort_desc<K, V>(mut groups: Vec<(K, V)>) -> Vec<(K, V)>
where
    V: PartialOrd + Copy,
{
    groups.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    groups
}

/// Sort groups descending by their summed value and keep the first `n`.
/// Same tie-break rule as [`sort_desc`].
pub fn top_n<K, V>(groups: Vec<(K, V)>, n: usize) -> Vec<(K, V)>
where
    V: PartialOrd + Copy,
{
    let mut sorted = sort_desc(groups);
    sorted.truncate(n);
    sorted
}

// ---------------------------------------------------------------------------
// Derived row types consumed by the charts
// ---------------------------------------------------------------------------

/// One slice of the genre pie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreShare {
    pub genre: String,
    pub book_count: u64,
}

/// One bar of the top-authors chart.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorSales {
    pub author_name: String,
    pub total_sales: f64,
}

/// One bar of the top-books chart. `title` stays untruncated for the hover
/// read-out; `short_title` is the axis label.
#[derive(Debug, Clone, PartialEq)]
pub struct BookSales {
    pub title: String,
    pub short_title: String,
    pub author_name: String,
    pub total_sales: f64,
}

// ---------------------------------------------------------------------------
// Tail collapse and title shortening
// ---------------------------------------------------------------------------

/// Fold everything past the first `keep` groups of a descending-sorted genre
/// aggregation into a single "Others" row appended at the end.
///
/// The Others row is only emitted when the tail sums to something strictly
/// positive, so a dataset with `keep` or fewer genres comes back unchanged.
/// Book counts are conserved either way. Output length is at most `keep + 1`.
pub fn collapse_tail(sorted: Vec<GenreShare>, keep: usize) -> Vec<GenreShare> {
    if sorted.len() <= keep {
        return sorted;
    }
    let mut head = sorted;
    let tail = head.split_off(keep);
    let rest: u64 = tail.iter().map(|g| g.book_count).sum();
    if rest > 0 {
        head.push(GenreShare {
            genre: OTHERS_LABEL.to_string(),
            book_count: rest,
        });
    }
    head
}

/// Shorten a title to `max_len` characters plus an ellipsis for axis labels.
///
/// Counts characters, not bytes, so multi-byte titles never split a code
/// point. Titles already short enough come back unchanged.
pub fn shorten_title(title: &str, max_len: usize) -> String {
    if title.chars().count() <= max_len {
        return title.to_string();
    }
    let mut short: String = title.chars().take(max_len).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::GenreRow;

    fn genre_row(year: i32, genre: &str, book_count: u64) -> GenreRow {
        GenreRow {
            year,
            genre: genre.to_string(),
            book_count,
        }
    }

    fn share(genre: &str, book_count: u64) -> GenreShare {
        GenreShare {
            genre: genre.to_string(),
            book_count,
        }
    }

    #[test]
    fn group_sum_conserves_the_total() {
        let rows = vec![
            genre_row(2000, "Fiction", 10),
            genre_row(2001, "Fiction", 15),
            genre_row(2000, "Mystery", 7),
            genre_row(2002, "Romance", 3),
        ];
        let refs: Vec<&GenreRow> = rows.iter().collect();
        let grouped = group_sum(&refs, |r| r.genre.clone(), |r| r.book_count);

        let input_total: u64 = rows.iter().map(|r| r.book_count).sum();
        let output_total: u64 = grouped.iter().map(|(_, n)| *n).sum();
        assert_eq!(input_total, output_total);
        assert_eq!(grouped.len(), 3);
    }

    #[test]
    fn group_sum_emits_keys_in_ascending_order() {
        let rows = vec![
            genre_row(2000, "Mystery", 1),
            genre_row(2000, "Fiction", 1),
            genre_row(2000, "Romance", 1),
        ];
        let refs: Vec<&GenreRow> = rows.iter().collect();
        let grouped = group_sum(&refs, |r| r.genre.clone(), |r| r.book_count);
        let keys: Vec<&str> = grouped.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Fiction", "Mystery", "Romance"]);
    }

    #[test]
    fn top_n_sorts_descending_and_truncates() {
        let groups = vec![("a", 3.0), ("b", 9.0), ("c", 6.0), ("d", 1.0)];
        let top = top_n(groups, 2);
        assert_eq!(top, vec![("b", 9.0), ("c", 6.0)]);
    }

    #[test]
    fn top_n_breaks_ties_by_ascending_key() {
        // Same sums: the stable sort must keep group_sum's key order.
        let groups = vec![("alpha", 5.0), ("beta", 5.0), ("gamma", 7.0)];
        let top = top_n(groups, 3);
        assert_eq!(top, vec![("gamma", 7.0), ("alpha", 5.0), ("beta", 5.0)]);
    }

    #[test]
    fn collapse_folds_the_tail_into_others() {
        // Counts A..G from the dashboard's acceptance scenario.
        let sorted = vec![
            share("A", 100),
            share("B", 80),
            share("C", 60),
            share("D", 40),
            share("E", 20),
            share("F", 5),
            share("G", 3),
        ];
        let collapsed = collapse_tail(sorted, 5);

        assert_eq!(collapsed.len(), 6);
        let labels: Vec<&str> = collapsed.iter().map(|g| g.genre.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D", "E", OTHERS_LABEL]);
        assert_eq!(collapsed.last().unwrap().book_count, 8);
    }

    #[test]
    fn collapse_conserves_book_counts() {
        let sorted: Vec<GenreShare> = (0..9u64)
            .map(|i| share(&format!("g{i}"), 10 * (9 - i)))
            .collect();
        let input_total: u64 = sorted.iter().map(|g| g.book_count).sum();
        let collapsed = collapse_tail(sorted, 5);
        let output_total: u64 = collapsed.iter().map(|g| g.book_count).sum();
        assert_eq!(input_total, output_total);
        assert!(collapsed.len() <= 6);
    }

    #[test]
    fn collapse_with_five_or_fewer_genres_is_identity() {
        let sorted = vec![share("A", 4), share("B", 2)];
        let collapsed = collapse_tail(sorted.clone(), 5);
        assert_eq!(collapsed, sorted);
    }

    #[test]
    fn collapse_skips_others_when_tail_is_all_zero() {
        let sorted = vec![
            share("A", 5),
            share("B", 4),
            share("C", 3),
            share("D", 2),
            share("E", 1),
            share("F", 0),
            share("G", 0),
        ];
        let collapsed = collapse_tail(sorted, 5);
        assert_eq!(collapsed.len(), 5);
        assert!(collapsed.iter().all(|g| g.genre != OTHERS_LABEL));
    }

    #[test]
    fn shorten_leaves_short_titles_alone() {
        assert_eq!(shorten_title("Dune", TITLE_MAX_LEN), "Dune");
        assert_eq!(
            shorten_title("Exactly15Chars!", TITLE_MAX_LEN),
            "Exactly15Chars!"
        );
    }

    #[test]
    fn shorten_cuts_long_titles_to_fifteen_chars_plus_ellipsis() {
        let short = shorten_title("The Great Gatsby and Other Stories", TITLE_MAX_LEN);
        assert_eq!(short, "The Great Gatsb...");
        assert_eq!(short.chars().count(), TITLE_MAX_LEN + 3);
    }

    #[test]
    fn shorten_never_exceeds_max_len_plus_ellipsis() {
        for title in ["x", "a somewhat longer title", "The Great Gatsby and Other Stories"] {
            assert!(shorten_title(title, TITLE_MAX_LEN).chars().count() <= TITLE_MAX_LEN + 3);
        }
    }

    #[test]
    fn shorten_counts_characters_not_bytes() {
        // 20 multi-byte characters; byte-indexed slicing would panic.
        let title = "éééééééééééééééééééé";
        let short = shorten_title(title, TITLE_MAX_LEN);
        assert_eq!(short.chars().count(), TITLE_MAX_LEN + 3);
        assert!(short.ends_with("..."));
    }
}
