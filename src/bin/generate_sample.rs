use std::fs;
use std::path::Path;

/// Minimal deterministic PRNG (splitmix64). Seeded, no clock involved, so
/// repeated runs write byte-identical datasets.
struct SampleRng {
    state: u64,
}

impl SampleRng {
    fn new(seed: u64) -> Self {
        SampleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

const YEARS: std::ops::RangeInclusive<i32> = 1990..=2023;

const GENRES: [(&str, u64); 8] = [
    ("Fiction", 120),
    ("Mystery", 90),
    ("Romance", 75),
    ("Science Fiction", 60),
    ("Fantasy", 50),
    ("Biography", 30),
    ("History", 20),
    ("Poetry", 10),
];

// (title, author) – several titles long enough to exercise the shortened
// axis labels of the top-books chart.
const BOOKS: [(&str, &str); 16] = [
    ("The Great Gatsby and Other Stories", "F. Scott Fitzgerald"),
    ("Dune", "Frank Herbert"),
    ("A Brief History of Nearly Everything", "Bill Bryson"),
    ("Pride and Prejudice", "Jane Austen"),
    ("The Name of the Wind", "Patrick Rothfuss"),
    ("Murder on the Orient Express", "Agatha Christie"),
    ("The Left Hand of Darkness", "Ursula K. Le Guin"),
    ("Norwegian Wood", "Haruki Murakami"),
    ("The Remains of the Day", "Kazuo Ishiguro"),
    ("One Hundred Years of Solitude", "Gabriel García Márquez"),
    ("The Shadow of the Wind", "Carlos Ruiz Zafón"),
    ("Beloved", "Toni Morrison"),
    ("The Master and Margarita", "Mikhail Bulgakov"),
    ("Things Fall Apart", "Chinua Achebe"),
    ("Snow Country", "Yasunari Kawabata"),
    ("The Wind-Up Bird Chronicle", "Haruki Murakami"),
];

fn main() {
    let mut rng = SampleRng::new(42);
    let out_dir = Path::new("dataset");
    fs::create_dir_all(out_dir).expect("Failed to create dataset directory");

    let mut scorecard = csv::Writer::from_path(out_dir.join("scorecard_data.csv"))
        .expect("Failed to create scorecard_data.csv");
    let mut genre = csv::Writer::from_path(out_dir.join("genre_data.csv"))
        .expect("Failed to create genre_data.csv");
    let mut top_books = csv::Writer::from_path(out_dir.join("top_books_data.csv"))
        .expect("Failed to create top_books_data.csv");
    let mut top_authors = csv::Writer::from_path(out_dir.join("top_authors_data.csv"))
        .expect("Failed to create top_authors_data.csv");

    scorecard
        .write_record(["year", "total_books", "total_reviews", "total_sales"])
        .unwrap();
    genre.write_record(["year", "genre", "book_count"]).unwrap();
    top_books
        .write_record(["year", "title", "author_name", "total_sales"])
        .unwrap();
    top_authors
        .write_record(["year", "author_name", "total_sales"])
        .unwrap();

    let mut rows = 0usize;
    for year in YEARS {
        // Catalogue grows a few percent per year.
        let growth = 1.0 + (year - 1990) as f64 * 0.04;

        // Genre breakdown first; the scorecard totals are derived from it so
        // the two tables stay consistent.
        let mut total_books = 0u64;
        for (name, base) in GENRES {
            let jitter = 0.75 + rng.next_f64() * 0.5;
            let count = ((base as f64) * growth * jitter).round() as u64;
            genre
                .write_record([year.to_string(), name.to_string(), count.to_string()])
                .unwrap();
            total_books += count;
            rows += 1;
        }

        let total_reviews = total_books * rng.range(25, 80);
        let total_sales = total_books as f64 * (8.0 + rng.next_f64() * 14.0);
        scorecard
            .write_record([
                year.to_string(),
                total_books.to_string(),
                total_reviews.to_string(),
                format!("{total_sales:.2}"),
            ])
            .unwrap();
        rows += 1;

        // A rotating subset of the catalogue charts each year.
        for (i, (title, author)) in BOOKS.iter().enumerate() {
            if (rng.next_u64() + i as u64) % 4 == 0 {
                continue;
            }
            let sales = 500.0 + rng.next_f64() * 9500.0;
            top_books
                .write_record([
                    year.to_string(),
                    title.to_string(),
                    author.to_string(),
                    format!("{sales:.2}"),
                ])
                .unwrap();
            top_authors
                .write_record([
                    year.to_string(),
                    author.to_string(),
                    format!("{:.2}", sales * (0.9 + rng.next_f64() * 0.6)),
                ])
                .unwrap();
            rows += 2;
        }
    }

    scorecard.flush().unwrap();
    genre.flush().unwrap();
    top_books.flush().unwrap();
    top_authors.flush().unwrap();

    println!(
        "Wrote {} rows across 4 tables to {}",
        rows,
        out_dir.display()
    );
}
