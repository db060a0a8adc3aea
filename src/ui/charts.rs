use std::f64::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Polygon};

use crate::data::aggregate::{AuthorSales, BookSales};
use crate::state::AppState;

const SPARKLINE_HEIGHT: f32 = 52.0;
const PIE_HEIGHT: f32 = 340.0;
const BAR_CHART_HEIGHT: f32 = 230.0;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render the whole dashboard: metric tiles, genre pie, ranked bar charts.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.tables.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset folder to view the dashboard  (File → Open…)");
        });
        return;
    }

    metric_row(ui, state);
    ui.separator();

    ui.columns(2, |cols| {
        genre_pie(&mut cols[0], state);

        cols[1].strong("Top 10 Authors by Sales");
        author_bars(&mut cols[1], &state.view.top_authors);
        cols[1].add_space(8.0);
        cols[1].strong("Top 10 Books by Sales");
        book_bars(&mut cols[1], &state.view.top_books);
    });
}

// ---------------------------------------------------------------------------
// Metric tiles with trend sparklines
// ---------------------------------------------------------------------------

fn metric_row(ui: &mut Ui, state: &AppState) {
    let view = &state.view;
    let yearly = &view.yearly;

    ui.columns(3, |cols| {
        metric_tile(
            &mut cols[0],
            "Total Books",
            &format_count(view.summary.total_books),
            "spark_books",
            yearly.iter().map(|r| [r.year as f64, r.total_books as f64]),
        );
        metric_tile(
            &mut cols[1],
            "Total Reviews",
            &format_count(view.summary.total_reviews),
            "spark_reviews",
            yearly.iter().map(|r| [r.year as f64, r.total_reviews as f64]),
        );
        metric_tile(
            &mut cols[2],
            "Total Sales",
            &format_money(view.summary.total_sales),
            "spark_sales",
            yearly.iter().map(|r| [r.year as f64, r.total_sales]),
        );
    });
}

fn metric_tile(
    ui: &mut Ui,
    label: &str,
    value: &str,
    id: &str,
    points: impl Iterator<Item = [f64; 2]>,
) {
    ui.horizontal(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(label);
            ui.heading(RichText::new(value).strong());
        });
        sparkline(ui, id, points.collect());
    });
}

/// A bare per-year trend line: no axes, no grid, no interaction.
fn sparkline(ui: &mut Ui, id: &str, points: Vec<[f64; 2]>) {
    Plot::new(id)
        .height(SPARKLINE_HEIGHT)
        .show_axes([false, false])
        .show_grid([false, false])
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            let line = Line::new(PlotPoints::from(points))
                .color(Color32::LIGHT_BLUE)
                .width(1.5);
            plot_ui.line(line);
        });
}

// ---------------------------------------------------------------------------
// Genre pie (top 5 + Others)
// ---------------------------------------------------------------------------

/// Proportional genre shares as pie sectors built from plot polygons.
/// Slices start at 12 o'clock and run clockwise, largest first.
fn genre_pie(ui: &mut Ui, state: &AppState) {
    ui.strong("Book Distribution by Genre");

    let shares = &state.view.genre_shares;
    let total: u64 = shares.iter().map(|s| s.book_count).sum();
    if total == 0 {
        ui.weak("No books in the selected years.");
        return;
    }

    Plot::new("genre_pie")
        .height(PIE_HEIGHT)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes([false, false])
        .show_grid([false, false])
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            let mut angle = FRAC_PI_2;
            for share in shares {
                let sweep = share.book_count as f64 / total as f64 * TAU;
                // ~2° arc resolution keeps thin slices visible.
                let steps = (sweep / 0.035).ceil().max(1.0) as usize;

                let mut points = Vec::with_capacity(steps + 2);
                points.push([0.0, 0.0]);
                for i in 0..=steps {
                    let a = angle - sweep * (i as f64 / steps as f64);
                    points.push([a.cos(), a.sin()]);
                }

                let percent = share.book_count as f64 / total as f64 * 100.0;
                let sector = Polygon::new(PlotPoints::from(points))
                    .name(format!("{} ({percent:.1}%)", share.genre))
                    .fill_color(state.genre_colors.color_for(&share.genre))
                    .stroke(Stroke::new(1.0, Color32::WHITE));
                plot_ui.polygon(sector);

                angle -= sweep;
            }
        });
}

// ---------------------------------------------------------------------------
// Ranked horizontal bar charts
// ---------------------------------------------------------------------------

fn author_bars(ui: &mut Ui, authors: &[AuthorSales]) {
    let entries: Vec<(String, String, f64)> = authors
        .iter()
        .map(|a| (a.author_name.clone(), a.author_name.clone(), a.total_sales))
        .collect();
    ranked_bars(ui, "top_authors", entries, Color32::LIGHT_BLUE);
}

fn book_bars(ui: &mut Ui, books: &[BookSales]) {
    // Axis shows the shortened title; the hover read-out carries the full
    // title and author.
    let entries: Vec<(String, String, f64)> = books
        .iter()
        .map(|b| {
            (
                b.short_title.clone(),
                format!("{} — {}", b.title, b.author_name),
                b.total_sales,
            )
        })
        .collect();
    ranked_bars(ui, "top_books", entries, Color32::LIGHT_GREEN);
}

/// Horizontal bars for a descending-ranked list. The first (largest) entry
/// is drawn topmost. `entries` are (axis_label, hover_name, value).
fn ranked_bars(ui: &mut Ui, id: &str, entries: Vec<(String, String, f64)>, fill: Color32) {
    if entries.is_empty() {
        ui.weak("No sales in the selected years.");
        return;
    }

    let n = entries.len();
    // Row j (bottom-up plot coordinate) shows the (n-1-j)-th ranked entry.
    let axis_labels: Vec<String> = entries
        .iter()
        .rev()
        .map(|(label, _, _)| label.clone())
        .collect();

    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(rank, (_, hover, sales))| {
            Bar::new((n - 1 - rank) as f64, *sales)
                .width(0.7)
                .name(hover.clone())
                .fill(fill)
        })
        .collect();

    let chart = BarChart::new(bars)
        .horizontal()
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
            format!("{}\n{}", bar.name, format_money(bar.value))
        }));

    Plot::new(id)
        .height(BAR_CHART_HEIGHT)
        .x_axis_label("Sales ($)")
        .show_grid([true, false])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(0.0)
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 0.001 || rounded < 0.0 {
                return String::new();
            }
            axis_labels
                .get(rounded as usize)
                .cloned()
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

// ---------------------------------------------------------------------------
// Number formatting (matches the metric card formats of the dashboard)
// ---------------------------------------------------------------------------

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234567` → `"1,234,567"`.
pub fn format_count(n: u64) -> String {
    group_thousands(n)
}

/// `1234.5` → `"$1,234.50"`. Sales are never negative in this data.
pub fn format_money(v: f64) -> String {
    let cents = (v * 100.0).round() as u64;
    format!("${}.{:02}", group_thousands(cents / 100), cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_group_digits_in_threes() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn money_has_dollar_sign_and_two_decimals() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(2000.25), "$2,000.25");
        assert_eq!(format_money(999.999), "$1,000.00");
    }
}
