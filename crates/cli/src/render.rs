use stockdash_core::classify::{self, Classification};
use stockdash_core::domain::recommendation::Recommendation;
use stockdash_core::domain::stock::StockRating;
use stockdash_core::view::{Page, StockRow};
use std::fmt::Write;

const EMPTY_STOCKS: &str = "No stocks found";
const EMPTY_RECOMMENDATIONS: &str = "No recommendations found";

/// Left-aligned text table sized to its widest cells.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_line(&mut out, &widths, &header_cells);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &widths, &rule);
    for row in rows {
        push_line(&mut out, &widths, row);
    }
    out
}

fn push_line(out: &mut String, widths: &[usize], cells: &[String]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let pad = width.saturating_sub(cell.chars().count());
        line.push_str(cell);
        line.extend(std::iter::repeat(' ').take(pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn change(from: &str, to: &str, class: Classification) -> String {
    if from.is_empty() && to.is_empty() {
        return "-".to_string();
    }
    format!("{from} → {to} {}", class.symbol())
}

fn percent(value: f64) -> String {
    format!("{value:+.1}%")
}

pub fn stocks_table(page: &Page<'_>) -> String {
    if page.total == 0 {
        return format!("{EMPTY_STOCKS}\n");
    }

    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|stock| {
            let row = StockRow::from(*stock);
            vec![
                row.ticker,
                row.company,
                row.brokerage,
                row.action,
                change(&row.rating_from, &row.rating_to, row.rating_class),
                change(&row.target_from, &row.target_to, row.target_class),
                percent(row.target_change_pct),
                row.time,
            ]
        })
        .collect();

    let mut out = table(
        &[
            "TICKER",
            "COMPANY",
            "BROKERAGE",
            "ACTION",
            "RATING",
            "TARGET",
            "CHANGE",
            "TIME",
        ],
        &rows,
    );
    let _ = writeln!(
        out,
        "\npage {}/{} ({} matching, {} per page)",
        page.page, page.page_count, page.total, page.page_size
    );
    out
}

pub fn stock_card(stock: &StockRating) -> String {
    let row = StockRow::from(stock);
    let mut out = String::new();
    let _ = writeln!(out, "{} - {}", row.ticker, row.company);
    let _ = writeln!(out, "  brokerage:  {}", row.brokerage);
    let _ = writeln!(out, "  action:     {}", row.action);
    let _ = writeln!(
        out,
        "  rating:     {} ({})",
        change(&row.rating_from, &row.rating_to, row.rating_class),
        row.rating_class
    );
    let _ = writeln!(
        out,
        "  target:     {} ({})",
        change(&row.target_from, &row.target_to, row.target_class),
        percent(row.target_change_pct)
    );
    let _ = writeln!(out, "  time:       {}", row.time);
    let _ = writeln!(out, "  updated:    {}", classify::format_date(&stock.updated_at));
    out
}

pub fn recommendations_table(recommendations: &[Recommendation]) -> String {
    if recommendations.is_empty() {
        return format!("{EMPTY_RECOMMENDATIONS}\n");
    }

    let rows: Vec<Vec<String>> = recommendations
        .iter()
        .enumerate()
        .map(|(idx, rec)| {
            let stock = &rec.stock;
            vec![
                (idx + 1).to_string(),
                stock.ticker.clone(),
                stock.company.clone(),
                format!("{:.2}", rec.score),
                percent(rec.potential_up),
                change(
                    &stock.rating_from,
                    &stock.rating_to,
                    classify::rating_class(&stock.rating_from, &stock.rating_to),
                ),
                rec.reasons.join("; "),
            ]
        })
        .collect();

    table(
        &["#", "TICKER", "COMPANY", "SCORE", "UPSIDE", "RATING", "REASONS"],
        &rows,
    )
}
