//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the analysis code stays clean and testable
//! - output changes are localized (and covered by plain-text snapshot tests)
//!
//! Formatters return strings; nothing here prints.

use chrono::NaiveDateTime;
use crossterm::style::{Color, Stylize, style};

use crate::domain::{DropThreshold, EntryChange, Product, Trend};
use crate::report::{Alert, HistoryView, ListRow, ProductStats};

const RULE_WIDE: usize = 80;
const RULE_NARROW: usize = 60;

/// Optional ANSI colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, text: impl Into<String>, color: Color) -> String {
        let text = text.into();
        if self.enabled {
            style(text).with(color).to_string()
        } else {
            text
        }
    }

    fn bold(&self, text: impl Into<String>) -> String {
        let text = text.into();
        if self.enabled { style(text).bold().to_string() } else { text }
    }

    /// Rising prices are bad news for a buyer, falling prices good news.
    fn trend(&self, text: impl Into<String>, trend: Option<Trend>) -> String {
        match trend {
            Some(Trend::Rising) => self.paint(text, Color::Red),
            Some(Trend::Falling) => self.paint(text, Color::Green),
            Some(Trend::Stable) => self.paint(text, Color::Cyan),
            None => self.paint(text, Color::Yellow),
        }
    }

    fn change(&self, text: impl Into<String>, delta: f64) -> String {
        if delta < 0.0 {
            self.paint(text, Color::Green)
        } else if delta > 0.0 {
            self.paint(text, Color::Red)
        } else {
            self.paint(text, Color::Cyan)
        }
    }
}

/// `list`: one row per product.
pub fn format_product_list(rows: &[ListRow], palette: Palette) -> String {
    let mut out = String::new();

    if rows.is_empty() {
        out.push_str(&palette.paint("No products being tracked.", Color::Yellow));
        out.push('\n');
        out.push_str("Use 'tracker add <url> <name>' to add a product.\n");
        return out;
    }

    let rule = palette.paint("=".repeat(RULE_WIDE), Color::Magenta);
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&palette.bold(
        format!("{:<35} {:<15} {:<12} {:<10}", "Product", "Price", "Entries", "Trend")
            .trim_end()
            .to_string(),
    ));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for row in rows {
        let price = row.latest.map(|p| format!("${p:.2}")).unwrap_or_else(|| "N/A".to_string());
        let trend = row.trend.map(Trend::label).unwrap_or("N/A");
        let line = format!(
            "{:<35} {} {:<12} {}",
            truncate(&row.name, 35),
            palette.paint(format!("{price:<15}"), Color::Yellow),
            row.entries,
            palette.trend(trend, row.trend),
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&rule);
    out.push('\n');
    out
}

/// `history`: every entry with its change, then trend and overall change.
pub fn format_history(product: &Product, view: Option<&HistoryView>, palette: Palette) -> String {
    let mut out = String::new();
    out.push_str(&format!("Price History for: {}\n", palette.bold(product.name.as_str())));
    out.push_str(&format!("URL: {}\n", palette.paint(product.url.as_str(), Color::Blue)));
    out.push('\n');
    out.push_str(&"=".repeat(RULE_NARROW));
    out.push('\n');

    let Some(view) = view else {
        out.push_str("No price history available.\n");
        return out;
    };

    out.push_str(&format!("{:<25} {:<15} {}\n", "Date", "Price", "Change"));
    out.push_str(&"-".repeat(RULE_NARROW));
    out.push('\n');

    for (obs, change) in &view.entries {
        let delta = match change {
            EntryChange::Up { .. } => 1.0,
            EntryChange::Down { .. } => -1.0,
            EntryChange::Initial | EntryChange::NoChange => 0.0,
        };
        let price = format!("${:.2}", obs.price);
        let change_text = change.to_string();
        let change_text = if delta == 0.0 { change_text } else { palette.change(change_text, delta) };
        out.push_str(&format!(
            "{:<25} {:<15} {}\n",
            fmt_datetime(obs.timestamp),
            price,
            change_text
        ));
    }

    out.push('\n');
    out.push_str(&"=".repeat(RULE_NARROW));
    out.push('\n');
    out.push_str(&format!(
        "Trend: {} ({} up, {} down over the last {} change(s))\n",
        palette.trend(view.trend.trend.label(), Some(view.trend.trend)),
        view.trend.up,
        view.trend.down,
        view.trend.deltas,
    ));

    if let Some((change, pct)) = view.overall {
        out.push_str(&format!(
            "Overall Change: {}\n",
            palette.change(format!("${change:+.2} ({})", fmt_pct_signed(pct)), change)
        ));
    }

    out
}

/// `stats`: the statistics block for one product.
pub fn format_product_stats(product: &Product, stats: Option<&ProductStats>, palette: Palette) -> String {
    let mut out = String::new();
    out.push_str(&palette.bold(palette.paint(product.name.as_str(), Color::Cyan)));
    out.push('\n');
    out.push_str(&format!("URL: {}\n", palette.paint(product.url.as_str(), Color::Blue)));

    let Some(stats) = stats else {
        out.push_str(&format!("  {}\n", palette.paint("No price data available", Color::Yellow)));
        return out;
    };
    let s = &stats.summary;

    out.push_str(&format!("  {}\n", palette.bold("Price Range:")));
    out.push_str(&format!("    Current:  {}\n", palette.paint(format!("${:.2}", s.current), Color::Yellow)));
    out.push_str(&format!("    Average:  ${:.2}\n", s.average));
    out.push_str(&format!(
        "    Lowest:   {} (on {})\n",
        palette.paint(format!("${:.2}", s.min.price), Color::Green),
        s.min.at.format("%Y-%m-%d")
    ));
    out.push_str(&format!(
        "    Highest:  {} (on {})\n",
        palette.paint(format!("${:.2}", s.max.price), Color::Red),
        s.max.at.format("%Y-%m-%d")
    ));

    out.push('\n');
    out.push_str(&format!("  {}\n", palette.bold("Price Changes:")));
    out.push_str(&format!(
        "    Overall:  {}\n",
        palette.change(
            format!("${:+.2} ({})", s.overall_change, fmt_pct_signed(s.overall_change_pct)),
            s.overall_change
        )
    ));
    out.push_str(&format!("    Spread:   ${:.2} ({})\n", s.spread, fmt_pct(s.spread_pct)));

    out.push('\n');
    out.push_str(&format!("  {}\n", palette.bold("Statistics:")));
    out.push_str(&format!("    Data Points:  {}\n", s.count));
    out.push_str(&format!("    Volatility:   {:.1}%\n", s.volatility_pct));
    out.push_str(&format!("    Trend:        {}\n", palette.trend(stats.trend.label(), Some(stats.trend))));
    out.push_str(&format!("    First Check:  {}\n", s.first_checked.format("%Y-%m-%d %H:%M")));
    out.push_str(&format!("    Last Check:   {}\n", s.last_checked.format("%Y-%m-%d %H:%M")));

    out
}

/// Banner printed above `stats` for all products.
pub fn format_stats_banner(palette: Palette) -> String {
    let rule = palette.paint("=".repeat(RULE_WIDE), Color::Magenta);
    format!("{rule}\n{}\n{rule}\n", palette.bold("PRICE TRACKER STATISTICS"))
}

/// `alert`: fired alerts, or a one-line all-clear.
pub fn format_alerts(alerts: &[Alert], threshold: DropThreshold) -> String {
    let mut out = String::new();
    out.push_str(&format!("Checking for price drops >= {}%...\n", threshold.pct()));

    if alerts.is_empty() {
        out.push_str("No significant price drops detected.\n");
        return out;
    }

    out.push('\n');
    out.push_str("[!] PRICE DROP ALERTS:\n");
    out.push_str(&"=".repeat(70));
    out.push('\n');
    for alert in alerts {
        let r = &alert.result;
        out.push_str(&format!("Product: {}\n", alert.name));
        out.push_str(&format!("  Previous: ${:.2}\n", r.previous));
        out.push_str(&format!("  Current:  ${:.2}\n", r.current));
        out.push_str(&format!("  Drop:     ${:.2} ({:.1}%)\n", r.drop_amount, r.drop_pct));
        out.push('\n');
    }
    out
}

/// `check`: the current price and its change from the previous check.
pub fn format_check_result(price: f64, change: Option<EntryChange>, palette: Palette) -> String {
    let current = format!("${price:.2}");
    match change {
        None | Some(EntryChange::Initial) => format!("  Current: {current}"),
        Some(EntryChange::NoChange) => format!("  Current: {current} (no change)"),
        Some(EntryChange::Up { amount, pct }) => format!(
            "  Current: {current} ({})",
            palette.change(format!("UP ${amount:.2}, {}", fmt_pct_signed(pct)), amount)
        ),
        Some(EntryChange::Down { amount, pct }) => format!(
            "  Current: {current} ({})",
            palette.change(format!("DOWN ${amount:.2}, {}", fmt_pct_signed(pct)), -amount)
        ),
    }
}

fn fmt_datetime(t: NaiveDateTime) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn fmt_pct(pct: Option<f64>) -> String {
    pct.map(|p| format!("{p:.1}%")).unwrap_or_else(|| "n/a".to_string())
}

fn fmt_pct_signed(pct: Option<f64>) -> String {
    pct.map(|p| format!("{p:+.1}%")).unwrap_or_else(|| "n/a".to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
