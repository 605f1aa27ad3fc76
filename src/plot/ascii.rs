//! ASCII price chart for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks of a product's history in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observations: `o`
//! - segments between consecutive observations: `-`
//!
//! The x axis is elapsed time, so irregular check intervals show up as gaps.

use crate::domain::PriceObservation;

/// Render a price-over-time chart. Returns an empty string for an empty history.
pub fn render_price_chart(history: &[PriceObservation], width: usize, height: usize) -> String {
    let (Some(first), Some(last)) = (history.first(), history.last()) else {
        return String::new();
    };

    let width = width.max(10);
    let height = height.max(5);

    let elapsed: Vec<f64> = history
        .iter()
        .map(|o| (o.timestamp - first.timestamp).num_seconds() as f64)
        .collect();
    let span = elapsed.iter().copied().fold(0.0, f64::max);
    let time_axis = if span > 0.0 {
        Axis::new(0.0, span, width)
    } else {
        Axis::new(-1.0, 1.0, width)
    };
    let price_axis = price_axis(history, height);

    // (column, row); row 0 is the top of the chart.
    let cells: Vec<(usize, usize)> = elapsed
        .iter()
        .zip(history)
        .map(|(&t, o)| (time_axis.cell(t), height - 1 - price_axis.cell(o.price)))
        .collect();

    let mut grid = vec![vec![' '; width]; height];
    for pair in cells.windows(2) {
        connect(&mut grid, pair[0], pair[1]);
    }
    for &(col, row) in &cells {
        grid[row][col] = 'o';
    }

    let mut out = format!(
        "Plot: {} .. {} | price=[{:.2}, {:.2}]\n",
        first.timestamp.format("%Y-%m-%d"),
        last.timestamp.format("%Y-%m-%d"),
        price_axis.lo,
        price_axis.hi,
    );
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

/// Linear mapping from a value range onto `cells` grid positions.
#[derive(Debug, Clone, Copy)]
struct Axis {
    lo: f64,
    hi: f64,
    cells: usize,
}

impl Axis {
    fn new(lo: f64, hi: f64, cells: usize) -> Self {
        Self { lo, hi, cells }
    }

    fn cell(&self, value: f64) -> usize {
        let u = ((value - self.lo) / (self.hi - self.lo)).clamp(0.0, 1.0);
        (u * (self.cells - 1) as f64).round() as usize
    }
}

/// Price range with 5% headroom; a flat history gets a $1 band either side.
fn price_axis(history: &[PriceObservation], rows: usize) -> Axis {
    let (lo, hi) = history
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), o| (lo.min(o.price), hi.max(o.price)));
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 1.0, lo + 1.0) };
    let pad = (hi - lo) * 0.05;
    Axis::new(lo - pad, hi + pad, rows)
}

/// Draw `-` between two cells, stepping along the longer axis. Existing marks
/// are kept.
fn connect(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize)) {
    let (c0, r0) = (from.0 as f64, from.1 as f64);
    let (dc, dr) = (to.0 as f64 - c0, to.1 as f64 - r0);
    let steps = dc.abs().max(dr.abs()) as usize;

    for i in 0..=steps {
        let f = if steps == 0 { 0.0 } else { i as f64 / steps as f64 };
        let col = (c0 + dc * f).round() as usize;
        let row = (r0 + dr * f).round() as usize;
        if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
            if *cell == ' ' {
                *cell = '-';
            }
        }
    }
}
