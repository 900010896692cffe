use serde::Serialize;

/// Number of bins in every precipitation histogram.
pub const HISTOGRAM_BINS: usize = 50;

/// Drawn bar width as a fraction of the bin width.
pub const BAR_WIDTH_FACTOR: f64 = 0.7;

/// Fixed-count, equal-width histogram.
///
/// The range is the data's min to max, widened by 0.5 on each side when
/// those are equal, and `[0, 1]` for no data. Bins are half-open except the
/// last, which also counts values equal to the right edge. Non-finite values
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub counts: Vec<usize>,
    /// `counts.len() + 1` ascending bin edges.
    pub edges: Vec<f64>,
}

impl Histogram {
    pub fn compute(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let (first, last) = data_range(&finite);
        let edges = linspace(first, last, bins + 1);
        let norm = bins as f64 / (last - first);

        let mut counts = vec![0usize; bins];
        for value in finite {
            let mut index = (((value - first) * norm) as usize).min(bins - 1);
            // Float rounding can place a value one bin off its edges.
            if value < edges[index] {
                index -= 1;
            } else if index != bins - 1 && value >= edges[index + 1] {
                index += 1;
            }
            counts[index] += 1;
        }
        Self { counts, edges }
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// Midpoint of each bin.
    pub fn centers(&self) -> Vec<f64> {
        self.edges
            .windows(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect()
    }

    pub fn start(&self) -> f64 {
        self.edges[0]
    }

    pub fn end(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

fn data_range(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 1.0);
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    let step = (stop - start) / (n - 1) as f64;
    let mut points: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
    points[n - 1] = stop;
    points
}
