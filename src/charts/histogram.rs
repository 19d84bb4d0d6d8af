//! Histogram Binning
//! Equal-width binning shared by the interactive and the static histogram.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HistogramError {
    #[error("Bin count must be at least 1")]
    ZeroBins,
}

/// One histogram bar: `[start, end)` and the number of values inside.
/// The last bin also holds values equal to its `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Histogram {
    pub bins: Vec<Bin>,
}

impl Histogram {
    /// Bin `values` into `bin_count` equal-width bins spanning their range.
    ///
    /// Non-finite values are ignored. A constant sample produces one bin of
    /// width 1 centred on the value.
    pub fn compute(values: &[f64], bin_count: usize) -> Result<Self, HistogramError> {
        if bin_count == 0 {
            return Err(HistogramError::ZeroBins);
        }

        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Ok(Self::default());
        }

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if min == max {
            return Ok(Self {
                bins: vec![Bin {
                    start: min - 0.5,
                    end: min + 0.5,
                    count: finite.len(),
                }],
            });
        }

        let width = (max - min) / bin_count as f64;
        let mut counts = vec![0usize; bin_count];

        for v in &finite {
            let idx = ((v - min) / width).floor() as usize;
            counts[idx.min(bin_count - 1)] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bin {
                start: min + i as f64 * width,
                end: if i + 1 == bin_count {
                    max
                } else {
                    min + (i + 1) as f64 * width
                },
                count,
            })
            .collect();

        Ok(Self { bins })
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Range covered by all bins, if any.
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((self.bins.first()?.start, self.bins.last()?.end))
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_bins_is_rejected() {
        assert_eq!(Histogram::compute(&[1.0], 0), Err(HistogramError::ZeroBins));
    }

    #[test]
    fn counts_sum_to_number_of_values() {
        let values: Vec<f64> = (0..100).map(|i| i as f64 * 0.37).collect();

        for bins in [1, 7, 50, 200] {
            let hist = Histogram::compute(&values, bins).unwrap();
            assert_eq!(hist.bins.len(), bins);
            assert_eq!(hist.total(), 100);
        }
    }

    #[test]
    fn maximum_lands_in_last_bin() {
        let hist = Histogram::compute(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();

        let counts: Vec<usize> = hist.bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_eq!(hist.range(), Some((0.0, 4.0)));
    }

    #[test]
    fn constant_sample_is_single_bin() {
        let hist = Histogram::compute(&[3.0, 3.0, 3.0], 10).unwrap();

        assert_eq!(
            hist.bins,
            vec![Bin {
                start: 2.5,
                end: 3.5,
                count: 3
            }]
        );
    }

    #[test]
    fn empty_and_non_finite_input_is_empty() {
        assert!(Histogram::compute(&[], 5).unwrap().is_empty());
        assert!(Histogram::compute(&[f64::NAN], 5).unwrap().is_empty());
        assert_eq!(Histogram::compute(&[], 5).unwrap().max_count(), 0);
    }
}
