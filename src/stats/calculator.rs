//! Statistics Calculator Module
//! Descriptive statistics of a numeric attribute, overall and per species.

use crate::data::{float_column, species_column, NumericAttribute, Species};
use polars::prelude::*;
use rayon::prelude::*;

/// Descriptive statistics for one group of values.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub group_name: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub p05: f64,
    pub p95: f64,
}

impl Default for GroupStats {
    fn default() -> Self {
        Self {
            group_name: String::new(),
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            p05: f64::NAN,
            p95: f64::NAN,
        }
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> GroupStats {
        let n = values.len();
        if n == 0 {
            return GroupStats::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        // Sample variance, like pandas' describe()
        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        GroupStats {
            group_name: String::new(),
            count: n,
            mean,
            median,
            std: variance.sqrt(),
            p05: Self::percentile(&sorted, 5.0),
            p95: Self::percentile(&sorted, 95.0),
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Statistics of `attribute` for every species plus an "All" row.
    ///
    /// Species are computed in parallel; rows with a null measurement are
    /// skipped. Species with no rows in the view are omitted, and an empty
    /// view yields no rows at all.
    pub fn compute_species_stats(df: &DataFrame, attribute: NumericAttribute) -> Vec<GroupStats> {
        let Ok(values) = float_column(df, attribute.column()) else {
            return Vec::new();
        };
        let species = species_column(df);

        let pairs: Vec<(Option<Species>, f64)> = species
            .into_iter()
            .zip(values)
            .filter_map(|(sp, v)| v.map(|v| (sp, v)))
            .collect();

        let mut stats: Vec<GroupStats> = Species::ALL
            .par_iter()
            .filter_map(|&sp| {
                let group: Vec<f64> = pairs
                    .iter()
                    .filter(|(s, _)| *s == Some(sp))
                    .map(|(_, v)| *v)
                    .collect();
                if group.is_empty() {
                    return None;
                }
                let mut gs = Self::compute_descriptive_stats(&group);
                gs.group_name = sp.to_string();
                Some(gs)
            })
            .collect();

        // Nothing to summarise, e.g. no species selected
        if pairs.is_empty() {
            return stats;
        }

        let all: Vec<f64> = pairs.iter().map(|(_, v)| *v).collect();
        let mut total = Self::compute_descriptive_stats(&all);
        total.group_name = "All".to_string();
        stats.push(total);

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DatasetLoader;
    use pretty_assertions::assert_eq;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn descriptive_stats_of_small_sample() {
        let gs = StatsCalculator::compute_descriptive_stats(&[4.0, 1.0, 3.0, 2.0]);

        assert_eq!(gs.count, 4);
        assert!(approx(gs.mean, 2.5));
        assert!(approx(gs.median, 2.5));
        // sample std of 1..=4
        assert!(approx(gs.std, (5.0f64 / 3.0).sqrt()));
        assert!(approx(gs.p05, 1.15));
        assert!(approx(gs.p95, 3.85));
    }

    #[test]
    fn empty_sample_is_nan() {
        let gs = StatsCalculator::compute_descriptive_stats(&[]);

        assert_eq!(gs.count, 0);
        assert!(gs.mean.is_nan());
    }

    #[test]
    fn single_value_has_zero_spread() {
        let gs = StatsCalculator::compute_descriptive_stats(&[7.5]);

        assert!(approx(gs.median, 7.5));
        assert!(approx(gs.std, 0.0));
        assert!(approx(gs.p95, 7.5));
    }

    #[test]
    fn species_stats_follow_species_order_then_all() {
        let dataset = DatasetLoader::load_bundled().unwrap();

        let stats =
            StatsCalculator::compute_species_stats(dataset.frame(), NumericAttribute::BodyMassG);

        let names: Vec<&str> = stats.iter().map(|s| s.group_name.as_str()).collect();
        assert_eq!(names, vec!["Adelie", "Gentoo", "Chinstrap", "All"]);

        // One Adelie and one Gentoo row have no body mass
        let counts: Vec<usize> = stats.iter().map(|s| s.count).collect();
        assert_eq!(counts, vec![151, 123, 68, 342]);
    }

    #[test]
    fn species_absent_from_view_are_omitted() {
        let csv = "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year\n\
                   Gentoo,Biscoe,46.1,13.2,211,4500,female,2007\n\
                   Gentoo,Biscoe,50.0,16.3,230,5700,male,2007\n";
        let dataset = DatasetLoader::load_bytes(csv.as_bytes().to_vec()).unwrap();

        let stats =
            StatsCalculator::compute_species_stats(dataset.frame(), NumericAttribute::BodyMassG);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].group_name, "Gentoo");
        assert!(approx(stats[0].mean, 5100.0));
        assert!(approx(stats[1].mean, 5100.0));
    }

    #[test]
    fn empty_view_has_no_summary_rows() {
        let dataset = DatasetLoader::load_bundled().unwrap();
        let empty = dataset.frame().slice(0, 0);

        let stats = StatsCalculator::compute_species_stats(&empty, NumericAttribute::BodyMassG);

        assert!(stats.is_empty());
    }

}
