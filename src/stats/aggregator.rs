//! Cohort aggregation
//!
//! Single pass over the samples of one major: cutoff, pie breakdown,
//! GPA histogram and gender counts.

use serde::Serialize;

use crate::survey::{Gender, Major, SurveySample};

/// Lower bounds of the GPA histogram bins. Each bin covers `[b, b + 1)`.
pub const GPA_BIN_BOUNDS: [u32; 9] = [4, 5, 6, 7, 8, 9, 10, 11, 12];

/// Split of the cohort by first-choice status relative to the cutoff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PieBreakdown {
    pub no_free_choice: u64,
    pub fc_above_cutoff: u64,
    pub fc_below_cutoff: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenderCounts {
    pub male: u64,
    pub female: u64,
    pub other: u64,
}

impl GenderCounts {
    fn record(&mut self, gender: Gender) {
        match gender {
            Gender::Male => self.male += 1,
            Gender::Female => self.female += 1,
            Gender::Other => self.other += 1,
        }
    }
}

/// Statistics for one cohort, serialized as the public `/data` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortStats {
    /// Lowest GPA among non-first-choice admits, if any
    pub cutoff: Option<f64>,
    pub pie: PieBreakdown,
    pub gpa_bins: Vec<String>,
    pub gpa_counts: Vec<u64>,
    pub gender_counts: GenderCounts,
}

impl CohortStats {
    /// Result for a cohort with no members.
    pub fn empty() -> Self {
        Self {
            cutoff: None,
            pie: PieBreakdown::default(),
            gpa_bins: bin_labels(),
            gpa_counts: vec![0; GPA_BIN_BOUNDS.len()],
            gender_counts: GenderCounts::default(),
        }
    }

    /// Number of cohort members that landed in some histogram bin.
    pub fn binned_total(&self) -> u64 {
        self.gpa_counts.iter().sum()
    }
}

fn bin_labels() -> Vec<String> {
    GPA_BIN_BOUNDS
        .iter()
        .map(|b| format!("{}-{}", b, b + 1))
        .collect()
}

/// Index of the first bin whose upper edge lies above `gpa`.
fn bin_index(gpa: f64) -> Option<usize> {
    GPA_BIN_BOUNDS
        .iter()
        .position(|&b| gpa < f64::from(b + 1))
}

/// Computes admission statistics restricted to a single major.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    cohort: Major,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(Major::Computer)
    }
}

impl Aggregator {
    pub fn new(cohort: Major) -> Self {
        Self { cohort }
    }

    /// Aggregates `samples`. Never fails; an empty cohort yields
    /// [`CohortStats::empty`].
    pub fn aggregate(&self, samples: &[SurveySample]) -> CohortStats {
        let cohort: Vec<&SurveySample> = samples
            .iter()
            .filter(|s| s.major == self.cohort.as_str())
            .collect();

        let cutoff = cohort
            .iter()
            .filter(|s| !s.first_choice)
            .map(|s| s.gpa)
            .reduce(f64::min);

        let mut stats = CohortStats::empty();
        stats.cutoff = cutoff;

        for sample in &cohort {
            match (sample.first_choice, cutoff) {
                (false, _) => stats.pie.no_free_choice += 1,
                (true, Some(c)) if sample.gpa >= c => stats.pie.fc_above_cutoff += 1,
                (true, Some(_)) => stats.pie.fc_below_cutoff += 1,
                // no cutoff means neither above nor below applies
                (true, None) => {}
            }

            if let Some(i) = bin_index(sample.gpa) {
                stats.gpa_counts[i] += 1;
            }

            if let Ok(gender) = sample.gender.parse::<Gender>() {
                stats.gender_counts.record(gender);
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(gpa: f64, first_choice: bool, major: &str, gender: &str) -> SurveySample {
        SurveySample {
            gpa,
            first_choice,
            major: major.to_string(),
            program: "regular".to_string(),
            gender: gender.to_string(),
        }
    }

    #[test]
    fn test_cutoff_and_pie_split() {
        let samples = vec![
            sample(5.0, false, "computer", "male"),
            sample(6.0, true, "computer", "female"),
            sample(4.5, true, "computer", "other"),
        ];
        let stats = Aggregator::default().aggregate(&samples);

        assert_eq!(stats.cutoff, Some(5.0));
        assert_eq!(
            stats.pie,
            PieBreakdown {
                no_free_choice: 1,
                fc_above_cutoff: 1,
                fc_below_cutoff: 1,
            }
        );
    }

    #[test]
    fn test_cutoff_is_minimum_of_non_first_choice() {
        let samples = vec![
            sample(9.0, false, "computer", "male"),
            sample(7.25, false, "computer", "male"),
            sample(4.0, true, "computer", "male"),
        ];
        let stats = Aggregator::default().aggregate(&samples);
        assert_eq!(stats.cutoff, Some(7.25));
    }

    #[test]
    fn test_equal_to_cutoff_counts_as_above() {
        let samples = vec![
            sample(8.0, false, "computer", "male"),
            sample(8.0, true, "computer", "male"),
        ];
        let stats = Aggregator::default().aggregate(&samples);
        assert_eq!(stats.pie.fc_above_cutoff, 1);
        assert_eq!(stats.pie.fc_below_cutoff, 0);
    }

    #[test]
    fn test_empty_cohort() {
        let stats = Aggregator::default().aggregate(&[]);
        assert_eq!(stats, CohortStats::empty());
        assert_eq!(stats.cutoff, None);
        assert_eq!(stats.gpa_counts, vec![0; 9]);
        assert_eq!(stats.gender_counts, GenderCounts::default());
    }

    #[test]
    fn test_first_choice_without_cutoff_is_unbucketed() {
        let samples = vec![
            sample(10.0, true, "computer", "male"),
            sample(6.0, true, "computer", "female"),
        ];
        let stats = Aggregator::default().aggregate(&samples);
        assert_eq!(stats.cutoff, None);
        assert_eq!(stats.pie, PieBreakdown::default());
        // still counted in the histogram and gender breakdown
        assert_eq!(stats.binned_total(), 2);
        assert_eq!(stats.gender_counts.male, 1);
        assert_eq!(stats.gender_counts.female, 1);
    }

    #[test]
    fn test_histogram_bins() {
        let samples = vec![
            sample(4.0, false, "computer", "male"),
            sample(4.99, false, "computer", "male"),
            sample(5.0, false, "computer", "male"),
            sample(11.99, false, "computer", "male"),
            sample(12.0, false, "computer", "male"),
        ];
        let stats = Aggregator::default().aggregate(&samples);

        assert_eq!(
            stats.gpa_bins,
            vec!["4-5", "5-6", "6-7", "7-8", "8-9", "9-10", "10-11", "11-12", "12-13"]
        );
        assert_eq!(stats.gpa_counts, vec![2, 1, 0, 0, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_histogram_conserves_cohort_size() {
        let samples: Vec<SurveySample> = (0..=80)
            .map(|i| sample(4.0 + f64::from(i) * 0.1, i % 3 == 0, "computer", "other"))
            .filter(|s| s.gpa <= 12.0)
            .collect();
        let stats = Aggregator::default().aggregate(&samples);
        assert_eq!(stats.binned_total(), samples.len() as u64);
    }

    #[test]
    fn test_other_majors_are_ignored() {
        let cohort = vec![
            sample(5.0, false, "computer", "male"),
            sample(6.0, true, "computer", "female"),
        ];
        let mut mixed = cohort.clone();
        mixed.push(sample(4.0, false, "electrical", "male"));
        mixed.push(sample(11.0, true, "other", "female"));
        mixed.push(sample(4.2, false, "Computer", "other"));

        let aggregator = Aggregator::default();
        assert_eq!(aggregator.aggregate(&mixed), aggregator.aggregate(&cohort));
    }

    #[test]
    fn test_unknown_gender_is_ignored() {
        let samples = vec![
            sample(5.0, false, "computer", "male"),
            sample(6.0, false, "computer", "unknown"),
        ];
        let stats = Aggregator::default().aggregate(&samples);
        assert_eq!(stats.gender_counts.male, 1);
        assert_eq!(stats.gender_counts.female + stats.gender_counts.other, 0);
        assert_eq!(stats.pie.no_free_choice, 2);
    }

    #[test]
    fn test_other_cohort_major() {
        let samples = vec![
            sample(5.0, false, "computer", "male"),
            sample(7.0, false, "electrical", "female"),
        ];
        let stats = Aggregator::new(Major::Electrical).aggregate(&samples);
        assert_eq!(stats.cutoff, Some(7.0));
        assert_eq!(stats.gender_counts.female, 1);
    }

    #[test]
    fn test_serialized_shape() {
        let stats = Aggregator::default().aggregate(&[sample(5.5, false, "computer", "male")]);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            value,
            json!({
                "cutoff": 5.5,
                "pie": {"no_free_choice": 1, "fc_above_cutoff": 0, "fc_below_cutoff": 0},
                "gpa_bins": ["4-5", "5-6", "6-7", "7-8", "8-9", "9-10", "10-11", "11-12", "12-13"],
                "gpa_counts": [0, 1, 0, 0, 0, 0, 0, 0, 0],
                "gender_counts": {"male": 1, "female": 0, "other": 0}
            })
        );

        let empty = serde_json::to_value(CohortStats::empty()).unwrap();
        assert!(empty["cutoff"].is_null());
    }
}
