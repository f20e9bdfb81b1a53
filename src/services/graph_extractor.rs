//! Signal-to-noise extraction from graph series.
//!
//! Given the series groups of a graph result and an optional target
//! wavelength, produces either the peak value or the linearly interpolated
//! value at that wavelength. Lookups outside the series domain are explicit
//! below/above-range outcomes, never a silent clamp.

use std::cmp::Ordering;

use crate::models::{GraphGroup, SeriesDataType, SignalToNoise, Wavelength};

/// Outcome of a signal-to-noise extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum SnExtraction {
    Success(SignalToNoise),
    /// Requested wavelength lies below the first sample.
    BelowRange(Wavelength),
    /// Requested wavelength lies above the last sample.
    AboveRange(Wavelength),
    /// No series of the requested type, or the series is empty.
    NoData,
    Error(String),
}

/// Extract the final (all-exposures) signal-to-noise, at `at` when given,
/// otherwise the peak.
pub fn final_sn_at(groups: &[GraphGroup], at: Option<Wavelength>) -> SnExtraction {
    extract(groups, SeriesDataType::FinalS2nData, at)
}

/// Extract the single-exposure signal-to-noise, at `at` when given,
/// otherwise the peak.
pub fn single_sn_at(groups: &[GraphGroup], at: Option<Wavelength>) -> SnExtraction {
    extract(groups, SeriesDataType::SingleS2nData, at)
}

fn extract(groups: &[GraphGroup], series_type: SeriesDataType, at: Option<Wavelength>) -> SnExtraction {
    let series = groups
        .iter()
        .flat_map(|group| &group.graphs)
        .flat_map(|graph| &graph.series)
        .find(|series| series.series_type == series_type);

    let series = match series {
        Some(series) => series,
        None => return SnExtraction::NoData,
    };
    if series.data.is_empty() {
        return SnExtraction::NoData;
    }

    let mut samples = series.data.clone();
    // Stable sort: samples with equal wavelengths keep their input order
    // and the lookup below picks the first at or above the target.
    samples.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    match at {
        None => peak(&samples),
        Some(wavelength) => interpolate(&samples, wavelength),
    }
}

fn peak(samples: &[(f64, f64)]) -> SnExtraction {
    let mut best = samples[0];
    for sample in &samples[1..] {
        if sample.1 > best.1 {
            best = *sample;
        }
    }
    checked(best.1)
}

fn interpolate(samples: &[(f64, f64)], wavelength: Wavelength) -> SnExtraction {
    let target = wavelength.nanometers();

    let (first, last) = (samples[0].0, samples[samples.len() - 1].0);
    if target < first {
        return SnExtraction::BelowRange(wavelength);
    }
    if target > last {
        return SnExtraction::AboveRange(wavelength);
    }

    let upper = match samples.iter().position(|(x, _)| *x >= target) {
        Some(index) => index,
        // Unreachable after the range checks; report rather than clamp.
        None => return SnExtraction::Error(format!("no sample brackets {}", wavelength)),
    };

    let (x2, s2) = samples[upper];
    if x2 == target {
        return checked(s2);
    }

    let (x1, s1) = samples[upper - 1];
    let value = (s1 * (x2 - target) + s2 * (target - x1)) / (x2 - x1);
    checked(value)
}

fn checked(value: f64) -> SnExtraction {
    match SignalToNoise::new(value) {
        Ok(sn) => SnExtraction::Success(sn),
        Err(message) => SnExtraction::Error(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Graph, GraphSeries, GraphType};

    fn nm(value: f64) -> Wavelength {
        Wavelength::from_nanometers(value).unwrap()
    }

    fn groups_with_final_sn(data: Vec<(f64, f64)>) -> Vec<GraphGroup> {
        vec![GraphGroup {
            graphs: vec![Graph {
                graph_type: GraphType::S2nGraph,
                series: vec![
                    GraphSeries {
                        title: "Signal".to_string(),
                        series_type: SeriesDataType::SignalData,
                        data: vec![(1.0, 5.0)],
                    },
                    GraphSeries {
                        title: "Final S/N".to_string(),
                        series_type: SeriesDataType::FinalS2nData,
                        data,
                    },
                ],
            }],
        }]
    }

    #[test]
    fn test_peak_without_wavelength() {
        let groups = groups_with_final_sn(vec![(1.0, 1000.0), (2.0, 1001.0)]);
        assert_eq!(
            final_sn_at(&groups, None),
            SnExtraction::Success(SignalToNoise::new(1001.0).unwrap())
        );
    }

    #[test]
    fn test_interpolation_between_samples() {
        let groups = groups_with_final_sn(vec![(1.0, 1000.0), (2.0, 1001.0)]);
        assert_eq!(
            final_sn_at(&groups, Some(nm(1.5))),
            SnExtraction::Success(SignalToNoise::new(1000.5).unwrap())
        );
    }

    #[test]
    fn test_exact_sample_returns_without_interpolation() {
        let groups = groups_with_final_sn(vec![(1.0, 1000.0), (2.0, 1001.0)]);
        assert_eq!(
            final_sn_at(&groups, Some(nm(2.0))),
            SnExtraction::Success(SignalToNoise::new(1001.0).unwrap())
        );
    }

    #[test]
    fn test_below_range_carries_wavelength() {
        let groups = groups_with_final_sn(vec![(1.0, 1000.0), (2.0, 1001.0)]);
        assert_eq!(final_sn_at(&groups, Some(nm(0.1))), SnExtraction::BelowRange(nm(0.1)));
    }

    #[test]
    fn test_above_range_carries_wavelength() {
        let groups = groups_with_final_sn(vec![(1.0, 1000.0), (2.0, 1001.0)]);
        assert_eq!(final_sn_at(&groups, Some(nm(5.1))), SnExtraction::AboveRange(nm(5.1)));
    }

    #[test]
    fn test_empty_series_is_no_data() {
        let groups = groups_with_final_sn(vec![]);
        assert_eq!(final_sn_at(&groups, None), SnExtraction::NoData);
    }

    #[test]
    fn test_missing_series_is_no_data() {
        let groups = vec![GraphGroup {
            graphs: vec![Graph {
                graph_type: GraphType::SignalGraph,
                series: vec![GraphSeries {
                    title: "Signal".to_string(),
                    series_type: SeriesDataType::SignalData,
                    data: vec![(1.0, 5.0)],
                }],
            }],
        }];
        assert_eq!(final_sn_at(&groups, None), SnExtraction::NoData);
        assert_eq!(single_sn_at(&groups, None), SnExtraction::NoData);
    }

    #[test]
    fn test_unsorted_samples_are_sorted_before_lookup() {
        let groups = groups_with_final_sn(vec![(2.0, 1001.0), (1.0, 1000.0)]);
        assert_eq!(
            final_sn_at(&groups, Some(nm(1.5))),
            SnExtraction::Success(SignalToNoise::new(1000.5).unwrap())
        );
    }

    #[test]
    fn test_interpolated_value_lies_between_neighbours() {
        let groups = groups_with_final_sn(vec![(1.0, 10.0), (2.0, 30.0), (3.0, 20.0)]);
        for target in [1.25, 1.5, 1.75] {
            match final_sn_at(&groups, Some(nm(target))) {
                SnExtraction::Success(sn) => {
                    assert!(sn.value() > 10.0 && sn.value() < 30.0);
                }
                other => panic!("expected success, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_negative_computed_value_is_error() {
        let groups = groups_with_final_sn(vec![(1.0, -4.0), (2.0, -2.0)]);
        assert!(matches!(final_sn_at(&groups, Some(nm(1.5))), SnExtraction::Error(_)));
    }

    #[test]
    fn test_equal_wavelengths_keep_input_order() {
        // First sample at 2.0 nm wins the exact-match lookup.
        let groups = groups_with_final_sn(vec![(1.0, 10.0), (2.0, 20.0), (2.0, 99.0)]);
        assert_eq!(
            final_sn_at(&groups, Some(nm(2.0))),
            SnExtraction::Success(SignalToNoise::new(20.0).unwrap())
        );
    }
}
