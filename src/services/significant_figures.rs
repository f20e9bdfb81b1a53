//! Significant-figure trimming of graph outputs.
//!
//! Trimming applies per axis: the x figure to series abscissae, the y
//! figure to series ordinates and signal-to-noise values, the ccd figure to
//! detector readout attributes. An absent axis leaves that axis untouched.

use crate::models::{GraphResult, SignalToNoise, SignificantFigures};

/// Round `value` to `figures` significant figures.
///
/// Zero, non-finite values, and a zero figure count pass through unchanged.
pub fn round_significant(value: f64, figures: u32) -> f64 {
    if figures == 0 || value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let shift = figures as i32 - 1 - magnitude;
    let scale = 10f64.powi(shift);
    (value * scale).round() / scale
}

/// Apply the requested trimming to an assembled graph result in place.
pub fn trim_graph_result(result: &mut GraphResult, figures: &SignificantFigures) {
    if let Some(x) = figures.x_axis {
        for_each_sample(result, |sample| sample.0 = round_significant(sample.0, x));
    }
    if let Some(y) = figures.y_axis {
        for_each_sample(result, |sample| sample.1 = round_significant(sample.1, y));
        result.peak_final_sn = round_sn(result.peak_final_sn, y);
        result.peak_single_sn = round_sn(result.peak_single_sn, y);
        result.at_wavelength_final_sn = result.at_wavelength_final_sn.map(|sn| round_sn(sn, y));
        result.at_wavelength_single_sn = result.at_wavelength_single_sn.map(|sn| round_sn(sn, y));
    }
    if let Some(c) = figures.ccd {
        for ccd in &mut result.ccds {
            ccd.single_sn = round_significant(ccd.single_sn, c);
            ccd.total_sn = round_significant(ccd.total_sn, c);
            ccd.peak_pixel_flux = round_significant(ccd.peak_pixel_flux, c);
            ccd.well_depth = round_significant(ccd.well_depth, c);
            ccd.amp_gain = round_significant(ccd.amp_gain, c);
        }
    }
}

fn for_each_sample(result: &mut GraphResult, mut apply: impl FnMut(&mut (f64, f64))) {
    for group in &mut result.groups {
        for graph in &mut group.graphs {
            for series in &mut graph.series {
                for sample in &mut series.data {
                    apply(sample);
                }
            }
        }
    }
}

fn round_sn(sn: SignalToNoise, figures: u32) -> SignalToNoise {
    // Rounding preserves non-negativity and finiteness.
    SignalToNoise::new(round_significant(sn.value(), figures)).unwrap_or(sn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CcdReadout, Graph, GraphGroup, GraphSeries, GraphType, SeriesDataType};
    use approx::assert_relative_eq;

    #[test]
    fn test_round_significant() {
        assert_relative_eq!(round_significant(1234.5678, 3), 1230.0);
        assert_relative_eq!(round_significant(0.0012345, 2), 0.0012);
        assert_relative_eq!(round_significant(-98.76, 2), -99.0);
        assert_relative_eq!(round_significant(5.0, 1), 5.0);
        assert_relative_eq!(round_significant(0.0, 4), 0.0);
        assert_relative_eq!(round_significant(999.9, 2), 1000.0);
    }

    #[test]
    fn test_zero_figures_is_identity() {
        assert_relative_eq!(round_significant(1234.5678, 0), 1234.5678);
    }

    fn sample_result() -> GraphResult {
        GraphResult {
            ccds: vec![CcdReadout {
                single_sn: 12.345,
                total_sn: 39.045,
                peak_pixel_flux: 8765.43,
                well_depth: 106270.0,
                amp_gain: 1.234,
            }],
            groups: vec![GraphGroup {
                graphs: vec![Graph {
                    graph_type: GraphType::S2nGraph,
                    series: vec![GraphSeries {
                        title: "Final S/N".to_string(),
                        series_type: SeriesDataType::FinalS2nData,
                        data: vec![(486.1234, 12.3456), (656.2789, 23.4567)],
                    }],
                }],
            }],
            peak_final_sn: SignalToNoise::new(23.4567).unwrap(),
            peak_single_sn: SignalToNoise::new(7.4189).unwrap(),
            at_wavelength_final_sn: Some(SignalToNoise::new(18.8765).unwrap()),
            at_wavelength_single_sn: None,
            warnings: vec![],
        }
    }

    #[test]
    fn test_trim_applies_per_axis() {
        let mut result = sample_result();
        trim_graph_result(
            &mut result,
            &SignificantFigures { x_axis: Some(4), y_axis: Some(3), ccd: Some(2) },
        );

        let data = &result.groups[0].graphs[0].series[0].data;
        assert_relative_eq!(data[0].0, 486.1);
        assert_relative_eq!(data[0].1, 12.3);
        assert_relative_eq!(data[1].0, 656.3);
        assert_relative_eq!(data[1].1, 23.5);

        assert_relative_eq!(result.peak_final_sn.value(), 23.5);
        assert_relative_eq!(result.peak_single_sn.value(), 7.42);
        assert_relative_eq!(result.at_wavelength_final_sn.unwrap().value(), 18.9);

        let ccd = &result.ccds[0];
        assert_relative_eq!(ccd.single_sn, 12.0);
        assert_relative_eq!(ccd.total_sn, 39.0);
        assert_relative_eq!(ccd.peak_pixel_flux, 8800.0);
        assert_relative_eq!(ccd.well_depth, 110000.0);
        assert_relative_eq!(ccd.amp_gain, 1.2);
    }

    #[test]
    fn test_absent_axis_is_untouched() {
        let mut result = sample_result();
        trim_graph_result(
            &mut result,
            &SignificantFigures { x_axis: None, y_axis: Some(3), ccd: None },
        );

        let data = &result.groups[0].graphs[0].series[0].data;
        // x untouched, y trimmed.
        assert_relative_eq!(data[0].0, 486.1234);
        assert_relative_eq!(data[0].1, 12.3);
        // CCD attributes untouched.
        assert_relative_eq!(result.ccds[0].peak_pixel_flux, 8765.43);
    }
}
