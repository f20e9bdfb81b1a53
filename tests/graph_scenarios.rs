//! End-to-end graph queries against a scripted calculator: peak lookup,
//! interpolation, range outcomes, and significant-figure trimming.

mod support;

use std::sync::Arc;

use itc_rust::cache::StoreFactory;
use itc_rust::models::SignificantFigures;
use itc_rust::services::{ItcError, ItcService};

use support::{graph_request, graphs_payload, nm, StubCalculator};

fn service_with_series() -> (Arc<StubCalculator>, ItcService) {
    let stub = Arc::new(StubCalculator::with_graphs(graphs_payload(
        100_000.0,
        10.0,
        vec![(1.0, 1000.0), (2.0, 1001.0)],
        vec![(1.0, 300.0), (2.0, 316.0)],
    )));
    let service = ItcService::new(stub.clone(), StoreFactory::create_local());
    (stub, service)
}

#[tokio::test]
async fn test_peak_signal_to_noise_without_wavelength() {
    let (_, service) = service_with_series();

    let versioned = service.spectroscopy_graph(graph_request(0.0025, 10, None, None)).await.unwrap();
    let result = versioned.result;

    assert_eq!(result.peak_final_sn.value(), 1001.0);
    assert_eq!(result.peak_single_sn.value(), 316.0);
    assert!(result.at_wavelength_final_sn.is_none());
    assert!(result.warnings.is_empty());
    assert_eq!(result.ccds.len(), 1);
    assert_eq!(result.groups.len(), 1);
}

#[tokio::test]
async fn test_interpolated_signal_to_noise_at_wavelength() {
    let (_, service) = service_with_series();

    let versioned = service
        .spectroscopy_graph(graph_request(0.0025, 10, Some(nm(1.5)), None))
        .await
        .unwrap();

    assert_eq!(versioned.result.at_wavelength_final_sn.unwrap().value(), 1000.5);
    assert!(versioned.result.warnings.is_empty());
}

#[tokio::test]
async fn test_below_range_wavelength_is_warned_not_clamped() {
    let (_, service) = service_with_series();

    let versioned = service
        .spectroscopy_graph(graph_request(0.0025, 10, Some(nm(0.1)), None))
        .await
        .unwrap();
    let result = versioned.result;

    assert!(result.at_wavelength_final_sn.is_none());
    assert!(result.warnings.iter().any(|w| w.contains("0.1 nm") && w.contains("below")));
    // The graph data itself is still returned.
    assert_eq!(result.peak_final_sn.value(), 1001.0);
}

#[tokio::test]
async fn test_above_range_wavelength_is_warned_not_clamped() {
    let (_, service) = service_with_series();

    let versioned = service
        .spectroscopy_graph(graph_request(0.0025, 10, Some(nm(5.1)), None))
        .await
        .unwrap();
    let result = versioned.result;

    assert!(result.at_wavelength_final_sn.is_none());
    assert!(result.warnings.iter().any(|w| w.contains("5.1 nm") && w.contains("above")));
}

#[tokio::test]
async fn test_significant_figures_trim_series_and_peaks() {
    let (_, service) = service_with_series();

    let figures = SignificantFigures { x_axis: Some(1), y_axis: Some(3), ccd: Some(2) };
    let versioned = service
        .spectroscopy_graph(graph_request(0.0025, 10, None, Some(figures)))
        .await
        .unwrap();
    let result = versioned.result;

    // y trimmed to three figures.
    assert_eq!(result.peak_final_sn.value(), 1000.0);
    assert_eq!(result.peak_single_sn.value(), 316.0);
    let final_series = result.groups[0].graphs[0]
        .series
        .iter()
        .find(|s| s.series_type == itc_rust::models::SeriesDataType::FinalS2nData)
        .unwrap();
    assert_eq!(final_series.data[0], (1.0, 1000.0));
    assert_eq!(final_series.data[1], (2.0, 1000.0));
    // ccd attributes trimmed to two figures.
    assert_eq!(result.ccds[0].well_depth, 100_000.0);
    assert_eq!(result.ccds[0].peak_pixel_flux, 10.0);
}

#[tokio::test]
async fn test_untrimmed_request_keeps_full_precision() {
    let stub = Arc::new(StubCalculator::with_graphs(graphs_payload(
        106_270.0,
        12.345,
        vec![(486.1234, 1000.5678)],
        vec![(486.1234, 316.4321)],
    )));
    let service = ItcService::new(stub, StoreFactory::create_local());

    let versioned = service.spectroscopy_graph(graph_request(1.0, 1, None, None)).await.unwrap();
    let result = versioned.result;

    assert_eq!(result.peak_final_sn.value(), 1000.5678);
    assert_eq!(result.ccds[0].well_depth, 106_270.0);
}

#[tokio::test]
async fn test_empty_detector_list_is_calculation_error() {
    let mut payload = graphs_payload(100_000.0, 10.0, vec![(1.0, 10.0)], vec![(1.0, 3.0)]);
    payload.ccds.clear();
    let stub = Arc::new(StubCalculator::with_graphs(payload));
    let service = ItcService::new(stub, StoreFactory::create_local());

    let error = service.spectroscopy_graph(graph_request(1.0, 1, None, None)).await.unwrap_err();
    assert!(matches!(error, ItcError::Calculation(_)));
}

#[tokio::test]
async fn test_missing_final_series_is_calculation_error() {
    let mut payload = graphs_payload(100_000.0, 10.0, vec![(1.0, 10.0)], vec![(1.0, 3.0)]);
    payload.groups[0].graphs[0]
        .series
        .retain(|s| s.series_type != itc_rust::models::SeriesDataType::FinalS2nData);
    let stub = Arc::new(StubCalculator::with_graphs(payload));
    let service = ItcService::new(stub, StoreFactory::create_local());

    let error = service.spectroscopy_graph(graph_request(1.0, 1, None, None)).await.unwrap_err();
    assert!(matches!(error, ItcError::Calculation(_)));
}
