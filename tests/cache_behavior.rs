//! Cache transparency and version gating through the orchestrator.

mod support;

use std::sync::Arc;

use itc_rust::cache::StoreFactory;
use itc_rust::legacy::LegacyResponse;
use itc_rust::services::{ItcService, SERVER_VERSION};

use support::{
    exposure_payload, graph_request, graphs_payload, nm, spectroscopy_time_request,
    StubCalculator,
};

fn service(stub: Arc<StubCalculator>) -> ItcService {
    ItcService::new(stub, StoreFactory::create_local())
}

fn scripted_stub() -> Arc<StubCalculator> {
    Arc::new(StubCalculator::with_graphs(graphs_payload(
        100_000.0,
        10.0,
        vec![(1.0, 1000.0), (2.0, 1001.0)],
        vec![(1.0, 300.0), (2.0, 316.0)],
    )))
}

#[tokio::test]
async fn test_identical_requests_invoke_calculator_once() {
    let stub = scripted_stub();
    let service = service(stub.clone());

    let first = service.spectroscopy_graph(graph_request(0.0025, 10, None, None)).await.unwrap();
    let second = service.spectroscopy_graph(graph_request(0.0025, 10, None, None)).await.unwrap();

    assert_eq!(stub.graphs_call_count(), 1);
    assert_eq!(first.result, second.result);
}

#[tokio::test]
async fn test_distinct_requests_compute_separately() {
    let stub = scripted_stub();
    let service = service(stub.clone());

    service.spectroscopy_graph(graph_request(0.0025, 10, None, None)).await.unwrap();
    service.spectroscopy_graph(graph_request(0.0025, 20, None, None)).await.unwrap();

    assert_eq!(stub.graphs_call_count(), 2);
}

#[tokio::test]
async fn test_version_change_invalidates_every_key() {
    let stub = scripted_stub();
    let service = service(stub.clone());

    service.spectroscopy_graph(graph_request(0.0025, 10, None, None)).await.unwrap();
    assert_eq!(stub.graphs_call_count(), 1);

    // Same request under a new upstream data version must recompute.
    stub.set_version("stub-data-2");
    let versioned =
        service.spectroscopy_graph(graph_request(0.0025, 10, None, None)).await.unwrap();

    assert_eq!(stub.graphs_call_count(), 2);
    assert_eq!(versioned.data_version.unwrap().as_str(), "stub-data-2");
}

#[tokio::test]
async fn test_failed_calculations_are_not_cached() {
    let stub = Arc::new(StubCalculator::new());
    stub.script_graphs(vec![LegacyResponse::Error("transient".to_string())]);
    let service = service(stub.clone());

    let failed = service.spectroscopy_graph(graph_request(0.0025, 10, None, None)).await;
    assert!(failed.is_err());

    stub.script_graphs(vec![LegacyResponse::Success(graphs_payload(
        100_000.0,
        10.0,
        vec![(1.0, 1000.0), (2.0, 1001.0)],
        vec![(1.0, 300.0), (2.0, 316.0)],
    ))]);
    let recovered = service.spectroscopy_graph(graph_request(0.0025, 10, None, None)).await;
    assert!(recovered.is_ok());
    assert_eq!(stub.graphs_call_count(), 2);
}

#[tokio::test]
async fn test_integration_time_results_are_cached_per_namespace() {
    let stub = Arc::new(StubCalculator::new());
    stub.set_exposure(LegacyResponse::Success(exposure_payload(30.0, 6, 40.0, 16.3)));
    let service = service(stub.clone());

    let request = spectroscopy_time_request(40.0, Some(nm(500.0)));
    let first = service.spectroscopy_integration_time(request.clone()).await.unwrap();
    let second = service.spectroscopy_integration_time(request).await.unwrap();

    assert_eq!(stub.exposure_call_count(), 1);
    assert_eq!(first.result, second.result);
}

#[tokio::test]
async fn test_responses_carry_versions() {
    let stub = scripted_stub();
    stub.set_version("2024B.2");
    let service = service(stub);

    let versions = service.versions().await;
    assert_eq!(versions.server_version, SERVER_VERSION);
    assert_eq!(versions.data_version.unwrap().as_str(), "2024B.2");

    let versioned = service
        .spectroscopy_graph(graph_request(0.0025, 10, None, None))
        .await
        .unwrap();
    assert_eq!(versioned.server_version, SERVER_VERSION);
    assert_eq!(versioned.data_version.unwrap().as_str(), "2024B.2");
}
