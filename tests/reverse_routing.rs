//! Reverse routing against the service's own route table.

use std::sync::Arc;

use vehicle_service::repository::InMemoryRepository;
use vehicle_service::routing::{ForwardedHeaders, Resolution, UrlBuilder};
use vehicle_service::service::{self, routes, VehicleService};
use vehicle_service::Error;

fn builder(forwarded: ForwardedHeaders) -> UrlBuilder {
    let service = Arc::new(VehicleService::new(Arc::new(InMemoryRepository::new())));
    let dispatcher = service::dispatcher(service).unwrap();
    UrlBuilder::new(
        dispatcher.registry().clone(),
        Some("processing.envirocar.org".into()),
        forwarded,
    )
}

fn cases() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    vec![
        (routes::ROOT, vec![]),
        (routes::MANUFACTURERS, vec![]),
        (routes::MANUFACTURER, vec![("hsn", "0005")]),
        (routes::VEHICLES, vec![("hsn", "0005")]),
        (routes::VEHICLE, vec![("hsn", "0005"), ("tsn", "A B/C")]),
        (routes::POWER_SOURCES, vec![]),
        (routes::POWER_SOURCE, vec![("id", "14")]),
    ]
}

#[test]
fn test_generated_urls_resolve_to_their_route() {
    let urls = builder(ForwardedHeaders::default());
    let service = Arc::new(VehicleService::new(Arc::new(InMemoryRepository::new())));
    let dispatcher = service::dispatcher(service).unwrap();
    let registry = dispatcher.registry();

    for (name, params) in cases() {
        let url = urls.url_for(name, &params).unwrap();
        match registry.resolve(&axum::http::Method::GET, url.path()) {
            Resolution::Matched { index, params: matched } => {
                assert_eq!(registry.routes()[index].name(), name);
                assert_eq!(matched.len(), params.len());
                for (key, value) in &params {
                    assert_eq!(matched.get(*key).map(String::as_str), Some(*value), "{name}");
                }
            }
            other => panic!("{name}: {} did not resolve: {other:?}", url),
        }
    }
}

#[test]
fn test_prefix_is_applied_once() {
    let urls = builder(ForwardedHeaders {
        prefix: Some("/vehicles".into()),
        proto: Some("https".into()),
        port: Some("443".into()),
    });

    for (name, params) in cases() {
        let url = urls.url_for(name, &params).unwrap();
        assert!(url.path().starts_with("/vehicles"), "{url}");
        assert!(!url.path().starts_with("/vehicles/vehicles"), "{url}");
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.port(), None);
    }
}

#[test]
fn test_unregistered_route_is_an_error() {
    let urls = builder(ForwardedHeaders::default());
    assert!(matches!(urls.url_for("trucks", &[]), Err(Error::RouteNotFound(name)) if name == "trucks"));
}

#[test]
fn test_missing_parameter_is_an_error() {
    let urls = builder(ForwardedHeaders::default());
    assert!(matches!(
        urls.url_for(routes::VEHICLE, &[("hsn", "0005")]),
        Err(Error::MissingParameter { .. })
    ));
}
