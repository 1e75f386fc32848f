//! Request handlers of the vehicle service.

use std::sync::Arc;

use super::{routes, VehicleService};
use crate::error::{Error, HttpError, Result};
use crate::http::{Reply, RequestContext};
use crate::hypermedia::{Link, Linkable, Linked, MEDIA_TYPE_JSON};
use crate::model::{Manufacturer, PowerSource, Vehicle};
use crate::repository::RepositoryError;

/// Pass an absent entity through as 404; anything else is logged and hidden.
fn lookup_failed(err: RepositoryError, what: &str) -> Error {
    match err {
        RepositoryError::NotFound => err.into(),
        err => {
            tracing::error!(error = %err, "Could not get {what}");
            HttpError::internal().into()
        }
    }
}

fn link(ctx: &RequestContext, route: &str, params: &[(&str, &str)], relation: &str, title: &str) -> Result<Link> {
    match ctx.url_for(route, params) {
        Ok(href) => Ok(Link::new(href, relation, MEDIA_TYPE_JSON, title)),
        Err(err) => {
            tracing::error!(error = %err, route, relation, "Could not create link");
            Err(HttpError::internal().into())
        }
    }
}

fn manufacturer_link(ctx: &RequestContext, m: &Manufacturer, relation: &str) -> Result<Link> {
    link(ctx, routes::MANUFACTURER, &[("hsn", m.id.as_str())], relation, &m.name)
}

fn power_source_link(ctx: &RequestContext, p: &PowerSource, relation: &str) -> Result<Link> {
    let id = p.id.to_string();
    link(ctx, routes::POWER_SOURCE, &[("id", id.as_str())], relation, &p.short_name)
}

fn vehicle_link(ctx: &RequestContext, v: &Vehicle, relation: &str) -> Result<Link> {
    link(
        ctx,
        routes::VEHICLE,
        &[("hsn", v.manufacturer_id.as_str()), ("tsn", v.tsn.as_str())],
        relation,
        &v.commercial_name,
    )
}

impl VehicleService {
    pub(super) async fn root(self: Arc<Self>, ctx: RequestContext) -> Result<Reply> {
        tracing::info!("Get root");

        let mut links = Linked::new();
        links.add_link(link(&ctx, routes::MANUFACTURERS, &[], "manufacturers", "Manufacturers")?);
        links.add_link(link(&ctx, routes::POWER_SOURCES, &[], "powerSources", "Power Sources")?);
        Ok(Reply::content(links))
    }

    pub(super) async fn manufacturers(self: Arc<Self>, ctx: RequestContext) -> Result<Reply> {
        tracing::info!("Get manufacturers");

        let mut manufacturers = self
            .repository
            .manufacturers()
            .await
            .map_err(|e| lookup_failed(e, "manufacturers"))?;

        for m in &mut manufacturers {
            let canonical = manufacturer_link(&ctx, m, "canonical")?;
            m.add_link(canonical);
        }
        Ok(Reply::content(manufacturers))
    }

    pub(super) async fn manufacturer(self: Arc<Self>, ctx: RequestContext) -> Result<Reply> {
        let hsn = ctx.param("hsn").unwrap_or_default();
        tracing::info!(hsn, "Get manufacturer");

        let mut m = self
            .repository
            .manufacturer(hsn)
            .await
            .map_err(|e| lookup_failed(e, "manufacturer"))?;

        let vehicles = link(&ctx, routes::VEHICLES, &[("hsn", m.id.as_str())], "vehicles", "")?;
        let this = manufacturer_link(&ctx, &m, "self")?;
        m.add_link(vehicles);
        m.add_link(this);
        Ok(Reply::content(m))
    }

    pub(super) async fn vehicles(self: Arc<Self>, ctx: RequestContext) -> Result<Reply> {
        let hsn = ctx.param("hsn").unwrap_or_default();
        tracing::info!(hsn, "Get vehicles");

        let m = self
            .repository
            .manufacturer(hsn)
            .await
            .map_err(|e| lookup_failed(e, "manufacturer"))?;
        let mut vehicles = self
            .repository
            .vehicles(&m)
            .await
            .map_err(|e| lookup_failed(e, "vehicles"))?;

        for v in &mut vehicles {
            let canonical = vehicle_link(&ctx, v, "canonical")?;
            v.add_link(canonical);
        }
        Ok(Reply::content(vehicles))
    }

    pub(super) async fn vehicle(self: Arc<Self>, ctx: RequestContext) -> Result<Reply> {
        let hsn = ctx.param("hsn").unwrap_or_default();
        let tsn = ctx.param("tsn").unwrap_or_default();
        tracing::info!(hsn, tsn, "Get vehicle");

        let m = self
            .repository
            .manufacturer(hsn)
            .await
            .map_err(|e| lookup_failed(e, "manufacturer"))?;
        let mut v = self
            .repository
            .vehicle(&m, tsn)
            .await
            .map_err(|e| lookup_failed(e, "vehicle"))?;

        let this = vehicle_link(&ctx, &v, "self")?;
        let power_source = v
            .power_source
            .as_ref()
            .map(|p| power_source_link(&ctx, p, "powerSource"))
            .transpose()?;
        let manufacturer = v
            .manufacturer
            .as_ref()
            .map(|m| manufacturer_link(&ctx, m, "manufacturer"))
            .transpose()?;

        v.add_link(this);
        v.add_link(power_source);
        v.add_link(manufacturer);
        Ok(Reply::content(v))
    }

    pub(super) async fn power_sources(self: Arc<Self>, ctx: RequestContext) -> Result<Reply> {
        tracing::info!("Get power sources");

        let mut power_sources = self
            .repository
            .power_sources()
            .await
            .map_err(|e| lookup_failed(e, "power sources"))?;

        for p in &mut power_sources {
            let canonical = power_source_link(&ctx, p, "canonical")?;
            p.add_link(canonical);
        }
        Ok(Reply::content(power_sources))
    }

    pub(super) async fn power_source(self: Arc<Self>, ctx: RequestContext) -> Result<Reply> {
        let raw = ctx.param("id").unwrap_or_default();
        tracing::info!(id = raw, "Get power source");

        let id: i32 = raw.parse().map_err(|_| self.malformed_id.reject(raw))?;
        let p = self
            .repository
            .power_source(id)
            .await
            .map_err(|e| lookup_failed(e, "power source"))?;
        Ok(Reply::content(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Dispatcher;
    use crate::repository::{InMemoryRepository, Repository};
    use crate::service::dispatcher;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };

    struct Broken;

    #[async_trait]
    impl Repository for Broken {
        async fn manufacturers(&self) -> Result<Vec<Manufacturer>, RepositoryError> {
            Err(RepositoryError::Backend("connection refused".into()))
        }

        async fn manufacturer(&self, _: &str) -> Result<Manufacturer, RepositoryError> {
            Err(RepositoryError::NotFound)
        }

        async fn vehicles(&self, _: &Manufacturer) -> Result<Vec<Vehicle>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn vehicle(&self, _: &Manufacturer, _: &str) -> Result<Vehicle, RepositoryError> {
            Err(RepositoryError::NotFound)
        }

        async fn power_sources(&self) -> Result<Vec<PowerSource>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn power_source(&self, _: i32) -> Result<PowerSource, RepositoryError> {
            Err(RepositoryError::NotFound)
        }
    }

    async fn get(dispatcher: &Dispatcher, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::get(uri)
            .header("host", "vehicles.example.org")
            .body(Body::empty())
            .unwrap();
        let response = dispatcher.dispatch(request).await;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn fixtures() -> Dispatcher {
        dispatcher(Arc::new(VehicleService::new(Arc::new(InMemoryRepository::fixtures())))).unwrap()
    }

    #[tokio::test]
    async fn test_vehicle_links() {
        let (status, body) = get(&fixtures(), "/manufacturers/0005/vehicles/156").await;
        assert_eq!(status, StatusCode::OK);

        let links = body["links"].as_array().unwrap();
        let rels: Vec<_> = links.iter().map(|l| l["rel"].as_str().unwrap()).collect();
        assert_eq!(rels, ["self", "powerSource", "manufacturer"]);
        assert_eq!(links[0]["href"], "http://vehicles.example.org/manufacturers/0005/vehicles/156");
        assert_eq!(links[0]["title"], "318I");
        assert_eq!(links[1]["href"], "http://vehicles.example.org/powerSources/1");
        assert_eq!(links[1]["title"], "Benzin");
        assert_eq!(links[2]["href"], "http://vehicles.example.org/manufacturers/0005");
        assert_eq!(links[2]["title"], "BMW");
        assert_eq!(body["tsn"], "156");
        assert_eq!(body["maximumMass"], 1520);
    }

    #[tokio::test]
    async fn test_vehicles_listing_has_canonical_links() {
        let (status, body) = get(&fixtures(), "/manufacturers/0005/vehicles").await;
        assert_eq!(status, StatusCode::OK);

        let vehicles = body.as_array().unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[1]["links"][0]["rel"], "canonical");
        assert_eq!(vehicles[1]["links"][0]["title"], "324D");
        assert_eq!(
            vehicles[1]["links"][0]["href"],
            "http://vehicles.example.org/manufacturers/0005/vehicles/170"
        );
        assert!(vehicles[1].get("power").is_none());
    }

    #[tokio::test]
    async fn test_vehicles_of_unknown_manufacturer() {
        let (status, body) = get(&fixtures(), "/manufacturers/9999/vehicles").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["statusCode"], 404);
    }

    #[tokio::test]
    async fn test_power_sources_listing() {
        let (_, body) = get(&fixtures(), "/powerSources").await;
        let sources = body.as_array().unwrap();
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0]["links"][0]["href"], "http://vehicles.example.org/powerSources/1");
        assert_eq!(sources[0]["links"][0]["rel"], "canonical");
        assert_eq!(sources[0]["links"][0]["title"], "Benzin");
    }

    #[tokio::test]
    async fn test_backend_failure_is_hidden() {
        let dispatcher = dispatcher(Arc::new(VehicleService::new(Arc::new(Broken)))).unwrap();
        let (status, body) = get(&dispatcher, "/manufacturers").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "internal server error");
        assert!(!body.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_empty_listing_is_an_array() {
        let dispatcher = dispatcher(Arc::new(VehicleService::new(Arc::new(Broken)))).unwrap();
        let (status, body) = get(&dispatcher, "/powerSources").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }
}
