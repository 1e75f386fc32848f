//! In-memory repository.

use async_trait::async_trait;

use super::{Repository, RepositoryError};
use crate::model::{Manufacturer, PowerSource, Vehicle};

/// A repository backed by plain vectors, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    manufacturers: Vec<Manufacturer>,
    power_sources: Vec<PowerSource>,
    vehicles: Vec<Vehicle>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manufacturer(mut self, manufacturer: Manufacturer) -> Self {
        self.manufacturers.push(manufacturer);
        self
    }

    pub fn with_power_source(mut self, power_source: PowerSource) -> Self {
        self.power_sources.push(power_source);
        self
    }

    pub fn with_vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    /// A small sample of the KBA vehicle registry.
    pub fn fixtures() -> Self {
        Self::new()
            .with_manufacturer(Manufacturer::new("0005", "BMW"))
            .with_manufacturer(Manufacturer::new("0588", "VW"))
            .with_power_source(PowerSource::new(1, "Benzin", "Benzin"))
            .with_power_source(PowerSource::new(2, "Diesel", "Diesel"))
            .with_power_source(PowerSource::new(
                14,
                "Wasserst./Benzin/E",
                "Bivalenter Betrieb mit Wasserstoff oder Benzin kombiniert mit Elektromotor",
            ))
            .with_vehicle(Vehicle {
                manufacturer_id: "0005".into(),
                power_source_id: 1,
                tsn: "156".into(),
                trade_name: "3ER REIHE".into(),
                commercial_name: "318I".into(),
                allotment_date: "1990-01-01".into(),
                category: "M1".into(),
                bodywork: "LIMOUSINE".into(),
                power: 83,
                engine_capacity: 1796,
                axles: 2,
                powered_axles: 1,
                seats: 5,
                maximum_mass: 1520,
                ..Vehicle::default()
            })
            .with_vehicle(Vehicle {
                manufacturer_id: "0005".into(),
                power_source_id: 2,
                tsn: "170".into(),
                trade_name: "3ER REIHE".into(),
                commercial_name: "324D".into(),
                allotment_date: "1991-03-01".into(),
                category: "M1".into(),
                power: 63,
                axles: 2,
                powered_axles: 1,
                seats: 5,
                ..Vehicle::default()
            })
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn manufacturers(&self) -> Result<Vec<Manufacturer>, RepositoryError> {
        Ok(self.manufacturers.clone())
    }

    async fn manufacturer(&self, hsn: &str) -> Result<Manufacturer, RepositoryError> {
        self.manufacturers
            .iter()
            .find(|m| m.id == hsn)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn vehicles(&self, manufacturer: &Manufacturer) -> Result<Vec<Vehicle>, RepositoryError> {
        Ok(self
            .vehicles
            .iter()
            .filter(|v| v.manufacturer_id == manufacturer.id)
            .map(Vehicle::summary)
            .collect())
    }

    async fn vehicle(&self, manufacturer: &Manufacturer, tsn: &str) -> Result<Vehicle, RepositoryError> {
        let mut vehicle = self
            .vehicles
            .iter()
            .find(|v| v.manufacturer_id == manufacturer.id && v.tsn == tsn)
            .cloned()
            .ok_or(RepositoryError::NotFound)?;

        vehicle.manufacturer = self.manufacturers.iter().find(|m| m.id == vehicle.manufacturer_id).cloned();
        vehicle.power_source = self.power_sources.iter().find(|p| p.id == vehicle.power_source_id).cloned();
        Ok(vehicle)
    }

    async fn power_sources(&self) -> Result<Vec<PowerSource>, RepositoryError> {
        Ok(self.power_sources.clone())
    }

    async fn power_source(&self, id: i32) -> Result<PowerSource, RepositoryError> {
        self.power_sources
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}
