//! PostgreSQL repository using `tokio-postgres` and `deadpool-postgres`.

use async_trait::async_trait;
use deadpool_postgres::{Pool, PoolConfig, Runtime};
use tokio_postgres::{NoTls, Row};

use super::{Repository, RepositoryError};
use crate::config::DatabaseConfig;
use crate::model::{Manufacturer, PowerSource, Vehicle};

const SELECT_MANUFACTURERS: &str = "SELECT id, name FROM manufacturers ORDER BY id";

const SELECT_MANUFACTURER: &str = "SELECT id, name FROM manufacturers WHERE id = $1 LIMIT 1";

const SELECT_VEHICLES: &str = "SELECT id, trade_name, commercial_name, allotment_date, manufacturer_id \
     FROM vehicles WHERE manufacturer_id = $1 ORDER BY id";

const SELECT_VEHICLE: &str = "SELECT v.id, v.manufacturer_id, v.power_source_id, v.trade_name, \
     v.commercial_name, v.allotment_date, v.category, v.bodywork, v.power, v.engine_capacity, \
     v.axles, v.powered_axles, v.seats, v.maximum_mass, \
     m.name AS manufacturer_name, p.short_name AS power_source_name, p.description AS power_source_description \
     FROM vehicles v \
     JOIN manufacturers m ON m.id = v.manufacturer_id \
     LEFT JOIN power_sources p ON p.id = v.power_source_id \
     WHERE v.manufacturer_id = $1 AND v.id = $2 LIMIT 1";

const SELECT_POWER_SOURCES: &str = "SELECT id, short_name, description FROM power_sources ORDER BY id";

const SELECT_POWER_SOURCE: &str = "SELECT id, short_name, description FROM power_sources WHERE id = $1 LIMIT 1";

/// A repository reading from the vehicles database.
pub struct PgRepository {
    pool: Pool,
}

impl PgRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a pool from the database configuration. Connections are
    /// opened lazily on first use.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, RepositoryError> {
        let (host, port) = config
            .host_and_port()
            .ok_or_else(|| RepositoryError::Backend(format!("invalid database address '{}'", config.address)))?;

        let mut pg_config = deadpool_postgres::Config::new();
        pg_config.host = Some(host.to_string());
        pg_config.port = Some(port);
        pg_config.user = Some(config.user.clone());
        pg_config.password = Some(config.password.clone());
        pg_config.dbname = Some(config.name.clone());
        pg_config.pool = Some(PoolConfig::new(config.pool_size));

        let pool = pg_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| RepositoryError::Backend(format!("failed to create pool: {e}")))?;

        tracing::info!(address = %config.address, database = %config.name, "Database pool created");
        Ok(Self { pool })
    }
}

fn text(row: &Row, column: &str) -> Result<String, RepositoryError> {
    Ok(row.try_get::<_, Option<String>>(column)?.unwrap_or_default())
}

fn int(row: &Row, column: &str) -> Result<i32, RepositoryError> {
    Ok(row.try_get::<_, Option<i32>>(column)?.unwrap_or_default())
}

fn manufacturer_from_row(row: &Row) -> Result<Manufacturer, RepositoryError> {
    Ok(Manufacturer::new(text(row, "id")?, text(row, "name")?))
}

fn power_source_from_row(row: &Row) -> Result<PowerSource, RepositoryError> {
    Ok(PowerSource::new(int(row, "id")?, text(row, "short_name")?, text(row, "description")?))
}

fn vehicle_summary_from_row(row: &Row) -> Result<Vehicle, RepositoryError> {
    Ok(Vehicle {
        manufacturer_id: text(row, "manufacturer_id")?,
        tsn: text(row, "id")?,
        trade_name: text(row, "trade_name")?,
        commercial_name: text(row, "commercial_name")?,
        allotment_date: text(row, "allotment_date")?,
        ..Vehicle::default()
    })
}

fn vehicle_from_row(row: &Row) -> Result<Vehicle, RepositoryError> {
    let manufacturer_id = text(row, "manufacturer_id")?;
    let power_source_id = int(row, "power_source_id")?;

    let power_source = match row.try_get::<_, Option<String>>("power_source_name")? {
        Some(name) => Some(PowerSource::new(power_source_id, name, text(row, "power_source_description")?)),
        None => None,
    };

    Ok(Vehicle {
        manufacturer: Some(Manufacturer::new(manufacturer_id.clone(), text(row, "manufacturer_name")?)),
        manufacturer_id,
        power_source_id,
        power_source,
        tsn: text(row, "id")?,
        trade_name: text(row, "trade_name")?,
        commercial_name: text(row, "commercial_name")?,
        allotment_date: text(row, "allotment_date")?,
        category: text(row, "category")?,
        bodywork: text(row, "bodywork")?,
        power: int(row, "power")?,
        engine_capacity: int(row, "engine_capacity")?,
        axles: int(row, "axles")?,
        powered_axles: int(row, "powered_axles")?,
        seats: int(row, "seats")?,
        maximum_mass: int(row, "maximum_mass")?,
        ..Vehicle::default()
    })
}

#[async_trait]
impl Repository for PgRepository {
    async fn manufacturers(&self) -> Result<Vec<Manufacturer>, RepositoryError> {
        let client = self.pool.get().await?;
        let rows = client.query(SELECT_MANUFACTURERS, &[]).await?;
        rows.iter().map(manufacturer_from_row).collect()
    }

    async fn manufacturer(&self, hsn: &str) -> Result<Manufacturer, RepositoryError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(SELECT_MANUFACTURER, &[&hsn])
            .await?
            .ok_or(RepositoryError::NotFound)?;
        manufacturer_from_row(&row)
    }

    async fn vehicles(&self, manufacturer: &Manufacturer) -> Result<Vec<Vehicle>, RepositoryError> {
        let client = self.pool.get().await?;
        let rows = client.query(SELECT_VEHICLES, &[&manufacturer.id]).await?;
        rows.iter().map(vehicle_summary_from_row).collect()
    }

    async fn vehicle(&self, manufacturer: &Manufacturer, tsn: &str) -> Result<Vehicle, RepositoryError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(SELECT_VEHICLE, &[&manufacturer.id, &tsn])
            .await?
            .ok_or(RepositoryError::NotFound)?;
        vehicle_from_row(&row)
    }

    async fn power_sources(&self) -> Result<Vec<PowerSource>, RepositoryError> {
        let client = self.pool.get().await?;
        let rows = client.query(SELECT_POWER_SOURCES, &[]).await?;
        rows.iter().map(power_source_from_row).collect()
    }

    async fn power_source(&self, id: i32) -> Result<PowerSource, RepositoryError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(SELECT_POWER_SOURCE, &[&id])
            .await?
            .ok_or(RepositoryError::NotFound)?;
        power_source_from_row(&row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_rejects_bad_address() {
        let config = DatabaseConfig {
            address: "localhost".into(),
            ..DatabaseConfig::default()
        };
        assert!(matches!(PgRepository::from_config(&config), Err(RepositoryError::Backend(_))));
    }

    #[tokio::test]
    async fn test_from_config_builds_lazy_pool() {
        let repository = PgRepository::from_config(&DatabaseConfig::default()).unwrap();
        assert_eq!(repository.pool.status().size, 0);
    }
}
