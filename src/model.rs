//! Vehicle registry entities.
//!
//! Links come first in the JSON form, followed by the entity fields. Empty
//! strings and zero numbers are left out.

use serde::{Deserialize, Serialize};

use crate::hypermedia::{Linkable, Linked};

fn is_zero(n: &i32) -> bool {
    *n == 0
}

/// A vehicle manufacturer, identified by its HSN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    #[serde(flatten)]
    pub linked: Linked,
    #[serde(rename = "hsn", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl Manufacturer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            linked: Linked::new(),
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The power source of a vehicle (petrol, diesel, electric, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerSource {
    #[serde(flatten)]
    pub linked: Linked,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i32,
    #[serde(rename = "name", default, skip_serializing_if = "String::is_empty")]
    pub short_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl PowerSource {
    pub fn new(id: i32, short_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            linked: Linked::new(),
            id,
            short_name: short_name.into(),
            description: description.into(),
        }
    }
}

/// A vehicle type, identified by its TSN within a manufacturer.
///
/// `manufacturer` and `power_source` are only populated on single-vehicle
/// lookups and never serialised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(flatten)]
    pub linked: Linked,
    #[serde(skip)]
    pub manufacturer_id: String,
    #[serde(skip)]
    pub manufacturer: Option<Manufacturer>,
    #[serde(skip)]
    pub power_source_id: i32,
    #[serde(skip)]
    pub power_source: Option<PowerSource>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tsn: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub trade_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub commercial_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub allotment_date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bodywork: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub power: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub engine_capacity: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub axles: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub powered_axles: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub seats: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub maximum_mass: i32,
}

impl Vehicle {
    /// The columns returned by vehicle listings.
    pub fn summary(&self) -> Vehicle {
        Vehicle {
            manufacturer_id: self.manufacturer_id.clone(),
            tsn: self.tsn.clone(),
            trade_name: self.trade_name.clone(),
            commercial_name: self.commercial_name.clone(),
            allotment_date: self.allotment_date.clone(),
            ..Vehicle::default()
        }
    }
}

macro_rules! impl_linkable {
    ($($ty:ty),*) => {$(
        impl Linkable for $ty {
            fn linked(&self) -> &Linked {
                &self.linked
            }

            fn linked_mut(&mut self) -> &mut Linked {
                &mut self.linked
            }
        }
    )*};
}

impl_linkable!(Manufacturer, PowerSource, Vehicle);
