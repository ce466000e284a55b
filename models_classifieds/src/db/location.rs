//! Database layer location tree models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::NamedRef;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct City {
    pub id: Uuid,
    pub location_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Neighbourhood {
    pub id: Uuid,
    pub city_id: Uuid,
    pub name: String,
}

/// A neighbourhood joined with its city and location.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LocationHierarchy {
    pub location_id: Uuid,
    pub location_name: String,
    pub city_id: Uuid,
    pub city_name: String,
    pub neighbourhood_id: Uuid,
    pub neighbourhood_name: String,
}

// ===== Conversions =====

impl From<Location> for crate::service::Location {
    fn from(db: Location) -> Self {
        Self {
            id: db.id,
            name: db.name,
        }
    }
}

impl From<City> for crate::service::City {
    fn from(db: City) -> Self {
        Self {
            id: db.id,
            location_id: db.location_id,
            name: db.name,
        }
    }
}

impl From<Neighbourhood> for crate::service::Neighbourhood {
    fn from(db: Neighbourhood) -> Self {
        Self {
            id: db.id,
            city_id: db.city_id,
            name: db.name,
        }
    }
}

impl From<LocationHierarchy> for crate::service::LocationHierarchy {
    fn from(db: LocationHierarchy) -> Self {
        Self {
            location: NamedRef::new(db.location_id, db.location_name),
            city: NamedRef::new(db.city_id, db.city_name),
            neighbourhood: NamedRef::new(db.neighbourhood_id, db.neighbourhood_name),
        }
    }
}
