use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// `{id, name}` pair used for lookups and hierarchies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NamedRef {
    pub id: Uuid,
    pub name: String,
}

impl NamedRef {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: Uuid,
    pub location_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbourhood {
    pub id: Uuid,
    pub city_id: Uuid,
    pub name: String,
}

/// location → city → neighbourhood path of a single neighbourhood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationHierarchy {
    pub location: NamedRef,
    pub city: NamedRef,
    pub neighbourhood: NamedRef,
}

impl From<&Location> for NamedRef {
    fn from(value: &Location) -> Self {
        NamedRef::new(value.id, value.name.clone())
    }
}

impl From<&City> for NamedRef {
    fn from(value: &City) -> Self {
        NamedRef::new(value.id, value.name.clone())
    }
}

impl From<&Neighbourhood> for NamedRef {
    fn from(value: &Neighbourhood) -> Self {
        NamedRef::new(value.id, value.name.clone())
    }
}
