use std::collections::HashMap;

use models_classifieds::api::{CityNode, LocationNode};
use models_classifieds::service::NamedRef;
use uuid::Uuid;

use super::ClassifiedsServiceImpl;
use crate::domain::{
    error::{ClassifiedsError, Result},
    ports::{ClassifiedsStorage, ConfirmationQueue},
};

#[tracing::instrument(skip(service))]
pub(super) async fn list_locations<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
) -> Result<Vec<NamedRef>>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let locations = service
        .storage
        .list_locations()
        .await
        .map_err(ClassifiedsError::from_storage)?;

    Ok(locations.iter().map(NamedRef::from).collect())
}

#[tracing::instrument(skip(service))]
pub(super) async fn list_cities<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    location_id: Uuid,
) -> Result<Vec<NamedRef>>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let cities = service
        .storage
        .list_cities(Some(location_id))
        .await
        .map_err(ClassifiedsError::from_storage)?;

    Ok(cities.iter().map(NamedRef::from).collect())
}

#[tracing::instrument(skip(service))]
pub(super) async fn list_neighbourhoods<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    city_id: Uuid,
) -> Result<Vec<NamedRef>>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let neighbourhoods = service
        .storage
        .list_neighbourhoods(Some(city_id))
        .await
        .map_err(ClassifiedsError::from_storage)?;

    Ok(neighbourhoods.iter().map(NamedRef::from).collect())
}

/// Locations with their cities and each city's neighbourhoods, all ordered by name
#[tracing::instrument(skip(service))]
pub(super) async fn location_tree<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
) -> Result<Vec<LocationNode>>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let locations = service
        .storage
        .list_locations()
        .await
        .map_err(ClassifiedsError::from_storage)?;
    let cities = service
        .storage
        .list_cities(None)
        .await
        .map_err(ClassifiedsError::from_storage)?;
    let neighbourhoods = service
        .storage
        .list_neighbourhoods(None)
        .await
        .map_err(ClassifiedsError::from_storage)?;

    let mut neighbourhoods_by_city: HashMap<Uuid, Vec<NamedRef>> = HashMap::new();
    for neighbourhood in &neighbourhoods {
        neighbourhoods_by_city
            .entry(neighbourhood.city_id)
            .or_default()
            .push(NamedRef::from(neighbourhood));
    }

    let mut cities_by_location: HashMap<Uuid, Vec<CityNode>> = HashMap::new();
    for city in cities {
        cities_by_location
            .entry(city.location_id)
            .or_default()
            .push(CityNode {
                id: city.id,
                neighbourhoods: neighbourhoods_by_city.remove(&city.id).unwrap_or_default(),
                name: city.name,
            });
    }

    Ok(locations
        .into_iter()
        .map(|location| LocationNode {
            id: location.id,
            cities: cities_by_location.remove(&location.id).unwrap_or_default(),
            name: location.name,
        })
        .collect())
}
