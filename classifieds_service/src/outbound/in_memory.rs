//! In-memory storage adapter used by the service and router tests.
//!
//! Enforces the same uniqueness and reference rules as the Postgres schema and
//! applies [AdWrite]s all-or-nothing.

use std::collections::BTreeMap;
use std::sync::Mutex;

use models_classifieds::service::{
    Ad, AdImage, AdPropertyValue, Category, CategoryProperty, CategoryPropertySchema,
    CategoryPropertyValue, City, Location, LocationHierarchy, NamedRef, Neighbourhood, Profile,
    Property, User,
};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::ports::{AdListQuery, AdWrite, ClassifiedsStorage, StorageError};

#[derive(Debug, Error)]
pub enum InMemoryStorageError {
    #[error("integrity violation: {0}")]
    Integrity(String),
    #[error("in-memory storage lock poisoned")]
    Poisoned,
}

impl StorageError for InMemoryStorageError {
    fn is_integrity_violation(&self) -> bool {
        matches!(self, InMemoryStorageError::Integrity(_))
    }
}

type Result<T> = std::result::Result<T, InMemoryStorageError>;

fn integrity<T>(message: impl Into<String>) -> Result<T> {
    Err(InMemoryStorageError::Integrity(message.into()))
}

#[derive(Debug, Clone)]
struct StoredValue {
    id: Uuid,
    value: String,
}

#[derive(Debug, Clone, Default)]
struct State {
    users: BTreeMap<Uuid, User>,
    profiles: BTreeMap<Uuid, Profile>,
    categories: BTreeMap<Uuid, Category>,
    properties: BTreeMap<Uuid, Property>,
    bindings: BTreeMap<Uuid, CategoryProperty>,
    values: BTreeMap<Uuid, CategoryPropertyValue>,
    locations: BTreeMap<Uuid, Location>,
    cities: BTreeMap<Uuid, City>,
    neighbourhoods: BTreeMap<Uuid, Neighbourhood>,
    ads: BTreeMap<Uuid, Ad>,
    images: BTreeMap<Uuid, AdImage>,
    /// keyed by (ad id, property id)
    ad_values: BTreeMap<(Uuid, Uuid), StoredValue>,
}

impl State {
    fn check_category(&self, category: &Category) -> Result<()> {
        if category.parent_id == Some(category.id) {
            return integrity("category cannot be its own parent");
        }
        match category.parent_id {
            Some(parent) if !self.categories.contains_key(&parent) => {
                integrity(format!("parent category {parent} does not exist"))
            }
            _ => Ok(()),
        }
    }

    fn apply(&mut self, write: AdWrite) -> Result<()> {
        let ad = write.ad;
        if !self.users.contains_key(&ad.user_id) {
            return integrity(format!("user {} does not exist", ad.user_id));
        }
        if !self.categories.contains_key(&ad.category_id) {
            return integrity(format!("category {} does not exist", ad.category_id));
        }
        if !self.neighbourhoods.contains_key(&ad.neighbourhood_id) {
            return integrity(format!("neighbourhood {} does not exist", ad.neighbourhood_id));
        }
        if ad.price < 0 {
            return integrity("price must not be negative");
        }
        match (write.is_new, self.ads.contains_key(&ad.id)) {
            (true, true) => return integrity(format!("ad {} already exists", ad.id)),
            (false, false) => return integrity(format!("ad {} does not exist", ad.id)),
            _ => {}
        }
        let ad_id = ad.id;
        let category_id = ad.category_id;
        self.ads.insert(ad_id, ad);

        if !self.users.contains_key(&write.profile.user_id) {
            return integrity(format!("user {} does not exist", write.profile.user_id));
        }
        self.profiles.insert(write.profile.user_id, write.profile);

        for id in &write.deleted_image_ids {
            if self.images.get(id).is_some_and(|i| i.ad_id == ad_id) {
                self.images.remove(id);
            }
        }
        for image in write.new_images {
            if image.ad_id != ad_id || self.images.contains_key(&image.id) {
                return integrity(format!("image {} cannot be stored", image.id));
            }
            self.images.insert(image.id, image);
        }

        if write.prune_unbound_values {
            let bound: Vec<Uuid> = self
                .bindings
                .values()
                .filter(|b| b.category_id == category_id)
                .map(|b| b.property_id)
                .collect();
            self.ad_values
                .retain(|(ad, property), _| *ad != ad_id || bound.contains(property));
        }
        for (property_id, value) in write.property_values {
            if !self.properties.contains_key(&property_id) {
                return integrity(format!("property {property_id} does not exist"));
            }
            self.ad_values
                .entry((ad_id, property_id))
                .and_modify(|stored| stored.value = value.clone())
                .or_insert_with(|| StoredValue {
                    id: Uuid::now_v7(),
                    value,
                });
        }

        Ok(())
    }
}

/// Mutex guarded maps standing in for the database
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    state: Mutex<State>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&State) -> T) -> Result<T> {
        let state = self.state.lock().map_err(|_| InMemoryStorageError::Poisoned)?;
        Ok(f(&state))
    }

    fn write<T>(&self, f: impl FnOnce(&mut State) -> Result<T>) -> Result<T> {
        let mut state = self.state.lock().map_err(|_| InMemoryStorageError::Poisoned)?;
        f(&mut state)
    }

    // ===== Seeding =====

    pub fn add_user(&self, user: User) -> Result<()> {
        self.write(|s| {
            if s.users.values().any(|u| u.email == user.email) {
                return integrity(format!("email {} already used", user.email));
            }
            s.users.insert(user.id, user);
            Ok(())
        })
    }

    pub fn add_profile(&self, profile: Profile) -> Result<()> {
        self.write(|s| {
            s.profiles.insert(profile.user_id, profile);
            Ok(())
        })
    }

    pub fn add_location(&self, location: Location) -> Result<()> {
        self.write(|s| {
            s.locations.insert(location.id, location);
            Ok(())
        })
    }

    pub fn add_city(&self, city: City) -> Result<()> {
        self.write(|s| {
            if !s.locations.contains_key(&city.location_id) {
                return integrity(format!("location {} does not exist", city.location_id));
            }
            s.cities.insert(city.id, city);
            Ok(())
        })
    }

    pub fn add_neighbourhood(&self, neighbourhood: Neighbourhood) -> Result<()> {
        self.write(|s| {
            if !s.cities.contains_key(&neighbourhood.city_id) {
                return integrity(format!("city {} does not exist", neighbourhood.city_id));
            }
            s.neighbourhoods.insert(neighbourhood.id, neighbourhood);
            Ok(())
        })
    }

    /// Inserts without running the domain's parent checks, so corrupt trees can be built
    pub fn add_category_unchecked(&self, category: Category) -> Result<()> {
        self.write(|s| {
            s.categories.insert(category.id, category);
            Ok(())
        })
    }

    // ===== Inspection =====

    pub fn ad_count(&self) -> Result<usize> {
        self.read(|s| s.ads.len())
    }

    /// Stored (property id, value) pairs of one ad
    pub fn stored_values(&self, ad_id: Uuid) -> Result<Vec<(Uuid, String)>> {
        self.read(|s| {
            s.ad_values
                .iter()
                .filter(|((ad, _), _)| *ad == ad_id)
                .map(|((_, property), stored)| (*property, stored.value.clone()))
                .collect()
        })
    }

    pub fn stored_profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        self.read(|s| s.profiles.get(&user_id).cloned())
    }
}

impl ClassifiedsStorage for InMemoryStorage {
    type Error = InMemoryStorageError;

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.read(|s| {
            let mut categories: Vec<Category> = s.categories.values().cloned().collect();
            categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            categories
        })
    }

    async fn get_category(&self, category_id: Uuid) -> Result<Option<Category>> {
        self.read(|s| s.categories.get(&category_id).cloned())
    }

    async fn category_children(&self, parent_id: Option<Uuid>) -> Result<Vec<Category>> {
        self.read(|s| {
            let mut children: Vec<Category> = s
                .categories
                .values()
                .filter(|c| c.parent_id == parent_id)
                .cloned()
                .collect();
            children.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            children
        })
    }

    async fn category_in_use(&self, category_id: Uuid) -> Result<bool> {
        self.read(|s| {
            s.ads.values().any(|a| a.category_id == category_id)
                || s.bindings.values().any(|b| b.category_id == category_id)
        })
    }

    async fn insert_category(&self, category: Category) -> Result<Category> {
        self.write(|s| {
            s.check_category(&category)?;
            if s.categories.contains_key(&category.id) {
                return integrity(format!("category {} already exists", category.id));
            }
            s.categories.insert(category.id, category.clone());
            Ok(category)
        })
    }

    async fn update_category(&self, category: Category) -> Result<Option<Category>> {
        self.write(|s| {
            if !s.categories.contains_key(&category.id) {
                return Ok(None);
            }
            s.check_category(&category)?;
            s.categories.insert(category.id, category.clone());
            Ok(Some(category))
        })
    }

    async fn get_property(&self, property_id: Uuid) -> Result<Option<Property>> {
        self.read(|s| s.properties.get(&property_id).cloned())
    }

    async fn insert_property(&self, property: Property) -> Result<Property> {
        self.write(|s| {
            s.properties.insert(property.id, property.clone());
            Ok(property)
        })
    }

    async fn get_category_property(&self, binding_id: Uuid) -> Result<Option<CategoryProperty>> {
        self.read(|s| s.bindings.get(&binding_id).cloned())
    }

    async fn insert_category_property(&self, binding: CategoryProperty) -> Result<CategoryProperty> {
        self.write(|s| {
            if !s.categories.contains_key(&binding.category_id)
                || !s.properties.contains_key(&binding.property_id)
            {
                return integrity("binding references a missing category or property");
            }
            if s.bindings.values().any(|b| {
                b.category_id == binding.category_id && b.property_id == binding.property_id
            }) {
                return integrity("property is already bound to this category");
            }
            s.bindings.insert(binding.id, binding.clone());
            Ok(binding)
        })
    }

    async fn get_category_property_value(
        &self,
        value_id: Uuid,
    ) -> Result<Option<CategoryPropertyValue>> {
        self.read(|s| s.values.get(&value_id).cloned())
    }

    async fn insert_category_property_value(
        &self,
        value: CategoryPropertyValue,
    ) -> Result<CategoryPropertyValue> {
        self.write(|s| {
            if !s.bindings.contains_key(&value.category_property_id) {
                return integrity("value references a missing binding");
            }
            if s.values.values().any(|v| {
                v.category_property_id == value.category_property_id && v.value == value.value
            }) {
                return integrity(format!("value {} already exists", value.value));
            }
            s.values.insert(value.id, value.clone());
            Ok(value)
        })
    }

    async fn property_schemas(
        &self,
        category_id: Option<Uuid>,
    ) -> Result<Vec<CategoryPropertySchema>> {
        self.read(|s| {
            let mut schemas: Vec<CategoryPropertySchema> = s
                .bindings
                .values()
                .filter(|b| category_id.is_none_or(|c| b.category_id == c))
                .filter_map(|binding| {
                    let property = s.properties.get(&binding.property_id)?.clone();
                    let mut values: Vec<CategoryPropertyValue> = s
                        .values
                        .values()
                        .filter(|v| v.category_property_id == binding.id)
                        .cloned()
                        .collect();
                    values.sort_by(|a, b| a.value.cmp(&b.value).then(a.id.cmp(&b.id)));
                    Some(CategoryPropertySchema {
                        binding: binding.clone(),
                        property,
                        values,
                    })
                })
                .collect();
            schemas.sort_by(|a, b| {
                a.property
                    .name
                    .cmp(&b.property.name)
                    .then(a.binding.id.cmp(&b.binding.id))
            });
            schemas
        })
    }

    async fn list_locations(&self) -> Result<Vec<Location>> {
        self.read(|s| {
            let mut locations: Vec<Location> = s.locations.values().cloned().collect();
            locations.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            locations
        })
    }

    async fn list_cities(&self, location_id: Option<Uuid>) -> Result<Vec<City>> {
        self.read(|s| {
            let mut cities: Vec<City> = s
                .cities
                .values()
                .filter(|c| location_id.is_none_or(|l| c.location_id == l))
                .cloned()
                .collect();
            cities.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            cities
        })
    }

    async fn list_neighbourhoods(&self, city_id: Option<Uuid>) -> Result<Vec<Neighbourhood>> {
        self.read(|s| {
            let mut neighbourhoods: Vec<Neighbourhood> = s
                .neighbourhoods
                .values()
                .filter(|n| city_id.is_none_or(|c| n.city_id == c))
                .cloned()
                .collect();
            neighbourhoods.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            neighbourhoods
        })
    }

    async fn get_neighbourhood(&self, neighbourhood_id: Uuid) -> Result<Option<Neighbourhood>> {
        self.read(|s| s.neighbourhoods.get(&neighbourhood_id).cloned())
    }

    async fn location_hierarchy(&self, neighbourhood_id: Uuid) -> Result<Option<LocationHierarchy>> {
        self.read(|s| {
            let neighbourhood = s.neighbourhoods.get(&neighbourhood_id)?;
            let city = s.cities.get(&neighbourhood.city_id)?;
            let location = s.locations.get(&city.location_id)?;
            Some(LocationHierarchy {
                location: NamedRef::from(location),
                city: NamedRef::from(city),
                neighbourhood: NamedRef::from(neighbourhood),
            })
        })
    }

    async fn list_ads(&self, query: AdListQuery) -> Result<(Vec<Ad>, i64)> {
        self.read(|s| {
            let keyword = query.keyword.as_deref().map(str::to_lowercase);
            let mut matching: Vec<&Ad> = s
                .ads
                .values()
                .filter(|ad| {
                    keyword.as_deref().is_none_or(|k| {
                        ad.title.to_lowercase().contains(k)
                            || ad.description.to_lowercase().contains(k)
                            || s.categories
                                .get(&ad.category_id)
                                .is_some_and(|c| c.name.to_lowercase().contains(k))
                    })
                })
                .filter(|ad| {
                    query.city_id.is_none_or(|city| {
                        s.neighbourhoods
                            .get(&ad.neighbourhood_id)
                            .is_some_and(|n| n.city_id == city)
                    })
                })
                .collect();
            matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

            let total = matching.len() as i64;
            let page = matching
                .into_iter()
                .skip(usize::try_from(query.offset).unwrap_or(0))
                .take(usize::try_from(query.limit).unwrap_or(0))
                .cloned()
                .collect();
            (page, total)
        })
    }

    async fn get_ad(&self, ad_id: Uuid) -> Result<Option<Ad>> {
        self.read(|s| s.ads.get(&ad_id).cloned())
    }

    async fn ad_images(&self, ad_id: Uuid) -> Result<Vec<AdImage>> {
        self.read(|s| {
            let mut images: Vec<AdImage> = s
                .images
                .values()
                .filter(|i| i.ad_id == ad_id)
                .cloned()
                .collect();
            images.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
            images
        })
    }

    async fn ad_property_values(&self, ad_id: Uuid) -> Result<Vec<AdPropertyValue>> {
        self.read(|s| {
            let mut values: Vec<AdPropertyValue> = s
                .ad_values
                .iter()
                .filter(|((ad, _), _)| *ad == ad_id)
                .filter_map(|((_, property_id), stored)| {
                    let property = s.properties.get(property_id)?;
                    Some(AdPropertyValue {
                        id: stored.id,
                        ad_id,
                        property_id: *property_id,
                        property_name: property.name.clone(),
                        data_type: property.data_type,
                        value: stored.value.clone(),
                    })
                })
                .collect();
            values.sort_by(|a, b| a.property_name.cmp(&b.property_name).then(a.id.cmp(&b.id)));
            values
        })
    }

    async fn persist_ad(&self, write: AdWrite) -> Result<()> {
        self.write(|s| {
            let mut next = s.clone();
            next.apply(write)?;
            *s = next;
            Ok(())
        })
    }

    async fn delete_ad(&self, ad_id: Uuid, user_id: Uuid) -> Result<bool> {
        self.write(|s| {
            if !s.ads.get(&ad_id).is_some_and(|ad| ad.user_id == user_id) {
                return Ok(false);
            }
            s.ads.remove(&ad_id);
            s.images.retain(|_, i| i.ad_id != ad_id);
            s.ad_values.retain(|(ad, _), _| *ad != ad_id);
            Ok(true)
        })
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        self.read(|s| s.users.get(&user_id).cloned())
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        self.read(|s| s.profiles.get(&user_id).cloned())
    }

    async fn save_user_profile(&self, user: User, profile: Profile) -> Result<()> {
        self.write(|s| {
            if !s.users.contains_key(&user.id) || profile.user_id != user.id {
                return integrity(format!("user {} does not exist", user.id));
            }
            s.users.insert(user.id, user);
            s.profiles.insert(profile.user_id, profile);
            Ok(())
        })
    }
}
