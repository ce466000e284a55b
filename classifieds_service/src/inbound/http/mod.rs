//! HTTP inbound adapter - thin axum handlers over [ClassifiedsService]

pub mod ads;
pub mod catalogue;
pub mod error;
pub mod extractors;
pub mod forms;
pub mod internal;
pub mod locations;
pub mod profile;


use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::domain::ports::ClassifiedsService;

pub use error::HttpError;
pub use extractors::{MaybeUser, UserExtractor};

pub struct ClassifiedsRouterState<T> {
    service: Arc<T>,
}

impl<T> Clone for ClassifiedsRouterState<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<T> ClassifiedsRouterState<T>
where
    T: ClassifiedsService,
{
    pub fn new(service: T) -> Self {
        ClassifiedsRouterState {
            service: Arc::new(service),
        }
    }
}

/// Every public and internal classifieds route
pub fn classifieds_router<T, S>(state: ClassifiedsRouterState<T>) -> Router<S>
where
    T: ClassifiedsService,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        // ads
        .route("/ads", get(ads::list_ads::<T>).post(ads::create_ad::<T>))
        .route(
            "/ads/:id",
            get(ads::get_ad::<T>)
                .put(ads::update_ad::<T>)
                .delete(ads::delete_ad::<T>),
        )
        // catalogue
        .route(
            "/categories",
            get(catalogue::category_tree::<T>).post(catalogue::create_category::<T>),
        )
        .route("/categories/:id", patch(catalogue::update_category::<T>))
        .route(
            "/categories/:id/hierarchy",
            get(catalogue::category_hierarchy::<T>),
        )
        .route(
            "/categories/:id/properties",
            post(catalogue::bind_property::<T>),
        )
        .route("/properties", post(catalogue::create_property::<T>))
        .route(
            "/category-properties/:id/values",
            post(catalogue::add_allowed_value::<T>),
        )
        // locations
        .route("/locations/tree", get(locations::location_tree::<T>))
        // profile
        .route(
            "/profile",
            get(profile::get_profile::<T>).patch(profile::update_profile::<T>),
        )
        // cascading lookups
        .route(
            "/ajax/categories/children",
            get(catalogue::root_categories::<T>),
        )
        .route(
            "/ajax/categories/:parent_id/children",
            get(catalogue::category_children::<T>),
        )
        .route("/ajax/locations", get(locations::list_locations::<T>))
        .route(
            "/ajax/locations/:id/cities",
            get(locations::list_cities::<T>),
        )
        .route(
            "/ajax/cities/:id/neighbourhoods",
            get(locations::list_neighbourhoods::<T>),
        )
        .route("/ajax/property-form", get(forms::property_form::<T>))
        // internal
        .route(
            "/internal/ads/:id/search-document",
            get(internal::search_document::<T>),
        )
        .with_state(state)
}
