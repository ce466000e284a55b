//! Domain services - the concrete implementation of [ClassifiedsService]

mod ads;
mod catalogue;
mod categories;
mod forms;
mod locations;
mod profiles;

#[cfg(test)]
mod tests;

use models_classifieds::api::{
    AdDetailResponse, AdPage, AddAllowedValueRequest, AdSubmission, BindPropertyRequest,
    CategoryNode, CreateCategoryRequest, CreatePropertyRequest, ListAdsQuery, LocationNode,
    ProfileResponse, PropertyFormQuery, PropertyFormResponse, UpdateCategoryRequest,
    UpdateProfileRequest,
};
use models_classifieds::search::AdSearchDocument;
use models_classifieds::service::{
    Category, CategoryProperty, CategoryPropertyValue, NamedRef, Property,
};
use uuid::Uuid;

use crate::domain::{
    error::{ClassifiedsError, Result},
    models::{CategoryTree, ImagePolicy},
    ports::{ClassifiedsService, ClassifiedsStorage, ConfirmationQueue},
};

/// Concrete implementation of [ClassifiedsService]
pub struct ClassifiedsServiceImpl<S, Q> {
    storage: S,
    queue: Q,
    images: ImagePolicy,
}

impl<S, Q> ClassifiedsServiceImpl<S, Q>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    pub fn new(storage: S, queue: Q, images: ImagePolicy) -> Self {
        Self {
            storage,
            queue,
            images,
        }
    }

    /// The whole category tree as stored right now
    async fn load_tree(&self) -> Result<CategoryTree> {
        let categories = self
            .storage
            .list_categories()
            .await
            .map_err(ClassifiedsError::from_storage)?;
        Ok(CategoryTree::new(categories))
    }
}

impl<S, Q> ClassifiedsService for ClassifiedsServiceImpl<S, Q>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    // ===== Category hierarchy =====

    async fn category_tree(&self) -> Result<Vec<CategoryNode>> {
        categories::category_tree(self).await
    }

    async fn category_hierarchy(&self, category_id: Uuid) -> Result<Vec<NamedRef>> {
        categories::category_hierarchy(self, category_id).await
    }

    async fn category_children(&self, parent_id: Option<Uuid>) -> Result<Vec<NamedRef>> {
        categories::category_children(self, parent_id).await
    }

    // ===== Catalogue administration =====

    async fn create_category(&self, request: CreateCategoryRequest) -> Result<Category> {
        catalogue::create_category(self, request).await
    }

    async fn update_category(
        &self,
        category_id: Uuid,
        request: UpdateCategoryRequest,
    ) -> Result<Category> {
        catalogue::update_category(self, category_id, request).await
    }

    async fn create_property(&self, request: CreatePropertyRequest) -> Result<Property> {
        catalogue::create_property(self, request).await
    }

    async fn bind_property(
        &self,
        category_id: Uuid,
        request: BindPropertyRequest,
    ) -> Result<CategoryProperty> {
        catalogue::bind_property(self, category_id, request).await
    }

    async fn add_allowed_value(
        &self,
        binding_id: Uuid,
        request: AddAllowedValueRequest,
    ) -> Result<CategoryPropertyValue> {
        catalogue::add_allowed_value(self, binding_id, request).await
    }

    // ===== Locations =====

    async fn list_locations(&self) -> Result<Vec<NamedRef>> {
        locations::list_locations(self).await
    }

    async fn list_cities(&self, location_id: Uuid) -> Result<Vec<NamedRef>> {
        locations::list_cities(self, location_id).await
    }

    async fn list_neighbourhoods(&self, city_id: Uuid) -> Result<Vec<NamedRef>> {
        locations::list_neighbourhoods(self, city_id).await
    }

    async fn location_tree(&self) -> Result<Vec<LocationNode>> {
        locations::location_tree(self).await
    }

    // ===== Dynamic property form =====

    async fn property_form(
        &self,
        user_id: Uuid,
        query: PropertyFormQuery,
    ) -> Result<PropertyFormResponse> {
        forms::property_form(self, user_id, query).await
    }

    // ===== Ads =====

    async fn list_ads(&self, query: ListAdsQuery) -> Result<AdPage> {
        ads::list_ads(self, query).await
    }

    async fn get_ad(&self, ad_id: Uuid, viewer: Option<Uuid>) -> Result<AdDetailResponse> {
        ads::get_ad(self, ad_id, viewer).await
    }

    async fn create_ad(&self, user_id: Uuid, submission: AdSubmission) -> Result<AdDetailResponse> {
        ads::create_ad(self, user_id, submission).await
    }

    async fn update_ad(
        &self,
        user_id: Uuid,
        ad_id: Uuid,
        submission: AdSubmission,
    ) -> Result<AdDetailResponse> {
        ads::update_ad(self, user_id, ad_id, submission).await
    }

    async fn delete_ad(&self, user_id: Uuid, ad_id: Uuid) -> Result<()> {
        ads::delete_ad(self, user_id, ad_id).await
    }

    async fn search_document(&self, ad_id: Uuid) -> Result<AdSearchDocument> {
        ads::search_document(self, ad_id).await
    }

    // ===== Profile =====

    async fn get_profile(&self, user_id: Uuid) -> Result<ProfileResponse> {
        profiles::get_profile(self, user_id).await
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<ProfileResponse> {
        profiles::update_profile(self, user_id, request).await
    }
}
