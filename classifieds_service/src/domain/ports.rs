//! Ports - the storage, queue and service interfaces of the classifieds domain

use std::collections::BTreeMap;

use models_classifieds::api::{
    AdDetailResponse, AdPage, AddAllowedValueRequest, AdSubmission, BindPropertyRequest,
    CategoryNode, CreateCategoryRequest, CreatePropertyRequest, ListAdsQuery, LocationNode,
    ProfileResponse, PropertyFormQuery, PropertyFormResponse, UpdateCategoryRequest,
    UpdateProfileRequest,
};
use models_classifieds::search::AdSearchDocument;
use models_classifieds::service::{
    Ad, AdImage, AdPropertyValue, Category, CategoryProperty, CategoryPropertySchema,
    CategoryPropertyValue, City, Location, LocationHierarchy, NamedRef, Neighbourhood, Profile,
    Property, User,
};
use uuid::Uuid;

use crate::domain::error::Result;

/// Errors raised by a [ClassifiedsStorage] adapter
pub trait StorageError: std::error::Error + Send + Sync + 'static {
    /// A unique, foreign key or check constraint rejected the write
    fn is_integrity_violation(&self) -> bool;
}

/// Filters and window of the ad listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdListQuery {
    pub keyword: Option<String>,
    pub city_id: Option<Uuid>,
    pub limit: i64,
    pub offset: i64,
}

/// Everything one ad submission writes. Applied atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct AdWrite {
    pub ad: Ad,
    /// insert when true, update otherwise
    pub is_new: bool,
    pub profile: Profile,
    pub new_images: Vec<AdImage>,
    pub deleted_image_ids: Vec<Uuid>,
    /// cleaned property values keyed by property id
    pub property_values: BTreeMap<Uuid, String>,
    /// drop stored values of properties not bound to `ad.category_id`
    pub prune_unbound_values: bool,
}

/// Storage port for every classifieds persistence operation
pub trait ClassifiedsStorage: Send + Sync + 'static {
    type Error: StorageError;

    // Categories
    fn list_categories(
        &self,
    ) -> impl Future<Output = std::result::Result<Vec<Category>, Self::Error>> + Send;

    fn get_category(
        &self,
        category_id: Uuid,
    ) -> impl Future<Output = std::result::Result<Option<Category>, Self::Error>> + Send;

    fn category_children(
        &self,
        parent_id: Option<Uuid>,
    ) -> impl Future<Output = std::result::Result<Vec<Category>, Self::Error>> + Send;

    /// Whether ads or property bindings reference the category
    fn category_in_use(
        &self,
        category_id: Uuid,
    ) -> impl Future<Output = std::result::Result<bool, Self::Error>> + Send;

    fn insert_category(
        &self,
        category: Category,
    ) -> impl Future<Output = std::result::Result<Category, Self::Error>> + Send;

    fn update_category(
        &self,
        category: Category,
    ) -> impl Future<Output = std::result::Result<Option<Category>, Self::Error>> + Send;

    // Properties
    fn get_property(
        &self,
        property_id: Uuid,
    ) -> impl Future<Output = std::result::Result<Option<Property>, Self::Error>> + Send;

    fn insert_property(
        &self,
        property: Property,
    ) -> impl Future<Output = std::result::Result<Property, Self::Error>> + Send;

    fn get_category_property(
        &self,
        binding_id: Uuid,
    ) -> impl Future<Output = std::result::Result<Option<CategoryProperty>, Self::Error>> + Send;

    fn insert_category_property(
        &self,
        binding: CategoryProperty,
    ) -> impl Future<Output = std::result::Result<CategoryProperty, Self::Error>> + Send;

    fn get_category_property_value(
        &self,
        value_id: Uuid,
    ) -> impl Future<Output = std::result::Result<Option<CategoryPropertyValue>, Self::Error>> + Send;

    fn insert_category_property_value(
        &self,
        value: CategoryPropertyValue,
    ) -> impl Future<Output = std::result::Result<CategoryPropertyValue, Self::Error>> + Send;

    /// Bindings of one category, or of every category when `None`
    fn property_schemas(
        &self,
        category_id: Option<Uuid>,
    ) -> impl Future<Output = std::result::Result<Vec<CategoryPropertySchema>, Self::Error>> + Send;

    // Locations
    fn list_locations(
        &self,
    ) -> impl Future<Output = std::result::Result<Vec<Location>, Self::Error>> + Send;

    fn list_cities(
        &self,
        location_id: Option<Uuid>,
    ) -> impl Future<Output = std::result::Result<Vec<City>, Self::Error>> + Send;

    fn list_neighbourhoods(
        &self,
        city_id: Option<Uuid>,
    ) -> impl Future<Output = std::result::Result<Vec<Neighbourhood>, Self::Error>> + Send;

    fn get_neighbourhood(
        &self,
        neighbourhood_id: Uuid,
    ) -> impl Future<Output = std::result::Result<Option<Neighbourhood>, Self::Error>> + Send;

    fn location_hierarchy(
        &self,
        neighbourhood_id: Uuid,
    ) -> impl Future<Output = std::result::Result<Option<LocationHierarchy>, Self::Error>> + Send;

    // Ads
    fn list_ads(
        &self,
        query: AdListQuery,
    ) -> impl Future<Output = std::result::Result<(Vec<Ad>, i64), Self::Error>> + Send;

    fn get_ad(
        &self,
        ad_id: Uuid,
    ) -> impl Future<Output = std::result::Result<Option<Ad>, Self::Error>> + Send;

    fn ad_images(
        &self,
        ad_id: Uuid,
    ) -> impl Future<Output = std::result::Result<Vec<AdImage>, Self::Error>> + Send;

    fn ad_property_values(
        &self,
        ad_id: Uuid,
    ) -> impl Future<Output = std::result::Result<Vec<AdPropertyValue>, Self::Error>> + Send;

    /// Apply an [AdWrite] in one transaction
    fn persist_ad(
        &self,
        write: AdWrite,
    ) -> impl Future<Output = std::result::Result<(), Self::Error>> + Send;

    /// Deletes the ad when `user_id` owns it. Returns whether a row went away.
    fn delete_ad(
        &self,
        ad_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = std::result::Result<bool, Self::Error>> + Send;

    // Users
    fn get_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = std::result::Result<Option<User>, Self::Error>> + Send;

    fn get_profile(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = std::result::Result<Option<Profile>, Self::Error>> + Send;

    /// Saves the user's names and upserts the profile together
    fn save_user_profile(
        &self,
        user: User,
        profile: Profile,
    ) -> impl Future<Output = std::result::Result<(), Self::Error>> + Send;
}

/// A "send ad confirmation email" job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdConfirmationJob {
    pub ad_id: Uuid,
    pub recipient: String,
}

/// Fire-and-forget queue of confirmation emails
#[cfg_attr(test, mockall::automock)]
pub trait ConfirmationQueue: Send + Sync + 'static {
    fn enqueue(&self, job: AdConfirmationJob);
}

/// The service level interface of the marketplace
pub trait ClassifiedsService: Send + Sync + 'static {
    // Category hierarchy
    fn category_tree(&self) -> impl Future<Output = Result<Vec<CategoryNode>>> + Send;

    fn category_hierarchy(
        &self,
        category_id: Uuid,
    ) -> impl Future<Output = Result<Vec<NamedRef>>> + Send;

    fn category_children(
        &self,
        parent_id: Option<Uuid>,
    ) -> impl Future<Output = Result<Vec<NamedRef>>> + Send;

    // Catalogue administration
    fn create_category(
        &self,
        request: CreateCategoryRequest,
    ) -> impl Future<Output = Result<Category>> + Send;

    fn update_category(
        &self,
        category_id: Uuid,
        request: UpdateCategoryRequest,
    ) -> impl Future<Output = Result<Category>> + Send;

    fn create_property(
        &self,
        request: CreatePropertyRequest,
    ) -> impl Future<Output = Result<Property>> + Send;

    fn bind_property(
        &self,
        category_id: Uuid,
        request: BindPropertyRequest,
    ) -> impl Future<Output = Result<CategoryProperty>> + Send;

    fn add_allowed_value(
        &self,
        binding_id: Uuid,
        request: AddAllowedValueRequest,
    ) -> impl Future<Output = Result<CategoryPropertyValue>> + Send;

    // Locations
    fn list_locations(&self) -> impl Future<Output = Result<Vec<NamedRef>>> + Send;

    fn list_cities(&self, location_id: Uuid) -> impl Future<Output = Result<Vec<NamedRef>>> + Send;

    fn list_neighbourhoods(
        &self,
        city_id: Uuid,
    ) -> impl Future<Output = Result<Vec<NamedRef>>> + Send;

    fn location_tree(&self) -> impl Future<Output = Result<Vec<LocationNode>>> + Send;

    // Dynamic property form
    fn property_form(
        &self,
        user_id: Uuid,
        query: PropertyFormQuery,
    ) -> impl Future<Output = Result<PropertyFormResponse>> + Send;

    // Ads
    fn list_ads(&self, query: ListAdsQuery) -> impl Future<Output = Result<AdPage>> + Send;

    /// `viewer` is the authenticated caller, if any
    fn get_ad(
        &self,
        ad_id: Uuid,
        viewer: Option<Uuid>,
    ) -> impl Future<Output = Result<AdDetailResponse>> + Send;

    fn create_ad(
        &self,
        user_id: Uuid,
        submission: AdSubmission,
    ) -> impl Future<Output = Result<AdDetailResponse>> + Send;

    fn update_ad(
        &self,
        user_id: Uuid,
        ad_id: Uuid,
        submission: AdSubmission,
    ) -> impl Future<Output = Result<AdDetailResponse>> + Send;

    fn delete_ad(&self, user_id: Uuid, ad_id: Uuid) -> impl Future<Output = Result<()>> + Send;

    fn search_document(&self, ad_id: Uuid)
    -> impl Future<Output = Result<AdSearchDocument>> + Send;

    // Profile
    fn get_profile(&self, user_id: Uuid) -> impl Future<Output = Result<ProfileResponse>> + Send;

    fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> impl Future<Output = Result<ProfileResponse>> + Send;
}
