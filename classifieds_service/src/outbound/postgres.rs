//! PostgreSQL implementation of the storage port, delegating to `classifieds_db_client`

use classifieds_db_client::{
    ad_images, ad_property_values, ads, categories, error::ClassifiedsDatabaseError, locations,
    properties, users,
};
use models_classifieds::service::{
    Ad, AdImage, AdPropertyValue, Category, CategoryProperty, CategoryPropertySchema,
    CategoryPropertyValue, City, Location, LocationHierarchy, Neighbourhood, Profile, Property,
    User,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::ports::{AdListQuery, AdWrite, ClassifiedsStorage, StorageError};

/// PostgreSQL storage for the classifieds domain
#[derive(Debug, Clone)]
pub struct ClassifiedsPgStorage {
    pool: PgPool,
}

impl ClassifiedsPgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl StorageError for ClassifiedsDatabaseError {
    fn is_integrity_violation(&self) -> bool {
        ClassifiedsDatabaseError::is_integrity_violation(self)
    }
}

type Result<T> = std::result::Result<T, ClassifiedsDatabaseError>;

impl ClassifiedsStorage for ClassifiedsPgStorage {
    type Error = ClassifiedsDatabaseError;

    // Categories

    async fn list_categories(&self) -> Result<Vec<Category>> {
        categories::get::get_categories(&self.pool).await
    }

    async fn get_category(&self, category_id: Uuid) -> Result<Option<Category>> {
        categories::get::get_category(&self.pool, category_id).await
    }

    async fn category_children(&self, parent_id: Option<Uuid>) -> Result<Vec<Category>> {
        categories::get::get_category_children(&self.pool, parent_id).await
    }

    async fn category_in_use(&self, category_id: Uuid) -> Result<bool> {
        categories::get::category_is_in_use(&self.pool, category_id).await
    }

    async fn insert_category(&self, category: Category) -> Result<Category> {
        categories::insert::insert_category(&self.pool, &category).await
    }

    async fn update_category(&self, category: Category) -> Result<Option<Category>> {
        categories::update::update_category(&self.pool, &category).await
    }

    // Properties

    async fn get_property(&self, property_id: Uuid) -> Result<Option<Property>> {
        properties::get::get_property(&self.pool, property_id).await
    }

    async fn insert_property(&self, property: Property) -> Result<Property> {
        properties::insert::insert_property(&self.pool, &property).await
    }

    async fn get_category_property(&self, binding_id: Uuid) -> Result<Option<CategoryProperty>> {
        properties::get::get_category_property(&self.pool, binding_id).await
    }

    async fn insert_category_property(&self, binding: CategoryProperty) -> Result<CategoryProperty> {
        properties::insert::insert_category_property(&self.pool, &binding).await
    }

    async fn get_category_property_value(
        &self,
        value_id: Uuid,
    ) -> Result<Option<CategoryPropertyValue>> {
        properties::get::get_category_property_value(&self.pool, value_id).await
    }

    async fn insert_category_property_value(
        &self,
        value: CategoryPropertyValue,
    ) -> Result<CategoryPropertyValue> {
        properties::insert::insert_category_property_value(&self.pool, &value).await
    }

    async fn property_schemas(&self, category_id: Option<Uuid>) -> Result<Vec<CategoryPropertySchema>> {
        properties::get::get_category_property_schemas(&self.pool, category_id).await
    }

    // Locations

    async fn list_locations(&self) -> Result<Vec<Location>> {
        locations::get::get_locations(&self.pool).await
    }

    async fn list_cities(&self, location_id: Option<Uuid>) -> Result<Vec<City>> {
        locations::get::get_cities(&self.pool, location_id).await
    }

    async fn list_neighbourhoods(&self, city_id: Option<Uuid>) -> Result<Vec<Neighbourhood>> {
        locations::get::get_neighbourhoods(&self.pool, city_id).await
    }

    async fn get_neighbourhood(&self, neighbourhood_id: Uuid) -> Result<Option<Neighbourhood>> {
        locations::get::get_neighbourhood(&self.pool, neighbourhood_id).await
    }

    async fn location_hierarchy(&self, neighbourhood_id: Uuid) -> Result<Option<LocationHierarchy>> {
        locations::get::get_location_hierarchy(&self.pool, neighbourhood_id).await
    }

    // Ads

    async fn list_ads(&self, query: AdListQuery) -> Result<(Vec<Ad>, i64)> {
        ads::get::list_ads(
            &self.pool,
            ads::get::AdListFilter {
                keyword: query.keyword.as_deref(),
                city_id: query.city_id,
                limit: query.limit,
                offset: query.offset,
            },
        )
        .await
    }

    async fn get_ad(&self, ad_id: Uuid) -> Result<Option<Ad>> {
        ads::get::get_ad(&self.pool, ad_id).await
    }

    async fn ad_images(&self, ad_id: Uuid) -> Result<Vec<AdImage>> {
        ad_images::get::get_ad_images(&self.pool, ad_id).await
    }

    async fn ad_property_values(&self, ad_id: Uuid) -> Result<Vec<AdPropertyValue>> {
        ad_property_values::get::get_ad_property_values(&self.pool, ad_id).await
    }

    #[tracing::instrument(skip(self, write), fields(ad_id = %write.ad.id, is_new = write.is_new))]
    async fn persist_ad(&self, write: AdWrite) -> Result<()> {
        let mut transaction = self.pool.begin().await?;

        if write.is_new {
            ads::insert::insert_ad(&mut transaction, &write.ad).await?;
        } else {
            ads::update::update_ad(&mut transaction, &write.ad).await?;
        }

        users::upsert::upsert_profile(&mut transaction, &write.profile).await?;

        if !write.deleted_image_ids.is_empty() {
            ad_images::delete::delete_ad_images(
                &mut transaction,
                write.ad.id,
                &write.deleted_image_ids,
            )
            .await?;
        }
        ad_images::insert::insert_ad_images(&mut transaction, &write.new_images).await?;

        if write.prune_unbound_values {
            let pruned = ad_property_values::delete::delete_unbound_ad_property_values(
                &mut transaction,
                write.ad.id,
                write.ad.category_id,
            )
            .await?;
            tracing::debug!(pruned, "removed values of unbound properties");
        }
        ad_property_values::upsert::upsert_ad_property_values(
            &mut transaction,
            write.ad.id,
            &write.property_values,
        )
        .await?;

        transaction.commit().await?;
        Ok(())
    }

    async fn delete_ad(&self, ad_id: Uuid, user_id: Uuid) -> Result<bool> {
        ads::delete::delete_ad(&self.pool, ad_id, user_id).await
    }

    // Users

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        users::get::get_user(&self.pool, user_id).await
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        users::get::get_profile(&self.pool, user_id).await
    }

    #[tracing::instrument(skip(self, user, profile), fields(user_id = %user.id))]
    async fn save_user_profile(&self, user: User, profile: Profile) -> Result<()> {
        let mut transaction = self.pool.begin().await?;
        users::upsert::update_user_names(&mut transaction, &user).await?;
        users::upsert::upsert_profile(&mut transaction, &profile).await?;
        transaction.commit().await?;
        Ok(())
    }
}
