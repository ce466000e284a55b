//! The dynamic property form fragment

use models_classifieds::api::{PropertyFormQuery, PropertyFormResponse};
use uuid::Uuid;

use super::ClassifiedsServiceImpl;
use crate::domain::{
    error::{ClassifiedsError, Result},
    models::PropertyForm,
    ports::{ClassifiedsStorage, ConfirmationQueue},
};

/// Field descriptors for `query.category_id`, pre-filled from the caller's own ad
/// when `query.ad_id` names one. Unknown categories give an empty fragment.
#[tracing::instrument(skip(service))]
pub(super) async fn property_form<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    user_id: Uuid,
    query: PropertyFormQuery,
) -> Result<PropertyFormResponse>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let Some(category_id) = query.category_id else {
        return Ok(PropertyFormResponse::default());
    };

    let category = service
        .storage
        .get_category(category_id)
        .await
        .map_err(ClassifiedsError::from_storage)?;
    if category.is_none() {
        tracing::debug!(%category_id, "property form requested for unknown category");
        return Ok(PropertyFormResponse::default());
    }

    let existing = match query.ad_id {
        Some(ad_id) => {
            let ad = service
                .storage
                .get_ad(ad_id)
                .await
                .map_err(ClassifiedsError::from_storage)?;
            match ad {
                Some(ad) if ad.user_id == user_id => service
                    .storage
                    .ad_property_values(ad.id)
                    .await
                    .map_err(ClassifiedsError::from_storage)?,
                _ => Vec::new(),
            }
        }
        None => Vec::new(),
    };

    let schemas = service
        .storage
        .property_schemas(Some(category_id))
        .await
        .map_err(ClassifiedsError::from_storage)?;

    Ok(PropertyForm::new(&schemas, &existing).into_response(Some(category_id)))
}
