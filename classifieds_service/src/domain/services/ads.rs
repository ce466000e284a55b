//! Ad listing, detail and the composed create/update flow

use chrono::Utc;
use models_classifieds::api::{
    ADS_PAGE_SIZE, AdDetailResponse, AdImageResponse, AdPage, AdPropertyValueResponse,
    AdSubmission, AdSummaryResponse, ListAdsQuery, UserPublicResponse,
};
use models_classifieds::search::AdSearchDocument;
use models_classifieds::service::{Ad, AdImage, FormErrors, Profile};
use uuid::Uuid;

use super::ClassifiedsServiceImpl;
use crate::domain::{
    error::{ClassifiedsError, Result},
    models::{AdFormLookups, ImagePolicy, PropertyForm, ad_form, profile_form, upload_path},
    ports::{AdConfirmationJob, AdListQuery, AdWrite, ClassifiedsStorage, ConfirmationQueue},
};

#[tracing::instrument(skip(service))]
pub(super) async fn list_ads<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    query: ListAdsQuery,
) -> Result<AdPage>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let (ads, total) = service
        .storage
        .list_ads(AdListQuery {
            keyword: query.keyword().map(str::to_string),
            city_id: query.city_id,
            limit: i64::from(ADS_PAGE_SIZE),
            offset: query.offset(),
        })
        .await
        .map_err(ClassifiedsError::from_storage)?;

    Ok(AdPage {
        items: ads.into_iter().map(AdSummaryResponse::from).collect(),
        page: query.page(),
        page_size: ADS_PAGE_SIZE,
        total,
    })
}

#[tracing::instrument(skip(service))]
pub(super) async fn get_ad<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    ad_id: Uuid,
    viewer: Option<Uuid>,
) -> Result<AdDetailResponse>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let ad = service
        .storage
        .get_ad(ad_id)
        .await
        .map_err(ClassifiedsError::from_storage)?
        .ok_or_else(|| ClassifiedsError::not_found("Ad"))?;

    detail(service, ad, viewer.is_some()).await
}

/// Full read model of one ad. The owner's phone number is only included for
/// authenticated viewers of ads that show it.
async fn detail<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    ad: Ad,
    authenticated: bool,
) -> Result<AdDetailResponse>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let tree = service.load_tree().await?;

    let location = service
        .storage
        .location_hierarchy(ad.neighbourhood_id)
        .await
        .map_err(ClassifiedsError::from_storage)?
        .ok_or_else(|| {
            ClassifiedsError::Internal(anyhow::anyhow!(
                "ad {} references a missing neighbourhood",
                ad.id
            ))
        })?;

    let images = service
        .storage
        .ad_images(ad.id)
        .await
        .map_err(ClassifiedsError::from_storage)?;
    let property_values = service
        .storage
        .ad_property_values(ad.id)
        .await
        .map_err(ClassifiedsError::from_storage)?;

    let owner = service
        .storage
        .get_user(ad.user_id)
        .await
        .map_err(ClassifiedsError::from_storage)?
        .ok_or_else(|| {
            ClassifiedsError::Internal(anyhow::anyhow!("ad {} references a missing user", ad.id))
        })?;
    let profile = service
        .storage
        .get_profile(ad.user_id)
        .await
        .map_err(ClassifiedsError::from_storage)?
        .unwrap_or_else(|| Profile::empty(ad.user_id));

    let full_name = if profile.full_name.trim().is_empty() {
        owner.full_name()
    } else {
        profile.full_name.clone()
    };
    let phone_number = (ad.show_phone_number && authenticated)
        .then_some(profile.phone_number)
        .flatten();

    Ok(AdDetailResponse {
        id: ad.id,
        title: ad.title,
        description: ad.description,
        price: ad.price,
        category_id: ad.category_id,
        category_hierarchy: tree.hierarchy(ad.category_id),
        location,
        images: images.into_iter().map(AdImageResponse::from).collect(),
        property_values: property_values
            .iter()
            .map(AdPropertyValueResponse::from)
            .collect(),
        user: UserPublicResponse {
            id: owner.id,
            email: owner.email,
            full_name,
            profile_pic: profile.profile_pic,
            phone_number,
        },
        show_phone_number: ad.show_phone_number,
        created_at: ad.created_at,
        updated_at: ad.updated_at,
    })
}

#[tracing::instrument(skip(service, submission), fields(user_id = %user_id))]
pub(super) async fn create_ad<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    user_id: Uuid,
    submission: AdSubmission,
) -> Result<AdDetailResponse>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    save_ad(service, user_id, None, submission).await
}

#[tracing::instrument(skip(service, submission), fields(user_id = %user_id, ad_id = %ad_id))]
pub(super) async fn update_ad<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    user_id: Uuid,
    ad_id: Uuid,
    submission: AdSubmission,
) -> Result<AdDetailResponse>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let existing = service
        .storage
        .get_ad(ad_id)
        .await
        .map_err(ClassifiedsError::from_storage)?
        .filter(|ad| ad.user_id == user_id)
        .ok_or_else(|| ClassifiedsError::not_found("Ad"))?;

    save_ad(service, user_id, Some(existing), submission).await
}

/// Validates every composed form, then writes the ad, the owner's profile, the
/// image set and the property values in one transaction.
async fn save_ad<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    user_id: Uuid,
    existing: Option<Ad>,
    submission: AdSubmission,
) -> Result<AdDetailResponse>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let storage = &service.storage;

    let user = storage
        .get_user(user_id)
        .await
        .map_err(ClassifiedsError::from_storage)?
        .ok_or_else(|| ClassifiedsError::not_found("User"))?;
    let profile = storage
        .get_profile(user_id)
        .await
        .map_err(ClassifiedsError::from_storage)?
        .unwrap_or_else(|| Profile::empty(user_id));

    // ad form lookups
    let category = match submission.ad.category_id {
        Some(id) => storage
            .get_category(id)
            .await
            .map_err(ClassifiedsError::from_storage)?,
        None => None,
    };
    let category_is_leaf = match &category {
        Some(c) => storage
            .category_children(Some(c.id))
            .await
            .map_err(ClassifiedsError::from_storage)?
            .is_empty(),
        None => false,
    };
    let neighbourhood = match submission.ad.neighbourhood_id {
        Some(id) => storage
            .get_neighbourhood(id)
            .await
            .map_err(ClassifiedsError::from_storage)?,
        None => None,
    };

    let existing_images = match &existing {
        Some(ad) => storage
            .ad_images(ad.id)
            .await
            .map_err(ClassifiedsError::from_storage)?,
        None => Vec::new(),
    };
    let existing_values = match &existing {
        Some(ad) => storage
            .ad_property_values(ad.id)
            .await
            .map_err(ClassifiedsError::from_storage)?,
        None => Vec::new(),
    };
    let schemas = match &category {
        Some(c) => storage
            .property_schemas(Some(c.id))
            .await
            .map_err(ClassifiedsError::from_storage)?,
        None => Vec::new(),
    };

    let ad_result = ad_form::validate(
        &submission.ad,
        AdFormLookups {
            category: category.as_ref(),
            category_is_leaf,
            neighbourhood: neighbourhood.as_ref(),
        },
    );
    let profile_result = profile_form::apply_inline(&submission.profile, profile);
    let image_errors = service.images.validate_formset(
        &existing_images,
        &submission.upload_images,
        &submission.delete_images,
    );
    let property_result =
        PropertyForm::new(&schemas, &existing_values).clean(&submission.properties);

    let mut errors = FormErrors::new();
    let cleaned = ad_result.map_err(|e| errors.merge_prefixed("ad", e)).ok();
    let profile = profile_result
        .map_err(|e| errors.merge_prefixed("profile", e))
        .ok();
    errors.merge_prefixed("images", image_errors);
    let property_values = property_result
        .map_err(|e| errors.merge_prefixed("properties", e))
        .ok();

    let (Some(cleaned), Some(profile), Some(property_values)) =
        (cleaned, profile, property_values)
    else {
        tracing::warn!(?errors, "ad submission rejected");
        return Err(ClassifiedsError::Validation(errors));
    };
    if !errors.is_empty() {
        tracing::warn!(?errors, "ad submission rejected");
        return Err(ClassifiedsError::Validation(errors));
    }

    let now = Utc::now();
    let is_new = existing.is_none();
    let previous_category = existing.as_ref().map(|ad| ad.category_id);
    let ad = match existing {
        Some(ad) => Ad {
            category_id: cleaned.category_id,
            title: cleaned.title,
            description: cleaned.description,
            neighbourhood_id: cleaned.neighbourhood_id,
            price: cleaned.price,
            show_phone_number: cleaned.show_phone_number,
            updated_at: now,
            ..ad
        },
        None => Ad {
            id: Uuid::now_v7(),
            user_id,
            category_id: cleaned.category_id,
            title: cleaned.title,
            description: cleaned.description,
            neighbourhood_id: cleaned.neighbourhood_id,
            price: cleaned.price,
            show_phone_number: cleaned.show_phone_number,
            created_at: now,
            updated_at: now,
        },
    };

    let new_images: Vec<AdImage> = submission
        .upload_images
        .iter()
        .map(|upload| {
            AdImage::new(
                ad.id,
                upload_path(&upload.file_name, now),
                i64::try_from(upload.size_bytes).unwrap_or(i64::MAX),
            )
        })
        .collect();

    let final_count = ImagePolicy::final_count(
        &existing_images,
        &submission.upload_images,
        &submission.delete_images,
    );
    let stored_errors = service.images.validate_stored(final_count, &new_images);
    if !stored_errors.is_empty() {
        let mut errors = FormErrors::new();
        errors.merge_prefixed("images", stored_errors);
        tracing::warn!(?errors, "image set rejected before write");
        return Err(ClassifiedsError::Validation(errors));
    }

    let write = AdWrite {
        prune_unbound_values: previous_category.is_some_and(|c| c != ad.category_id),
        ad: ad.clone(),
        is_new,
        profile,
        new_images,
        deleted_image_ids: submission.delete_images,
        property_values,
    };
    storage
        .persist_ad(write)
        .await
        .map_err(ClassifiedsError::from_storage)?;

    if is_new {
        service.queue.enqueue(AdConfirmationJob {
            ad_id: ad.id,
            recipient: user.email.clone(),
        });
        tracing::info!(ad_id = %ad.id, "created ad");
    } else {
        tracing::info!(ad_id = %ad.id, "updated ad");
    }

    detail(service, ad, true).await
}

#[tracing::instrument(skip(service))]
pub(super) async fn delete_ad<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    user_id: Uuid,
    ad_id: Uuid,
) -> Result<()>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let deleted = service
        .storage
        .delete_ad(ad_id, user_id)
        .await
        .map_err(ClassifiedsError::from_storage)?;
    if !deleted {
        return Err(ClassifiedsError::not_found("Ad"));
    }

    tracing::info!(%ad_id, "deleted ad");
    Ok(())
}

#[tracing::instrument(skip(service))]
pub(super) async fn search_document<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    ad_id: Uuid,
) -> Result<AdSearchDocument>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let ad = service
        .storage
        .get_ad(ad_id)
        .await
        .map_err(ClassifiedsError::from_storage)?
        .ok_or_else(|| ClassifiedsError::not_found("Ad"))?;

    let category = service
        .storage
        .get_category(ad.category_id)
        .await
        .map_err(ClassifiedsError::from_storage)?
        .ok_or_else(|| {
            ClassifiedsError::Internal(anyhow::anyhow!("ad {ad_id} references a missing category"))
        })?;
    let neighbourhood = service
        .storage
        .get_neighbourhood(ad.neighbourhood_id)
        .await
        .map_err(ClassifiedsError::from_storage)?
        .ok_or_else(|| {
            ClassifiedsError::Internal(anyhow::anyhow!(
                "ad {ad_id} references a missing neighbourhood"
            ))
        })?;

    Ok(AdSearchDocument::new(ad, &category, &neighbourhood))
}
