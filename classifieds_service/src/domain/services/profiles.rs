use models_classifieds::api::{ProfileResponse, UpdateProfileRequest};
use models_classifieds::service::{Profile, User};
use uuid::Uuid;

use super::ClassifiedsServiceImpl;
use crate::domain::{
    error::{ClassifiedsError, Result},
    models::profile_form,
    ports::{ClassifiedsStorage, ConfirmationQueue},
};

/// The user with their stored profile, if any
async fn load<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    user_id: Uuid,
) -> Result<(User, Option<Profile>)>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let user = service
        .storage
        .get_user(user_id)
        .await
        .map_err(ClassifiedsError::from_storage)?
        .ok_or_else(|| ClassifiedsError::not_found("User"))?;
    let profile = service
        .storage
        .get_profile(user_id)
        .await
        .map_err(ClassifiedsError::from_storage)?;

    Ok((user, profile))
}

/// Creates the profile row on first access
#[tracing::instrument(skip(service))]
pub(super) async fn get_profile<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    user_id: Uuid,
) -> Result<ProfileResponse>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let (user, profile) = load(service, user_id).await?;

    let profile = match profile {
        Some(profile) => profile,
        None => {
            let profile = Profile::empty(user_id);
            service
                .storage
                .save_user_profile(user.clone(), profile.clone())
                .await
                .map_err(ClassifiedsError::from_storage)?;
            tracing::info!(%user_id, "created missing profile");
            profile
        }
    };

    Ok(ProfileResponse::new(user, profile))
}

#[tracing::instrument(skip(service))]
pub(super) async fn update_profile<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    user_id: Uuid,
    request: UpdateProfileRequest,
) -> Result<ProfileResponse>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let (user, profile) = load(service, user_id).await?;
    let profile = profile.unwrap_or_else(|| Profile::empty(user_id));

    let (user, profile) = profile_form::apply_patch(&request, user, profile).map_err(|errors| {
        tracing::warn!(?errors, "profile update rejected");
        ClassifiedsError::Validation(errors)
    })?;

    service
        .storage
        .save_user_profile(user.clone(), profile.clone())
        .await
        .map_err(ClassifiedsError::from_storage)?;

    tracing::info!(%user_id, "updated profile");
    Ok(ProfileResponse::new(user, profile))
}
