//! Category tree reads

use models_classifieds::api::CategoryNode;
use models_classifieds::service::NamedRef;
use uuid::Uuid;

use super::ClassifiedsServiceImpl;
use crate::domain::{
    error::{ClassifiedsError, Result},
    ports::{ClassifiedsStorage, ConfirmationQueue},
};

#[tracing::instrument(skip(service))]
pub(super) async fn category_tree<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
) -> Result<Vec<CategoryNode>>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let tree = service.load_tree().await?;
    let schemas = service
        .storage
        .property_schemas(None)
        .await
        .map_err(ClassifiedsError::from_storage)?;

    Ok(tree.nest(&schemas))
}

#[tracing::instrument(skip(service))]
pub(super) async fn category_hierarchy<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    category_id: Uuid,
) -> Result<Vec<NamedRef>>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let tree = service.load_tree().await?;
    if tree.get(category_id).is_none() {
        return Err(ClassifiedsError::not_found("Category"));
    }

    Ok(tree.hierarchy(category_id))
}

/// Active children of `parent_id`, or the active roots
#[tracing::instrument(skip(service))]
pub(super) async fn category_children<S, Q>(
    service: &ClassifiedsServiceImpl<S, Q>,
    parent_id: Option<Uuid>,
) -> Result<Vec<NamedRef>>
where
    S: ClassifiedsStorage,
    Q: ConfirmationQueue,
{
    let children = service
        .storage
        .category_children(parent_id)
        .await
        .map_err(ClassifiedsError::from_storage)?;

    Ok(children
        .into_iter()
        .filter(|c| c.is_active)
        .map(|c| NamedRef::new(c.id, c.name))
        .collect())
}
