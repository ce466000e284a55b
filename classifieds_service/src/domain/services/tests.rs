use std::collections::BTreeMap;

use chrono::Utc;
use cool_asserts::assert_matches;
use models_classifieds::api::{
    AddAllowedValueRequest, AdFields, AdSubmission, BindPropertyRequest, CreateCategoryRequest,
    CreatePropertyRequest, ImageUpload, ListAdsQuery, ProfileFields, PropertyFormQuery,
    UpdateCategoryRequest, UpdateProfileRequest,
};
use models_classifieds::service::{
    Category, City, Location, Neighbourhood, Profile, Property, TypedValue, User,
};
use models_classifieds::DataType;
use serde_json::{Value, json};
use uuid::Uuid;

use super::ClassifiedsServiceImpl;
use crate::domain::{
    error::ClassifiedsError,
    models::{ImagePolicy, field_name},
    ports::{ClassifiedsService, MockConfirmationQueue},
};
use crate::outbound::in_memory::InMemoryStorage;

const OWNER_EMAIL: &str = "owner@example.com";
const PHONE: &str = "+4915112345678";

struct World {
    service: ClassifiedsServiceImpl<InMemoryStorage, MockConfirmationQueue>,
    owner: User,
    other: User,
    electronics: Category,
    phones: Category,
    neighbourhood: Neighbourhood,
    storage_prop: Property,
    color_prop: Property,
}

fn user(email: &str) -> User {
    User {
        id: Uuid::now_v7(),
        email: email.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        created_at: Utc::now(),
    }
}

fn category_request(name: &str, parent: Option<&Category>) -> CreateCategoryRequest {
    CreateCategoryRequest {
        name: name.to_string(),
        parent_id: parent.map(|p| p.id),
        image: None,
        is_active: true,
    }
}

/// Queue that accepts any number of jobs
fn permissive_queue() -> MockConfirmationQueue {
    let mut queue = MockConfirmationQueue::new();
    queue.expect_enqueue().returning(|_| ());
    queue
}

/// Electronics > Phones with Storage (number, required) and Color (choice) bound to Phones
async fn world(queue: MockConfirmationQueue) -> World {
    let storage = InMemoryStorage::new();

    let owner = user(OWNER_EMAIL);
    let other = user("other@example.com");
    storage.add_user(owner.clone()).unwrap();
    storage.add_user(other.clone()).unwrap();
    let mut profile = Profile::empty(owner.id);
    profile.full_name = "Ada Lovelace".to_string();
    profile.phone_number = Some(PHONE.to_string());
    storage.add_profile(profile).unwrap();

    let location = Location {
        id: Uuid::now_v7(),
        name: "Germany".to_string(),
    };
    let city = City {
        id: Uuid::now_v7(),
        location_id: location.id,
        name: "Berlin".to_string(),
    };
    let neighbourhood = Neighbourhood {
        id: Uuid::now_v7(),
        city_id: city.id,
        name: "Kreuzberg".to_string(),
    };
    storage.add_location(location).unwrap();
    storage.add_city(city).unwrap();
    storage.add_neighbourhood(neighbourhood.clone()).unwrap();

    let service = ClassifiedsServiceImpl::new(storage, queue, ImagePolicy::default());

    let electronics = service
        .create_category(category_request("Electronics", None))
        .await
        .unwrap();
    let phones = service
        .create_category(category_request("Phones", Some(&electronics)))
        .await
        .unwrap();

    let storage_prop = service
        .create_property(CreatePropertyRequest {
            name: "Storage".to_string(),
            data_type: DataType::Number,
        })
        .await
        .unwrap();
    service
        .bind_property(
            phones.id,
            BindPropertyRequest {
                property_id: storage_prop.id,
                required: true,
            },
        )
        .await
        .unwrap();

    let color_prop = service
        .create_property(CreatePropertyRequest {
            name: "Color".to_string(),
            data_type: DataType::Choice,
        })
        .await
        .unwrap();
    let color_binding = service
        .bind_property(
            phones.id,
            BindPropertyRequest {
                property_id: color_prop.id,
                required: false,
            },
        )
        .await
        .unwrap();
    for value in ["Black", "White"] {
        service
            .add_allowed_value(
                color_binding.id,
                AddAllowedValueRequest {
                    value: value.to_string(),
                    depends_on_value_id: None,
                },
            )
            .await
            .unwrap();
    }

    World {
        service,
        owner,
        other,
        electronics,
        phones,
        neighbourhood,
        storage_prop,
        color_prop,
    }
}

fn submission(w: &World, category_id: Uuid, properties: &[(&Property, Value)]) -> AdSubmission {
    AdSubmission {
        ad: AdFields {
            category_id: Some(category_id),
            title: Some("Pixel 8".to_string()),
            description: Some("Like new".to_string()),
            neighbourhood_id: Some(w.neighbourhood.id),
            price: Some(400),
            show_phone_number: Some(true),
        },
        profile: ProfileFields {
            full_name: Some("Ada Lovelace".to_string()),
            phone_number: Some(PHONE.to_string()),
        },
        upload_images: vec![ImageUpload {
            file_name: "front.JPG".to_string(),
            size_bytes: 1024,
        }],
        delete_images: vec![],
        properties: properties
            .iter()
            .map(|(p, v)| (field_name(p.id), v.clone()))
            .collect::<BTreeMap<_, _>>(),
    }
}

// ===== Ads =====

#[tokio::test]
async fn ad_without_required_property_is_rejected() {
    let w = world(MockConfirmationQueue::new()).await;

    let result = w
        .service
        .create_ad(w.owner.id, submission(&w, w.phones.id, &[]))
        .await;

    assert_matches!(result, Err(ClassifiedsError::Validation(errors)) => {
        let key = format!("properties.{}", field_name(w.storage_prop.id));
        assert_eq!(errors.for_field(&key), ["This field is required."]);
    });
    assert_eq!(w.service.storage.ad_count().unwrap(), 0);
}

#[tokio::test]
async fn ad_with_storage_persists_typed_value_and_queues_email() {
    let mut queue = MockConfirmationQueue::new();
    queue
        .expect_enqueue()
        .withf(|job| job.recipient == OWNER_EMAIL)
        .times(1)
        .return_const(());
    let w = world(queue).await;

    let detail = w
        .service
        .create_ad(
            w.owner.id,
            submission(&w, w.phones.id, &[(&w.storage_prop, json!("128"))]),
        )
        .await
        .unwrap();

    let stored = w.service.storage.stored_values(detail.id).unwrap();
    assert_eq!(stored, vec![(w.storage_prop.id, "128".to_string())]);

    assert_eq!(detail.property_values.len(), 1);
    assert_eq!(detail.property_values[0].name, "Storage");
    assert_eq!(detail.property_values[0].value, TypedValue::Int(128));

    let names: Vec<_> = detail
        .category_hierarchy
        .iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(names, ["Electronics", "Phones"]);
    assert_eq!(detail.location.neighbourhood.name, "Kreuzberg");
    assert_eq!(detail.images.len(), 1);
    assert!(detail.images[0].image.ends_with(".jpg"));
}

#[tokio::test]
async fn every_form_reports_errors_together() {
    let w = world(MockConfirmationQueue::new()).await;

    let result = w.service.create_ad(w.owner.id, AdSubmission::default()).await;

    assert_matches!(result, Err(ClassifiedsError::Validation(errors)) => {
        assert_eq!(errors.for_field("ad.title"), ["This field is required."]);
        assert_eq!(errors.for_field("ad.category_id"), ["This field is required."]);
        assert_eq!(errors.for_field("profile.full_name"), ["Full name cannot be empty."]);
        assert_eq!(errors.for_field("profile.phone_number"), ["This field is required."]);
        assert_eq!(errors.for_field("images"), ["You need to upload at least 1 image."]);
    });
}

#[tokio::test]
async fn ads_only_go_under_leaf_categories() {
    let w = world(MockConfirmationQueue::new()).await;

    let result = w
        .service
        .create_ad(w.owner.id, submission(&w, w.electronics.id, &[]))
        .await;

    assert_matches!(result, Err(ClassifiedsError::Validation(errors)) => {
        assert_eq!(
            errors.for_field("ad.category_id"),
            ["You can only post under a leaf category."]
        );
    });
}

#[tokio::test]
async fn update_overwrites_values_and_prunes_on_category_change() {
    let w = world(permissive_queue()).await;
    let ad = w
        .service
        .create_ad(
            w.owner.id,
            submission(
                &w,
                w.phones.id,
                &[(&w.storage_prop, json!(128)), (&w.color_prop, json!("Black"))],
            ),
        )
        .await
        .unwrap();

    let mut update = submission(&w, w.phones.id, &[(&w.storage_prop, json!("256"))]);
    update.upload_images = vec![];
    w.service.update_ad(w.owner.id, ad.id, update).await.unwrap();

    let mut stored = w.service.storage.stored_values(ad.id).unwrap();
    stored.sort();
    let mut expected = vec![
        (w.storage_prop.id, "256".to_string()),
        (w.color_prop.id, "Black".to_string()),
    ];
    expected.sort();
    assert_eq!(stored, expected);

    let laptops = w
        .service
        .create_category(category_request("Laptops", Some(&w.electronics)))
        .await
        .unwrap();
    let mut moved = submission(&w, laptops.id, &[]);
    moved.upload_images = vec![];
    let detail = w.service.update_ad(w.owner.id, ad.id, moved).await.unwrap();

    assert_eq!(detail.category_id, laptops.id);
    assert!(w.service.storage.stored_values(ad.id).unwrap().is_empty());
}

#[tokio::test]
async fn only_the_owner_can_change_an_ad() {
    let w = world(permissive_queue()).await;
    let ad = w
        .service
        .create_ad(
            w.owner.id,
            submission(&w, w.phones.id, &[(&w.storage_prop, json!(64))]),
        )
        .await
        .unwrap();

    let update = submission(&w, w.phones.id, &[(&w.storage_prop, json!(64))]);
    assert_matches!(
        w.service.update_ad(w.other.id, ad.id, update).await,
        Err(ClassifiedsError::NotFound(_))
    );
    assert_matches!(
        w.service.delete_ad(w.other.id, ad.id).await,
        Err(ClassifiedsError::NotFound(_))
    );

    w.service.delete_ad(w.owner.id, ad.id).await.unwrap();
    assert_matches!(
        w.service.get_ad(ad.id, None).await,
        Err(ClassifiedsError::NotFound(_))
    );
}

#[tokio::test]
async fn deleting_foreign_images_is_rejected() {
    let w = world(permissive_queue()).await;
    let ad = w
        .service
        .create_ad(
            w.owner.id,
            submission(&w, w.phones.id, &[(&w.storage_prop, json!(64))]),
        )
        .await
        .unwrap();

    let mut update = submission(&w, w.phones.id, &[(&w.storage_prop, json!(64))]);
    update.delete_images = vec![Uuid::now_v7()];
    assert_matches!(
        w.service.update_ad(w.owner.id, ad.id, update).await,
        Err(ClassifiedsError::Validation(errors)) => {
            assert_eq!(
                errors.for_field("images"),
                ["One or more images do not belong to this ad."]
            );
        }
    );

    let mut replace = submission(&w, w.phones.id, &[(&w.storage_prop, json!(64))]);
    replace.delete_images = vec![ad.images[0].id];
    let detail = w.service.update_ad(w.owner.id, ad.id, replace).await.unwrap();
    assert_eq!(detail.images.len(), 1);
    assert_ne!(detail.images[0].id, ad.images[0].id);
}

#[tokio::test]
async fn phone_number_is_shown_to_authenticated_viewers_only() {
    let w = world(permissive_queue()).await;
    let ad = w
        .service
        .create_ad(
            w.owner.id,
            submission(&w, w.phones.id, &[(&w.storage_prop, json!(64))]),
        )
        .await
        .unwrap();

    let anonymous = w.service.get_ad(ad.id, None).await.unwrap();
    assert_eq!(anonymous.user.phone_number, None);
    assert_eq!(anonymous.user.email, OWNER_EMAIL);

    let signed_in = w.service.get_ad(ad.id, Some(w.other.id)).await.unwrap();
    assert_eq!(signed_in.user.phone_number.as_deref(), Some(PHONE));

    let mut hidden = submission(&w, w.phones.id, &[(&w.storage_prop, json!(64))]);
    hidden.ad.show_phone_number = Some(false);
    hidden.upload_images = vec![];
    w.service.update_ad(w.owner.id, ad.id, hidden).await.unwrap();
    let signed_in = w.service.get_ad(ad.id, Some(w.other.id)).await.unwrap();
    assert_eq!(signed_in.user.phone_number, None);
}

#[tokio::test]
async fn listing_filters_and_pages_newest_first() {
    let w = world(permissive_queue()).await;
    for n in 0..12 {
        let mut s = submission(&w, w.phones.id, &[(&w.storage_prop, json!(64))]);
        s.ad.title = Some(format!("Phone {n}"));
        w.service.create_ad(w.owner.id, s).await.unwrap();
    }

    let first = w.service.list_ads(ListAdsQuery::default()).await.unwrap();
    assert_eq!(first.total, 12);
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.items[0].title, "Phone 11");

    let second = w
        .service
        .list_ads(ListAdsQuery {
            page: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(second.items.len(), 2);

    let matched = w
        .service
        .list_ads(ListAdsQuery {
            q: Some("phone 3".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(matched.total, 1);

    let by_category = w
        .service
        .list_ads(ListAdsQuery {
            q: Some("PHONES".to_string()),
            city_id: Some(w.neighbourhood.city_id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_category.total, 12);

    let elsewhere = w
        .service
        .list_ads(ListAdsQuery {
            city_id: Some(Uuid::now_v7()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(elsewhere.total, 0);
}

#[tokio::test]
async fn search_document_carries_city() {
    let w = world(permissive_queue()).await;
    let ad = w
        .service
        .create_ad(
            w.owner.id,
            submission(&w, w.phones.id, &[(&w.storage_prop, json!(64))]),
        )
        .await
        .unwrap();

    let document = w.service.search_document(ad.id).await.unwrap();
    assert_eq!(document.category.name, "Phones");
    assert_eq!(document.neighbourhood.city_id, w.neighbourhood.city_id);
}

// ===== Catalogue =====

#[tokio::test]
async fn category_parents_cannot_form_cycles() {
    let w = world(MockConfirmationQueue::new()).await;

    let self_parent = w
        .service
        .update_category(
            w.electronics.id,
            UpdateCategoryRequest {
                parent_id: Some(Some(w.electronics.id)),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(self_parent, Err(ClassifiedsError::Validation(errors)) => {
        assert_eq!(errors.for_field("parent_id"), ["Category cannot be parent of itself."]);
    });

    let cycle = w
        .service
        .update_category(
            w.electronics.id,
            UpdateCategoryRequest {
                parent_id: Some(Some(w.phones.id)),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(cycle, Err(ClassifiedsError::Validation(errors)) => {
        assert_eq!(
            errors.for_field("parent_id"),
            ["Circular category hierarchy is not allowed."]
        );
    });
}

#[tokio::test]
async fn categories_in_use_cannot_get_children() {
    let w = world(MockConfirmationQueue::new()).await;

    let result = w
        .service
        .create_category(category_request("Smartphones", Some(&w.phones)))
        .await;

    assert_matches!(result, Err(ClassifiedsError::Validation(errors)) => {
        assert_eq!(errors.for_field("parent_id").len(), 1);
    });
}

#[tokio::test]
async fn update_category_renames_and_deactivates() {
    let w = world(MockConfirmationQueue::new()).await;

    let updated = w
        .service
        .update_category(
            w.phones.id,
            UpdateCategoryRequest {
                name: Some(" Mobile Phones ".to_string()),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Mobile Phones");
    assert!(!updated.is_active);
    assert_eq!(updated.parent_id, Some(w.electronics.id));

    let children = w
        .service
        .category_children(Some(w.electronics.id))
        .await
        .unwrap();
    assert!(children.is_empty());
}

#[tokio::test]
async fn properties_bind_to_leaves_once() {
    let w = world(MockConfirmationQueue::new()).await;

    let on_parent = w
        .service
        .bind_property(
            w.electronics.id,
            BindPropertyRequest {
                property_id: w.storage_prop.id,
                required: false,
            },
        )
        .await;
    assert_matches!(on_parent, Err(ClassifiedsError::Validation(errors)) => {
        assert_eq!(
            errors.non_field_errors,
            ["Properties can only be bound to leaf categories."]
        );
    });

    let duplicate = w
        .service
        .bind_property(
            w.phones.id,
            BindPropertyRequest {
                property_id: w.storage_prop.id,
                required: false,
            },
        )
        .await;
    assert_matches!(duplicate, Err(ClassifiedsError::Integrity(_)));
}

#[tokio::test]
async fn allowed_values_need_a_choice_binding() {
    let w = world(MockConfirmationQueue::new()).await;
    let tree = w.service.category_tree().await.unwrap();
    let phones = &tree[0].children.as_ref().unwrap()[0];
    let storage_binding = phones
        .properties
        .iter()
        .find(|p| p.property_id == w.storage_prop.id)
        .unwrap();

    let result = w
        .service
        .add_allowed_value(
            storage_binding.id,
            AddAllowedValueRequest {
                value: "128".to_string(),
                depends_on_value_id: None,
            },
        )
        .await;

    assert_matches!(result, Err(ClassifiedsError::Validation(errors)) => {
        assert_eq!(
            errors.non_field_errors,
            ["Allowed values can only be added to choice properties."]
        );
    });
}

#[tokio::test]
async fn category_tree_nests_bindings_and_values() {
    let w = world(MockConfirmationQueue::new()).await;

    let tree = w.service.category_tree().await.unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].name, "Electronics");
    assert!(tree[0].properties.is_empty());

    let phones = &tree[0].children.as_ref().unwrap()[0];
    assert!(phones.children.is_none());
    let names: Vec<_> = phones.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Color", "Storage"]);
    let colors: Vec<_> = phones.properties[0]
        .values
        .iter()
        .map(|v| v.value.as_str())
        .collect();
    assert_eq!(colors, ["Black", "White"]);

    let hierarchy = w.service.category_hierarchy(w.phones.id).await.unwrap();
    assert_eq!(hierarchy.len(), 2);
    assert_matches!(
        w.service.category_hierarchy(Uuid::now_v7()).await,
        Err(ClassifiedsError::NotFound(_))
    );
}

// ===== Forms, locations, profiles =====

#[tokio::test]
async fn property_form_prefills_from_own_ad() {
    let w = world(permissive_queue()).await;
    let ad = w
        .service
        .create_ad(
            w.owner.id,
            submission(&w, w.phones.id, &[(&w.storage_prop, json!(512))]),
        )
        .await
        .unwrap();

    let form = w
        .service
        .property_form(
            w.owner.id,
            PropertyFormQuery {
                category_id: Some(w.phones.id),
                ad_id: Some(ad.id),
            },
        )
        .await
        .unwrap();
    let storage = form
        .fields
        .iter()
        .find(|f| f.property_id == w.storage_prop.id)
        .unwrap();
    assert_eq!(storage.initial, Some(json!(512)));
    assert_eq!(storage.attrs["class"], "form-control");

    // someone else's ad does not leak its values
    let foreign = w
        .service
        .property_form(
            w.other.id,
            PropertyFormQuery {
                category_id: Some(w.phones.id),
                ad_id: Some(ad.id),
            },
        )
        .await
        .unwrap();
    assert!(foreign.fields.iter().all(|f| f.initial.is_none()));

    let unknown = w
        .service
        .property_form(
            w.owner.id,
            PropertyFormQuery {
                category_id: Some(Uuid::now_v7()),
                ad_id: None,
            },
        )
        .await
        .unwrap();
    assert!(unknown.fields.is_empty());
}

#[tokio::test]
async fn location_lookups_cascade() {
    let w = world(MockConfirmationQueue::new()).await;

    let locations = w.service.list_locations().await.unwrap();
    assert_eq!(locations.len(), 1);
    let cities = w.service.list_cities(locations[0].id).await.unwrap();
    assert_eq!(cities[0].name, "Berlin");
    let neighbourhoods = w.service.list_neighbourhoods(cities[0].id).await.unwrap();
    assert_eq!(neighbourhoods[0].id, w.neighbourhood.id);

    let tree = w.service.location_tree().await.unwrap();
    assert_eq!(tree[0].cities[0].neighbourhoods[0].name, "Kreuzberg");
}

#[tokio::test]
async fn profile_is_created_on_first_read_and_patched() {
    let w = world(MockConfirmationQueue::new()).await;
    assert!(w.service.storage.stored_profile(w.other.id).unwrap().is_none());

    let profile = w.service.get_profile(w.other.id).await.unwrap();
    assert_eq!(profile.email, "other@example.com");
    assert!(w.service.storage.stored_profile(w.other.id).unwrap().is_some());

    let patched = w
        .service
        .update_profile(
            w.other.id,
            UpdateProfileRequest {
                gender: Some("F".to_string()),
                bio: Some("Collector".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.gender.as_deref(), Some("Female"));
    assert_eq!(patched.bio, "Collector");

    assert_matches!(
        w.service
            .update_profile(
                w.other.id,
                UpdateProfileRequest {
                    phone_number: Some("12".to_string()),
                    ..Default::default()
                },
            )
            .await,
        Err(ClassifiedsError::Validation(_))
    );
    assert_matches!(
        w.service.get_profile(Uuid::now_v7()).await,
        Err(ClassifiedsError::NotFound(_))
    );
}
