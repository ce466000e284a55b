use classifieds_service::inbound::http;
use models_classifieds::{api, search, service};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Ads
        http::ads::list_ads,
        http::ads::get_ad,
        http::ads::create_ad,
        http::ads::update_ad,
        http::ads::delete_ad,
        // Catalogue
        http::catalogue::category_tree,
        http::catalogue::category_hierarchy,
        http::catalogue::create_category,
        http::catalogue::update_category,
        http::catalogue::create_property,
        http::catalogue::bind_property,
        http::catalogue::add_allowed_value,
        // Locations
        http::locations::location_tree,
        // Profile
        http::profile::get_profile,
        http::profile::update_profile,
        // Lookups
        http::catalogue::root_categories,
        http::catalogue::category_children,
        http::locations::list_locations,
        http::locations::list_cities,
        http::locations::list_neighbourhoods,
        http::forms::property_form,
        // Internal
        http::internal::search_document,
    ),
    components(
        schemas(
            api::ErrorResponse,
            api::ValidationErrorResponse,
            service::FormErrors,
            service::NamedRef,
            service::LocationHierarchy,
            models_classifieds::DataType,
            models_classifieds::FieldKind,
            models_classifieds::Gender,
            api::NamedItems,
            api::CreateCategoryRequest,
            api::UpdateCategoryRequest,
            api::CreatePropertyRequest,
            api::BindPropertyRequest,
            api::AddAllowedValueRequest,
            api::CategoryResponse,
            api::PropertyResponse,
            api::CategoryPropertyResponse,
            api::AllowedValueResponse,
            api::AllowedValueItem,
            api::CategoryNodeProperty,
            api::CategoryNode,
            api::CityNode,
            api::LocationNode,
            api::ChoiceOptionResponse,
            api::PropertyFieldResponse,
            api::PropertyFormResponse,
            api::AdFields,
            api::ProfileFields,
            api::ImageUpload,
            api::AdSubmission,
            api::AdImageResponse,
            api::AdPropertyValueResponse,
            api::UserPublicResponse,
            api::AdDetailResponse,
            api::AdSummaryResponse,
            api::AdPage,
            api::UpdateProfileRequest,
            api::ProfileResponse,
            search::AdSearchDocument,
            search::SearchNeighbourhood,
        )
    ),
    tags(
        (name = "ads", description = "Classified ads"),
        (name = "catalogue", description = "Categories, properties and allowed values"),
        (name = "locations", description = "Location hierarchy"),
        (name = "lookups", description = "Cascading form lookups"),
        (name = "profile", description = "The caller's profile"),
        (name = "internal", description = "Service to service routes"),
    )
)]
pub struct ApiDoc;
