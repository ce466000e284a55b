//! Validation of the core ad fields

use models_classifieds::api::AdFields;
use models_classifieds::service::{Category, FormErrors, Neighbourhood};
use uuid::Uuid;

use super::property_form::REQUIRED;

pub const TITLE_MAX_CHARS: usize = 80;
pub const DESCRIPTION_MAX_CHARS: usize = 4096;

const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Ad fields that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedAd {
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    pub neighbourhood_id: Uuid,
    pub price: i64,
    pub show_phone_number: bool,
}

/// What the ad form looked up for the submitted ids
#[derive(Debug, Clone, Copy, Default)]
pub struct AdFormLookups<'a> {
    pub category: Option<&'a Category>,
    pub category_is_leaf: bool,
    pub neighbourhood: Option<&'a Neighbourhood>,
}

fn max_chars(errors: &mut FormErrors, field: &str, value: &str, max: usize) {
    let count = value.chars().count();
    if count > max {
        errors.add_field(
            field,
            format!("Ensure this value has at most {max} characters (it has {count})."),
        );
    }
}

fn required_text(errors: &mut FormErrors, field: &str, value: Option<&str>, max: usize) -> String {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        errors.add_field(field, REQUIRED);
    } else {
        max_chars(errors, field, value, max);
    }
    value.to_string()
}

pub fn validate(fields: &AdFields, lookups: AdFormLookups<'_>) -> Result<CleanedAd, FormErrors> {
    let mut errors = FormErrors::new();

    let title = required_text(&mut errors, "title", fields.title.as_deref(), TITLE_MAX_CHARS);
    let description = required_text(
        &mut errors,
        "description",
        fields.description.as_deref(),
        DESCRIPTION_MAX_CHARS,
    );

    let category_id = match (fields.category_id, lookups.category) {
        (None, _) => {
            errors.add_field("category_id", REQUIRED);
            None
        }
        (Some(_), Some(category)) if category.is_active => {
            if !lookups.category_is_leaf {
                errors.add_field("category_id", "You can only post under a leaf category.");
            }
            Some(category.id)
        }
        (Some(_), _) => {
            errors.add_field("category_id", INVALID_CHOICE);
            None
        }
    };

    let neighbourhood_id = match (fields.neighbourhood_id, lookups.neighbourhood) {
        (None, _) => {
            errors.add_field("neighbourhood_id", REQUIRED);
            None
        }
        (Some(_), Some(neighbourhood)) => Some(neighbourhood.id),
        (Some(_), None) => {
            errors.add_field("neighbourhood_id", INVALID_CHOICE);
            None
        }
    };

    let price = match fields.price {
        None => {
            errors.add_field("price", REQUIRED);
            None
        }
        Some(price) if price < 0 => {
            errors.add_field("price", "Ensure this value is greater than or equal to 0.");
            None
        }
        Some(price) => Some(price),
    };

    match (category_id, neighbourhood_id, price) {
        (Some(category_id), Some(neighbourhood_id), Some(price)) if errors.is_empty() => {
            Ok(CleanedAd {
                category_id,
                title,
                description,
                neighbourhood_id,
                price,
                show_phone_number: fields.show_phone_number.unwrap_or(true),
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(category: &Category, neighbourhood: &Neighbourhood) -> AdFields {
        AdFields {
            category_id: Some(category.id),
            title: Some("  Pixel 8 ".to_string()),
            description: Some("Like new".to_string()),
            neighbourhood_id: Some(neighbourhood.id),
            price: Some(400),
            show_phone_number: None,
        }
    }

    fn neighbourhood() -> Neighbourhood {
        Neighbourhood {
            id: Uuid::now_v7(),
            city_id: Uuid::now_v7(),
            name: "Kreuzberg".to_string(),
        }
    }

    #[test]
    fn valid_fields_are_cleaned() {
        let category = Category::new("Phones".to_string(), None);
        let neighbourhood = neighbourhood();
        let cleaned = validate(
            &fields(&category, &neighbourhood),
            AdFormLookups {
                category: Some(&category),
                category_is_leaf: true,
                neighbourhood: Some(&neighbourhood),
            },
        )
        .unwrap();

        assert_eq!(cleaned.title, "Pixel 8");
        assert!(cleaned.show_phone_number);
        assert_eq!(cleaned.price, 400);
    }

    #[test]
    fn rejects_non_leaf_category() {
        let category = Category::new("Electronics".to_string(), None);
        let neighbourhood = neighbourhood();
        let errors = validate(
            &fields(&category, &neighbourhood),
            AdFormLookups {
                category: Some(&category),
                category_is_leaf: false,
                neighbourhood: Some(&neighbourhood),
            },
        )
        .unwrap_err();

        assert_eq!(
            errors.for_field("category_id"),
            ["You can only post under a leaf category."]
        );
    }

    #[test]
    fn rejects_inactive_or_unknown_lookups() {
        let mut category = Category::new("Phones".to_string(), None);
        category.is_active = false;
        let neighbourhood = neighbourhood();
        let errors = validate(
            &fields(&category, &neighbourhood),
            AdFormLookups {
                category: Some(&category),
                category_is_leaf: true,
                neighbourhood: None,
            },
        )
        .unwrap_err();

        assert_eq!(errors.for_field("category_id"), [INVALID_CHOICE]);
        assert_eq!(errors.for_field("neighbourhood_id"), [INVALID_CHOICE]);
    }

    #[test]
    fn reports_missing_long_and_negative_values() {
        let category = Category::new("Phones".to_string(), None);
        let neighbourhood = neighbourhood();
        let mut submitted = fields(&category, &neighbourhood);
        submitted.title = Some("x".repeat(81));
        submitted.description = Some("   ".to_string());
        submitted.price = Some(-1);

        let errors = validate(
            &submitted,
            AdFormLookups {
                category: Some(&category),
                category_is_leaf: true,
                neighbourhood: Some(&neighbourhood),
            },
        )
        .unwrap_err();

        assert_eq!(
            errors.for_field("title"),
            ["Ensure this value has at most 80 characters (it has 81)."]
        );
        assert_eq!(errors.for_field("description"), [REQUIRED]);
        assert_eq!(
            errors.for_field("price"),
            ["Ensure this value is greater than or equal to 0."]
        );
    }
}
