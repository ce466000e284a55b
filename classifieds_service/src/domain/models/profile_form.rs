//! Profile validation: the inline form of the ad submission and the profile patch

use std::sync::LazyLock;

use models_classifieds::Gender;
use models_classifieds::api::{ProfileFields, UpdateProfileRequest};
use models_classifieds::service::{FormErrors, Profile, User};
use regex::Regex;

use super::property_form::{REQUIRED, invalid_choice};

pub const NAME_MAX_CHARS: usize = 150;
pub const BIO_MAX_CHARS: usize = 200;

const INVALID_PHONE: &str = "Enter a valid international phone number.";

/// Optional leading `+`, then 8 to 15 digits without a leading zero
static PHONE_NUMBER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{7,14}$"));

pub fn is_valid_phone_number(value: &str) -> bool {
    PHONE_NUMBER
        .as_ref()
        .is_ok_and(|pattern| pattern.is_match(value))
}

fn too_long(errors: &mut FormErrors, field: &str, value: &str, max: usize) {
    let count = value.chars().count();
    if count > max {
        errors.add_field(
            field,
            format!("Ensure this value has at most {max} characters (it has {count})."),
        );
    }
}

/// Validates the profile fields posted with an ad and applies them to `profile`
pub fn apply_inline(fields: &ProfileFields, mut profile: Profile) -> Result<Profile, FormErrors> {
    let mut errors = FormErrors::new();

    let full_name = fields.full_name.as_deref().map(str::trim).unwrap_or_default();
    if full_name.is_empty() {
        errors.add_field("full_name", "Full name cannot be empty.");
    } else {
        too_long(&mut errors, "full_name", full_name, NAME_MAX_CHARS);
    }

    let phone_number = fields
        .phone_number
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if phone_number.is_empty() {
        errors.add_field("phone_number", REQUIRED);
    } else if !is_valid_phone_number(phone_number) {
        errors.add_field("phone_number", INVALID_PHONE);
    }

    errors.into_result()?;

    profile.full_name = full_name.to_string();
    profile.phone_number = Some(phone_number.to_string());
    Ok(profile)
}

/// Applies a profile patch. Fields left out stay unchanged; an empty string
/// clears the phone number, picture and gender.
pub fn apply_patch(
    request: &UpdateProfileRequest,
    mut user: User,
    mut profile: Profile,
) -> Result<(User, Profile), FormErrors> {
    let mut errors = FormErrors::new();

    if let Some(first_name) = &request.first_name {
        let first_name = first_name.trim();
        too_long(&mut errors, "first_name", first_name, NAME_MAX_CHARS);
        user.first_name = first_name.to_string();
    }
    if let Some(last_name) = &request.last_name {
        let last_name = last_name.trim();
        too_long(&mut errors, "last_name", last_name, NAME_MAX_CHARS);
        user.last_name = last_name.to_string();
    }

    if let Some(bio) = &request.bio {
        let bio = bio.trim();
        too_long(&mut errors, "bio", bio, BIO_MAX_CHARS);
        profile.bio = bio.to_string();
    }

    if let Some(gender) = &request.gender {
        let gender = gender.trim();
        if gender.is_empty() {
            profile.gender = None;
        } else {
            match Gender::parse_choice(gender) {
                Ok(parsed) => profile.gender = Some(parsed),
                Err(_) => errors.add_field("gender", invalid_choice(gender)),
            }
        }
    }

    if let Some(phone_number) = &request.phone_number {
        let phone_number = phone_number.trim();
        if phone_number.is_empty() {
            profile.phone_number = None;
        } else if is_valid_phone_number(phone_number) {
            profile.phone_number = Some(phone_number.to_string());
        } else {
            errors.add_field("phone_number", INVALID_PHONE);
        }
    }

    if let Some(profile_pic) = &request.profile_pic {
        let profile_pic = profile_pic.trim();
        profile.profile_pic = (!profile_pic.is_empty()).then(|| profile_pic.to_string());
    }

    if let Some(date_of_birth) = request.date_of_birth {
        profile.date_of_birth = Some(date_of_birth);
    }

    errors.into_result()?;
    Ok((user, profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn user() -> User {
        User {
            id: Uuid::now_v7(),
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn phone_pattern() {
        assert!(is_valid_phone_number("+4915112345678"));
        assert!(is_valid_phone_number("12345678"));
        assert!(!is_valid_phone_number("+0123456789"));
        assert!(!is_valid_phone_number("1234567"));
        assert!(!is_valid_phone_number("+1 555 1234"));
        assert!(!is_valid_phone_number("1234567890123456"));
    }

    #[test]
    fn inline_form_requires_name_and_phone() {
        let profile = Profile::empty(Uuid::now_v7());
        let errors = apply_inline(
            &ProfileFields {
                full_name: Some("   ".to_string()),
                phone_number: None,
            },
            profile.clone(),
        )
        .unwrap_err();
        assert_eq!(errors.for_field("full_name"), ["Full name cannot be empty."]);
        assert_eq!(errors.for_field("phone_number"), [REQUIRED]);

        let errors = apply_inline(
            &ProfileFields {
                full_name: Some("Ada".to_string()),
                phone_number: Some("555".to_string()),
            },
            profile.clone(),
        )
        .unwrap_err();
        assert_eq!(errors.for_field("phone_number"), [INVALID_PHONE]);

        let saved = apply_inline(
            &ProfileFields {
                full_name: Some(" Ada Lovelace ".to_string()),
                phone_number: Some("+4915112345678".to_string()),
            },
            profile,
        )
        .unwrap();
        assert_eq!(saved.full_name, "Ada Lovelace");
        assert_eq!(saved.phone_number.as_deref(), Some("+4915112345678"));
    }

    #[test]
    fn patch_updates_only_given_fields() {
        let user = user();
        let mut profile = Profile::empty(user.id);
        profile.phone_number = Some("+4915112345678".to_string());
        profile.bio = "old".to_string();

        let request = UpdateProfileRequest {
            first_name: Some("Augusta".to_string()),
            gender: Some("prefer not to say".to_string()),
            phone_number: Some(String::new()),
            ..Default::default()
        };
        let (user, profile) = apply_patch(&request, user, profile).unwrap();

        assert_eq!(user.first_name, "Augusta");
        assert_eq!(user.last_name, "Lovelace");
        assert_eq!(profile.gender, Some(Gender::PreferNotToSay));
        assert_eq!(profile.phone_number, None);
        assert_eq!(profile.bio, "old");
    }

    #[test]
    fn patch_rejects_bad_values() {
        let user = user();
        let request = UpdateProfileRequest {
            bio: Some("b".repeat(201)),
            gender: Some("X".to_string()),
            phone_number: Some("abc".to_string()),
            ..Default::default()
        };
        let errors = apply_patch(&request, user.clone(), Profile::empty(user.id)).unwrap_err();

        assert_eq!(
            errors.for_field("bio"),
            ["Ensure this value has at most 200 characters (it has 201)."]
        );
        assert_eq!(errors.for_field("gender"), [invalid_choice("X")]);
        assert_eq!(errors.for_field("phone_number"), [INVALID_PHONE]);
    }
}
