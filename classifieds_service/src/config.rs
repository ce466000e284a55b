use std::str::FromStr;

use anyhow::Context;
pub use classifieds_env::Environment;
use classifieds_service::domain::models::ImagePolicy;

const DEFAULT_PORT: usize = 8080;
const DEFAULT_FROM_EMAIL: &str = "noreply@classifieds.local";

/// Configuration parameters for the application.
#[derive(Debug)]
pub struct Config {
    /// The connection URL for the classifieds Postgres database
    pub database_url: String,
    /// The port to listen for HTTP requests on.
    pub port: usize,
    /// The environment we are in
    pub environment: Environment,
    /// Image count and size limits applied to every ad
    pub images: ImagePolicy,
    /// Sender address of the ad confirmation emails
    pub default_from_email: String,
}

/// Reads `name`, falling back to `default` when it is unset
fn var_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{name} has an invalid value: {value}")),
        Err(std::env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(e).with_context(|| format!("could not read {name}")),
    }
}

fn image_policy(max_images: usize, max_image_size_mb: u64) -> anyhow::Result<ImagePolicy> {
    ImagePolicy::new(max_images, max_image_size_mb).with_context(|| {
        format!(
            "invalid image limits ADS_MAX_IMAGES_PER_AD={max_images} ADS_MAX_IMAGE_SIZE_MB={max_image_size_mb}"
        )
    })
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be provided")?;
        let port = var_or("PORT", DEFAULT_PORT)?;
        let environment = Environment::new_or_prod();

        let defaults = ImagePolicy::default();
        let images = image_policy(
            var_or("ADS_MAX_IMAGES_PER_AD", defaults.max_images)?,
            var_or("ADS_MAX_IMAGE_SIZE_MB", defaults.max_image_size_mb)?,
        )?;
        let default_from_email = var_or("DEFAULT_FROM_EMAIL", DEFAULT_FROM_EMAIL.to_string())?;

        Ok(Config {
            database_url,
            port,
            environment,
            images,
            default_from_email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_limits_out_of_range_are_rejected() {
        let err = image_policy(20, u64::MAX / 1024).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("invalid image limits ADS_MAX_IMAGES_PER_AD=20 ADS_MAX_IMAGE_SIZE_MB={}", u64::MAX / 1024)
        );
        assert!(image_policy(0, 5).is_err());
    }

    #[test]
    fn default_image_limits_are_accepted() {
        assert_eq!(image_policy(20, 5).unwrap(), ImagePolicy::default());
    }
}
