use anyhow::{bail, Context, Result};

const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const DEFAULT_LLM_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_IMAGEKIT_UPLOAD_URL: &str = "https://upload.imagekit.io/api/v1/files/upload";
const DEFAULT_IMAGEKIT_FOLDER: &str = "/resumes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => bail!("APP_ENV must be 'development' or 'production', got '{other}'"),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Where profile photos are uploaded.
#[derive(Debug, Clone)]
pub enum ImageHostConfig {
    /// Hosted service that applies the crop/face/background pipeline itself.
    ImageKit {
        private_key: String,
        upload_url: String,
        folder: String,
    },
    /// Plain object storage (S3 or MinIO). Stores the original upload.
    S3 {
        bucket: String,
        endpoint: String,
        access_key_id: String,
        secret_access_key: String,
        public_url: String,
    },
    Disabled,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub image_host: ImageHostConfig,
    pub environment: Environment,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            llm_api_key: require_env("LLM_API_KEY")?,
            llm_base_url: optional_env("LLM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            image_host: image_host_from_env()?,
            environment: Environment::parse(
                &optional_env("APP_ENV").unwrap_or_else(|| "production".to_string()),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Raw model output may be echoed back to clients outside production.
    pub fn expose_ai_debug(&self) -> bool {
        !self.environment.is_production()
    }
}

fn image_host_from_env() -> Result<ImageHostConfig> {
    if let Some(private_key) = optional_env("IMAGEKIT_PRIVATE_KEY") {
        return Ok(ImageHostConfig::ImageKit {
            private_key,
            upload_url: optional_env("IMAGEKIT_UPLOAD_URL")
                .unwrap_or_else(|| DEFAULT_IMAGEKIT_UPLOAD_URL.to_string()),
            folder: optional_env("IMAGEKIT_FOLDER")
                .unwrap_or_else(|| DEFAULT_IMAGEKIT_FOLDER.to_string()),
        });
    }

    if let Some(bucket) = optional_env("S3_BUCKET") {
        let endpoint = require_env("S3_ENDPOINT")?;
        let public_url = optional_env("S3_PUBLIC_URL")
            .unwrap_or_else(|| format!("{}/{}", endpoint.trim_end_matches('/'), bucket));
        return Ok(ImageHostConfig::S3 {
            bucket,
            endpoint,
            access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            public_url,
        });
    }

    Ok(ImageHostConfig::Disabled)
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("development").unwrap(), Environment::Development);
        assert_eq!(Environment::parse("PROD").unwrap(), Environment::Production);
        assert!(Environment::parse("staging").is_err());
    }

    #[test]
    fn test_production_hides_ai_debug() {
        assert!(Environment::Production.is_production());
        assert!(!Environment::Development.is_production());
    }
}
