//! Development bearer tokens.
//!
//! Production tokens come from the identity provider. This signs a token
//! with the configured HS256 secret so the API can be exercised locally.

use chrono::{TimeDelta, Utc};
use clap::Args;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;

use medivault_core::config::AuthConfig;
use medivault_core::error::{AppError, ErrorKind};

/// Arguments for the token command
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Subject (user id) of the token
    #[arg(long)]
    pub sub: String,

    /// Email claim
    #[arg(long)]
    pub email: Option<String>,

    /// Lifetime in hours
    #[arg(long, default_value_t = 24)]
    pub hours: i64,
}

#[derive(Debug, Serialize)]
struct DevClaims<'a> {
    sub: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    iat: i64,
    exp: i64,
    #[serde(skip_serializing_if = "str::is_empty")]
    iss: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    aud: &'a str,
}

/// Execute the token command
pub async fn execute(args: &TokenArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let token = mint(&config.auth, args)?;
    println!("{token}");
    Ok(())
}

fn mint(auth: &AuthConfig, args: &TokenArgs) -> Result<String, AppError> {
    if args.sub.trim().is_empty() {
        return Err(AppError::validation("--sub must not be empty"));
    }
    if args.hours <= 0 {
        return Err(AppError::validation("--hours must be positive"));
    }

    let now = Utc::now();
    let claims = DevClaims {
        sub: &args.sub,
        email: args.email.as_deref(),
        iat: now.timestamp(),
        exp: (now + TimeDelta::hours(args.hours)).timestamp(),
        iss: &auth.issuer,
        aud: &auth.audience,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to sign token", e))
}
