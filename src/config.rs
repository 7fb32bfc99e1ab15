//! Shop configuration
//!
//! The shop id and secret are issued by the gateway when a shop is registered.

use crate::{PrimePayerError, Result};
use serde::Deserialize;
use std::fmt;

/// Default environment variable holding the shop id
pub const SHOP_ID_ENV: &str = "PRIMEPAYER_SHOP_ID";

/// Default environment variable holding the shop secret
pub const SECRET_ENV: &str = "PRIMEPAYER_SECRET";

/// Shop identity and shared secret
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ShopConfig {
    /// Numeric shop id
    pub shop_id: i64,
    /// Secret shared with the gateway
    pub secret: String,
}

impl fmt::Debug for ShopConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopConfig")
            .field("shop_id", &self.shop_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl ShopConfig {
    /// Create a new shop configuration
    pub fn new(shop_id: i64, secret: impl Into<String>) -> Self {
        Self {
            shop_id,
            secret: secret.into(),
        }
    }

    /// Load from `PRIMEPAYER_SHOP_ID` and `PRIMEPAYER_SECRET`
    pub fn from_env() -> Result<Self> {
        Self::from_env_vars(SHOP_ID_ENV, SECRET_ENV)
    }

    /// Load from custom environment variable names
    pub fn from_env_vars(shop_id_env: &str, secret_env: &str) -> Result<Self> {
        let shop_id = std::env::var(shop_id_env).map_err(|_| {
            PrimePayerError::config(format!("Environment variable {} not found", shop_id_env))
        })?;
        let shop_id = shop_id.trim().parse::<i64>().map_err(|_| {
            PrimePayerError::config(format!(
                "Environment variable {} is not an integer shop id",
                shop_id_env
            ))
        })?;

        let secret = std::env::var(secret_env).map_err(|_| {
            PrimePayerError::config(format!("Environment variable {} not found", secret_env))
        })?;

        let config = Self::new(shop_id, secret);
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the gateway would never issue
    pub fn validate(&self) -> Result<()> {
        if self.secret.is_empty() {
            return Err(PrimePayerError::config("Shop secret must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let config = ShopConfig::new(1, "f6482bd9a166bf2s43ssc9fe60eb4774");
        let debug = format!("{:?}", config);
        assert!(debug.contains("shop_id: 1"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("f6482bd9"));
    }

    #[test]
    fn test_deserialize_from_json() {
        let config: ShopConfig =
            serde_json::from_str(r#"{"shop_id":1,"secret":"f6482bd9a166bf2s43ssc9fe60eb4774"}"#)
                .unwrap();
        assert_eq!(config, ShopConfig::new(1, "f6482bd9a166bf2s43ssc9fe60eb4774"));

        let missing = serde_json::from_str::<ShopConfig>(r#"{"shop_id":1}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn test_validate() {
        assert!(ShopConfig::new(1, "secret").validate().is_ok());

        let error = ShopConfig::new(1, "").validate().unwrap_err();
        match error {
            PrimePayerError::Config { message } => assert!(message.contains("secret")),
            other => panic!("Expected Config error, got: {:?}", other),
        }
    }

    #[test]
    fn test_from_env_vars() {
        std::env::set_var("PRIMEPAYER_TEST_SHOP_ID", " 17 ");
        std::env::set_var("PRIMEPAYER_TEST_SECRET", "s3cr3t");

        let config =
            ShopConfig::from_env_vars("PRIMEPAYER_TEST_SHOP_ID", "PRIMEPAYER_TEST_SECRET").unwrap();
        assert_eq!(config, ShopConfig::new(17, "s3cr3t"));
    }

    #[test]
    fn test_from_env_vars_missing() {
        let result = ShopConfig::from_env_vars(
            "PRIMEPAYER_TEST_MISSING_SHOP_ID",
            "PRIMEPAYER_TEST_MISSING_SECRET",
        );
        assert!(matches!(result, Err(PrimePayerError::Config { .. })));
    }

    #[test]
    fn test_from_env_vars_bad_shop_id() {
        std::env::set_var("PRIMEPAYER_TEST_BAD_SHOP_ID", "shop-one");
        std::env::set_var("PRIMEPAYER_TEST_BAD_SECRET", "s3cr3t");

        let error = ShopConfig::from_env_vars(
            "PRIMEPAYER_TEST_BAD_SHOP_ID",
            "PRIMEPAYER_TEST_BAD_SECRET",
        )
        .unwrap_err();
        assert!(error.to_string().contains("PRIMEPAYER_TEST_BAD_SHOP_ID"));
    }
}
