//! Shop context: payment factory and notification verifier

use crate::config::ShopConfig;
use crate::crypto::{canonical, signature};
use crate::notification::Notification;
use crate::payment::Payment;
use crate::types::{fields, strip_user_variable_prefix};
use crate::{PrimePayerError, Result};
use num_bigint::BigInt;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

/// A shop registered with the gateway.
///
/// Cloning is cheap; clones and every [`Payment`] created from them share the
/// same configuration.
#[derive(Debug, Clone)]
pub struct Shop {
    config: Arc<ShopConfig>,
}

impl Shop {
    /// Create a shop without validating the configuration
    pub fn new(config: ShopConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Create a shop, rejecting an invalid configuration
    pub fn try_new(config: ShopConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Load the configuration from the default environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ShopConfig::from_env()?))
    }

    /// Shop configuration
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Shop id
    pub fn shop_id(&self) -> i64 {
        self.config.shop_id
    }

    /// Create a payment bound to this shop with no user variables
    pub fn new_payment(
        &self,
        id: impl Into<BigInt>,
        currency_id: i64,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Payment {
        Payment::new(
            Arc::clone(&self.config),
            id.into(),
            currency_id,
            amount,
            description.into(),
        )
    }

    /// Verify an inbound notification and extract its fields.
    ///
    /// Every field except `sign` takes part in the signature, including ones
    /// this library does not interpret. The caller's map is left untouched.
    pub fn verify_notification(&self, variables: &HashMap<String, String>) -> Result<Notification> {
        let supplied = variables
            .get(fields::SIGN)
            .ok_or(PrimePayerError::SignatureMissing)?;

        let mut signed = variables.clone();
        signed.remove(fields::SIGN);

        let computed = canonical::digest(&signed, &self.config.secret);
        if !signature::signatures_match(&computed, supplied) {
            return Err(PrimePayerError::SignatureMismatch);
        }

        let payment_id = parse_payment_id(&signed, fields::PAYMENT)?;
        let system_payment_id = parse_payment_id(&signed, fields::SYSTEM_PAYMENT)?;
        let amount = parse_amount(field(&signed, fields::AMOUNT))?;
        let currency_id = parse_optional_int(&signed, fields::CURRENCY);
        let shop_id = parse_optional_int(&signed, fields::SHOP);

        let user_variables = signed
            .iter()
            .filter_map(|(key, value)| {
                strip_user_variable_prefix(key).map(|name| (name.to_string(), value.clone()))
            })
            .collect();

        tracing::debug!(
            shop_id = self.config.shop_id,
            payment_id = %payment_id,
            system_payment_id = %system_payment_id,
            "notification verified"
        );

        Ok(Notification {
            payment_id,
            system_payment_id,
            currency_id,
            amount,
            shop_id,
            user_variables,
        })
    }

    /// Decode an `application/x-www-form-urlencoded` body and verify it.
    ///
    /// A repeated field keeps its last value.
    pub fn verify_notification_form(&self, body: &[u8]) -> Result<Notification> {
        let variables: HashMap<String, String> =
            url::form_urlencoded::parse(body).into_owned().collect();
        self.verify_notification(&variables)
    }
}

fn field<'a>(variables: &'a HashMap<String, String>, name: &str) -> &'a str {
    variables.get(name).map(String::as_str).unwrap_or_default()
}

fn parse_payment_id(variables: &HashMap<String, String>, name: &str) -> Result<BigInt> {
    let value = field(variables, name);
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PrimePayerError::invalid_payment_id(name, value));
    }
    BigInt::parse_bytes(value.as_bytes(), 10)
        .ok_or_else(|| PrimePayerError::invalid_payment_id(name, value))
}

fn parse_amount(value: &str) -> Result<Decimal> {
    if value.contains('_') {
        return Err(PrimePayerError::invalid_amount(
            value,
            rust_decimal::Error::ErrorString("unexpected '_' in amount".to_string()),
        ));
    }

    let amount = match Decimal::from_str(value) {
        Ok(amount) => amount,
        Err(err) if value.contains(['e', 'E']) => Decimal::from_scientific(value)
            .map_err(|_| PrimePayerError::invalid_amount(value, err))?,
        Err(err) => return Err(PrimePayerError::invalid_amount(value, err)),
    };

    if amount.normalize().scale() < significant_scale(value) {
        return Err(PrimePayerError::invalid_amount(
            value,
            rust_decimal::Error::ScaleExceedsMaximumPrecision(significant_scale(value)),
        ));
    }
    Ok(amount)
}

/// Fractional digits needed to represent `value` exactly, ignoring trailing zeros
fn significant_scale(value: &str) -> u32 {
    let (mantissa, exponent) = match value.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().unwrap_or(0)),
        None => (value, 0),
    };
    let fraction = mantissa
        .split_once('.')
        .map_or("", |(_, fraction)| fraction.trim_end_matches('0'));
    let scale = fraction.len() as i64 - exponent;
    u32::try_from(scale.max(0)).unwrap_or(u32::MAX)
}

/// Informational integer field; a malformed value is treated as absent
fn parse_optional_int(variables: &HashMap<String, String>, name: &str) -> Option<i64> {
    let value = variables.get(name)?;
    match value.parse::<i64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::debug!(field = name, "ignoring non-integer notification field");
            None
        }
    }
}
