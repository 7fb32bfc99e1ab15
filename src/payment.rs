//! Outbound payment requests

use crate::config::ShopConfig;
use crate::crypto::canonical;
use crate::types::{fields, FieldSet};
use num_bigint::BigInt;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// A payment request to be signed and sent to the gateway.
///
/// Created through [`crate::Shop::new_payment`]. User variables can be set
/// and read concurrently through a shared reference; every call takes the
/// lock only for its own duration.
pub struct Payment {
    /// Payment id in the merchant's system, must not repeat (`payment`)
    pub id: BigInt,
    /// Currency code (`currency`)
    pub currency_id: i64,
    /// Amount (`amount`)
    pub amount: Decimal,
    /// Description, signed only when non-empty (`description`)
    pub description: String,
    /// Gateway selector, signed only when non-empty (`via`)
    pub via: String,
    /// Redirect after successful payment, if the shop allows it (`success`)
    pub success_url: String,
    /// Redirect after failed payment, if the shop allows it (`fail`)
    pub fail_url: String,

    user_variables: RwLock<HashMap<String, String>>,
    shop: Arc<ShopConfig>,
}

impl fmt::Debug for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payment")
            .field("id", &self.id)
            .field("currency_id", &self.currency_id)
            .field("amount", &self.amount)
            .field("description", &self.description)
            .field("via", &self.via)
            .field("success_url", &self.success_url)
            .field("fail_url", &self.fail_url)
            .field("user_variables", &*self.user_variables.read())
            .field("shop_id", &self.shop.shop_id)
            .finish()
    }
}

impl Payment {
    pub(crate) fn new(
        shop: Arc<ShopConfig>,
        id: BigInt,
        currency_id: i64,
        amount: Decimal,
        description: String,
    ) -> Self {
        Self {
            id,
            currency_id,
            amount,
            description,
            via: String::new(),
            success_url: String::new(),
            fail_url: String::new(),
            user_variables: RwLock::new(HashMap::new()),
            shop,
        }
    }

    /// Set the gateway selector
    pub fn with_via(mut self, via: impl Into<String>) -> Self {
        self.via = via.into();
        self
    }

    /// Set the success redirect URL
    pub fn with_success_url(mut self, url: impl Into<String>) -> Self {
        self.success_url = url.into();
        self
    }

    /// Set the fail redirect URL
    pub fn with_fail_url(mut self, url: impl Into<String>) -> Self {
        self.fail_url = url.into();
        self
    }

    /// Set a user variable. The value is stored as its `Display` text; last
    /// write wins.
    pub fn set(&self, key: impl Into<String>, value: impl fmt::Display) {
        let value = value.to_string();
        self.user_variables.write().insert(key.into(), value);
    }

    /// Get a user variable
    pub fn get(&self, key: &str) -> Option<String> {
        self.user_variables.read().get(key).cloned()
    }

    /// Snapshot of all user variables
    pub fn user_variables(&self) -> HashMap<String, String> {
        self.user_variables.read().clone()
    }

    /// Id of the shop this payment belongs to
    pub fn shop_id(&self) -> i64 {
        self.shop.shop_id
    }

    /// The canonical field set that [`Payment::sign`] hashes
    pub fn signed_fields(&self) -> HashMap<String, String> {
        let set = FieldSet::new()
            .with(fields::PAYMENT, &self.id)
            .with(fields::CURRENCY, self.currency_id)
            .with(fields::AMOUNT, self.amount.normalize())
            .with_non_empty(fields::DESCRIPTION, &self.description)
            .with_non_empty(fields::VIA, &self.via)
            .with_non_empty(fields::SUCCESS, &self.success_url)
            .with_non_empty(fields::FAIL, &self.fail_url)
            .with(fields::SHOP, self.shop.shop_id);

        let variables = self.user_variables.read();
        set.with_user_variables(variables.iter()).into_map()
    }

    /// Signature over the current state of the payment
    pub fn sign(&self) -> String {
        self.sign_fields(&self.signed_fields())
    }

    /// Signed fields plus the `sign` entry, ordered by name
    pub fn form_fields(&self) -> BTreeMap<String, String> {
        let signed = self.signed_fields();
        let signature = self.sign_fields(&signed);

        let mut form: BTreeMap<String, String> = signed.into_iter().collect();
        form.insert(fields::SIGN.to_string(), signature);
        form
    }

    fn sign_fields(&self, signed: &HashMap<String, String>) -> String {
        let signature = canonical::digest(signed, &self.shop.secret);
        tracing::debug!(
            shop_id = self.shop.shop_id,
            payment_id = %self.id,
            fields = signed.len(),
            "payment signed"
        );
        signature
    }

    /// `application/x-www-form-urlencoded` rendering of [`Payment::form_fields`]
    pub fn to_query(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.form_fields())
            .finish()
    }
}
