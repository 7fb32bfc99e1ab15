//! Wire-level field names and the field set builder

use std::collections::HashMap;

/// Field names used on the wire
pub mod fields {
    /// Payment id in the merchant's system
    pub const PAYMENT: &str = "payment";
    /// Payment id assigned by the gateway (notifications only)
    pub const SYSTEM_PAYMENT: &str = "systemPayment";
    /// Currency code
    pub const CURRENCY: &str = "currency";
    /// Decimal amount
    pub const AMOUNT: &str = "amount";
    /// Human-readable description
    pub const DESCRIPTION: &str = "description";
    /// Gateway selector
    pub const VIA: &str = "via";
    /// Redirect on successful payment
    pub const SUCCESS: &str = "success";
    /// Redirect on failed payment
    pub const FAIL: &str = "fail";
    /// Shop id
    pub const SHOP: &str = "shop";
    /// Signature
    pub const SIGN: &str = "sign";
}

/// Well-known currency codes
pub mod currencies {
    /// Russian ruble
    pub const RUB: i64 = 3;
}

/// Prefix carried by user variables on the wire
pub const USER_VARIABLE_PREFIX: &str = "uv_";

/// Wire name for a user variable
pub fn user_variable_field(name: &str) -> String {
    format!("{}{}", USER_VARIABLE_PREFIX, name)
}

/// User variable name for a wire field, if the field carries the prefix
pub fn strip_user_variable_prefix(field: &str) -> Option<&str> {
    field.strip_prefix(USER_VARIABLE_PREFIX)
}

/// Builder for a canonical field set.
///
/// Optional fields are only added when non-empty, so "absent" and
/// "present but empty" stay distinct signed states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: HashMap<String, String>,
}

impl FieldSet {
    /// Create an empty field set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field unconditionally
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.fields.insert(name.into(), value.to_string());
        self
    }

    /// Add a field only when `value` is non-empty
    pub fn with_non_empty(self, name: impl Into<String>, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.with(name, value)
        }
    }

    /// Add every user variable under its prefixed wire name
    pub fn with_user_variables<'a, I>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (name, value) in variables {
            self.fields.insert(user_variable_field(name), value.clone());
        }
        self
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the set has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.fields
    }

    /// Take the underlying map
    pub fn into_map(self) -> HashMap<String, String> {
        self.fields
    }
}
