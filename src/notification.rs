//! Verified inbound payment notifications

use num_bigint::BigInt;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// A payment notification whose signature has been checked.
///
/// Only [`crate::Shop::verify_notification`] constructs one; it never changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub(crate) payment_id: BigInt,
    pub(crate) system_payment_id: BigInt,
    pub(crate) currency_id: Option<i64>,
    pub(crate) amount: Decimal,
    pub(crate) shop_id: Option<i64>,
    pub(crate) user_variables: HashMap<String, String>,
}

impl Notification {
    /// Payment id in the merchant's system (`payment`)
    pub fn payment_id(&self) -> &BigInt {
        &self.payment_id
    }

    /// Payment id assigned by the gateway (`systemPayment`)
    pub fn system_payment_id(&self) -> &BigInt {
        &self.system_payment_id
    }

    /// Currency code, when the gateway sent one (`currency`)
    pub fn currency_id(&self) -> Option<i64> {
        self.currency_id
    }

    /// Amount (`amount`)
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Shop id, when the gateway sent one (`shop`)
    pub fn shop_id(&self) -> Option<i64> {
        self.shop_id
    }

    /// User variable by name, without the wire prefix
    pub fn get(&self, key: &str) -> Option<&str> {
        self.user_variables.get(key).map(String::as_str)
    }

    /// All user variables
    pub fn user_variables(&self) -> &HashMap<String, String> {
        &self.user_variables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let mut user_variables = HashMap::new();
        user_variables.insert("user_id".to_string(), "123456".to_string());

        let notification = Notification {
            payment_id: BigInt::from(42),
            system_payment_id: BigInt::from(1042),
            currency_id: Some(3),
            amount: Decimal::new(1503, 1),
            shop_id: None,
            user_variables,
        };

        assert_eq!(notification.payment_id(), &BigInt::from(42));
        assert_eq!(notification.system_payment_id(), &BigInt::from(1042));
        assert_eq!(notification.currency_id(), Some(3));
        assert_eq!(notification.amount().to_string(), "150.3");
        assert_eq!(notification.shop_id(), None);
        assert_eq!(notification.get("user_id"), Some("123456"));
        assert_eq!(notification.get("uv_user_id"), None);
        assert_eq!(notification.user_variables().len(), 1);
    }
}
