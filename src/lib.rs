//! # primepayer - PrimePayer gateway signatures
//!
//! Client-side signing and verification for the PrimePayer payment gateway.
//! A [`Shop`] creates [`Payment`] requests whose signature is attached to the
//! outbound request, and verifies the signature of inbound [`Notification`]s.
//! Transport is left to the caller.
//!
//! ```
//! use primepayer::{Shop, ShopConfig};
//! use rust_decimal::Decimal;
//!
//! let shop = Shop::new(ShopConfig::new(1, "f6482bd9a166bf2s43ssc9fe60eb4774"));
//! let payment = shop.new_payment(1, 3, Decimal::from(5), "Оплата товара");
//! payment.set("user_id", 123456);
//!
//! assert_eq!(
//!     payment.sign(),
//!     "771fd70dfa04179cfde68293d3737ed41854efe060a7bd620bdb28f85bd7a18e"
//! );
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod notification;
pub mod payment;
pub mod shop;
pub mod types;

// Re-exports for convenience
pub use config::ShopConfig;
pub use error::{PrimePayerError, Result};
pub use notification::Notification;
pub use payment::Payment;
pub use shop::Shop;
pub use types::{fields, USER_VARIABLE_PREFIX};

/// Current version of the primepayer library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_version_constant() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Shop>();
        assert_send_sync::<Payment>();
        assert_send_sync::<Notification>();
    }

    #[test]
    fn test_sign_then_verify() {
        let shop = Shop::new(ShopConfig::new(5, "secret"));
        let payment = shop.new_payment(99, types::currencies::RUB, Decimal::new(1999, 2), "");
        payment.set("order", "A-17");

        // The gateway answers with the fields it was given, plus its own id.
        let mut variables = payment.signed_fields();
        variables.insert(fields::SYSTEM_PAYMENT.to_string(), "700".to_string());
        let sign = crypto::canonical::digest(&variables, "secret");
        variables.insert(fields::SIGN.to_string(), sign);

        let notification = shop.verify_notification(&variables).unwrap();
        assert_eq!(notification.payment_id(), &payment.id);
        assert_eq!(notification.amount(), payment.amount);
        assert_eq!(notification.shop_id(), Some(5));
        assert_eq!(notification.get("order"), Some("A-17"));
    }
}
