// Property-based tests for request and callback signatures
//
// - invoice signature is md5(merchantCode + orderId + amount + key)
// - callbacks signed with the merchant key always verify
// - any change to a signed callback field is rejected

use duitku::{AppError, CallbackValidator, DuitkuClient, Environment, SignatureAlgorithm};
use proptest::prelude::*;
use serde_json::json;

const MERCHANT_CODE: &str = "D1234";
const MERCHANT_KEY: &str = "test_merchant_key";

fn order_id() -> impl Strategy<Value = String> {
    "[A-Za-z0-9-]{1,50}"
}

proptest! {
    #[test]
    fn test_invoice_signature_is_fixed_concatenation(
        order_id in order_id(),
        amount in 10_000u64..1_000_000_000u64,
    ) {
        let client = DuitkuClient::new(MERCHANT_KEY, MERCHANT_CODE, Environment::Sandbox);
        let concatenated = format!("{}{}{}{}", MERCHANT_CODE, order_id, amount, MERCHANT_KEY);
        let expected = SignatureAlgorithm::Md5.sign(&[concatenated.as_str()]);

        prop_assert_eq!(client.invoice_signature(&order_id, amount), expected);
    }

    #[test]
    fn test_signed_callbacks_verify(
        order_id in order_id(),
        amount in 1u64..1_000_000_000u64,
    ) {
        let validator = CallbackValidator::new(MERCHANT_KEY, MERCHANT_CODE);
        let amount = amount.to_string();
        let signature = SignatureAlgorithm::Md5.sign(&[MERCHANT_CODE, amount.as_str(), order_id.as_str(), MERCHANT_KEY]);

        let body = json!({
            "merchantCode": MERCHANT_CODE,
            "amount": amount,
            "merchantOrderId": order_id,
            "signature": signature,
        });

        let fields = validator.handle_callback(body.to_string().as_bytes()).unwrap();
        prop_assert_eq!(serde_json::Value::Object(fields), body);
    }

    #[test]
    fn test_modified_callback_amount_rejected(
        order_id in order_id(),
        amount in 1u64..1_000_000_000u64,
        delta in 1u64..1_000u64,
    ) {
        let validator = CallbackValidator::new(MERCHANT_KEY, MERCHANT_CODE);
        let signature = validator.expected_signature(&amount.to_string(), &order_id);

        let body = json!({
            "merchantCode": MERCHANT_CODE,
            "amount": (amount + delta).to_string(),
            "merchantOrderId": order_id,
            "signature": signature,
        });

        let result = validator.handle_callback(body.to_string().as_bytes());
        prop_assert!(matches!(result, Err(AppError::InvalidSignature)));
    }
}
