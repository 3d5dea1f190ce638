// service/payment_provider.rs
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use crate::{config::Config, service::error::ServiceError};

type HmacSha512 = Hmac<Sha512>;

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentInitResponse {
    pub payment_url: String,
    pub access_code: String,
    pub reference: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub status: String,
    pub amount: i64,
    pub gateway_reference: String,
    pub paid_at: String,
    pub channel: String,
}

/// Thin Paystack client. Amounts cross the wire in minor units already,
/// so no currency conversion happens here.
pub struct PaymentProviderService {
    paystack_secret_key: String,
    client: reqwest::Client,
}

impl PaymentProviderService {
    pub fn new(config: &Config) -> Self {
        Self {
            paystack_secret_key: config.paystack_secret_key.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn initialize_payment(
        &self,
        email: String,
        amount: i64,
        reference: String,
    ) -> Result<PaymentInitResponse, ServiceError> {
        let payload = serde_json::json!({
            "email": email,
            "amount": amount,
            "reference": reference,
            "currency": "NGN",
            "channels": ["card", "bank", "ussd", "qr", "mobile_money", "bank_transfer"]
        });

        let response = self
            .client
            .post("https://api.paystack.co/transaction/initialize")
            .header("Authorization", format!("Bearer {}", self.paystack_secret_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| ServiceError::Gateway(e.to_string()))?;

        let response_body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ServiceError::Gateway(e.to_string()))?;

        if response_body["status"].as_bool().unwrap_or(false) {
            let data = &response_body["data"];
            Ok(PaymentInitResponse {
                payment_url: data["authorization_url"].as_str().unwrap_or("").to_string(),
                access_code: data["access_code"].as_str().unwrap_or("").to_string(),
                reference: data["reference"].as_str().unwrap_or("").to_string(),
            })
        } else {
            let message = response_body["message"]
                .as_str()
                .unwrap_or("Payment initialization failed");
            Err(ServiceError::Gateway(message.to_string()))
        }
    }

    pub async fn verify_payment(&self, reference: &str) -> Result<PaymentVerification, ServiceError> {
        let url = format!("https://api.paystack.co/transaction/verify/{}", reference);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.paystack_secret_key))
            .send()
            .await
            .map_err(|e| ServiceError::Gateway(e.to_string()))?;

        let response_body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ServiceError::Gateway(e.to_string()))?;

        if response_body["status"].as_bool().unwrap_or(false) {
            let data = &response_body["data"];

            if data["status"].as_str() == Some("success") {
                Ok(PaymentVerification {
                    status: "success".to_string(),
                    amount: data["amount"].as_i64().unwrap_or(0),
                    gateway_reference: data["reference"].as_str().unwrap_or("").to_string(),
                    paid_at: data["paid_at"].as_str().unwrap_or("").to_string(),
                    channel: data["channel"].as_str().unwrap_or("").to_string(),
                })
            } else {
                Err(ServiceError::Gateway("Payment not successful".to_string()))
            }
        } else {
            let message = response_body["message"].as_str().unwrap_or("Verification failed");
            Err(ServiceError::Gateway(message.to_string()))
        }
    }

    /// Check the `x-paystack-signature` header against the raw body. The
    /// signature is the hex HMAC-SHA512 of the body under the secret key,
    /// compared constant-time.
    pub fn verify_webhook_signature(&self, body: &[u8], signature: &str) -> bool {
        verify_signature(&self.paystack_secret_key, body, signature)
    }
}

fn verify_signature(secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(mut mac) = HmacSha512::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    let expected = hex::encode(mac.finalize().into_bytes());

    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_signature_roundtrip() {
        let secret = "sk_test_secret";
        let body = br#"{"event":"charge.success","data":{"reference":"PN-20250101-ABCDEFGHIJ"}}"#;

        let mut mac = HmacSha512::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        let signature = hex::encode(mac.finalize().into_bytes());

        assert!(verify_signature(secret, body, &signature));
    }

    #[test]
    fn test_webhook_signature_rejects_tampering() {
        let secret = "sk_test_secret";
        let body = br#"{"event":"charge.success"}"#;

        let mut mac = HmacSha512::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body.as_slice());
        let signature = hex::encode(mac.finalize().into_bytes());

        assert!(!verify_signature(secret, br#"{"event":"charge.failed"}"#, &signature));
        assert!(!verify_signature("sk_other_secret", body, &signature));
        assert!(!verify_signature(secret, body, "deadbeef"));
    }
}
