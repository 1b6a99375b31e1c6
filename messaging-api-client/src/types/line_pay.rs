// messaging-api-client/src/types/line_pay.rs
use chrono::{DateTime, Utc};
use messaging_api_common::{OperationError, OperationResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// LINE Pay transaction id.
///
/// The API sends these as 19-digit JSON numbers; strings are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for TransactionId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    USD,
    JPY,
    TWD,
    THB,
}

/// Amounts are sent as integers when they have no fractional part
mod amount {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if amount.fract() == 0.0 && amount.abs() < 9.0e15 {
            serializer.serialize_i64(*amount as i64)
        } else {
            serializer.serialize_f64(*amount)
        }
    }

    pub fn serialize_opt<S: Serializer>(
        amount: &Option<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match amount {
            Some(amount) => serialize(amount, serializer),
            None => serializer.serialize_none(),
        }
    }
}

/// Identifies the payment(s) to look up; at least one field must be set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentLookup {
    pub transaction_id: Option<TransactionId>,
    pub order_id: Option<String>,
}

impl PaymentLookup {
    pub fn by_transaction_id(id: impl Into<TransactionId>) -> Self {
        Self {
            transaction_id: Some(id.into()),
            order_id: None,
        }
    }

    pub fn by_order_id(id: impl Into<String>) -> Self {
        Self {
            transaction_id: None,
            order_id: Some(id.into()),
        }
    }

    /// Query parameters for the lookup; unset fields are left out
    pub(crate) fn to_query(&self, operation: &str) -> OperationResult<Vec<(String, String)>> {
        if self.transaction_id.is_none() && self.order_id.is_none() {
            return Err(OperationError::invalid_argument(format!(
                "{}: One of `transaction_id` or `order_id` must be provided",
                operation
            )));
        }

        let mut query = Vec::new();
        if let Some(id) = &self.transaction_id {
            query.push(("transactionId".to_string(), id.to_string()));
        }
        if let Some(id) = &self.order_id {
            query.push(("orderId".to_string(), id.clone()));
        }
        Ok(query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfirmUrlType {
    /// The user is redirected to `confirm_url` in the browser
    Client,
    /// LINE Pay calls `confirm_url` server-to-server
    Server,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PayType {
    Normal,
    /// Registers the payment for later automatic payments
    Preapproved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LangCode {
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "ko")]
    Ko,
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-Hans")]
    ZhHans,
    #[serde(rename = "zh-Hant")]
    ZhHant,
    #[serde(rename = "th")]
    Th,
}

/// Optional parameters of a payment reservation
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveOptions {
    /// Product image shown on the payment screen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image_url: Option<String>,
    /// LINE member id, for payments tied to a known user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid: Option<String>,
    /// One-time key read from the user's LINE Pay QR/barcode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_time_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_url_type: Option<ConfirmUrlType>,
    /// Require the confirm URL to open in the browser that started the payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_confirm_url_browser: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    /// Android package name, for app-to-app payments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_place_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_type: Option<PayType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang_cd: Option<LangCode>,
    /// `false` only authorizes; capture later with `LinePay::capture`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest {
    pub product_name: String,
    #[serde(serialize_with = "amount::serialize")]
    pub amount: f64,
    pub currency: Currency,
    pub confirm_url: String,
    pub order_id: String,
    #[serde(flatten)]
    pub options: ReserveOptions,
}

impl ReserveRequest {
    pub fn new(
        product_name: impl Into<String>,
        amount: f64,
        currency: Currency,
        confirm_url: impl Into<String>,
        order_id: impl Into<String>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            amount,
            currency,
            confirm_url: confirm_url.into(),
            order_id: order_id.into(),
            options: ReserveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReserveOptions) -> Self {
        self.options = options;
        self
    }
}

/// Body of confirm and capture requests
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConfirmRequest {
    #[serde(serialize_with = "amount::serialize")]
    pub amount: f64,
    pub currency: Currency,
}

impl ConfirmRequest {
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self { amount, currency }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundOptions {
    /// Partial refund amount; the full amount is refunded when unset
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "amount::serialize_opt"
    )]
    pub refund_amount: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUrl {
    pub web: String,
    pub app: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveInfo {
    pub transaction_id: TransactionId,
    pub payment_url: PaymentUrl,
    pub payment_access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayInfo {
    pub method: String,
    pub amount: f64,
    #[serde(default)]
    pub credit_card_nickname: Option<String>,
    #[serde(default)]
    pub credit_card_brand: Option<String>,
}

/// Result of confirm and capture
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmInfo {
    pub order_id: String,
    pub transaction_id: TransactionId,
    #[serde(default)]
    pub pay_info: Vec<PayInfo>,
    /// Key for preapproved payments, when `PayType::Preapproved` was used
    #[serde(default)]
    pub reg_key: Option<String>,
    #[serde(default)]
    pub authorization_expire_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundInfo {
    pub refund_transaction_id: TransactionId,
    pub refund_transaction_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundDetail {
    pub refund_transaction_id: TransactionId,
    pub transaction_type: String,
    pub refund_amount: f64,
    pub refund_transaction_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetail {
    pub transaction_id: TransactionId,
    pub transaction_date: DateTime<Utc>,
    pub transaction_type: String,
    pub product_name: String,
    pub currency: Currency,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub pay_info: Vec<PayInfo>,
    #[serde(default)]
    pub refund_list: Vec<RefundDetail>,
    /// Set on refund transactions
    #[serde(default)]
    pub original_transaction_id: Option<TransactionId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationDetail {
    pub transaction_id: TransactionId,
    pub transaction_date: DateTime<Utc>,
    pub transaction_type: String,
    /// AUTHORIZATION, VOIDED_AUTHORIZATION or EXPIRED_AUTHORIZATION
    pub pay_status: String,
    pub product_name: String,
    pub currency: Currency,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub pay_info: Vec<PayInfo>,
    #[serde(default)]
    pub authorization_expire_date: Option<DateTime<Utc>>,
}
