use messaging_api_client::types::line_pay::{
    ConfirmRequest, Currency, PaymentLookup, RefundOptions, ReserveOptions, ReserveRequest,
    TransactionId,
};
use messaging_api_client::{ErrorKind, LinePay, LinePayConfig};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, LinePay) {
    let server = MockServer::start().await;
    let config = LinePayConfig::new("1234567890", "channel-secret").with_origin(server.uri());
    (server, LinePay::new(&config))
}

#[tokio::test]
async fn reserve_sends_channel_headers() {
    let (server, line_pay) = setup().await;
    Mock::given(method("POST"))
        .and(path("/v2/payments/request"))
        .and(header("X-LINE-ChannelId", "1234567890"))
        .and(header("X-LINE-ChannelSecret", "channel-secret"))
        .and(body_json(json!({
            "productName": "Coffee",
            "amount": 80,
            "currency": "TWD",
            "confirmUrl": "https://shop.test/confirm",
            "orderId": "order-1",
            "capture": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "returnCode": "0000",
            "returnMessage": "OK",
            "info": {
                "transactionId": 2018123112345678910u64,
                "paymentUrl": {
                    "web": "https://sandbox-web-pay.line.me/web/payment/wait?transactionReserveId=abc",
                    "app": "line://pay/payment/abc"
                },
                "paymentAccessToken": "187568751124"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ReserveRequest::new("Coffee", 80.0, Currency::TWD, "https://shop.test/confirm", "order-1")
        .with_options(ReserveOptions {
            capture: Some(false),
            ..Default::default()
        });
    let info = line_pay.reserve(&request).await.unwrap().unwrap();

    assert_eq!(info.transaction_id.as_str(), "2018123112345678910");
    assert_eq!(info.payment_url.app, "line://pay/payment/abc");
}

#[tokio::test]
async fn get_payments_passes_lookup_as_query() {
    let (server, line_pay) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v2/payments"))
        .and(query_param("transactionId", "20140101123123123"))
        .and(query_param("orderId", "order-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "returnCode": "0000",
            "returnMessage": "success",
            "info": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = PaymentLookup {
        transaction_id: Some(TransactionId::from("20140101123123123")),
        order_id: Some("order-1".to_string()),
    };
    let payments = line_pay.get_payments(&lookup).await.unwrap();
    assert!(payments.is_empty());
}

#[tokio::test]
async fn missing_info_is_empty_list() {
    let (server, line_pay) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v2/payments/authorizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "returnCode": "0000",
            "returnMessage": "success"
        })))
        .mount(&server)
        .await;

    let authorizations = line_pay
        .get_authorizations(&PaymentLookup::by_order_id("order-1"))
        .await
        .unwrap();
    assert!(authorizations.is_empty());
}

#[tokio::test]
async fn return_code_failure_is_backend_rejection() {
    let (server, line_pay) = setup().await;
    Mock::given(method("POST"))
        .and(path("/v2/payments/T1/confirm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "returnCode": "1172",
            "returnMessage": "Existing same orderId."
        })))
        .mount(&server)
        .await;

    let err = line_pay
        .confirm(&TransactionId::from("T1"), ConfirmRequest::new(100.0, Currency::JPY))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BackendRejection);
    assert_eq!(err.message(), "LINE PAY API - 1172 Existing same orderId.");
    assert_eq!(err.code(), Some("1172"));
    assert_eq!(err.response().unwrap().status, 200);
}

#[tokio::test]
async fn partial_refund() {
    let (server, line_pay) = setup().await;
    Mock::given(method("POST"))
        .and(path("/v2/payments/T1/refund"))
        .and(body_json(json!({"refundAmount": 20})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "returnCode": "0000",
            "returnMessage": "OK",
            "info": {
                "refundTransactionId": 2018123112345678911u64,
                "refundTransactionDate": "2018-12-31T09:00:31Z"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = line_pay
        .refund(
            &TransactionId::from("T1"),
            RefundOptions {
                refund_amount: Some(20.0),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(info.refund_transaction_id.as_str(), "2018123112345678911");
}

#[tokio::test]
async fn server_error_without_envelope_is_transport_failure() {
    let (server, line_pay) = setup().await;
    Mock::given(method("POST"))
        .and(path("/v2/payments/authorizations/T1/void"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = line_pay.void(&TransactionId::from("T1")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TransportFailure);
    assert_eq!(err.message(), "Request failed with status code 503");
    assert_eq!(err.response().unwrap().status, 503);
}
