use std::time::Duration;

use serde_json::json;
use smsir::{
    ApiKey, HttpMethod, LastHours, MessageId, Mobile, SendTime, SentPage, SmsIrClient, SmsIrError,
    TemplateId, TemplateParameters, VerifySms,
};
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SmsIrClient {
    SmsIrClient::builder(ApiKey::new("test-key").unwrap())
        .base_url(format!("{}/v1", server.uri()))
        .build()
        .unwrap()
}

fn verify_sms(mobile: &str, code: &str) -> VerifySms {
    VerifySms::new(
        Mobile::new(mobile).unwrap(),
        TemplateId::new(12345),
        TemplateParameters::single("CODE", code).unwrap(),
    )
}

#[tokio::test]
async fn check_credit_extracts_credit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/credit"))
        .and(header("x-api-key", "test-key"))
        .and(header("accept", "text/plain"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"credit": 1500})))
        .expect(1)
        .mount(&server)
        .await;

    let credit = client_for(&server).check_credit().await.unwrap();
    assert_eq!(credit, Some(json!(1500)));
}

#[tokio::test]
async fn every_verb_carries_the_api_key() {
    let server = MockServer::start().await;

    for verb in ["GET", "POST", "DELETE"] {
        Mock::given(method(verb))
            .and(path("/v1/echo"))
            .and(header("x-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": verb})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    for (verb, body) in [
        (HttpMethod::Get, None),
        (HttpMethod::Post, Some(json!({"x": 1}))),
        (HttpMethod::Delete, None),
    ] {
        let value = client.dispatch(verb, "echo", body).await.unwrap();
        assert_eq!(value, json!({"ok": verb.as_str()}));
    }
}

#[tokio::test]
async fn send_sms_posts_vendor_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/send/verify"))
        .and(header("x-api-key", "test-key"))
        .and(body_json(json!({
            "mobile": "09123456789",
            "templateId": 12345,
            "parameters": [{"name": "CODE", "value": "000000"}]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": 1, "data": {"messageId": 777, "cost": 1.0}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .send_sms(verify_sms("09123456789", "000000"))
        .await
        .unwrap();
    assert_eq!(response, json!({"status": 1, "data": {"messageId": 777, "cost": 1.0}}));
}

#[tokio::test]
async fn non_success_status_is_reported_with_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/sms/status/42"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_sms_status(&MessageId::new("42").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert!(err.to_string().starts_with("APIError 404: "));
}

#[tokio::test]
async fn timeout_is_reported_without_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/credit"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"credit": 1}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = SmsIrClient::builder(ApiKey::new("test-key").unwrap())
        .base_url(format!("{}/v1", server.uri()))
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let err = client
        .dispatch(HttpMethod::Get, "credit", None)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), None);
    assert!(err.to_string().starts_with("APIError: "));
}

#[tokio::test]
async fn refused_connection_is_reported_without_code() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = SmsIrClient::builder(ApiKey::new("test-key").unwrap())
        .base_url(format!("http://127.0.0.1:{port}/v1"))
        .build()
        .unwrap();

    let err = client.check_credit().await.unwrap_err();
    assert!(matches!(err, SmsIrError::Api(_)));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn bulk_send_reports_each_recipient() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/send/verify"))
        .and(body_partial_json(json!({"mobile": "09120000001"})))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/send/verify"))
        .and(body_partial_json(json!({"mobile": "09120000002"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let a = Mobile::new("09120000001").unwrap();
    let b = Mobile::new("09120000002").unwrap();
    let results = client_for(&server)
        .send_bulk_sms(
            vec![a.clone(), b.clone()],
            TemplateId::new(12345),
            TemplateParameters::single("CODE", "111111").unwrap(),
        )
        .await;

    assert_eq!(results[&a].as_ref().unwrap_err().status_code(), Some(500));
    assert_eq!(results[&b].as_ref().unwrap(), &json!({"status": 1}));
}

#[tokio::test]
async fn schedule_and_cancel_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/send/schedule"))
        .and(body_partial_json(json!({"sendDateTime": "2030-01-02 03:04:05"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "555"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/sms/schedule/555"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cancelled": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let scheduled = client
        .schedule_sms(
            verify_sms("09123456789", "000000").at(SendTime::parse("2030-01-02 03:04:05").unwrap()),
        )
        .await
        .unwrap();
    let id = MessageId::new(scheduled["id"].as_str().unwrap()).unwrap();

    let cancelled = client.cancel_scheduled_sms(&id).await.unwrap();
    assert_eq!(cancelled, json!({"cancelled": true}));
}

#[tokio::test]
async fn listings_pass_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/sms/sent"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"messages": [{"id": 1}, {"id": 2}]})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/sms/reports"))
        .and(query_param("last_hours", "24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let sent = client
        .get_sent_messages(SentPage::new(2, 5).unwrap())
        .await
        .unwrap();
    assert_eq!(sent.len(), 2);

    let recent = client
        .get_recent_sms_reports(LastHours::default())
        .await
        .unwrap();
    assert!(recent.is_empty());
}

#[tokio::test]
async fn check_invalid_numbers_and_send_test() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/sms/check-invalid"))
        .and(body_json(json!({"numbers": ["09123456789", "09351234567"]})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"invalid_numbers": ["09351234567"]})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/sms/send-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 1})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/sms/delivery/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "delivered"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let invalid = client
        .check_invalid_numbers(&[
            Mobile::new("09123456789").unwrap(),
            Mobile::new("09351234567").unwrap(),
        ])
        .await
        .unwrap();
    assert_eq!(invalid, vec![json!("09351234567")]);

    let response = client
        .send_test_sms(verify_sms("09123456789", "999999"))
        .await
        .unwrap();
    assert_eq!(response, json!({"status": 1}));

    let delivery = client
        .get_delivery_report(&MessageId::new("9").unwrap())
        .await
        .unwrap();
    assert_eq!(delivery, Some(json!("delivered")));
}
