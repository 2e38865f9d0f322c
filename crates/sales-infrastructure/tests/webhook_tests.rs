//! Webhook delivery against a mock HTTP server

use std::time::Duration;

use sales_core::domain::{Integration, IntegrationProvider, IntegrationSettings};
use sales_core::error::DomainError;
use sales_core::services::{SaleNotification, WebhookSender};
use sales_infrastructure::HttpWebhookSender;
use sales_shared::config::WebhookSettings;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sender() -> HttpWebhookSender {
    HttpWebhookSender::new(&WebhookSettings { timeout_seconds: 5 }).unwrap()
}

fn integration(provider: IntegrationProvider, settings: IntegrationSettings) -> Integration {
    Integration::new(Uuid::new_v4(), provider, settings).unwrap()
}

fn sale() -> SaleNotification {
    SaleNotification {
        record_id: Uuid::new_v4(),
        member: "Sato".to_string(),
        amount: 300_000,
        display_amount: 30.0,
        date: "2024-06-01".to_string(),
        description: String::new(),
    }
}

#[tokio::test]
async fn slack_receives_rendered_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hooks/slack"))
        .and(body_json(json!({ "text": "Sato sold 300000" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let slack = integration(
        IntegrationProvider::Slack,
        IntegrationSettings {
            webhook_url: Some(format!("{}/hooks/slack", server.uri())),
            message_template: Some("{{member}} sold {{amount}}".to_string()),
            is_active: true,
            ..Default::default()
        },
    );

    sender().send_sale(&slack, &sale()).await.unwrap();
}

#[tokio::test]
async fn chatwork_posts_form_body_with_token_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rooms/42/messages"))
        .and(header("X-ChatWorkToken", "secret-token"))
        .and(body_string_contains("body=hello"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let chatwork = integration(
        IntegrationProvider::Chatwork,
        IntegrationSettings {
            webhook_url: Some(format!("{}/rooms/42/messages", server.uri())),
            api_token: Some("secret-token".to_string()),
            room_id: Some("42".to_string()),
            is_active: true,
            ..Default::default()
        },
    );

    sender().send_text(&chatwork, "hello").await.unwrap();
}

#[tokio::test]
async fn generic_payload_carries_the_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generic"))
        .and(body_partial_json(json!({ "record": { "member": "Sato", "amount": 300000 } })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let generic = integration(
        IntegrationProvider::Generic,
        IntegrationSettings {
            webhook_url: Some(format!("{}/generic", server.uri())),
            is_active: true,
            ..Default::default()
        },
    );

    sender().send_sale(&generic, &sale()).await.unwrap();
}

#[tokio::test]
async fn non_success_status_is_an_external_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let slack = integration(
        IntegrationProvider::Slack,
        IntegrationSettings {
            webhook_url: Some(server.uri()),
            is_active: true,
            ..Default::default()
        },
    );

    let err = sender().send_text(&slack, "ping").await.unwrap_err();
    assert!(matches!(err, DomainError::ExternalService(_)));
}

#[tokio::test]
async fn slow_endpoint_hits_the_configured_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let slack = integration(
        IntegrationProvider::Slack,
        IntegrationSettings {
            webhook_url: Some(server.uri()),
            is_active: true,
            ..Default::default()
        },
    );

    let impatient = HttpWebhookSender::new(&WebhookSettings { timeout_seconds: 1 }).unwrap();
    let err = impatient.send_text(&slack, "ping").await.unwrap_err();
    assert!(matches!(err, DomainError::ExternalService(_)));
}
