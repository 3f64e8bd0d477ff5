use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use emyux_shared::{validate, Catalog, ContactForm, ContactReceipt, Locale};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::handlers::client_ip::ClientIp;
use crate::utils::notifier::ContactSubmission;
use crate::AppState;

#[derive(Deserialize, Default)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

/// `?locale=` wins, then `Accept-Language`, then the site default.
pub fn request_locale(query: &LocaleQuery, headers: &HeaderMap) -> Locale {
    if let Some(locale) = query.locale.as_deref().and_then(Locale::parse) {
        return locale;
    }
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|h| h.to_str().ok())
        .map(Locale::negotiate)
        .unwrap_or(Locale::DEFAULT)
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ClientIp(client_ip): ClientIp,
    Query(query): Query<LocaleQuery>,
    headers: HeaderMap,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<ContactReceipt>, (StatusCode, Json<Value>)> {
    let Json(form) = payload.map_err(|e| {
        tracing::debug!("Malformed contact payload: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid request body"})),
        )
    })?;

    let locale = request_locale(&query, &headers);
    let request = validate(&form).map_err(|errors| {
        tracing::debug!("Contact request from {} failed validation on {} field(s)", client_ip, errors.len());
        let text = Catalog::for_locale(locale).scoped("ContactModal");
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "Validation failed",
                "fields": errors.messages(&text),
            })),
        )
    })?;

    // only requests that would be delivered spend the client's budget
    if state.contact_limiter.check_key(&client_ip).is_err() {
        tracing::warn!("Contact rate limit exceeded for {}", client_ip);
        return Err((
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error": "Too many contact requests. Please try again later."})),
        ));
    }

    let submission = ContactSubmission {
        reference: uuid::Uuid::new_v4().to_string(),
        request,
        locale,
        received_at: Utc::now(),
    };
    tracing::info!(
        "Contact request {} received ({}, {})",
        submission.reference,
        submission.request.project_type,
        locale
    );

    match tokio::time::timeout(state.delivery_timeout, state.notifier.notify(&submission)).await {
        Ok(Ok(())) => Ok(Json(ContactReceipt {
            status: "received".to_string(),
            reference: submission.reference,
        })),
        Ok(Err(e)) => {
            tracing::error!("Failed to deliver contact request {}: {}", submission.reference, e);
            sentry::capture_message(
                &format!("Contact delivery failed: {}", e),
                sentry::Level::Error,
            );
            Err((
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "Failed to deliver contact request"})),
            ))
        }
        Err(_) => {
            tracing::error!(
                "Delivery of contact request {} timed out after {:?}",
                submission.reference,
                state.delivery_timeout
            );
            Err((
                StatusCode::GATEWAY_TIMEOUT,
                Json(json!({"error": "Contact delivery timed out"})),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::utils::notifier::{ContactNotifier, MockContactNotifier, NotifyError};
    use crate::{build_router, AppState};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use emyux_shared::{ProjectType, TextProvider};
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_config(delivery_timeout: Duration) -> ServerConfig {
        ServerConfig {
            port: 0,
            frontend_url: "http://localhost:8080".into(),
            static_dir: "does-not-exist".into(),
            delivery_timeout,
            smtp: None,
            sentry_dsn: None,
            environment: "development".into(),
            trust_proxy: true,
        }
    }

    fn app_with(notifier: impl ContactNotifier + 'static, delivery_timeout: Duration) -> Router {
        let config = test_config(delivery_timeout);
        let state = Arc::new(AppState::new(Arc::new(notifier), &config));
        build_router(state, &config)
    }

    fn valid_body() -> Value {
        json!({
            "name": "Jordi",
            "email": "jordi@example.com",
            "projectType": "WEBSITE",
            "timeline": "1-3_MONTHS",
            "description": "A booking system for our two physiotherapy clinics."
        })
    }

    fn contact_request(body: &Value, query: &str, ip: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/api/contact{}", query))
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-forwarded-for", ip)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn valid_request_is_delivered_and_acknowledged() {
        let mut notifier = MockContactNotifier::new();
        notifier
            .expect_notify()
            .withf(|s| s.request.project_type == ProjectType::Website && s.locale == Locale::Es)
            .times(1)
            .returning(|_| Ok(()));
        let app = app_with(notifier, Duration::from_secs(10));

        let response = app
            .oneshot(contact_request(&valid_body(), "", "10.0.0.1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "received");
        assert_eq!(body["reference"].as_str().unwrap().len(), 36);
    }

    #[tokio::test]
    async fn invalid_request_gets_localized_field_messages() {
        let mut notifier = MockContactNotifier::new();
        notifier.expect_notify().never();
        let app = app_with(notifier, Duration::from_secs(10));
        let mut body = valid_body();
        body["email"] = json!("not-an-email");
        body["description"] = json!("too short");

        let response = app
            .oneshot(contact_request(&body, "?locale=en", "10.0.0.2"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        let fields = body["fields"].as_object().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(
            fields["email"],
            Catalog::for_locale(Locale::En).scoped("ContactModal").text("validation.email")
        );
        assert!(fields.contains_key("description"));
    }

    #[tokio::test]
    async fn sixth_request_within_the_hour_is_rate_limited() {
        let mut notifier = MockContactNotifier::new();
        notifier.expect_notify().times(5).returning(|_| Ok(()));
        let app = app_with(notifier, Duration::from_secs(10));

        for _ in 0..5 {
            let response = app
                .clone()
                .oneshot(contact_request(&valid_body(), "", "10.0.0.3"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        let response = app
            .clone()
            .oneshot(contact_request(&valid_body(), "", "10.0.0.3"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        // other clients keep their own budget
        let response = app
            .oneshot(contact_request(&valid_body(), "", "10.0.0.4"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rejected_submissions_do_not_spend_the_budget() {
        let mut notifier = MockContactNotifier::new();
        notifier.expect_notify().times(1).returning(|_| Ok(()));
        let app = app_with(notifier, Duration::from_secs(10));
        let mut invalid = valid_body();
        invalid["name"] = json!("J");

        for _ in 0..6 {
            let response = app
                .clone()
                .oneshot(contact_request(&invalid, "", "10.0.0.7"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
        let response = app
            .oneshot(contact_request(&valid_body(), "", "10.0.0.7"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn notifier_failure_maps_to_bad_gateway() {
        let mut notifier = MockContactNotifier::new();
        notifier
            .expect_notify()
            .returning(|_| Err(NotifyError::Transport("connection refused".into())));
        let app = app_with(notifier, Duration::from_secs(10));

        let response = app
            .oneshot(contact_request(&valid_body(), "", "10.0.0.5"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    struct StalledNotifier;

    #[async_trait]
    impl ContactNotifier for StalledNotifier {
        async fn notify(&self, _submission: &ContactSubmission) -> Result<(), NotifyError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_delivery_times_out() {
        let app = app_with(StalledNotifier, Duration::from_secs(10));

        let response = app
            .oneshot(contact_request(&valid_body(), "", "10.0.0.6"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let app = app_with(MockContactNotifier::new(), Duration::from_secs(10));
        let request = Request::builder()
            .method("POST")
            .uri("/api/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_check() {
        let app = app_with(MockContactNotifier::new(), Duration::from_secs(10));
        let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"OK");
    }

    #[test]
    fn locale_query_beats_accept_language() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9".parse().unwrap());
        let query = LocaleQuery { locale: Some("es".into()) };
        assert_eq!(request_locale(&query, &headers), Locale::Es);
        assert_eq!(request_locale(&LocaleQuery::default(), &headers), Locale::En);
        assert_eq!(request_locale(&LocaleQuery::default(), &HeaderMap::new()), Locale::DEFAULT);
    }
}
