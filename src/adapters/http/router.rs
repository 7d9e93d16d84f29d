//! Top-level axum router: API routes, subscriptions, health and layers.

use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::{middleware, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::websocket::subscriptions_handler;
use crate::config::ServerConfig;

use super::auth::auth_routes;
use super::middleware::auth_middleware;
use super::shipments::shipment_routes;
use super::state::AppState;
use super::users::user_routes;

/// Builds the full application router.
///
/// # Routes
/// - `/api/auth/*` - Login, register, change password
/// - `/api/me`, `/api/users/*` - Accounts
/// - `/api/shipments/*` - Shipments
/// - `GET /api/subscriptions` - WebSocket live updates
/// - `GET /health` - Liveness
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes())
        .nest("/shipments", shipment_routes())
        .merge(user_routes())
        .route("/subscriptions", get(subscriptions_handler));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            state.resolver.clone(),
            auth_middleware,
        ))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any origin unless an explicit list is configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    cors.allow_origin(origins)
}

/// Liveness health check. Does not check dependencies.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::ShipmentBroadcaster;
    use crate::application::test_support::{Fixture, PlainHasher, StaticTokenService};
    use crate::config::SubscriptionConfig;
    use crate::domain::foundation::Role;
    use crate::domain::shipment::ShipmentEventKind;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct Harness {
        fx: Fixture,
        app: Router,
        broadcaster: ShipmentBroadcaster,
    }

    fn harness() -> Harness {
        let fx = Fixture::new();
        let broadcaster = ShipmentBroadcaster::default();
        let state = AppState::new(
            fx.users.clone(),
            fx.shipments.clone(),
            Arc::new(PlainHasher),
            Arc::new(StaticTokenService),
            broadcaster.clone(),
            SubscriptionConfig::default(),
        );
        let app = build_router(state, &ServerConfig::default());
        Harness {
            fx,
            app,
            broadcaster,
        }
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn shipment_body(tracking: &str) -> serde_json::Value {
        serde_json::json!({
            "trackingNumber": tracking,
            "origin": "Madrid",
            "destination": "Porto",
            "carrier": "UPS",
            "weight": 3.456,
            "dimensions": "20x20x20",
            "estimatedDelivery": "2031-02-03",
            "customerName": "Rui",
            "customerEmail": "rui@example.com"
        })
    }

    #[tokio::test]
    async fn health_is_public() {
        let h = harness();
        let (status, body) = send(&h.app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn login_returns_token_and_profile() {
        let h = harness();
        h.fx.seed_user("nina", Role::Employee, "password1").await;

        let (status, body) = send(
            &h.app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(serde_json::json!({"username": "NINA", "password": "password1"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].as_str().unwrap().starts_with("tok-"));
        assert_eq!(body["user"]["username"], "nina");
        assert_eq!(body["user"]["role"], "EMPLOYEE");
        assert!(body["user"].get("password").is_none());
    }

    #[tokio::test]
    async fn login_failures_are_unauthorized_with_distinct_messages() {
        let h = harness();
        h.fx.seed_user("omar", Role::Employee, "password1").await;

        let (status, body) = send(
            &h.app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(serde_json::json!({"email": "nobody@example.com", "password": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Email not found");

        let (status, body) = send(
            &h.app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(serde_json::json!({"username": "omar", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Password is incorrect");
    }

    #[tokio::test]
    async fn shipments_require_a_token() {
        let h = harness();
        let (status, body) = send(&h.app, Method::GET, "/api/shipments", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");

        let (status, _) = send(
            &h.app,
            Method::GET,
            "/api/shipments",
            Some("tok-999"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_list_get_update_delete_flow() {
        let h = harness();
        let admin = h.fx.admin().await;
        let token = format!("tok-{}", admin.id);
        let mut added = h.broadcaster.subscribe(ShipmentEventKind::ShipmentAdded);

        let (status, created) = send(
            &h.app,
            Method::POST,
            "/api/shipments",
            Some(&token),
            Some(shipment_body("TN-HTTP-1")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "PENDING");
        assert_eq!(created["weight"], 3.46);
        assert_eq!(created["creatorEmail"], "admin@example.com");
        assert_eq!(created["estimatedDelivery"], "2031-02-03T00:00:00.000Z");
        assert!(added.recv().await.is_some());

        let id = created["id"].as_str().unwrap().to_string();

        let (status, page) = send(
            &h.app,
            Method::GET,
            "/api/shipments?page=1&limit=5&carrier=ups&sortField=trackingNumber&sortOrder=asc",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["totalCount"], 1);
        assert_eq!(page["pageInfo"]["currentPage"], 1);
        assert_eq!(page["pageInfo"]["totalPages"], 1);
        assert_eq!(page["pageInfo"]["hasNextPage"], false);
        assert_eq!(page["shipments"][0]["trackingNumber"], "TN-HTTP-1");

        let (status, patched) = send(
            &h.app,
            Method::PATCH,
            &format!("/api/shipments/{}", id),
            Some(&token),
            Some(serde_json::json!({"status": "IN_TRANSIT"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["status"], "IN_TRANSIT");
        assert_eq!(patched["origin"], "Madrid");

        let (status, _) = send(
            &h.app,
            Method::DELETE,
            &format!("/api/shipments/{}", id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, gone) = send(
            &h.app,
            Method::GET,
            &format!("/api/shipments/{}", id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(gone.is_null());
    }

    #[tokio::test]
    async fn duplicate_tracking_number_is_conflict() {
        let h = harness();
        let clerk = h.fx.employee("pia").await;
        let token = format!("tok-{}", clerk.id);

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let (status, body) = send(
                &h.app,
                Method::POST,
                "/api/shipments",
                Some(&token),
                Some(shipment_body("TN-DUP")),
            )
            .await;
            assert_eq!(status, expected);
            if expected == StatusCode::CONFLICT {
                assert_eq!(body["message"], "Tracking number already exists");
                assert_eq!(body["details"]["field"], "trackingNumber");
            }
        }
    }

    #[tokio::test]
    async fn employee_cannot_delete_shipments_or_manage_users() {
        let h = harness();
        let clerk = h.fx.employee("ravi").await;
        let token = format!("tok-{}", clerk.id);

        let (status, body) = send(
            &h.app,
            Method::DELETE,
            "/api/shipments/1",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Admin access required");

        let (status, _) = send(&h.app, Method::GET, "/api/users", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn invalid_input_is_bad_request() {
        let h = harness();
        let clerk = h.fx.employee("sam").await;
        let token = format!("tok-{}", clerk.id);

        let (status, _) = send(
            &h.app,
            Method::GET,
            "/api/shipments?limit=1000",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &h.app,
            Method::GET,
            "/api/shipments/not-a-number",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut body = shipment_body("TN-BAD");
        body["estimatedDelivery"] = serde_json::json!("next tuesday");
        let (status, body) = send(&h.app, Method::POST, "/api/shipments", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }

    #[tokio::test]
    async fn admin_manages_users() {
        let h = harness();
        let admin = h.fx.admin().await;
        let token = format!("tok-{}", admin.id);

        let (status, created) = send(
            &h.app,
            Method::POST,
            "/api/auth/register",
            Some(&token),
            Some(serde_json::json!({
                "username": "Tess",
                "email": "Tess@Example.com",
                "password": "longenough",
                "scopes": ["shipments:read"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["user"]["username"], "tess");
        assert_eq!(created["user"]["email"], "tess@example.com");
        let tess_id = created["user"]["id"].as_str().unwrap().to_string();

        let (status, users) = send(&h.app, Method::GET, "/api/users", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(users.as_array().unwrap().len(), 2);

        let (status, updated) = send(
            &h.app,
            Method::PATCH,
            &format!("/api/users/{}", tess_id),
            Some(&token),
            Some(serde_json::json!({"role": "ADMIN", "scopes": ["x"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["role"], "ADMIN");
        assert_eq!(updated["scopes"], serde_json::json!([]));

        let (status, body) = send(
            &h.app,
            Method::DELETE,
            &format!("/api/users/{}", admin.id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "FORBIDDEN");

        let (status, _) = send(
            &h.app,
            Method::DELETE,
            &format!("/api/users/{}", tess_id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn me_and_change_password() {
        let h = harness();
        let user = h.fx.employee("uri").await;
        let token = format!("tok-{}", user.id);

        let (status, me) = send(&h.app, Method::GET, "/api/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["username"], "uri");

        let (status, body) = send(
            &h.app,
            Method::POST,
            "/api/auth/change-password",
            Some(&token),
            Some(serde_json::json!({"currentPassword": "nope", "newPassword": "freshsecret"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Current password is incorrect");

        let (status, _) = send(
            &h.app,
            Method::POST,
            "/api/auth/change-password",
            Some(&token),
            Some(serde_json::json!({"currentPassword": "password1", "newPassword": "freshsecret"})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[test]
    fn cors_accepts_explicit_origins() {
        let _ = cors_layer(&["http://localhost:3000".to_string()]);
        let _ = cors_layer(&[]);
    }
}
