//! Router tests for goal CRUD and ownership isolation

#[cfg(test)]
mod tests {
    use crate::routes::create_router;
    use crate::routes::test_support::{register_and_login, send, send_raw};
    use crate::state::test_state;
    use axum::http::{Method, StatusCode};
    use rstest::rstest;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_goal_lifecycle() {
        let app = create_router(test_state());
        let token = register_and_login(&app, "Ann", "ann@x.com", "secret123").await;
        let token = Some(token.as_str());

        let (status, goal) = send(
            &app,
            Method::POST,
            "/goals",
            token,
            Some(json!({ "type": "run 5k", "target": 5, "timeframe": "1 month", "currentValue": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(goal["type"], "run 5k");
        assert_eq!(goal["target"], 5.0);
        assert_eq!(goal["currentValue"], 0.0);
        let id = goal["id"].as_i64().unwrap();

        let (status, goals) = send(&app, Method::GET, "/goals", token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(goals.as_array().unwrap().len(), 1);
        assert_eq!(goals[0]["id"], id);

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/goals/{}", id),
            token,
            Some(json!({ "currentValue": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["currentValue"], 3.0);
        assert_eq!(updated["type"], "run 5k");

        let (status, fetched) = send(&app, Method::GET, &format!("/goals/{}", id), token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["currentValue"], 3.0);

        let (status, body) = send(&app, Method::DELETE, &format!("/goals/{}", id), token, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (_, goals) = send(&app, Method::GET, "/goals", token, None).await;
        assert_eq!(goals, json!([]));
    }

    #[rstest]
    #[case(json!({ "type": "run 5k", "target": 5, "timeframe": "1 month", "currentValue": 6 }))]
    #[case(json!({ "type": "run 5k", "target": 0, "timeframe": "1 month" }))]
    #[case(json!({ "type": "run 5k", "target": -3, "timeframe": "1 month" }))]
    #[case(json!({ "type": "", "target": 5, "timeframe": "1 month" }))]
    #[case(json!({ "type": "run 5k", "target": 5 }))]
    #[tokio::test]
    async fn test_invalid_goals_are_rejected(#[case] payload: Value) {
        let app = create_router(test_state());
        let token = register_and_login(&app, "Ann", "ann@x.com", "secret123").await;

        let (status, body) =
            send(&app, Method::POST, "/goals", Some(token.as_str()), Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (_, goals) = send(&app, Method::GET, "/goals", Some(token.as_str()), None).await;
        assert_eq!(goals, json!([]));
    }

    #[tokio::test]
    async fn test_goals_are_isolated_between_users() {
        let app = create_router(test_state());
        let ann = register_and_login(&app, "Ann", "ann@x.com", "secret123").await;
        let bob = register_and_login(&app, "Bob", "bob@x.com", "hunter22").await;

        let (_, goal) = send(
            &app,
            Method::POST,
            "/goals",
            Some(ann.as_str()),
            Some(json!({ "type": "run 5k", "target": 5, "timeframe": "1 month" })),
        )
        .await;
        let uri = format!("/goals/{}", goal["id"]);

        let (_, bobs_goals) = send(&app, Method::GET, "/goals", Some(bob.as_str()), None).await;
        assert_eq!(bobs_goals, json!([]));

        let (status, _) = send(&app, Method::GET, &uri, Some(bob.as_str()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::PUT,
            &uri,
            Some(bob.as_str()),
            Some(json!({ "currentValue": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, &uri, Some(bob.as_str()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, intact) = send(&app, Method::GET, &uri, Some(ann.as_str()), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(intact["currentValue"], 0.0);
    }

    #[tokio::test]
    async fn test_non_numeric_goal_id_returns_400() {
        let app = create_router(test_state());
        let token = register_and_login(&app, "Ann", "ann@x.com", "secret123").await;

        let (status, body) =
            send(&app, Method::GET, "/goals/abc", Some(token.as_str()), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_goal_returns_404() {
        let app = create_router(test_state());
        let token = register_and_login(&app, "Ann", "ann@x.com", "secret123").await;

        let (status, body) =
            send(&app, Method::DELETE, "/goals/12345", Some(token.as_str()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Goal not found");
    }

    #[tokio::test]
    async fn test_health_and_banner_need_no_token() {
        let app = create_router(test_state());

        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = send(&app, Method::GET, "/", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["apiBaseUrl"].is_string());
    }

    #[tokio::test]
    async fn test_unreadable_goal_bodies_return_400_body() {
        let app = create_router(test_state());
        let token = register_and_login(&app, "Ann", "ann@x.com", "secret123").await;
        let token = Some(token.as_str());

        let wrong_type =
            json!({ "type": "run 5k", "target": "five", "timeframe": "1 month" }).to_string();
        let valid = json!({ "type": "run 5k", "target": 5, "timeframe": "1 month" }).to_string();

        let cases = [
            (Some("application/json"), wrong_type),
            (Some("application/json"), "{\"type\": ".to_string()),
            (None, valid),
        ];

        for (content_type, payload) in cases {
            let (status, body) =
                send_raw(&app, Method::POST, "/goals", token, content_type, payload.clone()).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", payload);
            assert_eq!(body["code"], "VALIDATION_ERROR");
            assert!(body["message"].is_string());
        }

        let (_, goals) = send(&app, Method::GET, "/goals", token, None).await;
        assert_eq!(goals, json!([]));
    }

    #[tokio::test]
    async fn test_update_with_wrong_typed_field_returns_400_body() {
        let app = create_router(test_state());
        let token = register_and_login(&app, "Ann", "ann@x.com", "secret123").await;
        let token = Some(token.as_str());

        let (_, goal) = send(
            &app,
            Method::POST,
            "/goals",
            token,
            Some(json!({ "type": "run 5k", "target": 5, "timeframe": "1 month" })),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/goals/{}", goal["id"]),
            token,
            Some(json!({ "currentValue": "three" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}
