use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::repositories;
use crate::test_support::{self, TestContext};

async fn call(
    ctx: &TestContext,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(method, uri, token, body))
        .await
        .expect("response");
    let status = response.status();
    (status, test_support::read_json(response).await)
}

struct Cast {
    admin: String,
    supervisor: String,
    first_examiner: String,
    outsider: String,
    student: String,
    student_id: String,
    supervisor_id: String,
    first_examiner_id: String,
    second_examiner_id: String,
    outsider_id: String,
    room_id: String,
}

async fn cast(ctx: &TestContext) -> Cast {
    let db = ctx.state.db();
    let settings = ctx.state.settings();

    let admin = test_support::insert_admin(db, "Admin").await;
    let supervisor = test_support::insert_faculty(db, "Dr. Supervisor").await;
    let first_examiner = test_support::insert_faculty(db, "Dr. First").await;
    let second_examiner = test_support::insert_faculty(db, "Dr. Second").await;
    let outsider = test_support::insert_faculty(db, "Dr. Outsider").await;
    let student = test_support::insert_student(db, "Siti", "20210001", &supervisor.id).await;
    let room = test_support::insert_room(db, "R1").await;

    Cast {
        admin: test_support::bearer_token(&admin.id, settings),
        supervisor: test_support::bearer_token(&supervisor.id, settings),
        first_examiner: test_support::bearer_token(&first_examiner.id, settings),
        outsider: test_support::bearer_token(&outsider.id, settings),
        student: test_support::bearer_token(&student.id, settings),
        student_id: student.id,
        supervisor_id: supervisor.id,
        first_examiner_id: first_examiner.id,
        second_examiner_id: second_examiner.id,
        outsider_id: outsider.id,
        room_id: room.id,
    }
}

async fn submit(ctx: &TestContext, token: &str) -> (StatusCode, Value) {
    call(
        ctx,
        Method::POST,
        "/api/v1/submissions",
        Some(token),
        Some(json!({
            "title": "Edge Caching for Campus Networks",
            "document_ref": "uploads/thesis.pdf"
        })),
    )
    .await
}

/// Another supervisee of the cast supervisor; returns their token.
async fn enroll(ctx: &TestContext, cast: &Cast, name: &str, id_number: &str) -> String {
    let db = ctx.state.db();
    let student = test_support::insert_student(db, name, id_number, &cast.supervisor_id).await;
    test_support::bearer_token(&student.id, ctx.state.settings())
}

fn notification_ids(items: &Value) -> Vec<String> {
    let items = items.as_array().expect("notifications");
    items.iter().map(|item| item["submission_id"].as_str().expect("id").to_string()).collect()
}

async fn dashboard(ctx: &TestContext, token: &str) -> Vec<Value> {
    let (status, body) =
        call(ctx, Method::GET, "/api/v1/submissions/dashboard", Some(token), None).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    body["data"].as_array().expect("dashboard").clone()
}

fn exam_dates(items: &[Value]) -> Vec<String> {
    items.iter().map(|item| item["exam_date"].as_str().expect("date").to_string()).collect()
}

async fn review(ctx: &TestContext, token: &str, id: &str, status: &str) -> (StatusCode, Value) {
    call(
        ctx,
        Method::POST,
        &format!("/api/v1/submissions/{id}/review"),
        Some(token),
        Some(json!({ "status": status })),
    )
    .await
}

async fn schedule(ctx: &TestContext, token: &str, id: &str, body: Value) -> (StatusCode, Value) {
    call(ctx, Method::POST, &format!("/api/v1/submissions/{id}/schedule"), Some(token), Some(body))
        .await
}

async fn history_total(ctx: &TestContext, token: &str, query: &str) -> i64 {
    let uri = format!("/api/v1/submissions/history{query}");
    let (status, body) = call(ctx, Method::GET, &uri, Some(token), None).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    body["data"]["total_count"].as_i64().expect("total")
}

#[tokio::test]
async fn submission_flows_from_create_to_schedule() {
    let ctx = test_support::setup_test_context().await;
    let cast = cast(&ctx).await;

    let (status, created) = submit(&ctx, &cast.student).await;
    assert_eq!(status, StatusCode::CREATED, "response: {created}");
    assert_eq!(created["success"], true);
    let submission_id = created["data"]["id"].as_str().expect("submission id").to_string();
    assert_eq!(created["data"]["status"], "PENDING_REVIEW");
    assert_eq!(created["data"]["exam_date"], Value::Null);
    assert_eq!(created["data"]["start_time"], Value::Null);
    assert_eq!(created["data"]["room_name"], Value::Null);
    assert_eq!(created["data"]["supervisor_name"], "Dr. Supervisor");

    let (status, body) = review(&ctx, &cast.admin, &submission_id, "ACCEPTED").await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["data"]["status"], "ACCEPTED");

    let first = cast.first_examiner_id.clone();
    let second = cast.second_examiner_id.clone();

    let (status, body) = schedule(
        &ctx,
        &cast.admin,
        &submission_id,
        json!({
            "exam_date": "2025-06-01",
            "start_time": "09:00",
            "end_time": "10:30",
            "room_id": cast.room_id,
            "examiner_ids": [first, second, first]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    let data = &body["data"];
    assert_eq!(data["status"], "SCHEDULED");
    assert_eq!(data["exam_date"], "2025-06-01");
    assert_eq!(data["start_time"], "09:00");
    assert_eq!(data["end_time"], "10:30");
    assert_eq!(data["room"]["name"], "R1");
    assert_eq!(data["cohort"], "2021");
    let examiners = data["examiners"].as_array().expect("examiners");
    assert_eq!(examiners.len(), 2);
    assert_eq!(examiners[0]["id"], first.as_str());
    assert_eq!(examiners[1]["id"], second.as_str());

    let assignments =
        repositories::examiners::list_for_submission(ctx.state.db(), &submission_id)
            .await
            .expect("assignments");
    assert_eq!(
        assignments.iter().map(|a| (a.examiner_id.as_str(), a.position)).collect::<Vec<_>>(),
        vec![(first.as_str(), 1), (second.as_str(), 2)]
    );

    let (status, body) =
        call(&ctx, Method::GET, "/api/v1/submissions/history", Some(&cast.first_examiner), None)
            .await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    let items = body["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], submission_id.as_str());
    assert_eq!(items[0]["is_supervisor"], false);

    let (_, body) =
        call(&ctx, Method::GET, "/api/v1/submissions/dashboard", Some(&cast.supervisor), None)
            .await;
    let items = body["data"].as_array().expect("dashboard");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["is_supervisor"], true);

    let (_, body) =
        call(&ctx, Method::GET, "/api/v1/submissions/history", Some(&cast.student), None).await;
    assert_eq!(body["data"]["total_count"], 1);
    assert_eq!(body["data"]["has_more"], false);
    assert_eq!(body["data"]["items"][0]["examiner_names"][0], "Dr. First");

    let (status, body) = schedule(
        &ctx,
        &cast.admin,
        &submission_id,
        json!({
            "exam_date": "2025-06-02",
            "start_time": "09:00",
            "end_time": "10:00",
            "room_id": cast.room_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "response: {body}");
    assert_eq!(body["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn second_active_submission_is_refused() {
    let ctx = test_support::setup_test_context().await;
    let cast = cast(&ctx).await;

    let (status, _) = submit(&ctx, &cast.student).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = submit(&ctx, &cast.student).await;
    assert_eq!(status, StatusCode::CONFLICT, "response: {body}");
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "ACTIVE_SUBMISSION_EXISTS");
}

#[tokio::test]
async fn rejected_submission_frees_the_student() {
    let ctx = test_support::setup_test_context().await;
    let cast = cast(&ctx).await;

    let (_, created) = submit(&ctx, &cast.student).await;
    let submission_id = created["data"]["id"].as_str().expect("id").to_string();

    let (status, body) = review(&ctx, &cast.admin, &submission_id, "REJECTED").await;
    assert_eq!(status, StatusCode::OK, "response: {body}");

    let (status, body) = schedule(
        &ctx,
        &cast.admin,
        &submission_id,
        json!({
            "exam_date": "2025-06-01",
            "start_time": "09:00",
            "end_time": "10:00",
            "room_id": cast.room_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "response: {body}");
    assert_eq!(body["code"], "INVALID_TRANSITION");

    let (status, body) = review(&ctx, &cast.admin, &submission_id, "ACCEPTED").await;
    assert_eq!(status, StatusCode::CONFLICT, "response: {body}");

    let (status, body) = submit(&ctx, &cast.student).await;
    assert_eq!(status, StatusCode::CREATED, "response: {body}");

    let (_, current) =
        call(&ctx, Method::GET, "/api/v1/submissions/current", Some(&cast.student), None).await;
    assert_eq!(current["data"]["status"], "PENDING_REVIEW");
}

#[tokio::test]
async fn schedule_requires_accepted_and_valid_input() {
    let ctx = test_support::setup_test_context().await;
    let cast = cast(&ctx).await;

    let (_, created) = submit(&ctx, &cast.student).await;
    let submission_id = created["data"]["id"].as_str().expect("id").to_string();

    let body = json!({
        "exam_date": "2025-06-01",
        "start_time": "09:00",
        "end_time": "10:00",
        "room_id": cast.room_id
    });
    let (status, response) = schedule(&ctx, &cast.admin, &submission_id, body).await;
    assert_eq!(status, StatusCode::CONFLICT, "response: {response}");
    assert_eq!(response["code"], "INVALID_TRANSITION");

    review(&ctx, &cast.admin, &submission_id, "ACCEPTED").await;

    let (status, response) = schedule(
        &ctx,
        &cast.admin,
        &submission_id,
        json!({
            "exam_date": "2025-06-01",
            "start_time": "09:00",
            "end_time": "10:00",
            "room_id": cast.room_id,
            "examiner_ids": [cast.student_id]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "response: {response}");
    assert!(response["fieldErrors"]["examiner_ids"].is_array());

    let (status, response) = schedule(
        &ctx,
        &cast.admin,
        &submission_id,
        json!({
            "exam_date": "2025-06-01",
            "start_time": "09:00",
            "end_time": "10:00",
            "room_id": cast.room_id,
            "examiner_ids": ["a", "b", "c"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "response: {response}");

    let (status, response) = schedule(
        &ctx,
        &cast.admin,
        &submission_id,
        json!({
            "exam_date": "2025-06-01",
            "start_time": "11:00",
            "end_time": "10:00",
            "room_id": cast.room_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "response: {response}");
    assert!(response["fieldErrors"]["end_time"].is_array());

    let (status, response) = schedule(
        &ctx,
        &cast.admin,
        &submission_id,
        json!({
            "exam_date": "2025-06-01",
            "start_time": "09:00",
            "end_time": "10:00",
            "room_id": "missing-room"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "response: {response}");

    let (status, response) = schedule(
        &ctx,
        &cast.admin,
        &submission_id,
        json!({
            "exam_date": "2025-06-01",
            "start_time": "09:00",
            "end_time": "10:00",
            "room_id": cast.room_id,
            "examiner_ids": []
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "response: {response}");
    assert_eq!(response["data"]["examiners"], json!([]));
}

#[tokio::test]
async fn only_admins_move_submissions() {
    let ctx = test_support::setup_test_context().await;
    let cast = cast(&ctx).await;

    let (_, created) = submit(&ctx, &cast.student).await;
    let submission_id = created["data"]["id"].as_str().expect("id").to_string();

    for token in [&cast.supervisor, &cast.student] {
        let (status, body) = review(&ctx, token, &submission_id, "ACCEPTED").await;
        assert_eq!(status, StatusCode::FORBIDDEN, "response: {body}");
        assert_eq!(body["code"], "FORBIDDEN");
    }

    let (status, body) = submit(&ctx, &cast.admin).await;
    assert_eq!(status, StatusCode::FORBIDDEN, "response: {body}");

    let (status, body) = review(&ctx, &cast.admin, &submission_id, "SCHEDULED").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "response: {body}");
    assert_eq!(body["code"], "VALIDATION_FAILED");

    let (status, body) = review(&ctx, &cast.admin, "missing", "ACCEPTED").await;
    assert_eq!(status, StatusCode::NOT_FOUND, "response: {body}");
}

#[tokio::test]
async fn incomplete_profile_blocks_submission() {
    let ctx = test_support::setup_test_context().await;
    let student = test_support::insert_account(
        ctx.state.db(),
        crate::db::types::AccountRole::Student,
        "Budi",
        Some("20220002"),
    )
    .await;
    let token = test_support::bearer_token(&student.id, ctx.state.settings());

    let (status, body) = submit(&ctx, &token).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "response: {body}");
    assert_eq!(body["code"], "PROFILE_INCOMPLETE");
    assert!(body["fieldErrors"]["supervisor_id"].is_array());
    assert!(body["fieldErrors"]["phone"].is_array());
    assert!(body["fieldErrors"].get("id_number").is_none());
}

#[tokio::test]
async fn declared_supervisor_must_match_profile() {
    let ctx = test_support::setup_test_context().await;
    let cast = cast(&ctx).await;
    let other = cast.outsider_id.clone();

    let (status, body) = call(
        &ctx,
        Method::POST,
        "/api/v1/submissions",
        Some(&cast.student),
        Some(json!({ "title": "T", "document_ref": "doc", "supervisor_id": other })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "response: {body}");
    assert!(body["fieldErrors"]["supervisor_id"].is_array());
}

#[tokio::test]
async fn unrelated_callers_cannot_see_a_submission() {
    let ctx = test_support::setup_test_context().await;
    let cast = cast(&ctx).await;

    let (_, created) = submit(&ctx, &cast.student).await;
    let submission_id = created["data"]["id"].as_str().expect("id").to_string();
    let uri = format!("/api/v1/submissions/{submission_id}");

    let (status, _) = call(&ctx, Method::GET, &uri, Some(&cast.outsider), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let other_supervisor = test_support::insert_faculty(ctx.state.db(), "Dr. Else").await;
    let other_student =
        test_support::insert_student(ctx.state.db(), "Rina", "20210002", &other_supervisor.id)
            .await;
    let other_token = test_support::bearer_token(&other_student.id, ctx.state.settings());
    let (status, _) = call(&ctx, Method::GET, &uri, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, history) =
        call(&ctx, Method::GET, "/api/v1/submissions/history", Some(&cast.outsider), None).await;
    assert_eq!(history["data"]["total_count"], 0);

    let (status, body) = call(&ctx, Method::GET, &uri, Some(&cast.supervisor), None).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["data"]["is_supervisor"], true);
}

#[tokio::test]
async fn faculty_history_filters_by_relation_and_period() {
    let ctx = test_support::setup_test_context().await;
    let cast = cast(&ctx).await;

    let (_, created) = submit(&ctx, &cast.student).await;
    let submission_id = created["data"]["id"].as_str().expect("id").to_string();
    review(&ctx, &cast.admin, &submission_id, "ACCEPTED").await;
    let first = cast.first_examiner_id.clone();
    schedule(
        &ctx,
        &cast.admin,
        &submission_id,
        json!({
            "exam_date": "2020-01-15",
            "start_time": "09:00",
            "end_time": "10:00",
            "room_id": cast.room_id,
            "examiner_ids": [first]
        }),
    )
    .await;

    assert_eq!(history_total(&ctx, &cast.supervisor, "?relation=supervisor").await, 1);
    assert_eq!(history_total(&ctx, &cast.supervisor, "?relation=examiner").await, 0);
    assert_eq!(history_total(&ctx, &cast.first_examiner, "?relation=examiner").await, 1);
    assert_eq!(history_total(&ctx, &cast.first_examiner, "?status=completed").await, 1);
    assert_eq!(history_total(&ctx, &cast.first_examiner, "?status=scheduled").await, 0);
    assert_eq!(history_total(&ctx, &cast.first_examiner, "?status=all").await, 1);
    assert_eq!(history_total(&ctx, &cast.admin, "?status=SCHEDULED").await, 1);
    assert_eq!(history_total(&ctx, &cast.admin, "?status=REJECTED").await, 0);

    let (status, body) = call(
        &ctx,
        Method::GET,
        "/api/v1/submissions/history?relation=sideways",
        Some(&cast.supervisor),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "response: {body}");
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn admin_calendar_lists_month() {
    let ctx = test_support::setup_test_context().await;
    let cast = cast(&ctx).await;

    let (_, created) = submit(&ctx, &cast.student).await;
    let submission_id = created["data"]["id"].as_str().expect("id").to_string();
    review(&ctx, &cast.admin, &submission_id, "ACCEPTED").await;
    schedule(
        &ctx,
        &cast.admin,
        &submission_id,
        json!({
            "exam_date": "2025-06-30",
            "start_time": "13:00",
            "end_time": "14:00",
            "room_id": cast.room_id
        }),
    )
    .await;

    let (status, body) = call(
        &ctx,
        Method::GET,
        "/api/v1/submissions/calendar?year=2025&month=6",
        Some(&cast.admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["student"]["name"], "Siti");

    let (_, body) = call(
        &ctx,
        Method::GET,
        "/api/v1/submissions/calendar?year=2025&month=7",
        Some(&cast.admin),
        None,
    )
    .await;
    assert_eq!(body["data"], json!([]));

    let (status, _) = call(
        &ctx,
        Method::GET,
        "/api/v1/submissions/calendar?year=2025&month=13",
        Some(&cast.admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = call(
        &ctx,
        Method::GET,
        "/api/v1/submissions/calendar?year=2025&month=6",
        Some(&cast.supervisor),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn notifications_are_faculty_only() {
    let ctx = test_support::setup_test_context().await;
    let cast = cast(&ctx).await;

    let (_, created) = submit(&ctx, &cast.student).await;
    let submission_id = created["data"]["id"].as_str().expect("id").to_string();
    review(&ctx, &cast.admin, &submission_id, "ACCEPTED").await;

    let (status, body) =
        call(&ctx, Method::GET, "/api/v1/notifications", Some(&cast.supervisor), None).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["data"]["total_count"], 1);
    let entry = &body["data"]["items"][0];
    assert_eq!(entry["submission_id"], submission_id.as_str());
    assert_eq!(entry["relation"], "SUPERVISOR");
    assert_eq!(entry["status"], "ACCEPTED");
    assert!(entry["message"].as_str().expect("message").contains("Siti"));

    let (_, body) =
        call(&ctx, Method::GET, "/api/v1/notifications/preview", Some(&cast.supervisor), None)
            .await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    for token in [&cast.student, &cast.admin] {
        let (status, body) =
            call(&ctx, Method::GET, "/api/v1/notifications", Some(token), None).await;
        assert_eq!(status, StatusCode::OK, "response: {body}");
        assert_eq!(body["data"]["items"], json!([]));
        assert_eq!(body["data"]["total_count"], 0);
    }

    let (_, body) =
        call(&ctx, Method::GET, "/api/v1/notifications", Some(&cast.outsider), None).await;
    assert_eq!(body["data"]["total_count"], 0);
}

#[tokio::test]
async fn notification_preview_keeps_the_newest_seven() {
    let ctx = test_support::setup_test_context().await;
    let cast = cast(&ctx).await;

    let mut created = Vec::new();
    for index in 1..=9 {
        let name = format!("Student {index}");
        let token = enroll(&ctx, &cast, &name, &format!("2022{index:04}")).await;
        let (status, body) = submit(&ctx, &token).await;
        assert_eq!(status, StatusCode::CREATED, "response: {body}");
        created.push(body["data"]["id"].as_str().expect("id").to_string());
    }
    let newest_first: Vec<String> = created.iter().rev().cloned().collect();

    let (status, body) =
        call(&ctx, Method::GET, "/api/v1/notifications/preview", Some(&cast.supervisor), None)
            .await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(notification_ids(&body["data"]), newest_first[..7].to_vec());

    let (_, body) = call(
        &ctx,
        Method::GET,
        "/api/v1/notifications?page=2&limit=4",
        Some(&cast.supervisor),
        None,
    )
    .await;
    assert_eq!(body["data"]["total_count"], 9);
    assert_eq!(body["data"]["has_more"], true);
    assert_eq!(notification_ids(&body["data"]["items"]), newest_first[4..8].to_vec());

    let oldest = created[0].clone();
    let (status, body) = review(&ctx, &cast.admin, &oldest, "ACCEPTED").await;
    assert_eq!(status, StatusCode::OK, "response: {body}");

    let (_, body) =
        call(&ctx, Method::GET, "/api/v1/notifications/preview", Some(&cast.supervisor), None)
            .await;
    let preview = notification_ids(&body["data"]);
    assert_eq!(preview.len(), 7);
    assert_eq!(preview[0], oldest);
    assert_eq!(preview[1..].to_vec(), newest_first[..6].to_vec());
    assert_eq!(body["data"][0]["status"], "ACCEPTED");
}

#[tokio::test]
async fn dashboards_show_five_earliest_scheduled_exams() {
    let ctx = test_support::setup_test_context().await;
    let cast = cast(&ctx).await;

    // Scheduled out of date order; Siti's submission stays pending.
    let dates =
        ["2025-06-05", "2025-06-01", "2025-06-04", "2025-06-02", "2025-06-06", "2025-06-03"];
    let mut students = Vec::new();
    for (index, exam_date) in dates.iter().enumerate() {
        let name = format!("Student {index}");
        let token = enroll(&ctx, &cast, &name, &format!("2023{index:04}")).await;
        let (_, created) = submit(&ctx, &token).await;
        let submission_id = created["data"]["id"].as_str().expect("id").to_string();
        review(&ctx, &cast.admin, &submission_id, "ACCEPTED").await;
        let (status, body) = schedule(
            &ctx,
            &cast.admin,
            &submission_id,
            json!({
                "exam_date": exam_date,
                "start_time": "09:00",
                "end_time": "10:00",
                "room_id": cast.room_id,
                "examiner_ids": [cast.first_examiner_id]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "response: {body}");
        students.push(token);
    }
    let (status, _) = submit(&ctx, &cast.student).await;
    assert_eq!(status, StatusCode::CREATED);

    let earliest = ["2025-06-01", "2025-06-02", "2025-06-03", "2025-06-04", "2025-06-05"];

    for (token, is_supervisor) in [(&cast.supervisor, true), (&cast.first_examiner, false)] {
        let items = dashboard(&ctx, token).await;
        assert_eq!(exam_dates(&items), earliest);
        assert!(items.iter().all(|item| item["is_supervisor"] == is_supervisor));
    }

    let items = dashboard(&ctx, &cast.admin).await;
    assert_eq!(exam_dates(&items), earliest);
    let first = &items[0];
    assert_eq!(first["status"], "SCHEDULED");
    assert_eq!(first["student"]["name"], "Student 1");
    assert_eq!(first["cohort"], "2023");
    assert_eq!(first["supervisor"]["name"], "Dr. Supervisor");
    assert_eq!(first["room"]["name"], "R1");
    assert_eq!(first["examiners"][0]["id"], cast.first_examiner_id.as_str());

    let items = dashboard(&ctx, &students[4]).await;
    assert_eq!(exam_dates(&items), vec!["2025-06-06".to_string()]);
    assert!(dashboard(&ctx, &cast.student).await.is_empty());
    assert!(dashboard(&ctx, &cast.outsider).await.is_empty());
}

#[tokio::test]
async fn requests_without_valid_session_are_unauthenticated() {
    let ctx = test_support::setup_test_context().await;

    let (status, body) = call(&ctx, Method::GET, "/api/v1/submissions/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNAUTHENTICATED");

    let (status, _) =
        call(&ctx, Method::GET, "/api/v1/submissions/dashboard", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let ghost = test_support::bearer_token("no-such-account", ctx.state.settings());
    let (status, _) =
        call(&ctx, Method::GET, "/api/v1/submissions/dashboard", Some(&ghost), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_body_is_a_validation_envelope() {
    let ctx = test_support::setup_test_context().await;
    let cast = cast(&ctx).await;

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/v1/submissions")
        .header(axum::http::header::AUTHORIZATION, format!("Bearer {}", cast.student))
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{\"title\": "))
        .expect("request");
    let response = ctx.app.clone().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = test_support::read_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}
