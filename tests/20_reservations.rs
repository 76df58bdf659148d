mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use common::{reservation, TestApp};
use serde_json::json;

#[tokio::test]
async fn create_then_read_returns_supplied_fields() -> Result<()> {
    let app = TestApp::new();

    let created = app
        .post("/reservations", reservation("202-555-0164", "2024-02-15", "18:00", 6))
        .await?;
    assert_eq!(created.status, StatusCode::CREATED, "unexpected body: {}", created.body);
    let id = created.data()["reservation_id"].as_i64().unwrap();

    let res = app.get(&format!("/reservations/{}", id)).await?;
    assert_eq!(res.status, StatusCode::OK);
    let row = res.data();
    assert_eq!(row["first_name"], "Rick");
    assert_eq!(row["last_name"], "Sanchez");
    assert_eq!(row["mobile_number"], "202-555-0164");
    assert_eq!(row["reservation_date"], "2024-02-15");
    assert_eq!(row["reservation_time"], "18:00:00");
    assert_eq!(row["people"], 6);
    assert_eq!(row["status"], "booked");
    Ok(())
}

#[tokio::test]
async fn supplied_booked_or_cancelled_status_is_ignored() -> Result<()> {
    let app = TestApp::new();

    let mut payload = reservation("202-555-0164", "2024-02-15", "18:00", 2);
    payload["status"] = json!("cancelled");
    let res = app.post("/reservations", payload).await?;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.data()["status"], "booked");
    Ok(())
}

#[tokio::test]
async fn create_rejects_seated_and_finished_status() -> Result<()> {
    let app = TestApp::new();

    for (status, message) in [("seated", "Status is already seated!"), ("finished", "Status is already finished!")] {
        let mut payload = reservation("202-555-0164", "2024-02-15", "18:00", 2);
        payload["status"] = json!(status);
        let res = app.post("/reservations", payload).await?;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.message(), message);
    }
    Ok(())
}

#[tokio::test]
async fn create_requires_data_envelope() -> Result<()> {
    let app = TestApp::new();

    let res = app
        .request(Method::POST, "/reservations", Some(json!({ "first_name": "Rick" })))
        .await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, json!({ "status": 400, "message": "No data sent" }));
    Ok(())
}

#[tokio::test]
async fn create_reports_first_missing_field() -> Result<()> {
    let app = TestApp::new();

    let mut payload = reservation("202-555-0164", "2024-02-15", "18:00", 2);
    payload["last_name"] = json!("");
    let res = app.post("/reservations", payload).await?;
    assert_eq!(res.message(), "Invalid input for last_name");

    let res = app.post("/reservations", reservation("202-555-0164", "2024-02-15", "18:00", 0)).await?;
    assert_eq!(res.message(), "Invalid input for people");
    Ok(())
}

#[tokio::test]
async fn create_validates_formats() -> Result<()> {
    let app = TestApp::new();

    let res = app.post("/reservations", reservation("555", "not-a-date", "18:00", 2)).await?;
    assert_eq!(res.message(), "Invalid input: reservation_date");

    let res = app.post("/reservations", reservation("555", "2024-02-30", "18:00", 2)).await?;
    assert_eq!(res.message(), "Invalid input: reservation_date");

    let res = app.post("/reservations", reservation("555", "2024-02-15", "6pm", 2)).await?;
    assert_eq!(res.message(), "Invalid input: reservation_time");

    let mut payload = reservation("555", "2024-02-15", "18:00", 2);
    payload["people"] = json!("2");
    let res = app.post("/reservations", payload).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Invalid input: people");
    Ok(())
}

#[tokio::test]
async fn create_rejects_closed_weekday_and_past_dates() -> Result<()> {
    let app = TestApp::new();

    let res = app.post("/reservations", reservation("555", "2024-02-13", "18:00", 2)).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Restaurant is closed on Tuesdays!");

    let res = app.post("/reservations", reservation("555", "2024-01-31", "18:00", 2)).await?;
    assert_eq!(res.message(), "Reservations must be for a future date!");

    // Same day, earlier than the pinned noon
    let res = app.post("/reservations", reservation("555", "2024-02-01", "11:00", 2)).await?;
    assert_eq!(res.message(), "Reservations must be for a future date!");
    Ok(())
}

#[tokio::test]
async fn create_enforces_service_hours_inclusively() -> Result<()> {
    let app = TestApp::new();

    for time in ["10:00", "21:45", "10:29"] {
        let res = app.post("/reservations", reservation("555", "2024-02-15", time, 2)).await?;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{} should be rejected", time);
        assert_eq!(res.message(), "Reservations are only valid from 10:30 AM to 9:30 PM.");
    }

    for time in ["10:30", "21:30"] {
        let res = app.post("/reservations", reservation("555", "2024-02-15", time, 2)).await?;
        assert_eq!(res.status, StatusCode::CREATED, "{} should be accepted: {}", time, res.body);
    }
    Ok(())
}

#[tokio::test]
async fn read_unknown_reservation_is_404() -> Result<()> {
    let app = TestApp::new();

    let res = app.get("/reservations/99").await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, json!({ "status": 404, "message": "99 not found" }));

    let res = app.get("/reservations/abc").await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn list_filters_by_date_in_time_order() -> Result<()> {
    let app = TestApp::new();
    let late = app.book("555-0101", "2024-02-15", "20:00", 2).await?;
    let early = app.book("555-0102", "2024-02-15", "18:30", 2).await?;
    app.book("555-0103", "2024-02-16", "12:00", 2).await?;

    let res = app.get("/reservations?date=2024-02-15").await?;
    assert_eq!(res.status, StatusCode::OK);
    let ids: Vec<i64> = res
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["reservation_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![early, late]);

    let res = app.get("/reservations").await?;
    assert_eq!(res.data().as_array().unwrap().len(), 3);

    let res = app.get("/reservations?date=15-02-2024").await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Invalid input: date");
    Ok(())
}

#[tokio::test]
async fn list_by_mobile_ignores_punctuation() -> Result<()> {
    let app = TestApp::new();
    let wanted = app.book("(555) 123-4567", "2024-02-15", "18:00", 2).await?;
    app.book("800-999-0000", "2024-02-15", "19:00", 2).await?;

    let res = app.get("/reservations?mobile_number=555-123").await?;
    let rows = res.data().as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["reservation_id"].as_i64(), Some(wanted));
    Ok(())
}

#[tokio::test]
async fn update_overwrites_fields_and_keeps_status() -> Result<()> {
    let app = TestApp::new();
    let id = app.book("555-0101", "2024-02-15", "18:00", 2).await?;

    let mut changes = reservation("555-0199", "2024-02-16", "19:15", 4);
    changes["first_name"] = json!("Morty");
    let res = app.put(&format!("/reservations/{}", id), changes).await?;

    assert_eq!(res.status, StatusCode::OK, "unexpected body: {}", res.body);
    assert_eq!(res.data()["first_name"], "Morty");
    assert_eq!(res.data()["reservation_time"], "19:15:00");
    assert_eq!(res.data()["people"], 4);
    assert_eq!(res.data()["status"], "booked");

    let res = app
        .put(&format!("/reservations/{}", id), reservation("555", "2024-02-20", "18:00", 2))
        .await?;
    assert_eq!(res.message(), "Restaurant is closed on Tuesdays!");

    let res = app.put("/reservations/42", reservation("555", "2024-02-16", "18:00", 2)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn status_transitions() -> Result<()> {
    let app = TestApp::new();
    let id = app.book("555-0101", "2024-02-15", "18:00", 2).await?;
    let uri = format!("/reservations/{}/status", id);

    let res = app.put(&uri, json!({ "status": "seated" })).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "data": { "status": "seated" } }));

    let res = app.put(&uri, json!({ "status": "unknown" })).await?;
    assert_eq!(res.message(), "unknown status cannot be updated!");

    let res = app.put(&uri, json!({ "status": "finished" })).await?;
    assert_eq!(res.data()["status"], "finished");

    // Finished is terminal, whatever the target
    let res = app.put(&uri, json!({ "status": "cancelled" })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "finished reservations cannot be updated!");
    Ok(())
}

#[tokio::test]
async fn cancelled_reservations_are_terminal() -> Result<()> {
    let app = TestApp::new();
    let id = app.book("555-0101", "2024-02-15", "18:00", 2).await?;
    let uri = format!("/reservations/{}/status", id);

    let res = app.put(&uri, json!({ "status": "cancelled" })).await?;
    assert_eq!(res.data()["status"], "cancelled");

    let res = app.put(&uri, json!({ "status": "booked" })).await?;
    assert_eq!(res.message(), "cancelled reservations cannot be updated!");

    let res = app.put("/reservations/77/status", json!({ "status": "booked" })).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> Result<()> {
    let app = TestApp::new();

    let res = app.post_raw("/reservations", "{not json").await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["status"], 400);
    Ok(())
}
