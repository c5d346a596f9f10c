mod common;

use axum::http::StatusCode;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use crate::common::{create_livestock, create_lot, create_product, delete, get, post, put, setup_test_app};

fn decimal(value: &Value) -> Decimal {
    value
        .as_str()
        .map(|s| s.parse::<Decimal>().unwrap())
        .unwrap_or_else(|| panic!("expected decimal string, got {}", value))
}

#[tokio::test]
async fn test_root_responds() {
    let (app, _) = setup_test_app();
    let (status, _) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
}

/// Register, treat, sell and read back one animal
#[tokio::test]
async fn test_livestock_lifecycle_and_profit() {
    let (app, _) = setup_test_app();
    let lot_id = create_lot(&app, "La Esperanza", "Potrero 2").await;
    let product_id = create_product(&app, "Ivermectina", "injection").await;
    let id = create_livestock(&app, "A-100", lot_id).await;

    let (status, body) = get(&app, &format!("/api/livestock/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Active");
    assert_eq!(decimal(&body["purchase_total"]), dec!(11487.75));
    assert_eq!(body["lot"]["name"], "La Esperanza");
    assert!(body["summary"]["profit"].is_null());

    for cost in ["30.00", "12.50"] {
        let (status, _) = post(
            &app,
            &format!("/api/livestock/{}/applications", id),
            json!({
                "product_id": product_id,
                "quantity": "5 ml",
                "cost": cost,
                "applied_on": "2025-02-01"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = post(
        &app,
        &format!("/api/livestock/{}/sell", id),
        json!({ "exit_weight": "520", "sale_unit_price": "28", "sale_date": "2025-06-01" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(decimal(&body["sale"]["total"]), dec!(14560));

    let (_, body) = get(&app, &format!("/api/livestock/{}", id)).await;
    assert_eq!(body["status"], "Sold");
    assert_eq!(body["applications"].as_array().unwrap().len(), 2);
    assert_eq!(decimal(&body["summary"]["applications_cost"]), dec!(42.50));
    assert_eq!(decimal(&body["summary"]["total_cost"]), dec!(11530.25));
    assert_eq!(decimal(&body["summary"]["profit"]), dec!(3029.75));
}

#[tokio::test]
async fn test_sell_is_idempotent_and_rejects_resale() {
    let (app, _) = setup_test_app();
    let lot_id = create_lot(&app, "Santa Rosa", "Norte").await;
    let id = create_livestock(&app, "B-7", lot_id).await;
    let uri = format!("/api/livestock/{}/sell", id);
    let sale = json!({ "exit_weight": "500", "sale_unit_price": "30", "sale_date": "2025-05-01" });

    let (first_status, first) = post(&app, &uri, sale.clone()).await;
    let (second_status, second) = post(&app, &uri, sale).await;
    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first, second);

    let (status, body) = post(
        &app,
        &uri,
        json!({ "exit_weight": "510", "sale_unit_price": "30", "sale_date": "2025-05-01" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_validation_errors_list_fields() {
    let (app, _) = setup_test_app();
    let (status, body) = post(&app, "/api/livestock", json!({ "entry_weight": "-5" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    for expected in ["tag", "lot_id", "entry_weight", "purchase_unit_price", "purchase_date"] {
        assert!(fields.contains(&expected), "missing {} in {:?}", expected, fields);
    }
}

#[tokio::test]
async fn test_duplicate_active_tag_and_reuse_after_sale() {
    let (app, _) = setup_test_app();
    let lot_id = create_lot(&app, "Santa Rosa", "Norte").await;
    let id = create_livestock(&app, "C-1", lot_id).await;

    let duplicate = json!({
        "tag": "C-1",
        "lot_id": lot_id,
        "entry_weight": "300",
        "purchase_unit_price": "20",
        "purchase_date": "2025-02-01"
    });
    let (status, _) = post(&app, "/api/livestock", duplicate.clone()).await;
    assert_eq!(status, StatusCode::CONFLICT);

    post(
        &app,
        &format!("/api/livestock/{}/sell", id),
        json!({ "exit_weight": "400", "sale_unit_price": "25", "sale_date": "2025-04-01" }),
    )
    .await;

    let (status, _) = post(&app, "/api/livestock", duplicate).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_filters_and_search() {
    let (app, _) = setup_test_app();
    let north = create_lot(&app, "Santa Rosa", "Norte").await;
    let south = create_lot(&app, "El Roble", "Sur").await;
    let sold = create_livestock(&app, "N-1", north).await;
    create_livestock(&app, "N-2", north).await;
    create_livestock(&app, "S-1", south).await;
    post(
        &app,
        &format!("/api/livestock/{}/sell", sold),
        json!({ "exit_weight": "400", "sale_unit_price": "25", "sale_date": "2025-04-01" }),
    )
    .await;

    let (status, body) = get(&app, "/api/livestock").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);

    let (_, body) = get(&app, "/api/livestock?status=sold").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["livestock"][0]["tag"], "N-1");
    assert_eq!(body["livestock"][0]["lot_name"], "Santa Rosa - Norte");

    let (_, body) = get(&app, "/api/livestock?status=all&search=roble").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["livestock"][0]["tag"], "S-1");

    let (_, body) = get(&app, "/api/livestock?status=all&search=n-").await;
    assert_eq!(body["total"], 2);

    let (status, _) = get(&app, "/api/livestock?status=dead").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_recomputes_purchase_total() {
    let (app, _) = setup_test_app();
    let lot_id = create_lot(&app, "Santa Rosa", "Norte").await;
    let id = create_livestock(&app, "D-4", lot_id).await;

    let (status, body) = put(
        &app,
        &format!("/api/livestock/{}", id),
        json!({
            "tag": "D-4",
            "lot_id": lot_id,
            "entry_weight": "400",
            "purchase_unit_price": "25",
            "purchase_date": "2025-01-15"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(decimal(&body["purchase_total"]), dec!(10000));
}

#[tokio::test]
async fn test_amounts_beyond_storage_range_rejected() {
    let (app, _) = setup_test_app();
    let lot_id = create_lot(&app, "Santa Rosa", "Norte").await;

    let (status, body) = post(
        &app,
        "/api/livestock",
        json!({
            "tag": "E-1",
            "lot_id": lot_id,
            "entry_weight": "79228162514264337593543950335",
            "purchase_unit_price": "2",
            "purchase_date": "2025-01-15"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    assert_eq!(body["fields"][0]["field"], "entry_weight");

    let (status, body) = post(
        &app,
        "/api/livestock",
        json!({
            "tag": "E-1",
            "lot_id": lot_id,
            "entry_weight": "9999999999.99",
            "purchase_unit_price": "9999999999.99",
            "purchase_date": "2025-01-15"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    assert_eq!(body["fields"][0]["field"], "purchase_total");

    let (_, body) = get(&app, "/api/livestock?status=all").await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_update_sale_fields_follow_lifecycle() {
    let (app, _) = setup_test_app();
    let lot_id = create_lot(&app, "Santa Rosa", "Norte").await;
    let id = create_livestock(&app, "F-1", lot_id).await;

    let edit = |sale_date: &str| {
        json!({
            "tag": "F-1",
            "lot_id": lot_id,
            "entry_weight": "450.50",
            "purchase_unit_price": "25.50",
            "purchase_date": "2025-01-15",
            "exit_weight": "500",
            "sale_unit_price": "30",
            "sale_date": sale_date
        })
    };

    let (status, body) = put(&app, &format!("/api/livestock/{}", id), edit("2025-06-01")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    assert_eq!(body["fields"][0]["field"], "sale_date");
    let (_, body) = get(&app, &format!("/api/livestock/{}", id)).await;
    assert_eq!(body["status"], "Active");

    let (status, _) = post(
        &app,
        &format!("/api/livestock/{}/sell", id),
        json!({ "exit_weight": "520", "sale_unit_price": "28", "sale_date": "2025-06-01" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = put(&app, &format!("/api/livestock/{}", id), edit("2024-12-31")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    assert_eq!(body["fields"][0]["field"], "sale_date");
    let (_, body) = get(&app, &format!("/api/livestock/{}", id)).await;
    assert_eq!(body["sale"]["date"], "2025-06-01");

    let (status, body) = put(&app, &format!("/api/livestock/{}", id), edit("2025-06-02")).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(decimal(&body["sale"]["total"]), dec!(15000));
}

#[tokio::test]
async fn test_delete_livestock_removes_history() {
    let (app, state) = setup_test_app();
    let lot_id = create_lot(&app, "Santa Rosa", "Norte").await;
    let product_id = create_product(&app, "ADE", "vitamin").await;
    let id = create_livestock(&app, "E-5", lot_id).await;
    let (_, event) = post(
        &app,
        &format!("/api/livestock/{}/applications", id),
        json!({ "product_id": product_id, "quantity": "2 ml", "applied_on": "2025-02-01" }),
    )
    .await;

    let (status, body) = delete(&app, &format!("/api/livestock/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = get(&app, &format!("/api/livestock/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let event_id = event["id"].as_i64().unwrap() as i32;
    assert!(state.applications.find_by_id(event_id).await.unwrap().is_none());

    let (_, dashboard) = get(&app, "/api/dashboard").await;
    assert_eq!(dashboard["total"], 0);
}
