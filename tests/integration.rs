//! Integration tests for the salary engine HTTP API.
//!
//! This suite covers:
//! - Breakdown scenarios across bands, regions and loan plans
//! - Allowance taper and pension interaction
//! - Budget allocation from monthly net pay
//! - Loading rate tables from the shipped YAML directory
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use salary_engine::api::{AppState, create_router};
use salary_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    create_router(AppState::builtin())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    decimal(s).normalize().to_string()
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_breakdown(body: Value) -> (StatusCode, Value) {
    post(create_router_for_test(), "/breakdown", body).await
}

fn assert_amount(value: &Value, expected: &str) {
    let actual = value
        .as_str()
        .unwrap_or_else(|| panic!("Expected decimal string, got {}", value));
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

fn yearly<'a>(result: &'a Value, field: &str) -> &'a Value {
    &result["breakdown"]["yearly"][field]
}

fn warning_codes(result: &Value) -> Vec<String> {
    result["audit_trace"]["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// SECTION 1: Breakdown scenarios
// =============================================================================

#[tokio::test]
async fn test_top_of_basic_band() {
    let (status, result) = post_breakdown(json!({ "grossYearly": 50270 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(yearly(&result, "tax"), "7540.00");
    assert_amount(yearly(&result, "contribution"), "3016.00");
    assert_amount(yearly(&result, "studentLoan"), "0");
    assert_amount(yearly(&result, "net"), "39714.00");
}

#[tokio::test]
async fn test_salary_equal_to_personal_allowance() {
    let (status, result) = post_breakdown(json!({ "grossYearly": 12570 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(yearly(&result, "tax"), "0");
    assert_amount(yearly(&result, "contribution"), "0");
    assert_amount(yearly(&result, "net"), "12570");
    assert_amount(&result["summary"]["takeHomePercent"], "100.0");
}

#[tokio::test]
async fn test_fully_tapered_allowance() {
    let (status, result) = post_breakdown(json!({ "grossYearly": 130000 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(yearly(&result, "tax"), "42189.00");
    assert_amount(yearly(&result, "contribution"), "4610.60");
    assert_amount(yearly(&result, "net"), "83200.40");
    assert!(warning_codes(&result).contains(&"PERSONAL_ALLOWANCE_TAPERED".to_string()));

    let tax_step = &result["audit_trace"]["steps"][1];
    assert_eq!(tax_step["rule_id"], "income_tax");
    assert_amount(&tax_step["output"]["personal_allowance"], "0");
}

#[tokio::test]
async fn test_plan_a_repayment() {
    let (status, result) = post_breakdown(json!({
        "grossYearly": 30000,
        "studentLoanPlan": "planA"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(yearly(&result, "studentLoan"), "450.90");
    assert_eq!(result["input"]["studentLoanPlan"], "planA");
}

#[tokio::test]
async fn test_alternate_region() {
    let (status, result) = post_breakdown(json!({
        "grossYearly": "30000",
        "region": "alternate"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(yearly(&result, "tax"), "3497.33");
    assert_amount(yearly(&result, "contribution"), "1394.40");
    assert_amount(yearly(&result, "net"), "25108.27");
}

#[tokio::test]
async fn test_region_alias_accepted() {
    let (status, result) = post_breakdown(json!({
        "grossYearly": 30000,
        "region": "scotland"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["input"]["region"], "alternate");
}

#[tokio::test]
async fn test_pension_reduces_taxable_gross() {
    let (status, result) = post_breakdown(json!({
        "grossYearly": 52000,
        "pensionPercent": 5
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(yearly(&result, "pensionDeduction"), "2600");
    assert_amount(yearly(&result, "tax"), "7366.00");
    assert_amount(yearly(&result, "contribution"), "3050.60");
    assert_amount(yearly(&result, "net"), "38983.40");
    assert_amount(&result["summary"]["totalDeductions"], "13016.60");
}

#[tokio::test]
async fn test_weekly_figures_are_yearly_over_52() {
    let (status, result) = post_breakdown(json!({
        "grossYearly": 52000,
        "pensionPercent": 10
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result["breakdown"]["weekly"]["gross"], "1000");
    assert_amount(&result["breakdown"]["weekly"]["pensionDeduction"], "100");
}

#[tokio::test]
async fn test_result_metadata() {
    let (status, result) = post_breakdown(json!({ "grossYearly": 40000 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["tax_year"], "2024/25");
    assert_eq!(result["engine_version"], env!("CARGO_PKG_VERSION"));
    assert!(result["calculation_id"].as_str().is_some());
    assert_eq!(result["audit_trace"]["steps"].as_array().unwrap().len(), 5);
    assert!(warning_codes(&result).is_empty());
}

// =============================================================================
// SECTION 2: Budget
// =============================================================================

#[tokio::test]
async fn test_budget_allocates_monthly_net() {
    // 30000 standard: net 25119.60, monthly 2093.30
    let (status, result) = post(
        create_router_for_test(),
        "/budget",
        json!({
            "salary": { "grossYearly": 30000 },
            "outgoings": { "food": 300, "rentMortgage": 800 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result["monthly"]["net"], "2093.30");
    assert_amount(&result["budget"]["totalOutgoings"], "1100");
    assert_amount(&result["budget"]["remaining"], "993.30");
    assert_eq!(result["budget"]["status"], "surplus");

    let allocations = result["budget"]["allocations"].as_array().unwrap();
    assert_eq!(allocations.len(), 2);
    assert_eq!(allocations[0]["category"], "rentMortgage");
    assert_eq!(allocations[0]["label"], "Rent/Mortgage");
    assert_amount(&allocations[0]["shareOfNetPercent"], "38.2");
    assert_amount(&allocations[1]["shareOfNetPercent"], "14.3");
}

#[tokio::test]
async fn test_budget_deficit() {
    let (status, result) = post(
        create_router_for_test(),
        "/budget",
        json!({
            "salary": { "grossYearly": 20000 },
            "outgoings": { "rentMortgage": 1500, "car": 400 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["budget"]["status"], "deficit");
}

#[tokio::test]
async fn test_budget_without_outgoings() {
    let (status, result) = post(
        create_router_for_test(),
        "/budget",
        json!({ "salary": { "grossYearly": 20000 } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["budget"]["allocations"].as_array().unwrap().is_empty());
    // 20000 standard: net 17919.60, monthly 1493.30
    assert_amount(&result["budget"]["remaining"], "1493.30");
    assert_amount(&result["monthly"]["net"], "1493.30");
}

// =============================================================================
// SECTION 3: Configuration directory
// =============================================================================

#[tokio::test]
async fn test_router_with_loaded_configuration() {
    let config = ConfigLoader::load("./config/2024-25").expect("Failed to load config");
    let router = create_router(AppState::new(config));

    let (status, result) = post(router, "/breakdown", json!({ "grossYearly": 50270 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(yearly(&result, "net"), "39714.00");
}

// =============================================================================
// SECTION 4: Error cases
// =============================================================================

#[tokio::test]
async fn test_zero_salary_rejected() {
    let (status, result) = post_breakdown(json!({ "grossYearly": 0 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
    assert!(result["message"].as_str().unwrap().contains("grossYearly"));
}

#[tokio::test]
async fn test_negative_pension_rejected() {
    let (status, result) = post_breakdown(json!({
        "grossYearly": 30000,
        "pensionPercent": -2
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_salary_beyond_limit_rejected() {
    let (status, result) = post_breakdown(json!({
        "grossYearly": "79228162514264337593543950335",
        "pensionPercent": 5
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
    assert!(result["message"].as_str().unwrap().contains("grossYearly"));
}

#[tokio::test]
async fn test_budget_outgoings_overflow_rejected() {
    let (status, result) = post(
        create_router_for_test(),
        "/budget",
        json!({
            "salary": { "grossYearly": 30000 },
            "outgoings": {
                "rentMortgage": "79228162514264337593543950335",
                "food": "79228162514264337593543950335"
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_region_rejected() {
    let (status, result) = post_breakdown(json!({
        "grossYearly": 30000,
        "region": "wales"
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "UNKNOWN_CONFIGURATION");
}

#[tokio::test]
async fn test_non_numeric_salary_rejected() {
    let (status, result) = post_breakdown(json!({ "grossYearly": "lots" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_unknown_outgoings_category_rejected() {
    let (status, result) = post(
        create_router_for_test(),
        "/budget",
        json!({
            "salary": { "grossYearly": 30000 },
            "outgoings": { "yacht": 900 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "UNKNOWN_CONFIGURATION");
}

#[tokio::test]
async fn test_budget_with_invalid_salary_rejected() {
    let (status, result) = post(
        create_router_for_test(),
        "/budget",
        json!({
            "salary": { "grossYearly": -1 },
            "outgoings": {}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}
