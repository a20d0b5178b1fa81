use foodflow::prediction::{
    PredictionErrorKind,
    decode::{
        decode_demand_payload, decode_error_body, decode_health_payload, decode_route_payload,
        decode_spoilage_payload,
    },
};
use serde_json::json;

use super::{demand_payload, route_payload, spoilage_payload};

#[test]
fn given_valid_route_payload_when_decoded_then_items_and_rank_order_survive() {
    let set = decode_route_payload(&route_payload()).expect("payload should decode");

    assert_eq!(set.len(), 2);
    let ids: Vec<&str> = set.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["P002", "P004"]);

    let candidates = set.candidates_of("P002").expect("item should exist");
    let ranked: Vec<&str> = candidates.iter().map(|c| c.recipient_id.as_str()).collect();
    assert_eq!(ranked, vec!["NGO3", "NGO1"]);
    assert_eq!(candidates[0].name, "Harvest Share");
    assert_eq!(candidates[0].distance_km, 2.41);

    let location = set.store_location().expect("store location should decode");
    assert_eq!(location.lat, 12.9716);
}

#[test]
fn given_empty_routes_when_decoded_then_empty_set_is_success() {
    let set = decode_route_payload(&json!({ "optimized_routes": [] }))
        .expect("empty routes are a valid success");
    assert!(set.is_empty());
    assert!(set.store_location().is_none());
}

#[test]
fn given_missing_routes_array_when_decoded_then_invalid_response() {
    let err = decode_route_payload(&json!({ "routes": [] })).expect_err("must reject");
    assert_eq!(err.kind, PredictionErrorKind::InvalidResponse);
    assert!(!err.retryable);
}

#[test]
fn given_out_of_range_risk_score_when_decoded_then_invalid_response() {
    let mut payload = route_payload();
    payload["optimized_routes"][0]["risk_score"] = json!(140.0);

    let err = decode_route_payload(&payload).expect_err("must reject");
    assert_eq!(err.kind, PredictionErrorKind::InvalidResponse);
    assert!(err.message.contains("risk_score"));
}

#[test]
fn given_negative_distance_when_decoded_then_invalid_response() {
    let mut payload = route_payload();
    payload["optimized_routes"][0]["recommended_ngos"][1]["distance_km"] = json!(-0.5);

    let err = decode_route_payload(&payload).expect_err("must reject");
    assert_eq!(err.kind, PredictionErrorKind::InvalidResponse);
    assert!(err.message.contains("distance_km"));
}

#[test]
fn given_zero_quantity_when_decoded_then_invalid_response() {
    let mut payload = route_payload();
    payload["optimized_routes"][1]["quantity"] = json!(0);

    let err = decode_route_payload(&payload).expect_err("must reject");
    assert_eq!(err.kind, PredictionErrorKind::InvalidResponse);
}

#[test]
fn given_missing_candidate_field_when_decoded_then_invalid_response() {
    let mut payload = route_payload();
    payload["optimized_routes"][0]["recommended_ngos"][0]
        .as_object_mut()
        .expect("candidate is an object")
        .remove("ngo_id");

    let err = decode_route_payload(&payload).expect_err("must reject");
    assert_eq!(err.kind, PredictionErrorKind::InvalidResponse);
    assert!(err.message.contains("ngo_id"));
}

#[test]
fn given_duplicate_product_ids_when_decoded_then_invalid_response() {
    let mut payload = route_payload();
    payload["optimized_routes"][1]["product_id"] = json!("P002");

    let err = decode_route_payload(&payload).expect_err("must reject");
    assert_eq!(err.kind, PredictionErrorKind::InvalidResponse);
    assert!(err.message.contains("P002"));
}

#[test]
fn given_wrong_type_quantity_when_decoded_then_invalid_response() {
    let mut payload = route_payload();
    payload["optimized_routes"][0]["quantity"] = json!("fifty");

    let err = decode_route_payload(&payload).expect_err("must reject");
    assert_eq!(err.kind, PredictionErrorKind::InvalidResponse);
}

#[test]
fn given_valid_demand_payload_when_decoded_then_points_survive_in_order() {
    let forecast = decode_demand_payload(&demand_payload()).expect("payload should decode");

    assert_eq!(forecast.product_id, "P001");
    assert_eq!(forecast.total_demand, 434);
    assert_eq!(forecast.points.len(), 7);
    assert_eq!(forecast.points[0].date, "2026-08-08");
    assert_eq!(forecast.points[6].value, 62);
}

#[test]
fn given_empty_demand_forecast_when_decoded_then_invalid_response() {
    let mut payload = demand_payload();
    payload["forecast"] = json!([]);

    let err = decode_demand_payload(&payload).expect_err("must reject");
    assert_eq!(err.kind, PredictionErrorKind::InvalidResponse);
}

#[test]
fn given_valid_spoilage_payload_when_decoded_then_outlook_survives() {
    let outlook = decode_spoilage_payload(&spoilage_payload()).expect("payload should decode");

    assert_eq!(outlook.product_id, "P002");
    assert_eq!(outlook.avg_risk, 68.4);
    assert_eq!(outlook.points.len(), 7);
    assert_eq!(outlook.points[3].risk_score, 68.9);
}

#[test]
fn given_out_of_range_avg_risk_when_decoded_then_invalid_response() {
    let mut payload = spoilage_payload();
    payload["avg_risk"] = json!(112.3);

    let err = decode_spoilage_payload(&payload).expect_err("must reject");
    assert_eq!(err.kind, PredictionErrorKind::InvalidResponse);
    assert!(err.message.contains("avg_risk"));
}

#[test]
fn given_health_payload_when_decoded_then_model_inventory_survives() {
    let health = decode_health_payload(&json!({
        "status": "healthy",
        "models_available": true,
        "demand_models_found": ["demand_model_P001.pkl", "demand_model_P002.pkl"]
    }))
    .expect("payload should decode");

    assert_eq!(health.status, "healthy");
    assert!(health.models_available);
    assert_eq!(health.demand_models_found.len(), 2);
}

#[test]
fn given_service_error_body_when_decoded_then_message_is_extracted() {
    assert_eq!(
        decode_error_body(r#"{"error": "Model for P009 not found"}"#),
        Some("Model for P009 not found".to_string())
    );
    assert_eq!(decode_error_body("<html>boom</html>"), None);
    assert_eq!(decode_error_body(r#"{"status": "ok"}"#), None);
}
