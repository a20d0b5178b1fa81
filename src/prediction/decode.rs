use serde_json::Value;

use crate::{
    dispatch::{InventoryItem, RecipientCandidate, RecommendationSet, StoreLocation},
    prediction::{
        error::{PredictionError, invalid_response},
        types::{DemandForecast, DemandPoint, RiskPoint, ServiceHealth, SpoilageOutlook},
    },
};

/// Decodes a `GET /predict/route` payload. Item order and candidate order are
/// taken as-is; they carry the recommendation rank.
pub fn decode_route_payload(payload: &Value) -> Result<RecommendationSet, PredictionError> {
    let routes = payload
        .get("optimized_routes")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid_response("route payload missing 'optimized_routes' array"))?;

    let mut items = Vec::with_capacity(routes.len());
    for route in routes {
        items.push(decode_route_item(route)?);
    }

    let store_location = match payload.get("store_location") {
        None | Some(Value::Null) => None,
        Some(value) => Some(decode_store_location(value)?),
    };

    RecommendationSet::new(items, store_location)
        .map_err(|duplicate| invalid_response(format!("route payload repeats {}", duplicate)))
}

fn decode_route_item(value: &Value) -> Result<InventoryItem, PredictionError> {
    let id = required_string(value, "product_id", "route item")?;
    let name = required_string(value, "product_name", "route item")?;
    let risk_score = required_score(value, "risk_score", &format!("route item '{}'", id))?;

    let quantity = value
        .get("quantity")
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            invalid_response(format!(
                "route item '{}' missing non-negative integer 'quantity'",
                id
            ))
        })?;
    if quantity == 0 {
        return Err(invalid_response(format!(
            "route item '{}' has zero quantity",
            id
        )));
    }
    let quantity = u32::try_from(quantity).map_err(|_| {
        invalid_response(format!("route item '{}' quantity {} overflows", id, quantity))
    })?;

    let ngos = value
        .get("recommended_ngos")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            invalid_response(format!(
                "route item '{}' missing 'recommended_ngos' array",
                id
            ))
        })?;
    let mut candidates = Vec::with_capacity(ngos.len());
    for ngo in ngos {
        candidates.push(decode_candidate(ngo, &id)?);
    }

    Ok(InventoryItem {
        id,
        name,
        risk_score,
        quantity,
        candidates,
    })
}

fn decode_candidate(value: &Value, item_id: &str) -> Result<RecipientCandidate, PredictionError> {
    let context = format!("candidate for item '{}'", item_id);
    let recipient_id = required_string(value, "ngo_id", &context)?;
    let name = required_string(value, "ngo_name", &context)?;
    let address = required_string(value, "address", &context)?;

    let distance_km = value
        .get("distance_km")
        .and_then(Value::as_f64)
        .ok_or_else(|| invalid_response(format!("{} missing number 'distance_km'", context)))?;
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(invalid_response(format!(
            "{} has invalid distance_km {}",
            context, distance_km
        )));
    }

    let suitability_score = required_score(value, "suitability_score", &context)?;

    Ok(RecipientCandidate {
        recipient_id,
        name,
        distance_km,
        suitability_score,
        address,
    })
}

fn decode_store_location(value: &Value) -> Result<StoreLocation, PredictionError> {
    let lat = value.get("lat").and_then(Value::as_f64);
    let lon = value.get("lon").and_then(Value::as_f64);
    match (lat, lon) {
        (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
            Ok(StoreLocation { lat, lon })
        }
        _ => Err(invalid_response(
            "store_location must carry finite 'lat' and 'lon' numbers",
        )),
    }
}

/// Decodes a `POST /predict/demand` payload.
pub fn decode_demand_payload(payload: &Value) -> Result<DemandForecast, PredictionError> {
    let product_id = required_string(payload, "product_id", "demand payload")?;
    let total_demand = payload
        .get("total_demand")
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            invalid_response("demand payload missing non-negative integer 'total_demand'")
        })?;

    let forecast = required_forecast(payload, "demand payload")?;
    let mut points = Vec::with_capacity(forecast.len());
    for entry in forecast {
        let date = required_string(entry, "date", "demand forecast entry")?;
        let value = entry.get("value").and_then(Value::as_u64).ok_or_else(|| {
            invalid_response(format!(
                "demand forecast entry '{}' missing non-negative integer 'value'",
                date
            ))
        })?;
        points.push(DemandPoint { date, value });
    }

    Ok(DemandForecast {
        product_id,
        total_demand,
        points,
    })
}

/// Decodes a `POST /predict/spoilage` payload.
pub fn decode_spoilage_payload(payload: &Value) -> Result<SpoilageOutlook, PredictionError> {
    let product_id = required_string(payload, "product_id", "spoilage payload")?;
    let avg_risk = required_score(payload, "avg_risk", "spoilage payload")?;

    let forecast = required_forecast(payload, "spoilage payload")?;
    let mut points = Vec::with_capacity(forecast.len());
    for entry in forecast {
        let date = required_string(entry, "date", "spoilage forecast entry")?;
        let risk_score =
            required_score(entry, "risk_score", &format!("spoilage entry '{}'", date))?;
        points.push(RiskPoint { date, risk_score });
    }

    Ok(SpoilageOutlook {
        product_id,
        avg_risk,
        points,
    })
}

/// Decodes a `GET /health` payload.
pub fn decode_health_payload(payload: &Value) -> Result<ServiceHealth, PredictionError> {
    let status = required_string(payload, "status", "health payload")?;
    let models_available = payload
        .get("models_available")
        .and_then(Value::as_bool)
        .ok_or_else(|| invalid_response("health payload missing boolean 'models_available'"))?;
    let demand_models_found = payload
        .get("demand_models_found")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(ServiceHealth {
        status,
        models_available,
        demand_models_found,
    })
}

/// Service-reported error bodies are `{"error": "..."}`.
pub fn decode_error_body(body: &str) -> Option<String> {
    let payload: Value = serde_json::from_str(body).ok()?;
    payload
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn required_forecast<'payload>(
    payload: &'payload Value,
    context: &str,
) -> Result<&'payload Vec<Value>, PredictionError> {
    let forecast = payload
        .get("forecast")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid_response(format!("{} missing 'forecast' array", context)))?;
    if forecast.is_empty() {
        return Err(invalid_response(format!(
            "{} carries an empty forecast",
            context
        )));
    }
    Ok(forecast)
}

fn required_string(value: &Value, field: &str, context: &str) -> Result<String, PredictionError> {
    let text = value
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| invalid_response(format!("{} missing string '{}'", context, field)))?;
    if text.trim().is_empty() {
        return Err(invalid_response(format!(
            "{} has empty '{}'",
            context, field
        )));
    }
    Ok(text.to_string())
}

fn required_score(value: &Value, field: &str, context: &str) -> Result<f64, PredictionError> {
    let score = value
        .get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| invalid_response(format!("{} missing number '{}'", context, field)))?;
    if !score.is_finite() || !(0.0..=100.0).contains(&score) {
        return Err(invalid_response(format!(
            "{} has out-of-range '{}' {}",
            context, field, score
        )));
    }
    Ok(score)
}
