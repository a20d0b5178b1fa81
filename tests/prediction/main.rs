use serde_json::{Value, json};

mod decode;

pub fn route_payload() -> Value {
    json!({
        "store_location": { "lat": 12.9716, "lon": 77.5946 },
        "optimized_routes": [
            {
                "product_id": "P002",
                "product_name": "Product P002",
                "risk_score": 72.5,
                "quantity": 50,
                "recommended_ngos": [
                    {
                        "ngo_id": "NGO3",
                        "ngo_name": "Harvest Share",
                        "distance_km": 2.41,
                        "suitability_score": 87.9,
                        "address": "4 Temple Street"
                    },
                    {
                        "ngo_id": "NGO1",
                        "ngo_name": "Daily Bread Trust",
                        "distance_km": 5.02,
                        "suitability_score": 74.9,
                        "address": "22 Lake View Road"
                    }
                ]
            },
            {
                "product_id": "P004",
                "product_name": "Product P004",
                "risk_score": 51.0,
                "quantity": 20,
                "recommended_ngos": [
                    {
                        "ngo_id": "NGO1",
                        "ngo_name": "Daily Bread Trust",
                        "distance_km": 5.02,
                        "suitability_score": 74.9,
                        "address": "22 Lake View Road"
                    }
                ]
            }
        ]
    })
}

pub fn demand_payload() -> Value {
    json!({
        "product_id": "P001",
        "total_demand": 434,
        "forecast": [
            { "date": "2026-08-08", "value": 58 },
            { "date": "2026-08-09", "value": 61 },
            { "date": "2026-08-10", "value": 63 },
            { "date": "2026-08-11", "value": 60 },
            { "date": "2026-08-12", "value": 64 },
            { "date": "2026-08-13", "value": 66 },
            { "date": "2026-08-14", "value": 62 }
        ]
    })
}

pub fn spoilage_payload() -> Value {
    json!({
        "product_id": "P002",
        "avg_risk": 68.4,
        "forecast": [
            { "date": "2026-08-08", "risk_score": 61.2 },
            { "date": "2026-08-09", "risk_score": 64.0 },
            { "date": "2026-08-10", "risk_score": 66.7 },
            { "date": "2026-08-11", "risk_score": 68.9 },
            { "date": "2026-08-12", "risk_score": 71.3 },
            { "date": "2026-08-13", "risk_score": 73.0 },
            { "date": "2026-08-14", "risk_score": 73.9 }
        ]
    })
}
