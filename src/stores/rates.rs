//! Per-kilogram rates used when logging collections and contributions.

pub const WASTE_TYPES: [&str; 5] = [
    "Electronic Waste",
    "Plastic Waste",
    "Paper & Cardboard",
    "Metal Waste",
    "Mixed Waste",
];

/// Heaviest single collection or contribution accepted, in kg.
pub const MAX_WEIGHT_KG: f64 = 100_000.0;

pub fn valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight > 0.0 && weight <= MAX_WEIGHT_KG
}

/// Rupees a mitra earns per kg collected.
pub fn collection_rate(waste_type: &str) -> f64 {
    match waste_type {
        "Electronic Waste" => 30.0,
        "Plastic Waste" => 10.0,
        "Paper & Cardboard" => 15.0,
        "Metal Waste" => 55.0,
        _ => 20.0,
    }
}

/// GreenCredits a business earns per kg contributed.
pub fn credit_rate(waste_type: &str) -> f64 {
    match waste_type {
        "Electronic Waste" => 4.0,
        "Plastic Waste" => 2.0,
        "Paper & Cardboard" => 1.0,
        "Metal Waste" => 3.0,
        _ => 2.0,
    }
}

pub fn collection_earnings(waste_type: &str, weight: f64) -> f64 {
    collection_rate(waste_type) * weight
}

pub fn contribution_credits(waste_type: &str, weight: f64) -> i64 {
    (credit_rate(waste_type) * weight).floor() as i64
}

/// Tons of CO₂ saved, 0.001 t per kg, kept to three decimals.
pub fn co2_impact(weight: f64) -> f64 {
    (weight * 0.001 * 1000.0).round() / 1000.0
}
