use serde::Deserialize;

use crate::types::{CarInput, PredictError};

// ---------- Static code tables ----------

/// Brand name -> integer code, as used when the model was trained.
/// Codes are stable; appending is fine, renumbering is not.
pub const BRAND_CODES: [(&str, i64); 32] = [
    ("Maruti", 1),
    ("Skoda", 2),
    ("Honda", 3),
    ("Hyundai", 4),
    ("Toyota", 5),
    ("Ford", 6),
    ("Renault", 7),
    ("Mahindra", 8),
    ("Tata", 9),
    ("Chevrolet", 10),
    ("Fiat", 11),
    ("Datsun", 12),
    ("Jeep", 13),
    ("Mercedes-Benz", 14),
    ("Mitsubishi", 15),
    ("Audi", 16),
    ("Volkswagen", 17),
    ("BMW", 18),
    ("Nissan", 19),
    ("Lexus", 20),
    ("Jaguar", 21),
    ("Land", 22),
    ("MG", 23),
    ("Volvo", 24),
    ("Daewoo", 25),
    ("Kia", 26),
    ("Force", 27),
    ("Ambassador", 28),
    ("Ashok", 29),
    ("Isuzu", 30),
    ("Opel", 31),
    ("Peugeot", 32),
];

pub fn brand_code(name: &str) -> Option<i64> {
    BRAND_CODES
        .iter()
        .find(|(brand, _)| *brand == name)
        .map(|(_, code)| *code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Fuel {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

impl Fuel {
    pub fn code(self) -> i64 {
        match self {
            Fuel::Petrol => 0,
            Fuel::Diesel => 1,
            Fuel::Electric => 2,
            Fuel::Hybrid => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Transmission {
    Manual,
    Automatic,
}

impl Transmission {
    pub fn code(self) -> i64 {
        match self {
            Transmission::Manual => 0,
            Transmission::Automatic => 1,
        }
    }
}

// ---------- Feature record ----------

/// Column names in training order. The model artifact has no schema of its
/// own; this order IS the contract.
pub const FEATURE_COLUMNS: [&str; 9] = [
    "year",
    "km_driven",
    "fuel",
    "transmission",
    "mileage",
    "engine",
    "max_power",
    "seats",
    "Brand_Code",
];

/// One encoded row, fields in training order (see FEATURE_COLUMNS).
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub year: i32,
    pub km_driven: u32,
    pub fuel: i64,
    pub transmission: i64,
    pub mileage: f32,
    pub engine: u32,
    pub max_power: u32,
    pub seats: u8,
    pub brand_code: i64,
}

impl FeatureRecord {
    /// The row the model actually consumes, in column order.
    pub fn as_row(&self) -> [f32; 9] {
        [
            self.year as f32,
            self.km_driven as f32,
            self.fuel as f32,
            self.transmission as f32,
            self.mileage,
            self.engine as f32,
            self.max_power as f32,
            self.seats as f32,
            self.brand_code as f32,
        ]
    }
}

/// Map raw selections to the encoded record. Pure: no state, identical
/// inputs yield identical records. The only fallible lookup is the brand
/// table; fuel and transmission are enums, so their codes are total.
pub fn encode(input: &CarInput) -> Result<FeatureRecord, PredictError> {
    let brand_code =
        brand_code(&input.brand).ok_or_else(|| PredictError::UnknownBrand(input.brand.clone()))?;

    Ok(FeatureRecord {
        year: input.year,
        km_driven: input.km_driven,
        fuel: input.fuel.code(),
        transmission: input.transmission.code(),
        mileage: input.mileage,
        engine: input.engine,
        max_power: input.max_power,
        seats: input.seats,
        brand_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_codes_are_unique_and_dense() {
        let mut codes: Vec<i64> = BRAND_CODES.iter().map(|(_, c)| *c).collect();
        codes.sort_unstable();
        let expected: Vec<i64> = (1..=BRAND_CODES.len() as i64).collect();
        assert_eq!(codes, expected);
    }

    #[test]
    fn unknown_brand_is_an_error_not_a_panic() {
        let input = CarInput {
            brand: "DeLorean".to_string(),
            year: 2018,
            km_driven: 30000,
            fuel: Fuel::Petrol,
            transmission: Transmission::Manual,
            mileage: 15.0,
            engine: 1200,
            max_power: 100,
            seats: 5,
        };
        match encode(&input) {
            Err(PredictError::UnknownBrand(b)) => assert_eq!(b, "DeLorean"),
            other => panic!("expected UnknownBrand, got {:?}", other),
        }
    }
}
