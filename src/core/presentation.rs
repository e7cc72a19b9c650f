//! Display helpers shared by the HTML pages and the JSON API

use serde::Serialize;

use crate::core::vehicle::{BodyType, FuelType, Vehicle};

/// Months in the financing estimate
pub const FINANCING_MONTHS: u32 = 60;

/// Characters of description shown in the list view
pub const EXCERPT_LEN: usize = 120;

/// Mileage under which a vehicle counts as "Like New"
pub const LIKE_NEW_MILEAGE: u32 = 10_000;

/// "1234567" -> "1,234,567"
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar USD price, e.g. `$25,945`
pub fn format_price(price: u32) -> String {
    format!("${}", group_thousands(u64::from(price)))
}

/// Mileage with separators, e.g. `15,000`
pub fn format_mileage(mileage: u32) -> String {
    group_thousands(u64::from(mileage))
}

/// Estimated monthly payment over [`FINANCING_MONTHS`] with nothing down
///
/// Rounds half up to the whole dollar.
pub fn monthly_payment(price: u32) -> u32 {
    price.saturating_add(FINANCING_MONTHS / 2) / FINANCING_MONTHS
}

/// Condition badge
pub fn condition_label(mileage: u32) -> &'static str {
    if mileage < LIKE_NEW_MILEAGE {
        "Like New"
    } else {
        "Used"
    }
}

/// Dealer stock number
pub fn stock_number(vehicle: &Vehicle) -> String {
    format!("VD{}2025", vehicle.id)
}

/// Display VIN
pub fn display_vin(vehicle: &Vehicle) -> String {
    format!("1HD{}A{}CD123456", vehicle.id, vehicle.year)
}

/// First [`EXCERPT_LEN`] characters, with `...` when cut
pub fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Technical specifications shown on the detail page
///
/// Values are representative figures per powertrain and body style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecSheet {
    pub engine: String,
    pub transmission: String,
    pub drive_type: &'static str,
    pub fuel_economy: &'static str,
    pub length: &'static str,
    pub width: &'static str,
    pub height: &'static str,
    pub cargo_space: &'static str,
}

impl SpecSheet {
    pub fn for_vehicle(vehicle: &Vehicle) -> Self {
        let engine = match vehicle.fuel_type {
            FuelType::Electric => "Electric Motor".to_string(),
            FuelType::Hybrid => "Hybrid System".to_string(),
            fuel => format!("{} {} Engine", vehicle.make, fuel),
        };

        let drive_type = if vehicle.make == "Tesla" {
            "All-Wheel Drive"
        } else if vehicle.body_type == BodyType::Truck {
            "4x4"
        } else {
            "Front-Wheel Drive"
        };

        let fuel_economy = match vehicle.fuel_type {
            FuelType::Electric => "120 MPGe",
            FuelType::Hybrid => "44 MPG Combined",
            _ => "24 MPG Combined",
        };

        let (length, width, height) = match vehicle.body_type {
            BodyType::Truck => ("231.7 in", "79.9 in", "75.6 in"),
            BodyType::Suv => ("190.7 in", "75.8 in", "68.1 in"),
            _ => ("185.4 in", "72.4 in", "56.9 in"),
        };

        let cargo_space = match vehicle.body_type {
            BodyType::Truck => "Bed: 67.0 cu ft",
            BodyType::Suv => "37.6 cu ft",
            BodyType::Hatchback => "24.5 cu ft",
            _ => "16.7 cu ft",
        };

        Self {
            engine,
            transmission: vehicle.transmission.to_string(),
            drive_type,
            fuel_economy,
            length,
            width,
            height,
            cargo_space,
        }
    }
}

/// A vehicle prepared for a listing card or row
#[derive(Debug, Clone, Serialize)]
pub struct VehicleCard {
    pub id: u32,
    pub title: String,
    pub price: String,
    pub year: u16,
    pub mileage: String,
    pub body_type: &'static str,
    pub fuel_type: &'static str,
    pub transmission: &'static str,
    pub image: String,
    pub excerpt: String,
}

impl From<&Vehicle> for VehicleCard {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            title: vehicle.title(),
            price: format_price(vehicle.price),
            year: vehicle.year,
            mileage: format_mileage(vehicle.mileage),
            body_type: vehicle.body_type.label(),
            fuel_type: vehicle.fuel_type.label(),
            transmission: vehicle.transmission.label(),
            image: vehicle.cover_image().unwrap_or_default().to_string(),
            excerpt: excerpt(&vehicle.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed;

    fn seeded(id: u32) -> Vehicle {
        seed::vehicles().into_iter().find(|v| v.id == id).unwrap()
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_price_and_mileage() {
        assert_eq!(format_price(25_945), "$25,945");
        assert_eq!(format_price(0), "$0");
        assert_eq!(format_mileage(15_000), "15,000");
    }

    #[test]
    fn test_monthly_payment_rounds_half_up() {
        assert_eq!(monthly_payment(39_990), 667);
        assert_eq!(monthly_payment(30), 1);
        assert_eq!(monthly_payment(29), 0);
        assert_eq!(monthly_payment(25_945), 432);
    }

    #[test]
    fn test_condition_label() {
        assert_eq!(condition_label(9_999), "Like New");
        assert_eq!(condition_label(10_000), "Used");
    }

    #[test]
    fn test_identifiers() {
        let camry = seeded(1);
        assert_eq!(stock_number(&camry), "VD12025");
        assert_eq!(display_vin(&camry), "1HD1A2022CD123456");
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short"), "short");
        let long = "a".repeat(130);
        let cut = excerpt(&long);
        assert_eq!(cut.len(), 123);
        assert!(cut.ends_with("..."));
        assert_eq!(excerpt(&"é".repeat(120)), "é".repeat(120));
    }

    #[test]
    fn test_spec_sheet_variants() {
        let tesla = SpecSheet::for_vehicle(&seeded(3));
        assert_eq!(tesla.engine, "Electric Motor");
        assert_eq!(tesla.drive_type, "All-Wheel Drive");
        assert_eq!(tesla.fuel_economy, "120 MPGe");
        assert_eq!(tesla.cargo_space, "16.7 cu ft");

        let truck = SpecSheet::for_vehicle(&seeded(4));
        assert_eq!(truck.engine, "Ford Gasoline Engine");
        assert_eq!(truck.drive_type, "4x4");
        assert_eq!(truck.length, "231.7 in");
        assert_eq!(truck.cargo_space, "Bed: 67.0 cu ft");

        let rav4 = SpecSheet::for_vehicle(&seeded(6));
        assert_eq!(rav4.engine, "Hybrid System");
        assert_eq!(rav4.fuel_economy, "44 MPG Combined");
        assert_eq!(rav4.height, "68.1 in");

        let bolt = SpecSheet::for_vehicle(&seeded(8));
        assert_eq!(bolt.drive_type, "Front-Wheel Drive");
        assert_eq!(bolt.cargo_space, "24.5 cu ft");
    }

    #[test]
    fn test_vehicle_card() {
        let card = VehicleCard::from(&seeded(7));
        assert_eq!(card.title, "2021 Mazda CX-5");
        assert_eq!(card.price, "$27,999");
        assert_eq!(card.mileage, "25,000");
        assert_eq!(card.body_type, "SUV");
        assert_eq!(card.image, "/placeholder.svg");
    }
}
