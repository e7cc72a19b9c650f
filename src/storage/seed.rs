//! Seed data for the in-memory stores

use crate::core::product::Product;
use crate::core::vehicle::{BodyType, FuelType, Transmission, Vehicle};

const PLACEHOLDER: &str = "/placeholder.svg";

#[allow(clippy::too_many_arguments)]
fn vehicle(
    id: u32,
    make: &str,
    model: &str,
    year: u16,
    price: u32,
    mileage: u32,
    fuel_type: FuelType,
    body_type: BodyType,
    color: &str,
    description: &str,
    features: &[&str],
) -> Vehicle {
    Vehicle {
        id,
        make: make.to_string(),
        model: model.to_string(),
        year,
        price,
        mileage,
        fuel_type,
        transmission: Transmission::Automatic,
        body_type,
        color: color.to_string(),
        description: description.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        images: vec![PLACEHOLDER.to_string(), PLACEHOLDER.to_string()],
    }
}

/// The eight vehicles the site ships with
pub fn vehicles() -> Vec<Vehicle> {
    vec![
        vehicle(
            1,
            "Toyota",
            "Camry",
            2022,
            25_945,
            15_000,
            FuelType::Gasoline,
            BodyType::Sedan,
            "Silver",
            "Well-maintained Toyota Camry with low mileage. Features include backup camera, Bluetooth connectivity, and more.",
            &[
                "Backup Camera",
                "Bluetooth",
                "Cruise Control",
                "Power Windows",
                "Keyless Entry",
            ],
        ),
        vehicle(
            2,
            "Honda",
            "CR-V",
            2021,
            28_500,
            22_000,
            FuelType::Gasoline,
            BodyType::Suv,
            "Blue",
            "Spacious Honda CR-V with excellent fuel economy and plenty of cargo space.",
            &[
                "All-Wheel Drive",
                "Backup Camera",
                "Heated Seats",
                "Apple CarPlay",
                "Android Auto",
            ],
        ),
        vehicle(
            3,
            "Tesla",
            "Model 3",
            2023,
            39_990,
            5_000,
            FuelType::Electric,
            BodyType::Sedan,
            "Red",
            "Nearly new Tesla Model 3 with premium autopilot features and long-range battery.",
            &[
                "Autopilot",
                "Premium Sound System",
                "Glass Roof",
                "Heated Seats",
                "Navigation",
            ],
        ),
        vehicle(
            4,
            "Ford",
            "F-150",
            2020,
            35_750,
            30_000,
            FuelType::Gasoline,
            BodyType::Truck,
            "Black",
            "Powerful Ford F-150 with towing package and bed liner. Perfect for work or play.",
            &[
                "Towing Package",
                "Bed Liner",
                "Backup Camera",
                "Bluetooth",
                "4-Wheel Drive",
            ],
        ),
        vehicle(
            5,
            "BMW",
            "3 Series",
            2021,
            42_000,
            18_000,
            FuelType::Gasoline,
            BodyType::Sedan,
            "White",
            "Luxury BMW 3 Series with premium features and sporty handling.",
            &[
                "Leather Seats",
                "Sunroof",
                "Navigation",
                "Premium Sound System",
                "Parking Sensors",
            ],
        ),
        vehicle(
            6,
            "Toyota",
            "RAV4 Hybrid",
            2022,
            32_500,
            12_000,
            FuelType::Hybrid,
            BodyType::Suv,
            "Green",
            "Eco-friendly Toyota RAV4 Hybrid with excellent fuel efficiency and spacious interior.",
            &[
                "All-Wheel Drive",
                "Backup Camera",
                "Lane Departure Warning",
                "Adaptive Cruise Control",
                "Keyless Entry",
            ],
        ),
        vehicle(
            7,
            "Mazda",
            "CX-5",
            2021,
            27_999,
            25_000,
            FuelType::Gasoline,
            BodyType::Suv,
            "Red",
            "Stylish Mazda CX-5 with upscale interior and engaging driving dynamics.",
            &[
                "Leather Seats",
                "Bluetooth",
                "Backup Camera",
                "Blind Spot Monitoring",
                "Sunroof",
            ],
        ),
        vehicle(
            8,
            "Chevrolet",
            "Bolt EV",
            2022,
            31_995,
            8_000,
            FuelType::Electric,
            BodyType::Hatchback,
            "Blue",
            "All-electric Chevrolet Bolt EV with impressive range and tech features.",
            &[
                "Quick Charging",
                "Heated Seats",
                "Apple CarPlay",
                "Android Auto",
                "Backup Camera",
            ],
        ),
    ]
}

/// Accessories for the `/public` store
///
/// The last entry is out of stock and therefore not active.
pub fn products() -> Vec<Product> {
    [
        (1, "All-Weather Floor Mats", 89.99, 24),
        (2, "Roof Cargo Box", 449.0, 6),
        (3, "Dash Camera", 129.5, 15),
        (4, "Level 2 Home Charger", 599.0, 0),
    ]
    .into_iter()
    .map(|(id, name, price, stock)| Product {
        id,
        name: name.to_string(),
        price,
        image_url: PLACEHOLDER.to_string(),
        stock,
    })
    .collect()
}
