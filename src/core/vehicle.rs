//! Vehicle record and its closed attribute sets

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::core::error::ValidationError;

/// Declare a closed set of labelled variants
///
/// Generates `label()`, `ALL`, `Display`, and a `FromStr` that accepts
/// exactly the display labels and reports anything else as
/// [`ValidationError::UnknownVariant`] for the given field.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal, {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Display label, also the wire value
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(ValidationError::UnknownVariant {
                        field: $field,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

labelled_enum!(
    /// Powertrain fuel
    FuelType, "fuel_type", {
        Gasoline => "Gasoline",
        Diesel => "Diesel",
        Electric => "Electric",
        Hybrid => "Hybrid",
    }
);

labelled_enum!(
    /// Gearbox kind
    Transmission, "transmission", {
        Automatic => "Automatic",
        Manual => "Manual",
    }
);

labelled_enum!(
    /// Body style
    BodyType, "body_type", {
        Sedan => "Sedan",
        Suv => "SUV",
        Truck => "Truck",
        Hatchback => "Hatchback",
        Coupe => "Coupe",
        Convertible => "Convertible",
        Wagon => "Wagon",
    }
);

/// A vehicle listed by the dealership
///
/// Records are immutable once loaded. `images[0]` is the cover image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[validate(range(min = 1))]
    pub id: u32,

    #[validate(length(min = 1))]
    pub make: String,

    #[validate(length(min = 1))]
    pub model: String,

    pub year: u16,

    /// Whole dollars
    pub price: u32,

    pub mileage: u32,

    pub fuel_type: FuelType,

    pub transmission: Transmission,

    pub body_type: BodyType,

    pub color: String,

    pub description: String,

    /// Display order
    #[serde(default)]
    pub features: Vec<String>,

    #[validate(length(min = 1))]
    pub images: Vec<String>,
}

impl Vehicle {
    /// "2022 Toyota Camry"
    pub fn title(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }

    /// Cover image, if the record has any
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_from_str() {
        for body in BodyType::ALL {
            assert_eq!(body.label().parse::<BodyType>().unwrap(), *body);
        }
        assert_eq!(BodyType::Suv.to_string(), "SUV");
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = "Steam".parse::<FuelType>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownVariant {
                field: "fuel_type",
                value: "Steam".to_string()
            }
        );
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert!("suv".parse::<BodyType>().is_err());
        assert!("automatic".parse::<Transmission>().is_err());
    }

    #[test]
    fn test_serde_uses_labels_and_camel_case() {
        let json = serde_json::json!({
            "id": 9,
            "make": "Subaru",
            "model": "Outback",
            "year": 2020,
            "price": 24000,
            "mileage": 41000,
            "fuelType": "Gasoline",
            "transmission": "Automatic",
            "bodyType": "Wagon",
            "color": "Grey",
            "description": "Roomy wagon.",
            "images": ["/placeholder.svg"]
        });
        let vehicle: Vehicle = serde_json::from_value(json).unwrap();
        assert_eq!(vehicle.body_type, BodyType::Wagon);
        assert!(vehicle.features.is_empty());
        assert_eq!(vehicle.title(), "2020 Subaru Outback");
        assert_eq!(vehicle.cover_image(), Some("/placeholder.svg"));
    }

    #[test]
    fn test_unknown_enum_fails_deserialisation() {
        let json = serde_json::json!({
            "id": 9, "make": "X", "model": "Y", "year": 2020, "price": 1,
            "mileage": 1, "fuelType": "Steam", "transmission": "Automatic",
            "bodyType": "Wagon", "color": "", "description": "", "images": ["a"]
        });
        assert!(serde_json::from_value::<Vehicle>(json).is_err());
    }

    #[test]
    fn test_validation_rejects_missing_images() {
        let vehicle = Vehicle {
            id: 1,
            make: "Ford".to_string(),
            model: "Focus".to_string(),
            year: 2019,
            price: 12000,
            mileage: 50000,
            fuel_type: FuelType::Gasoline,
            transmission: Transmission::Manual,
            body_type: BodyType::Hatchback,
            color: "Blue".to_string(),
            description: String::new(),
            features: vec![],
            images: vec![],
        };
        let errors = vehicle.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("images"));
    }
}
