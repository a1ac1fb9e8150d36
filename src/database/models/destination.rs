use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// The fixed set of destination categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "destination_type")]
pub enum DestinationType {
    Beach,
    Mountain,
    City,
    Cultural,
    Adventure,
}

impl DestinationType {
    pub const ALL: [DestinationType; 5] = [
        DestinationType::Beach,
        DestinationType::Mountain,
        DestinationType::City,
        DestinationType::Cultural,
        DestinationType::Adventure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationType::Beach => "Beach",
            DestinationType::Mountain => "Mountain",
            DestinationType::City => "City",
            DestinationType::Cultural => "Cultural",
            DestinationType::Adventure => "Adventure",
        }
    }
}

impl fmt::Display for DestinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DestinationType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beach" => Ok(DestinationType::Beach),
            "Mountain" => Ok(DestinationType::Mountain),
            "City" => Ok(DestinationType::City),
            "Cultural" => Ok(DestinationType::Cultural),
            "Adventure" => Ok(DestinationType::Adventure),
            _ => Err(()),
        }
    }
}

/// A tourism destination entry, owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub country_code: String,
    #[serde(rename = "type")]
    pub kind: DestinationType,
    pub last_modif: DateTime<Utc>,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Destination {
    /// Ownership predicate: mutation and deletion are allowed only for
    /// the owning user.
    pub fn owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(owner: i32) -> Destination {
        Destination {
            id: 7,
            name: "Playa del Carmen".into(),
            description: "A beach town on the Riviera Maya".into(),
            country_code: "MX".into(),
            kind: DestinationType::Beach,
            last_modif: Utc::now(),
            user_id: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owner_passes_ownership_check() {
        assert!(sample(3).owned_by(3));
    }

    #[test]
    fn non_owner_fails_ownership_check() {
        assert!(!sample(3).owned_by(4));
    }

    #[test]
    fn type_parses_all_known_variants() {
        for kind in DestinationType::ALL {
            assert_eq!(kind.as_str().parse::<DestinationType>(), Ok(kind));
        }
    }

    #[test]
    fn type_rejects_unknown_values() {
        assert!("Desert".parse::<DestinationType>().is_err());
        assert!("beach".parse::<DestinationType>().is_err());
    }

    #[test]
    fn wire_format_uses_camel_case_and_type() {
        let value = serde_json::to_value(sample(3)).unwrap();
        assert_eq!(value["type"], "Beach");
        assert_eq!(value["countryCode"], "MX");
        assert_eq!(value["userId"], 3);
        assert!(value.get("lastModif").is_some());
        assert!(value.get("kind").is_none());
    }
}
