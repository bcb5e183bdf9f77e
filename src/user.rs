use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::{FieldDef, FieldKind, Record, Schema, Tabular};

/// Seed data served when no users file is configured
pub const DEMO_USERS_JSON: &str = include_str!("./static/users.json");

/// A user shown in the directory and exported to the report
///
/// Field order here is the column order of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    pub name: String,

    /// Date of birth, serialized as `YYYY-MM-DD`
    pub dob: NaiveDate,

    pub hair_color: String,
}

impl Tabular for User {
    fn schema() -> Schema {
        Schema::new(vec![
            FieldDef::new("id", "ID", FieldKind::Integer),
            FieldDef::new("name", "Name", FieldKind::Text),
            FieldDef::new("dob", "Date of Birth", FieldKind::Date),
            FieldDef::new("hair_color", "Hair Color", FieldKind::Text),
        ])
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("name", self.name.as_str())
            .with("dob", self.dob)
            .with("hair_color", self.hair_color.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_follows_schema_order() {
        let user = User {
            id: 1,
            name: "John".to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            hair_color: "blond".to_string(),
        };
        let record = user.to_record();
        assert!(record.has_fields(&User::schema().names()));
        assert_eq!(
            record.values().map(|v| v.to_string()).collect::<Vec<_>>(),
            vec!["1", "John", "1990-01-01", "blond"]
        );
    }

    #[test]
    fn test_dob_serializes_as_iso_date() {
        let user = User {
            id: 3,
            name: "Jill".to_string(),
            dob: NaiveDate::from_ymd_opt(1992, 1, 1).unwrap(),
            hair_color: "red".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["dob"], "1992-01-01");
    }

    #[test]
    fn test_demo_json_parses() {
        let users: Vec<User> = serde_json::from_str(DEMO_USERS_JSON).unwrap();
        let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["John", "Jack", "Jill", "Jane"]);
    }
}
