use chrono::NaiveDate;
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Date format used everywhere a date leaves the process as text
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Scalar value held by a single record field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Whole number, written as a numeric cell
    Integer(i64),

    /// Free text, written as a string cell
    Text(String),

    /// Calendar date, written as its ISO-8601 text
    Date(NaiveDate),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format(ISO_DATE)),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<&Value> for JsonValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Integer(n) => JsonValue::from(*n),
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::Date(_) => JsonValue::String(value.to_string()),
        }
    }
}

/// Type tag of a declared field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
    Date,
}

/// One named, typed column of a schema
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDef {
    /// Machine name, used as the header cell and the JSON key
    pub name: String,

    /// Human readable label shown by the UI
    pub title: String,

    pub kind: FieldKind,
}

impl FieldDef {
    pub fn new(name: &str, title: &str, kind: FieldKind) -> Self {
        FieldDef {
            name: name.to_string(),
            title: title.to_string(),
            kind,
        }
    }
}

/// Ordered list of fields shared by a data source and the exporter
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Schema { fields }
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Field names in column order
    pub fn names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Ordered mapping from field name to value
///
/// Iteration order is insertion order. Nothing checks that two records share
/// the same fields; that is the exporter's job.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    /// Builder-style insert
    ///
    /// # Examples
    /// ```
    /// use user_report::record::Record;
    ///
    /// let record = Record::new().with("id", 1).with("name", "John");
    /// assert_eq!(record.keys().collect::<Vec<_>>(), vec!["id", "name"]);
    /// ```
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    /// Appends a field, or overwrites it in place if the name already exists
    pub fn push(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when this record's field names match `names` exactly, in order
    pub fn has_fields(&self, names: &[String]) -> bool {
        self.fields.len() == names.len() && self.keys().zip(names).all(|(k, n)| k == n)
    }
}

impl From<&Record> for JsonValue {
    fn from(record: &Record) -> Self {
        let map: Map<String, JsonValue> = record
            .iter()
            .map(|(k, v)| (k.to_string(), JsonValue::from(v)))
            .collect();
        JsonValue::Object(map)
    }
}

/// Types with a static, declared schema
///
/// `to_record` must yield the fields of `schema()` in the same order.
pub trait Tabular {
    fn schema() -> Schema;

    fn to_record(&self) -> Record;
}
