//! Server-driven UI component tree.
//!
//! Pages are plain data: a handler builds a `Vec<Component>` and the frontend
//! renders it. Serialized with a `"type"` tag per node, the shape the prebuilt
//! frontend bundle understands.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::record::{FieldKind, Schema, Tabular};
use crate::user::User;

/// Decorative statement shown on the users page; never executed
pub const DEMO_STATEMENT: &str = "
    select u.abc, u.cd
    from user u
    inner join group g on g.abd = u.abc
    where g.a = 'Hello World'
";

/// Client-side action attached to a link or a table cell
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Navigate to `url`; `{field}` placeholders are filled from the row
    #[serde(rename = "go-to")]
    GoTo { url: String },

    /// Browser history back
    #[serde(rename = "back")]
    Back,
}

/// How a looked-up value is rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    Date,
}

/// A column of a table, or a row of a details list
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisplayLookup {
    pub field: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<DisplayMode>,

    #[serde(rename = "onClick", skip_serializing_if = "Option::is_none")]
    pub on_click: Option<Event>,
}

impl DisplayLookup {
    pub fn field(field: &str) -> Self {
        DisplayLookup {
            field: field.to_string(),
            title: None,
            mode: None,
            on_click: None,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn mode(mut self, mode: DisplayMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn on_click(mut self, event: Event) -> Self {
        self.on_click = Some(event);
        self
    }
}

/// One node of a page
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Component {
    Page {
        components: Vec<Component>,
    },
    Heading {
        text: String,
        level: u8,
    },
    Table {
        data: Vec<JsonValue>,
        columns: Vec<DisplayLookup>,
    },
    Link {
        components: Vec<Component>,
        #[serde(rename = "onClick")]
        on_click: Event,
    },
    Text {
        text: String,
    },
    Code {
        text: String,
        language: String,
    },
    Details {
        data: JsonValue,
        fields: Vec<DisplayLookup>,
    },
}

impl Component {
    pub fn heading(text: &str, level: u8) -> Self {
        Component::Heading {
            text: text.to_string(),
            level,
        }
    }

    pub fn text(text: &str) -> Self {
        Component::Text {
            text: text.to_string(),
        }
    }

    pub fn link(label: &str, on_click: Event) -> Self {
        Component::Link {
            components: vec![Component::text(label)],
            on_click,
        }
    }
}

fn go_to(url: &str) -> Event {
    Event::GoTo {
        url: url.to_string(),
    }
}

/// Lookup for a schema field with its title, and date mode for dates
fn lookup(schema: &Schema, name: &str) -> DisplayLookup {
    let mut column = DisplayLookup::field(name);
    if let Some(def) = schema.field(name) {
        column = column.title(&def.title);
        if def.kind == FieldKind::Date {
            column = column.mode(DisplayMode::Date);
        }
    }
    column
}

/// Users list: a table linking to each profile, the export link and the statement
pub fn users_page(users: &[User]) -> Vec<Component> {
    let schema = User::schema();
    let data = users
        .iter()
        .map(|u| JsonValue::from(&u.to_record()))
        .collect();

    vec![Component::Page {
        components: vec![
            Component::heading("Users", 2),
            Component::Table {
                data,
                columns: vec![
                    lookup(&schema, "name").on_click(go_to("/user/{id}/")),
                    lookup(&schema, "dob"),
                ],
            },
            Component::link("Create Excel File", go_to("excel")),
            Component::heading("Statement", 3),
            Component::Code {
                text: DEMO_STATEMENT.to_string(),
                language: "sql".to_string(),
            },
        ],
    }]
}

/// Profile page for one user
pub fn user_profile_page(user: &User) -> Vec<Component> {
    let schema = User::schema();
    let fields = schema
        .fields()
        .iter()
        .map(|f| lookup(&schema, &f.name))
        .collect();

    vec![Component::Page {
        components: vec![
            Component::heading(&user.name, 2),
            Component::link("Back", Event::Back),
            Component::Details {
                data: JsonValue::from(&user.to_record()),
                fields,
            },
        ],
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn jack() -> User {
        User {
            id: 2,
            name: "Jack".to_string(),
            dob: NaiveDate::from_ymd_opt(1991, 1, 1).unwrap(),
            hair_color: "black".to_string(),
        }
    }

    #[test]
    fn test_heading_json() {
        let json = serde_json::to_value(Component::heading("Users", 2)).unwrap();
        assert_eq!(json, json!({ "type": "Heading", "text": "Users", "level": 2 }));
    }

    #[test]
    fn test_link_json() {
        let json = serde_json::to_value(Component::link("Back", Event::Back)).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "Link",
                "components": [{ "type": "Text", "text": "Back" }],
                "onClick": { "type": "back" }
            })
        );
    }

    #[test]
    fn test_users_page_layout() {
        let page = users_page(&[jack()]);
        let json = serde_json::to_value(&page).unwrap();
        let components = json[0]["components"].as_array().unwrap();

        let types: Vec<_> = components.iter().map(|c| c["type"].clone()).collect();
        assert_eq!(types, vec!["Heading", "Table", "Link", "Heading", "Code"]);

        let table = &components[1];
        assert_eq!(table["data"][0]["name"], "Jack");
        assert_eq!(table["data"][0]["dob"], "1991-01-01");
        assert_eq!(
            table["columns"][0],
            json!({
                "field": "name",
                "title": "Name",
                "onClick": { "type": "go-to", "url": "/user/{id}/" }
            })
        );
        assert_eq!(
            table["columns"][1],
            json!({ "field": "dob", "title": "Date of Birth", "mode": "date" })
        );

        assert_eq!(components[2]["onClick"]["url"], "excel");
        assert_eq!(components[4]["language"], "sql");
        assert!(components[4]["text"].as_str().unwrap().contains("inner join group"));
    }

    #[test]
    fn test_profile_page() {
        let page = user_profile_page(&jack());
        let Component::Page { components } = &page[0] else {
            panic!("expected a page");
        };
        assert_eq!(components[0], Component::heading("Jack", 2));
        assert_eq!(components[1], Component::link("Back", Event::Back));

        let json = serde_json::to_value(&components[2]).unwrap();
        assert_eq!(json["type"], "Details");
        assert_eq!(json["data"]["hair_color"], "black");
        let fields: Vec<_> = json["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].clone())
            .collect();
        assert_eq!(fields, vec!["id", "name", "dob", "hair_color"]);
    }

    #[test]
    fn test_pages_are_pure() {
        let users = vec![jack()];
        assert_eq!(users_page(&users), users_page(&users));
    }
}
