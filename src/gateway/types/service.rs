//! Service payloads and the response projection.

use chrono::{DateTime, SecondsFormat, Utc};
use mongodb::bson::{self, Bson, Document, doc};
use serde::{Deserialize, Serialize};

use super::order::{get_string, id_string};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptionPoint {
    pub point: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub dish: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuPayload {
    pub lunch: Vec<MenuItem>,
    pub dinner: Vec<MenuItem>,
}

/// Create-service request body. `date_added` defaults to now (UTC) when the
/// client omits it; a client-supplied `id` is ignored like on orders.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicePayload {
    #[serde(default)]
    pub id: Option<String>,
    pub img: String,
    pub title: String,
    pub owner: String,
    pub cost: String,
    #[serde(default)]
    pub description: Vec<DescriptionPoint>,
    #[serde(default = "Utc::now")]
    pub date_added: DateTime<Utc>,
    pub menu: MenuPayload,
}

impl ServicePayload {
    /// Document to insert; `date_added` is stored as a native datetime.
    pub fn into_document(self) -> Result<Document, bson::ser::Error> {
        Ok(doc! {
            "img": self.img,
            "title": self.title,
            "owner": self.owner,
            "cost": self.cost,
            "description": bson::to_bson(&self.description)?,
            "date_added": bson::DateTime::from_chrono(self.date_added),
            "menu": bson::to_bson(&self.menu)?,
        })
    }
}

/// Response shape for a service.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceView {
    pub id: String,
    pub img: Option<String>,
    pub title: Option<String>,
    pub owner: Option<String>,
    pub cost: Option<String>,
    pub date_added: Option<String>,
    pub description: Vec<DescriptionPointView>,
    pub menu: MenuView,
}

#[derive(Debug, Clone, Serialize)]
pub struct DescriptionPointView {
    pub point: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuItemView {
    pub dish: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MenuView {
    pub lunch: Vec<MenuItemView>,
    pub dinner: Vec<MenuItemView>,
}

impl ServiceView {
    pub fn from_document(document: &Document) -> Self {
        let description = document
            .get_array("description")
            .map(|points| {
                points
                    .iter()
                    .map(|point| DescriptionPointView {
                        point: point
                            .as_document()
                            .and_then(|point| get_string(point, "point")),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let menu = document
            .get_document("menu")
            .map(|menu| MenuView {
                lunch: menu_items(menu, "lunch"),
                dinner: menu_items(menu, "dinner"),
            })
            .unwrap_or_default();

        Self {
            id: id_string(document),
            img: get_string(document, "img"),
            title: get_string(document, "title"),
            owner: get_string(document, "owner"),
            cost: get_string(document, "cost"),
            date_added: date_string(document, "date_added"),
            description,
            menu,
        }
    }
}

/// `GET /get_services` response body.
#[derive(Debug, Serialize)]
pub struct ServicesResponse {
    pub services: Vec<ServiceView>,
}

fn menu_items(menu: &Document, key: &str) -> Vec<MenuItemView> {
    menu.get_array(key)
        .map(|items| {
            items
                .iter()
                .map(|item| MenuItemView {
                    dish: item.as_document().and_then(|item| get_string(item, "dish")),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn date_string(document: &Document, key: &str) -> Option<String> {
    match document.get(key) {
        Some(Bson::DateTime(datetime)) => Some(
            datetime
                .to_chrono()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        Some(Bson::String(s)) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn stored_service() -> Document {
        doc! {
            "_id": ObjectId::parse_str("61dbae02c147de2089d3ce90").unwrap(),
            "img": "https://cdn.example/banquet.jpg",
            "title": "Banquet Hall",
            "owner": "Shine Caterers",
            "cost": "15000",
            "date_added": bson::DateTime::from_millis(1_700_000_000_000),
            "description": [
                { "point": "Seats 200" },
                { "point": "In-house catering" },
            ],
            "menu": {
                "lunch": [ { "dish": "Thali" } ],
                "dinner": [ { "dish": "Biryani" }, { "dish": "Kulfi" } ],
            },
        }
    }

    #[test]
    fn projection_copies_the_fixed_field_set() {
        let view = ServiceView::from_document(&stored_service());
        assert_eq!(view.id, "61dbae02c147de2089d3ce90");
        assert_eq!(view.title.as_deref(), Some("Banquet Hall"));
        assert_eq!(view.cost.as_deref(), Some("15000"));
        assert_eq!(view.description.len(), 2);
        assert_eq!(view.description[0].point.as_deref(), Some("Seats 200"));
        assert_eq!(view.menu.lunch.len(), 1);
        assert_eq!(view.menu.dinner.len(), 2);
        assert_eq!(view.menu.dinner[1].dish.as_deref(), Some("Kulfi"));
    }

    #[test]
    fn date_added_is_rfc3339() {
        let view = ServiceView::from_document(&stored_service());
        let date = view.date_added.unwrap();
        assert!(date.starts_with("2023-11-14T"), "got {date}");
        assert!(date.ends_with('Z'));
    }

    #[test]
    fn missing_menu_and_description_become_empty() {
        let document = doc! { "_id": ObjectId::new(), "title": "Bare" };
        let view = ServiceView::from_document(&document);
        assert!(view.description.is_empty());
        assert!(view.menu.lunch.is_empty());
        assert!(view.menu.dinner.is_empty());
        assert!(view.date_added.is_none());
    }

    #[test]
    fn unknown_stored_fields_never_leak() {
        let mut document = stored_service();
        document.insert("margin", 0.4);
        let view = ServiceView::from_document(&document);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("margin").is_none());
    }

    #[test]
    fn date_added_defaults_to_now_on_the_payload() {
        let before = Utc::now();
        let payload: ServicePayload = serde_json::from_value(serde_json::json!({
            "img": "x.jpg",
            "title": "Live Counter",
            "owner": "Dine",
            "cost": "5000",
            "menu": { "lunch": [], "dinner": [] },
        }))
        .unwrap();
        assert!(payload.date_added >= before);
        assert!(payload.date_added <= Utc::now());
    }

    #[test]
    fn payload_document_has_a_native_datetime_and_no_id() {
        let payload: ServicePayload = serde_json::from_value(serde_json::json!({
            "id": "ignored",
            "img": "x.jpg",
            "title": "Live Counter",
            "owner": "Dine",
            "cost": "5000",
            "description": [{ "point": "On site" }],
            "menu": { "lunch": [{ "dish": "Dosa" }], "dinner": [] },
        }))
        .unwrap();
        let document = payload.into_document().unwrap();
        assert!(!document.contains_key("id"));
        assert!(matches!(
            document.get("date_added"),
            Some(Bson::DateTime(_))
        ));
        assert_eq!(
            document.get_document("menu").unwrap().get_array("lunch").unwrap().len(),
            1
        );
    }
}
