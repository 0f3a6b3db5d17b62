//! Domain model for an account event.
use chrono::{DateTime, Utc};

use crate::domain::capabilities::{AttributeValue, Attributes};

pub const DEFAULT_CATEGORY: &str = "default";

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    /// Assigned by the store when the event is saved.
    pub sequence: i64,
    pub category: String,
    /// Path of the resource the event is about.
    pub origin: String,
    pub information: String,
    pub time: DateTime<Utc>,
}

impl Event {
    pub fn new(origin: &str, category: &str, information: &str, time: DateTime<Utc>) -> Self {
        let category = if category.is_empty() { DEFAULT_CATEGORY } else { category };
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sequence: 0,
            category: category.to_string(),
            origin: origin.to_string(),
            information: information.to_string(),
            time,
        }
    }

    /// Category under which events for one account are filed.
    pub fn category_for(reg_no: &str, account_no: &str) -> String {
        format!("{}-{}", reg_no, account_no)
    }
}

impl Attributes for Event {
    const VOCABULARY: &'static [&'static str] = &["id", "sequence", "category", "origin", "information", "time"];
    const TIME_ATTRIBUTE: Option<&'static str> = Some("time");

    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        match name {
            "id" => Some(self.id.as_str().into()),
            "sequence" => Some(self.sequence.into()),
            "category" => Some(self.category.as_str().into()),
            "origin" => Some(self.origin.as_str().into()),
            "information" => Some(self.information.as_str().into()),
            "time" => Some(self.time.into()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_category_falls_back_to_default() {
        let event = Event::new("accounts/default/eventSID", "", "info", Utc::now());
        assert_eq!(event.category, DEFAULT_CATEGORY);

        let event = Event::new("accounts/5479-123456/cards", &Event::category_for("5479", "123456"), "info", Utc::now());
        assert_eq!(event.category, "5479-123456");
    }
}
