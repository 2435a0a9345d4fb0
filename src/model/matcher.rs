// Logic for checking if events match a free-text search query.
//
// A query is a plain substring. An event matches when any of the configured
// fields contains it; fields the event does not have simply never match.
// Matching is case-insensitive unless the caller asks otherwise.

use crate::model::event::CalendarEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchField {
    Title,
    Description,
    Location,
    Id,
    Color,
    /// Matches when any single tag contains the query.
    Tags,
}

pub const DEFAULT_SEARCH_FIELDS: [SearchField; 3] = [
    SearchField::Title,
    SearchField::Description,
    SearchField::Location,
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<SearchField>>,
}

impl SearchOptions {
    fn effective_fields(&self) -> &[SearchField] {
        match &self.fields {
            Some(fields) if !fields.is_empty() => fields.as_slice(),
            _ => &DEFAULT_SEARCH_FIELDS[..],
        }
    }
}

impl CalendarEvent {
    fn field_values(&self, field: SearchField) -> Vec<&str> {
        match field {
            SearchField::Title => vec![self.title.as_str()],
            SearchField::Description => self.description.as_deref().into_iter().collect(),
            SearchField::Location => self.location.as_deref().into_iter().collect(),
            SearchField::Id => vec![self.id.as_str()],
            SearchField::Color => vec![self.color.as_str()],
            SearchField::Tags => self.tags.iter().map(String::as_str).collect(),
        }
    }

    /// `needle` must already be lower-cased when `case_sensitive` is false.
    pub fn matches_query(&self, needle: &str, case_sensitive: bool, fields: &[SearchField]) -> bool {
        fields.iter().any(|field| {
            self.field_values(*field).into_iter().any(|value| {
                if case_sensitive {
                    value.contains(needle)
                } else {
                    value.to_lowercase().contains(needle)
                }
            })
        })
    }
}

pub fn search_events(
    events: &[CalendarEvent],
    query: &str,
    options: &SearchOptions,
) -> Vec<CalendarEvent> {
    let needle = if options.case_sensitive {
        query.to_string()
    } else {
        query.to_lowercase()
    };
    let fields = options.effective_fields();

    events
        .iter()
        .filter(|ev| ev.matches_query(&needle, options.case_sensitive, fields))
        .cloned()
        .collect()
}
