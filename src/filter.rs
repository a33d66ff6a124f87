//! Search and category filtering over the contact list.

use crate::models::{Contact, ContactCategory};

/// Active search box text and category dropdown selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub query: String,
    pub category: Option<ContactCategory>,
}

impl ContactFilter {
    pub fn new(query: impl Into<String>, category: Option<ContactCategory>) -> Self {
        Self {
            query: query.into(),
            category,
        }
    }

    /// Build a filter from the raw dropdown value, where an empty string
    /// means "All Categories". Returns `None` for an unknown category.
    pub fn from_input(query: &str, category: &str) -> Option<Self> {
        let category = if category.trim().is_empty() {
            None
        } else {
            Some(ContactCategory::parse(category)?)
        };
        Some(Self::new(query, category))
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.category.is_none()
    }

    /// Check a single contact against the filter.
    pub fn matches(&self, contact: &Contact) -> bool {
        let needle = self.query.to_lowercase();
        self.matches_lowered(contact, &needle)
    }

    fn matches_lowered(&self, contact: &Contact, needle: &str) -> bool {
        let matches_search = needle.is_empty()
            || contact.name.to_lowercase().contains(needle)
            || contact.email.to_lowercase().contains(needle)
            || contact
                .company
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(needle);

        let matches_category = self.category.map_or(true, |c| contact.category == c);

        matches_search && matches_category
    }
}

/// Contacts visible under `filter`, in their original order.
pub fn filter_contacts<'a>(contacts: &'a [Contact], filter: &ContactFilter) -> Vec<&'a Contact> {
    let needle = filter.query.to_lowercase();
    contacts
        .iter()
        .filter(|c| filter.matches_lowered(c, &needle))
        .collect()
}
