//! Session copy of the contact collection.

use crate::filter::{filter_contacts, ContactFilter};
use crate::models::{Contact, ContactId};

/// In-memory, insertion-ordered contact list kept in step with the service.
///
/// Only the results of successful service calls are applied; nothing here
/// talks to the network or touches disk.
#[derive(Debug, Clone, Default)]
pub struct ContactStore {
    contacts: Vec<Contact>,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection. Last load wins.
    pub fn load(&mut self, all: Vec<Contact>) {
        self.contacts = all;
    }

    /// Append a freshly created contact. The id is assumed to be new.
    pub fn apply_created(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    /// Replace the contact with the same id, keeping its position.
    /// Unknown ids are ignored.
    pub fn apply_updated(&mut self, contact: Contact) {
        if let Some(slot) = self.contacts.iter_mut().find(|c| c.id == contact.id) {
            *slot = contact;
        }
    }

    /// Remove the contact with `id`, if present.
    pub fn apply_deleted(&mut self, id: ContactId) {
        self.contacts.retain(|c| c.id != id);
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn filtered(&self, filter: &ContactFilter) -> Vec<&Contact> {
        filter_contacts(&self.contacts, filter)
    }
}
