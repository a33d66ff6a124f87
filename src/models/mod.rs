mod contact;

pub use contact::{Contact, ContactCategory, ContactDraft, ContactId};
