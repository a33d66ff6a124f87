//! Access to the remote contacts service.
//!
//! The directory never talks to the service directly; it goes through a
//! [`ContactGateway`] so the controller can be driven by any backend.

use thiserror::Error;

use crate::models::{Contact, ContactDraft, ContactId};

mod http;

pub use http::HttpGateway;

/// Failure talking to the contacts service.
///
/// Callers treat every variant the same way, except that a single-contact
/// lookup can tell a missing contact apart with [`GatewayError::is_not_found`].
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service returned {status}")]
    Status { status: u16 },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid service URL: {0}")]
    Url(String),
}

impl GatewayError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::Status { status: 404 })
    }
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// CRUD operations offered by the contacts service.
pub trait ContactGateway {
    fn list(&self) -> GatewayResult<Vec<Contact>>;

    fn get(&self, id: ContactId) -> GatewayResult<Contact>;

    /// Persist a new contact. The service assigns the id.
    fn create(&self, draft: &ContactDraft) -> GatewayResult<Contact>;

    fn update(&self, id: ContactId, draft: &ContactDraft) -> GatewayResult<Contact>;

    /// Delete a contact. Returns the deleted record when the service sends one back.
    fn delete(&self, id: ContactId) -> GatewayResult<Option<Contact>>;
}
