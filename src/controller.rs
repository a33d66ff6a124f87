//! Drives user actions against the contacts service and keeps the local
//! store in step with the results.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::filter::ContactFilter;
use crate::gateway::{ContactGateway, GatewayResult};
use crate::models::{Contact, ContactCategory, ContactDraft, ContactId};
use crate::notice::NoticeQueue;
use crate::store::ContactStore;
use crate::validate::{ContactValidator, RegexValidator, ValidationErrors};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load contacts.";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save contact.";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete contact.";

/// What the user currently has open. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Creating,
    Editing(ContactId),
    ConfirmingDelete(ContactId),
    Viewing(ContactId),
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    /// Contact the open form, prompt or view is bound to.
    pub fn target(&self) -> Option<ContactId> {
        match *self {
            Interaction::Editing(id)
            | Interaction::ConfirmingDelete(id)
            | Interaction::Viewing(id) => Some(id),
            Interaction::Idle | Interaction::Creating => None,
        }
    }
}

/// Progress of the contact list fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// Action requested in a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("finish the current action first ({0:?} is open)")]
    Busy(Interaction),
    #[error("contact {0} not found")]
    NotFound(ContactId),
    #[error("no contact form is open")]
    NoFormOpen,
    #[error("no delete is awaiting confirmation")]
    NoDeletePending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(Contact),
    Updated(Contact),
    /// Local checks failed; nothing was sent and the form stays open.
    Invalid(ValidationErrors),
    /// The service call failed; the form was closed and the store left as is.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(ContactId),
    Failed,
}

/// Owns the session state of the directory: contacts, filter, the open
/// interaction, field errors and pending notices.
pub struct DirectoryController<G: ContactGateway> {
    gateway: G,
    validator: Box<dyn ContactValidator>,
    store: ContactStore,
    filter: ContactFilter,
    interaction: Interaction,
    load_state: LoadState,
    field_errors: ValidationErrors,
    notices: NoticeQueue,
}

impl<G: ContactGateway> DirectoryController<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_validator(gateway, Box::new(RegexValidator::new()))
    }

    pub fn with_validator(gateway: G, validator: Box<dyn ContactValidator>) -> Self {
        Self {
            gateway,
            validator,
            store: ContactStore::new(),
            filter: ContactFilter::default(),
            interaction: Interaction::Idle,
            load_state: LoadState::Loading,
            field_errors: ValidationErrors::new(),
            notices: NoticeQueue::new(),
        }
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Fetch every contact. On failure the store stays empty and the
    /// failure is kept in the load state; there is no retry.
    pub fn initial_load(&mut self) -> &LoadState {
        self.load_state = LoadState::Loading;
        match self.gateway.list() {
            Ok(all) => {
                info!(count = all.len(), "contacts loaded");
                self.store.load(all);
                self.load_state = LoadState::Ready;
            }
            Err(e) => {
                warn!(error = %e, "initial contact load failed");
                self.store.load(Vec::new());
                self.load_state = LoadState::Failed(LOAD_FAILED_MESSAGE.to_string());
            }
        }
        &self.load_state
    }

    /// Re-fetch on explicit request. A failed refresh keeps the contacts
    /// already shown.
    pub fn refresh(&mut self) -> &LoadState {
        if self.load_state != LoadState::Ready {
            return self.initial_load();
        }

        match self.gateway.list() {
            Ok(all) => {
                debug!(count = all.len(), "contacts refreshed");
                self.store.load(all);
            }
            Err(e) => {
                warn!(error = %e, "contact refresh failed");
                self.notices.error(LOAD_FAILED_MESSAGE);
            }
        }
        &self.load_state
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    pub fn open_create(&mut self) -> Result<(), ControllerError> {
        self.ensure_idle()?;
        self.field_errors = ValidationErrors::new();
        self.interaction = Interaction::Creating;
        Ok(())
    }

    pub fn open_edit(&mut self, id: ContactId) -> Result<&Contact, ControllerError> {
        self.open_bound(id, Interaction::Editing(id))
    }

    pub fn open_view(&mut self, id: ContactId) -> Result<&Contact, ControllerError> {
        self.open_bound(id, Interaction::Viewing(id))
    }

    pub fn request_delete(&mut self, id: ContactId) -> Result<&Contact, ControllerError> {
        self.open_bound(id, Interaction::ConfirmingDelete(id))
    }

    /// Close whatever is open without contacting the service.
    pub fn cancel(&mut self) {
        self.interaction = Interaction::Idle;
        self.field_errors = ValidationErrors::new();
    }

    fn ensure_idle(&self) -> Result<(), ControllerError> {
        if self.interaction.is_idle() {
            Ok(())
        } else {
            Err(ControllerError::Busy(self.interaction))
        }
    }

    fn open_bound(&mut self, id: ContactId, next: Interaction) -> Result<&Contact, ControllerError> {
        self.ensure_idle()?;
        if !self.store.contains(id) {
            return Err(ControllerError::NotFound(id));
        }
        self.field_errors = ValidationErrors::new();
        self.interaction = next;
        self.store.get(id).ok_or(ControllerError::NotFound(id))
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Submit the open create or edit form.
    ///
    /// Validation runs first and an invalid draft never reaches the
    /// service. Once the service has been called the form closes whatever
    /// the result.
    pub fn save(&mut self, draft: ContactDraft) -> Result<SaveOutcome, ControllerError> {
        let editing = match self.interaction {
            Interaction::Creating => None,
            Interaction::Editing(id) => Some(id),
            _ => return Err(ControllerError::NoFormOpen),
        };

        if let Err(errors) = self.validator.validate(&draft) {
            debug!(%errors, "contact form rejected");
            self.field_errors = errors.clone();
            return Ok(SaveOutcome::Invalid(errors));
        }
        self.field_errors = ValidationErrors::new();

        let result = match editing {
            Some(id) => self.gateway.update(id, &draft).map(|updated| {
                self.store.apply_updated(updated.clone());
                SaveOutcome::Updated(updated)
            }),
            None => self.gateway.create(&draft).map(|created| {
                self.store.apply_created(created.clone());
                SaveOutcome::Created(created)
            }),
        };

        self.interaction = Interaction::Idle;

        match result {
            Ok(outcome) => {
                match &outcome {
                    SaveOutcome::Created(c) => {
                        info!(id = c.id, "contact created");
                        self.notices.success("Contact created");
                    }
                    SaveOutcome::Updated(c) => {
                        info!(id = c.id, "contact updated");
                        self.notices.success("Contact updated");
                    }
                    _ => {}
                }
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, editing = ?editing, "saving contact failed");
                self.notices.error(SAVE_FAILED_MESSAGE);
                Ok(SaveOutcome::Failed)
            }
        }
    }

    /// Delete the contact awaiting confirmation. The prompt closes
    /// whatever the result.
    pub fn confirm_delete(&mut self) -> Result<DeleteOutcome, ControllerError> {
        let Interaction::ConfirmingDelete(id) = self.interaction else {
            return Err(ControllerError::NoDeletePending);
        };

        let result = self.gateway.delete(id);
        self.interaction = Interaction::Idle;

        match result {
            Ok(_) => {
                info!(id, "contact deleted");
                self.store.apply_deleted(id);
                self.notices.success("Contact deleted");
                Ok(DeleteOutcome::Deleted(id))
            }
            Err(e) => {
                warn!(id, error = %e, "deleting contact failed");
                self.notices.error(DELETE_FAILED_MESSAGE);
                Ok(DeleteOutcome::Failed)
            }
        }
    }

    /// Fetch a single contact straight from the service, bypassing the store.
    pub fn fetch(&self, id: ContactId) -> GatewayResult<Contact> {
        self.gateway.get(id).map_err(|e| {
            warn!(id, error = %e, "fetching contact failed");
            e
        })
    }

    // ------------------------------------------------------------------
    // View state
    // ------------------------------------------------------------------

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_category(&mut self, category: Option<ContactCategory>) {
        self.filter.category = category;
    }

    pub fn set_filter(&mut self, filter: ContactFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &ContactFilter {
        &self.filter
    }

    /// Contacts matching the current filter, in list order.
    pub fn visible(&self) -> Vec<&Contact> {
        self.store.filtered(&self.filter)
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Contact bound to the open interaction, if it is still in the store.
    pub fn target(&self) -> Option<&Contact> {
        self.interaction.target().and_then(|id| self.store.get(id))
    }

    /// Defaults for the open form: the edited contact, or a blank draft.
    pub fn form_defaults(&self) -> ContactDraft {
        match self.interaction {
            Interaction::Editing(id) => self
                .store
                .get(id)
                .map(Contact::to_draft)
                .unwrap_or_default(),
            _ => ContactDraft::default(),
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn field_errors(&self) -> &ValidationErrors {
        &self.field_errors
    }

    pub fn notices(&self) -> &NoticeQueue {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut NoticeQueue {
        &mut self.notices
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeKind;
    use crate::gateway::GatewayError;
    use crate::testing::{Call, FakeGateway};
    use crate::validate::Field;

    fn contact(id: ContactId, name: &str, email: &str, category: ContactCategory) -> Contact {
        ContactDraft::from_form(name, email, "5550100", None, category).into_contact(id)
    }

    fn seed() -> Vec<Contact> {
        vec![
            contact(1, "Ann", "a@x.com", ContactCategory::Customer),
            contact(2, "Bo", "b@x.com", ContactCategory::Vip),
        ]
    }

    fn setup_controller() -> DirectoryController<FakeGateway> {
        let mut ctl = DirectoryController::new(FakeGateway::with(seed()));
        ctl.initial_load();
        ctl
    }

    fn draft(name: &str, email: &str, phone: &str) -> ContactDraft {
        ContactDraft::from_form(name, email, phone, None, ContactCategory::Partner)
    }

    fn ids(ctl: &DirectoryController<FakeGateway>) -> Vec<ContactId> {
        ctl.store().contacts().iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_initial_load_populates_store() {
        let ctl = setup_controller();
        assert_eq!(ctl.load_state(), &LoadState::Ready);
        assert_eq!(ids(&ctl), vec![1, 2]);
        assert_eq!(ctl.gateway().calls(), vec![Call::List]);
    }

    #[test]
    fn test_initial_load_failure_leaves_store_empty() {
        let gateway = FakeGateway::with(seed());
        gateway.failing();
        let mut ctl = DirectoryController::new(gateway);

        assert_eq!(ctl.load_state(), &LoadState::Loading);
        let state = ctl.initial_load().clone();

        assert_eq!(state, LoadState::Failed(LOAD_FAILED_MESSAGE.to_string()));
        assert!(ctl.store().is_empty());
        // No automatic retry
        assert_eq!(ctl.gateway().calls(), vec![Call::List]);
    }

    #[test]
    fn test_refresh_failure_keeps_contacts() {
        let mut ctl = setup_controller();
        ctl.gateway().failing();
        ctl.refresh();

        assert_eq!(ctl.load_state(), &LoadState::Ready);
        assert_eq!(ids(&ctl), vec![1, 2]);
        assert_eq!(ctl.notices().last().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn test_filtered_view() {
        let mut ctl = setup_controller();

        ctl.set_query("an");
        let visible: Vec<ContactId> = ctl.visible().iter().map(|c| c.id).collect();
        assert_eq!(visible, vec![1]);

        ctl.set_query("");
        ctl.set_category(Some(ContactCategory::Vip));
        let visible: Vec<ContactId> = ctl.visible().iter().map(|c| c.id).collect();
        assert_eq!(visible, vec![2]);
    }

    #[test]
    fn test_create_appends_server_record() {
        let mut ctl = setup_controller();
        ctl.open_create().unwrap();
        assert_eq!(ctl.interaction(), Interaction::Creating);

        let outcome = ctl.save(draft("Cy", "c@x.com", "123")).unwrap();

        let SaveOutcome::Created(created) = outcome else {
            panic!("expected a created contact");
        };
        assert_eq!(created.id, 3);
        assert_eq!(ids(&ctl), vec![1, 2, 3]);
        assert_eq!(ctl.interaction(), Interaction::Idle);
        assert_eq!(ctl.notices().last().unwrap().kind, NoticeKind::Success);
    }

    #[test]
    fn test_invalid_email_blocks_gateway_call() {
        let mut ctl = setup_controller();
        ctl.open_create().unwrap();

        let outcome = ctl.save(draft("Cy", "not-an-email", "123")).unwrap();

        assert!(matches!(outcome, SaveOutcome::Invalid(_)));
        assert!(ctl.field_errors().message_for(Field::Email).is_some());
        assert_eq!(ctl.interaction(), Interaction::Creating);
        assert_eq!(ctl.gateway().calls(), vec![Call::List]);
        assert_eq!(ids(&ctl), vec![1, 2]);
    }

    #[test]
    fn test_non_numeric_phone_blocks_update() {
        let mut ctl = setup_controller();
        ctl.open_edit(1).unwrap();

        let outcome = ctl.save(draft("Ann", "a@x.com", "555-0100")).unwrap();

        assert!(matches!(outcome, SaveOutcome::Invalid(_)));
        assert!(ctl.field_errors().message_for(Field::Phone).is_some());
        assert_eq!(ctl.interaction(), Interaction::Editing(1));
        assert_eq!(ctl.gateway().calls(), vec![Call::List]);
    }

    #[test]
    fn test_field_errors_cleared_after_valid_save() {
        let mut ctl = setup_controller();
        ctl.open_create().unwrap();
        ctl.save(draft("Cy", "bad", "123")).unwrap();
        assert!(!ctl.field_errors().is_empty());

        ctl.save(draft("Cy", "c@x.com", "123")).unwrap();
        assert!(ctl.field_errors().is_empty());
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut ctl = setup_controller();
        let current = ctl.open_edit(1).unwrap().clone();
        assert_eq!(ctl.form_defaults(), current.to_draft());

        let outcome = ctl.save(draft("Annie", "annie@x.com", "999")).unwrap();

        assert!(matches!(outcome, SaveOutcome::Updated(_)));
        assert_eq!(ids(&ctl), vec![1, 2]);
        assert_eq!(ctl.store().get(1).unwrap().name, "Annie");
        assert_eq!(ctl.interaction(), Interaction::Idle);
        assert_eq!(
            ctl.gateway().calls()[1],
            Call::Update(1, draft("Annie", "annie@x.com", "999"))
        );
    }

    #[test]
    fn test_save_failure_closes_form_and_keeps_store() {
        let mut ctl = setup_controller();
        ctl.open_create().unwrap();
        ctl.gateway().failing();

        let outcome = ctl.save(draft("Cy", "c@x.com", "123")).unwrap();

        assert_eq!(outcome, SaveOutcome::Failed);
        assert_eq!(ctl.interaction(), Interaction::Idle);
        assert_eq!(ids(&ctl), vec![1, 2]);
        let notice = ctl.notices().last().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, SAVE_FAILED_MESSAGE);
    }

    #[test]
    fn test_delete_confirm_removes_contact() {
        let mut ctl = setup_controller();
        ctl.request_delete(1).unwrap();
        assert_eq!(ctl.interaction(), Interaction::ConfirmingDelete(1));
        assert_eq!(ctl.target().unwrap().name, "Ann");

        let outcome = ctl.confirm_delete().unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted(1));
        assert!(!ctl.store().contains(1));
        assert_eq!(ctl.interaction(), Interaction::Idle);
    }

    #[test]
    fn test_delete_cancel_makes_no_call() {
        let mut ctl = setup_controller();
        ctl.request_delete(1).unwrap();
        ctl.cancel();

        assert_eq!(ctl.interaction(), Interaction::Idle);
        assert!(ctl.store().contains(1));
        assert_eq!(ctl.gateway().calls(), vec![Call::List]);
        assert_eq!(ctl.confirm_delete(), Err(ControllerError::NoDeletePending));
    }

    #[test]
    fn test_delete_failure_keeps_contact() {
        let mut ctl = setup_controller();
        ctl.request_delete(2).unwrap();
        ctl.gateway().failing();

        let outcome = ctl.confirm_delete().unwrap();

        assert_eq!(outcome, DeleteOutcome::Failed);
        assert!(ctl.store().contains(2));
        assert_eq!(ctl.interaction(), Interaction::Idle);
        assert_eq!(ctl.notices().last().unwrap().message, DELETE_FAILED_MESSAGE);
    }

    #[test]
    fn test_only_one_interaction_at_a_time() {
        let mut ctl = setup_controller();
        ctl.open_view(2).unwrap();

        assert_eq!(ctl.open_create(), Err(ControllerError::Busy(Interaction::Viewing(2))));
        assert!(ctl.open_edit(1).is_err());
        assert_eq!(ctl.interaction(), Interaction::Viewing(2));

        ctl.cancel();
        assert!(ctl.open_edit(1).is_ok());
    }

    #[test]
    fn test_unknown_target_rejected() {
        let mut ctl = setup_controller();
        assert_eq!(ctl.open_edit(42).unwrap_err(), ControllerError::NotFound(42));
        assert_eq!(ctl.interaction(), Interaction::Idle);
    }

    #[test]
    fn test_save_without_form() {
        let mut ctl = setup_controller();
        assert_eq!(
            ctl.save(draft("Cy", "c@x.com", "1")),
            Err(ControllerError::NoFormOpen)
        );

        ctl.open_view(1).unwrap();
        assert_eq!(
            ctl.save(draft("Cy", "c@x.com", "1")),
            Err(ControllerError::NoFormOpen)
        );
        assert_eq!(ctl.gateway().calls(), vec![Call::List]);
    }

    #[test]
    fn test_fetch_goes_to_service() {
        let ctl = setup_controller();
        assert_eq!(ctl.fetch(2).unwrap().name, "Bo");
        assert!(ctl.fetch(99).unwrap_err().is_not_found());
        assert_eq!(ctl.gateway().calls(), vec![Call::List, Call::Get(2), Call::Get(99)]);
    }

    #[test]
    fn test_fetch_reports_service_failure() {
        let ctl = setup_controller();
        ctl.gateway().failing();
        let err = ctl.fetch(2).unwrap_err();
        assert!(matches!(err, GatewayError::Status { status: 500 }));
        assert!(!err.is_not_found());
    }
}
