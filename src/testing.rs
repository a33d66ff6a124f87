//! Test doubles shared by the unit tests.

use std::cell::{Cell, RefCell};

use crate::gateway::{ContactGateway, GatewayError, GatewayResult};
use crate::models::{Contact, ContactDraft, ContactId};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Get(ContactId),
    Create(ContactDraft),
    Update(ContactId, ContactDraft),
    Delete(ContactId),
}

/// In-memory stand-in for the contacts service.
#[derive(Default)]
pub struct FakeGateway {
    remote: RefCell<Vec<Contact>>,
    next_id: Cell<ContactId>,
    calls: RefCell<Vec<Call>>,
    fail: Cell<bool>,
}

impl FakeGateway {
    pub fn with(contacts: Vec<Contact>) -> Self {
        let next = contacts.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            remote: RefCell::new(contacts),
            next_id: Cell::new(next),
            ..Default::default()
        }
    }

    pub fn failing(&self) {
        self.fail.set(true);
    }

    fn check(&self, call: Call) -> GatewayResult<()> {
        self.calls.borrow_mut().push(call);
        if self.fail.get() {
            Err(GatewayError::Status { status: 500 })
        } else {
            Ok(())
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl ContactGateway for FakeGateway {
    fn list(&self) -> GatewayResult<Vec<Contact>> {
        self.check(Call::List)?;
        Ok(self.remote.borrow().clone())
    }

    fn get(&self, id: ContactId) -> GatewayResult<Contact> {
        self.check(Call::Get(id))?;
        self.remote
            .borrow()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(GatewayError::Status { status: 404 })
    }

    fn create(&self, draft: &ContactDraft) -> GatewayResult<Contact> {
        self.check(Call::Create(draft.clone()))?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let created = draft.clone().into_contact(id);
        self.remote.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn update(&self, id: ContactId, draft: &ContactDraft) -> GatewayResult<Contact> {
        self.check(Call::Update(id, draft.clone()))?;
        Ok(draft.clone().into_contact(id))
    }

    fn delete(&self, id: ContactId) -> GatewayResult<Option<Contact>> {
        self.check(Call::Delete(id))?;
        let mut remote = self.remote.borrow_mut();
        let pos = remote.iter().position(|c| c.id == id);
        Ok(pos.map(|p| remote.remove(p)))
    }
}

/// Ann (Customer) and Bo (VIP), ids 1 and 2.
pub fn sample_contacts() -> Vec<Contact> {
    use crate::models::ContactCategory;

    vec![
        ContactDraft::from_form("Ann", "a@x.com", "5550100", None, ContactCategory::Customer)
            .into_contact(1),
        ContactDraft::from_form("Bo", "b@x.com", "5550101", Some("Globex"), ContactCategory::Vip)
            .into_contact(2),
    ]
}
