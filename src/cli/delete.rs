use anyhow::{anyhow, Result};

use crate::controller::{ControllerError, DeleteOutcome, DirectoryController, DELETE_FAILED_MESSAGE};
use crate::gateway::ContactGateway;
use crate::models::{Contact, ContactId};
use super::ui::confirm;

/// Execute the delete command
pub fn run_delete<G: ContactGateway>(
    ctl: &mut DirectoryController<G>,
    id: ContactId,
    force: bool,
) -> Result<()> {
    let name = match ctl.request_delete(id) {
        Ok(contact) => {
            print_contact_summary(contact);
            println!();
            contact.name.clone()
        }
        Err(ControllerError::NotFound(_)) => {
            println!("No contact found with ID: {}", id);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if !force && !confirm(&format!("Delete {}?", delete_prompt_name(&name)))? {
        ctl.cancel();
        return Ok(());
    }

    let outcome = ctl.confirm_delete()?;
    ctl.notices_mut().drain();

    match outcome {
        DeleteOutcome::Deleted(_) => {
            println!("Deleted.");
            Ok(())
        }
        DeleteOutcome::Failed => Err(anyhow!("{}", DELETE_FAILED_MESSAGE)),
    }
}

/// Name shown in the confirmation prompt
pub fn delete_prompt_name(name: &str) -> &str {
    if name.trim().is_empty() {
        "this contact"
    } else {
        name
    }
}

pub fn print_contact_summary(contact: &Contact) {
    println!("{}", contact.name);
    println!("  {}", contact.email);
    if let Some(company) = contact.company.as_deref().filter(|c| !c.trim().is_empty()) {
        println!("  {}", company);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Interaction;
    use crate::testing::{sample_contacts, Call, FakeGateway};

    fn setup() -> DirectoryController<FakeGateway> {
        let mut ctl = DirectoryController::new(FakeGateway::with(sample_contacts()));
        ctl.initial_load();
        ctl
    }

    #[test]
    fn test_delete_force() {
        let mut ctl = setup();
        run_delete(&mut ctl, 1, true).unwrap();

        assert!(!ctl.store().contains(1));
        assert_eq!(ctl.interaction(), Interaction::Idle);
        assert_eq!(ctl.gateway().calls(), vec![Call::List, Call::Delete(1)]);
    }

    #[test]
    fn test_delete_nonexistent() {
        let mut ctl = setup();
        run_delete(&mut ctl, 42, true).unwrap();
        assert_eq!(ctl.store().len(), 2);
        assert_eq!(ctl.gateway().calls(), vec![Call::List]);
    }

    #[test]
    fn test_delete_failure() {
        let mut ctl = setup();
        ctl.gateway().failing();

        let err = run_delete(&mut ctl, 2, true).unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete contact.");
        assert!(ctl.store().contains(2));
        assert_eq!(ctl.interaction(), Interaction::Idle);
    }

    #[test]
    fn test_delete_prompt_name() {
        assert_eq!(delete_prompt_name("Ann"), "Ann");
        assert_eq!(delete_prompt_name(" "), "this contact");
    }
}
