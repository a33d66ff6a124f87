use anyhow::{anyhow, Result};

use crate::controller::DirectoryController;
use crate::gateway::ContactGateway;
use crate::models::ContactId;
use super::display::print_contact_detail;

/// Execute the show command. Reads the contact straight from the service.
pub fn run_show<G: ContactGateway>(ctl: &DirectoryController<G>, id: ContactId) -> Result<()> {
    match ctl.fetch(id) {
        Ok(contact) => print_contact_detail(&contact),
        Err(e) if e.is_not_found() => println!("No contact found with ID: {}", id),
        Err(e) => return Err(anyhow!("Failed to load contact {}: {}", id, e)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_contacts, Call, FakeGateway};

    #[test]
    fn test_show_fetches_by_id() {
        let ctl = DirectoryController::new(FakeGateway::with(sample_contacts()));
        run_show(&ctl, 2).unwrap();
        run_show(&ctl, 42).unwrap();
        assert_eq!(ctl.gateway().calls(), vec![Call::Get(2), Call::Get(42)]);
    }

    #[test]
    fn test_show_fails_when_service_is_down() {
        let ctl = DirectoryController::new(FakeGateway::with(sample_contacts()));
        ctl.gateway().failing();
        let result = run_show(&ctl, 2);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("service returned 500"));
    }
}
