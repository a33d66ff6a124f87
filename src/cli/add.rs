use anyhow::Result;

use crate::controller::DirectoryController;
use crate::gateway::ContactGateway;
use crate::models::ContactDraft;
use super::form::{apply_fields, report_save, run_form};
use super::ContactFields;

/// Execute the add command
pub fn run_add<G: ContactGateway>(ctl: &mut DirectoryController<G>, fields: &ContactFields) -> Result<()> {
    // Parse flags before anything opens so a bad category leaves no form behind
    let draft = if fields.is_empty() {
        None
    } else {
        Some(apply_fields(&ContactDraft::default(), fields)?)
    };

    ctl.open_create()?;

    match draft {
        // No options provided, run interactive mode
        None => {
            run_form(ctl)?;
            Ok(())
        }
        Some(draft) => {
            let outcome = ctl.save(draft)?;
            // A rejected form stays open in the interactive flow; here it ends
            ctl.cancel();
            report_save(ctl, outcome)
        }
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

    fn fields(name: &str, email: &str, phone: &str) -> ContactFields {
        ContactFields {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_appends_contact() {
        let mut ctl = setup();
        run_add(&mut ctl, &fields("Cy", "c@x.com", "123")).unwrap();

        let ids: Vec<i64> = ctl.store().contacts().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(ctl.interaction(), Interaction::Idle);
        assert!(ctl.notices().is_empty());
    }

    #[test]
    fn test_add_invalid_email() {
        let mut ctl = setup();
        let result = run_add(&mut ctl, &fields("Cy", "not-an-email", "123"));

        assert!(result.is_err());
        assert_eq!(ctl.store().len(), 2);
        assert_eq!(ctl.gateway().calls(), vec![Call::List]);
        assert_eq!(ctl.interaction(), Interaction::Idle);
    }

    #[test]
    fn test_add_requires_name() {
        let mut ctl = setup();
        let result = run_add(&mut ctl, &fields("", "c@x.com", "123"));
        assert!(result.is_err());
        assert_eq!(ctl.gateway().calls(), vec![Call::List]);
    }

    #[test]
    fn test_add_service_failure() {
        let mut ctl = setup();
        ctl.gateway().failing();
        let result = run_add(&mut ctl, &fields("Cy", "c@x.com", "123"));

        assert_eq!(result.unwrap_err().to_string(), "Failed to save contact.");
        assert_eq!(ctl.store().len(), 2);
    }

    #[test]
    fn test_add_bad_category_opens_nothing() {
        let mut ctl = setup();
        let mut f = fields("Cy", "c@x.com", "123");
        f.category = Some("Friend".to_string());

        assert!(run_add(&mut ctl, &f).is_err());
        assert_eq!(ctl.interaction(), Interaction::Idle);
    }
}
