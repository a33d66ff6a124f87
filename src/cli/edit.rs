use anyhow::Result;

use crate::controller::{ControllerError, DirectoryController};
use crate::gateway::ContactGateway;
use crate::models::ContactId;
use super::form::{apply_fields, report_save, run_form};
use super::ContactFields;

/// Execute the edit command. Fields not given keep their current value;
/// with no fields at all the form is prompted for.
pub fn run_edit<G: ContactGateway>(
    ctl: &mut DirectoryController<G>,
    id: ContactId,
    fields: &ContactFields,
) -> Result<()> {
    let current = match ctl.open_edit(id) {
        Ok(contact) => contact.to_draft(),
        Err(ControllerError::NotFound(_)) => {
            println!("No contact found with ID: {}", id);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if fields.is_empty() {
        run_form(ctl)?;
        return Ok(());
    }

    let draft = match apply_fields(&current, fields) {
        Ok(draft) => draft,
        Err(e) => {
            ctl.cancel();
            return Err(e);
        }
    };

    let outcome = ctl.save(draft)?;
    ctl.cancel();
    report_save(ctl, outcome)
}
