//! Create/edit form shared by the add, edit and interactive commands.

use anyhow::{anyhow, Result};
use inquire::{InquireError, Select};

use crate::controller::{DirectoryController, SaveOutcome, SAVE_FAILED_MESSAGE};
use crate::gateway::ContactGateway;
use crate::models::{ContactCategory, ContactDraft};
use crate::validate::{Field, ValidationErrors};
use super::ContactFields;
use super::ui::{flush_notices, minimal_render_config, prompt_field, status, FormResult};

/// Prompt for every contact field, starting from `defaults`. Messages in
/// `errors` are shown above the field they belong to.
pub fn prompt_contact_form(
    defaults: &ContactDraft,
    errors: &ValidationErrors,
) -> Result<FormResult<ContactDraft>> {
    let name = match prompt_with_error("name", &defaults.name, errors.message_for(Field::Name))? {
        FormResult::Value(v) => v,
        FormResult::Cancelled => return Ok(FormResult::Cancelled),
    };
    let email = match prompt_with_error("email", &defaults.email, errors.message_for(Field::Email))? {
        FormResult::Value(v) => v,
        FormResult::Cancelled => return Ok(FormResult::Cancelled),
    };
    let phone = match prompt_with_error("phone", &defaults.phone, errors.message_for(Field::Phone))? {
        FormResult::Value(v) => v,
        FormResult::Cancelled => return Ok(FormResult::Cancelled),
    };
    let company = match prompt_field("company", defaults.company.as_deref())? {
        FormResult::Value(v) => v,
        FormResult::Cancelled => return Ok(FormResult::Cancelled),
    };
    let category = match prompt_category(defaults.category)? {
        FormResult::Value(v) => v,
        FormResult::Cancelled => return Ok(FormResult::Cancelled),
    };

    Ok(FormResult::Value(ContactDraft::from_form(
        &name,
        &email,
        &phone,
        Some(&company),
        category,
    )))
}

fn prompt_with_error(field: &str, current: &str, error: Option<&str>) -> Result<FormResult<String>> {
    if let Some(message) = error {
        eprintln!("  {}", message);
    }
    prompt_field(field, Some(current))
}

fn prompt_category(current: ContactCategory) -> Result<FormResult<ContactCategory>> {
    let labels: Vec<&str> = ContactCategory::ALL.iter().map(|c| c.as_str()).collect();
    let start = ContactCategory::ALL
        .iter()
        .position(|c| *c == current)
        .unwrap_or(0);

    let result = Select::new("category:", labels)
        .with_render_config(minimal_render_config())
        .with_starting_cursor(start)
        .prompt();

    match result {
        Ok(label) => Ok(FormResult::Value(
            ContactCategory::parse(label).unwrap_or(current),
        )),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(FormResult::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

/// Run the open create/edit form until it is submitted or cancelled.
///
/// Invalid input re-opens the form with the entered values and field
/// messages. Once the service has been called the form is closed.
pub fn run_form<G: ContactGateway>(ctl: &mut DirectoryController<G>) -> Result<Option<SaveOutcome>> {
    let mut values = ctl.form_defaults();

    loop {
        let draft = match prompt_contact_form(&values, ctl.field_errors())? {
            FormResult::Value(draft) => draft,
            FormResult::Cancelled => {
                ctl.cancel();
                status("Cancelled.");
                return Ok(None);
            }
        };

        values = draft.clone();
        let outcome = ctl.save(draft)?;
        if let SaveOutcome::Invalid(_) = outcome {
            continue;
        }

        flush_notices(ctl.notices_mut());
        return Ok(Some(outcome));
    }
}

/// Overlay command line fields on `base`. Fields not given keep their
/// value from `base`.
pub fn apply_fields(base: &ContactDraft, fields: &ContactFields) -> Result<ContactDraft> {
    let category = match fields.category.as_deref() {
        Some(raw) => ContactCategory::parse(raw).ok_or_else(|| {
            anyhow!(
                "Unknown category: {}. Use Customer, Vendor, VIP, Partner or Employee.",
                raw
            )
        })?,
        None => base.category,
    };

    let company = match fields.company.as_deref() {
        Some(c) => Some(c),
        None => base.company.as_deref(),
    };

    Ok(ContactDraft::from_form(
        fields.name.as_deref().unwrap_or(&base.name),
        fields.email.as_deref().unwrap_or(&base.email),
        fields.phone.as_deref().unwrap_or(&base.phone),
        company,
        category,
    ))
}

/// Print the result of a non-interactive save. Rejected or failed saves
/// become errors so the process exits non-zero.
pub fn report_save<G: ContactGateway>(
    ctl: &mut DirectoryController<G>,
    outcome: SaveOutcome,
) -> Result<()> {
    // Results are reported directly; the transient copies are not needed
    ctl.notices_mut().drain();

    match outcome {
        SaveOutcome::Created(contact) => {
            status(&format!("Created: {} (#{})", contact.name, contact.id));
            Ok(())
        }
        SaveOutcome::Updated(contact) => {
            status(&format!("Updated: {} (#{})", contact.name, contact.id));
            Ok(())
        }
        SaveOutcome::Invalid(errors) => {
            for e in errors.errors() {
                eprintln!("  {}: {}", e.field.label(), e.message);
            }
            Err(anyhow!("Contact not saved."))
        }
        SaveOutcome::Failed => Err(anyhow!("{}", SAVE_FAILED_MESSAGE)),
    }
}
