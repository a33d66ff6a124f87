//! Interactive directory for contactdir
//!
//! Uses inquire for clean, reliable terminal interaction.

use anyhow::{anyhow, Result};
use inquire::{Select, Text};
use std::io::{self, IsTerminal};

use crate::controller::{DeleteOutcome, DirectoryController, LoadState};
use crate::filter::ContactFilter;
use crate::gateway::ContactGateway;
use crate::models::{ContactCategory, ContactId};
use super::delete::delete_prompt_name;
use super::display::{print_contact_detail, print_contact_table};
use super::form::run_form;
use super::ui::{clear_screen, confirm, error, flush_notices, minimal_render_config, select, select_contact, text_input};

/// Menu options with type-safe variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Add,
    Search,
    Category,
    View,
    Edit,
    Delete,
    Refresh,
    Quit,
}

impl MenuOption {
    const ALL: &'static [MenuOption] = &[
        MenuOption::Add,
        MenuOption::Search,
        MenuOption::Category,
        MenuOption::View,
        MenuOption::Edit,
        MenuOption::Delete,
        MenuOption::Refresh,
        MenuOption::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuOption::Add => "Add Contact",
            MenuOption::Search => "Search",
            MenuOption::Category => "Category",
            MenuOption::View => "View",
            MenuOption::Edit => "Edit",
            MenuOption::Delete => "Delete",
            MenuOption::Refresh => "Refresh",
            MenuOption::Quit => "Quit",
        }
    }

    fn from_label(s: &str) -> Option<MenuOption> {
        MenuOption::ALL.iter().find(|opt| opt.label() == s).copied()
    }

    /// Options that make sense for the current load state.
    fn available(load_state: &LoadState) -> Vec<MenuOption> {
        match load_state {
            LoadState::Ready => MenuOption::ALL.to_vec(),
            LoadState::Loading | LoadState::Failed(_) => vec![MenuOption::Refresh, MenuOption::Quit],
        }
    }
}

const ALL_CATEGORIES: &str = "All Categories";

/// Dropdown entries for the category filter, "All Categories" first.
fn category_choices() -> Vec<&'static str> {
    std::iter::once(ALL_CATEGORIES)
        .chain(ContactCategory::ALL.iter().map(|c| c.as_str()))
        .collect()
}

/// One-line description of the active filter, if any.
fn filter_summary(filter: &ContactFilter) -> Option<String> {
    let mut parts = Vec::new();
    if !filter.query.is_empty() {
        parts.push(format!("search \"{}\"", filter.query));
    }
    if let Some(category) = filter.category {
        parts.push(format!("category {}", category));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Run the interactive directory
pub fn run_menu<G: ContactGateway>(ctl: &mut DirectoryController<G>) -> Result<()> {
    // TTY check: interactive directory requires a terminal
    if !io::stdin().is_terminal() {
        return Err(anyhow!(
            "Interactive mode requires a terminal. Use subcommands for non-interactive use:\n  \
            contactdir list\n  \
            contactdir show <id>\n  \
            Run 'contactdir --help' for all options."
        ));
    }

    println!("Loading contacts...");
    ctl.initial_load();

    loop {
        // Clear screen - if this fails, continue anyway (degraded but functional)
        let _ = clear_screen();
        render_directory(ctl);

        let options = MenuOption::available(ctl.load_state());
        let labels: Vec<&str> = options.iter().map(|opt| opt.label()).collect();

        let selection = Select::new("contactdir", labels.clone())
            .with_render_config(minimal_render_config())
            .with_page_size(labels.len())
            .with_vim_mode(true)
            .prompt_skippable();

        // Handle prompt errors (Ctrl+C, terminal issues) - exit gracefully
        let Ok(Some(choice_label)) = selection else {
            return Ok(());
        };

        let Some(choice) = MenuOption::from_label(choice_label) else {
            continue;
        };

        if choice == MenuOption::Quit {
            return Ok(());
        }

        if let Err(e) = execute_command(ctl, choice) {
            // Leave nothing half open after an error
            ctl.cancel();
            error(&e.to_string());
            wait_for_continue();
        }
    }
}

fn render_directory<G: ContactGateway>(ctl: &mut DirectoryController<G>) {
    println!("Contact Directory\n");

    match ctl.load_state() {
        LoadState::Loading => println!("Loading contacts..."),
        LoadState::Failed(message) => error(message),
        LoadState::Ready => {
            if let Some(summary) = filter_summary(ctl.filter()) {
                println!("Filter: {}\n", summary);
            }
            print_contact_table(&ctl.visible());
        }
    }

    println!();
    flush_notices(ctl.notices_mut());
}

/// Execute a menu command, catching all errors
fn execute_command<G: ContactGateway>(ctl: &mut DirectoryController<G>, choice: MenuOption) -> Result<()> {
    match choice {
        MenuOption::Add => {
            ctl.open_create()?;
            run_form(ctl)?;
        }
        MenuOption::Search => {
            let current = ctl.filter().query.clone();
            if let Some(query) = text_input("search: ", Some(&current))? {
                ctl.set_query(query.trim());
            }
        }
        MenuOption::Category => {
            let choices = category_choices();
            if let Some(idx) = select("category:", &choices)? {
                ctl.set_category(ContactCategory::parse(choices[idx]));
            }
        }
        MenuOption::View => {
            if let Some(id) = pick_contact(ctl, "View:")? {
                ctl.open_view(id)?;
                let _ = clear_screen();
                if let Some(contact) = ctl.target() {
                    print_contact_detail(contact);
                }
                wait_for_continue();
                ctl.cancel();
            }
        }
        MenuOption::Edit => {
            if let Some(id) = pick_contact(ctl, "Edit:")? {
                ctl.open_edit(id)?;
                run_form(ctl)?;
            }
        }
        MenuOption::Delete => {
            if let Some(id) = pick_contact(ctl, "Delete:")? {
                let name = ctl.request_delete(id)?.name.clone();
                if confirm(&format!("Delete {}?", delete_prompt_name(&name)))? {
                    if let DeleteOutcome::Deleted(_) = ctl.confirm_delete()? {
                        println!("Deleted.");
                    }
                } else {
                    ctl.cancel();
                }
            }
        }
        MenuOption::Refresh => {
            ctl.refresh();
        }
        MenuOption::Quit => {}
    }
    Ok(())
}

/// Choose one of the visible contacts
fn pick_contact<G: ContactGateway>(ctl: &DirectoryController<G>, prompt: &str) -> Result<Option<ContactId>> {
    let visible = ctl.visible();
    if visible.is_empty() {
        println!("No contacts found.");
        wait_for_continue();
        return Ok(None);
    }
    Ok(select_contact(prompt, &visible)?.map(|idx| visible[idx].id))
}

/// Wait for user to press enter to continue
fn wait_for_continue() {
    println!();
    let _ = Text::new("[enter]")
        .with_render_config(minimal_render_config())
        .prompt_skippable();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_option_roundtrip() {
        for opt in MenuOption::ALL {
            let label = opt.label();
            let recovered = MenuOption::from_label(label);
            assert_eq!(recovered, Some(*opt), "Failed roundtrip for {:?}", opt);
        }
    }

    #[test]
    fn test_menu_option_from_invalid_label() {
        assert_eq!(MenuOption::from_label("Invalid"), None);
        assert_eq!(MenuOption::from_label(""), None);
    }

    #[test]
    fn test_failed_load_only_offers_refresh_and_quit() {
        let options = MenuOption::available(&LoadState::Failed("Failed to load contacts.".into()));
        assert_eq!(options, vec![MenuOption::Refresh, MenuOption::Quit]);
        assert_eq!(MenuOption::available(&LoadState::Ready).len(), MenuOption::ALL.len());
    }

    #[test]
    fn test_category_choices() {
        let choices = category_choices();
        assert_eq!(choices[0], ALL_CATEGORIES);
        assert_eq!(choices.len(), 6);
        assert_eq!(ContactCategory::parse(choices[0]), None);
        assert_eq!(ContactCategory::parse(choices[3]), Some(ContactCategory::Vip));
    }

    #[test]
    fn test_filter_summary() {
        assert_eq!(filter_summary(&ContactFilter::default()), None);
        let filter = ContactFilter::new("ann", Some(ContactCategory::Partner));
        assert_eq!(
            filter_summary(&filter).as_deref(),
            Some("search \"ann\", category Partner")
        );
    }
}
