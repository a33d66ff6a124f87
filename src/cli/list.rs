use anyhow::{anyhow, Result};

use crate::controller::DirectoryController;
use crate::filter::ContactFilter;
use crate::gateway::ContactGateway;
use super::display::print_contact_table;

/// Build the filter for the list command. An absent category means all.
pub fn parse_filter(search: &str, category: Option<&str>) -> Result<ContactFilter> {
    ContactFilter::from_input(search, category.unwrap_or("")).ok_or_else(|| {
        anyhow!(
            "Unknown category: {}. Use Customer, Vendor, VIP, Partner or Employee.",
            category.unwrap_or_default()
        )
    })
}

/// Execute the list command against an already loaded directory
pub fn run_list<G: ContactGateway>(
    ctl: &mut DirectoryController<G>,
    search: &str,
    category: Option<&str>,
) -> Result<()> {
    ctl.set_filter(parse_filter(search, category)?);

    let visible = ctl.visible();
    let total = ctl.store().len();
    if ctl.filter().is_empty() {
        println!("Contacts ({} total)\n", total);
    } else {
        println!("Contacts ({} of {})\n", visible.len(), total);
    }
    print_contact_table(&visible);
    Ok(())
}
