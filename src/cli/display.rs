use crate::models::Contact;
use super::ui::{term_width, truncate};

/// Column layout based on terminal width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name_width: usize,
    pub email_width: usize,
    pub phone_width: usize,
    pub company_width: usize,
    pub show_company: bool,
}

impl ColumnLayout {
    pub fn for_width(width: usize) -> Self {
        if width >= 100 {
            // Full display: ID | Name | Email | Phone | Company | Category
            ColumnLayout {
                name_width: 22,
                email_width: 28,
                phone_width: 14,
                company_width: 18,
                show_company: true,
            }
        } else {
            // Compact display: ID | Name | Email | Phone | Category
            ColumnLayout {
                name_width: 20,
                email_width: width.saturating_sub(52).max(12),
                phone_width: 12,
                company_width: 0,
                show_company: false,
            }
        }
    }
}

pub fn format_table_header(layout: &ColumnLayout) -> String {
    if layout.show_company {
        format!(
            "{:>5}  {:<name_w$}  {:<email_w$}  {:<phone_w$}  {:<company_w$}  CATEGORY",
            "ID",
            "NAME",
            "EMAIL",
            "PHONE",
            "COMPANY",
            name_w = layout.name_width,
            email_w = layout.email_width,
            phone_w = layout.phone_width,
            company_w = layout.company_width
        )
    } else {
        format!(
            "{:>5}  {:<name_w$}  {:<email_w$}  {:<phone_w$}  CATEGORY",
            "ID",
            "NAME",
            "EMAIL",
            "PHONE",
            name_w = layout.name_width,
            email_w = layout.email_width,
            phone_w = layout.phone_width
        )
    }
}

pub fn format_contact_row(contact: &Contact, layout: &ColumnLayout) -> String {
    let name = truncate(&contact.name, layout.name_width);
    let email = truncate(&contact.email, layout.email_width);
    let phone = truncate(&contact.phone, layout.phone_width);

    if layout.show_company {
        let company = truncate(contact.company_display(), layout.company_width);
        format!(
            "{:>5}  {:<name_w$}  {:<email_w$}  {:<phone_w$}  {:<company_w$}  {}",
            contact.id,
            name,
            email,
            phone,
            company,
            contact.category,
            name_w = layout.name_width,
            email_w = layout.email_width,
            phone_w = layout.phone_width,
            company_w = layout.company_width
        )
    } else {
        format!(
            "{:>5}  {:<name_w$}  {:<email_w$}  {:<phone_w$}  {}",
            contact.id,
            name,
            email,
            phone,
            contact.category,
            name_w = layout.name_width,
            email_w = layout.email_width,
            phone_w = layout.phone_width
        )
    }
}

/// Print the contact table sized to the current terminal
pub fn print_contact_table(contacts: &[&Contact]) {
    if contacts.is_empty() {
        println!("No contacts found.");
        return;
    }

    let layout = ColumnLayout::for_width(term_width());
    println!("{}", format_table_header(&layout));
    for contact in contacts {
        println!("{}", format_contact_row(contact, &layout));
    }
}

/// Detail lines for a single contact
pub fn format_contact_detail(contact: &Contact) -> Vec<String> {
    vec![
        format!("Name:     {}", contact.name),
        format!("Email:    {}", contact.email),
        format!("Phone:    {}", contact.phone),
        format!("Company:  {}", contact.company_display()),
        format!("Category: {}", contact.category),
    ]
}

pub fn print_contact_detail(contact: &Contact) {
    println!("Contact Details\n");
    for line in format_contact_detail(contact) {
        println!("  {}", line);
    }
}
