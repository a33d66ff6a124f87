use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::controller::{DirectoryController, LoadState};
use crate::gateway::{ContactGateway, HttpGateway};

pub mod add;
pub mod delete;
pub mod display;
pub mod edit;
pub mod form;
pub mod list;
pub mod menu;
pub mod show;
pub mod ui;

pub use add::run_add;
pub use delete::run_delete;
pub use display::{print_contact_detail, print_contact_table};
pub use edit::run_edit;
pub use list::run_list;
pub use menu::run_menu;
pub use show::run_show;

#[derive(Parser)]
#[command(name = "contactdir")]
#[command(about = "Contact directory for the command line")]
#[command(version)]
pub struct Cli {
    /// Base URL of the contacts service
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
    /// Path to a config.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List contacts, optionally filtered
    List(ListArgs),
    /// Show full details for a contact
    Show(ShowArgs),
    /// Add a new contact
    Add(AddArgs),
    /// Edit an existing contact
    Edit(EditArgs),
    /// Delete a contact
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Match name, email or company (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub search: String,
    /// Customer, Vendor, VIP, Partner or Employee
    #[arg(short, long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: i64,
}

#[derive(Args, Default)]
pub struct ContactFields {
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(short, long)]
    pub email: Option<String>,
    #[arg(short, long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(short, long)]
    pub category: Option<String>,
}

impl ContactFields {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.company.is_none()
            && self.category.is_none()
    }
}

#[derive(Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: ContactFields,
}

#[derive(Args)]
pub struct EditArgs {
    pub id: i64,
    #[command(flatten)]
    pub fields: ContactFields,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub id: i64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// Build a controller talking to the configured service.
pub fn connect(config: &Config) -> Result<DirectoryController<HttpGateway>> {
    let gateway = HttpGateway::new(&config.api_url, config.timeout())?;
    Ok(DirectoryController::new(gateway))
}

/// Load the contact list, turning a failed load into an error.
pub fn load_contacts<G: ContactGateway>(ctl: &mut DirectoryController<G>) -> Result<()> {
    match ctl.initial_load() {
        LoadState::Failed(message) => Err(anyhow!("{}", message)),
        _ => Ok(()),
    }
}
