use clap::Parser;
use contactdir::cli::{connect, load_contacts, run_add, run_delete, run_edit, run_list, run_menu, run_show, Cli, Commands};
use contactdir::config::{Config, ConfigOverrides};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("contactdir=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::load(&ConfigOverrides {
        config_path: cli.config.clone(),
        api_url: cli.api_url.clone(),
    })?;
    tracing::debug!(api_url = %config.api_url, timeout_secs = config.timeout_secs, "configuration resolved");

    let mut ctl = connect(&config)?;

    match cli.command {
        None => {
            // No subcommand provided - show interactive directory
            run_menu(&mut ctl)?;
        }
        Some(Commands::List(args)) => {
            load_contacts(&mut ctl)?;
            run_list(&mut ctl, &args.search, args.category.as_deref())?;
        }
        Some(Commands::Show(args)) => {
            run_show(&ctl, args.id)?;
        }
        Some(Commands::Add(args)) => {
            load_contacts(&mut ctl)?;
            run_add(&mut ctl, &args.fields)?;
        }
        Some(Commands::Edit(args)) => {
            load_contacts(&mut ctl)?;
            run_edit(&mut ctl, args.id, &args.fields)?;
        }
        Some(Commands::Delete(args)) => {
            load_contacts(&mut ctl)?;
            run_delete(&mut ctl, args.id, args.force)?;
        }
    }

    Ok(())
}
