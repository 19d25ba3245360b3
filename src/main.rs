use clap::{Parser, Subcommand};
use crane_landing::lead::LeadForm;
use crane_landing::theme::{JsonFileStore, Theme, ThemePreference};
use crane_landing::{chrome, config, generate, lead, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crane-landing")]
#[command(about = "Landing page generator for a crane-rental business")]
#[command(long_about = "\
Landing page generator for a crane-rental business

Renders one static page: hero, stats, an equipment carousel with per-slide
specs, a project gallery, and a contact form that opens the visitor's mail
client. No backend is involved.

Site structure:

  site/
  ├── config.toml      # Site config (optional, overrides stock defaults)
  └── assets/          # Copied to the output root (img/, favicon, pkg/)

Run 'crane-landing gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site directory holding config.toml and assets/
    #[arg(long, default_value = "site", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log debug events (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the landing page into the output directory
    Build,
    /// Load and validate config without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print the mailto: link the contact form would open
    Mailto(MailtoArgs),
    /// Inspect or toggle the stored light/dark preference
    Theme(ThemeArgs),
}

#[derive(clap::Args)]
struct MailtoArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long, default_value = "")]
    message: String,
}

#[derive(clap::Args)]
struct ThemeArgs {
    #[command(subcommand)]
    action: Option<ThemeAction>,

    /// JSON file the preference is stored in
    #[arg(long, default_value = "theme.json", global = true)]
    store: PathBuf,
}

#[derive(Subcommand, Clone, Copy)]
enum ThemeAction {
    /// Print the stored theme (default)
    Show,
    /// Flip the stored theme and print the new one
    Toggle,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build => {
            let site = config::load_config(&cli.config)?;
            println!("==> Building {} → {}", cli.config.display(), cli.output.display());
            let summary = generate::generate(
                &site,
                &cli.config,
                &cli.output,
                chrome::current_year(),
            )?;
            output::print_build_output(&summary);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let site = config::load_config(&cli.config)?;
            output::print_check_output(&site, &cli.config);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Mailto(args) => {
            let site = config::load_config(&cli.config)?;
            let form = LeadForm {
                name: args.name,
                phone: args.phone,
                location: args.location,
                message: args.message,
            };
            let link = lead::mailto_link(&form, &site.lead.recipient, &site.lead.subject)
                .map_err(|err| err.to_string())?;
            println!("{}", link);
        }
        Command::Theme(args) => {
            let site = config::load_config(&cli.config)?;
            let store = JsonFileStore::new(&args.store);
            let mut pref = ThemePreference::new(store, &site.theme.storage_key, site.theme.default);
            match args.action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => {
                    output::print_theme_status(pref.stored()?, site.theme.default, &args.store);
                }
                ThemeAction::Toggle => {
                    let current: Theme = pref.resolve(false)?;
                    let next = pref.toggle(current)?;
                    output::print_theme_status(Some(next), site.theme.default, &args.store);
                }
            }
        }
    }

    Ok(())
}

/// Route `tracing` events to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "crane_landing=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
