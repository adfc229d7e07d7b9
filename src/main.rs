use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use comtam_lib::bootstrap::tracing::init_tracing_subscriber;
use comtam_lib::bootstrap::{load_config, resolve_app_dirs, wire_dependencies};
use comtam_lib::commands::{self, ProfileChanges};
use ct_app::App;
use ct_core::config::AppConfig;

#[derive(Parser)]
#[command(name = "comtam")]
#[command(about = "Session, onboarding and cart state for the Comtam client", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the first screen to show
    Start,
    /// Mark onboarding as finished
    CompleteOnboarding,
    /// Print the current session status
    Status,
    /// Create an account
    SignUp {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Change fields of the signed-in user's profile
    UpdateProfile {
        #[arg(long)]
        user_name: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
        #[arg(long)]
        ward: Option<String>,
        #[arg(long)]
        street: Option<String>,
        #[arg(long)]
        house_number: Option<String>,
    },
    /// Forget the signed-in user
    Logout,
    /// Print the home feed
    Feed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::empty(),
    };
    let app_dirs = resolve_app_dirs(&config)?;

    if let Err(err) = init_tracing_subscriber(&app_dirs.logs_dir()) {
        eprintln!("Failed to initialize tracing: {err}");
    }

    let app = App::new(wire_dependencies(&config, &app_dirs).await?);

    let output = match cli.command {
        Commands::Start => commands::start(&app).await?,
        Commands::CompleteOnboarding => commands::complete_onboarding(&app).await?,
        Commands::Status => commands::status(&app).await?,
        Commands::SignUp { email, password } => {
            commands::sign_up(&app, &email, &password).await?
        }
        Commands::Login { email, password } => {
            commands::login(&app, &email, &password).await?
        }
        Commands::UpdateProfile {
            user_name,
            phone_number,
            ward,
            street,
            house_number,
        } => {
            commands::update_profile(
                &app,
                ProfileChanges {
                    user_name,
                    phone_number,
                    ward,
                    street,
                    house_number,
                },
            )
            .await?
        }
        Commands::Logout => commands::logout(&app).await?,
        Commands::Feed => commands::feed(&app).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
