use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use eyecare_core::article::ArticleCategory;
use eyecare_core::consultation::{ConsultationAction, ConsultationStatus};
use eyecare_core::session::UserRole;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "eyecare")]
#[command(about = "EyeCare Vision AI - eye scans, specialist reviews and consultations", long_about = None)]
struct Cli {
    /// API base URL (overrides config.toml and EYECARE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding config.toml and session.json
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage config.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    #[command(flatten)]
    Client(ClientCommand),
}

/// Commands that talk to the backend.
#[derive(Subcommand)]
enum ClientCommand {
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        username: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        /// patient or specialist
        #[arg(long, default_value = "patient")]
        role: UserRole,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long)]
        specialization: Option<String>,
        #[arg(long)]
        license_number: Option<String>,
    },
    /// Forget the current session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Eye scans
    Scans {
        #[command(subcommand)]
        action: ScanAction,
    },
    /// Consultation requests
    Consultations {
        #[command(subcommand)]
        action: ConsultationCommand,
    },
    /// List specialists available for consultations
    Specialists,
    /// Browse eye-care articles
    Articles {
        /// prevention, symptoms, treatment or general
        #[arg(short, long)]
        category: Option<ArticleCategory>,
    },
    /// Send a message to the EyeCare team
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// Check that the configured routes exist on the server
    Doctor,
}

impl ClientCommand {
    /// Commands that hit collection routes run the route check first.
    fn checks_routes_at_start(&self) -> bool {
        !matches!(
            self,
            Self::Login { .. } | Self::Register { .. } | Self::Logout | Self::Whoami | Self::Doctor
        )
    }
}

#[derive(Subcommand)]
enum ScanAction {
    /// List scans
    List,
    /// Show one scan with its review
    Show { id: u64 },
    /// Upload an eye image for analysis
    Upload { path: PathBuf },
    /// Review a scan (specialists)
    Review {
        id: u64,
        #[arg(long)]
        diagnosis: String,
        #[arg(long)]
        recommendations: String,
    },
}

#[derive(Subcommand)]
enum ConsultationCommand {
    /// List consultations with per-status counts
    List {
        #[arg(short, long)]
        status: Option<ConsultationStatus>,
    },
    /// Request a consultation about a scan (patients)
    Request {
        #[arg(long)]
        specialist: Option<u64>,
        #[arg(long)]
        scan: Option<u64>,
        #[arg(short, long)]
        description: String,
        /// RFC 3339, e.g. 2024-06-01T09:00:00Z
        #[arg(long)]
        date: Option<DateTime<Utc>>,
    },
    /// Approve a pending consultation (specialists)
    Approve { id: u64 },
    /// Mark an approved consultation completed (specialists)
    Complete { id: u64 },
    /// Decline or cancel a consultation (specialists)
    Cancel { id: u64 },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = commands::Settings {
        api_url: cli.api_url,
        config_dir: cli.config_dir,
        ephemeral: cli.ephemeral,
    };

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Init => commands::config::init(&settings)?,
            ConfigAction::Show => commands::config::show(&settings)?,
        },
        Commands::Client(command) => {
            let client = commands::connect(&settings).await?;
            if command.checks_routes_at_start() {
                commands::warn_missing_routes(&client).await;
            }
            match command {
                ClientCommand::Login { username, password } => {
                    commands::auth::login(&client, username, password).await?
                }
                ClientCommand::Register {
                    username,
                    email,
                    role,
                    first_name,
                    last_name,
                    specialization,
                    license_number,
                } => {
                    commands::auth::register(
                        &client,
                        commands::auth::RegisterArgs {
                            username,
                            email,
                            role,
                            first_name,
                            last_name,
                            specialization,
                            license_number,
                        },
                    )
                    .await?
                }
                ClientCommand::Logout => commands::auth::logout(&client).await?,
                ClientCommand::Whoami => commands::auth::whoami(&client),
                ClientCommand::Scans { action } => match action {
                    ScanAction::List => commands::scans::list(&client).await?,
                    ScanAction::Show { id } => commands::scans::show(&client, id).await?,
                    ScanAction::Upload { path } => commands::scans::upload(&client, &path).await?,
                    ScanAction::Review {
                        id,
                        diagnosis,
                        recommendations,
                    } => commands::scans::review(&client, id, diagnosis, recommendations).await?,
                },
                ClientCommand::Consultations { action } => match action {
                    ConsultationCommand::List { status } => {
                        commands::consultations::list(&client, status).await?
                    }
                    ConsultationCommand::Request {
                        specialist,
                        scan,
                        description,
                        date,
                    } => {
                        commands::consultations::request(
                            &client,
                            specialist,
                            scan,
                            description,
                            date,
                        )
                        .await?
                    }
                    ConsultationCommand::Approve { id } => {
                        commands::consultations::act(&client, id, ConsultationAction::Approve)
                            .await?
                    }
                    ConsultationCommand::Complete { id } => {
                        commands::consultations::act(&client, id, ConsultationAction::Complete)
                            .await?
                    }
                    ConsultationCommand::Cancel { id } => {
                        commands::consultations::act(&client, id, ConsultationAction::Cancel)
                            .await?
                    }
                },
                ClientCommand::Specialists => commands::info::specialists(&client).await,
                ClientCommand::Articles { category } => {
                    commands::info::articles(&client, category).await?
                }
                ClientCommand::Contact {
                    name,
                    email,
                    subject,
                    message,
                } => commands::info::contact(&client, name, email, subject, message).await?,
                ClientCommand::Doctor => commands::info::doctor(&client).await?,
            }
        }
    }

    Ok(())
}
