//! Saferwall CLI - command line front-end for the portal API

use std::path::PathBuf;
use std::time::Duration;

use api::{ApiClient, ApiConfig, ApiError, ConfigError, ExecutionContext};
use clap::{Parser, Subcommand};
use saferwall_lib::loaders::{
    PageQuery, RegisterForm, load_bound_imports, load_file_layout, load_nt_header, load_strings,
    register_action,
};
use saferwall_lib::{
    ChangePasswordData, LoaderError, LoginData, SaferwallClient, UpdateEmailData,
    UpdatePasswordData, UpdateProfileData, UploadFile, default_file_menu,
};
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the bearer token.
const TOKEN_ENV: &str = "SAFERWALL_TOKEN";

#[derive(Parser)]
#[command(name = "saferwall")]
#[command(version, about = "Query and manage files on a Saferwall portal", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json: bool,

    /// API base URL [default: $PUBLIC_API_URL]
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Bearer token [default: $SAFERWALL_TOKEN]
    #[arg(long, global = true, value_name = "TOKEN")]
    token: Option<String>,

    /// Request timeout in seconds [default: none]
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a file record
    File {
        #[arg(value_name = "HASH")]
        hash: String,
    },

    /// Show the processing status of a file
    Status {
        #[arg(value_name = "HASH")]
        hash: String,
    },

    /// Show the file page header fields
    Meta {
        #[arg(value_name = "HASH")]
        hash: String,
    },

    /// Show a file record merged with its summary
    Summary {
        #[arg(value_name = "HASH")]
        hash: String,
    },

    /// Upload a file for scanning
    Upload {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Like a file
    Like {
        #[arg(value_name = "HASH")]
        hash: String,

        /// Remove the like instead
        #[arg(long)]
        undo: bool,
    },

    /// Show recent portal activity
    Activities,

    /// Show a user profile
    User {
        #[arg(value_name = "USERNAME")]
        username: String,
    },

    /// Follow a user
    Follow {
        #[arg(value_name = "USERNAME")]
        username: String,

        /// Unfollow instead
        #[arg(long)]
        undo: bool,
    },

    /// Log in and print the session
    Login { username: String, password: String },

    /// Create an account
    Register {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// Send the account confirmation email again
    ResendConfirmation { email: String },

    /// Request a password reset email
    ResetPassword { email: String },

    /// Set a new password using a reset token
    ChangePassword { token: String, password: String },

    /// Update profile fields
    UpdateProfile {
        username: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },

    /// Change the account email
    UpdateEmail {
        username: String,
        email: String,
        password: String,
    },

    /// Change the account password
    UpdatePassword {
        username: String,
        old_password: String,
        new_password: String,
    },

    /// Delete an account
    DeleteAccount { username: String },

    /// End the current session
    Logout,

    /// Show the file page layout model
    Layout {
        #[arg(value_name = "HASH")]
        hash: String,

        /// Route path [default: /files/<HASH>]
        #[arg(long, value_name = "PATH")]
        path: Option<String>,
    },

    /// Show the PE NT header
    NtHeader {
        #[arg(value_name = "HASH")]
        hash: String,
    },

    /// Show the PE bound import table
    BoundImports {
        #[arg(value_name = "HASH")]
        hash: String,
    },

    /// Show a page of extracted strings
    Strings {
        #[arg(value_name = "HASH")]
        hash: String,

        #[arg(long)]
        page: Option<String>,

        #[arg(long)]
        per_page: Option<String>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,saferwall_lib=info,api=info".to_string(),
            2 => "info,saferwall_lib=debug,api=debug".to_string(),
            _ => "debug,saferwall_lib=trace,api=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn build_client(
    api_url: Option<String>,
    token: Option<String>,
    timeout: Option<u64>,
) -> Result<SaferwallClient, CliError> {
    let config = match api_url {
        Some(url) => ApiConfig::new(url),
        None => ApiConfig::from_env()?,
    };

    let mut builder = ApiClient::builder(config).context(ExecutionContext::Server);
    if let Some(secs) = timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(token) = token
        .or_else(|| std::env::var(TOKEN_ENV).ok())
        .filter(|token| !token.is_empty())
    {
        builder = builder.bearer_token(token);
    }

    Ok(SaferwallClient::from_api(builder.build()?))
}

/// Extra context printed under an API failure.
fn failure_detail(err: &ApiError) -> Option<String> {
    match err {
        ApiError::Response(response) => Some(response.text().into_owned()),
        ApiError::Client(client) if client.is_timeout() => {
            Some("the API did not answer in time; raise --timeout".to_string())
        }
        ApiError::Validation(validation) if validation.is_parse_error() => {
            Some("the API answered with a body that is not the expected JSON".to_string())
        }
        _ => None,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = build_client(cli.api_url, cli.token, cli.timeout)?;

    match cli.command {
        Commands::File { hash } => print_json(&client.get_file(&hash).await?),
        Commands::Status { hash } => print_json(&client.get_file_status(&hash).await?),
        Commands::Meta { hash } => print_json(&client.get_file_meta(&hash).await?),
        Commands::Summary { hash } => print_json(&client.get_file_summary(&hash).await?),
        Commands::Upload { path } => {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|source| CliError::Read {
                    path: path.clone(),
                    source,
                })?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            print_json(&client.upload_file(UploadFile::new(file_name, bytes)).await?)
        }
        Commands::Like { hash, undo } => print_json(&client.like_file(&hash, !undo).await?),
        Commands::Activities => print_json(&client.get_activities().await?),
        Commands::User { username } => print_json(&client.get_user(&username).await?),
        Commands::Follow { username, undo } => {
            print_json(&client.follow_user(&username, !undo).await?)
        }
        Commands::Login { username, password } => {
            let data = LoginData { username, password };
            print_json(&client.sign_in(&data).await?)
        }
        Commands::Register {
            email,
            username,
            password,
        } => {
            let form = RegisterForm {
                email,
                username,
                password,
            };
            print_json(&register_action(&client, form).await?)
        }
        Commands::ResendConfirmation { email } => {
            print_json(&client.send_confirmation(&email).await?)
        }
        Commands::ResetPassword { email } => print_json(&client.reset_password(&email).await?),
        Commands::ChangePassword { token, password } => {
            let data = ChangePasswordData { token, password };
            print_json(&client.change_password(&data).await?)
        }
        Commands::UpdateProfile {
            username,
            name,
            location,
            url,
            bio,
        } => {
            let data = UpdateProfileData {
                username,
                name,
                location,
                url,
                bio,
            };
            print_json(&client.update_profile(&data).await?)
        }
        Commands::UpdateEmail {
            username,
            email,
            password,
        } => {
            let data = UpdateEmailData {
                username,
                email,
                password,
            };
            print_json(&client.update_email(&data).await?)
        }
        Commands::UpdatePassword {
            username,
            old_password,
            new_password,
        } => {
            let data = UpdatePasswordData {
                username,
                old_password,
                new_password,
            };
            print_json(&client.update_password(&data).await?)
        }
        Commands::DeleteAccount { username } => {
            print_json(&client.delete_account(&username).await?)
        }
        Commands::Logout => print_json(&client.log_out().await?),
        Commands::Layout { hash, path } => {
            let pathname = path.unwrap_or_else(|| format!("/files/{hash}"));
            let layout = load_file_layout(&client, &hash, &pathname, &default_file_menu()).await?;
            print_json(&layout)
        }
        Commands::NtHeader { hash } => print_json(&load_nt_header(&client, &hash).await?),
        Commands::BoundImports { hash } => print_json(&load_bound_imports(&client, &hash).await?),
        Commands::Strings {
            hash,
            page,
            per_page,
        } => {
            let query = PageQuery::from_params(page.as_deref(), per_page.as_deref());
            print_json(&load_strings(&client, &hash, query).await?)
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json);

    if let Err(e) = run(cli).await {
        let api_error = match &e {
            CliError::Api(err) | CliError::Loader(LoaderError::Api(err)) => Some(err),
            _ => None,
        };
        match api_error.and_then(failure_detail) {
            Some(detail) => eprintln!("Error: {e}\n{detail}"),
            None => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }
}
