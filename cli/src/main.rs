mod storage;
mod transport;


use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use shopfront::config::{ApiConfig, CATALOG_URL_VAR, ConfigError, DEFAULT_CATALOG_URL, DEFAULT_IDENTITY_URL, IDENTITY_URL_VAR};
use shopfront::net::auth::{AuthClient, AuthError};
use shopfront::net::catalog::{CatalogClient, CatalogError};
use shopfront::net::types::Credentials;
use shopfront::session::SessionStore;
use shopfront::validate::{ProductDraft, RegistrationForm};

use crate::storage::FileStorage;
use crate::transport::ReqwestTransport;

const STATE_FILE_VAR: &str = "SHOPFRONT_STATE_FILE";
const DEFAULT_STATE_FILE: &str = ".shopfront-session.json";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "shopfront", about = "Shopfront identity and catalog CLI")]
struct Cli {
    #[arg(long, env = IDENTITY_URL_VAR, default_value = DEFAULT_IDENTITY_URL)]
    identity_url: String,

    #[arg(long, env = CATALOG_URL_VAR, default_value = DEFAULT_CATALOG_URL)]
    catalog_url: String,

    #[arg(long, env = STATE_FILE_VAR, default_value = DEFAULT_STATE_FILE)]
    state_file: PathBuf,

    #[arg(long, env = "SHOPFRONT_LOG", default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session token.
    Logout,
    /// Report whether a session token is stored.
    Status,
    /// Register a new customer account.
    Register(RegisterArgs),
    /// Print the user directory.
    Users {
        /// Bypass the local cache.
        #[arg(long, default_value_t = false)]
        refresh: bool,
    },
    /// List or create catalog products.
    Products(ProductsCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    repassword: String,
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    avatar: String,
}

#[derive(Args, Debug)]
struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProductsSubcommand {
    /// Print every product.
    List,
    /// Create a product (requires a stored session).
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        price: String,
        #[arg(long)]
        description: String,
    },
}

#[derive(Debug, Clone)]
struct CliContext {
    config: ApiConfig,
    state_file: PathBuf,
    http: reqwest::Client,
}

impl CliContext {
    fn session(&self) -> SessionStore<FileStorage> {
        SessionStore::new(FileStorage::new(&self.state_file))
    }

    fn auth_client(&self) -> AuthClient<ReqwestTransport, FileStorage> {
        AuthClient::new(ReqwestTransport::new(self.http.clone()), self.session(), self.config.clone())
    }

    fn catalog_client(&self) -> CatalogClient<ReqwestTransport, FileStorage> {
        CatalogClient::new(ReqwestTransport::new(self.http.clone()), self.session(), self.config.clone())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_max_level(cli.log_level).with_writer(std::io::stderr).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = CliContext {
        config: ApiConfig::new(&cli.identity_url, &cli.catalog_url)?,
        state_file: cli.state_file,
        http: reqwest::Client::new(),
    };
    tracing::debug!(state_file = %ctx.state_file.display(), "session state");

    match cli.command {
        Command::Login { email, password } => {
            ctx.auth_client().login(&Credentials { email, password }).await?;
            println!("logged in");
        }
        Command::Logout => {
            ctx.auth_client().logout()?;
            println!("logged out");
        }
        Command::Status => println!("{}", status_line(ctx.session().is_authenticated())),
        Command::Register(args) => {
            let form = RegistrationForm {
                email: args.email,
                password: args.password,
                repassword: args.repassword,
                name: args.name,
                avatar: args.avatar,
            };
            let user = ctx.auth_client().register(&form).await?;
            print_json(&user)?;
        }
        Command::Users { refresh } => {
            let client = ctx.auth_client();
            let users = if refresh { client.refresh_users().await? } else { client.users().await? };
            print_json(&users)?;
        }
        Command::Products(products) => run_products(&ctx, products).await?,
    }
    Ok(())
}

async fn run_products(ctx: &CliContext, products: ProductsCommand) -> Result<(), CliError> {
    let client = ctx.catalog_client();
    match products.command {
        ProductsSubcommand::List => print_json(&client.list_products().await?),
        ProductsSubcommand::Create { name, price, description } => {
            let created = client.create_product(&ProductDraft { name, price, description }).await;
            if matches!(created, Err(CatalogError::Unauthorized)) {
                ctx.auth_client().logout()?;
            }
            print_json(&created?)
        }
    }
}

fn status_line(authenticated: bool) -> &'static str {
    if authenticated { "authenticated" } else { "unauthenticated" }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
