//! Novel reader command-line client
//!
//! Talks to the reader API with credentials persisted next to the config file.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use novel_client::{
    auth::{self, CredentialStore, Credentials, FileStore},
    config,
    error::{AppError, Result},
    http::ApiClient,
    image::ImageResolver,
    models::{ClientConfig, LoginRequest, PageQuery},
};

/// novel - Reader API client
#[derive(Parser, Debug)]
#[command(name = "novel", version, about = "Command-line client for the novel reader API")]

struct Cli {
    /// Path to the client configuration file
    #[arg(short, long, default_value = "novel.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        /// Verification code, when required
        #[arg(long)]
        captcha: Option<String>,
        #[arg(long)]
        remember: bool,
    },

    /// End the session and forget stored credentials
    Logout,

    /// Show the stored identity and the server-side profile
    Whoami,

    /// Manage the bookshelf
    Bookshelf {
        #[command(subcommand)]
        action: BookshelfAction,
    },

    /// Like, unlike, or inspect comment likes
    Like {
        #[command(subcommand)]
        action: LikeAction,
    },

    /// Fetch an image verification challenge
    VerifyCode,

    /// Upload an image file
    Upload { file: PathBuf },

    /// Print the absolute URL for an image reference
    ResolveImage {
        reference: Option<String>,
        #[arg(long, default_value = "")]
        fallback: String,
    },

    /// Validate the configuration file
    Validate,
}

#[derive(Subcommand, Debug)]
enum BookshelfAction {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    Add { book_id: i64 },
    Remove { book_id: i64 },
    Check { book_id: i64 },
}

#[derive(Subcommand, Debug)]
enum LikeAction {
    Toggle {
        comment_id: i64,
        /// Remove the like instead of adding it
        #[arg(long)]
        off: bool,
    },
    Count { comment_id: i64 },
    Status { comment_ids: Vec<i64> },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load_config(&cli.config)?;
    let credentials_path = config::credentials_path(&cli.config, &config);
    log::debug!(
        "Using API {} with credentials at {}",
        config.api_base_url,
        credentials_path.display()
    );

    let images = ImageResolver::new(config.image_base_url.clone());
    let store = Arc::new(FileStore::open(&credentials_path).await?);
    let client = ApiClient::connect(&config, store.clone())?;

    match cli.command {
        Command::Login {
            username,
            password,
            captcha,
            remember,
        } => {
            let form = LoginRequest {
                user_name: username,
                password,
                captcha,
                remember_me: remember,
            };
            let login = client.users().login(&form).await?;
            auth::remember_login(store.as_ref(), &login).await?;
            log::info!(
                "Logged in as {}",
                login
                    .nick_name
                    .or(login.user_name)
                    .unwrap_or_else(|| "unknown user".into())
            );
        }

        Command::Logout => {
            let result = client.users().logout().await;
            // Local credentials go even when the server call fails.
            forget_credentials(&store).await;
            result?;
            log::info!("Logged out");
        }

        Command::Whoami => {
            if !auth::is_logged_in(store.as_ref()) {
                log::warn!("Not logged in. Run 'novel login' first.");
                return Ok(());
            }
            let creds = Credentials::load(store.as_ref());
            log::info!(
                "User: {} (uid {})",
                creds.username.as_deref().unwrap_or("-"),
                creds.user_id.as_deref().unwrap_or("-")
            );
            let info = client.users().info().await?;
            log::info!("Nickname: {}", info.nick_name.as_deref().unwrap_or("-"));
            log::info!("Avatar: {}", images.resolve(info.user_photo.as_deref(), "-"));
        }

        Command::Bookshelf { action } => match action {
            BookshelfAction::List { page, size } => {
                let shelf = client.bookshelf().list(&PageQuery::new(page, size)).await?;
                log::info!(
                    "Page {}/{} ({} books)",
                    shelf.page_num,
                    shelf.page_count(),
                    shelf.total
                );
                for entry in &shelf.list {
                    println!(
                        "{}\t{}\t{}\t{}",
                        entry.book_id,
                        entry.book_name,
                        entry.author_name.as_deref().unwrap_or("-"),
                        images.resolve(entry.pic_url.as_deref(), "-")
                    );
                }
            }
            BookshelfAction::Add { book_id } => {
                client.bookshelf().add(book_id).await?;
                log::info!("Added book {book_id} to the bookshelf");
            }
            BookshelfAction::Remove { book_id } => {
                client.bookshelf().remove(book_id).await?;
                log::info!("Removed book {book_id} from the bookshelf");
            }
            BookshelfAction::Check { book_id } => {
                let present = client.bookshelf().contains(book_id).await?;
                println!("{present}");
            }
        },

        Command::Like { action } => match action {
            LikeAction::Toggle { comment_id, off } => {
                client.likes().toggle(comment_id, !off).await?;
                log::info!(
                    "{} comment {comment_id}",
                    if off { "Unliked" } else { "Liked" }
                );
            }
            LikeAction::Count { comment_id } => {
                println!("{}", client.likes().count(comment_id).await?);
            }
            LikeAction::Status { comment_ids } => match comment_ids.as_slice() {
                [] => return Err(AppError::validation("at least one comment id is required")),
                [single] => println!("{}", client.likes().status(*single).await?),
                many => {
                    for (id, liked) in client.likes().batch_status(many).await? {
                        println!("{id}\t{liked}");
                    }
                }
            },
        },

        Command::VerifyCode => {
            let code = client.resources().img_verify_code().await?;
            println!("{}", serde_json::to_string_pretty(&code)?);
        }

        Command::Upload { file } => {
            let bytes = tokio::fs::read(&file).await?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| AppError::validation("upload path has no file name"))?;
            let url = client.resources().upload_image(&file_name, bytes).await?;
            println!("{}", images.resolve(Some(url.as_str()), &url));
        }

        Command::ResolveImage {
            reference,
            fallback,
        } => {
            println!("{}", images.resolve(reference.as_deref(), &fallback));
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            let strict = ClientConfig::load(&cli.config)?.with_env_overrides();
            if let Err(e) = strict.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({})", cli.config.display());
        }
    }

    Ok(())
}

/// Remove stored credentials, logging instead of failing.
async fn forget_credentials(store: &FileStore) {
    if let Err(e) = store.clear_all().await {
        log::warn!("Failed to clear credentials at {}: {}", store.path().display(), e);
    }
}
