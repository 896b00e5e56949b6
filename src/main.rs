use std::fs;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use polyglot::cli::{
    DomainCommands, LanguageCommands, SourceAddArgs, SourceCommands, SourceListArgs,
    TranslationCommands, run_domain_add, run_domain_list, run_domain_remove, run_language_add,
    run_language_list, run_language_remove, run_lookup, run_snippet, run_source_add,
    run_source_edit, run_source_list, run_source_remove, run_source_show, run_translation_remove,
    run_translation_set,
};
use polyglot::config::{DB_FILE_NAME, ServerConfig};
use polyglot::server::{AppState, create_router};
use polyglot::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "polyglot")]
#[command(about = "A self-hostable translation manager", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database
    Init {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,
    },

    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, default_value = "8080")]
        port: u16,

        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Public base URL for external access (e.g., "https://i18n.example.com").
        /// Used in generated snippets. If not set, it is derived from request headers.
        #[arg(long)]
        public_base_url: Option<String>,
    },

    /// Manage domains
    Domain {
        #[command(subcommand)]
        command: DomainCommands,
    },

    /// Manage languages
    Language {
        #[command(subcommand)]
        command: LanguageCommands,
    },

    /// Manage source strings
    Source {
        #[command(subcommand)]
        command: SourceCommands,
    },

    /// Manage translations of a source
    Translation {
        #[command(subcommand)]
        command: TranslationCommands,
    },

    /// Print generated snippets for a source
    Snippet {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Source key
        key: String,

        /// xliff, properties, endpoint or angular
        #[arg(long, default_value = "xliff")]
        format: String,

        /// Server URL used in endpoint and angular snippets
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        base_url: String,
    },

    /// Resolve a key against a running server
    Lookup {
        /// Server URL
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        server: String,

        /// Source key
        key: String,

        /// Language code
        code: String,
    },
}

fn run_init(data_dir: String) -> anyhow::Result<()> {
    let data_path: std::path::PathBuf = data_dir.into();
    fs::create_dir_all(&data_path)?;

    let db_path = data_path.join(DB_FILE_NAME);
    let store = SqliteStore::new(&db_path)?;

    if store.is_initialized()? {
        bail!("Already initialized. Database exists at: {}", db_path.display());
    }

    store.initialize()?;

    println!();
    println!("Created database at {}", db_path.display());
    println!();
    println!("Next steps:");
    println!("  polyglot domain add --name <domain>");
    println!("  polyglot language add --name <name> --code <code>");
    println!();

    Ok(())
}

async fn run_serve(config: ServerConfig) -> anyhow::Result<()> {
    let db_path = config.db_path();
    if !db_path.exists() {
        bail!("Server not initialized. Run 'polyglot init' first to create the database.");
    }

    let store = SqliteStore::new(&db_path)?;
    if !store.is_initialized()? {
        bail!("Server not initialized. Run 'polyglot init' first to create the database.");
    }

    info!("Using database {}", db_path.display());

    let state = Arc::new(AppState::new(
        Arc::new(store),
        config.public_base_url.clone(),
    ));

    let app = create_router(state);
    let addr = config.socket_addr()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("polyglot=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { data_dir } => run_init(data_dir)?,
        Commands::Serve {
            host,
            port,
            data_dir,
            public_base_url,
        } => {
            let config = ServerConfig {
                host,
                port,
                data_dir: data_dir.into(),
                public_base_url,
            };
            run_serve(config).await?;
        }
        Commands::Domain { command } => match command {
            DomainCommands::Add {
                data_dir,
                name,
                non_interactive,
            } => run_domain_add(data_dir, name, non_interactive)?,
            DomainCommands::List { data_dir, json } => run_domain_list(data_dir, json)?,
            DomainCommands::Remove {
                data_dir,
                name,
                non_interactive,
                yes,
            } => run_domain_remove(data_dir, name, non_interactive, yes)?,
        },
        Commands::Language { command } => match command {
            LanguageCommands::Add {
                data_dir,
                name,
                code,
                non_interactive,
            } => run_language_add(data_dir, name, code, non_interactive)?,
            LanguageCommands::List { data_dir, json } => run_language_list(data_dir, json)?,
            LanguageCommands::Remove {
                data_dir,
                code,
                non_interactive,
                yes,
            } => run_language_remove(data_dir, code, non_interactive, yes)?,
        },
        Commands::Source { command } => match command {
            SourceCommands::Add {
                data_dir,
                key,
                text,
                domain,
                translations,
                created_by,
                non_interactive,
            } => run_source_add(
                data_dir,
                SourceAddArgs {
                    key,
                    text,
                    domain,
                    translations,
                    created_by,
                    non_interactive,
                },
            )?,
            SourceCommands::List {
                data_dir,
                domain,
                language,
                search,
                sort,
                desc,
                page,
                per_page,
                json,
            } => run_source_list(
                data_dir,
                SourceListArgs {
                    domain,
                    language,
                    search,
                    sort,
                    desc,
                    page,
                    per_page,
                    json,
                },
            )?,
            SourceCommands::Show {
                data_dir,
                key,
                json,
            } => run_source_show(data_dir, key, json)?,
            SourceCommands::Edit {
                data_dir,
                key,
                text,
                domain,
            } => run_source_edit(data_dir, key, text, domain)?,
            SourceCommands::Remove {
                data_dir,
                key,
                non_interactive,
                yes,
            } => run_source_remove(data_dir, key, non_interactive, yes)?,
        },
        Commands::Translation { command } => match command {
            TranslationCommands::Set {
                data_dir,
                key,
                code,
                text,
                created_by,
            } => run_translation_set(data_dir, key, code, text, created_by)?,
            TranslationCommands::Remove {
                data_dir,
                key,
                code,
                non_interactive,
                yes,
            } => run_translation_remove(data_dir, key, code, non_interactive, yes)?,
        },
        Commands::Snippet {
            data_dir,
            key,
            format,
            base_url,
        } => run_snippet(data_dir, key, format, base_url)?,
        Commands::Lookup { server, key, code } => {
            // reqwest's blocking client must not run on an async worker.
            tokio::task::spawn_blocking(move || run_lookup(server, key, code)).await??;
        }
    }

    Ok(())
}
