//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use chainfind_core::config;

mod commands;

#[derive(Parser)]
#[command(name = "chainfind")]
#[command(version)]
#[command(about = "CHAIN_CORE terminal client and post API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the system prompt from config
    #[arg(long)]
    system_prompt: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Interactive CHAIN_CORE terminal session (default)
    Chat {
        /// Override the model from config
        #[arg(short, long)]
        model: Option<String>,

        /// Override the reply token cap from config
        #[arg(long, value_name = "TOKENS")]
        max_output_tokens: Option<u32>,
    },

    /// Run the blog post CRUD API
    Serve {
        /// Override the listen address from config
        #[arg(long, value_name = "ADDR")]
        listen: Option<String>,
    },

    /// Manage blog posts (system logs)
    Posts {
        #[command(subcommand)]
        command: PostsCommands,

        /// Target the HTTP backend instead of the local store
        #[arg(long)]
        remote: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum PostsCommands {
    /// Lists all posts, newest first
    List,
    /// Shows a single post
    Show {
        #[arg(value_name = "POST_ID")]
        id: String,
    },
    /// Deletes a post
    Delete {
        #[arg(value_name = "POST_ID")]
        id: String,
    },
    /// Restores the seed posts (local store only)
    Reset,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Show the resolved configuration
    Show,
    /// Persist the Gemini model to the config file
    SetModel {
        #[arg(value_name = "MODEL")]
        model: String,
    },
    /// Persist the blog post backend to the config file
    SetPostsBackend {
        #[arg(value_name = "BACKEND", value_enum)]
        backend: BackendArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum BackendArg {
    Local,
    Http,
}

impl From<BackendArg> for config::PostsBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Local => config::PostsBackend::Local,
            BackendArg::Http => config::PostsBackend::Http,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = config::Config::load().context("load config")?;

    if let Some(sp) = cli.system_prompt.as_deref() {
        let trimmed = sp.trim();
        if trimmed.is_empty() {
            config.system_prompt = None;
        } else {
            config.system_prompt = Some(trimmed.to_string());
        }
    }

    // default to chat mode
    let Some(command) = cli.command else {
        return commands::chat::run(&config, None, None).await;
    };

    match command {
        Commands::Chat {
            model,
            max_output_tokens,
        } => commands::chat::run(&config, model.as_deref(), max_output_tokens).await,

        Commands::Serve { listen } => {
            let addr = listen.unwrap_or_else(|| config.server.listen_addr.clone());
            commands::serve::run(&addr).await
        }

        Commands::Posts { command, remote } => {
            let store = commands::posts::resolve_store(&config, remote);
            match command {
                PostsCommands::List => commands::posts::list(store.as_ref()).await,
                PostsCommands::Show { id } => commands::posts::show(store.as_ref(), &id).await,
                PostsCommands::Delete { id } => commands::posts::delete(store.as_ref(), &id).await,
                PostsCommands::Reset => commands::posts::reset(store.as_ref()).await,
            }
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Show => commands::config::show(&config),
            ConfigCommands::SetModel { model } => commands::config::set_model(&model),
            ConfigCommands::SetPostsBackend { backend } => {
                commands::config::set_posts_backend(backend.into())
            }
        },
    }
}
