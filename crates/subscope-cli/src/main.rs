mod analyze;
mod query;

use clap::{Parser, Subcommand};
use subscope_analysis::{AnalysisContext, FeedClient, ModelClient, ReportAssembler};
use subscope_core::SubjectProfiles;
use subscope_store::JsonStore;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "subscope-cli")]
#[command(about = "Newsletter brand and persuasion analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze one subject's feed and store the report
    Analyze {
        /// Display name; the slug is derived from it
        #[arg(long)]
        name: String,

        /// Feed URL or publication base URL (`/feed` is appended when missing)
        #[arg(long)]
        feed_url: String,

        #[arg(long)]
        description: Option<String>,
    },
    /// Analyze every built-in subject that has a feed URL
    Batch {
        /// Restrict to one built-in subject (by slug)
        #[arg(long)]
        subject: Option<String>,
    },
    /// List analyzed subjects
    List,
    /// Print the stored report for a subject as JSON
    Show {
        slug: String,
    },
}

/// Collaborators built once at startup and lent to each command.
pub(crate) struct Services {
    pub store: JsonStore,
    pub profiles: SubjectProfiles,
    pub feeds: FeedClient,
    pub model: Option<ModelClient>,
    pub max_posts: usize,
}

impl Services {
    pub(crate) fn context(&self) -> AnalysisContext<'_> {
        AnalysisContext {
            feeds: &self.feeds,
            assembler: ReportAssembler::new(&self.profiles, self.model.as_ref()),
            store: &self.store,
            max_posts: self.max_posts,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = subscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let services = Services {
        store: JsonStore::new(&config.data_dir),
        profiles: SubjectProfiles::builtin()?,
        feeds: FeedClient::new(&config.user_agent, config.feed_timeout_secs)?,
        model: config.model.as_ref().map(ModelClient::new).transpose()?,
        max_posts: config.max_posts,
    };

    match cli.command {
        Commands::Analyze {
            name,
            feed_url,
            description,
        } => analyze::run_analyze(&services, name, feed_url, description).await,
        Commands::Batch { subject } => analyze::run_batch(&services, subject.as_deref()).await,
        Commands::List => {
            query::run_list(&services.store).await;
            Ok(())
        }
        Commands::Show { slug } => query::run_show(&services.store, &slug).await,
    }
}

#[cfg(test)]
mod tests;
