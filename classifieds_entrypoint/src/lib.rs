#![deny(missing_docs)]
//! Process initialisation shared by the classifieds binaries: `.env` loading,
//! the panic hook and a tracing subscriber chosen by [Environment].

use classifieds_env::Environment;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};
use tracing_tree::HierarchicalLayer;

/// Variable holding the indent width that switches local runs to hierarchical span output
pub const TREE_TRACING_VAR: &str = "TRACING_TREE_INDENT";

/// Filter used when `RUST_LOG` is not set
const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn,tower_http=info";

/// How a binary should initialise itself
#[derive(Debug, Clone)]
pub struct ClassifiedsEntrypoint {
    service: &'static str,
    env: Environment,
    tree_indent: Option<usize>,
}

impl Default for ClassifiedsEntrypoint {
    fn default() -> Self {
        Self::new("classifieds_service")
    }
}

/// Proof that [ClassifiedsEntrypoint::init] ran
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl ClassifiedsEntrypoint {
    /// Reads the environment and the tree tracing option for `service`
    pub fn new(service: &'static str) -> Self {
        Self {
            service,
            env: Environment::new_or_prod(),
            tree_indent: std::env::var(TREE_TRACING_VAR)
                .ok()
                .and_then(|v| v.trim().parse().ok()),
        }
    }

    /// Overrides the environment read from `ENVIRONMENT`
    pub fn with_environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Hierarchical span output with the given indent. Only used locally.
    pub fn with_tree_tracing(mut self, indent: Option<usize>) -> Self {
        self.tree_indent = indent;
        self
    }

    /// the environment this entrypoint was configured for
    pub fn environment(&self) -> Environment {
        self.env
    }

    fn filter() -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
    }

    /// Loads `.env`, installs the panic hook and the subscriber
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        let installed = match (self.env, self.tree_indent) {
            (Environment::Local, None) => tracing_subscriber::fmt()
                .with_ansi(true)
                .with_env_filter(Self::filter())
                .with_file(true)
                .with_line_number(true)
                .pretty()
                .try_init(),
            (Environment::Local, Some(indent)) => Registry::default()
                .with(Self::filter())
                .with(HierarchicalLayer::new(indent).with_targets(true))
                .try_init()
                .map_err(Into::into),
            (Environment::Production | Environment::Develop, _) => tracing_subscriber::fmt()
                .with_ansi(false)
                .with_env_filter(Self::filter())
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .flatten_event(true)
                .try_init(),
        };

        if let Err(e) = installed {
            eprintln!("tracing subscriber was already installed: {e}");
        }
        tracing::info!(service = self.service, environment = %self.env, "starting");

        InitializedEntrypoint(())
    }
}
