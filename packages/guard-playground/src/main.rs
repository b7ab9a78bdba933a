//! CLI for exercising field authorization
//!
//! Runs one GraphQL operation against the guarded playground schema and prints
//! the response as JSON.

mod config;
mod policy;
mod schema;

use anyhow::{Context, Result};
use clap::Parser;
use field_guard::{Authorizer, Role};
use juniper::http::GraphQLRequest;
use juniper::InputValue;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::policy::{Caller, PlaygroundPolicy};
use crate::schema::{create_schema, Guards, PlaygroundContext, UserStore};

#[derive(Parser)]
#[command(name = "guard-playground")]
#[command(about = "Run GraphQL operations through field-level authorization")]
struct Cli {
    /// GraphQL document to execute
    query: String,

    /// Variables as a JSON object
    #[arg(long)]
    variables: Option<String>,

    /// Caller id (overrides PLAYGROUND_USER_ID)
    #[arg(long)]
    user_id: Option<i64>,

    /// Caller role (overrides PLAYGROUND_ROLE)
    #[arg(long)]
    role: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,field_guard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let caller = Caller {
        user_id: cli.user_id.or(config.user_id),
        role: Role::from(cli.role.unwrap_or(config.role)),
    };
    tracing::info!(user_id = ?caller.user_id, role = %caller.role, "Running as caller");

    let variables = cli
        .variables
        .as_deref()
        .map(serde_json::from_str::<InputValue>)
        .transpose()
        .context("--variables must be a JSON object")?;

    // Attach every guard up front so misconfigured fields fail before execution
    let authorizer = Authorizer::new(Arc::new(PlaygroundPolicy));
    let guards = Guards::attach(&authorizer).context("Invalid field authorization")?;

    let context = PlaygroundContext {
        caller,
        store: UserStore::seeded(),
        guards,
    };
    let schema = create_schema();

    let request = GraphQLRequest::new(cli.query, None, variables);
    let response = request.execute(&schema, &context).await;

    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("Failed to serialize response")?
    );

    if !response.is_ok() {
        tracing::warn!("Operation completed with errors");
    }

    Ok(())
}
