//! Route table CLI.
//!
//! Loads a TOML route table, then resolves a request, builds a URL or lists
//! the registered routes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use path_router::config::{load_config, ConfigError};
use path_router::observability::logging;
use path_router::reverse::url::Parameters;
use path_router::RouterResult;

#[derive(Parser)]
#[command(name = "path-router")]
#[command(about = "Resolve requests and build URLs from a route table", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a request against the route table
    Resolve {
        method: String,
        path: String,
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Build the URL of a route by id
    Url {
        id: String,
        #[arg(long = "arg", value_parser = parse_pair)]
        arguments: Vec<(String, String)>,
        #[arg(long = "query", value_parser = parse_pair)]
        query: Vec<(String, String)>,
    },
    /// List registered routes
    Routes,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))
}

fn to_parameters(pairs: Vec<(String, String)>) -> Parameters {
    pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

fn describe(result: &RouterResult) -> Value {
    if let Some(route) = result.route() {
        return json!({
            "outcome": "matched",
            "id": route.id(),
            "path": route.path(),
            "callback": route.callback().to_string(),
            "arguments": route.arguments(),
            "predefined_arguments": route.predefined_arguments(),
        });
    }
    if let Some(alias) = result.alias() {
        return json!({
            "outcome": "redirect",
            "path": alias.path(),
            "alias": alias.alias(),
        });
    }
    if let Some(methods) = result.allowed_methods() {
        return json!({
            "outcome": "method_not_allowed",
            "allowed_methods": methods,
        });
    }

    json!({ "outcome": "not_found" })
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    logging::init(&config.observability.log_level);

    let source = cli.config.to_string_lossy().into_owned();
    let router = config
        .build_router(Some(&source))
        .map_err(ConfigError::from)?;
    tracing::info!(
        config = %source,
        routes = router.container().route_count(),
        aliases = router.container().aliases().count(),
        "Route table loaded"
    );

    match cli.command {
        Commands::Resolve { method, path, base_url } => {
            let result = router.route(&method, &path, base_url.as_deref());
            println!("{}", serde_json::to_string_pretty(&describe(&result))?);
            if result.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Url { id, arguments, query } => {
            let container = router.container();
            let url = container.get_url(
                &config.base_url,
                &id,
                &to_parameters(arguments),
                &to_parameters(query),
            )?;
            println!("{}", container.get_url_alias(&url));
        }
        Commands::Routes => {
            for route in router.container().routes() {
                println!("{} {}", route.id().unwrap_or("-"), route);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use path_router::{Route, RouteContainer, Router};

    fn router() -> Router {
        let mut container = RouteContainer::new();
        container.set_route(
            Route::new("/users/%id%", "UserController::show")
                .unwrap()
                .with_allowed_methods(["GET"])
                .unwrap(),
        );
        Router::new(container)
    }

    #[test]
    fn test_describe_outcomes() {
        let router = router();

        let matched = router.route("GET", "/users/7", None);
        assert_eq!(describe(&matched)["outcome"], "matched");
        assert_eq!(describe(&matched)["arguments"]["id"], "7");

        let not_allowed = router.route("POST", "/users/7", None);
        assert!(!not_allowed.is_empty());
        assert_eq!(describe(&not_allowed)["outcome"], "method_not_allowed");
        assert_eq!(describe(&not_allowed)["allowed_methods"], json!(["GET"]));

        let missing = router.route("GET", "/nowhere", None);
        assert!(missing.is_empty());
        assert_eq!(describe(&missing)["outcome"], "not_found");
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("id=7"), Ok(("id".to_string(), "7".to_string())));
        assert!(parse_pair("id").is_err());
    }
}
