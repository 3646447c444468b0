use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cookify::api_response::{
    ErrorResponse, NutritionResponse, NutritionSummary, ReferenceListResponse, SearchResponse,
};
use cookify::engine_config::EngineConfig;
use cookify::engine_errors::EngineError;
use cookify::input_validation::{request_ingredients, require_ingredients};
use cookify::nutrition_aggregator::aggregate;
use cookify::observability::{init_tracing, LogFormat};
use cookify::recipe_corpus::load_corpus;
use cookify::recipe_ranker::RecipeRanker;
use cookify::reference_data::ReferenceDataCache;
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

/// cookify - recipe matching and nutrition calculation
#[derive(Parser)]
#[command(name = "cookify")]
#[command(about = "Find recipes for the ingredients you have and compute nutrition", long_about = None)]
struct Cli {
    /// Recipe corpus JSON file (overrides COOKIFY_RECIPES)
    #[arg(long, global = true)]
    recipes: Option<PathBuf>,

    /// Reference nutrition JSON file (overrides COOKIFY_NUTRITION_DATA)
    #[arg(long, global = true)]
    nutrition_data: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank recipes against the ingredients on hand
    Search {
        /// Ingredients on hand
        ingredients: Vec<String>,

        /// JSON request body with an "ingredients" array ("-" reads stdin)
        #[arg(long, conflicts_with = "ingredients")]
        request: Option<PathBuf>,
    },
    /// Compute total and per-serving nutrition for ingredient lines
    Nutrition {
        /// Ingredient lines, e.g. "2 cups flour"
        ingredients: Vec<String>,

        /// JSON request body with an "ingredients" array ("-" reads stdin)
        #[arg(long, conflicts_with = "ingredients")]
        request: Option<PathBuf>,
    },
    /// List the reference nutrition table
    Ingredients,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level, LogFormat::from_env()) {
        eprintln!("{:#}", e);
    }

    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(e) => return report_error(&anyhow::Error::from(e)),
    };

    match run(cli, config) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => report_error(&e),
    }
}

fn run(cli: Cli, mut config: EngineConfig) -> Result<String> {
    if let Some(path) = cli.recipes {
        config.recipes_path = path;
    }
    if let Some(path) = cli.nutrition_data {
        config.nutrition.reference_data_path = path;
    }

    match cli.command {
        Commands::Search {
            ingredients,
            request,
        } => search_command(&config, read_ingredients(ingredients, request.as_deref())?),
        Commands::Nutrition {
            ingredients,
            request,
        } => nutrition_command(&config, read_ingredients(ingredients, request.as_deref())?),
        Commands::Ingredients => ingredients_command(&config),
    }
}

fn search_command(config: &EngineConfig, ingredients: Vec<String>) -> Result<String> {
    let corpus = load_corpus(&config.recipes_path).context("Failed to load recipe corpus")?;
    let ranked = RecipeRanker::new(config.ranker.clone()).rank(&ingredients, &corpus)?;
    info!(
        "Search returned {} of {} matching recipes",
        ranked.results.len(),
        ranked.total_matches
    );
    to_json(&SearchResponse::from(&ranked))
}

fn nutrition_command(config: &EngineConfig, ingredients: Vec<String>) -> Result<String> {
    let cache = ReferenceDataCache::from_path(&config.nutrition.reference_data_path);
    let reference = cache.get();
    if reference.is_empty() {
        warn!("Reference table is empty, all nutrients will be zero");
    }

    let total = aggregate(&ingredients, &reference);
    let summary = NutritionSummary::new(total, config.nutrition.serving_divisor);
    to_json(&NutritionResponse::from(summary))
}

fn ingredients_command(config: &EngineConfig) -> Result<String> {
    let cache = ReferenceDataCache::from_path(&config.nutrition.reference_data_path);
    let reference = cache.get();
    to_json(&ReferenceListResponse::from(reference.as_ref()))
}

/// Ingredients from the positional arguments or a JSON request body
fn read_ingredients(args: Vec<String>, request: Option<&Path>) -> Result<Vec<String>> {
    let Some(path) = request else {
        require_ingredients(&args)?;
        return Ok(args);
    };

    let body = if path == Path::new("-") {
        io::read_to_string(io::stdin()).context("Failed to read request from stdin")?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read request {}", path.display()))?
    };
    let body: Value = serde_json::from_str(&body)
        .map_err(|e| EngineError::Validation(format!("Request body is not valid JSON: {}", e)))?;
    Ok(request_ingredients(&body)?)
}

fn to_json<T: Serialize>(response: &T) -> Result<String> {
    serde_json::to_string_pretty(response).context("Failed to serialize response")
}

/// Print the error envelope and pick the exit status
fn report_error(err: &anyhow::Error) -> ExitCode {
    let (response, code) = match err.downcast_ref::<EngineError>() {
        Some(engine_err) if engine_err.is_client_error() => (ErrorResponse::from(engine_err), 2),
        _ => (ErrorResponse::new(format!("{:#}", err)), 1),
    };
    tracing::error!("{}", response.error);

    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{}", json),
        Err(_) => println!("{}", json!({"success": false, "error": response.error})),
    }
    ExitCode::from(code)
}
