use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mise_core::{
    create_provider_from_env, suggest_recipe, RecipeRequest, RecipeResponse, Workflow,
};
use serde_json::{Map, Value};

#[derive(Parser)]
#[command(name = "mise")]
#[command(about = "Mise recipe generator CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a recipe locally through the staged pipeline
    ///
    /// Uses Claude (ANTHROPIC_API_KEY) unless MISE_PROVIDER=fake.
    Generate {
        /// Available ingredient (repeatable)
        #[arg(short, long = "ingredient", required = true)]
        ingredients: Vec<String>,
        /// Dietary restriction (repeatable)
        #[arg(short, long = "restriction")]
        restrictions: Vec<String>,
        /// Preference as key=value (repeatable)
        #[arg(short, long = "preference")]
        preferences: Vec<String>,
        /// Additional instructions for the recipe
        #[arg(short, long)]
        query: Option<String>,
        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ask for a recipe suggestion in a single model call
    Suggest {
        /// Available ingredient (repeatable)
        #[arg(short, long = "ingredient", required = true)]
        ingredients: Vec<String>,
        /// Dietary restriction (repeatable)
        #[arg(short, long = "restriction")]
        restrictions: Vec<String>,
        /// Preference as key=value (repeatable)
        #[arg(short, long = "preference")]
        preferences: Vec<String>,
    },
    /// Check a running server's health endpoint
    Health {
        /// Server URL (default: http://localhost:8000)
        #[arg(long, default_value = "http://localhost:8000")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            ingredients,
            restrictions,
            preferences,
            query,
            json,
        } => {
            let preferences = parse_preferences(&preferences)?;
            let request = RecipeRequest::new(ingredients, restrictions, preferences, query)?;
            generate(request, json).await?;
        }
        Commands::Suggest {
            ingredients,
            restrictions,
            preferences,
        } => {
            let preferences = parse_preferences(&preferences)?;
            let request = RecipeRequest::new(ingredients, restrictions, preferences, None)?;
            suggest(&request).await?;
        }
        Commands::Health { server } => {
            health(&server).await?;
        }
    }

    Ok(())
}

/// Parse `key=value` pairs. Values that parse as JSON (numbers, booleans)
/// keep their type; anything else is a string.
fn parse_preferences(pairs: &[String]) -> Result<Map<String, Value>> {
    let mut preferences = Map::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Preference must look like key=value, got {:?}", pair);
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Preference key is empty in {:?}", pair);
        }
        let value = value.trim();
        let value = match serde_json::from_str::<Value>(value) {
            Ok(v @ (Value::Number(_) | Value::Bool(_))) => v,
            _ => Value::String(value.to_string()),
        };
        preferences.insert(key.to_string(), value);
    }
    Ok(preferences)
}

async fn generate(request: RecipeRequest, json: bool) -> Result<()> {
    let provider = create_provider_from_env().context("Model gateway is not configured")?;
    let workflow = Workflow::new(provider);

    let response = workflow.run(request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_recipe(&response);
    }

    Ok(())
}

async fn suggest(request: &RecipeRequest) -> Result<()> {
    let provider = create_provider_from_env().context("Model gateway is not configured")?;

    let text = suggest_recipe(provider.as_ref(), request).await?;
    println!("{}", text);

    Ok(())
}

fn print_recipe(response: &RecipeResponse) {
    println!("Recipe: {}", response.recipe_name);
    println!("Cooking Time: {}", response.cooking_time);
    println!("Difficulty: {}", response.difficulty);

    println!("\nIngredients Used:");
    for ingredient in &response.ingredients_used {
        println!("- {}", ingredient);
    }

    if !response.missing_ingredients.is_empty() {
        println!("\nAdditional Ingredients Recommended:");
        for ingredient in &response.missing_ingredients {
            println!("- {}", ingredient);
        }
    }

    println!("\n{}", response.recipe_content);
}

async fn health(server: &str) -> Result<()> {
    let url = format!("{}/health", server.trim_end_matches('/'));
    let response = reqwest::get(&url)
        .await
        .with_context(|| format!("Failed to reach {}", url))?;

    let status = response.status();
    let body: Value = response.json().await.context("Health response was not JSON")?;

    if !status.is_success() {
        bail!("Server returned {}: {}", status, body);
    }

    println!("{}", body["status"].as_str().unwrap_or("unknown"));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_args() {
        let cli = Cli::parse_from([
            "mise",
            "generate",
            "-i",
            "rice",
            "--ingredient",
            "beans",
            "--restriction",
            "vegan",
            "--preference",
            "cuisine=Mexican",
        ]);
        let Commands::Generate {
            ingredients,
            restrictions,
            preferences,
            query,
            json,
        } = cli.command
        else {
            panic!("expected generate");
        };
        assert_eq!(ingredients, vec!["rice", "beans"]);
        assert_eq!(restrictions, vec!["vegan"]);
        assert_eq!(preferences, vec!["cuisine=Mexican"]);
        assert_eq!(query, None);
        assert!(!json);
    }

    #[test]
    fn test_parse_suggest_args() {
        let cli = Cli::parse_from(["mise", "suggest", "-i", "eggs", "-r", "vegetarian"]);
        let Commands::Suggest {
            ingredients,
            restrictions,
            preferences,
        } = cli.command
        else {
            panic!("expected suggest");
        };
        assert_eq!(ingredients, vec!["eggs"]);
        assert_eq!(restrictions, vec!["vegetarian"]);
        assert!(preferences.is_empty());
    }

    #[test]
    fn test_parse_preferences() {
        let prefs = parse_preferences(&[
            "cuisine = Italian".to_string(),
            "servings=4".to_string(),
            "spicy=true".to_string(),
        ])
        .unwrap();
        assert_eq!(prefs["cuisine"], Value::String("Italian".to_string()));
        assert_eq!(prefs["servings"], serde_json::json!(4));
        assert_eq!(prefs["spicy"], Value::Bool(true));
    }

    #[test]
    fn test_parse_preferences_rejects_missing_equals() {
        assert!(parse_preferences(&["cuisine".to_string()]).is_err());
        assert!(parse_preferences(&["=x".to_string()]).is_err());
    }
}
