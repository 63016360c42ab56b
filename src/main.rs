use log::{debug, error};
use std::env;
use std::error::Error;
use std::io::Read;

use recipe_standardizer::{
    normalize_categories_with_limit, CategoryInput, RecipeParser, RecipeStandardizer,
    StandardizerConfig,
};

const USAGE: &str = "Usage:
  recipe-standardizer parse <file|->        Parse recipe text without AI
  recipe-standardizer standardize <file|->  Rewrite recipe text with AI, then parse it
  recipe-standardizer categories <input>    Normalize a category string or JSON value";

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run(env::args().skip(1).collect()).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let command = args.first().ok_or(USAGE)?;
    let argument = args.get(1).ok_or(USAGE)?;

    // A missing config file is fine; a broken one is worth a log line.
    let config = StandardizerConfig::load().unwrap_or_else(|e| {
        debug!("Using default configuration: {}", e);
        StandardizerConfig::default()
    });

    let output = match command.as_str() {
        "parse" => {
            let text = read_input(argument)?;
            let recipe = RecipeParser::new(config.max_categories).parse(&text);
            serde_json::to_string_pretty(&recipe)?
        }
        "standardize" => {
            let text = read_input(argument)?;
            let recipe = RecipeStandardizer::builder()
                .text(text)
                .config(config)
                .build()
                .await?;
            serde_json::to_string_pretty(&recipe)?
        }
        "categories" => {
            let input = match serde_json::from_str::<serde_json::Value>(argument) {
                Ok(value) => CategoryInput::from(&value),
                Err(_) => CategoryInput::from(argument.as_str()),
            };
            let categories = normalize_categories_with_limit(input, config.max_categories);
            serde_json::to_string_pretty(&categories)?
        }
        _ => return Err(USAGE.into()),
    };

    println!("{}", output);
    Ok(())
}

fn read_input(argument: &str) -> Result<String, Box<dyn Error>> {
    if argument == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(argument)?)
    }
}
