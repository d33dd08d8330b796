use anyhow::{Context, Result};
use cooklang_parser::{ParserConfig, RecipeParser};
use log::info;
use std::env;
use std::fs;
use std::io::{self, Read};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = ParserConfig::from_env();
    info!("Starting recipe parser with config: {:?}", config);

    // Read the recipe from the given path, or stdin when none is given
    let text = match env::args().nth(1) {
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("Failed to read recipe file {path}"))?
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read recipe from stdin")?;
            buffer
        }
    };

    let recipe = RecipeParser::with_config(config)
        .parse(&text)
        .context("Failed to parse recipe")?;

    println!("{}", serde_json::to_string_pretty(&recipe)?);
    Ok(())
}
