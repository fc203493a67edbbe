use std::env;
use std::process::ExitCode;

use log::error;
use recipe_extract::RecipeExtractor;

const USAGE: &str = "Usage: recipe-extract <url>";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    // Get the URL from command-line arguments
    let args: Vec<String> = env::args().collect();
    let Some(url) = args.get(1) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let extractor = match RecipeExtractor::builder().build() {
        Ok(extractor) => extractor,
        Err(e) => {
            error!("Failed to set up extractor: {e}");
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    match extractor.extract(url).await {
        Ok(Some(recipe)) => match serde_json::to_string_pretty(&recipe) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to serialize recipe: {e}");
                ExitCode::from(2)
            }
        },
        Ok(None) => {
            eprintln!("No recipe found");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
