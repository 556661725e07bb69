use cocktail_catalog::{refresh_snapshot, Catalog, CatalogConfig, SearchQuery};
use log::{error, info};
use std::env;
use std::path::PathBuf;

const USAGE: &str = "Usage:
  cocktail-catalog scrape [SNAPSHOT]
  cocktail-catalog search [--ingredients LIST] [--category TEXT] [--name TEXT]
  cocktail-catalog random
  cocktail-catalog show NAME";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut config = CatalogConfig::load()?;

    match args.first().map(String::as_str) {
        Some("scrape") => {
            if let Some(path) = args.get(1) {
                config.snapshot_path = PathBuf::from(path);
            }
            println!("Fetching all cocktail recipes...");
            let catalog = refresh_snapshot(&config).inspect_err(|e| {
                error!("Scrape aborted, snapshot left unchanged: {e}");
            })?;
            info!("Wrote {}", config.snapshot_path.display());
            println!("Done: {} recipes", catalog.len());
        }
        Some("search") => {
            let catalog = Catalog::load(&config.snapshot_path)?;
            let query = parse_query(&args[1..])?;
            if query.is_empty() {
                return show_random(&catalog);
            }
            let results = catalog.search(&query);
            if results.is_empty() {
                println!("No cocktails match your search.");
            }
            for recipe in results {
                println!("{} ({})", recipe.name, recipe.category);
            }
        }
        Some("random") => {
            let catalog = Catalog::load(&config.snapshot_path)?;
            show_random(&catalog)?;
        }
        Some("show") => {
            let name = args.get(1).ok_or(USAGE)?;
            let catalog = Catalog::load(&config.snapshot_path)?;
            match catalog.find_by_name(name) {
                Some(recipe) => println!("{recipe}"),
                None => println!("No cocktail named '{name}'."),
            }
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}

fn show_random(catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    let recipe = catalog.random().ok_or("The catalog is empty")?;
    println!("{recipe}");
    Ok(())
}

fn parse_query(args: &[String]) -> Result<SearchQuery, Box<dyn std::error::Error>> {
    let mut query = SearchQuery::default();
    let mut args = args.iter();
    while let Some(flag) = args.next() {
        let value = args
            .next()
            .ok_or_else(|| format!("Missing value for {flag}"))?
            .clone();
        match flag.as_str() {
            "--ingredients" => query.ingredients = Some(value),
            "--category" => query.category = Some(value),
            "--name" => query.name = Some(value),
            other => return Err(format!("Unknown option {other}\n{USAGE}").into()),
        }
    }
    Ok(query)
}
