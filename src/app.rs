//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and installs logging
//! - resolves settings and opens the products file
//! - scrapes prices and records them (`add`, `check`)
//! - prints reports/plots (`list`, `history`, `stats`, `alert`)
//! - writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, HistoryArgs};
use crate::config::Settings;
use crate::data::{PageFetcher, PageSource};
use crate::domain::{DropThreshold, Product};
use crate::error::{AppError, EXIT_PRODUCT, EXIT_USAGE, StoreError};
use crate::io::{Catalog, ProductStore};
use crate::report::{self, Palette};

pub mod pipeline;

/// Entry point for the `tracker` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);

    let settings = Settings::resolve(cli.data_file, cli.no_color)?;
    let store = ProductStore::new(settings.data_file.clone());
    let palette = Palette::new(settings.color);
    tracing::debug!(path = %store.path().display(), "using products file");

    match cli.command {
        Command::Add { url, name } => {
            let fetcher = PageFetcher::new(&settings)?;
            handle_add(&store, &fetcher, &url, &name)
        }
        Command::Check => {
            let fetcher = PageFetcher::new(&settings)?;
            handle_check(&store, &fetcher, palette)
        }
        Command::List => handle_list(&store, palette),
        Command::History(args) => handle_history(&store, &args, palette),
        Command::Stats { name, json } => handle_stats(&store, name.as_deref(), json, palette),
        Command::Alert { drop_pct } => handle_alert(&store, drop_pct),
    }
}

fn handle_add(store: &ProductStore, source: &dyn PageSource, url: &str, name: &str) -> Result<(), AppError> {
    let mut catalog = store.load()?;
    if catalog.contains(name) {
        return Err(StoreError::Duplicate(name.to_string()).into());
    }

    println!("Adding '{name}'...");
    let mut product = Product::new(name, url);
    match pipeline::check_product(source, &mut product, pipeline::now()) {
        Ok(outcome) => println!("  Initial price: ${:.2}", outcome.price),
        Err(err) => {
            tracing::warn!(product = name, error = %err, "initial price fetch failed");
            println!("  Could not fetch the initial price ({err}); tracking with an empty history.");
        }
    }

    catalog.insert(product)?;
    store.save(&catalog)?;
    println!("[+] Now tracking {} product(s)", catalog.len());
    Ok(())
}

fn handle_check(store: &ProductStore, source: &dyn PageSource, palette: Palette) -> Result<(), AppError> {
    let mut catalog = store.load()?;
    if catalog.is_empty() {
        println!("No products being tracked.");
        return Ok(());
    }

    let total = catalog.len();
    println!("Checking {total} product(s)...");

    let mut updated = 0;
    for product in catalog.iter_mut() {
        println!("\nChecking '{}'...", product.name);
        match pipeline::check_product(source, product, pipeline::now()) {
            Ok(outcome) => {
                println!("{}", report::format_check_result(outcome.price, Some(outcome.change), palette));
                updated += 1;
            }
            Err(err) => {
                tracing::warn!(product = %product.name, error = %err, "price check failed");
                println!("  Failed to fetch price: {err}");
            }
        }
    }

    store.save(&catalog)?;
    println!("\n[+] Updated {updated}/{total} product(s)");
    Ok(())
}

fn handle_list(store: &ProductStore, palette: Palette) -> Result<(), AppError> {
    let catalog = store.load()?;
    let rows = report::list_rows(&catalog)?;
    print!("{}", report::format_product_list(&rows, palette));
    Ok(())
}

fn handle_history(store: &ProductStore, args: &HistoryArgs, palette: Palette) -> Result<(), AppError> {
    let catalog = store.load()?;
    let product = find_product(&catalog, &args.name)?;

    let view = report::history_view(product)?;
    print!("{}", report::format_history(product, view.as_ref(), palette));

    if args.plot && !product.prices.is_empty() {
        let chart = crate::plot::render_price_chart(product.prices.observations(), args.width, args.height);
        println!("\n{chart}");
    }

    if let Some(path) = &args.export {
        crate::io::export::write_history_csv(path, product)?;
        println!("Exported {} entries to {}", product.prices.len(), path.display());
    }

    Ok(())
}

fn handle_stats(store: &ProductStore, name: Option<&str>, json: bool, palette: Palette) -> Result<(), AppError> {
    let catalog = store.load()?;

    let products: Vec<&Product> = match name {
        Some(name) => vec![find_product(&catalog, name)?],
        None => catalog.iter().collect(),
    };

    if json {
        let stats = products
            .iter()
            .map(|p| report::product_stats(p))
            .collect::<Result<Vec<_>, _>>()?;
        let rendered = match name {
            Some(_) => serde_json::to_string_pretty(&stats.into_iter().next().flatten()),
            None => serde_json::to_string_pretty(&stats.into_iter().flatten().collect::<Vec<_>>()),
        }
        .map_err(|err| AppError::new(EXIT_USAGE, format!("Error: failed to encode statistics: {err}")))?;
        println!("{rendered}");
        return Ok(());
    }

    if products.is_empty() {
        println!("No products being tracked.");
        return Ok(());
    }

    if name.is_none() {
        println!("{}", report::format_stats_banner(palette));
    }
    for product in products {
        let stats = report::product_stats(product)?;
        println!("{}", report::format_product_stats(product, stats.as_ref(), palette));
    }
    Ok(())
}

fn handle_alert(store: &ProductStore, drop_pct: f64) -> Result<(), AppError> {
    // Validate before touching the products file.
    let threshold = DropThreshold::new(drop_pct)?;

    let catalog = store.load()?;
    if catalog.is_empty() {
        println!("No products being tracked.");
        return Ok(());
    }

    let alerts = report::collect_alerts(&catalog, threshold)?;
    print!("{}", report::format_alerts(&alerts, threshold));
    Ok(())
}

fn find_product<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a Product, AppError> {
    catalog
        .get(name)
        .ok_or_else(|| AppError::new(EXIT_PRODUCT, format!("Error: Product '{name}' not found.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::error::FetchError;

    struct FixedPage(Option<&'static str>);

    impl PageSource for FixedPage {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.0.map(str::to_string).ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            })
        }
    }

    fn temp_store(tag: &str) -> (ProductStore, PathBuf) {
        let path = std::env::temp_dir().join(format!("price-tracker-app-{}-{tag}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        (ProductStore::new(path.clone()), path)
    }

    #[test]
    fn add_records_initial_price_and_rejects_duplicates() {
        let (store, path) = temp_store("add");
        let page = FixedPage(Some(r#"<span class="price">$19.99</span>"#));

        handle_add(&store, &page, "https://shop.example/mug", "Mug").unwrap();
        let catalog = store.load().unwrap();
        assert_eq!(catalog.get("Mug").unwrap().prices.latest().unwrap().price, 19.99);

        let err = handle_add(&store, &page, "https://shop.example/mug", "Mug").unwrap_err();
        assert_eq!(err.exit_code(), EXIT_PRODUCT);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn add_keeps_product_when_initial_fetch_fails() {
        let (store, path) = temp_store("add-offline");
        handle_add(&store, &FixedPage(None), "https://shop.example/lamp", "Lamp").unwrap();

        let catalog = store.load().unwrap();
        assert!(catalog.get("Lamp").unwrap().prices.is_empty());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn check_appends_to_every_product_and_saves() {
        let (store, path) = temp_store("check");
        let mut catalog = Catalog::new();
        catalog.insert(Product::new("A", "https://shop.example/a")).unwrap();
        catalog.insert(Product::new("B", "https://shop.example/b")).unwrap();
        store.save(&catalog).unwrap();

        let page = FixedPage(Some(r#"<div id="main-price">€7.50</div>"#));
        handle_check(&store, &page, Palette::plain()).unwrap();
        handle_check(&store, &page, Palette::plain()).unwrap();

        let catalog = store.load().unwrap();
        for product in catalog.iter() {
            assert_eq!(product.prices.len(), 2);
            assert_eq!(product.prices.latest().unwrap().price, 7.5);
        }

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn unknown_products_and_bad_thresholds_are_rejected() {
        let (store, path) = temp_store("lookup");
        let args = HistoryArgs {
            name: "Ghost".to_string(),
            plot: false,
            width: 40,
            height: 10,
            export: None,
        };
        assert_eq!(handle_history(&store, &args, Palette::plain()).unwrap_err().exit_code(), EXIT_PRODUCT);
        assert_eq!(
            handle_stats(&store, Some("Ghost"), false, Palette::plain()).unwrap_err().exit_code(),
            EXIT_PRODUCT
        );
        assert_eq!(handle_alert(&store, -5.0).unwrap_err().exit_code(), EXIT_USAGE);

        let _ = std::fs::remove_file(path);
    }
}
