use crate::reports;
use clap::Args;
use psylab::error::{PlResult, PsyLabError};
use psylab::stimuli::{Category, StimulusCatalog};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// positive, negative or neutral. Omit to list every word.
    #[arg(long)]
    pub category: Option<String>,
}

pub fn run(args: CatalogArgs) -> PlResult<()> {
    let catalog = StimulusCatalog::standard();

    match args.category {
        Some(name) => {
            let category = Category::from_str(name.trim())
                .map_err(|_| PsyLabError::Validation(format!("unknown category '{}'", name)))?;
            info!(
                "📚 {} words in category {}",
                catalog.category_size(category),
                category
            );
            reports::print_catalog(catalog.category(category));
        }
        None => {
            for c in Category::iter() {
                info!("📚 {}: {} words", c, catalog.category_size(c));
            }
            reports::print_catalog(catalog.iter());
        }
    }
    Ok(())
}
