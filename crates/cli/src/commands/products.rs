//! Catalog browsing.

use std::io::{self, Write};

use nepali_shop_cart::StaticCatalog;
use nepali_shop_core::{Category, CurrencyCode, Price, Product};

use super::{CommandError, SessionOptions};

/// List catalog products, optionally filtered by category.
pub fn list(options: &SessionOptions, category: Option<&str>) -> Result<(), CommandError> {
    let config = options.load_config()?;
    let catalog = options.load_catalog()?;
    let filter = category.map(parse_category).transpose()?;

    let mut out = io::stdout().lock();
    write_products(&mut out, &catalog, filter, config.currency)?;
    Ok(())
}

fn parse_category(name: &str) -> Result<Category, CommandError> {
    Category::ALL
        .into_iter()
        .find(|c| c.as_str().eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| CommandError::UnknownCategory(name.to_string()))
}

fn write_products(
    out: &mut impl Write,
    catalog: &StaticCatalog,
    category: Option<Category>,
    currency: CurrencyCode,
) -> io::Result<()> {
    let products: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| category.is_none_or(|c| p.category == c))
        .collect();

    if products.is_empty() {
        writeln!(out, "No products found")?;
        return Ok(());
    }

    for product in products {
        let stock = if product.in_stock { "" } else { " (out of stock)" };
        writeln!(
            out,
            "[{}] {} - {} [{}]{stock}",
            product.id,
            product.name,
            Price::new(product.price, currency),
            product.category.as_str(),
        )?;
        if !product.description.is_empty() {
            writeln!(out, "    {}", product.description)?;
        }
    }
    out.flush()
}
