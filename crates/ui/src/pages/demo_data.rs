//! Bundled sample records for the demo pages

use entiform_core::{EditorResult, Row};

const PRODUCTS_JSON: &str = include_str!("../../../../assets/data/products.json");
const PRICE_PLANS_JSON: &str = include_str!("../../../../assets/data/price_plans.json");
const PAGES_JSON: &str = include_str!("../../../../assets/data/pages.json");

fn parse_rows(source: &str, what: &str) -> EditorResult<Vec<Row>> {
    let rows: Vec<Row> = serde_json::from_str(source)?;
    tracing::debug!("Loaded {} sample {}", rows.len(), what);
    Ok(rows)
}

pub fn products() -> EditorResult<Vec<Row>> {
    parse_rows(PRODUCTS_JSON, "products")
}

pub fn price_plans() -> EditorResult<Vec<Row>> {
    parse_rows(PRICE_PLANS_JSON, "price plans")
}

pub fn pages() -> EditorResult<Vec<Row>> {
    parse_rows(PAGES_JSON, "pages")
}

/// Sample rows, or an empty list after logging the parse error
pub fn or_empty(rows: EditorResult<Vec<Row>>) -> Vec<Row> {
    rows.unwrap_or_else(|e| {
        tracing::error!("Failed to load sample data: {}", e);
        Vec::new()
    })
}
