//! Catalog browsing commands.

use showroom_core::{Product, StockLevel};
use showroom_storefront::search::POPULAR_SEARCHES;
use showroom_storefront::{CatalogQuery, Pager, SortKey, Storefront};
use tracing::info;

/// List the product grid for a category, search text and sort order.
pub fn list(store: &Storefront, category: &str, search: &str, sort: &str, more: usize) {
    let query = CatalogQuery::new(category, search, SortKey::parse(sort));
    let results = store.view(&query);

    let mut pager = Pager::new();
    for _ in 0..more {
        pager.load_more(results.len());
    }

    info!(
        matches = results.len(),
        sort = query.sort.as_str(),
        "Showing {} of {}",
        pager.visible(results.len()),
        results.len()
    );
    for product in pager.page(&results) {
        log_product(store, product);
    }
    if pager.has_more(results.len()) {
        info!("{} more, use --more to load them", pager.remaining(results.len()));
    }
}

/// List category filter labels with product counts.
pub fn categories(store: &Storefront) {
    let catalog = store.catalog();
    let stats = catalog.stats();
    info!(
        products = stats.total,
        in_stock = stats.in_stock,
        from = %stats.min_price.map(|p| p.display()).unwrap_or_default(),
        "Catalog"
    );
    for (category, count) in catalog.category_counts() {
        info!("{category}: {count}");
    }
}

/// Quick search by name or category.
pub fn search(store: &Storefront, query: &str) {
    if query.trim().is_empty() {
        info!("Popular searches: {}", POPULAR_SEARCHES.join(", "));
        return;
    }
    let results = store.quick_search(query);
    info!(query, matches = results.len(), "Search results");
    for product in results {
        log_product(store, product);
    }
}

fn log_product(store: &Storefront, product: &Product) {
    let price = product.unit_price(store.catalog().currency_code());
    let discount = product
        .discount_percent()
        .map(|p| format!(" (-{p}%)"))
        .unwrap_or_default();
    let stock = match product.stock_level() {
        StockLevel::OutOfStock => "out of stock",
        StockLevel::Low => "only a few left",
        StockLevel::Limited => "limited stock",
        StockLevel::Plenty => "in stock",
    };
    info!(
        "#{} {} [{}] {}{} {:.1}* {}",
        product.id,
        product.name,
        product.category,
        price.display(),
        discount,
        product.rating,
        stock
    );
}
