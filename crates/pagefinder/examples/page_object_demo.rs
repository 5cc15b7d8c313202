//! Page Object Demo
//!
//! Demonstrates: resolving elements by symbolic page and field names,
//! selecting list entries by text and attribute, and bundling form inputs.
//!
//! Run with: `cargo run --example page_object_demo`

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pagefinder::mock::MockElement;
use pagefinder::prelude::*;
use std::sync::Arc;
use std::time::Duration;

#[derive(FieldContainer)]
struct ProductCard {
    #[field(root)]
    card: ElementHandle,
    title: ElementHandle,
    add_to_cart: ElementHandle,
}

#[derive(FieldContainer)]
#[container(name = "HomePage")]
struct HomePage {
    search_bar: ElementHandle,
    categories: Vec<ElementHandle>,
    #[field(components)]
    product_cards: Vec<ProductCard>,
}

#[derive(FieldContainer)]
#[container(name = "Pages")]
struct Pages {
    #[field(component)]
    home_page: HomePage,
}

fn element(text: &str) -> ElementHandle {
    MockElement::new(text).handle()
}

fn card(title: &str, sku: &str) -> ProductCard {
    ProductCard {
        card: MockElement::new(title).with_attribute("data-sku", sku).handle(),
        title: element(title),
        add_to_cart: element("Add to cart"),
    }
}

fn build_pages() -> Pages {
    Pages {
        home_page: HomePage {
            search_bar: element(""),
            categories: ["Books", "Music", "Electronics", "Garden", "Toys"]
                .iter()
                .map(|t| MockElement::new(*t).with_attribute("data-id", t.to_lowercase()).handle())
                .collect(),
            product_cards: vec![card("Headphones", "hp-100"), card("Turntable", "tt-200")],
        },
    }
}

fn main() -> Result<(), AcquisitionError> {
    println!("=== Pagefinder Page Object Demo ===\n");

    let config = AcquisitionConfig::default().with_element_timeout(2_000);
    let context = ContextStore::new().with("category", "Electronics");
    let pom = PageObjectModel::new(PageRepository::new(build_pages), &config)
        .with_context(Arc::new(context));

    // 1. Plain field access
    println!("1. Field access...");
    let search = pom.element_from_page("SearchBar", "HomePage")?;
    println!("   searchBar -> {search:?}");
    let categories = pom.elements_from_page("categories", "homePage")?;
    println!("   categories -> {} entries", categories.len());

    // 2. Listed element by text, with context substitution
    println!("\n2. Listed element by text...");
    let electronics = pom.listed_element_from_page("{category}", "categories", "HomePage")?;
    println!("   {{category}} -> {}", electronics.text().unwrap_or_default());

    // 3. Listed element by attribute
    println!("\n3. Listed element by attribute...");
    let garden = pom.listed_element_by_attribute("data-id", "garden", "categories", "HomePage")?;
    println!("   data-id=garden -> {}", garden.text().unwrap_or_default());

    // 4. Element of a listed component
    println!("\n4. Component list...");
    let button = pom.listed_component_element("addToCart", "Turntable", "productCards", "HomePage")?;
    println!("   Turntable addToCart -> {}", button.text().unwrap_or_default());

    // 5. Bounded polling on a miss
    println!("\n5. Bounded polling...");
    let engine = pom.engine().clone().with_timeout(Duration::from_millis(200));
    match engine.select_by_text(&categories, "Furniture") {
        Ok(found) => println!("   unexpected match: {found:?}"),
        Err(err) => println!("   {err}"),
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
