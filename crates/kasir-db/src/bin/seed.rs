//! # Seed Data Generator
//!
//! Populates the database with categories and products for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./kasir.db with the full catalogue
//! cargo run -p kasir-db --bin seed
//!
//! # Limit the number of products
//! cargo run -p kasir-db --bin seed -- --count 10
//!
//! # Specify database path
//! cargo run -p kasir-db --bin seed -- --db ./data/kasir.db
//! ```
//!
//! ## Generated Data
//! A small warung catalogue: drinks, food and snacks. Prices are whole
//! rupiah; stock varies per product so some sell out quickly.

use std::env;

use kasir_core::{Money, NewCategory, NewProduct};
use kasir_db::{Database, DbConfig};

/// (category, description, [(product, price)])
const CATALOGUE: &[(&str, &str, &[(&str, i64)])] = &[
    (
        "Minuman",
        "Hot and cold drinks",
        &[
            ("Kopi Susu", 3500),
            ("Kopi Hitam", 3000),
            ("Teh Manis", 3000),
            ("Es Jeruk", 5000),
            ("Air Mineral 600ml", 4000),
            ("Susu Coklat", 6000),
        ],
    ),
    (
        "Makanan",
        "Ready meals",
        &[
            ("Nasi Goreng", 15000),
            ("Mie Goreng", 12000),
            ("Nasi Uduk", 10000),
            ("Indomie Rebus", 8000),
            ("Soto Ayam", 14000),
        ],
    ),
    (
        "Camilan",
        "Snacks and sweets",
        &[
            ("Keripik Singkong", 7500),
            ("Kacang Goreng", 5000),
            ("Roti Bakar", 9000),
            ("Pisang Goreng", 2000),
            ("Martabak Mini", 6500),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = usize::MAX;
    let mut db_path = String::from("./kasir.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(count);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasir POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Maximum number of products (default: all)");
                println!("  -d, --db <PATH>    Database file path (default: ./kasir.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Kasir POS Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating catalogue...");

    let mut generated = 0;

    'catalogue: for (category_idx, (category_name, description, products)) in
        CATALOGUE.iter().enumerate()
    {
        let category = db
            .categories()
            .create(&NewCategory {
                name: category_name.to_string(),
                description: description.to_string(),
            })
            .await?;

        println!("  + {} (#{})", category.name, category.id);

        for (product_idx, (name, price)) in products.iter().enumerate() {
            if generated >= count {
                break 'catalogue;
            }

            let product = NewProduct {
                name: name.to_string(),
                price: Money::from_minor(*price),
                stock: stock_for(category_idx, product_idx),
                category_id: category.id,
            };

            if let Err(e) = db.products().create(&product).await {
                eprintln!("Failed to insert {}: {}", product.name, e);
                continue;
            }

            generated += 1;
        }
    }

    println!();
    println!("✓ Generated {} products", generated);
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// Deterministic stock between 5 and 100.
fn stock_for(category_idx: usize, product_idx: usize) -> i64 {
    let seed = category_idx * 31 + product_idx * 17;
    5 + (seed % 96) as i64
}
