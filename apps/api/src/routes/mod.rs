//! HTTP route handlers, one module per resource.

pub mod categories;
pub mod checkout;
pub mod health;
pub mod products;
pub mod reports;
pub mod transactions;

use serde::Deserialize;

/// `?name=` filter shared by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct NameFilter {
    pub name: Option<String>,
}
