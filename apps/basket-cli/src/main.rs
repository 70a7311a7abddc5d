//! # Basket CLI Entry Point
//!
//! ```text
//! $ echo '{"op":"add","sku":"123456789","name":"Cornflakes","quantity":2,"priceCents":235}
//! {"op":"checkout"}' | basket
//! {"ok":true,"count":1}
//! {"ok":true,"checkout":{"items":[...],"is2ForOne":false,"total":4.70}}
//! ```

fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for better testability
    basket_cli::run()
}
