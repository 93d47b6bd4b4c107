//! Cart commands.

use anyhow::{Context as _, Result};
use rocketshoes_cart::UpdateProductAmount;
use rocketshoes_commerce::{Cart, Product, ProductId};
use serde::Serialize;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::format_price;

/// Cart as printed with `--json`.
#[derive(Serialize)]
struct CartSummary<'a> {
    items: &'a Cart,
    item_count: i64,
    total: f64,
}

impl<'a> CartSummary<'a> {
    fn new(cart: &'a Cart) -> Self {
        Self {
            items: cart,
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    match args.command {
        CartCommand::Show => {
            print_cart(&store.cart(), ctx);
        }
        CartCommand::Add { id } => {
            let id = ProductId::new(id);
            let cart = store
                .add_product(id)
                .await
                .with_context(|| format!("Product {} not added, cart unchanged", id))?;
            ctx.output
                .success(&format!("Product {} now x{}", id, cart.amount_of(id)));
            print_cart(&cart, ctx);
        }
        CartCommand::Remove { id } => {
            let id = ProductId::new(id);
            let cart = store
                .remove_product(id)
                .with_context(|| format!("Product {} not removed, cart unchanged", id))?;
            ctx.output.success(&format!("Removed product {}", id));
            print_cart(&cart, ctx);
        }
        CartCommand::Update { id, amount } => {
            let id = ProductId::new(id);
            let request = UpdateProductAmount {
                product_id: id,
                amount,
            };
            let updated = store
                .update_product_amount(request)
                .await
                .with_context(|| format!("Product {} not updated, cart unchanged", id))?;

            match updated {
                Some(cart) => {
                    ctx.output
                        .success(&format!("Product {} now x{}", id, cart.amount_of(id)));
                    print_cart(&cart, ctx);
                }
                None => {
                    ctx.output
                        .info(&format!("Amount {} ignored, cart unchanged", amount));
                    print_cart(&store.cart(), ctx);
                }
            }
        }
    }

    Ok(())
}

fn print_cart(cart: &Cart, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&CartSummary::new(cart));
        return;
    }

    ctx.output.header("Cart");

    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    for item in cart.items() {
        ctx.output.kv(&format!("#{}", item.id), &line_summary(item));
    }

    ctx.output.info("");
    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output.kv("total", &format_price(cart.total()));
}

/// One cart line; missing or non-numeric display fields print as `-`.
fn line_summary(item: &Product) -> String {
    let price = |value: Option<f64>| value.map_or_else(|| "-".to_string(), format_price);
    format!(
        "{} x{} @ {} = {}",
        item.title().unwrap_or("-"),
        item.amount,
        price(item.price()),
        price(item.subtotal())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_json_layout() {
        let cart = Cart::from_items(vec![
            Product::new(ProductId::new(1), "Tênis", 100.0, "a.jpg").with_amount(2),
            Product::new(ProductId::new(2), "Meia", 10.5, "b.jpg").with_amount(1),
        ])
        .unwrap();

        let value = serde_json::to_value(CartSummary::new(&cart)).unwrap();
        assert_eq!(value["item_count"], 3);
        assert_eq!(value["total"], 210.5);
        assert_eq!(value["items"][0]["id"], 1);
        assert_eq!(value["items"][1]["amount"], 1);
    }

    #[test]
    fn test_line_summary() {
        let item = Product::new(ProductId::new(1), "Tênis", 179.9, "a.jpg").with_amount(2);
        assert_eq!(line_summary(&item), "Tênis x2 @ R$ 179.90 = R$ 359.80");
    }

    #[test]
    fn test_line_summary_without_display_fields() {
        let item: Product = serde_json::from_str(r#"{"id":2,"amount":1}"#).unwrap();
        assert_eq!(line_summary(&item), "- x1 @ - = -");
    }
}
