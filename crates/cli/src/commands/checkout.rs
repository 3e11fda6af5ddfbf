//! `galleria checkout ...`: sell the listed materials and print the receipt.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context as _, Result};
use chrono::Utc;
use clap::Args;

use galleria_client::{BackofficeApi, CheckoutError, checkout};
use galleria_core::{CustomerId, GalleryId, MaterialId};
use galleria_exhibitions::GalleryStatus;
use galleria_invoicing::{CheckoutPlan, Receipt};
use galleria_sales::Cart;

use super::Context;
use crate::output::OutputFormat;

/// One `--item` argument: `ID` or `ID:QTY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSpec {
    pub material: MaterialId,
    pub quantity: i64,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, qty) = match s.split_once(':') {
            Some((id, qty)) => (id, Some(qty)),
            None => (s, None),
        };
        let material: MaterialId = id
            .parse()
            .map_err(|_| format!("{id:?} is not a material id"))?;
        let quantity = match qty {
            Some(q) => q
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("{q:?} is not a quantity"))?,
            None => 1,
        };
        if quantity <= 0 {
            return Err(format!("quantity for material {material} must be positive"));
        }
        Ok(Self { material, quantity })
    }
}

#[derive(Args, Debug)]
pub struct CheckoutArgs {
    /// National id of the buying customer.
    #[arg(long)]
    pub customer: CustomerId,
    /// Gallery the sale is booked under.
    #[arg(long)]
    pub gallery: GalleryId,
    /// Material to sell, as ID or ID:QTY. Repeat for more lines.
    #[arg(long = "item", short = 'i', required = true)]
    pub items: Vec<ItemSpec>,
    /// Also write the printable HTML receipt to this file.
    #[arg(long)]
    pub html: Option<PathBuf>,
    /// Build and print the receipt without booking anything.
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(ctx: &Context<'_>, args: CheckoutArgs) -> Result<()> {
    let customer = ctx
        .api
        .get_customer(&args.customer)
        .await
        .with_context(|| format!("loading customer {}", args.customer))?;
    let gallery = ctx
        .api
        .get_gallery(args.gallery)
        .await
        .with_context(|| format!("loading gallery {}", args.gallery))?;
    if gallery.status_on(ctx.today) == GalleryStatus::Expired {
        tracing::warn!(
            gallery_id = %gallery.id,
            valid_to = %gallery.window.valid_to,
            "gallery has expired"
        );
    }

    let cart = fill_cart(ctx.api, &args.items).await?;
    let plan = CheckoutPlan::new(&cart, customer, gallery, Utc::now())?;

    if args.dry_run {
        let receipt = titled(Receipt::from_plan(&plan, None), ctx);
        emit(ctx, &receipt, args.html.as_deref())?;
        eprintln!("dry run: nothing was booked.");
        return Ok(());
    }

    match checkout(ctx.api, &plan).await {
        Ok(outcome) => {
            let receipt = titled(outcome.receipt, ctx);
            emit(ctx, &receipt, args.html.as_deref())
        }
        Err(err) => {
            if let Some(note) = failure_note(&err, plan.lines().len()) {
                eprintln!("{note}");
            }
            Err(err.into())
        }
    }
}

/// What the operator has to clean up after a failed checkout.
fn failure_note(err: &CheckoutError, total_lines: usize) -> Option<String> {
    let CheckoutError::Failed {
        stage,
        bill_header_id,
        lines_booked,
        source,
    } = err
    else {
        return None;
    };

    let mut note = match bill_header_id {
        Some(id) => format!(
            "bill {id} was created with {lines_booked} of {total_lines} line(s) booked; \
             it has not been rolled back."
        ),
        None => "no bill was created.".to_string(),
    };
    if source.is_network() {
        note.push_str(&format!(
            " The connection failed while {stage}; the backend may still have \
             applied it, so check before retrying."
        ));
    }
    Some(note)
}

/// Put every requested unit in a fresh cart, checking stock as the till does.
async fn fill_cart(api: &dyn BackofficeApi, items: &[ItemSpec]) -> Result<Cart> {
    let mut cart = Cart::new();
    for item in items {
        let material = api
            .get_material(item.material)
            .await
            .with_context(|| format!("loading material {}", item.material))?;
        for _ in 0..item.quantity {
            cart.add(&material)?;
        }
    }
    Ok(cart)
}

fn titled(receipt: Receipt, ctx: &Context<'_>) -> Receipt {
    match &ctx.config.receipt_title {
        Some(title) => receipt.with_title(title.clone()),
        None => receipt,
    }
}

fn emit(ctx: &Context<'_>, receipt: &Receipt, html: Option<&Path>) -> Result<()> {
    let currency = ctx.config.currency.as_str();
    match ctx.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(receipt)?),
        OutputFormat::Table => print!("{}", receipt.render_text(currency)),
    }
    if let Some(path) = html {
        std::fs::write(path, receipt.render_html(currency))
            .with_context(|| format!("writing {}", path.display()))?;
        eprintln!("receipt written to {}", path.display());
    }
    Ok(())
}
