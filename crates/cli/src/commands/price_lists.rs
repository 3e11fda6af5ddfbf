//! `galleria price-lists ...`

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;

use galleria_client::{ApiError, BackofficeApi};
use galleria_core::{MaterialId, Money, PriceListId, ValidityWindow, filter_by_name};
use galleria_pricing::{NewPriceList, PriceList, effective_for};

use super::{Context, confirm};
use crate::output::{self, Table, or_dash};

#[derive(Subcommand, Debug)]
pub enum PriceListCommand {
    /// List price list entries.
    List {
        /// Only material names containing this text (case-insensitive).
        #[arg(long, short = 's')]
        search: Option<String>,
        /// Only entries in effect today.
        #[arg(long)]
        effective: bool,
    },
    /// Show one entry.
    Get { id: PriceListId },
    /// Price a material for a date range.
    Create {
        #[arg(long)]
        material: MaterialId,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
        #[arg(long)]
        buy: Money,
        #[arg(long)]
        sell: Money,
    },
    /// Move the validity window of an entry.
    Update {
        id: PriceListId,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Delete an entry.
    Delete {
        id: PriceListId,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    /// Show the entry pricing a material on a date (default: today).
    Effective {
        material: MaterialId,
        #[arg(long)]
        on: Option<NaiveDate>,
    },
}

pub async fn run(ctx: &Context<'_>, command: PriceListCommand) -> Result<()> {
    let currency = ctx.config.currency.as_str();
    match command {
        PriceListCommand::List { search, effective } => {
            let lists = ctx.api.list_price_lists().await?;
            let hits: Vec<&PriceList> =
                filter_by_name(&lists, search.as_deref().unwrap_or_default())
                    .into_iter()
                    .filter(|p| !effective || p.is_effective_on(ctx.today))
                    .collect();
            output::print(ctx.output, &hits, |rows| table(rows, ctx.today, currency))?;
        }
        PriceListCommand::Get { id } => {
            let entry = ctx.api.get_price_list(id).await?;
            output::print(ctx.output, &entry, |p| table(&[p], ctx.today, currency))?;
        }
        PriceListCommand::Create {
            material,
            from,
            to,
            buy,
            sell,
        } => {
            ensure_material(ctx.api, material).await?;
            let entry = NewPriceList {
                material_id: material,
                window: ValidityWindow::new(from, to)?,
                buy_price: buy,
                sell_price: sell,
            };
            ctx.api.create_price_list(&entry).await?;
            println!("price list for material {material} created.");
        }
        PriceListCommand::Update { id, from, to } => {
            let current = ctx.api.get_price_list(id).await?;
            let updated = move_window(current, from, to)?;
            ctx.api.update_price_list(&updated).await?;
            println!("price list {id} updated.");
        }
        PriceListCommand::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete price list {id}?"))? {
                println!("Cancelled.");
                return Ok(());
            }
            ctx.api.delete_price_list(id).await?;
            println!("price list {id} deleted.");
        }
        PriceListCommand::Effective { material, on } => {
            let on = on.unwrap_or(ctx.today);
            let lists = ctx.api.list_price_lists().await?;
            match effective_for(&lists, material, on) {
                Some(entry) => {
                    output::print(ctx.output, entry, |p| table(&[p], on, currency))?;
                }
                None => anyhow::bail!("no price list for material {material} on {on}"),
            }
        }
    }
    Ok(())
}

async fn ensure_material(api: &dyn BackofficeApi, id: MaterialId) -> Result<()> {
    match api.get_material(id).await {
        Ok(_) => Ok(()),
        Err(ApiError::NotFound(_)) => anyhow::bail!("material {id} does not exist"),
        Err(e) => Err(e.into()),
    }
}

fn move_window(
    mut entry: PriceList,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<PriceList> {
    entry.window = ValidityWindow::new(
        from.unwrap_or(entry.window.valid_from),
        to.unwrap_or(entry.window.valid_to),
    )?;
    Ok(entry)
}

fn table(entries: &[&PriceList], today: NaiveDate, currency: &str) -> Table {
    let mut table = Table::new(vec![
        "ID", "Material", "From", "To", "Buy", "Sell", "Margin", "Effective",
    ]);
    for p in entries {
        table.row(vec![
            p.id.to_string(),
            or_dash(p.material_name.as_deref()),
            p.window.valid_from.to_string(),
            p.window.valid_to.to_string(),
            format!("{currency}{}", p.buy_price),
            format!("{currency}{}", p.sell_price),
            or_dash(p.margin().map(|m| format!("{currency}{m}"))),
            if p.is_effective_on(today) { "yes" } else { "no" }.to_string(),
        ]);
    }
    table
}
