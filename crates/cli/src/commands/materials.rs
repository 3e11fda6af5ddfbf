//! `galleria materials ...`

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Subcommand;

use galleria_core::{MaterialId, Money, filter_by_name};
use galleria_inventory::{ImageUpload, Material, MaterialUpdate, NewMaterial};

use super::{Context, confirm};
use crate::output::{self, Table, or_dash};

#[derive(Subcommand, Debug)]
pub enum MaterialCommand {
    /// List materials.
    List {
        /// Only names containing this text (case-insensitive).
        #[arg(long, short = 's')]
        search: Option<String>,
    },
    /// Show one material.
    Get { id: MaterialId },
    /// Add a material.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        quantity: i64,
        #[arg(long)]
        buy_price: Option<Money>,
        #[arg(long)]
        sell_price: Option<Money>,
        /// Path of an image already stored by the backend.
        #[arg(long)]
        image_path: Option<String>,
    },
    /// Change name, quantity or image. Unset fields keep their value.
    Update {
        id: MaterialId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        quantity: Option<i64>,
        /// Image file to upload.
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Delete a material.
    Delete {
        id: MaterialId,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

pub async fn run(ctx: &Context<'_>, command: MaterialCommand) -> Result<()> {
    match command {
        MaterialCommand::List { search } => {
            let materials = ctx.api.list_materials().await?;
            let hits = filter_by_name(&materials, search.as_deref().unwrap_or_default());
            output::print(ctx.output, &hits, |rows| table(rows, &ctx.config.currency))?;
        }
        MaterialCommand::Get { id } => {
            let material = ctx.api.get_material(id).await?;
            output::print(ctx.output, &material, |m| table(&[m], &ctx.config.currency))?;
        }
        MaterialCommand::Create {
            name,
            quantity,
            buy_price,
            sell_price,
            image_path,
        } => {
            let material = NewMaterial {
                name,
                quantity,
                image_path,
                buy_price,
                sell_price,
            };
            ctx.api.create_material(&material).await?;
            println!("material {:?} created.", material.name);
        }
        MaterialCommand::Update {
            id,
            name,
            quantity,
            image,
        } => {
            let current = ctx.api.get_material(id).await?;
            let image = image.map(|path| read_image(&path)).transpose()?;
            let update = patch(&current, name, quantity, image);
            ctx.api.update_material(&update).await?;
            println!("material {id} updated.");
        }
        MaterialCommand::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete material {id}?"))? {
                println!("Cancelled.");
                return Ok(());
            }
            ctx.api.delete_material(id).await?;
            println!("material {id} deleted.");
        }
    }
    Ok(())
}

/// Form for `PUT /Material/{id}` starting from the stored record.
fn patch(
    current: &Material,
    name: Option<String>,
    quantity: Option<i64>,
    image: Option<ImageUpload>,
) -> MaterialUpdate {
    let mut update = MaterialUpdate::from_material(current);
    if let Some(name) = name {
        update.name = name;
    }
    if let Some(quantity) = quantity {
        update.quantity = quantity;
    }
    update.image = image;
    update
}

fn read_image(path: &Path) -> Result<ImageUpload> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageUpload::from_file_name(file_name, bytes))
}

fn table(materials: &[&Material], currency: &str) -> Table {
    let mut table = Table::new(vec!["ID", "Name", "Quantity", "Buy", "Sell", "Image"]);
    for m in materials {
        table.row(vec![
            m.id.to_string(),
            m.name.clone(),
            m.stock_status().to_string(),
            or_dash(m.buy_price.map(|p| format!("{currency}{p}"))),
            or_dash(m.sell_price.map(|p| format!("{currency}{p}"))),
            or_dash(m.image_path.as_deref()),
        ]);
    }
    table
}
