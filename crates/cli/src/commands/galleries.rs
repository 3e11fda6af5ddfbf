//! `galleria galleries ...`

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;

use galleria_core::{GalleryId, ValidityWindow, filter_by_name};
use galleria_exhibitions::{Gallery, GalleryStatus, NewGallery};

use super::{Context, confirm};
use crate::output::{self, Table};

#[derive(Subcommand, Debug)]
pub enum GalleryCommand {
    /// List galleries with their open/expired status.
    List {
        /// Only names containing this text (case-insensitive).
        #[arg(long, short = 's')]
        search: Option<String>,
        /// Hide expired galleries.
        #[arg(long)]
        open: bool,
    },
    /// Show one gallery.
    Get { id: GalleryId },
    /// Add a gallery running from `--from` to `--to` (YYYY-MM-DD, inclusive).
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
    /// Rename a gallery or move its dates.
    Update {
        id: GalleryId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Delete a gallery.
    Delete {
        id: GalleryId,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

pub async fn run(ctx: &Context<'_>, command: GalleryCommand) -> Result<()> {
    match command {
        GalleryCommand::List { search, open } => {
            let galleries = ctx.api.list_galleries().await?;
            let hits: Vec<&Gallery> =
                filter_by_name(&galleries, search.as_deref().unwrap_or_default())
                    .into_iter()
                    .filter(|g| !open || g.status_on(ctx.today) == GalleryStatus::Open)
                    .collect();
            output::print(ctx.output, &hits, |rows| table(rows, ctx.today))?;
        }
        GalleryCommand::Get { id } => {
            let gallery = ctx.api.get_gallery(id).await?;
            output::print(ctx.output, &gallery, |g| table(&[g], ctx.today))?;
        }
        GalleryCommand::Create { name, from, to } => {
            let gallery = NewGallery {
                name,
                window: ValidityWindow::new(from, to)?,
            };
            ctx.api.create_gallery(&gallery).await?;
            println!("gallery {:?} created.", gallery.name);
        }
        GalleryCommand::Update { id, name, from, to } => {
            let current = ctx.api.get_gallery(id).await?;
            let updated = patch(current, name, from, to)?;
            ctx.api.update_gallery(&updated).await?;
            println!("gallery {id} updated.");
        }
        GalleryCommand::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete gallery {id}?"))? {
                println!("Cancelled.");
                return Ok(());
            }
            ctx.api.delete_gallery(id).await?;
            println!("gallery {id} deleted.");
        }
    }
    Ok(())
}

/// The stored record with the given fields replaced; the whole record is PUT back.
fn patch(
    mut gallery: Gallery,
    name: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Gallery> {
    if let Some(name) = name {
        gallery.name = name;
    }
    gallery.window = ValidityWindow::new(
        from.unwrap_or(gallery.window.valid_from),
        to.unwrap_or(gallery.window.valid_to),
    )?;
    Ok(gallery)
}

fn table(galleries: &[&Gallery], today: NaiveDate) -> Table {
    let mut table = Table::new(vec!["ID", "Name", "From", "To", "Status"]);
    for g in galleries {
        table.row(vec![
            g.id.to_string(),
            g.name.clone(),
            g.window.valid_from.to_string(),
            g.window.valid_to.to_string(),
            g.status_on(today).to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn fair() -> Gallery {
        Gallery {
            id: GalleryId::new(2),
            name: "Spring Fair".to_string(),
            window: ValidityWindow::new(d(2025, 3, 1), d(2025, 3, 31)).unwrap(),
        }
    }

    #[test]
    fn patch_moves_one_end_of_the_window() {
        let g = patch(fair(), None, None, Some(d(2025, 4, 15))).unwrap();
        assert_eq!(g.name, "Spring Fair");
        assert_eq!(g.window.valid_from, d(2025, 3, 1));
        assert_eq!(g.window.valid_to, d(2025, 4, 15));
    }

    #[test]
    fn patch_rejects_inverted_window() {
        assert!(patch(fair(), None, Some(d(2025, 5, 1)), None).is_err());
    }

    #[test]
    fn status_column_follows_today() {
        let g = fair();
        let open = table(&[&g], d(2025, 3, 31)).render();
        let expired = table(&[&g], d(2025, 4, 1)).render();
        assert!(open.ends_with("open"));
        assert!(expired.ends_with("expired"));
    }
}
