//! `galleria customers ...`

use anyhow::Result;
use clap::Subcommand;

use galleria_client::{ApiError, BackofficeApi};
use galleria_core::{CustomerId, filter_by_name};
use galleria_parties::{Customer, NewCustomer};

use super::{Context, confirm};
use crate::output::{self, Table, or_dash};

#[derive(Subcommand, Debug)]
pub enum CustomerCommand {
    /// List customers.
    List {
        /// Only names containing this text (case-insensitive).
        #[arg(long, short = 's')]
        search: Option<String>,
    },
    /// Show one customer.
    Get { id: CustomerId },
    /// Register a customer under their 14-digit national id.
    Create {
        #[arg(long)]
        id: CustomerId,
        #[arg(long)]
        name: String,
        /// National id of an existing customer to link as relative.
        #[arg(long)]
        relative: Option<CustomerId>,
    },
    /// Rename a customer or change their relative.
    Update {
        id: CustomerId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, conflicts_with = "clear_relative")]
        relative: Option<CustomerId>,
        #[arg(long)]
        clear_relative: bool,
    },
    /// Delete a customer.
    Delete {
        id: CustomerId,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

pub async fn run(ctx: &Context<'_>, command: CustomerCommand) -> Result<()> {
    match command {
        CustomerCommand::List { search } => {
            let customers = ctx.api.list_customers().await?;
            let hits = filter_by_name(&customers, search.as_deref().unwrap_or_default());
            output::print(ctx.output, &hits, |rows| table(rows))?;
        }
        CustomerCommand::Get { id } => {
            let customer = ctx.api.get_customer(&id).await?;
            output::print(ctx.output, &customer, |c| table(&[c]))?;
        }
        CustomerCommand::Create { id, name, relative } => {
            if let Some(relative) = &relative {
                existing_relative(ctx.api, relative).await?;
            }
            let customer = NewCustomer {
                id,
                name,
                relative_id: relative,
            };
            match ctx.api.create_customer(&customer).await {
                Ok(()) => println!("customer {} created.", customer.id),
                Err(ApiError::Conflict(_)) => {
                    anyhow::bail!("customer id {} already in use", customer.id)
                }
                Err(e) => return Err(e.into()),
            }
        }
        CustomerCommand::Update {
            id,
            name,
            relative,
            clear_relative,
        } => {
            let mut customer = ctx.api.get_customer(&id).await?;
            if let Some(name) = name {
                customer.name = name;
            }
            if clear_relative {
                customer.clear_relative();
            } else if let Some(relative) = relative {
                let relative = existing_relative(ctx.api, &relative).await?;
                customer.set_relative(&relative)?;
            }
            ctx.api.update_customer(&customer).await?;
            println!("customer {id} updated.");
        }
        CustomerCommand::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete customer {id}?"))? {
                println!("Cancelled.");
                return Ok(());
            }
            ctx.api.delete_customer(&id).await?;
            println!("customer {id} deleted.");
        }
    }
    Ok(())
}

async fn existing_relative(api: &dyn BackofficeApi, id: &CustomerId) -> Result<Customer> {
    match api.get_customer(id).await {
        Ok(customer) => Ok(customer),
        Err(ApiError::NotFound(_)) => anyhow::bail!("relative {id} is not a registered customer"),
        Err(e) => Err(e.into()),
    }
}

fn table(customers: &[&Customer]) -> Table {
    let mut table = Table::new(vec!["National ID", "Name", "Relative ID", "Relative"]);
    for c in customers {
        table.row(vec![
            c.id.to_string(),
            c.name.clone(),
            or_dash(c.relative_id.as_ref()),
            or_dash(c.relative_name.as_deref()),
        ]);
    }
    table
}
