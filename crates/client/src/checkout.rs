//! Booking a sale against the backend.
//!
//! The sequence is straight-line: bill header, then for every cart line a
//! bill item followed by its stock decrement. The first failure stops it and
//! nothing already written is undone; the error says how far it got.

use core::fmt;

use thiserror::Error;
use tracing::instrument;

use galleria_core::{BillHeaderId, DomainError, MaterialId};
use galleria_invoicing::{BillHeader, CheckoutPlan, Receipt};

use crate::api::BackofficeApi;
use crate::error::ApiError;

/// Step of the checkout sequence that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    BillHeader,
    BillItem(MaterialId),
    StockUpdate(MaterialId),
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutStage::BillHeader => write!(f, "creating the bill header"),
            CheckoutStage::BillItem(id) => write!(f, "booking material {id}"),
            CheckoutStage::StockUpdate(id) => write!(f, "updating stock of material {id}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing was sent.
    #[error("checkout rejected: {0}")]
    Invalid(#[from] DomainError),

    #[error("checkout stopped while {stage} after {lines_booked} line(s) were booked: {source}")]
    Failed {
        stage: CheckoutStage,
        bill_header_id: Option<BillHeaderId>,
        lines_booked: usize,
        #[source]
        source: ApiError,
    },
}

impl CheckoutError {
    /// Bill header left behind on the backend, if any.
    pub fn bill_header_id(&self) -> Option<BillHeaderId> {
        match self {
            CheckoutError::Invalid(_) => None,
            CheckoutError::Failed { bill_header_id, .. } => *bill_header_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub bill_header: BillHeader,
    pub receipt: Receipt,
}

/// Runs checkout plans against one backend.
pub struct CheckoutService<'a, A: BackofficeApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: BackofficeApi + ?Sized> CheckoutService<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    #[instrument(
        skip(self, plan),
        fields(
            customer_id = %plan.customer().id,
            gallery_id = %plan.gallery().id,
            lines = plan.lines().len(),
            total = %plan.total()
        ),
        err
    )]
    pub async fn run(&self, plan: &CheckoutPlan) -> Result<CheckoutOutcome, CheckoutError> {
        let bill_header = self
            .api
            .create_bill_header(&plan.header())
            .await
            .map_err(|source| CheckoutError::Failed {
                stage: CheckoutStage::BillHeader,
                bill_header_id: None,
                lines_booked: 0,
                source,
            })?;
        let header_id = bill_header.id;
        tracing::info!(bill_header_id = %header_id, "bill header created");

        for (booked, line) in plan.lines().iter().enumerate() {
            let failed = |stage: CheckoutStage, source: ApiError| CheckoutError::Failed {
                stage,
                bill_header_id: Some(header_id),
                lines_booked: booked,
                source,
            };

            self.api
                .create_bill_item(&plan.item(header_id, line))
                .await
                .map_err(|e| failed(CheckoutStage::BillItem(line.material_id), e))?;

            let update = plan
                .stock_update(line)
                .map_err(|e| failed(CheckoutStage::StockUpdate(line.material_id), e.into()))?;
            self.api
                .update_material_quantity(line.material_id, &update)
                .await
                .map_err(|e| failed(CheckoutStage::StockUpdate(line.material_id), e))?;

            tracing::debug!(
                material_id = %line.material_id,
                quantity = line.quantity,
                "line booked"
            );
        }

        tracing::info!(bill_header_id = %header_id, "checkout complete");
        Ok(CheckoutOutcome {
            receipt: Receipt::from_plan(plan, Some(header_id)),
            bill_header,
        })
    }
}

/// Book `plan` with `api`.
pub async fn checkout<A: BackofficeApi + ?Sized>(
    api: &A,
    plan: &CheckoutPlan,
) -> Result<CheckoutOutcome, CheckoutError> {
    CheckoutService::new(api).run(plan).await
}
