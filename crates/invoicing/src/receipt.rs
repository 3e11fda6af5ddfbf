//! Printable receipt for a booked sale.
//!
//! Two renderings: plain text for the terminal and a self-contained HTML
//! page for the print dialog.

use chrono::{Local, NaiveDate};
use html_escape::encode_text;
use serde::{Deserialize, Serialize};

use galleria_core::{BillHeaderId, Money};

use crate::bill::CheckoutPlan;

const DEFAULT_TITLE: &str = "Sales Invoice";
const UNSPECIFIED_CUSTOMER: &str = "unspecified";
const RULE: &str = "----------------------------------------";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub name: String,
    pub price: Money,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub title: String,
    pub bill_id: Option<BillHeaderId>,
    pub gallery_name: String,
    pub customer_name: Option<String>,
    pub billing_date: NaiveDate,
    pub lines: Vec<ReceiptLine>,
    pub total: Money,
}

impl Receipt {
    /// Receipt for a plan; the billing date is shown in local time.
    pub fn from_plan(plan: &CheckoutPlan, bill_id: Option<BillHeaderId>) -> Self {
        let customer_name = Some(plan.customer().name.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Self {
            title: DEFAULT_TITLE.to_string(),
            bill_id,
            gallery_name: plan.gallery().name.clone(),
            customer_name,
            billing_date: plan.billing_date().with_timezone(&Local).date_naive(),
            lines: plan
                .lines()
                .iter()
                .map(|l| ReceiptLine {
                    name: l.name.clone(),
                    price: l.sell_price,
                    quantity: l.quantity,
                })
                .collect(),
            total: plan.total(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn customer_label(&self) -> &str {
        self.customer_name.as_deref().unwrap_or(UNSPECIFIED_CUSTOMER)
    }

    fn line_text(line: &ReceiptLine, currency: &str) -> String {
        format!("{} - {currency}{} x {}", line.name, line.price, line.quantity)
    }

    pub fn render_text(&self, currency: &str) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        if let Some(id) = self.bill_id {
            out.push_str(&format!("Bill #: {id}\n"));
        }
        out.push_str(&format!("Gallery: {}\n", self.gallery_name));
        out.push_str(&format!("Customer: {}\n", self.customer_label()));
        out.push_str(&format!("Date: {}\n", self.billing_date.format("%Y-%m-%d")));
        out.push_str(RULE);
        out.push('\n');
        for line in &self.lines {
            out.push_str(&Self::line_text(line, currency));
            out.push('\n');
        }
        out.push_str(RULE);
        out.push('\n');
        out.push_str(&format!("Total: {currency}{}\n", self.total));
        out
    }

    pub fn render_html(&self, currency: &str) -> String {
        let details = self
            .lines
            .iter()
            .map(|l| encode_text(&Self::line_text(l, currency)).into_owned())
            .collect::<Vec<_>>()
            .join("\n");
        let bill_row = self
            .bill_id
            .map(|id| format!("    <p><strong>Bill #:</strong> {id}</p>\n"))
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
      body {{ font-family: Arial, sans-serif; padding: 20px; }}
      h1, h2 {{ color: #333; }}
      pre {{ background-color: #f4f4f4; padding: 10px; border-radius: 5px; }}
    </style>
  </head>
  <body onload="window.print()">
    <h1>{title}</h1>
{bill_row}    <p><strong>Gallery:</strong> {gallery}</p>
    <p><strong>Customer:</strong> {customer}</p>
    <p><strong>Date:</strong> {date}</p>
    <hr>
    <h2>Items</h2>
    <pre>{details}</pre>
    <hr>
    <p><strong>Total:</strong> {currency}{total}</p>
  </body>
</html>
"#,
            title = encode_text(&self.title),
            gallery = encode_text(&self.gallery_name),
            customer = encode_text(self.customer_label()),
            date = self.billing_date.format("%Y-%m-%d"),
            currency = encode_text(currency),
            total = self.total,
        )
    }
}
