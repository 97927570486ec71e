use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{exact, has, or_empty, or_zero};
use crate::airtable::AirtableRecord;

/// One row of the per-employee sales feed as the dashboard consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    pub date: Value,
    pub employee: Value,
    pub enq: Value,
    pub orders: Value,
    pub conv_rate: Value,
    pub rejected: Value,
    pub follow: Value,
    pub value_enq: Value,
    pub value_ord: Value,
    pub ord_cost: Value,
    pub gp: Value,
    pub margin: Value,
    pub aov: Value,
    pub month_year: Value,
}

impl SalesRecord {
    /// Map one upstream row by exact field name. Rows without an employee or
    /// a date are not sales rows and yield `None`.
    pub fn from_record(record: &AirtableRecord) -> Option<Self> {
        let f = &record.fields;
        if !(has(f, "Employee") && has(f, "Date")) {
            return None;
        }

        Some(Self {
            date: exact(f, "Date").cloned().unwrap_or_default(),
            employee: exact(f, "Employee").cloned().unwrap_or_default(),
            enq: or_zero(exact(f, "Enq's")),
            orders: or_zero(exact(f, "Orders")),
            conv_rate: or_zero(exact(f, "Conv. Rate")),
            rejected: or_zero(exact(f, "Quotes Rejected")),
            follow: or_zero(exact(f, "Quotes to follow")),
            value_enq: or_zero(exact(f, "Value Enq's")),
            value_ord: or_zero(exact(f, "Value Ord's")),
            ord_cost: or_zero(exact(f, "Ord Cost")),
            gp: or_zero(exact(f, "Order GP")),
            margin: or_zero(exact(f, "Profit Margin")),
            aov: or_zero(exact(f, "Ave Ord Value")),
            month_year: or_empty(exact(f, "Month/Year")),
        })
    }
}

/// Map a sales table in upstream order, dropping rows that are not sales rows.
pub fn map_sales(records: &[AirtableRecord]) -> Vec<SalesRecord> {
    records.iter().filter_map(SalesRecord::from_record).collect()
}
