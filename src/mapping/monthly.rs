// mapping/monthly.rs - Monthly sales dashboard tables
//
// Field labels in these three tables are edited by hand upstream, so every
// field except the identifying one goes through the drift-tolerant `lookup`
// with the label variants seen so far.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{exact, has, lookup, or_empty, or_null, or_zero};
use crate::airtable::AirtableRecord;

/// "Monthly Overview" row: targets, pace notes and work in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewRecord {
    pub month_year: Value,
    pub month: Value,
    pub date_entered: Value,
    pub phase: Value,
    pub working_days_total: Value,
    pub working_days_completed: Value,
    pub tsg_target: Value,
    pub wll_target: Value,
    pub nv_target: Value,
    pub tsg_confidence: Value,
    pub tsg_confidence_note: Value,
    pub wll_pace_note: Value,
    pub nv_pace_note: Value,
    pub week_focus: Value,
    pub optional_focus: Value,
    // null when missing, 0 passes through
    pub tsg_wip_due: Value,
    pub tsg_wip_undated: Value,
    pub tsg_wip_next_month: Value,
    pub tsg_invoiced_to_date: Value,
    pub wll_invoiced_to_date: Value,
    pub nv_invoiced_to_date: Value,
}

/// "Invoiced Sales by Month" row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicedRecord {
    pub date_entered: Value,
    pub month_year: Value,
    pub month: Value,
    pub overall: Value,
    pub tsg: Value,
    pub wll: Value,
    pub nv: Value,
    pub other: Value,
    pub overall_target: Value,
    pub tsg_target: Value,
    pub wll_target: Value,
    pub nv_target: Value,
    pub tsg_new_sales_target: Value,
}

/// "Conversions by Month" row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    pub date_entered: Value,
    pub month_year: Value,
    pub month: Value,
    pub enquiries: Value,
    pub orders: Value,
    pub conv_rate: Value,
    pub margin: Value,
    pub aov: Value,
    pub sales_confirmed: Value,
    pub new_sales_target: Value,
}

impl OverviewRecord {
    pub fn from_record(record: &AirtableRecord) -> Option<Self> {
        let f = &record.fields;
        if !has(f, "Month/Year") {
            return None;
        }

        Some(Self {
            month_year: or_empty(exact(f, "Month/Year")),
            month: or_empty(lookup(f, &["Month"])),
            date_entered: or_empty(exact(f, "Date Entered")),
            phase: or_empty(lookup(f, &["Phase"])),
            working_days_total: or_zero(lookup(f, &["Working Days Total"])),
            working_days_completed: or_zero(lookup(f, &["Working Days Completed"])),
            tsg_target: or_zero(lookup(f, &["TSG - Target", "TSG Target"])),
            wll_target: or_zero(lookup(f, &["WLL - Target", "WLL Target"])),
            nv_target: or_zero(lookup(f, &["NV - Target", "NV Target"])),
            tsg_confidence: or_empty(lookup(f, &["TSG Confidence"])),
            tsg_confidence_note: or_empty(lookup(f, &["TSG Confidence Note"])),
            wll_pace_note: or_empty(lookup(f, &["WLL Pace Note"])),
            nv_pace_note: or_empty(lookup(f, &["NV Pace Note"])),
            week_focus: or_empty(lookup(f, &["Week Focus"])),
            optional_focus: or_empty(lookup(f, &["Optional Focus"])),
            tsg_wip_due: or_null(lookup(f, &["TSG WIP Due This Month", "TSG WIP Due"])),
            tsg_wip_undated: or_null(lookup(f, &["TSG WIP Undated"])),
            tsg_wip_next_month: or_null(lookup(f, &["TSG WIP Next Month"])),
            tsg_invoiced_to_date: or_null(lookup(f, &["TSG Invoiced to Date", "TSG Invoiced"])),
            wll_invoiced_to_date: or_null(lookup(f, &["WLL Invoiced to Date", "WLL Invoiced"])),
            nv_invoiced_to_date: or_null(lookup(f, &["NV Invoiced to Date", "NV Invoiced"])),
        })
    }
}

impl InvoicedRecord {
    pub fn from_record(record: &AirtableRecord) -> Option<Self> {
        let f = &record.fields;
        if !has(f, "Date Entered") {
            return None;
        }

        Some(Self {
            date_entered: or_empty(exact(f, "Date Entered")),
            month_year: or_empty(lookup(f, &["Month/Year"])),
            month: or_empty(lookup(f, &["Month"])),
            overall: or_zero(lookup(
                f,
                &["Overall Sales + VAT copy", "Overall Sales + VAT", "Overall Sales"],
            )),
            tsg: or_zero(lookup(f, &["TSG Sales + VAT", "TSG Sales"])),
            wll: or_zero(lookup(f, &["WLL Sales + VAT", "WLL Sales"])),
            nv: or_zero(lookup(f, &["NV Sales + VAT", "NV Sales"])),
            other: or_zero(lookup(f, &["Other Sales + VAT", "Other Sales"])),
            overall_target: or_zero(lookup(
                f,
                &["Overall Invoice Target + VAT", "Overall Invoice Target"],
            )),
            tsg_target: or_zero(lookup(f, &["TSG Invoice Target + VAT", "TSG Invoice Target"])),
            wll_target: or_zero(lookup(f, &["WLL Invoice Target + VAT", "WLL Invoice Target"])),
            nv_target: or_zero(lookup(f, &["NV Invoice Target + VAT", "NV Invoice Target"])),
            tsg_new_sales_target: or_zero(lookup(
                f,
                &["TSG NEW Sales Target + VAT", "TSG NEW Sales Target", "New Sales Target"],
            )),
        })
    }
}

impl ConversionRecord {
    pub fn from_record(record: &AirtableRecord) -> Option<Self> {
        let f = &record.fields;
        if !has(f, "Date Entered") {
            return None;
        }

        Some(Self {
            date_entered: or_empty(exact(f, "Date Entered")),
            month_year: or_empty(lookup(f, &["Month/Year"])),
            month: or_empty(lookup(f, &["Month"])),
            enquiries: or_zero(lookup(f, &["Enq's", "Enquiries", "Enqs"])),
            orders: or_zero(lookup(f, &["Orders"])),
            conv_rate: or_zero(lookup(
                f,
                &["% Conv. Rate", "Conv. Rate", "Conversion Rate", "Conv Rate"],
            )),
            margin: or_zero(lookup(f, &["% Margin", "Margin"])),
            aov: or_zero(lookup(f, &["Ave Order Value", "Average Order Value", "AOV"])),
            sales_confirmed: or_zero(lookup(
                f,
                &[
                    "Sales confirmed within",
                    "Sales Confirmed",
                    "Confirmed Sales",
                    "New Sales Value",
                ],
            )),
            new_sales_target: or_zero(lookup(f, &["New Sales Target", "TSG NEW Sales Target"])),
        })
    }
}

pub fn map_overview(records: &[AirtableRecord]) -> Vec<OverviewRecord> {
    records.iter().filter_map(OverviewRecord::from_record).collect()
}

pub fn map_invoiced(records: &[AirtableRecord]) -> Vec<InvoicedRecord> {
    records.iter().filter_map(InvoicedRecord::from_record).collect()
}

pub fn map_conversions(records: &[AirtableRecord]) -> Vec<ConversionRecord> {
    records.iter().filter_map(ConversionRecord::from_record).collect()
}
