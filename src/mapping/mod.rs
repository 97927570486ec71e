// mapping/mod.rs - Upstream rows → dashboard records
//
// Pure functions only: no I/O, no clock. Services own fetching and timestamps.

pub mod fields;
pub mod monthly;
pub mod sales;

pub use monthly::{map_conversions, map_invoiced, map_overview, ConversionRecord, InvoicedRecord, OverviewRecord};
pub use sales::{map_sales, SalesRecord};
