// handlers/mod.rs - Dashboard data endpoints
//
// One module per endpoint. Handlers stay thin: pull state, run the service,
// wrap the payload with cache headers.
pub mod sales;      // GET /airtable
pub mod sales_data; // GET /sales-data

pub use sales::sales_get;
pub use sales_data::sales_data_get;
