//! External integrations
//!
//! - [`cms`] - CMS provider-data datastore SQL API (source)
//! - [`warehouse`] - BigQuery destination behind the `WarehouseClient` trait

pub mod cms;
pub mod warehouse;
