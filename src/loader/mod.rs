//! Copy job loader
//!
//! A copy job names a workspace, a pipeline, a source and a sink:
//!
//! ```yaml
//! workspace_id: 8a1f...
//! pipeline_name: orders-to-lakehouse
//! source:
//!   type: MySQL
//!   config:
//!     connection_id: mysql-conn
//!     table_name: orders
//! sink:
//!   type: Lakehouse
//!   config:
//!     lakehouse_name: Sales
//!     workspace_id: 8a1f...
//!     artifact_id: 42c0...
//!     root_folder: Tables
//!     table_config:
//!       table_name: orders
//! activity:
//!   retry_count: 2
//! ```

mod parser;
mod types;

pub use parser::{load_copy_job, load_copy_job_from_str};
pub use types::{ConnectorConfig, CopyJob};
