//!
//! Common Use.
//!
pub use crate::config::ShibaConfig;
pub use crate::data::{ExecuteResult, Row, Rows};
pub use crate::database::{DbExecutor, Shiba};
pub use crate::errors::ShibaError;
pub use crate::manager::ManageConnection;
pub use crate::param::Params;
pub use crate::pool::{Pool, PoolStatus, PooledConnection};
pub use crate::value::Value;
