// Copyright (c) 2021 shiba contributors
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! This crate offers:
//!
//! *   A bounded, thread-safe, blocking connection pool in pure rust;
//! *   A retrying executor for transient connection failures.
//!
//! Features:
//!
//! *   Lazy connection creation up to `max_size`;
//! *   Blocking `acquire` with a configurable wait timeout;
//! *   Pre-ping validation on checkout (`test_on_check_out`);
//! *   Forced recycling of connections older than `max_lifetime`;
//! *   RAII handles, a dropped connection always returns to its pool;
//! *   `exec_query` / `exec_scalar` / `exec_update` / `exec_batch` with
//!     positional or named parameters.
//!
//! ## Installation
//!
//! Put the desired version of the crate into the `dependencies` section of your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! shiba = "0.1"
//! ```
//!
//! ## Example
//!
//! The backend is anything that implements [`ManageConnection`] (create
//! and probe connections) and [`DbExecutor`] (run statements):
//!
//! ```rust
//! use shiba::prelude::*;
//! use std::time::Duration;
//!
//! struct MemoryConn;
//!
//! struct MemoryManager;
//!
//! impl ManageConnection for MemoryManager {
//!     type Connection = MemoryConn;
//!
//!     fn connect(&self) -> shiba::Result<MemoryConn> {
//!         Ok(MemoryConn)
//!     }
//!
//!     fn is_valid(&self, _conn: &mut MemoryConn) -> shiba::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! impl DbExecutor for MemoryConn {
//!     fn query(&mut self, _sql: &str, _params: Params) -> shiba::Result<Rows> {
//!         let mut rows = Rows::new();
//!         rows.push(Row::new(vec!["value".into()], vec![Value::Bigint(1)]));
//!         Ok(rows)
//!     }
//!
//!     fn execute(&mut self, _sql: &str, _params: Params) -> shiba::Result<ExecuteResult> {
//!         Ok(ExecuteResult { rows_affected: 1, last_insert_id: None })
//!     }
//! }
//!
//! fn main() -> shiba::Result<()> {
//!     let cfg = ShibaConfig::default()
//!         .set_max_size(4)
//!         .set_connection_timeout(Duration::from_secs(10));
//!     let shiba = Shiba::new(MemoryManager, cfg);
//!
//!     let value = shiba.exec_scalar("select 1", ())?;
//!     assert_eq!(value, Some(Value::Bigint(1)));
//!
//!     let result = shiba.exec_update("update t set n = ?", (1,))?;
//!     assert_eq!(result.rows_affected, 1);
//!
//!     shiba.close();
//!     Ok(())
//! }
//! ```
mod config;
mod data;
mod database;
mod errors;
mod macros;
mod manager;
mod param;
mod pool;
mod value;

pub mod prelude;

#[doc(inline)]
pub use config::ShibaConfig;
#[doc(inline)]
pub use data::{ExecuteResult, Row, Rows, RowsIter};
#[doc(inline)]
pub use database::{DbExecutor, Shiba};
#[doc(inline)]
pub use errors::{Result, ShibaError};
#[doc(inline)]
pub use manager::ManageConnection;
#[doc(inline)]
pub use param::Params;
#[doc(inline)]
pub use pool::{Pool, PoolStatus, PooledConnection};
#[doc(inline)]
pub use value::Value;
#[doc(inline)]
pub use chrono::{Local, NaiveDate, NaiveDateTime};
