/*
 *
 *  *
 *  *      Copyright (c) 2018-2025, SnackCloud All rights reserved.
 *  *
 *  *   Redistribution and use in source and binary forms, with or without
 *  *   modification, are permitted provided that the following conditions are met:
 *  *
 *  *   Redistributions of source code must retain the above copyright notice,
 *  *   this list of conditions and the following disclaimer.
 *  *   Redistributions in binary form must reproduce the above copyright
 *  *   notice, this list of conditions and the following disclaimer in the
 *  *   documentation and/or other materials provided with the distribution.
 *  *   Neither the name of the www.snackcloud.cn developer nor the names of its
 *  *   contributors may be used to endorse or promote products derived from
 *  *   this software without specific prior written permission.
 *  *   Author: SnackCloud
 *  *
 *
 */

//!
//! Retrying executor on top of the pool.
//!

use tracing::warn;

use crate::config::ShibaConfig;
use crate::data::{ExecuteResult, Rows};
use crate::errors::{Result, ShibaError};
use crate::manager::ManageConnection;
use crate::param::Params;
use crate::pool::{Pool, PoolStatus};
use crate::value::Value;

/// Statement execution surface a backend connection exposes to the
/// executor.
pub trait DbExecutor {
    /// Run a parameterized statement, return all result rows.
    fn query(&mut self, sql: &str, params: Params) -> Result<Rows>;

    /// Run a parameterized statement, return the affected-row count and
    /// the backend-assigned identifier if applicable.
    fn execute(&mut self, sql: &str, params: Params) -> Result<ExecuteResult>;
}

/// The main entry: a pool plus the retry policy for transient connection
/// failures.
///
/// Every operation checks a connection out, runs against it and returns
/// it, whatever the outcome. A unit of work that fails with
/// [`ShibaError::ConnectionError`] is re-run exactly once on a freshly
/// acquired connection; every other failure surfaces unchanged.
pub struct Shiba<M: ManageConnection> {
    pool: Pool<M>,
}

impl<M: ManageConnection> Shiba<M> {
    pub fn new(manager: M, cfg: ShibaConfig) -> Self {
        Self {
            pool: Pool::new(manager, cfg),
        }
    }

    pub fn from_pool(pool: Pool<M>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<M> {
        &self.pool
    }

    /// Get the connection pool status
    pub fn status(&self) -> PoolStatus {
        self.pool.status()
    }

    /// Close all idle connections in the pool.
    pub fn close(&self) {
        self.pool.close_all();
    }

    /// Run a unit of work against a pooled connection.
    ///
    /// Pool errors (`AcquireTimeout`, `CreateError`) propagate
    /// immediately: pool exhaustion is not a transient connection error.
    pub fn run<T, F>(&self, work: F) -> Result<T>
    where
        F: Fn(&mut M::Connection) -> Result<T>,
    {
        match self.attempt(&work)? {
            Ok(value) => Ok(value),
            Err(ShibaError::ConnectionError(reason)) => {
                warn!("Connection error '{}'. Retrying once...", reason);
                self.attempt(&work)?
            }
            Err(err) => Err(err),
        }
    }

    /// One acquire, execute, release cycle. The outer result carries
    /// acquire failures, the inner one the work outcome, so the retry
    /// decision never confuses the two.
    fn attempt<T, F>(&self, work: &F) -> Result<Result<T>>
    where
        F: Fn(&mut M::Connection) -> Result<T>,
    {
        let mut conn = self.pool.acquire()?;
        let outcome = work(&mut conn);
        self.pool.release(conn);
        Ok(outcome)
    }
}

impl<M> Shiba<M>
where
    M: ManageConnection,
    M::Connection: DbExecutor,
{
    /// Run a query, return all result rows in statement order.
    pub fn exec_query<S, P>(&self, sql: S, params: P) -> Result<Rows>
    where
        S: Into<String>,
        P: Into<Params>,
    {
        let sql = sql.into();
        let params = params.into();
        self.run(move |conn| conn.query(&sql, params.clone()))
    }

    /// Run a query, return the first field of the first row.
    pub fn exec_scalar<S, P>(&self, sql: S, params: P) -> Result<Option<Value>>
    where
        S: Into<String>,
        P: Into<Params>,
    {
        let rows = self.exec_query(sql, params)?;
        Ok(rows.first().and_then(|row| row.first_value().cloned()))
    }

    /// Run a statement that modifies data.
    pub fn exec_update<S, P>(&self, sql: S, params: P) -> Result<ExecuteResult>
    where
        S: Into<String>,
        P: Into<Params>,
    {
        let sql = sql.into();
        let params = params.into();
        self.run(move |conn| conn.execute(&sql, params.clone()))
    }

    /// Run the same statement across an ordered sequence of parameter
    /// sets on a single connection checkout, returning the total
    /// affected-row count. An empty sequence performs no connection work.
    pub fn exec_batch<S, P>(&self, sql: S, param_list: Vec<P>) -> Result<u64>
    where
        S: Into<String>,
        P: Into<Params>,
    {
        if param_list.is_empty() {
            return Ok(0);
        }
        let sql = sql.into();
        let param_list: Vec<Params> = param_list.into_iter().map(Into::into).collect();
        self.run(move |conn| {
            let mut affected = 0u64;
            for params in param_list.iter() {
                affected += conn.execute(&sql, params.clone())?.rows_affected;
            }
            Ok(affected)
        })
    }
}
