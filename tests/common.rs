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
//! Shared in-memory fake backend for the integration tests.
//!
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use shiba::prelude::*;

/// Counters shared between a fake backend and the test assertions.
#[derive(Default)]
pub struct BackendStats {
    pub connects: AtomicUsize,
    pub closes: AtomicUsize,
    pub pings: AtomicUsize,
    pub queries: AtomicUsize,
    pub executes: AtomicUsize,
    /// Every statement the backend saw, with its parameters, in order.
    pub statements: Mutex<Vec<String>>,
}

impl BackendStats {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn pings(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn executes(&self) -> usize {
        self.executes.load(Ordering::SeqCst)
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }
}

/// Failure switches the tests flip mid-run.
#[derive(Default)]
pub struct BackendToggles {
    /// Refuse every new connection while set.
    pub fail_connect: AtomicBool,
    /// Fail the next N liveness probes.
    pub fail_ping_times: AtomicUsize,
    /// Fail the next N statements with a connection-level error.
    pub fail_statement_times: AtomicUsize,
    /// Make every query come back with no rows.
    pub empty_query: AtomicBool,
}

impl BackendToggles {
    pub fn fail_connect(&self, fail: bool) {
        self.fail_connect.store(fail, Ordering::SeqCst);
    }

    pub fn fail_next_pings(&self, times: usize) {
        self.fail_ping_times.store(times, Ordering::SeqCst);
    }

    pub fn fail_next_statements(&self, times: usize) {
        self.fail_statement_times.store(times, Ordering::SeqCst);
    }

    pub fn empty_query(&self, empty: bool) {
        self.empty_query.store(empty, Ordering::SeqCst);
    }
}

/// Consume one unit from a countdown toggle, false once it reaches zero.
fn take_one(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

/// An in-memory backend: connections are sequence numbers, queries echo
/// the owning connection's number back as a single `value` column.
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub stats: Arc<BackendStats>,
    pub toggles: Arc<BackendToggles>,
}

pub struct FakeConn {
    pub seq: usize,
    stats: Arc<BackendStats>,
    toggles: Arc<BackendToggles>,
}

impl ManageConnection for FakeBackend {
    type Connection = FakeConn;

    fn connect(&self) -> shiba::Result<FakeConn> {
        if self.toggles.fail_connect.load(Ordering::SeqCst) {
            return Err(ShibaError::CreateError(
                "backend refused the connection".to_string(),
            ));
        }
        let seq = self.stats.connects.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(FakeConn {
            seq,
            stats: Arc::clone(&self.stats),
            toggles: Arc::clone(&self.toggles),
        })
    }

    fn is_valid(&self, _conn: &mut FakeConn) -> shiba::Result<()> {
        self.stats.pings.fetch_add(1, Ordering::SeqCst);
        if take_one(&self.toggles.fail_ping_times) {
            return Err(ShibaError::ConnectionError("ping failed".to_string()));
        }
        Ok(())
    }

    fn close(&self, _conn: FakeConn) -> shiba::Result<()> {
        self.stats.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl DbExecutor for FakeConn {
    fn query(&mut self, sql: &str, params: Params) -> shiba::Result<Rows> {
        self.stats.queries.fetch_add(1, Ordering::SeqCst);
        self.stats
            .statements
            .lock()
            .unwrap()
            .push(format!("{} [{}]", sql, params));
        if take_one(&self.toggles.fail_statement_times) {
            return Err(ShibaError::ConnectionError(
                "server has gone away".to_string(),
            ));
        }
        let mut rows = Rows::new();
        if !self.toggles.empty_query.load(Ordering::SeqCst) {
            rows.push(Row::new(
                vec!["value".to_string()],
                vec![Value::Bigint(self.seq as i64)],
            ));
        }
        Ok(rows)
    }

    fn execute(&mut self, sql: &str, params: Params) -> shiba::Result<ExecuteResult> {
        self.stats.executes.fetch_add(1, Ordering::SeqCst);
        self.stats
            .statements
            .lock()
            .unwrap()
            .push(format!("{} [{}]", sql, params));
        if take_one(&self.toggles.fail_statement_times) {
            return Err(ShibaError::ConnectionError(
                "server has gone away".to_string(),
            ));
        }
        Ok(ExecuteResult {
            rows_affected: 1,
            last_insert_id: Some(self.seq as u64),
        })
    }
}

/// Pool settings the tests start from: generous timeout, no recycling,
/// validation on.
pub fn test_config() -> ShibaConfig {
    ShibaConfig::default()
        .set_connection_timeout(Duration::from_secs(5))
        .set_max_lifetime(Duration::from_secs(3600))
}
