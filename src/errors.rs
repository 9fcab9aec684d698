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
//! Common Errors.
//!
use std::fmt;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, ShibaError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShibaError {
    /// No connection became available within the configured wait.
    AcquireTimeout(String),
    /// The connection factory failed to produce a connection.
    CreateError(String),
    /// The physical link is broken or the backend is unreachable.
    /// The only error kind the executor retries, exactly once.
    ConnectionError(String),
    /// The statement itself failed: bad SQL, constraint violation,
    /// type mismatch. Never retried.
    StatementError(String),
    ConversionError(String),
    Unknown,
}

impl ShibaError {
    /// Whether a failed unit of work may be retried by the executor.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, ShibaError::ConnectionError(_))
    }

    /// Whether this error came out of the pool rather than the work unit.
    pub fn is_pool_error(&self) -> bool {
        matches!(
            self,
            ShibaError::AcquireTimeout(_) | ShibaError::CreateError(_)
        )
    }
}

impl fmt::Display for ShibaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ShibaError::Unknown => write!(f, "Unknown Error"),
            ShibaError::AcquireTimeout(ref err) => write!(f, "Pool Acquire Timeout: {}", err),
            ShibaError::CreateError(ref err) => write!(f, "Connection Create Error: {}", err),
            ShibaError::ConnectionError(ref err) => write!(f, "Connection Error: {}", err),
            ShibaError::StatementError(ref err) => write!(f, "Statement Error: {}", err),
            ShibaError::ConversionError(ref err) => write!(f, "Conversion Error: {}", err),
        }
    }
}

impl std::error::Error for ShibaError {}

impl From<serde_json::Error> for ShibaError {
    fn from(err: serde_json::Error) -> Self {
        ShibaError::ConversionError(err.to_string())
    }
}
