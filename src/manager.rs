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

use crate::errors::Result;

/// What a backend driver implements so the pool can manage its connections.
///
/// The pool never looks inside `Connection`; it only creates, probes and
/// tears down handles through this trait.
pub trait ManageConnection: Send + Sync + 'static {
    /// The live connection type handed out by the pool.
    type Connection: Send + 'static;

    /// Open one new connection to the backend.
    fn connect(&self) -> Result<Self::Connection>;

    /// Quick liveness probe, issued on checkout when `test_on_check_out`
    /// is enabled. A failure makes the pool destroy the connection and
    /// synthesize a replacement.
    fn is_valid(&self, conn: &mut Self::Connection) -> Result<()>;

    /// Tear down a connection. Dropping already releases the session for
    /// most drivers; override when teardown is fallible so the pool can
    /// log the failure.
    fn close(&self, conn: Self::Connection) -> Result<()> {
        drop(conn);
        Ok(())
    }
}
