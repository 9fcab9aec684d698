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

use std::time::Duration;

/// Pool configuration.
///
/// The defaults match a small service talking to one backend: at most 10
/// live connections, a 10 second acquire wait, connections recycled after
/// half an hour and validated on every checkout.
#[derive(Clone, Debug)]
pub struct ShibaConfig {
    max_size: u32,
    connection_timeout: Duration,
    max_lifetime: Duration,
    test_on_check_out: bool,
}

impl Default for ShibaConfig {
    fn default() -> Self {
        ShibaConfig {
            max_size: 10,
            connection_timeout: Duration::from_secs(10),
            max_lifetime: Duration::from_secs(1800),
            test_on_check_out: true,
        }
    }
}

impl ShibaConfig {
    pub fn new() -> Self {
        ShibaConfig::default()
    }

    /// Upper bound on live connections. Values below 1 are treated as 1.
    pub fn set_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// How long `acquire` may block waiting for a free connection.
    pub fn set_connection_timeout(mut self, connection_timeout: Duration) -> Self {
        self.connection_timeout = connection_timeout;
        self
    }

    pub fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }

    /// Connections older than this are destroyed and replaced on checkout.
    pub fn set_max_lifetime(mut self, max_lifetime: Duration) -> Self {
        self.max_lifetime = max_lifetime;
        self
    }

    pub fn max_lifetime(&self) -> Duration {
        self.max_lifetime
    }

    /// Probe a connection's liveness on every checkout.
    pub fn set_test_on_check_out(mut self, test_on_check_out: bool) -> Self {
        self.test_on_check_out = test_on_check_out;
        self
    }

    pub fn test_on_check_out(&self) -> bool {
        self.test_on_check_out
    }
}
