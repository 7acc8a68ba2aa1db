// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    blockchain::{ClusterConfig, LedgerRpc},
    completion::CompletionModel,
};

/// Shared, read-only handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn LedgerRpc>,
    pub model: Arc<dyn CompletionModel>,
    pub cluster: Arc<ClusterConfig>,
}

impl AppState {
    pub fn new(
        ledger: Arc<dyn LedgerRpc>,
        model: Arc<dyn CompletionModel>,
        cluster: ClusterConfig,
    ) -> Self {
        Self {
            ledger,
            model,
            cluster: Arc::new(cluster),
        }
    }
}
