//! JSON response bodies.

use extrato_core::{ConsolidatedTable, Layout, TableSummary};
use serde::{Deserialize, Serialize};

/// `GET /api/health` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiHealth {
    pub healthy: bool,
    pub version: String,
}

/// `POST /api/process` response.
#[derive(Debug, Serialize)]
pub struct ApiProcessResponse {
    pub layout: Layout,
    pub records: ConsolidatedTable,
    pub summary: TableSummary,
}

impl ApiProcessResponse {
    pub fn new(layout: Layout, records: ConsolidatedTable) -> Self {
        let summary = records.summary();
        Self {
            layout,
            records,
            summary,
        }
    }
}
