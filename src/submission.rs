//! Submission
//!
//! Submitting copies the current form data as-is. Validation messages are
//! advisory and never hold a submission back.

use crate::model::FormData;
use crate::state::FormDataStore;

/// Snapshot of the current form data
pub fn submit(store: &FormDataStore) -> FormData {
    let snapshot = store.data().clone();
    if store.has_errors() {
        tracing::debug!("Submitting with outstanding validation errors");
    }
    tracing::info!(
        "Form Data: {}",
        serde_json::to_string(&snapshot).unwrap_or_default()
    );
    snapshot
}
