//! Fuzz target for detection document parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the detection parser and,
//! when they parse, runs the full audit on the result, checking for panics,
//! crashes, or hangs.
//!
//! Run with:
//!   cargo +nightly fuzz run detection_json_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use ppe_audit::audit::audit_documents;
use ppe_audit::config::AuditConfig;
use ppe_audit::detection::from_detection_slice;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid OOM on very large inputs.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(document) = from_detection_slice(data) {
        let audit = audit_documents([&document], &AuditConfig::default());
        let _ = audit.stats.build_report("");
    }
});
