//! Fuzz target for YAML configuration parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ppe_audit::config::AuditConfig;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(yaml) = std::str::from_utf8(data) {
        let _ = AuditConfig::from_yaml_str(yaml);
    }
});
