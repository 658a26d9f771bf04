#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parse → calculate → save → reload must not panic at any step.
        if let Ok(draft) = invoice_engine::record::draft_from_json(s) {
            let _ = draft.summarize();
            let _ = draft.validate();
            if let Ok(json) = invoice_engine::record::draft_to_json(&draft) {
                let _ = invoice_engine::record::draft_from_json(&json);
            }
        }
    }
});
