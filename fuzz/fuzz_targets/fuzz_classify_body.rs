#![no_main]

use facegate_types::VerificationResult;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary 2xx bodies must classify without panicking.
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        if let VerificationResult::Recognized { subject_name, .. } =
            facegate_verification::classify_body(value)
        {
            assert!(!subject_name.is_empty());
        }
    }

    // Arbitrary rejection bodies always yield a server failure.
    let status = data.first().map_or(500, |b| 400 + u16::from(*b));
    assert!(matches!(
        facegate_verification::classify_rejection(status, data),
        VerificationResult::TransportFailure(_)
    ));
});
