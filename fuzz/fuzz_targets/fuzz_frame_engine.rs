#![no_main]

use libfuzzer_sys::fuzz_target;
use rtu_udp_sim::crc::verify_crc;
use rtu_udp_sim::{EngineConfig, FrameEngine, RegisterStore};

fuzz_target!(|data: &[u8]| {
    let mut engine = FrameEngine::new(RegisterStore::with_drive_defaults());
    if let Some(response) = engine.process(data) {
        assert!(verify_crc(&response).is_ok());
        assert_eq!(response[0], data[0]);
    }

    let strict = EngineConfig::new().with_request_crc_validation(true);
    let mut engine = FrameEngine::with_config(RegisterStore::new(), strict).unwrap();
    let _ = engine.process(data);
});
