//! Property tests for the frame engine against arbitrary input

use proptest::prelude::*;

use rtu_udp_sim::crc::verify_crc;
use rtu_udp_sim::{FrameEngine, RegisterStore};

fn read_request(function: u8, start: u16, count: u16) -> Vec<u8> {
    let mut request = vec![1, function];
    request.extend_from_slice(&start.to_be_bytes());
    request.extend_from_slice(&count.to_be_bytes());
    request
}

proptest! {
    #[test]
    fn prop_arbitrary_datagrams_never_panic(data in proptest::collection::vec(any::<u8>(), 0..300)) {
        let mut engine = FrameEngine::new(RegisterStore::with_drive_defaults());
        if let Some(response) = engine.process(&data) {
            prop_assert!(verify_crc(&response).is_ok());
            prop_assert_eq!(response[0], data[0]);
            prop_assert_eq!(response[1], data[1]);
        }
    }

    #[test]
    fn prop_read_response_shape(
        function in prop_oneof![Just(0x03u8), Just(0x04u8)],
        start in 0u16..=0xFF00,
        count in 0u16..=125,
    ) {
        let mut engine = FrameEngine::new(RegisterStore::with_drive_defaults());
        let response = engine.process(&read_request(function, start, count)).unwrap();

        let body = &response[..response.len() - 2];
        prop_assert_eq!(body.len(), 3 + 2 * count as usize);
        prop_assert_eq!(body[2] as usize, 2 * count as usize);
    }

    #[test]
    fn prop_write_multiple_read_back(
        start in 0u16..=0xFF00,
        values in proptest::collection::vec(any::<u16>(), 1..=123),
    ) {
        let mut engine = FrameEngine::new(RegisterStore::new());
        let count = values.len() as u16;

        let mut request = vec![3, 0x10];
        request.extend_from_slice(&start.to_be_bytes());
        request.extend_from_slice(&count.to_be_bytes());
        request.push((count * 2) as u8);
        for value in &values {
            request.extend_from_slice(&value.to_be_bytes());
        }

        let response = engine.process(&request).unwrap();
        prop_assert_eq!(&response[..6], &request[..6]);

        for (i, value) in values.iter().enumerate() {
            prop_assert_eq!(engine.store().read_holding(start + i as u16), *value);
        }
    }

    #[test]
    fn prop_write_multiple_past_address_space_dropped(
        start in 0xFF85u16..=0xFFFF,
        count in 1u16..=123,
    ) {
        prop_assume!(start as u32 + count as u32 > 0x1_0000);
        let mut engine = FrameEngine::new(RegisterStore::new());

        let mut request = vec![3, 0x10];
        request.extend_from_slice(&start.to_be_bytes());
        request.extend_from_slice(&count.to_be_bytes());
        request.push((count * 2) as u8);
        request.extend(std::iter::repeat(0x5A).take(count as usize * 2));

        prop_assert!(engine.process(&request).is_none());
        prop_assert_eq!(engine.store().holding_len(), 0);
    }

    #[test]
    fn prop_reads_never_mutate(start in any::<u16>(), count in 0u16..=125) {
        let mut engine = FrameEngine::new(RegisterStore::with_drive_defaults());
        let before = engine.store().holding_snapshot();
        engine.process(&read_request(0x03, start, count));
        engine.process(&read_request(0x04, start, count));
        prop_assert_eq!(engine.store().holding_snapshot(), before);
        prop_assert_eq!(engine.store().input_len(), 20);
    }
}
