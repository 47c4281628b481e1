#[cfg(test)]
mod tests {
    use std::time::Duration;

    use aastream_core::prelude::*;
    use aastream_core::telemetry::{Stage, TelemetryTimer};

    fn make_counters() -> DecodeCounters {
        DecodeCounters {
            chunks: 2,
            bytes_in: 400,
            lines: 12,
            descriptors: 1,
            samples: 10,
            gap_markers: 1,
            flushes: 1,
            rows_out: 11,
        }
    }

    #[test]
    fn merge_and_add_assign_agree() {
        let mut a = make_counters();
        a.merge(&make_counters());
        let mut b = make_counters();
        b += make_counters();
        assert_eq!(a, b);
        assert_eq!(a.samples, 20);
        assert_eq!(a.rows_total(), 22);
    }

    #[test]
    fn snapshot_ratios() {
        let mut timer = TelemetryTimer::new();
        std::thread::sleep(Duration::from_millis(5));
        timer.add_stage_time(Stage::Decode, Duration::from_millis(1));
        timer.finish();

        let snap = TelemetrySnapshot::from(&make_counters(), &timer);
        assert_eq!(snap.bytes_per_sample, 40.0);
        assert!(snap.samples_per_sec > 0.0);
        assert!(snap.sanity_check());
    }

    #[test]
    fn snapshot_empty_counters() {
        let snap = TelemetrySnapshot::from(&DecodeCounters::default(), &TelemetryTimer::new());
        assert_eq!(snap.bytes_per_sample, 0.0);
        assert!(snap.sanity_check());
    }

    #[test]
    fn snapshot_json_round_trip() {
        let mut timer = TelemetryTimer::new();
        timer.add_stage_time(Stage::Flush, Duration::from_micros(10));
        timer.finish();
        let snap = TelemetrySnapshot::from(&make_counters(), &timer);
        let json = snap.to_json().unwrap();
        let back: TelemetrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.counters, snap.counters);
        assert_eq!(back.elapsed, snap.elapsed);
        assert_eq!(back.stage_times, snap.stage_times);
    }

    #[test]
    fn decoder_telemetry_tracks_stream() {
        let desc = PayloadDescriptor::new(PayloadType::ScalarInt, "pv", 2024);
        let samples: Vec<Sample> = (0..5).map(|i| Sample::new(i, 0, SampleValue::Int(i as i32))).collect();
        let wire = encode_stream(&desc, &samples).unwrap();

        let mut d = StreamDecoder::new(StreamConfig::new(2, true)).unwrap();
        let (a, b) = wire.split_at(wire.len() / 2);
        d.process(a, false).unwrap();
        d.process(b, true).unwrap();

        let t = d.telemetry();
        assert_eq!(t.counters.chunks, 2);
        assert_eq!(t.counters.bytes_in, wire.len() as u64);
        assert_eq!(t.counters.lines, 7);
        assert_eq!(t.counters.descriptors, 1);
        assert_eq!(t.counters.samples, 5);
        assert_eq!(t.counters.flushes, 3);
        assert_eq!(t.counters.rows_out, 5);
        assert!(t.stage_times.has_all(&[Stage::Unescape, Stage::Decode, Stage::Flush]));
        assert!(t.sanity_check());
    }
}
