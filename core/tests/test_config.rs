#[cfg(test)]
mod tests {
    use aastream_core::config::StreamConfig;
    use aastream_core::constants::{DEFAULT_CONSOLIDATE, DEFAULT_THRESHOLD};
    use aastream_core::stream::StreamDecoder;
    use aastream_core::types::CodecError;

    #[test]
    fn defaults() {
        let cfg = StreamConfig::default();
        assert_eq!(cfg.threshold, DEFAULT_THRESHOLD);
        assert_eq!(cfg.threshold, 262_144);
        assert_eq!(cfg.consolidate, DEFAULT_CONSOLIDATE);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builders() {
        let cfg = StreamConfig::default().with_threshold(10).with_consolidate(false);
        assert_eq!(cfg, StreamConfig::new(10, false));
    }

    #[test]
    fn zero_threshold_rejected() {
        assert!(matches!(StreamConfig::new(0, true).validate(), Err(CodecError::Config(_))));
        assert!(matches!(StreamDecoder::new(StreamConfig::new(0, true)), Err(CodecError::Config(_))));
    }

    #[test]
    fn json_partial_takes_defaults() {
        let cfg = StreamConfig::from_json_str(r#"{"threshold": 64}"#).unwrap();
        assert_eq!(cfg, StreamConfig::new(64, DEFAULT_CONSOLIDATE));
        assert_eq!(StreamConfig::from_json_str("{}").unwrap(), StreamConfig::default());
    }

    #[test]
    fn json_errors() {
        assert!(matches!(StreamConfig::from_json_str(r#"{"threshold": 0}"#), Err(CodecError::Config(_))));
        assert!(matches!(StreamConfig::from_json_str(r#"{"chunksize": 5}"#), Err(CodecError::Config(_))));
        assert!(matches!(StreamConfig::from_json_str("not json"), Err(CodecError::Config(_))));
    }

    #[test]
    fn json_round_trip() {
        let cfg = StreamConfig::new(7, false);
        let s = serde_json::to_string(&cfg).unwrap();
        assert_eq!(StreamConfig::from_json_str(&s).unwrap(), cfg);
    }
}
