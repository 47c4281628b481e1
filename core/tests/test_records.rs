// Record codec: descriptors, every payload type's sample schema, gap
// attributes and type errors.

#[cfg(test)]
mod tests {
    use aastream_core::prelude::*;
    use aastream_core::records::{Arity, PAYLOAD_TABLE};

    #[test]
    fn payload_table_is_indexed_by_tag() {
        for (i, spec) in PAYLOAD_TABLE.iter().enumerate() {
            assert_eq!(spec.ptype.to_wire(), i as i32);
            assert_eq!(PayloadType::from_wire(i as i32).unwrap(), spec.ptype);
        }
        assert_eq!(PayloadType::all().count(), 15);
    }

    #[test]
    fn payload_type_names_match_protocol() {
        assert_eq!(PayloadType::ScalarDouble.to_string(), "SCALAR_DOUBLE");
        assert_eq!(PayloadType::WaveformEnum.to_string(), "WAVEFORM_ENUM");
        assert_eq!(PayloadType::V4GenericBytes.to_string(), "V4_GENERIC_BYTES");
    }

    #[test]
    fn unknown_payload_type_rejected() {
        assert!(matches!(PayloadType::from_wire(15), Err(CodecError::UnsupportedPayloadType { raw: 15 })));
        assert!(matches!(PayloadType::from_wire(-1), Err(CodecError::UnsupportedPayloadType { raw: -1 })));
    }

    #[test]
    fn descriptor_round_trip() {
        let desc = PayloadDescriptor::new(PayloadType::WaveformFloat, "SR:C01:BPM:X", 2024)
            .with_element_count(128)
            .with_header("EGU", "mm")
            .with_header("PREC", "3");
        let raw = encode_payload_info(&desc).unwrap();
        let back = decode_payload_info(&raw).unwrap();
        assert_eq!(back, desc);
        assert_eq!(back.header("EGU"), Some("mm"));
        assert_eq!(back.header("missing"), None);
    }

    #[test]
    fn descriptor_with_unknown_type_rejected() {
        // PayloadInfo { type: 42, pvname: "x", year: 2024 } by hand
        let raw = [0x08, 42, 0x12, 1, b'x', 0x18, 0xE8, 0x0F];
        assert!(matches!(decode_payload_info(&raw), Err(CodecError::UnsupportedPayloadType { raw: 42 })));
    }

    #[test]
    fn garbage_is_parse_error() {
        assert!(matches!(decode_payload_info(&[0xFF, 0xFF, 0xFF]), Err(CodecError::Parse(_))));
        assert!(matches!(decode_sample(PayloadType::ScalarInt, &[0x08]), Err(CodecError::Parse(_))));
    }

    fn example_value(ptype: PayloadType) -> SampleValue {
        match ptype {
            PayloadType::ScalarString => SampleValue::String(b"hello".to_vec()),
            PayloadType::ScalarShort | PayloadType::ScalarEnum => SampleValue::Short(-3),
            PayloadType::ScalarFloat => SampleValue::Float(1.5),
            PayloadType::ScalarByte | PayloadType::WaveformByte | PayloadType::V4GenericBytes => {
                SampleValue::Bytes(vec![0, 0x0A, 0x1B, 0xFF])
            }
            PayloadType::ScalarInt => SampleValue::Int(-70_000),
            PayloadType::ScalarDouble => SampleValue::Double(-2.25),
            PayloadType::WaveformString => SampleValue::StringArray(vec![b"a".to_vec(), b"bc".to_vec()]),
            PayloadType::WaveformShort | PayloadType::WaveformEnum => SampleValue::ShortArray(vec![1, -2, 3]),
            PayloadType::WaveformFloat => SampleValue::FloatArray(vec![0.5, 1.5]),
            PayloadType::WaveformInt => SampleValue::IntArray(vec![7, 8, 9, 10]),
            PayloadType::WaveformDouble => SampleValue::DoubleArray(vec![1.0, 2.0]),
        }
    }

    #[test]
    fn every_type_round_trips_a_sample() {
        for ptype in PayloadType::all() {
            let sample = Sample::new(12_345, 678, example_value(ptype))
                .with_alarm(2, 7)
                .with_field("HIHI", "10");
            let raw = encode_sample(ptype, &sample, None).unwrap();
            let back = decode_sample(ptype, &raw).unwrap();
            assert_eq!(back.sample, sample, "{ptype}");
            assert_eq!(back.gap_epoch_secs, None);
        }
    }

    #[test]
    fn gap_attribute_surfaces() {
        let sample = Sample::new(1, 0, SampleValue::Double(0.0));
        let raw = encode_sample(PayloadType::ScalarDouble, &sample, Some("1704067300")).unwrap();
        let back = decode_sample(PayloadType::ScalarDouble, &raw).unwrap();
        assert_eq!(back.gap_epoch_secs, Some(1_704_067_300));
        assert_eq!(back.sample.fields, vec![FieldAttr::new("cnxlostepsecs", "1704067300")]);
    }

    #[test]
    fn unparseable_gap_is_ignored() {
        let sample = Sample::new(1, 0, SampleValue::Double(0.0));
        let raw = encode_sample(PayloadType::ScalarDouble, &sample, Some("soon")).unwrap();
        let back = decode_sample(PayloadType::ScalarDouble, &raw).unwrap();
        assert_eq!(back.gap_epoch_secs, None);
        assert_eq!(back.sample.fields.len(), 1);
    }

    #[test]
    fn scalar_array_misuse_is_type_mismatch() {
        let arr = Sample::new(0, 0, SampleValue::DoubleArray(vec![1.0]));
        assert!(matches!(
            encode_sample(PayloadType::ScalarDouble, &arr, None),
            Err(CodecError::TypeMismatch { ptype: "SCALAR_DOUBLE", .. })
        ));
        let scalar = Sample::new(0, 0, SampleValue::Int(1));
        assert!(matches!(
            encode_sample(PayloadType::WaveformInt, &scalar, None),
            Err(CodecError::TypeMismatch { .. })
        ));
        let wrong_kind = Sample::new(0, 0, SampleValue::Float(1.0));
        assert!(encode_sample(PayloadType::ScalarDouble, &wrong_kind, None).is_err());
    }

    #[test]
    fn numeric_arrays_are_unpacked() {
        let sample = Sample::new(1, 2, SampleValue::DoubleArray(vec![1.0, 2.0]));
        let raw = encode_sample(PayloadType::WaveformDouble, &sample, None).unwrap();
        // secondsintoyear, nano, then one fixed64 tag (field 3) per element
        let mut expected = vec![0x08, 1, 0x10, 2, 0x19];
        expected.extend_from_slice(&1.0f64.to_le_bytes());
        expected.push(0x19);
        expected.extend_from_slice(&2.0f64.to_le_bytes());
        assert_eq!(raw, expected);
    }

    #[test]
    fn waveform_byte_is_single_bytes_field() {
        assert_eq!(PayloadType::WaveformByte.arity(), Arity::Scalar);
        assert_eq!(PayloadType::WaveformByte.kind(), ValueKind::Bytes);
    }

    #[test]
    fn encode_samples_matches_single_encode() {
        let samples: Vec<Sample> = (0..3).map(|i| Sample::new(i, 0, SampleValue::Int(i as i32))).collect();
        let batch = encode_samples(PayloadType::ScalarInt, &samples).unwrap();
        for (raw, s) in batch.iter().zip(&samples) {
            assert_eq!(raw, &encode_sample(PayloadType::ScalarInt, s, None).unwrap());
        }
    }

    #[test]
    fn encode_stream_layout() {
        let desc = PayloadDescriptor::new(PayloadType::ScalarInt, "pv", 2024);
        let samples: Vec<Sample> = (0..2).map(|i| Sample::new(i, 0, SampleValue::Int(10))).collect();
        let wire = encode_stream(&desc, &samples).unwrap();
        let (lines, rest) = split(&wire).unwrap();
        assert!(rest.is_empty());
        assert_eq!(lines.len(), 4);
        assert_eq!(decode_payload_info(&lines[0]).unwrap(), desc);
        assert!(lines[3].is_empty());
    }
}
