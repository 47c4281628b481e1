//! stream/typed.rs
//!
//! Per-type sample accumulator.
//!
//! Design notes:
//! - Bound to one payload type and one year (epoch offset) for its lifetime.
//! - Row width is the widest array seen, not the descriptor's hint.
//! - Two passes: accumulate, then `copy_out` into exactly sized buffers.

use tracing::trace;

use crate::constants::GAP_SEVERITY;
use crate::records::{decode_sample, DecodedSample, PayloadDescriptor, PayloadType, Sample, SampleValue};
use crate::stream::output::{copy_fixed, OutputBuffers, SampleMeta, ValueBuffer};
use crate::types::{CodecError, Result};
use crate::utils::epoch_offset;

#[derive(Debug)]
pub struct TypedDecoder {
    ptype: PayloadType,
    epoch_offset: u32,
    max_elements: usize,
    pending: Vec<Sample>,
}

impl TypedDecoder {
    pub fn new(ptype: PayloadType, epoch_offset: u32) -> Self {
        Self {
            ptype,
            epoch_offset,
            max_elements: 0,
            pending: Vec::new(),
        }
    }

    pub fn for_descriptor(desc: &PayloadDescriptor) -> Result<Self> {
        Ok(Self::new(desc.ptype, epoch_offset(desc.year)?))
    }

    pub fn payload_type(&self) -> PayloadType {
        self.ptype
    }

    pub fn epoch_offset(&self) -> u32 {
        self.epoch_offset
    }

    /// Widest row among pending samples.
    pub fn max_elements(&self) -> usize {
        self.max_elements
    }

    pub fn sample_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Decode one sample record and accumulate it.
    ///
    /// Returns the total pending count, gap markers included.
    pub fn process(&mut self, raw: &[u8]) -> Result<usize> {
        let decoded = decode_sample(self.ptype, raw)?;
        Ok(self.push(decoded))
    }

    /// Accumulate an already decoded sample.
    ///
    /// A gap timestamp inserts a synthesized alarm sample immediately before
    /// this one.
    pub fn push(&mut self, decoded: DecodedSample) -> usize {
        let DecodedSample { sample, gap_epoch_secs } = decoded;

        self.max_elements = self.max_elements.max(sample.value.element_count());
        self.pending.push(sample);

        if let Some(gap) = gap_epoch_secs {
            // wraps for gaps before the year start; copy_out adds the offset back
            let sec = gap.wrapping_sub(self.epoch_offset);
            trace!(gap, sec, "synthesizing disconnect marker");
            let marker = Sample {
                seconds_into_year: sec,
                nanos: 0,
                severity: GAP_SEVERITY,
                status: 0,
                value: SampleValue::zero(self.ptype),
                fields: Vec::new(),
            };
            self.max_elements = self.max_elements.max(marker.value.element_count());
            let at = self.pending.len() - 1;
            self.pending.insert(at, marker);
        }

        self.pending.len()
    }

    /// Write all pending samples into caller-provided buffers and clear.
    ///
    /// `values` must be `[sample_count][max_elements]` of this type's kind and
    /// `meta` must hold `sample_count` entries. Cells beyond a sample's own
    /// length are left untouched.
    pub fn copy_out(&mut self, values: &mut ValueBuffer, meta: &mut [SampleMeta]) -> Result<()> {
        let rows = self.pending.len();
        if values.kind() != self.ptype.kind() {
            return Err(CodecError::BufferMismatch(format!(
                "{:?} buffer for {}",
                values.kind(),
                self.ptype
            )));
        }
        if values.shape() != (rows, self.max_elements) {
            return Err(CodecError::BufferMismatch(format!(
                "values shape {:?}, need {:?}",
                values.shape(),
                (rows, self.max_elements)
            )));
        }
        if meta.len() != rows {
            return Err(CodecError::BufferMismatch(format!("meta length {}, need {}", meta.len(), rows)));
        }

        for (i, (s, m)) in self.pending.drain(..).zip(meta.iter_mut()).enumerate() {
            *m = SampleMeta {
                sec: s.seconds_into_year.wrapping_add(self.epoch_offset),
                ns: s.nanos,
                severity: s.severity,
                status: s.status,
            };
            write_row(values, i, s.value)?;
        }
        self.max_elements = 0;
        Ok(())
    }

    /// Allocate exactly sized buffers and move all pending samples into them.
    /// `None` when nothing is pending.
    pub fn flush(&mut self, pv_name: &str) -> Result<Option<OutputBuffers>> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        let rows = self.pending.len();
        let mut values = ValueBuffer::zeroed(self.ptype.kind(), rows, self.max_elements);
        let mut meta = vec![SampleMeta::default(); rows];
        self.copy_out(&mut values, &mut meta)?;
        Ok(Some(OutputBuffers {
            ptype: self.ptype,
            pv_name: pv_name.to_string(),
            values,
            meta,
        }))
    }
}

fn write_row(values: &mut ValueBuffer, row: usize, value: SampleValue) -> Result<()> {
    use SampleValue as V;
    use ValueBuffer as B;
    match (values, value) {
        (B::String(a), V::String(v)) | (B::Bytes(a), V::Bytes(v)) => copy_fixed(&mut a[[row, 0]], &v),
        (B::String(a), V::StringArray(v)) => {
            for (dst, src) in a.row_mut(row).iter_mut().zip(&v) {
                copy_fixed(dst, src);
            }
        }
        (B::Short(a), V::Short(v)) => a[[row, 0]] = v,
        (B::Int(a), V::Int(v)) => a[[row, 0]] = v,
        (B::Float(a), V::Float(v)) => a[[row, 0]] = v,
        (B::Double(a), V::Double(v)) => a[[row, 0]] = v,
        (B::Short(a), V::ShortArray(v)) => copy_row(a.row_mut(row), &v),
        (B::Int(a), V::IntArray(v)) => copy_row(a.row_mut(row), &v),
        (B::Float(a), V::FloatArray(v)) => copy_row(a.row_mut(row), &v),
        (B::Double(a), V::DoubleArray(v)) => copy_row(a.row_mut(row), &v),
        (b, v) => {
            return Err(CodecError::BufferMismatch(format!("{:?} value in {:?} buffer", v.kind(), b.kind())));
        }
    }
    Ok(())
}

fn copy_row<T: Copy>(mut dst: ndarray::ArrayViewMut1<'_, T>, src: &[T]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d = *s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::encode_sample;

    const Y2024: u32 = 1_704_067_200;

    #[test]
    fn scalar_rows_are_width_one() {
        let mut d = TypedDecoder::new(PayloadType::ScalarInt, Y2024);
        for i in 0..3 {
            let raw = encode_sample(PayloadType::ScalarInt, &Sample::new(i, 0, SampleValue::Int(i as i32 * 7)), None).unwrap();
            assert_eq!(d.process(&raw).unwrap(), i as usize + 1);
        }
        let out = d.flush("pv").unwrap().unwrap();
        assert_eq!(out.values.shape(), (3, 1));
        assert_eq!(out.values.as_int().unwrap().column(0).to_vec(), vec![0, 7, 14]);
        assert_eq!(out.meta[2].sec, Y2024 + 2);
        assert!(d.is_empty());
        assert_eq!(d.max_elements(), 0);
    }

    #[test]
    fn gap_marker_inserted_before_current() {
        let mut d = TypedDecoder::new(PayloadType::ScalarDouble, Y2024);
        let first = Sample::new(10, 1, SampleValue::Double(1.0));
        let second = Sample::new(50, 2, SampleValue::Double(2.0));
        d.process(&encode_sample(PayloadType::ScalarDouble, &first, None).unwrap()).unwrap();
        let gap = (Y2024 + 20).to_string();
        let n = d.process(&encode_sample(PayloadType::ScalarDouble, &second, Some(&gap)).unwrap()).unwrap();
        assert_eq!(n, 3);

        let out = d.flush("pv").unwrap().unwrap();
        let secs: Vec<u32> = out.meta.iter().map(|m| m.sec - Y2024).collect();
        assert_eq!(secs, vec![10, 20, 50]);
        assert_eq!(out.meta[1].severity, GAP_SEVERITY);
        assert_eq!(out.meta[1].ns, 0);
        assert_eq!(out.values.as_double().unwrap().column(0).to_vec(), vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn gap_before_year_start_round_trips() {
        let mut d = TypedDecoder::new(PayloadType::ScalarDouble, Y2024);
        let gap = (Y2024 - 5).to_string();
        d.process(&encode_sample(PayloadType::ScalarDouble, &Sample::new(3, 0, SampleValue::Double(1.0)), Some(&gap)).unwrap())
            .unwrap();
        let out = d.flush("pv").unwrap().unwrap();
        assert_eq!(out.meta[0].sec, Y2024 - 5);
        assert_eq!(out.meta[1].sec, Y2024 + 3);
    }

    #[test]
    fn copy_out_rejects_wrong_buffers() {
        let mut d = TypedDecoder::new(PayloadType::ScalarFloat, Y2024);
        d.process(&encode_sample(PayloadType::ScalarFloat, &Sample::new(0, 0, SampleValue::Float(1.0)), None).unwrap())
            .unwrap();

        let mut meta = vec![SampleMeta::default(); 1];
        let mut wrong_kind = ValueBuffer::zeroed(crate::records::ValueKind::Double, 1, 1);
        assert!(matches!(d.copy_out(&mut wrong_kind, &mut meta), Err(CodecError::BufferMismatch(_))));

        let mut wrong_shape = ValueBuffer::zeroed(crate::records::ValueKind::Float, 2, 1);
        assert!(matches!(d.copy_out(&mut wrong_shape, &mut meta), Err(CodecError::BufferMismatch(_))));

        // failed copies leave pending state intact
        assert_eq!(d.sample_count(), 1);
    }

    #[test]
    fn empty_flush_is_none() {
        let mut d = TypedDecoder::new(PayloadType::WaveformInt, Y2024);
        assert!(d.flush("pv").unwrap().is_none());
    }
}
