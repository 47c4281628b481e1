//! stream/decoder.rs
//!
//! Chunked stream state machine.
//!
//! Design notes:
//! - Chunks of any size are appended to a leftover buffer; complete lines are
//!   framed off its front, the incomplete tail stays for the next call.
//! - Bytes already known to contain no line feed are not rescanned, so
//!   byte-at-a-time feeding stays linear.
//! - Flushes happen on the sample threshold, on a type/year change (or any
//!   descriptor when not consolidating) and on the final chunk.
//! - Errors are fatal for the instance; pending state is not discarded.

use bytes::{Buf, BytesMut};
use tracing::{debug, trace, warn};

use crate::config::StreamConfig;
use crate::constants::LINE_FEED;
use crate::escape::unescape_line;
use crate::records::{decode_payload_info, PayloadDescriptor};
use crate::stream::output::OutputBuffers;
use crate::stream::typed::TypedDecoder;
use crate::telemetry::{DecodeCounters, Stage, TelemetrySnapshot, TelemetryTimer};
use crate::types::{CodecError, Result};
use crate::utils::epoch_offset;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecoderState {
    /// Next record is a payload descriptor.
    WaitDescriptor,
    /// Next record is a sample, or a blank line ending the run.
    WaitSample,
}

#[derive(Debug)]
struct ActiveRun {
    decoder: TypedDecoder,
    descriptor: PayloadDescriptor,
}

#[derive(Debug)]
pub struct StreamDecoder {
    config: StreamConfig,
    state: DecoderState,
    leftover: BytesMut,
    /// Prefix of `leftover` known to hold no line feed.
    scanned: usize,
    closed: bool,
    active: Option<ActiveRun>,
    output: Vec<OutputBuffers>,
    line: Vec<u8>,
    counters: DecodeCounters,
    timer: TelemetryTimer,
}

impl StreamDecoder {
    pub fn new(config: StreamConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: DecoderState::WaitDescriptor,
            leftover: BytesMut::new(),
            scanned: 0,
            closed: false,
            active: None,
            output: Vec::new(),
            line: Vec::new(),
            counters: DecodeCounters::default(),
            timer: TelemetryTimer::new(),
        })
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Samples accumulated but not yet flushed.
    pub fn pending_samples(&self) -> usize {
        self.active.as_ref().map_or(0, |r| r.decoder.sample_count())
    }

    /// Descriptor of the run currently accumulating, if any.
    pub fn descriptor(&self) -> Option<&PayloadDescriptor> {
        self.active.as_ref().map(|r| &r.descriptor)
    }

    /// Flushed output not yet taken.
    pub fn output(&self) -> &[OutputBuffers] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<OutputBuffers> {
        std::mem::take(&mut self.output)
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, &self.timer)
    }

    /// Submit the next chunk of escaped bytes.
    ///
    /// Returns `true` when every byte submitted so far has been consumed.
    /// With `last` set, a non-empty leftover is `TruncatedStream`; otherwise
    /// everything pending is flushed and the decoder closes.
    pub fn process(&mut self, chunk: &[u8], last: bool) -> Result<bool> {
        if self.closed {
            return Err(CodecError::StreamClosed);
        }
        if last {
            self.closed = true;
        }

        self.counters.add_chunk(chunk.len());
        self.leftover.extend_from_slice(chunk);

        let mut start = 0;
        loop {
            let from = start.max(self.scanned);
            let Some(rel) = self.leftover[from..].iter().position(|&b| b == LINE_FEED) else {
                break;
            };
            let end = from + rel + 1;

            let mut line = std::mem::take(&mut self.line);
            line.clear();
            let framed = {
                let raw = &self.leftover[start..end];
                self.timer.time(Stage::Unescape, || unescape_line(raw, &mut line))
            };
            if let Err(e) = framed {
                self.line = line;
                return Err(shift_offset(e, start));
            }
            start = end;

            let handled = self.handle_line(&line);
            self.line = line;
            handled?;
        }

        self.leftover.advance(start);
        self.scanned = self.leftover.len();

        if last {
            if !self.leftover.is_empty() {
                warn!(leftover = self.leftover.len(), "stream ended mid-record");
                return Err(CodecError::TruncatedStream { leftover: self.leftover.to_vec() });
            }
            self.flush_active()?;
            self.timer.finish();
            debug!(flushes = self.counters.flushes, rows = self.counters.rows_out, "stream closed");
        }

        Ok(self.leftover.is_empty())
    }

    /// Close the stream and take everything flushed.
    pub fn finish(&mut self) -> Result<Vec<OutputBuffers>> {
        if !self.closed {
            self.process(&[], true)?;
        }
        Ok(self.take_output())
    }

    fn handle_line(&mut self, line: &[u8]) -> Result<()> {
        self.counters.lines += 1;
        trace!(state = ?self.state, len = line.len(), "record");

        match self.state {
            DecoderState::WaitDescriptor => {
                let desc = self.timer.time(Stage::Decode, || decode_payload_info(line))?;
                self.begin_run(desc)?;
                self.state = DecoderState::WaitSample;
            }
            DecoderState::WaitSample if line.is_empty() => {
                self.state = DecoderState::WaitDescriptor;
            }
            DecoderState::WaitSample => {
                let Some(run) = self.active.as_mut() else {
                    return Err(CodecError::Parse("sample without descriptor".into()));
                };
                let before = run.decoder.sample_count();
                let decoder = &mut run.decoder;
                let count = self.timer.time(Stage::Decode, || decoder.process(line))?;
                self.counters.add_sample(count - before - 1);
                if count >= self.config.threshold {
                    self.flush_active()?;
                }
            }
        }
        Ok(())
    }

    fn begin_run(&mut self, desc: PayloadDescriptor) -> Result<()> {
        self.counters.descriptors += 1;
        let offset = epoch_offset(desc.year)?;

        let reuse = self.config.consolidate
            && self
                .active
                .as_ref()
                .is_some_and(|r| r.decoder.payload_type() == desc.ptype && r.decoder.epoch_offset() == offset);

        debug!(pv = %desc.pv_name, ptype = %desc.ptype, year = desc.year, consolidated = reuse, "descriptor");
        if reuse {
            if let Some(run) = self.active.as_mut() {
                run.descriptor = desc;
            }
            return Ok(());
        }

        self.flush_active()?;
        self.active = Some(ActiveRun {
            decoder: TypedDecoder::new(desc.ptype, offset),
            descriptor: desc,
        });
        Ok(())
    }

    fn flush_active(&mut self) -> Result<()> {
        let Some(run) = self.active.as_mut() else {
            return Ok(());
        };
        let (decoder, pv_name) = (&mut run.decoder, run.descriptor.pv_name.as_str());
        let flushed = self.timer.time(Stage::Flush, || decoder.flush(pv_name))?;
        if let Some(out) = flushed {
            debug!(
                pv = %out.pv_name,
                ptype = %out.ptype,
                rows = out.len(),
                width = out.values.cols(),
                "flush"
            );
            self.counters.add_flush(out.len());
            self.output.push(out);
        }
        Ok(())
    }
}

/// Make a line-relative framing offset absolute within the leftover buffer.
fn shift_offset(e: CodecError, base: usize) -> CodecError {
    match e {
        CodecError::Framing { offset, code } => CodecError::Framing { offset: base + offset, code },
        other => other,
    }
}
