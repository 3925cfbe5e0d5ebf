//! # Record Builder
//!
//! Packs object bytes emitted by Pass 2 into Text records: each holds up
//! to 30 bytes of object code at contiguous addresses. A byte sequence
//! that doesn't extend the currently open record, or would overflow its
//! 30-byte cap, flushes the open record and starts a new one.
//!
//! Modeled as an explicit `Closed | Open{start, bytes}` state machine —
//! every push is a transition, and `flush` on `RESB`/`RESW`/end-of-input
//! is total.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    pub start: u32,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModRecord {
    pub address: u32,
    pub half_bytes: u8,
}

const MAX_RECORD_BYTES: usize = 30;

enum State {
    Closed,
    Open { start: u32, bytes: Vec<u8> },
}

pub struct RecordBuilder {
    state: State,
    records: Vec<TextRecord>,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {
            state: State::Closed,
            records: Vec::new(),
        }
    }

    /// Append a byte sequence emitted at address `addr`. Flushes and
    /// reopens when the sequence isn't contiguous with the open record
    /// or would exceed the 30-byte cap.
    pub fn push(&mut self, addr: u32, bytes: Vec<u8>) {
        if bytes.is_empty() {
            return;
        }
        let extends = matches!(
            &self.state,
            State::Open { start, bytes: buf }
                if addr == *start + buf.len() as u32 && buf.len() + bytes.len() <= MAX_RECORD_BYTES
        );
        if extends {
            if let State::Open { bytes: buf, .. } = &mut self.state {
                buf.extend(bytes);
            }
        } else {
            self.flush();
            self.state = State::Open { start: addr, bytes };
        }
    }

    /// Close the open record, if any, and push it onto the finished list.
    pub fn flush(&mut self) {
        if let State::Open { start, bytes } = std::mem::replace(&mut self.state, State::Closed) {
            log::debug!(
                "flushing text record at {start:06X} ({} bytes)",
                bytes.len()
            );
            self.records.push(TextRecord { start, bytes });
        }
    }

    pub fn finish(mut self) -> Vec<TextRecord> {
        self.flush();
        self.records
    }
}

pub fn format_header(name: &str, start: u32, length: u32) -> String {
    let truncated = &name[..name.len().min(6)];
    format!("H^{truncated:<6}^{start:06X}^{length:06X}")
}

pub fn format_text(record: &TextRecord) -> String {
    let hex: String = record.bytes.iter().map(|b| format!("{b:02X}")).collect();
    format!("T^{:06X}^{:02X}^{hex}", record.start, record.bytes.len())
}

pub fn format_modification(record: &ModRecord) -> String {
    format!("M^{:06X}^{:02X}", record.address, record.half_bytes)
}

pub fn format_end(entry_point: u32) -> String {
    format!("E^{entry_point:06X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_bytes_extend_the_open_record() {
        let mut b = RecordBuilder::new();
        b.push(0, vec![0x01, 0x00, 0x05]);
        b.push(3, vec![0x4F, 0x00, 0x00]);
        let records = b.finish();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bytes, vec![0x01, 0x00, 0x05, 0x4F, 0x00, 0x00]);
    }

    #[test]
    fn non_contiguous_address_flushes_and_opens_new_record() {
        let mut b = RecordBuilder::new();
        b.push(0, vec![0x01]);
        b.push(10, vec![0x02]);
        let records = b.finish();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].start, 0);
        assert_eq!(records[1].start, 10);
    }

    #[test]
    fn overflow_past_thirty_bytes_flushes() {
        let mut b = RecordBuilder::new();
        b.push(0, vec![0u8; 28]);
        b.push(28, vec![0u8; 4]);
        let records = b.finish();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].bytes.len(), 28);
        assert_eq!(records[1].bytes.len(), 4);
    }

    #[test]
    fn sixty_two_bytes_split_into_three_records() {
        let mut b = RecordBuilder::new();
        let mut addr = 0u32;
        for _ in 0..62 {
            b.push(addr, vec![0xAA]);
            addr += 1;
        }
        let records = b.finish();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].bytes.len(), 30);
        assert_eq!(records[1].bytes.len(), 30);
        assert_eq!(records[2].bytes.len(), 2);
    }

    #[test]
    fn header_pads_name_to_six_chars() {
        assert_eq!(format_header("COPY", 0x1000, 6), "H^COPY  ^001000^000006");
    }

    #[test]
    fn text_and_end_formatting() {
        let rec = TextRecord {
            start: 0x1000,
            bytes: vec![0x01, 0x00, 0x05],
        };
        assert_eq!(format_text(&rec), "T^001000^03^010005");
        assert_eq!(format_end(0x1000), "E^001000");
        assert_eq!(
            format_modification(&ModRecord {
                address: 0x101,
                half_bytes: 5
            }),
            "M^000101^05"
        );
    }
}
