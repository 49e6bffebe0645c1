//! Binary layout of a cache entry:
//! `[u64 BE expires_at][u16 BE len][record wire bytes]*`.

use hickory_proto::rr::Record;
use hickory_proto::serialize::binary::{BinDecodable, BinEncodable};
use tracing::debug;

pub const EXPIRY_LEN: usize = 8;

pub fn encode_entry(expires_at: u64, records: &[Record]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(EXPIRY_LEN + records.len() * 32);
    buf.extend_from_slice(&expires_at.to_be_bytes());

    for record in records {
        let wire = match record.to_bytes() {
            Ok(wire) => wire,
            Err(e) => {
                debug!(name = %record.name(), error = %e, "Skipping unencodable record");
                continue;
            }
        };
        let Ok(len) = u16::try_from(wire.len()) else {
            debug!(name = %record.name(), len = wire.len(), "Skipping oversized record");
            continue;
        };
        buf.extend_from_slice(&len.to_be_bytes());
        buf.extend_from_slice(&wire);
    }

    buf
}

/// Expiry prefix of an encoded entry, `None` if the buffer is too short.
#[inline]
pub fn decode_expiry(buf: &[u8]) -> Option<u64> {
    let prefix: [u8; EXPIRY_LEN] = buf.get(..EXPIRY_LEN)?.try_into().ok()?;
    Some(u64::from_be_bytes(prefix))
}

/// Decodes the record chunks following the expiry prefix.
///
/// A chunk whose length overruns the buffer, or that fails to parse, ends
/// the scan; records decoded before it are returned.
pub fn decode_records(buf: &[u8]) -> Vec<Record> {
    let mut records = Vec::new();
    let mut offset = EXPIRY_LEN;

    while offset + 2 <= buf.len() {
        let len = u16::from_be_bytes([buf[offset], buf[offset + 1]]) as usize;
        offset += 2;

        let Some(chunk) = buf.get(offset..offset + len) else {
            debug!(offset, len, "Cache entry chunk overruns buffer");
            break;
        };

        match Record::from_bytes(chunk) {
            Ok(record) => records.push(record),
            Err(e) => {
                debug!(offset, error = %e, "Cache entry chunk failed to parse");
                break;
            }
        }
        offset += len;
    }

    records
}
