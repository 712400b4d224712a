//! Protocol codec for encoding/decoding loot notifications
//!
//! Handles the count-prefixed framing of item records. Either the whole
//! notification decodes or none of it does; a partial read is never returned.

use bytes::{Buf, BufMut, BytesMut};
use thiserror::Error;

use super::{ItemRecord, LootNotification};

/// Maximum number of records accepted in one notification
const MAX_RECORDS: u32 = 4096;

/// Smallest record the wire layout allows: kind-len(2) + count(4) + aux-len(4)
const MIN_RECORD_WIRE_SIZE: usize = 10;

/// Codec errors
#[derive(Error, Debug)]
pub enum MalformedMessage {
    #[error("Truncated stream: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("Notification contains no records")]
    Empty,

    #[error("Record count {0} exceeds cap of {1}")]
    TooManyRecords(u32, u32),

    #[error("Record count {count} cannot fit in {remaining} remaining bytes")]
    CountOverrun { count: u32, remaining: usize },

    #[error("Item kind identifier too long: {0} bytes")]
    KindTooLong(usize),

    #[error("Item kind is not valid UTF-8: {0}")]
    InvalidKind(#[from] std::string::FromUtf8Error),
}

pub type CodecResult<T> = Result<T, MalformedMessage>;

/// Encode a notification into a buffer.
///
/// Writes a 4-byte big-endian record count followed by each record in
/// sequence order. Advances the buffer's write position only.
pub fn encode(notification: &LootNotification, buf: &mut BytesMut) -> CodecResult<()> {
    if notification.is_empty() {
        return Err(MalformedMessage::Empty);
    }

    let count = notification.len() as u32;
    if count > MAX_RECORDS {
        return Err(MalformedMessage::TooManyRecords(count, MAX_RECORDS));
    }

    buf.put_u32(count);
    for record in &notification.items {
        encode_record(record, buf)?;
    }

    Ok(())
}

fn encode_record(record: &ItemRecord, buf: &mut BytesMut) -> CodecResult<()> {
    let kind = record.kind.as_bytes();
    if kind.len() > u16::MAX as usize {
        return Err(MalformedMessage::KindTooLong(kind.len()));
    }

    buf.put_u16(kind.len() as u16);
    buf.put_slice(kind);
    buf.put_u32(record.count);
    buf.put_u32(record.aux.len() as u32);
    buf.put_slice(&record.aux);

    Ok(())
}

/// Decode a notification from a buffer.
///
/// Reads the count, then exactly that many records in order. The declared
/// count is bound-checked against the remaining buffer before any record is
/// read, so an absurd count fails fast instead of allocating.
pub fn decode(buf: &mut impl Buf) -> CodecResult<LootNotification> {
    ensure(buf.remaining(), 4)?;
    let count = buf.get_u32();

    if count == 0 {
        return Err(MalformedMessage::Empty);
    }
    if count > MAX_RECORDS {
        return Err(MalformedMessage::TooManyRecords(count, MAX_RECORDS));
    }
    if count as usize * MIN_RECORD_WIRE_SIZE > buf.remaining() {
        return Err(MalformedMessage::CountOverrun {
            count,
            remaining: buf.remaining(),
        });
    }

    let mut items = Vec::with_capacity(count as usize);
    for _ in 0..count {
        items.push(decode_record(buf)?);
    }

    Ok(LootNotification::new(items))
}

fn decode_record(buf: &mut impl Buf) -> CodecResult<ItemRecord> {
    ensure(buf.remaining(), 2)?;
    let kind_len = buf.get_u16() as usize;

    ensure(buf.remaining(), kind_len)?;
    let kind = String::from_utf8(buf.copy_to_bytes(kind_len).to_vec())?;

    ensure(buf.remaining(), 4)?;
    let count = buf.get_u32();

    ensure(buf.remaining(), 4)?;
    let aux_len = buf.get_u32() as usize;

    ensure(buf.remaining(), aux_len)?;
    let aux = buf.copy_to_bytes(aux_len).to_vec();

    Ok(ItemRecord { kind, count, aux })
}

fn ensure(remaining: usize, needed: usize) -> CodecResult<()> {
    if remaining < needed {
        return Err(MalformedMessage::Truncated { needed, remaining });
    }
    Ok(())
}
