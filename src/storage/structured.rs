//! Structured stream I/O for binary data serialization.
//!
//! This module provides the little-endian primitive layer used by the node
//! graph format: fixed-width integers, variable-length integers, and
//! length-prefixed UTF-8 strings. Both sides track the stream position so
//! corruption can be reported with a byte offset.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{DragnetError, Result};
use crate::util::varint::{decode_u64, encode_u64};

/// A structured stream writer for binary data.
pub struct StructWriter<W: Write> {
    writer: W,
    position: u64,
}

impl<W: Write> StructWriter<W> {
    /// Create a new structured stream writer.
    pub fn new(writer: W) -> Self {
        StructWriter {
            writer,
            position: 0,
        }
    }

    /// Write a u8 value.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.writer.write_u8(value)?;
        self.position += 1;
        Ok(())
    }

    /// Write a bool value as a single byte.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// Write an i32 value (little-endian).
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.writer.write_i32::<LittleEndian>(value)?;
        self.position += 4;
        Ok(())
    }

    /// Write a u32 value (little-endian).
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.writer.write_u32::<LittleEndian>(value)?;
        self.position += 4;
        Ok(())
    }

    /// Write a variable-length integer.
    pub fn write_varint(&mut self, value: u64) -> Result<()> {
        let encoded = encode_u64(value);
        self.writer.write_all(&encoded)?;
        self.position += encoded.len() as u64;
        Ok(())
    }

    /// Write a string with length prefix.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        self.write_varint(bytes.len() as u64)?;
        self.writer.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    /// Get current stream position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// A structured stream reader for binary data.
pub struct StructReader<R: Read> {
    reader: R,
    position: u64,
}

impl<R: Read> StructReader<R> {
    /// Create a new structured stream reader.
    pub fn new(reader: R) -> Self {
        StructReader {
            reader,
            position: 0,
        }
    }

    /// Read a u8 value.
    pub fn read_u8(&mut self) -> Result<u8> {
        let value = self.reader.read_u8()?;
        self.position += 1;
        Ok(value)
    }

    /// Read a bool value from a single byte.
    ///
    /// Any byte other than 0 or 1 is treated as stream corruption.
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DragnetError::serialization(format!(
                "Invalid boolean byte {} at position {}",
                other,
                self.position - 1
            ))),
        }
    }

    /// Read an i32 value (little-endian).
    pub fn read_i32(&mut self) -> Result<i32> {
        let value = self.reader.read_i32::<LittleEndian>()?;
        self.position += 4;
        Ok(value)
    }

    /// Read a u32 value (little-endian).
    pub fn read_u32(&mut self) -> Result<u32> {
        let value = self.reader.read_u32::<LittleEndian>()?;
        self.position += 4;
        Ok(value)
    }

    /// Read a variable-length integer.
    pub fn read_varint(&mut self) -> Result<u64> {
        // A u64 varint occupies at most 10 bytes
        let mut bytes = Vec::new();
        loop {
            let byte = self.reader.read_u8()?;
            bytes.push(byte);
            if byte & 0x80 == 0 {
                break;
            }
            if bytes.len() == 10 {
                return Err(DragnetError::serialization("VarInt overflow"));
            }
        }

        let (value, _) = decode_u64(&bytes)?;
        self.position += bytes.len() as u64;
        Ok(value)
    }

    /// Read a string with length prefix.
    ///
    /// The length prefix comes from the stream, so it is not trusted: data is
    /// read through a bounded reader and a short stream fails instead of
    /// allocating the claimed length up front.
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_varint()?;
        let mut bytes = Vec::new();
        self.reader
            .by_ref()
            .take(length)
            .read_to_end(&mut bytes)?;

        if (bytes.len() as u64) < length {
            return Err(DragnetError::serialization(format!(
                "Truncated string at position {}: expected {} bytes, got {}",
                self.position,
                length,
                bytes.len()
            )));
        }

        self.position += bytes.len() as u64;
        String::from_utf8(bytes).map_err(|e| DragnetError::serialization(format!("Invalid UTF-8: {e}")))
    }

    /// Get current stream position.
    pub fn position(&self) -> u64 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_struct_writer_reader() {
        let mut buffer = Vec::new();

        {
            let mut writer = StructWriter::new(&mut buffer);
            writer.write_u8(42).unwrap();
            writer.write_bool(true).unwrap();
            writer.write_bool(false).unwrap();
            writer.write_i32(-1).unwrap();
            writer.write_i32(i32::MAX).unwrap();
            writer.write_u32(5678).unwrap();
            writer.write_varint(12345).unwrap();
            writer.write_string("Hello, World!").unwrap();
            writer.flush().unwrap();
            assert_eq!(writer.position(), 31);
        }
        assert_eq!(buffer.len(), 31);

        let mut reader = StructReader::new(Cursor::new(buffer));
        assert_eq!(reader.read_u8().unwrap(), 42);
        assert!(reader.read_bool().unwrap());
        assert!(!reader.read_bool().unwrap());
        assert_eq!(reader.read_i32().unwrap(), -1);
        assert_eq!(reader.read_i32().unwrap(), i32::MAX);
        assert_eq!(reader.read_u32().unwrap(), 5678);
        assert_eq!(reader.read_varint().unwrap(), 12345);
        assert_eq!(reader.read_string().unwrap(), "Hello, World!");
        assert_eq!(reader.position(), 31);
    }

    #[test]
    fn test_string_roundtrip_multibyte() {
        let mut buffer = Vec::new();
        {
            let mut writer = StructWriter::new(&mut buffer);
            writer.write_string("héllo wörld").unwrap();
            writer.write_string("日本語").unwrap();
        }

        let mut reader = StructReader::new(Cursor::new(buffer));
        assert_eq!(reader.read_string().unwrap(), "héllo wörld");
        assert_eq!(reader.read_string().unwrap(), "日本語");
    }

    #[test]
    fn test_read_bool_rejects_junk() {
        let buffer = vec![7u8];
        let mut reader = StructReader::new(Cursor::new(buffer));
        let result = reader.read_bool();
        assert!(matches!(result, Err(DragnetError::Serialization(_))));
    }

    #[test]
    fn test_read_string_rejects_invalid_utf8() {
        // Length prefix of 2 followed by bytes that are not valid UTF-8
        let buffer = vec![2u8, 0xFF, 0xFE];
        let mut reader = StructReader::new(Cursor::new(buffer));
        let result = reader.read_string();
        assert!(matches!(result, Err(DragnetError::Serialization(_))));
    }

    #[test]
    fn test_read_string_truncated() {
        // Length prefix claims 5 bytes but only 2 are present
        let buffer = vec![5u8, b'a', b'b'];
        let mut reader = StructReader::new(Cursor::new(buffer));
        let result = reader.read_string();
        assert!(matches!(result, Err(DragnetError::Serialization(_))));
    }

    #[test]
    fn test_read_string_huge_length_claim() {
        // A lying length prefix must not allocate the claimed size up front
        let mut buffer = encode_u64(u64::MAX);
        buffer.extend_from_slice(b"tiny");
        let mut reader = StructReader::new(Cursor::new(buffer));
        let result = reader.read_string();
        assert!(result.is_err());
    }

    #[test]
    fn test_read_varint_unterminated() {
        // Nothing but continuation bytes
        let buffer = vec![0x80u8; 16];
        let mut reader = StructReader::new(Cursor::new(buffer));
        let result = reader.read_varint();
        assert!(matches!(result, Err(DragnetError::Serialization(_))));
    }

    #[test]
    fn test_position_tracks_varint_width() {
        let mut buffer = Vec::new();
        {
            let mut writer = StructWriter::new(&mut buffer);
            writer.write_varint(0).unwrap();
            assert_eq!(writer.position(), 1);
            writer.write_varint(128).unwrap();
            assert_eq!(writer.position(), 3);
        }

        let mut reader = StructReader::new(Cursor::new(buffer));
        reader.read_varint().unwrap();
        assert_eq!(reader.position(), 1);
        reader.read_varint().unwrap();
        assert_eq!(reader.position(), 3);
    }
}
