//! `bitcode` helpers for descriptor codecs.

use std::io;

pub fn encode<T: bitcode::Encode + ?Sized>(value: &T) -> Vec<u8> {
    bitcode::encode(value)
}

/// Decodes a payload, reporting failures as [`io::ErrorKind::InvalidData`].
pub fn decode<T>(bytes: &[u8]) -> Result<T, io::Error>
where
    T: for<'a> bitcode::Decode<'a>,
{
    bitcode::decode::<T>(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
