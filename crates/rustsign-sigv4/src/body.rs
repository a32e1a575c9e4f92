//! Request body type for signing.
//!
//! The payload hash needs every byte of the body, but the caller still has to
//! send the body afterwards. [`SigningBody::buffer`] reads the body once and
//! leaves behind a fresh view of the same bytes, including when the read fails
//! partway through.

use std::fmt;
use std::io::{self, Cursor, Read};

use bytes::{Buf, Bytes};

use crate::error::{SignError, SignResult};

/// Request body for signing.
#[derive(Default)]
pub enum SigningBody {
    /// No body.
    #[default]
    Empty,
    /// A fully buffered body.
    Buffered(Bytes),
    /// A body that has to be read before it can be hashed.
    Reader(Box<dyn Read + Send>),
}

impl SigningBody {
    /// Create an empty body.
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty
    }

    /// Create a body from raw bytes.
    #[must_use]
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self::Buffered(data.into())
    }

    /// Create a body from a reader that has not been consumed yet.
    #[must_use]
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self::Reader(Box::new(reader))
    }

    /// The buffered bytes, if the body has been materialized.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Buffered(bytes) => Some(bytes),
            Self::Empty | Self::Reader(_) => None,
        }
    }

    /// Read the whole body and return its bytes.
    ///
    /// On success the body is left as [`SigningBody::Buffered`] holding the
    /// same bytes. If the reader fails, the body becomes a reader that yields
    /// the bytes already consumed followed by the rest of the original stream,
    /// and [`SignError::BodyRead`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Read;
    /// use rustsign_sigv4::SigningBody;
    ///
    /// let mut body = SigningBody::from_reader(&b"payload"[..]);
    /// assert_eq!(&body.buffer().unwrap()[..], b"payload");
    ///
    /// let mut sent = Vec::new();
    /// body.read_to_end(&mut sent).unwrap();
    /// assert_eq!(sent, b"payload");
    /// ```
    pub fn buffer(&mut self) -> SignResult<Bytes> {
        match std::mem::take(self) {
            Self::Empty => Ok(Bytes::new()),
            Self::Buffered(bytes) => {
                *self = Self::Buffered(bytes.clone());
                Ok(bytes)
            }
            Self::Reader(mut reader) => {
                let mut data = Vec::new();
                match reader.read_to_end(&mut data) {
                    Ok(_) => {
                        let bytes = Bytes::from(data);
                        *self = Self::Buffered(bytes.clone());
                        Ok(bytes)
                    }
                    Err(e) => {
                        let restored = Read::chain(Cursor::new(data), reader);
                        *self = Self::Reader(Box::new(restored));
                        Err(SignError::BodyRead(e))
                    }
                }
            }
        }
    }
}

impl Read for SigningBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Empty => Ok(0),
            Self::Buffered(bytes) => {
                let n = buf.len().min(bytes.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                bytes.advance(n);
                Ok(n)
            }
            Self::Reader(reader) => reader.read(buf),
        }
    }
}

impl fmt::Debug for SigningBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Buffered(bytes) => f.debug_tuple("Buffered").field(&bytes.len()).finish(),
            Self::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

impl From<Bytes> for SigningBody {
    fn from(value: Bytes) -> Self {
        Self::Buffered(value)
    }
}

impl From<Vec<u8>> for SigningBody {
    fn from(value: Vec<u8>) -> Self {
        Self::Buffered(Bytes::from(value))
    }
}

impl From<&'static [u8]> for SigningBody {
    fn from(value: &'static [u8]) -> Self {
        Self::Buffered(Bytes::from_static(value))
    }
}

impl From<&'static str> for SigningBody {
    fn from(value: &'static str) -> Self {
        Self::Buffered(Bytes::from_static(value.as_bytes()))
    }
}

impl From<String> for SigningBody {
    fn from(value: String) -> Self {
        Self::Buffered(Bytes::from(value))
    }
}
