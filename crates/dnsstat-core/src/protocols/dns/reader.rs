use super::error::DecodeError;

pub struct DnsReader<'a> {
    payload: &'a [u8],
}

impl<'a> DnsReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DecodeError> {
        if self.payload.len() < needed {
            return Err(DecodeError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(DecodeError::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_u16_be(&self, range: std::ops::Range<usize>) -> Result<u16, DecodeError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(DecodeError::TooShort {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Reads a big-endian u16 starting at `offset`.
    pub fn read_u16_be_at(&self, offset: usize) -> Result<u16, DecodeError> {
        self.read_u16_be(offset..offset + 2)
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], DecodeError> {
        self.payload.get(range.clone()).ok_or(DecodeError::TooShort {
            needed: range.end,
            actual: self.payload.len(),
        })
    }

    /// Everything from `offset` to the end of the payload.
    pub fn read_tail(&self, offset: usize) -> Result<&'a [u8], DecodeError> {
        self.payload.get(offset..).ok_or(DecodeError::TooShort {
            needed: offset,
            actual: self.payload.len(),
        })
    }

    pub fn read_label_text(&self, range: std::ops::Range<usize>) -> Result<String, DecodeError> {
        let bytes = self.read_slice(range)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
