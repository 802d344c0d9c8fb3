use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Not enough bytes: requested {requested}, {available} available")]
    NotEnoughBytes { requested: usize, available: usize },
    #[error("Varuint is too large")]
    VarintTooLarge,
    #[error("Invalid UTF-8 string")]
    InvalidString,
    #[error("Invalid value: {}", _0)]
    InvalidValue(&'static str),
    #[error("{} bytes left unread", _0)]
    TrailingBytes(usize),
}

// Cursor over a byte slice, the counterpart of Writer.
pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, position: 0 }
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], ReaderError> {
        if self.remaining() < count {
            return Err(ReaderError::NotEnoughBytes {
                requested: count,
                available: self.remaining(),
            });
        }
        let slice = &self.bytes[self.position..self.position + count];
        self.position += count;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, ReaderError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, ReaderError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, ReaderError> {
        let bytes: [u8; 4] = self.take(4)?.try_into().unwrap_or_default();
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn read_u64(&mut self) -> Result<u64, ReaderError> {
        let bytes: [u8; 8] = self.take(8)?.try_into().unwrap_or_default();
        Ok(u64::from_le_bytes(bytes))
    }

    pub fn read_i64(&mut self) -> Result<i64, ReaderError> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_bool(&mut self) -> Result<bool, ReaderError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(ReaderError::InvalidValue("bool must be 0 or 1")),
        }
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], ReaderError> {
        self.take(count)
    }

    pub fn read_bytes_32(&mut self) -> Result<[u8; 32], ReaderError> {
        let mut out = [0u8; 32];
        out.copy_from_slice(self.take(32)?);
        Ok(out)
    }

    pub fn read_varuint32(&mut self) -> Result<u32, ReaderError> {
        let mut value: u64 = 0;
        let mut shift = 0;
        loop {
            let byte = self.read_u8()?;
            value |= ((byte & 0x7f) as u64) << shift;
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
            if shift >= 35 {
                return Err(ReaderError::VarintTooLarge);
            }
        }
        u32::try_from(value).map_err(|_| ReaderError::VarintTooLarge)
    }

    pub fn read_string(&mut self) -> Result<String, ReaderError> {
        let len = self.read_varuint32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| ReaderError::InvalidString)
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn position(&self) -> usize {
        self.position
    }
}
