use std::io::{self, Read};

use aris_types::{ArisError, ArisResult};
use byteorder::{ByteOrder, LittleEndian};

pub fn read_u16_le(
    buf: &[u8],
    off: usize,
) -> u16 {
    LittleEndian::read_u16(&buf[off..off + 2])
}

pub fn read_u32_le(
    buf: &[u8],
    off: usize,
) -> u32 {
    LittleEndian::read_u32(&buf[off..off + 4])
}

pub fn read_i32_le(
    buf: &[u8],
    off: usize,
) -> i32 {
    LittleEndian::read_i32(&buf[off..off + 4])
}

pub fn read_u64_le(
    buf: &[u8],
    off: usize,
) -> u64 {
    LittleEndian::read_u64(&buf[off..off + 8])
}

pub fn read_f32_le(
    buf: &[u8],
    off: usize,
) -> f32 {
    LittleEndian::read_f32(&buf[off..off + 4])
}

pub fn read_f64_le(
    buf: &[u8],
    off: usize,
) -> f64 {
    LittleEndian::read_f64(&buf[off..off + 8])
}

/// Заполняет `buf` целиком.
///
/// Короткое чтение (EOF раньше конца буфера) превращается в ошибку из
/// `on_short`, остальные ошибки ввода/вывода пробрасываются как `Io`.
pub fn read_record<R, F>(
    reader: &mut R,
    buf: &mut [u8],
    on_short: F,
) -> ArisResult<()>
where
    R: Read,
    F: FnOnce() -> ArisError,
{
    match reader.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(on_short()),
        Err(e) => Err(ArisError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_little_endian_readers() {
        let mut buf = vec![0u8; 32];
        buf[0..4].copy_from_slice(&0x0546_4444u32.to_le_bytes());
        buf[4..6].copy_from_slice(&0xBEEFu16.to_le_bytes());
        buf[8..16].copy_from_slice(&u64::MAX.to_le_bytes());
        buf[16..20].copy_from_slice(&(-7i32).to_le_bytes());
        buf[20..24].copy_from_slice(&1.5f32.to_le_bytes());
        buf[24..32].copy_from_slice(&2.25f64.to_le_bytes());

        assert_eq!(&buf[0..4], b"DDF\x05", "сигнатура DDF_05 в LE");
        assert_eq!(read_u32_le(&buf, 0), 0x0546_4444);
        assert_eq!(read_u16_le(&buf, 4), 0xBEEF);
        assert_eq!(read_u64_le(&buf, 8), u64::MAX);
        assert_eq!(read_i32_le(&buf, 16), -7);
        assert_eq!(read_f32_le(&buf, 20), 1.5);
        assert_eq!(read_f64_le(&buf, 24), 2.25);
    }

    #[test]
    fn test_read_record_full() {
        let mut cur = Cursor::new(vec![1u8, 2, 3, 4]);
        let mut buf = [0u8; 4];

        read_record(&mut cur, &mut buf, || ArisError::corrupt(0, "short")).unwrap();
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[test]
    fn test_read_record_short() {
        let mut cur = Cursor::new(vec![1u8, 2]);
        let mut buf = [0u8; 4];

        let err = read_record(&mut cur, &mut buf, || ArisError::corrupt(5, "short")).unwrap_err();
        assert_eq!(err.frame(), Some(5));
    }
}
