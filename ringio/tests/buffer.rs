//! Integration tests for the in-memory Buffer

use ringio::{Buffer, Hook, Ring, RingError};

#[test]
fn test_u32_round_trip_little_endian() {
    let mut buffer = Buffer::new(16);
    buffer.write_u32(0x1122_3344).unwrap();

    let mut wire = [0u8; 4];
    assert_eq!(buffer.drain(&mut wire, false), 4);
    assert_eq!(wire, [0x44, 0x33, 0x22, 0x11]);

    assert_eq!(buffer.read_u32(false), 0x1122_3344);
    assert_eq!(buffer.bytes_available(), 0);
}

#[test]
fn test_u16_round_trip_big_endian() {
    let mut buffer = Buffer::new(16);
    buffer.write_u16_be(0xABCD).unwrap();

    let mut wire = [0u8; 2];
    assert_eq!(buffer.drain(&mut wire, false), 2);
    assert_eq!(wire, [0xAB, 0xCD]);

    assert_eq!(buffer.read_u16_be(false), 0xABCD);
    assert_eq!(buffer.bytes_available(), 0);
}

#[test]
fn test_all_widths_round_trip() {
    let mut buffer = Buffer::new(64);
    buffer.write_u8(0xFE).unwrap();
    buffer.write_u16(0xBEEF).unwrap();
    buffer.write_u16_be(0xBEEF).unwrap();
    buffer.write_u32(0xDEAD_BEEF).unwrap();
    buffer.write_u32_be(0xDEAD_BEEF).unwrap();
    assert_eq!(buffer.bytes_available(), 13);

    assert_eq!(buffer.read_u8(false), 0xFE);
    assert_eq!(buffer.read_u16(false), 0xBEEF);
    assert_eq!(buffer.read_u16_be(false), 0xBEEF);
    assert_eq!(buffer.read_u32(false), 0xDEAD_BEEF);
    assert_eq!(buffer.read_u32_be(false), 0xDEAD_BEEF);
    assert_eq!(buffer.bytes_available(), 0);
}

#[test]
fn test_write_str_wire_form() {
    let mut buffer = Buffer::new(16);
    buffer.write_str("hello").unwrap();

    assert_eq!(buffer.read_u8(false), 5);
    assert_eq!(buffer.read(5, true).unwrap(), b"hello");
}

#[test]
fn test_write_str_rejects_256_bytes() {
    let mut buffer = Buffer::new(1024);
    buffer.write_u8(42).unwrap();

    assert!(buffer.write_str(vec![b'a'; 256]).is_err());

    // Only the byte written before is observable
    assert_eq!(buffer.bytes_available(), 1);
    assert_eq!(buffer.read_u8(false), 42);
    assert_eq!(buffer.try_read_u8(false).unwrap_err(), RingError::InsufficientData {
        requested: 1,
        available: 0
    });
}

#[test]
fn test_peek_then_consume() {
    let mut buffer = Buffer::new(16);
    buffer.write(b"abcdefgh").unwrap();

    let peeked = buffer.read(4, false).unwrap();
    assert_eq!(buffer.bytes_available(), 8);

    let consumed = buffer.read(4, true).unwrap();
    assert_eq!(peeked, consumed);
    assert_eq!(consumed, b"abcd");
    assert_eq!(buffer.bytes_available(), 4);
}

#[test]
fn test_peek_is_idempotent() {
    let mut buffer = Buffer::new(16);
    buffer.write(&[1, 2, 3, 4, 5]).unwrap();
    let top = buffer.ring().top();

    let first = buffer.read(3, false).unwrap();
    let second = buffer.read(3, false).unwrap();
    assert_eq!(first, second);
    assert_eq!(buffer.bytes_available(), 5);
    assert_eq!(buffer.ring().top(), top);
}

#[test]
fn test_read_line_then_eof() {
    let mut buffer = Buffer::new(16);
    buffer.write(b"abc\n").unwrap();

    let mut line = [0u8; 16];
    assert_eq!(buffer.read_line(&mut line), Some(&b"abc"[..]));
    assert_eq!(line[3], 0);
    assert_eq!(buffer.read_line(&mut line), None);
    assert!(buffer.eof());
}

#[test]
fn test_read_line_last_line_without_newline() {
    let mut buffer = Buffer::new(16);
    buffer.write(b"one\ntwo").unwrap();

    let mut line = [0u8; 16];
    assert_eq!(buffer.read_line(&mut line), Some(&b"one"[..]));
    assert_eq!(buffer.read_line(&mut line), Some(&b"two"[..]));
    assert_eq!(buffer.read_line(&mut line), None);
}

#[test]
fn test_level_tracks_totals() {
    let mut buffer = Buffer::new(16);
    let mut sink = [0u8; 7];

    for round in 0..10u8 {
        assert_eq!(buffer.fill(&[round; 9]), 9);
        assert_eq!(buffer.drain(&mut sink, true), 7);
        assert_eq!(buffer.skip(2), 2);

        let level = buffer.total_written() - buffer.total_read();
        assert_eq!(buffer.bytes_available() as u64, level);
        assert!(buffer.bytes_available() <= buffer.capacity());
    }
}

#[test]
fn test_fill_without_sink_is_partial() {
    let mut buffer = Buffer::new(16);
    assert_eq!(buffer.fill(&[0u8; 20]), 16);
    assert_eq!(buffer.fill(b"more"), 0);
    assert_eq!(buffer.space_available(), 0);
}

/// Source that refuses every request and counts how often it was asked.
#[derive(Default)]
struct Refusing {
    fill_calls: usize,
}

impl Hook for Refusing {
    fn fill_request(&mut self, _ring: &mut Ring<'_>, _min: usize, _max: usize, inquiry: bool) -> bool {
        if !inquiry {
            self.fill_calls += 1;
        }
        false
    }
}

#[test]
fn test_refused_fill_is_reported_as_short_read() {
    let mut buffer = Buffer::with_hook(16, Refusing::default());
    buffer.write(b"ab").unwrap();

    let mut out = [0u8; 4];
    assert_eq!(buffer.drain(&mut out, true), 2);
    assert_eq!(&out[..2], b"ab");
    assert_eq!(buffer.hook().fill_calls, 1);
    assert!(buffer.eof());

    buffer.write(b"ab").unwrap();
    assert_eq!(
        buffer.read(4, true).unwrap_err(),
        RingError::InsufficientData {
            requested: 4,
            available: 2
        }
    );
    // Inquiry failed before anything was consumed
    assert_eq!(buffer.bytes_available(), 2);
}

#[test]
fn test_borrowed_hook() {
    let mut hook = Refusing::default();
    {
        let mut buffer = Buffer::with_hook(16, &mut hook);
        assert_eq!(buffer.read_u8(false), 0);
    }
    assert_eq!(hook.fill_calls, 1);
}

#[test]
fn test_boxed_hook() {
    let hook: Box<dyn Hook> = Box::new(Refusing::default());
    let mut buffer = Buffer::with_hook(16, hook);
    assert!(buffer.try_read_u32(true).is_err());
    assert!(buffer.eof());
}

#[test]
fn test_borrowed_storage_keeps_data_after_drop() {
    let mut backing = [0u8; 32];
    backing[..3].copy_from_slice(b"xyz");
    {
        let mut buffer = Buffer::from_slice(&mut backing, 3).unwrap();
        assert!(!buffer.is_owned());
        assert_eq!(buffer.read(3, true).unwrap(), b"xyz");
        buffer.write(b"kept").unwrap();
    }
    assert_eq!(&backing[3..7], b"kept");
}

#[test]
fn test_adopted_vec() {
    let mut buffer = Buffer::from_vec(b"preloaded".to_vec(), 9).unwrap();
    assert!(buffer.is_owned());
    assert_eq!(buffer.capacity(), 16);
    assert_eq!(buffer.read(9, true).unwrap(), b"preloaded");
}

#[test]
fn test_embedded_io_traits() {
    use embedded_io::{Read, Write};

    let mut buffer = Buffer::new(16);
    buffer.write_all(b"embedded").unwrap();
    let mut out = [0u8; 8];
    buffer.read_exact(&mut out).unwrap();
    assert_eq!(&out, b"embedded");

    assert_eq!(Read::read(&mut buffer, &mut out).unwrap(), 0);
}
