//! Property tests: wraparound, capacity invariant, peek idempotence

use proptest::prelude::*;
use ringio::{Buffer, Ring};

proptest! {
    #[test]
    fn prop_chunked_stream_survives_wraparound(
        capacity in 16usize..64,
        chunks in prop::collection::vec(1usize..40, 1..60),
        seed in any::<u8>(),
    ) {
        let mut buffer = Buffer::new(capacity);
        let total: usize = chunks.iter().sum();
        let source: Vec<u8> = (0..total).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect();

        let mut sent = 0;
        let mut received = Vec::with_capacity(total);
        let mut out = vec![0u8; 64];
        for chunk in &chunks {
            let end = (sent + chunk).min(total);
            sent += buffer.fill(&source[sent..end]);

            // Consume a different amount than was written to move top and bottom apart
            let take = (chunk / 2 + 1).min(out.len());
            let n = buffer.drain(&mut out[..take], true);
            received.extend_from_slice(&out[..n]);

            let ring = buffer.ring();
            prop_assert!(ring.bytes_available() <= ring.capacity());
            prop_assert!(ring.top() < ring.capacity());
            prop_assert!(ring.bottom() < ring.capacity());
            prop_assert_eq!(
                ring.top(),
                (ring.bottom() + ring.capacity() - ring.bytes_available()) % ring.capacity()
            );
            prop_assert_eq!(
                buffer.bytes_available() as u64,
                buffer.total_written() - buffer.total_read()
            );
        }
        while buffer.bytes_available() > 0 {
            let n = buffer.drain(&mut out, true);
            received.extend_from_slice(&out[..n]);
        }

        prop_assert_eq!(&received[..], &source[..sent]);
    }

    #[test]
    fn prop_peek_is_idempotent(
        prefix in 0usize..16,
        data in prop::collection::vec(any::<u8>(), 1..16),
        len in 1usize..16,
    ) {
        let mut buffer = Buffer::new(16);
        // Move the offsets so the peeked span may cross the wrap point
        buffer.fill(&vec![0u8; prefix]);
        buffer.skip(prefix);
        buffer.fill(&data);

        let level = buffer.bytes_available();
        let top = buffer.ring().top();

        let mut first = vec![0u8; len];
        let mut second = vec![0u8; len];
        let n1 = buffer.drain(&mut first, false);
        let n2 = buffer.drain(&mut second, false);

        prop_assert_eq!(n1, n2);
        prop_assert_eq!(first, second);
        prop_assert_eq!(buffer.bytes_available(), level);
        prop_assert_eq!(buffer.ring().top(), top);
        if len <= data.len() {
            prop_assert_eq!(n1, len);
        } else {
            prop_assert_eq!(n1, 0);
        }
    }

    #[test]
    fn prop_integers_round_trip(a in any::<u8>(), b in any::<u16>(), c in any::<u32>()) {
        let mut buffer = Buffer::new(16);
        buffer.write_u8(a).unwrap();
        buffer.write_u16(b).unwrap();
        buffer.write_u16_be(b).unwrap();
        buffer.write_u32(c).unwrap();
        buffer.write_u32_be(c).unwrap();

        prop_assert_eq!(buffer.read_u8(false), a);
        prop_assert_eq!(buffer.read_u16(false), b);
        prop_assert_eq!(buffer.read_u16_be(false), b);
        prop_assert_eq!(buffer.read_u32(false), c);
        prop_assert_eq!(buffer.read_u32_be(false), c);
        prop_assert_eq!(buffer.bytes_available(), 0);
    }

    #[test]
    fn prop_ring_fill_drain_counts(ops in prop::collection::vec((any::<bool>(), 0usize..24), 1..80)) {
        let mut ring = Ring::new(16);
        let mut expected = 0usize;
        let mut scratch = [0u8; 24];
        for (is_fill, n) in ops {
            if is_fill {
                let written = ring.fill(&scratch[..n]);
                prop_assert_eq!(written, n.min(16 - expected));
                expected += written;
            } else {
                let read = ring.drain(&mut scratch[..n]);
                prop_assert_eq!(read, n.min(expected));
                expected -= read;
            }
            prop_assert_eq!(ring.bytes_available(), expected);
        }
    }
}
