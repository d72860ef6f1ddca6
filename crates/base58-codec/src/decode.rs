//! Base58 decoding: text to raw bytes.
//!
//! The decoder is a big-integer base conversion over fixed-width chunks:
//! for each digit `d`, `value = value * 58 + d` across a big-endian sequence
//! of u32 chunks sized from the destination capacity, with the carry held in
//! a u64 so the multiply-accumulate cannot overflow. Leading `'1'` characters
//! carry no magnitude; they are counted separately and restored as `0x00`
//! bytes after the conversion.

use thiserror::Error;

use crate::alphabet::digit_of;

/// Bits per accumulator chunk.
const CHUNK_BITS: u32 = 32;

/// Error from [`decode`] / [`decode_into`].
///
/// Every failure is terminal: a failed call leaves no usable bytes in the
/// destination, and callers must not inspect the output buffer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Input contains a byte outside the Base58 alphabet (including any
    /// non-ASCII byte).
    #[error("invalid base58 character {byte:#04x} at index {index}")]
    InvalidCharacter {
        /// The offending input byte.
        byte: u8,
        /// Byte offset of the offending character.
        index: usize,
    },
    /// The decoded magnitude does not fit in the destination buffer.
    #[error("decoded value overflows the destination buffer")]
    Overflow,
    /// The leading `'1'` count is incompatible with the decoded magnitude:
    /// the zero prefix and the value together exceed the destination.
    #[error("leading zero prefix does not fit alongside the decoded value")]
    InconsistentZeroPrefix,
}

/// Decode `input` into `output`, returning the number of bytes written.
///
/// `output.len()` bounds the decoded value; the returned length may be
/// smaller, since the buffer is sized for the worst case rather than the
/// exact case. On success the decoded bytes occupy `output[..written]`.
///
/// A zero-length `output` is rejected immediately with
/// [`DecodeError::Overflow`].
pub fn decode_into(input: &str, output: &mut [u8]) -> Result<usize, DecodeError> {
    let capacity = output.len();
    if capacity == 0 {
        return Err(DecodeError::Overflow);
    }

    let bytes = input.as_bytes();

    // Leading '1' characters, just count them.
    let zerocount = bytes.iter().take_while(|&&c| c == b'1').count();

    // Big-endian u32 chunks covering `capacity` bytes. The top chunk may
    // cover fewer than four bytes; `zeromask` selects the bits that must
    // stay clear for the value to fit the exact byte width.
    let chunks = (capacity + 3) / 4;
    let mut acc = vec![0u32; chunks];
    let bytes_left = capacity % 4;
    let zeromask: u32 = if bytes_left > 0 {
        u32::MAX << (bytes_left as u32 * 8)
    } else {
        0
    };

    for (index, &c) in bytes.iter().enumerate().skip(zerocount) {
        let digit = match digit_of(c) {
            Some(d) => d,
            None => return Err(DecodeError::InvalidCharacter { byte: c, index }),
        };

        // value = value * 58 + digit, least-significant chunk first.
        let mut carry = u64::from(digit);
        for chunk in acc.iter_mut().rev() {
            let t = u64::from(*chunk) * 58 + carry;
            carry = t >> CHUNK_BITS;
            *chunk = t as u32;
        }
        if carry != 0 {
            // Carry past the most significant chunk.
            return Err(DecodeError::Overflow);
        }
        if acc[0] & zeromask != 0 {
            // Fits the chunk count but not the requested byte width.
            return Err(DecodeError::Overflow);
        }
    }

    // Serialize the accumulator big-endian into the output buffer.
    let mut pos = 0;
    let full_chunks_start = if bytes_left > 0 {
        for i in (0..bytes_left).rev() {
            output[pos] = (acc[0] >> (8 * i)) as u8;
            pos += 1;
        }
        1
    } else {
        0
    };
    for &chunk in &acc[full_chunks_start..] {
        output[pos..pos + 4].copy_from_slice(&chunk.to_be_bytes());
        pos += 4;
    }

    // Canonical length: zero bytes produced by the conversion are dropped
    // and replaced by the counted '1' prefix. The prefix must fit inside
    // the run of zeros the conversion actually produced.
    let skipped = output.iter().take_while(|&&b| b == 0).count();
    if zerocount > skipped {
        return Err(DecodeError::InconsistentZeroPrefix);
    }
    output.copy_within(skipped.., zerocount);
    Ok(capacity - skipped + zerocount)
}

/// Decode `input` to a freshly allocated `Vec<u8>`.
///
/// A Base58 string never decodes to more bytes than it has characters, so
/// the scratch buffer is sized from the input length and trimmed to the
/// canonical length afterwards.
pub fn decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let mut buf = vec![0u8; input.len()];
    let written = decode_into(input, &mut buf)?;
    buf.truncate(written);
    Ok(buf)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ALPHABET;
    use crate::encode::encode;

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode(""), Ok(Vec::new()));
    }

    #[test]
    fn test_decode_zero_symbols() {
        assert_eq!(decode("1"), Ok(vec![0]));
        assert_eq!(decode("111"), Ok(vec![0, 0, 0]));
    }

    #[test]
    fn test_decode_hello_world() {
        assert_eq!(decode("2NEpo7TZRRrLZSi2U"), Ok(b"Hello World!".to_vec()));
    }

    #[test]
    fn test_decode_leading_zero_prefix() {
        // Two '1's then the single-digit encoding of 1.
        assert_eq!(decode("112"), Ok(vec![0, 0, 1]));
    }

    #[test]
    fn test_decode_rejects_invalid_characters() {
        for c in ['0', 'O', 'I', 'l', '!', ' '] {
            let input = format!("ab{}", c);
            assert_eq!(
                decode(&input),
                Err(DecodeError::InvalidCharacter {
                    byte: c as u8,
                    index: 2
                }),
                "{:?} should be rejected",
                c
            );
        }
    }

    #[test]
    fn test_decode_rejects_non_ascii() {
        // 'é' encodes as 0xC3 0xA9; the high bit alone disqualifies it.
        assert_eq!(
            decode("aé"),
            Err(DecodeError::InvalidCharacter {
                byte: 0xC3,
                index: 1
            })
        );
    }

    #[test]
    fn test_decode_into_reports_canonical_length() {
        let mut buf = [0u8; 32];
        let written = decode_into("2NEpo7TZRRrLZSi2U", &mut buf).unwrap();
        assert_eq!(written, 12);
        assert_eq!(&buf[..written], b"Hello World!");
    }

    #[test]
    fn test_decode_into_exact_buffer() {
        let mut buf = [0u8; 12];
        let written = decode_into("2NEpo7TZRRrLZSi2U", &mut buf).unwrap();
        assert_eq!(&buf[..written], b"Hello World!");
    }

    #[test]
    fn test_decode_into_chunk_carry_overflow() {
        // 58^7 exceeds 2^32: the carry spills past a single-chunk accumulator.
        let mut buf = [0u8; 4];
        assert_eq!(decode_into("zzzzzzz", &mut buf), Err(DecodeError::Overflow));
    }

    #[test]
    fn test_decode_into_partial_chunk_overflow() {
        // "zzz" decodes to three bytes; a two-byte target shares the same
        // single chunk but fails the partial-width mask.
        let mut buf = [0u8; 2];
        assert_eq!(decode_into("zzz", &mut buf), Err(DecodeError::Overflow));
    }

    #[test]
    fn test_decode_into_empty_output() {
        assert_eq!(decode_into("2", &mut []), Err(DecodeError::Overflow));
    }

    #[test]
    fn test_decode_into_zero_prefix_mismatch() {
        // Three zero bytes cannot fit in a two-byte buffer.
        let mut buf = [0u8; 2];
        assert_eq!(
            decode_into("111", &mut buf),
            Err(DecodeError::InconsistentZeroPrefix)
        );

        // Two zero bytes plus one magnitude byte cannot either.
        let mut buf = [0u8; 2];
        assert_eq!(
            decode_into("11z", &mut buf),
            Err(DecodeError::InconsistentZeroPrefix)
        );
    }

    #[test]
    fn test_encode_decode_roundtrip_strings() {
        for s in ["1", "2", "z", "11z", "2NEpo7TZRRrLZSi2U", "1111111111"] {
            let bytes = decode(s).unwrap();
            assert_eq!(encode(&bytes), s, "round trip of {:?}", s);
        }
    }

    #[test]
    fn test_decode_agrees_with_bs58() {
        // Deterministic pseudo-random alphabet-only strings.
        let mut state = 0xfeed_5eedu64;
        for len in 1..=80usize {
            let mut text = String::with_capacity(len);
            for _ in 0..len {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                let idx = (state >> 56) as usize % ALPHABET.len();
                text.push(ALPHABET[idx] as char);
            }

            let ours = decode(&text).unwrap();
            let theirs = bs58::decode(&text).into_vec().unwrap();
            assert_eq!(ours, theirs, "decode mismatch on {:?}", text);
        }
    }
}
