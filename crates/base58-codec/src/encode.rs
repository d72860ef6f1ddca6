//! Base58 encoding: raw bytes to text.
//!
//! The encoder runs the conversion in the opposite direction: each input
//! byte multiplies the accumulated value by 256 and adds itself, with the
//! scratch buffer holding one base-58 digit per byte, most significant
//! first. A high-water mark bounds each carry sweep to the digits already
//! touched, keeping the whole conversion at O(n²) instead of O(n³).

use thiserror::Error;

use crate::alphabet::ALPHABET;

/// Error from [`encode_into`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The output buffer cannot hold the encoded string. Recoverable:
    /// `required` is the exact length that succeeds on retry.
    #[error("output buffer too small, {required} bytes required")]
    BufferTooSmall {
        /// Exact buffer length needed for this input.
        required: usize,
    },
}

/// Worst-case encoded length for `len` input bytes.
///
/// Base58 expands binary by log 256 / log 58 ≈ 1.37; the 138/100 ratio is a
/// safe integer over-approximation. Zero bytes map 1:1 to `'1'` characters,
/// so the all-magnitude input is the upper bound.
#[inline]
pub fn max_encoded_len(len: usize) -> usize {
    len * 138 / 100 + 1
}

/// Encode `input` into `output`, returning the number of bytes written.
///
/// If `output` is too small the call fails with the exact length needed, so
/// a caller reusing one buffer can grow it once and retry.
///
/// # Example
///
/// ```
/// use base58_codec::{encode_into, EncodeError};
///
/// let mut buf = [0u8; 4];
/// let EncodeError::BufferTooSmall { required } =
///     encode_into(b"Hello World!", &mut buf).unwrap_err();
///
/// let mut buf = vec![0u8; required];
/// let written = encode_into(b"Hello World!", &mut buf).unwrap();
/// assert_eq!(&buf[..written], b"2NEpo7TZRRrLZSi2U");
/// ```
pub fn encode_into(input: &[u8], output: &mut [u8]) -> Result<usize, EncodeError> {
    // Leading zero bytes map 1:1 to '1' characters, preserved verbatim.
    let zcount = input.iter().take_while(|&&b| b == 0).count();

    // Scratch buffer of base-58 digit values, most significant first.
    let size = (input.len() - zcount) * 138 / 100 + 1;
    let mut digits = vec![0u8; size];

    // value = value * 256 + byte. `high` is the index one above the most
    // significant digit touched so far; every sweep walks at least that
    // far and keeps going only while carry remains.
    let mut high = size - 1;
    for &byte in &input[zcount..] {
        let mut carry = u32::from(byte);
        let mut j = size - 1;
        while j > high || carry != 0 {
            carry += 256 * u32::from(digits[j]);
            digits[j] = (carry % 58) as u8;
            carry /= 58;
            if j == 0 {
                break;
            }
            j -= 1;
        }
        high = j;
    }

    // Digits that never received a nonzero carry are not part of the value.
    let first = digits.iter().position(|&d| d != 0).unwrap_or(size);

    let required = zcount + (size - first);
    if output.len() < required {
        return Err(EncodeError::BufferTooSmall { required });
    }

    output[..zcount].fill(b'1');
    for (out, &d) in output[zcount..required].iter_mut().zip(&digits[first..]) {
        *out = ALPHABET[d as usize];
    }
    Ok(required)
}

/// Encode `input` to a `String`.
///
/// Infallible: every byte value is legal as magnitude, and the buffer is
/// sized for the worst case up front. The retry arm keeps the sizing
/// contract honest rather than assuming the bound.
pub fn encode(input: &[u8]) -> String {
    let mut buf = vec![0u8; max_encoded_len(input.len())];
    loop {
        match encode_into(input, &mut buf) {
            Ok(written) => {
                return buf[..written].iter().map(|&b| char::from(b)).collect();
            }
            Err(EncodeError::BufferTooSmall { required }) => buf.resize(required, 0),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
