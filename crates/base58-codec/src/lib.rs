//! # base58-codec
//!
//! Base58 conversion between raw bytes and text, preserving leading zero
//! bytes exactly.
//!
//! Base58 is the positional alphabet used for human-transcribed identifiers
//! such as cryptocurrency addresses: 58 printable characters with the
//! visually ambiguous glyphs (`0`, `O`, `I`, `l`) removed. Leading `0x00`
//! bytes carry meaning in fixed-width identifier formats despite having no
//! numeric magnitude, so the codec counts them separately and round-trips
//! them losslessly as leading `'1'` characters.
//!
//! ## API
//!
//! - [`encode`] / [`decode`] — allocating convenience wrappers
//! - [`encode_into`] / [`decode_into`] — caller-supplied buffers for
//!   allocation-averse callers; `encode_into` reports the exact size needed
//!   when the buffer is too small, so one buffer can be grown once and reused
//! - [`is_valid`] / [`find_invalid_char`] — O(n) character pre-validation,
//!   useful for rejecting garbage before the O(n²) decode
//!
//! Both conversions are pure and touch only per-call scratch state; the two
//! constant tables are safe for unsynchronized concurrent reads.
//!
//! ## Example
//!
//! ```rust
//! use base58_codec::{decode, encode};
//!
//! let text = encode(b"Hello World!");
//! assert_eq!(text, "2NEpo7TZRRrLZSi2U");
//! assert_eq!(decode(&text).unwrap(), b"Hello World!");
//!
//! // Leading zero bytes survive the round trip verbatim.
//! assert_eq!(encode(&[0x00, 0x00, 0x01]), "112");
//! assert_eq!(decode("112").unwrap(), [0x00, 0x00, 0x01]);
//! ```

pub mod alphabet;
pub mod decode;
pub mod encode;

// Re-export main API
pub use alphabet::{find_invalid_char, is_valid, ALPHABET};
pub use decode::{decode, decode_into, DecodeError};
pub use encode::{encode, encode_into, max_encoded_len, EncodeError};
