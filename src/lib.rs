//! # n64texels
//!
//! Decoder and encoder for Nintendo 64 texel formats.
//!
//! Raw texture memory is a flat byte buffer; this crate turns any window of it
//! into an RGBA [`Bitmap`] and packs bitmaps back into texel bytes, building the
//! palette on the fly for indexed formats.
//!
//! ## Supported Codecs
//!
//! | Codec | Bits | Layout |
//! |---|---|---|
//! | RGBA16 | 16 | 5/5/5/1 big-endian pair |
//! | RGBA32 | 32 | R, G, B, A bytes |
//! | IA16 | 16 | intensity byte, alpha byte |
//! | IA8 | 8 | 4-bit intensity, 4-bit alpha |
//! | IA4 | 4 | 3-bit intensity, 1-bit alpha |
//! | I8 | 8 | intensity |
//! | I4 | 4 | intensity |
//! | CI8 | 8 | index into 256 RGBA16 palette entries |
//! | CI4 | 4 | index into 16 RGBA16 palette entries |
//! | 1BPP | 1 | on = opaque white, off = transparent black |
//!
//! Sub-byte texels are packed most significant first: the first of two 4-bit
//! texels is the high nibble, the first of eight 1-bit texels is bit 7.
//!
//! ## Short Reads
//!
//! Region decode never fails on short data. Texels whose bytes lie past the end
//! of the buffer are simply left blank, so a window that hangs off the end of a
//! ROM still renders everything that is there.
//!
//! ## Non-Goals
//!
//! - ROM layouts, asset tables or any other container parsing
//! - Compressed texture data
//! - Rendering beyond producing RGBA bitmaps
//!
//! ## Usage
//!
//! ```
//! use n64texels::{Codec, IntensityAlphaMode, decode_region, encode};
//!
//! let rom: &[u8] = &[0xf8, 0x01, 0x07, 0xc1]; // red, green
//!
//! let bitmap = decode_region(rom, &[], 0, 2, 1, Codec::Rgba16, IntensityAlphaMode::Full);
//! assert_eq!(bitmap.get(0, 0).r, 255);
//!
//! let packed = encode(&bitmap, Codec::Ci4);
//! assert_eq!(packed.data(), &[0x01]);
//! assert_eq!(packed.palette().unwrap().len(), 2);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bitmap;
mod codec;
mod color;
mod decode;
mod encode;
mod error;
mod limits;
mod palette;
mod scale;

pub mod texel;
pub mod view;

// Re-exports
pub use bitmap::Bitmap;
pub use codec::{Codec, IntensityAlphaMode, Packing, TexelLocation};
pub use color::Color;
pub use decode::{DecodeRequest, decode_region, decode_region_into, decode_texel};
pub use encode::{EncodeOutput, EncodeRequest, encode};
pub use enough::{Stop, Unstoppable};
pub use error::TexelError;
pub use limits::Limits;
pub use palette::{Palette, PaletteOverflow};
pub use scale::{rgba16_bytes, rgba16_color};
