//! Bit-depth scaling and the 5/5/5/1 RGBA16 word shared by RGBA16, CI4 and CI8.

use crate::color::Color;

#[inline]
pub(crate) fn scale_5_8(v: u8) -> u8 {
    (u16::from(v) * 0xff / 0x1f) as u8
}

#[inline]
pub(crate) fn scale_8_5(v: u8) -> u8 {
    ((u16::from(v) + 4) * 0x1f / 0xff) as u8
}

#[inline]
pub(crate) fn scale_4_8(v: u8) -> u8 {
    v * 0x11
}

#[inline]
pub(crate) fn scale_8_4(v: u8) -> u8 {
    v / 0x11
}

#[inline]
pub(crate) fn scale_3_8(v: u8) -> u8 {
    (u16::from(v) * 0xff / 0x07) as u8
}

#[inline]
pub(crate) fn scale_8_3(v: u8) -> u8 {
    v / 0x24
}

#[inline]
pub(crate) fn alpha_bit(a: u8) -> u8 {
    u8::from(a > 0)
}

/// Decode a big-endian RGBA16 pair: `RRRRRGGG GGBBBBBA`.
pub fn rgba16_color(c0: u8, c1: u8) -> Color {
    let r = scale_5_8((c0 & 0xf8) >> 3);
    let g = scale_5_8(((c0 & 0x07) << 2) | ((c1 & 0xc0) >> 6));
    let b = scale_5_8((c1 & 0x3e) >> 1);
    let a = if c1 & 0x01 != 0 { 0xff } else { 0 };
    Color::from_argb(a, r, g, b)
}

/// Encode to a big-endian RGBA16 pair. Alpha collapses to one bit (`> 0`).
pub fn rgba16_bytes(c: Color) -> [u8; 2] {
    let r = scale_8_5(c.r);
    let g = scale_8_5(c.g);
    let b = scale_8_5(c.b);
    [(r << 3) | (g >> 2), ((g & 0x3) << 6) | (b << 1) | alpha_bit(c.a)]
}
