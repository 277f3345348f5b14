//! Single-texel decoders, one per codec.
//!
//! Each reads the texel at `offset` in `data` and returns `None` when the
//! bytes it needs lie past the end of `data`. Palette codecs look their entry
//! up at `2 * index` in `palette`; palette bytes that are missing read as zero,
//! so an empty palette yields transparent black rather than a short read.
//!
//! `nibble` selects the high (0) or low (1) half of a byte, and `bit` selects
//! bit `7 - bit`. Only the low one or three bits of the selector are used.

use crate::codec::IntensityAlphaMode;
use crate::color::Color;
use crate::scale::{rgba16_color, scale_3_8, scale_4_8};

#[inline]
fn byte(data: &[u8], offset: usize) -> Option<u8> {
    data.get(offset).copied()
}

#[inline]
fn bytes<const N: usize>(data: &[u8], offset: usize) -> Option<[u8; N]> {
    let end = offset.checked_add(N)?;
    data.get(offset..end)?.try_into().ok()
}

#[inline]
fn nibble_of(value: u8, nibble: usize) -> u8 {
    let shift = (1 - (nibble & 1)) * 4;
    (value >> shift) & 0x0f
}

fn palette_color(palette: &[u8], index: u8) -> Color {
    let at = 2 * usize::from(index);
    rgba16_color(
        palette.get(at).copied().unwrap_or(0),
        palette.get(at + 1).copied().unwrap_or(0),
    )
}

pub fn rgba16(data: &[u8], offset: usize) -> Option<Color> {
    let [c0, c1] = bytes::<2>(data, offset)?;
    Some(rgba16_color(c0, c1))
}

pub fn rgba32(data: &[u8], offset: usize) -> Option<Color> {
    let [r, g, b, a] = bytes::<4>(data, offset)?;
    Some(Color::from_argb(a, r, g, b))
}

pub fn ia16(data: &[u8], offset: usize) -> Option<Color> {
    let [i, a] = bytes::<2>(data, offset)?;
    Some(Color::gray(i, a))
}

pub fn ia8(data: &[u8], offset: usize) -> Option<Color> {
    let c = byte(data, offset)?;
    Some(Color::gray(scale_4_8(c >> 4), scale_4_8(c & 0x0f)))
}

/// Three bits of intensity over one bit of alpha.
pub fn ia4(data: &[u8], offset: usize, nibble: usize) -> Option<Color> {
    let v = nibble_of(byte(data, offset)?, nibble);
    let a = if v & 0x1 != 0 { 0xff } else { 0 };
    Some(Color::gray(scale_3_8(v >> 1), a))
}

pub fn i8(data: &[u8], offset: usize, mode: IntensityAlphaMode) -> Option<Color> {
    let i = byte(data, offset)?;
    Some(Color::gray(i, mode.alpha(i)))
}

pub fn i4(data: &[u8], offset: usize, nibble: usize, mode: IntensityAlphaMode) -> Option<Color> {
    let i = scale_4_8(nibble_of(byte(data, offset)?, nibble));
    Some(Color::gray(i, mode.alpha(i)))
}

pub fn ci8(data: &[u8], palette: &[u8], offset: usize) -> Option<Color> {
    Some(palette_color(palette, byte(data, offset)?))
}

pub fn ci4(data: &[u8], palette: &[u8], offset: usize, nibble: usize) -> Option<Color> {
    let index = nibble_of(byte(data, offset)?, nibble);
    Some(palette_color(palette, index))
}

/// Set bits are opaque white, clear bits transparent black.
pub fn one_bpp(data: &[u8], offset: usize, bit: usize) -> Option<Color> {
    let on = (byte(data, offset)? >> (7 - (bit & 7))) & 0x1 != 0;
    Some(if on { Color::WHITE } else { Color::TRANSPARENT })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba16_pure_red() {
        assert_eq!(
            rgba16(&[0xf8, 0x01], 0),
            Some(Color::from_argb(255, 255, 0, 0))
        );
        assert_eq!(rgba16(&[0xf8], 0), None);
    }

    #[test]
    fn rgba32_is_unscaled() {
        let data = [0, 10, 20, 30, 40];
        assert_eq!(rgba32(&data, 1), Some(Color::from_argb(40, 10, 20, 30)));
        assert_eq!(rgba32(&data, 2), None);
    }

    #[test]
    fn ia_formats() {
        assert_eq!(ia16(&[0x7f, 0x20], 0), Some(Color::gray(0x7f, 0x20)));
        assert_eq!(ia8(&[0xb3], 0), Some(Color::gray(187, 51)));
        // 0b1111_0100: high texel i=7 a=1, low texel i=2 a=0
        assert_eq!(ia4(&[0xf4], 0, 0), Some(Color::gray(255, 255)));
        assert_eq!(ia4(&[0xf4], 0, 1), Some(Color::gray(72, 0)));
    }

    #[test]
    fn i8_alpha_modes() {
        use IntensityAlphaMode::*;
        assert_eq!(i8(&[0], 0, Binary).unwrap().a, 0);
        assert_eq!(i8(&[1], 0, Binary).unwrap().a, 255);
        assert_eq!(i8(&[0], 0, Full).unwrap().a, 255);
        assert_eq!(i8(&[90], 0, Full).unwrap().a, 255);
        assert_eq!(i8(&[90], 0, CopyIntensity), Some(Color::gray(90, 90)));
    }

    #[test]
    fn i4_nibbles() {
        use IntensityAlphaMode::*;
        assert_eq!(i4(&[0x1f], 0, 0, CopyIntensity), Some(Color::gray(17, 17)));
        assert_eq!(i4(&[0x1f], 0, 1, Binary), Some(Color::gray(255, 255)));
        assert_eq!(i4(&[0x0f], 0, 0, Binary), Some(Color::gray(0, 0)));
    }

    #[test]
    fn palette_lookup() {
        let palette = [0x00, 0x00, 0xf8, 0x01, 0x07, 0xc1];
        assert_eq!(
            ci8(&[1], &palette, 0),
            Some(Color::from_argb(255, 255, 0, 0))
        );
        assert_eq!(
            ci4(&[0x21], &palette, 0, 0),
            Some(Color::from_argb(255, 0, 255, 0))
        );
        assert_eq!(ci4(&[0x21], &palette, 0, 1), ci8(&[1], &palette, 0));
        // index past the palette buffer reads zeros
        assert_eq!(ci8(&[200], &palette, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn one_bit_texels() {
        let data = [0b1000_0000];
        assert_eq!(one_bpp(&data, 0, 0), Some(Color::WHITE));
        assert_eq!(one_bpp(&data, 0, 1), Some(Color::TRANSPARENT));
        assert_eq!(one_bpp(&[0x01], 0, 7), Some(Color::WHITE));
    }
}
