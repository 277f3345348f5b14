use alloc::vec;
use alloc::vec::Vec;

use crate::color::Color;
use crate::error::TexelError;

/// Owned, row-major grid of [`Color`]s with fixed dimensions.
///
/// [`get`](Bitmap::get) and [`set`](Bitmap::set) panic outside
/// `[0, width) x [0, height)`; use [`get_checked`](Bitmap::get_checked) when the
/// coordinates are not already bounded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Bitmap {
    /// A bitmap with every texel [`Color::TRANSPARENT`].
    ///
    /// # Panics
    ///
    /// If `width * height` overflows `usize` or the allocation fails. Use
    /// [`crate::DecodeRequest`] to get an error instead.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    /// Panics like [`Bitmap::new`].
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let Some(len) = texel_count(width, height) else {
            panic!("{width}x{height} bitmap overflows usize");
        };
        Self {
            width,
            height,
            pixels: vec![color; len],
        }
    }

    /// Build from row-major colors. `pixels.len()` must be `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, TexelError> {
        let needed =
            texel_count(width, height).ok_or(TexelError::DimensionsTooLarge { width, height })?;
        if pixels.len() != needed {
            return Err(TexelError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from tightly packed RGBA8 bytes. Extra trailing bytes are ignored.
    pub fn from_rgba8(data: &[u8], width: u32, height: u32) -> Result<Self, TexelError> {
        let needed = texel_count(width, height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(TexelError::DimensionsTooLarge { width, height })?;
        let bytes = data.get(..needed).ok_or(TexelError::BufferTooSmall {
            needed,
            actual: data.len(),
        })?;
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| Color::from_argb(px[3], px[0], px[1], px[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Tightly packed RGBA8 bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, c.a])
            .collect()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "texel ({x}, {y}) outside {}x{} bitmap",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn get_checked(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.get(x, y))
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Composite every texel onto `background` (see [`Color::over`]).
    pub fn composite_over(&mut self, background: Color) {
        for px in &mut self.pixels {
            *px = px.over(background);
        }
    }

    /// Nearest-neighbour enlargement: each texel becomes a `factor` x `factor`
    /// block. A factor of 0 or 1 returns an unchanged copy.
    pub fn upscale(&self, factor: u32) -> Result<Bitmap, TexelError> {
        if factor <= 1 {
            return Ok(self.clone());
        }
        let (width, height) = match (
            self.width.checked_mul(factor),
            self.height.checked_mul(factor),
        ) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                return Err(TexelError::DimensionsTooLarge {
                    width: self.width,
                    height: self.height,
                });
            }
        };
        let f = factor as usize;
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in self.pixels.chunks_exact(self.width.max(1) as usize) {
            let start = pixels.len();
            for &px in row {
                pixels.extend(core::iter::repeat_n(px, f));
            }
            for _ in 1..f {
                pixels.extend_from_within(start..start + width as usize);
            }
        }
        Ok(Bitmap {
            width,
            height,
            pixels,
        })
    }

    /// Copy into an [`imgref::ImgVec`] of RGBA8 pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.pixels.iter().map(|&c| c.into()).collect(),
            self.width as usize,
            self.height as usize,
        )
    }

    /// Copy out of an [`imgref::ImgRef`] of RGBA8 pixels (stride is honored).
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, rgb::RGBA8>) -> Result<Self, TexelError> {
        let width = u32::try_from(img.width()).map_err(|_| TexelError::DimensionsTooLarge {
            width: u32::MAX,
            height: u32::try_from(img.height()).unwrap_or(u32::MAX),
        })?;
        let height = u32::try_from(img.height()).map_err(|_| TexelError::DimensionsTooLarge {
            width,
            height: u32::MAX,
        })?;
        let pixels = img.rows().flatten().map(|&px| Color::from(px)).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// `width * height`, or `None` when it does not fit in `usize`.
pub(crate) fn texel_count(width: u32, height: u32) -> Option<usize> {
    usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)
}
