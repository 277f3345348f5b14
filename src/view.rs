//! Viewer-side state for browsing raw data as textures.
//!
//! [`TextureView`] holds the bytes being inspected and the [`ViewSettings`]
//! used to interpret them. Every setter notifies subscribers with the new
//! settings, which is how a renderer learns it has to redraw.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::bitmap::Bitmap;
use crate::codec::{Codec, IntensityAlphaMode};
use crate::color::Color;
use crate::decode::decode_region_into;
use crate::error::TexelError;

/// How a [`TextureView`] interprets and paints its buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewSettings {
    pub codec: Codec,
    pub mode: IntensityAlphaMode,
    /// Byte offset of the first texel.
    pub offset: usize,
    /// Screen pixels per texel edge.
    pub scale: u32,
    /// Painted under translucent texels and wherever the data runs out.
    pub background: Color,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            codec: Codec::Ia8,
            mode: IntensityAlphaMode::CopyIntensity,
            offset: 0,
            scale: 5,
            background: Color::WHITE,
        }
    }
}

/// Handle returned by [`TextureView::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ViewSettings) + Send>;

/// A byte buffer plus the settings to view it with.
pub struct TextureView {
    buffer: Vec<u8>,
    palette: Vec<u8>,
    settings: ViewSettings,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Default for TextureView {
    fn default() -> Self {
        Self::new(ViewSettings::default())
    }
}

impl core::fmt::Debug for TextureView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TextureView")
            .field("buffer_len", &self.buffer.len())
            .field("palette_len", &self.palette.len())
            .field("settings", &self.settings)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl TextureView {
    pub fn new(settings: ViewSettings) -> Self {
        Self {
            buffer: Vec::new(),
            palette: Vec::new(),
            settings,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Call `listener` after every settings or buffer change.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&ViewSettings) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether `id` was subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(i, _)| *i != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let settings = self.settings;
        for (_, listener) in &mut self.listeners {
            listener(&settings);
        }
    }

    /// Replace the inspected data. The offset resets to 0.
    pub fn set_buffer(&mut self, buffer: Vec<u8>) {
        self.buffer = buffer;
        self.settings.offset = 0;
        self.notify();
    }

    /// Palette bytes used for CI4/CI8.
    pub fn set_palette(&mut self, palette: Vec<u8>) {
        self.palette = palette;
        self.notify();
    }

    pub fn set_offset(&mut self, offset: usize) {
        self.settings.offset = offset;
        self.notify();
    }

    pub fn set_scale(&mut self, scale: u32) {
        self.settings.scale = scale;
        self.notify();
    }

    pub fn set_codec(&mut self, codec: Codec) {
        self.settings.codec = codec;
        self.notify();
    }

    pub fn set_mode(&mut self, mode: IntensityAlphaMode) {
        self.settings.mode = mode;
        self.notify();
    }

    pub fn set_background(&mut self, background: Color) {
        self.settings.background = background;
        self.notify();
    }

    /// Paint a `width` x `height` texel window at the current settings.
    ///
    /// Texels are composited over the background and enlarged by `scale`, so
    /// the result is `width * scale` x `height * scale` and fully opaque.
    pub fn render(&self, width: u32, height: u32) -> Result<Bitmap, TexelError> {
        let s = &self.settings;
        let mut bitmap = Bitmap::new(width, height);
        if !self.buffer.is_empty() {
            decode_region_into(
                &mut bitmap,
                &self.buffer,
                &self.palette,
                s.offset,
                s.codec,
                s.mode,
            );
        }
        bitmap.composite_over(s.background);
        bitmap.upscale(s.scale)
    }
}
