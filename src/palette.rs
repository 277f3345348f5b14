//! Palette tables for the CI4/CI8 codecs.
//!
//! Entries are kept as raw RGBA16 byte pairs, exactly as they are stored in
//! texture memory; they are only decoded for display or nearest-color search.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::codec::Codec;
use crate::color::Color;
use crate::scale::rgba16_color;

/// What an indexed encode does with a new color once every palette slot is taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaletteOverflow {
    /// Use index 0.
    #[default]
    FirstEntry,
    /// Use the entry whose decoded color is closest (squared ARGB distance).
    Nearest,
    /// Stop and return [`crate::TexelError::PaletteExhausted`].
    Fail,
}

/// Ordered table of unique raw RGBA16 entries with a fixed capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    capacity: usize,
    entries: Vec<[u8; 2]>,
    lookup: BTreeMap<[u8; 2], u8>,
}

impl Palette {
    /// An empty palette. `capacity` is clamped to 256, the largest index a
    /// texel can hold.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(256);
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
            lookup: BTreeMap::new(),
        }
    }

    /// An empty palette sized for `codec`, or `None` for direct-color codecs.
    pub fn for_codec(codec: Codec) -> Option<Self> {
        codec.palette_entries().map(Self::new)
    }

    /// Load raw pairs from a palette buffer. Duplicate pairs are skipped, an odd
    /// trailing byte is ignored, and loading stops once the palette is full.
    pub fn from_bytes(bytes: &[u8], capacity: usize) -> Self {
        let mut palette = Self::new(capacity);
        for pair in bytes.chunks_exact(2) {
            if palette.is_full() {
                break;
            }
            palette.insert([pair[0], pair[1]]);
        }
        palette
    }

    /// Copy of this palette with a different capacity, keeping the first
    /// `capacity` entries in order.
    pub fn resized(&self, capacity: usize) -> Self {
        let mut palette = Self::new(capacity);
        for &entry in self.entries.iter().take(palette.capacity) {
            palette.insert(entry);
        }
        palette
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn entries(&self) -> &[[u8; 2]] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<[u8; 2]> {
        self.entries.get(index).copied()
    }

    pub fn index_of(&self, entry: [u8; 2]) -> Option<u8> {
        self.lookup.get(&entry).copied()
    }

    /// Index of `entry`, appending it if new. `None` when it is new and the
    /// palette is full.
    pub fn insert(&mut self, entry: [u8; 2]) -> Option<u8> {
        if let Some(index) = self.index_of(entry) {
            return Some(index);
        }
        if self.is_full() {
            return None;
        }
        let index = self.entries.len() as u8;
        self.entries.push(entry);
        self.lookup.insert(entry, index);
        Some(index)
    }

    /// Index of the entry that decodes closest to `entry`. Ties go to the
    /// lower index. `None` only for an empty palette.
    pub fn nearest(&self, entry: [u8; 2]) -> Option<u8> {
        let target = rgba16_color(entry[0], entry[1]);
        self.entries
            .iter()
            .enumerate()
            .min_by_key(|&(i, e)| (distance(target, rgba16_color(e[0], e[1])), i))
            .map(|(i, _)| i as u8)
    }

    /// Palette buffer of exactly `capacity * 2` bytes; unused slots are zero.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.capacity * 2);
        for entry in &self.entries {
            out.extend_from_slice(entry);
        }
        out.resize(self.capacity * 2, 0);
        out
    }
}

fn distance(a: Color, b: Color) -> u32 {
    let d = |x: u8, y: u8| u32::from(x.abs_diff(y)).pow(2);
    d(a.a, b.a) + d(a.r, b.r) + d(a.g, b.g) + d(a.b, b.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_unique() {
        let mut p = Palette::new(4);
        assert_eq!(p.insert([1, 2]), Some(0));
        assert_eq!(p.insert([3, 4]), Some(1));
        assert_eq!(p.insert([1, 2]), Some(0));
        assert_eq!(p.len(), 2);
        assert_eq!(p.index_of([3, 4]), Some(1));
        assert_eq!(p.index_of([9, 9]), None);
    }

    #[test]
    fn full_palette_rejects_new_entries() {
        let mut p = Palette::new(2);
        p.insert([0, 1]);
        p.insert([0, 3]);
        assert!(p.is_full());
        assert_eq!(p.insert([0, 5]), None);
        assert_eq!(p.insert([0, 3]), Some(1));
    }

    #[test]
    fn nearest_entry() {
        let mut p = Palette::new(16);
        p.insert([0x00, 0x01]); // opaque black
        p.insert([0xf8, 0x01]); // opaque red
        p.insert([0xff, 0xff]); // opaque white
        // dark-ish red
        assert_eq!(p.nearest([0xc0, 0x01]), Some(1));
        assert_eq!(p.nearest([0x08, 0x41]), Some(0));
        assert_eq!(Palette::new(16).nearest([0, 0]), None);
    }

    #[test]
    fn bytes_are_padded_to_capacity() {
        let mut p = Palette::for_codec(Codec::Ci4).unwrap();
        p.insert([0xab, 0xcd]);
        let bytes = p.to_bytes();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[..4], &[0xab, 0xcd, 0, 0]);
        assert!(Palette::for_codec(Codec::Rgba16).is_none());
    }

    #[test]
    fn load_skips_duplicates_and_stops_when_full() {
        let p = Palette::from_bytes(&[1, 1, 2, 2, 1, 1, 3, 3, 4, 4, 9], 3);
        assert_eq!(p.entries(), &[[1, 1], [2, 2], [3, 3]]);
    }

    #[test]
    fn resize_keeps_leading_entries() {
        let p = Palette::from_bytes(&[1, 1, 2, 2, 3, 3], 256);
        let small = p.resized(2);
        assert_eq!(small.capacity(), 2);
        assert_eq!(small.entries(), &[[1, 1], [2, 2]]);
        assert_eq!(p.resized(16).entries(), p.entries());
    }
}
