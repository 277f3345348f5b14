//! Test corpus: pattern bitmaps through every codec, and region decodes over
//! arbitrary and truncated byte windows.

use enough::Unstoppable;
use n64texels::*;

fn checkerboard(w: u32, h: u32) -> Bitmap {
    let mut bm = Bitmap::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let c = if (x + y) % 2 == 0 {
                Color::WHITE
            } else {
                Color::TRANSPARENT
            };
            bm.set(x, y, c);
        }
    }
    bm
}

fn noise_bytes(len: usize) -> Vec<u8> {
    let mut state: u32 = 0xDEAD_BEEF;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

fn gradient(w: u32, h: u32) -> Bitmap {
    let mut bm = Bitmap::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let v = (x * 255 / (w - 1).max(1)) as u8;
            bm.set(x, y, Color::from_argb(255, v, v, v));
        }
    }
    bm
}

// ── Codecs that represent black/white exactly ────────────────────────

#[test]
fn checkerboard_survives_every_codec() {
    let bm = checkerboard(8, 4);
    for codec in Codec::ALL {
        let out = encode(&bm, codec);
        assert_eq!(out.data().len(), codec.pixels_to_bytes(32), "{codec}");
        let palette = out.palette_bytes().unwrap_or_default();
        // intensity-only codecs derive alpha from intensity
        let back = decode_region(
            out.data(),
            &palette,
            0,
            8,
            4,
            codec,
            IntensityAlphaMode::CopyIntensity,
        );
        assert_eq!(back, bm, "{codec}");
    }
}

#[test]
fn gray_gradient_through_intensity_codecs() {
    let bm = gradient(16, 2);
    for (codec, tolerance) in [
        (Codec::I8, 0),
        (Codec::Ia16, 0),
        (Codec::Ia8, 16),
        (Codec::I4, 16),
        (Codec::Ia4, 36),
    ] {
        let out = encode(&bm, codec);
        let back = decode_region(
            out.data(),
            &[],
            0,
            16,
            2,
            codec,
            IntensityAlphaMode::Full,
        );
        for (orig, got) in bm.pixels().iter().zip(back.pixels()) {
            assert!(
                orig.r.abs_diff(got.r) <= tolerance,
                "{codec}: {orig:?} -> {got:?}"
            );
            assert_eq!(got.a, 255, "{codec}");
        }
    }
}

// ── Region decode over raw windows ───────────────────────────────────

#[test]
fn noise_windows_never_panic() {
    let data = noise_bytes(300);
    let palette = noise_bytes(512);
    for codec in Codec::ALL {
        for offset in [0, 1, 7, 150, 299, 300, 301, usize::MAX] {
            for (w, h) in [(0, 0), (1, 1), (7, 3), (16, 16), (64, 1)] {
                let bm = decode_region(
                    &data,
                    &palette,
                    offset,
                    w,
                    h,
                    codec,
                    IntensityAlphaMode::Binary,
                );
                assert_eq!((bm.width(), bm.height()), (w, h));
            }
        }
    }
}

#[test]
fn truncated_last_texel_is_skipped() {
    // 2x2 RGBA16 needs 8 bytes; give it 7
    let data = [0xf8, 0x01, 0x07, 0xc1, 0x00, 0x3f, 0xff];
    let bm = decode_region(&data, &[], 0, 2, 2, Codec::Rgba16, IntensityAlphaMode::Full);
    assert_eq!(bm.get(0, 0), Color::from_argb(255, 255, 0, 0));
    assert_eq!(bm.get(1, 0), Color::from_argb(255, 0, 255, 0));
    assert_eq!(bm.get(0, 1), Color::from_argb(255, 0, 0, 255));
    assert_eq!(bm.get(1, 1), Color::TRANSPARENT);
}

#[test]
fn skipped_texels_keep_destination() {
    let data = [0xff, 0xff, 0xff];
    let marker = Color::from_argb(1, 2, 3, 4);
    let mut bm = Bitmap::filled(2, 1, marker);
    let written = decode_region_into(
        &mut bm,
        &data,
        &[],
        1,
        Codec::Rgba16,
        IntensityAlphaMode::Full,
    );
    assert_eq!(written, 1);
    assert_eq!(bm.get(0, 0), Color::WHITE);
    assert_eq!(bm.get(1, 0), marker);
}

#[test]
fn offset_shifts_window() {
    let data = [0x00, 0x11, 0x22, 0x33];
    let bm = decode_region(&data, &[], 2, 3, 1, Codec::I8, IntensityAlphaMode::Full);
    assert_eq!(bm.get(0, 0), Color::gray(0x22, 255));
    assert_eq!(bm.get(1, 0), Color::gray(0x33, 255));
    assert_eq!(bm.get(2, 0), Color::TRANSPARENT);
}

#[test]
fn packed_window_stops_at_last_byte() {
    // 3 bytes of 1BPP = 24 texels; a 5x5 window has 25
    let data = [0xff; 3];
    let mut bm = Bitmap::filled(5, 5, Color::BLACK);
    let written = decode_region_into(
        &mut bm,
        &data,
        &[],
        0,
        Codec::OneBpp,
        IntensityAlphaMode::Full,
    );
    assert_eq!(written, 24);
    assert_eq!(bm.get(3, 4), Color::WHITE);
    assert_eq!(bm.get(4, 4), Color::BLACK);
}

#[test]
fn ci_decode_without_palette_is_transparent() {
    let data = noise_bytes(16);
    let bm = decode_region(&data, &[], 0, 4, 4, Codec::Ci8, IntensityAlphaMode::Full);
    assert!(bm.pixels().iter().all(|&c| c == Color::TRANSPARENT));
}

// ── Limits ───────────────────────────────────────────────────────────

#[test]
fn limits_reject_large_decode() {
    let limits = Limits {
        max_pixels: Some(64),
        ..Default::default()
    };
    let result = DecodeRequest::new(&[0u8; 16])
        .with_limits(&limits)
        .decode(16, 16, Codec::I8, Unstoppable);
    match result.unwrap_err() {
        TexelError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }

    let ok = DecodeRequest::new(&[0u8; 16])
        .with_limits(&limits)
        .decode(8, 8, Codec::I8, Unstoppable)
        .unwrap();
    assert_eq!(ok.pixels().len(), 64);
}

#[test]
fn limits_reject_large_encode() {
    let limits = Limits {
        max_memory_bytes: Some(100),
        ..Default::default()
    };
    let bm = checkerboard(8, 8);
    // 64 texels * 2 bytes
    let result = EncodeRequest::new(Codec::Rgba16)
        .with_limits(&limits)
        .encode(&bm, Unstoppable);
    assert!(matches!(result, Err(TexelError::LimitExceeded(_))));

    // 64 texels / 2 per byte
    let out = EncodeRequest::new(Codec::I4)
        .with_limits(&limits)
        .encode(&bm, Unstoppable)
        .unwrap();
    assert_eq!(out.data().len(), 32);

    let square = Limits::square(4);
    assert!(
        EncodeRequest::new(Codec::I4)
            .with_limits(&square)
            .encode(&bm, Unstoppable)
            .is_err()
    );
}
