#![no_main]
use libfuzzer_sys::fuzz_target;
use n64texels::*;

fuzz_target!(|data: &[u8]| {
    let [width, rest @ ..] = data else {
        return;
    };
    let width = u32::from(*width).max(1);
    let height = (rest.len() / 4) as u32 / width;
    let Ok(bm) = Bitmap::from_rgba8(rest, width, height) else {
        return;
    };

    // RGBA32 must be lossless
    let out = encode(&bm, Codec::Rgba32);
    let back = decode_region(out.data(), &[], 0, width, height, Codec::Rgba32, IntensityAlphaMode::Full);
    assert_eq!(back, bm, "RGBA32 roundtrip mismatch");

    // Indexed encodes must stay decodable with the palette they return
    for codec in [Codec::Ci4, Codec::Ci8] {
        let out = encode(&bm, codec);
        let palette = out.palette_bytes().expect("indexed encode returns a palette");
        let back = decode_region(out.data(), &palette, 0, width, height, codec, IntensityAlphaMode::Full);
        if out.overflowed() == 0 {
            let exact = decode_region(
                encode(&bm, Codec::Rgba16).data(), &[], 0, width, height,
                Codec::Rgba16, IntensityAlphaMode::Full,
            );
            assert_eq!(back, exact, "{codec} roundtrip mismatch");
        }
    }
});
