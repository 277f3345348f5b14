#![no_main]
use libfuzzer_sys::fuzz_target;
use n64texels::*;

fuzz_target!(|data: &[u8]| {
    // Header: codec, mode, offset, width, height; rest is texel data
    let [codec, mode, offset, width, height, rest @ ..] = data else {
        return;
    };
    let Ok(codec) = Codec::try_from(*codec % 10) else {
        return;
    };
    let mode = IntensityAlphaMode::try_from(*mode % 3).unwrap_or_default();
    let (palette, texels) = rest.split_at(rest.len() / 3);

    // Any window over any bytes must decode without panicking
    let bm = decode_region(
        texels,
        palette,
        usize::from(*offset),
        u32::from(*width),
        u32::from(*height),
        codec,
        mode,
    );
    assert_eq!(bm.pixels().len(), usize::from(*width) * usize::from(*height));

    let _ = DecodeRequest::new(texels)
        .with_palette(palette)
        .at_offset(usize::from(*offset))
        .with_mode(mode)
        .decode(u32::from(*width), u32::from(*height), codec, enough::Unstoppable);
});
