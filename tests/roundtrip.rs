use qoi_codec::{Channels, Colorspace, Descriptor};

fn gradient_rgba(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = (x % 256) as u8;
            let g = (y % 256) as u8;
            let b = ((x + y) % 256) as u8;
            let a = if (x + y) % 7 == 0 { 128 } else { 255 };
            pixels.extend_from_slice(&[r, g, b, a]);
        }
    }
    pixels
}

fn solid_rgb(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..(width * height) {
        pixels.extend_from_slice(&color);
    }
    pixels
}

#[test]
fn gradient_image_round_trips_through_alloc_api() {
    let descriptor = Descriptor { width: 64, height: 48, channels: Channels::Rgba, colorspace: Colorspace::Srgb };
    let pixels = gradient_rgba(descriptor.width, descriptor.height);

    let encoded = qoi_codec::encode(&pixels, &descriptor).unwrap();
    assert!(qoi_codec::is_qoi(&encoded));

    let (decoded_descriptor, decoded_pixels) = qoi_codec::decode(&encoded).unwrap();
    assert_eq!(decoded_descriptor, descriptor);
    assert_eq!(decoded_pixels, pixels);
}

#[test]
fn solid_image_compresses_to_run_opcodes_and_round_trips() {
    let descriptor = Descriptor { width: 32, height: 32, channels: Channels::Rgb, colorspace: Colorspace::Linear };
    let pixels = solid_rgb(descriptor.width, descriptor.height, [200, 10, 10]);

    let encoded = qoi_codec::encode(&pixels, &descriptor).unwrap();
    // 1024 identical pixels collapse into RUN opcodes of at most 62 pixels each.
    assert!(encoded.len() < pixels.len() / 4);

    let (decoded_descriptor, decoded_pixels) = qoi_codec::decode(&encoded).unwrap();
    assert_eq!(decoded_descriptor, descriptor);
    assert_eq!(decoded_pixels, pixels);
}

#[test]
fn single_pixel_images_round_trip_for_both_channel_layouts() {
    for channels in [Channels::Rgb, Channels::Rgba] {
        let descriptor = Descriptor { width: 1, height: 1, channels, colorspace: Colorspace::Srgb };
        let pixels: Vec<u8> = if channels.has_alpha() { vec![1, 2, 3, 4] } else { vec![1, 2, 3] };

        let encoded = qoi_codec::encode(&pixels, &descriptor).unwrap();
        let (decoded_descriptor, decoded_pixels) = qoi_codec::decode(&encoded).unwrap();
        assert_eq!(decoded_descriptor, descriptor);
        assert_eq!(decoded_pixels, pixels);
    }
}

#[test]
fn slice_api_round_trips_without_allocating_on_the_decode_side() {
    let descriptor = Descriptor { width: 8, height: 8, channels: Channels::Rgba, colorspace: Colorspace::Srgb };
    let pixels = gradient_rgba(descriptor.width, descriptor.height);

    let mut encode_buf = vec![0u8; qoi_codec::encode::encoded_size_limit(&descriptor) as usize];
    let encoded_len = qoi_codec::encode_to_slice(&pixels, &descriptor, &mut encode_buf).unwrap();
    let encoded = &encode_buf[..encoded_len];

    let mut decode_buf = vec![0u8; pixels.len()];
    let decoded_descriptor = qoi_codec::decode_to_slice(encoded, &mut decode_buf).unwrap();
    assert_eq!(decoded_descriptor, descriptor);
    assert_eq!(decode_buf, pixels);
}

#[test]
fn streaming_writer_and_reader_round_trip() {
    let descriptor = Descriptor { width: 16, height: 16, channels: Channels::Rgba, colorspace: Colorspace::Srgb };
    let pixels = gradient_rgba(descriptor.width, descriptor.height);

    let mut encoded = Vec::new();
    qoi_codec::encode::encode_writer(&pixels, &descriptor, &mut encoded).unwrap();

    let (decoded_descriptor, decoded_pixels) = qoi_codec::decode_reader(&encoded[..]).unwrap();
    assert_eq!(decoded_descriptor, descriptor);
    assert_eq!(decoded_pixels, pixels);
}

// Testable property 3 (reference compatibility) calls for decoding the
// canonical QOI corpus (dice, kodim10, kodim23, qoi_logo, testcard,
// testcard_rgba, wikipedia_008, edgecase) and comparing against an
// independent reference decoder's output. None of those images (or any
// other .qoi/.png fixtures) ship in this workspace, so that property is
// not exercised here — see DESIGN.md's "Known gaps" entry. Every other
// testable property and end-to-end scenario from the spec is covered
// above and below with synthetic images instead.
#[test]
#[ignore = "canonical QOI corpus (dice/kodim10/kodim23/qoi_logo/testcard/testcard_rgba/wikipedia_008/edgecase) is not present in this workspace; see DESIGN.md Known gaps"]
fn reference_corpus_images_not_available() {
    unreachable!("no canonical QOI corpus fixtures ship with this crate");
}

#[test]
fn corrupted_header_is_rejected_before_touching_pixel_data() {
    let descriptor = Descriptor { width: 4, height: 4, channels: Channels::Rgba, colorspace: Colorspace::Srgb };
    let pixels = gradient_rgba(descriptor.width, descriptor.height);
    let mut encoded = qoi_codec::encode(&pixels, &descriptor).unwrap();

    encoded[0] = b'x';
    assert!(qoi_codec::decode(&encoded).is_err());
    assert!(!qoi_codec::is_qoi(&encoded));
}
