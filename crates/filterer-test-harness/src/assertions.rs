use filterer_core::buffer::PixelBuffer;

/// Assert two buffers have the same dimensions.
pub fn assert_same_dimensions(actual: &PixelBuffer, expected: &PixelBuffer) {
    assert_eq!(
        (actual.width(), actual.height()),
        (expected.width(), expected.height()),
        "buffer is {}x{}, expected {}x{}",
        actual.width(),
        actual.height(),
        expected.width(),
        expected.height()
    );
}

/// Assert two buffers match pixel for pixel, reporting the first difference.
pub fn assert_pixels_eq(actual: &PixelBuffer, expected: &PixelBuffer) {
    assert_same_dimensions(actual, expected);
    for (i, (a, e)) in actual.pixels().iter().zip(expected.pixels()).enumerate() {
        let x = i as u32 % actual.width();
        let y = i as u32 / actual.width();
        assert_eq!(
            a.to_rgba(),
            e.to_rgba(),
            "pixel ({x}, {y}) differs"
        );
    }
}

/// Assert the pixel at (x, y) has the given channels.
pub fn assert_rgba_at(buffer: &PixelBuffer, x: u32, y: u32, expected: [u8; 4]) {
    assert_eq!(
        buffer.pixel(x, y).to_rgba(),
        expected,
        "unexpected channels at ({x}, {y})"
    );
}

/// Assert alpha survived a transform untouched.
pub fn assert_alpha_preserved(actual: &PixelBuffer, original: &PixelBuffer) {
    assert_same_dimensions(actual, original);
    for (i, (a, o)) in actual.pixels().iter().zip(original.pixels()).enumerate() {
        assert_eq!(a.alpha(), o.alpha(), "alpha changed at pixel index {i}");
    }
}
