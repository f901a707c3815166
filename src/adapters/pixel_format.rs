//! Pixel format conversion helpers for presentation adapters.

/// Copies RGBA pixel data to tightly packed RGB, dropping alpha.
///
/// # Arguments
/// * `src` - Source buffer with RGBA data (4 bytes per pixel)
/// * `dst` - Destination buffer for RGB data (3 bytes per pixel)
///
/// # Panics
/// Panics if buffer sizes don't match (dst.len() must equal src.len() / 4 * 3)
/// or if `src` is not a multiple of 4.
pub fn copy_rgba_to_rgb(src: &[u8], dst: &mut [u8]) {
    assert!(
        src.len() % 4 == 0,
        "src length {} is not a multiple of 4",
        src.len()
    );
    let expected_dst_len = (src.len() / 4) * 3;
    assert_eq!(
        dst.len(),
        expected_dst_len,
        "dst length {} does not match expected {}",
        dst.len(),
        expected_dst_len
    );

    for (src_pixel, dst_pixel) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
        dst_pixel[0] = src_pixel[0];
        dst_pixel[1] = src_pixel[1];
        dst_pixel[2] = src_pixel[2];
    }
}

/// Reverses the row order of a pixel buffer in place. GL read-back delivers
/// rows bottom-up while image files expect the top row first.
///
/// # Panics
/// Panics if the buffer is not a whole number of rows.
pub fn flip_rows_vertically(pixels: &mut [u8], row_bytes: usize) {
    assert!(row_bytes > 0, "row_bytes must be positive");
    assert!(
        pixels.len() % row_bytes == 0,
        "buffer length {} is not a multiple of row length {}",
        pixels.len(),
        row_bytes
    );

    let rows = pixels.len() / row_bytes;
    for row in 0..rows / 2 {
        let (head, tail) = pixels.split_at_mut((rows - 1 - row) * row_bytes);
        head[row * row_bytes..(row + 1) * row_bytes].swap_with_slice(&mut tail[..row_bytes]);
    }
}
