use std::io::Write;
use std::path::Path;

/// Writes tightly packed RGB pixels as a binary PPM image.
///
/// `rgb` is row-major, top row first, `width * height * 3` bytes.
pub fn write_ppm(
    rgb: &[u8],
    width: u32,
    height: u32,
    filepath: impl AsRef<Path>,
) -> std::io::Result<()> {
    debug_assert_eq!(rgb.len(), width as usize * height as usize * 3);

    let mut file = std::fs::File::create(filepath)?;

    // PPM header: P6 means binary RGB, then width height max_colour
    writeln!(file, "P6")?;
    writeln!(file, "{width} {height}")?;
    writeln!(file, "255")?;
    file.write_all(rgb)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_ppm_produces_header_and_body() {
        let dir = std::env::temp_dir().join("fractal_dive_ppm_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("two_by_one.ppm");
        let rgb = [255, 0, 0, 0, 255, 0];

        write_ppm(&rgb, 2, 1, &path).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(&written[..11], b"P6\n2 1\n255\n");
        assert_eq!(&written[11..], &rgb);
        std::fs::remove_file(&path).unwrap();
    }
}
