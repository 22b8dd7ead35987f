//! Spritesheet rendering - combines animation frames into a grid layout

use image::RgbaImage;

use crate::color::TRANSPARENT;

/// Render frames into a spritesheet grid.
///
/// Frames are laid out left-to-right in playback order; `cols` bounds the
/// number of columns, with `None` meaning a single row (the default export
/// layout). All frames of a canvas share one size, so the sheet is exactly
/// `cols*W` x `rows*H`. Unused trailing cells stay transparent.
///
/// # Examples
///
/// ```
/// use image::RgbaImage;
/// use pixelpad::spritesheet::render_spritesheet;
///
/// let frame = RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
/// let frames = vec![frame.clone(), frame.clone(), frame.clone(), frame.clone()];
///
/// // Default: horizontal layout (4x1 grid)
/// let sheet = render_spritesheet(&frames, None);
/// assert_eq!(sheet.width(), 8);
/// assert_eq!(sheet.height(), 2);
///
/// // With cols=2: 2x2 grid
/// let sheet = render_spritesheet(&frames, Some(2));
/// assert_eq!(sheet.width(), 4);
/// assert_eq!(sheet.height(), 4);
/// ```
pub fn render_spritesheet(frames: &[RgbaImage], cols: Option<u32>) -> RgbaImage {
    if frames.is_empty() {
        return RgbaImage::from_pixel(1, 1, TRANSPARENT);
    }

    let tile_w = frames[0].width();
    let tile_h = frames[0].height();

    let num_frames = frames.len() as u32;
    let columns = cols.unwrap_or(num_frames).clamp(1, num_frames);
    let rows = num_frames.div_ceil(columns);

    let mut sheet = RgbaImage::from_pixel(columns * tile_w, rows * tile_h, TRANSPARENT);

    for (i, frame) in frames.iter().enumerate() {
        let col = i as u32 % columns;
        let row = i as u32 / columns;
        image::imageops::replace(
            &mut sheet,
            frame,
            (col * tile_w) as i64,
            (row * tile_h) as i64,
        );
    }

    sheet
}
