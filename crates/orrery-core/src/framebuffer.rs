//! RAM frame buffer with changed-region tracking
//!
//! Pages draw here, never to the panel. After a frame is composed, only the
//! bounding rectangle of changed pixels is pushed to the panel with one
//! `fill_contiguous` call.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

const WIDTH: usize = DISPLAY_WIDTH_PX as usize;
const HEIGHT: usize = DISPLAY_HEIGHT_PX as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    fn at(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }
}

/// Panel-sized RGB565 buffer.
///
/// Writes outside the panel are dropped. A write that does not change a
/// pixel's colour does not grow the dirty region, so redrawing an unchanged
/// page flushes nothing.
pub struct FrameBuffer {
    pixels: Vec<Rgb565>,
    dirty: Option<DirtyRect>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// A black buffer. The panel is assumed black too, so nothing is dirty.
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb565::BLACK; WIDTH * HEIGHT],
            dirty: None,
        }
    }

    /// Colour at `point`, `None` off-panel.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        let (x, y) = Self::index_of(point)?;
        self.pixels.get(y * WIDTH + x).copied()
    }

    /// Bounds of the region that the next [`flush`](Self::flush) will send.
    pub fn dirty_area(&self) -> Option<Rectangle> {
        self.dirty.map(|rect| {
            Rectangle::new(
                Point::new(rect.min_x as i32, rect.min_y as i32),
                Size::new(rect.width() as u32, rect.height() as u32),
            )
        })
    }

    /// Mark the whole buffer dirty, e.g. after the panel lost its contents.
    pub fn invalidate(&mut self) {
        let mut rect = DirtyRect::at(0, 0);
        rect.include(WIDTH - 1, HEIGHT - 1);
        self.dirty = Some(rect);
    }

    fn index_of(point: Point) -> Option<(usize, usize)> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        (x < WIDTH && y < HEIGHT).then_some((x, y))
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, color: Rgb565) {
        let slot = &mut self.pixels[y * WIDTH + x];
        if *slot == color {
            return;
        }
        *slot = color;
        match &mut self.dirty {
            Some(rect) => rect.include(x, y),
            None => self.dirty = Some(DirtyRect::at(x, y)),
        }
    }

    /// Send the dirty region to `panel` and reset the dirty state.
    ///
    /// A no-op when nothing changed. On error the region is kept dirty so the
    /// next flush retries it.
    pub fn flush<D>(&mut self, panel: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(rect) = self.dirty else {
            return Ok(());
        };

        let width = rect.width();
        debug!(
            "Flushing {}x{} region at ({}, {})",
            width,
            rect.height(),
            rect.min_x,
            rect.min_y
        );

        let area = Rectangle::new(
            Point::new(rect.min_x as i32, rect.min_y as i32),
            Size::new(width as u32, rect.height() as u32),
        );
        let pixels = &self.pixels;
        let colors = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let start = y * WIDTH + rect.min_x;
            pixels[start..start + width].iter().copied()
        });

        panel.fill_contiguous(&area, colors)?;
        self.dirty = None;
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((x, y)) = Self::index_of(point) {
                self.set(x, y, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        for y in area.top_left.y..=bottom_right.y {
            for x in area.top_left.x..=bottom_right.x {
                self.set(x as usize, y as usize, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                self.set(x, y, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    /// Panel double that records every `fill_contiguous` call.
    #[derive(Default)]
    struct RecordingPanel {
        fills: std::vec::Vec<(Rectangle, std::vec::Vec<Rgb565>)>,
    }

    impl OriginDimensions for RecordingPanel {
        fn size(&self) -> Size {
            Size::new(WIDTH as u32, HEIGHT as u32)
        }
    }

    impl DrawTarget for RecordingPanel {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            Ok(())
        }

        fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Self::Color>,
        {
            self.fills.push((*area, colors.into_iter().collect()));
            Ok(())
        }
    }

    #[test]
    fn test_new_buffer_is_clean() {
        let mut buffer = FrameBuffer::new();
        let mut panel = RecordingPanel::default();
        buffer.flush(&mut panel).unwrap();
        assert!(panel.fills.is_empty());
    }

    #[test]
    fn test_flush_sends_bounding_box_only() {
        let mut buffer = FrameBuffer::new();
        Pixel(Point::new(10, 20), Rgb565::RED).draw(&mut buffer).unwrap();
        Pixel(Point::new(12, 21), Rgb565::BLUE).draw(&mut buffer).unwrap();

        let mut panel = RecordingPanel::default();
        buffer.flush(&mut panel).unwrap();

        let (area, colors) = &panel.fills[0];
        assert_eq!(*area, Rectangle::new(Point::new(10, 20), Size::new(3, 2)));
        assert_eq!(colors.len(), 6);
        assert_eq!(colors[0], Rgb565::RED);
        assert_eq!(colors[5], Rgb565::BLUE);

        buffer.flush(&mut panel).unwrap();
        assert_eq!(panel.fills.len(), 1, "second flush must be a no-op");
    }

    #[test]
    fn test_unchanged_redraw_stays_clean() {
        let mut buffer = FrameBuffer::new();
        buffer.clear(Rgb565::BLACK).unwrap();
        assert_eq!(buffer.dirty_area(), None);
    }

    #[test]
    fn test_off_panel_pixels_dropped() {
        let mut buffer = FrameBuffer::new();
        Pixel(Point::new(-1, 5), Rgb565::RED).draw(&mut buffer).unwrap();
        Pixel(Point::new(240, 5), Rgb565::RED).draw(&mut buffer).unwrap();
        Pixel(Point::new(5, 135), Rgb565::RED).draw(&mut buffer).unwrap();
        assert_eq!(buffer.dirty_area(), None);
        assert_eq!(buffer.pixel(Point::new(240, 5)), None);
    }

    #[test]
    fn test_fill_solid_clips_to_panel() {
        let mut buffer = FrameBuffer::new();
        Rectangle::new(Point::new(230, 130), Size::new(20, 20))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::GREEN))
            .draw(&mut buffer)
            .unwrap();

        assert_eq!(buffer.pixel(Point::new(239, 134)), Some(Rgb565::GREEN));
        assert_eq!(
            buffer.dirty_area(),
            Some(Rectangle::new(Point::new(230, 130), Size::new(10, 5)))
        );
    }

    #[test]
    fn test_invalidate_marks_whole_panel() {
        let mut buffer = FrameBuffer::new();
        buffer.invalidate();
        assert_eq!(buffer.dirty_area(), Some(buffer.bounding_box()));
    }
}
