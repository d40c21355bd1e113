/// Drawing primitives the renderer and minimap need from an output surface.
pub trait Canvas {
    /// Inclusive vertical run of pixels from `y0` to `y1`.
    fn vertical_line(&mut self, x: i32, y0: i32, y1: i32, color: u32);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: u32);

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: u32);

    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: u32);
}

/// Row-major 0RGB pixel buffer. Everything drawn is clipped to its bounds.
pub struct FrameBuffer<'a> {
    pixels: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> FrameBuffer<'a> {
    pub fn new(pixels: &'a mut [u32], width: usize, height: usize) -> Self {
        assert_eq!(pixels.len(), width * height, "buffer size does not match {width}x{height}");
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Fills rows `[y0, y1)` with one color.
    pub fn fill_rows(&mut self, y0: usize, y1: usize, color: u32) {
        let y1 = y1.min(self.height);
        if y0 >= y1 {
            return;
        }
        self.pixels[y0 * self.width..y1 * self.width].fill(color);
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }
}

impl Canvas for FrameBuffer<'_> {
    fn vertical_line(&mut self, x: i32, y0: i32, y1: i32, color: u32) {
        if x < 0 || x as usize >= self.width {
            return;
        }
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        let y0 = y0.max(0);
        let y1 = y1.min(self.height as i32 - 1);
        if y0 > y1 {
            return;
        }

        let mut idx = y0 as usize * self.width + x as usize;
        for _y in y0..=y1 {
            self.pixels[idx] = color;
            idx += self.width;
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: u32) {
        // pixel centers inside [x, x + w) x [y, y + h)
        let x0 = (x.ceil() as i64).clamp(0, self.width as i64) as usize;
        let x1 = ((x + w).ceil() as i64).clamp(0, self.width as i64) as usize;
        let y0 = (y.ceil() as i64).clamp(0, self.height as i64) as usize;
        let y1 = ((y + h).ceil() as i64).clamp(0, self.height as i64) as usize;
        for row in y0..y1 {
            let start = row * self.width;
            self.pixels[start + x0..start + x1.max(x0)].fill(color);
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: u32) {
        let r2 = radius * radius;
        let (x0, x1) = ((cx - radius).floor() as i32, (cx + radius).ceil() as i32);
        let (y0, y1) = ((cy - radius).floor() as i32, (cy + radius).ceil() as i32);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: u32) {
        let (dx, dy) = (x1 - x0, y1 - y0);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i32;
        let (sx, sy) = (dx / steps as f64, dy / steps as f64);
        for i in 0..=steps {
            let t = i as f64;
            self.put((x0 + sx * t).floor() as i32, (y0 + sy * t).floor() as i32, color);
        }
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::Canvas;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        VLine { x: i32, y0: i32, y1: i32, color: u32 },
        Rect { x: f64, y: f64, w: f64, h: f64, color: u32 },
        Circle { cx: f64, cy: f64, radius: f64, color: u32 },
        Line { x0: f64, y0: f64, x1: f64, y1: f64, color: u32 },
    }

    /// Canvas that keeps every draw call for inspection.
    #[derive(Default)]
    pub struct Recorder {
        pub ops: Vec<Op>,
    }

    impl Canvas for Recorder {
        fn vertical_line(&mut self, x: i32, y0: i32, y1: i32, color: u32) {
            self.ops.push(Op::VLine { x, y0, y1, color });
        }

        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: u32) {
            self.ops.push(Op::Rect { x, y, w, h, color });
        }

        fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: u32) {
            self.ops.push(Op::Circle {
                cx,
                cy,
                radius,
                color,
            });
        }

        fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: u32) {
            self.ops.push(Op::Line {
                x0,
                y0,
                x1,
                y1,
                color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_line_is_inclusive_and_clipped() {
        let mut px = vec![0u32; 4 * 4];
        let mut fb = FrameBuffer::new(&mut px, 4, 4);
        fb.vertical_line(1, -3, 2, 7);
        fb.vertical_line(9, 0, 3, 9);
        let col: Vec<u32> = (0..4).map(|y| px[y * 4 + 1]).collect();
        assert_eq!(col, vec![7, 7, 7, 0]);
        assert_eq!(px.iter().filter(|&&c| c == 9).count(), 0);
    }

    #[test]
    fn adjacent_rects_tile_without_gaps() {
        let mut px = vec![0u32; 10 * 10];
        let mut fb = FrameBuffer::new(&mut px, 10, 10);
        let tile = 10.0 / 3.0;
        for i in 0..3 {
            for j in 0..3 {
                fb.fill_rect(i as f64 * tile, j as f64 * tile, tile, tile, 1 + (i + j * 3) as u32);
            }
        }
        assert!(px.iter().all(|&c| c != 0));
    }

    #[test]
    fn circle_and_line_stay_in_bounds() {
        let mut px = vec![0u32; 8 * 8];
        let mut fb = FrameBuffer::new(&mut px, 8, 8);
        fb.fill_circle(0.0, 0.0, 2.0, 5);
        fb.line(-4.0, 3.0, 20.0, 3.0, 6);
        assert_eq!(px[0], 5);
        assert!((0..8).all(|x| px[3 * 8 + x] == 6));
    }

    #[test]
    fn fill_rows_covers_half_open_range() {
        let mut px = vec![0u32; 3 * 4];
        let mut fb = FrameBuffer::new(&mut px, 3, 4);
        fb.fill_rows(1, 3, 2);
        assert_eq!(px, vec![0, 0, 0, 2, 2, 2, 2, 2, 2, 0, 0, 0]);
    }
}
