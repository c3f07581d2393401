use crate::grid::Grid;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Width of a braille character, in dots
pub const DOTS_X: usize = 2;

/// Height of a braille character, in dots
pub const DOTS_Y: usize = 4;

/// A braille framebuffer. Each dot is one pixel of the drawing surface.
pub struct Camera {
    /// The pixel buffer
    pb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width of the pixel buffer
    w: usize,

    /// Height of the pixel buffer
    h: usize,
}

impl Camera {
    /// A camera covering `cols` by `rows` terminal characters
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        Self::new(cols as usize * DOTS_X, rows as usize * DOTS_Y)
    }

    /// A camera of `w` by `h` pixels
    pub fn new(w: usize, h: usize) -> Self {
        let pb = vec![false; w * h];

        // Let `w` and `h` refer to width and height of the pixel buffer. Then `bw = ceil(w / 2)`
        // and `bh = ceil(h / 4)` are the width and height of braille characters of our framebuffer
        // (that is, not accounting for the trailing newlines expected at the end of each line).
        let (bw, bh) = (w.div_ceil(DOTS_X), h.div_ceil(DOTS_Y));
        let cp = vec![BRAILLE_EMPTY; bw * bh];

        // Each braille character is 3 bytes, and newlines one byte. Since we need `bh` newlines,
        // this gives us a framebuffer of length `3 * (bw * bh) + bh`.
        let fb = String::with_capacity(3 * (bw * bh) + bh);

        Self { pb, fb, cp, w, h }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Resize to `w` by `h` pixels, blanking everything
    pub fn resize(&mut self, w: usize, h: usize) {
        *self = Self::new(w, h);
    }

    /// Turns on a single pixel. Pixels outside the buffer are dropped.
    pub fn draw_pixel(&mut self, x: usize, y: usize) {
        if x < self.w && y < self.h {
            let i = self.xy_from(x, y);
            self.pb[i] = true;
        }
    }

    /// Turns on an `s` by `s` square with its top left corner at `(x, y)`, clipped to the buffer
    pub fn draw_square(&mut self, x: usize, y: usize, s: usize) {
        let x_end = x.saturating_add(s).min(self.w);
        let y_end = y.saturating_add(s).min(self.h);

        for y in y.min(y_end)..y_end {
            let row = y * self.w;
            self.pb[row + x.min(x_end)..row + x_end].fill(true);
        }
    }

    /// Paint every ALIVE cell of `grid` as a `cell_size` square, the grid's origin at the top
    /// left pixel
    pub fn draw_grid(&mut self, grid: &Grid, cell_size: u32) {
        let s = cell_size as usize;

        for (coord, value) in grid.iter() {
            if !value.is_alive() {
                continue;
            }

            let (x, y) = (coord.col * s, coord.row * s);

            // nothing further along this row or below is visible
            if x >= self.w || y >= self.h {
                continue;
            }

            self.draw_square(x, y, s);
        }
    }

    /// Mark the corners of every cell of a `rows` by `cols` grid of `cell_size` squares, so cell
    /// boundaries stay visible where nothing is alive
    pub fn draw_lattice(&mut self, rows: usize, cols: usize, cell_size: u32) {
        let s = cell_size as usize;
        if s == 0 {
            return;
        }

        let (w, h) = (self.w, self.h);

        for y in (0..=rows.saturating_mul(s)).step_by(s).take_while(|&y| y < h) {
            for x in (0..=cols.saturating_mul(s)).step_by(s).take_while(|&x| x < w) {
                self.draw_pixel(x, y);
            }
        }
    }

    /// Reset the pixel buffer
    pub fn reset(&mut self) {
        self.pb.fill(false);
    }

    /// Fundamentally, we have a buffer of every pixel on our screen, and we ask ourselves "Is
    /// this pixel on or off?"
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(DOTS_X);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.pb.iter().enumerate() {
            if px {
                let (x, y) = self.xy_to(n);
                self.cp[(y / DOTS_Y) * bw + (x / DOTS_X)] += Self::get_hex_value(x, y);
            }
        }

        // update framebuffer
        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // every sum of dot values stays within U+2800..=U+28FF
            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }

        &self.fb
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Camera;
    use crate::grid::Grid;

    #[test]
    fn blank() {
        let mut cam = Camera::new(4, 4);

        assert_eq!(cam.render(), "\u{2800}\u{2800}");
    }

    #[test]
    fn single_dots() {
        let mut cam = Camera::new(2, 4);

        cam.draw_pixel(0, 0);
        assert_eq!(cam.render(), "\u{2801}");

        cam.draw_pixel(1, 3);
        assert_eq!(cam.render(), "\u{2881}");

        // dropped
        cam.draw_pixel(2, 0);
        assert_eq!(cam.render(), "\u{2881}");

        cam.reset();
        assert_eq!(cam.render(), "\u{2800}");
    }

    #[test]
    fn square_is_clipped() {
        let mut cam = Camera::new(2, 8);

        cam.draw_square(1, 2, 70);

        // right column from the third row down
        assert_eq!(cam.render(), "\u{28A0}\n\u{28B8}");
    }

    #[test]
    fn grid_cells_become_squares() {
        let grid: Grid = "#.\n.#".parse().unwrap();
        let mut cam = Camera::new(4, 8);

        cam.draw_grid(&grid, 2);

        // both squares sit in the top row of characters, the lower half of the second one
        assert_eq!(cam.render(), "\u{281B}\u{28E4}\n\u{2800}\u{2800}");
    }

    #[test]
    fn lattice_marks_cell_corners() {
        let mut cam = Camera::new(4, 8);

        // corners at 0, 2 and 4 on both axes, x = 4 falls off the right edge
        cam.draw_lattice(2, 2, 2);
        assert_eq!(cam.render(), "\u{2805}\u{2805}\n\u{2801}\u{2801}");

        // corners at 0 and 3, the lower braille row stays blank
        cam.reset();
        cam.draw_lattice(1, 1, 3);
        assert_eq!(cam.render(), "\u{2841}\u{2888}\n\u{2800}\u{2800}");
    }

    #[test]
    fn terminal_dimensions() {
        let mut cam = Camera::for_terminal(3, 2);

        assert_eq!((cam.width(), cam.height()), (6, 8));

        cam.resize(2, 4);
        assert_eq!(cam.render(), "\u{2800}");
    }
}
