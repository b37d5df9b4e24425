use crate::color::Color;
use crate::image::Image;

/// Cell-grid drawing surface offered by the host.
///
/// Coordinates are integer cells with the origin at the top-left. Writes
/// outside the grid are dropped; reads outside the grid return the
/// background color, so samplers never have to special-case the edges.
pub trait GridSurface {
    fn set_grid_size(&mut self, width: u32, height: u32);
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn set_cell_color(&mut self, x: i32, y: i32, color: Color);
    fn cell_color(&self, x: i32, y: i32) -> Color;

    fn set_border_width(&mut self, width: u32);
    fn set_glyph(&mut self, x: i32, y: i32, glyph: Option<char>);
    fn set_status_text(&mut self, text: &str);

    /// Paint every cell with one color and clear all glyphs.
    fn fill(&mut self, color: Color) {
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                self.set_cell_color(x, y, color);
                self.set_glyph(x, y, None);
            }
        }
    }

    /// Commit an image's opaque pixels to cells, top-left at `(x, y)`.
    ///
    /// Transparent pixels leave the underlying cells untouched and pixels
    /// falling outside the grid are clipped.
    fn blit(&mut self, image: &Image, x: i32, y: i32) {
        for py in 0..image.height() {
            for px in 0..image.width() {
                let color = image.pixel(px, py);
                if color.is_opaque() {
                    self.set_cell_color(x + px as i32, y + py as i32, color);
                }
            }
        }
    }
}

/// In-memory reference implementation of [`GridSurface`].
///
/// Frontends render it to pixels once per frame; tests read it back
/// directly. Border width, glyphs, and the status line are stored so the
/// owning frontend can present them however it likes.
#[derive(Clone, Debug)]
pub struct CellGrid {
    width: u32,
    height: u32,
    background: Color,
    cells: Vec<Color>,
    glyphs: Vec<Option<char>>,
    border_width: u32,
    status_text: String,
}

impl CellGrid {
    pub fn new(width: u32, height: u32) -> CellGrid {
        CellGrid::with_background(width, height, Color::BLACK)
    }

    pub fn with_background(width: u32, height: u32, background: Color) -> CellGrid {
        CellGrid {
            width,
            height,
            background,
            cells: vec![background; (width * height) as usize],
            glyphs: vec![None; (width * height) as usize],
            border_width: 0,
            status_text: String::new(),
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            None
        } else {
            Some((y as u32 * self.width + x as u32) as usize)
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn border_width(&self) -> u32 {
        self.border_width
    }

    pub fn glyph(&self, x: i32, y: i32) -> Option<char> {
        self.index(x, y).and_then(|i| self.glyphs[i])
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Write the grid into an RGB24 buffer, one pixel per cell.
    ///
    /// The buffer must hold exactly `width * height * 3` bytes; frontends
    /// scale it up on the GPU side.
    pub fn render_rgb24(&self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), (self.width * self.height * 3) as usize);
        for (i, cell) in self.cells.iter().enumerate() {
            let base = i * 3;
            out[base] = cell.r;
            out[base + 1] = cell.g;
            out[base + 2] = cell.b;
        }
    }
}

impl GridSurface for CellGrid {
    fn set_grid_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.cells = vec![self.background; (width * height) as usize];
        self.glyphs = vec![None; (width * height) as usize];
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_cell_color(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = color;
        }
    }

    fn cell_color(&self, x: i32, y: i32) -> Color {
        match self.index(x, y) {
            Some(i) => self.cells[i],
            None => self.background,
        }
    }

    fn set_border_width(&mut self, width: u32) {
        self.border_width = width;
    }

    fn set_glyph(&mut self, x: i32, y: i32, glyph: Option<char>) {
        if let Some(i) = self.index(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    fn set_status_text(&mut self, text: &str) {
        if self.status_text != text {
            log::debug!("status: {text}");
            self.status_text.clear();
            self.status_text.push_str(text);
        }
    }
}
