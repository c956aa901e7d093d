//! Procedural textures: the "image missing" placeholder and the paper grain.
//!
//! Both produce tightly packed RGBA8 pixel buffers, row by row from the top.

use rand::Rng;

pub type Rgb = [u8; 3];

const PLACEHOLDER_SIZE: u32 = 512;
const BACKGROUND: Rgb = [0xf0, 0xeb, 0xe4];
const BORDER: Rgb = [0xd0, 0xc6, 0xbb];
const INK: Rgb = [0x74, 0x68, 0x5c];
const BORDER_INSET: u32 = 16;
const BORDER_WIDTH: u32 = 18;

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
/// Glyph width plus one column spacing.
const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;
const MAX_GLYPH_SCALE: u32 = 4;

/// 5x7 capitals, digits and a little punctuation. Lower case letters are
/// drawn as capitals; anything else leaves a gap.
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        _ => return None,
    };
    Some(rows)
}

/// Stand-in for a page image that failed to load: a light card with a
/// framed, centred label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderImage {
    size: u32,
    label: String,
    pixels: Vec<u8>,
}

impl PlaceholderImage {
    pub fn render(label: &str) -> Self {
        let size = PLACEHOLDER_SIZE;
        let mut image = Self {
            size,
            label: label.to_string(),
            pixels: Vec::with_capacity((size * size * 4) as usize),
        };

        let outer = BORDER_INSET - BORDER_WIDTH / 2;
        let inner = BORDER_INSET + BORDER_WIDTH / 2;
        for y in 0..size {
            for x in 0..size {
                let in_frame = |lo: u32| x >= lo && y >= lo && x < size - lo && y < size - lo;
                let color = if in_frame(outer) && !in_frame(inner) {
                    BORDER
                } else {
                    BACKGROUND
                };
                image.pixels.extend_from_slice(&[color[0], color[1], color[2], 255]);
            }
        }

        image.draw_label(size - 2 * inner);
        image
    }

    fn draw_label(&mut self, available: u32) {
        let chars: Vec<char> = self.label.chars().collect();
        if chars.is_empty() {
            return;
        }
        let columns = chars.len() as u32 * GLYPH_ADVANCE - 1;
        let scale = (available / columns).clamp(1, MAX_GLYPH_SCALE);

        let width = columns * scale;
        let height = GLYPH_HEIGHT * scale;
        let left = self.size.saturating_sub(width) / 2;
        let top = self.size.saturating_sub(height) / 2;

        for (i, c) in chars.iter().enumerate() {
            let Some(rows) = glyph(*c) else {
                continue;
            };
            let glyph_left = left + i as u32 * GLYPH_ADVANCE * scale;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let x = glyph_left + col * scale;
                    let y = top + row as u32 * scale;
                    self.fill(x, y, scale, INK);
                }
            }
        }
    }

    fn fill(&mut self, x: u32, y: u32, extent: u32, color: Rgb) {
        for py in y..(y + extent).min(self.size) {
            for px in x..(x + extent).min(self.size) {
                let offset = ((py * self.size + px) * 4) as usize;
                self.pixels[offset..offset + 3].copy_from_slice(&color);
            }
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let offset = ((y * self.size + x) * 4) as usize;
        let rgba = self.pixels.get(offset..offset + 4)?;
        Some([rgba[0], rgba[1], rgba[2], rgba[3]])
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

/// Random height field that gives the paper a faint tooth.
#[derive(Debug, Clone)]
pub struct PaperGrain {
    size: u32,
    heights: Vec<u8>,
}

impl PaperGrain {
    pub const MIN_HEIGHT: u8 = 125;
    pub const MAX_HEIGHT: u8 = 151;

    pub fn generate<R: Rng>(size: u32, rng: &mut R) -> Self {
        let heights = (0..size * size)
            .map(|_| rng.gen_range(Self::MIN_HEIGHT..=Self::MAX_HEIGHT))
            .collect();
        Self { size, heights }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Height at `(x, y)`, wrapping around so the texture tiles.
    pub fn height(&self, x: i64, y: i64) -> u8 {
        let size = self.size as i64;
        let (x, y) = (x.rem_euclid(size), y.rem_euclid(size));
        self.heights[(y * size + x) as usize]
    }

    /// Tangent-space normal map (RGBA8, linear) from central differences.
    ///
    /// `strength` scales the slopes; 0 yields a flat map.
    pub fn normal_map(&self, strength: f32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(self.heights.len() * 4);
        for y in 0..self.size as i64 {
            for x in 0..self.size as i64 {
                let dx = (self.height(x + 1, y) as f32 - self.height(x - 1, y) as f32) / 255.0;
                let dy = (self.height(x, y + 1) as f32 - self.height(x, y - 1) as f32) / 255.0;
                let (nx, ny, nz) = (-dx * strength, -dy * strength, 1.0_f32);
                let len = (nx * nx + ny * ny + nz * nz).sqrt();
                let encode = |n: f32| ((n / len * 0.5 + 0.5) * 255.0).round() as u8;
                pixels.extend_from_slice(&[encode(nx), encode(ny), encode(nz), 255]);
            }
        }
        pixels
    }
}
