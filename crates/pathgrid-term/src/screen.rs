//! A styled character buffer and the diff frames flushed to a [`Driver`].
//!
//! [`Driver`]: crate::driver::Driver

// ---------------------------------------------------------------------------
// Color / Glyph
// ---------------------------------------------------------------------------

/// An RGB colour packed into a `u32` (0x00RRGGBB).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    /// The terminal's default colour.
    pub const DEFAULT: Self = Self(0);

    pub const EMPTY: Self = Self::from_rgb(240, 240, 240);
    pub const BARRIER: Self = Self::from_rgb(32, 32, 32);
    pub const START: Self = Self::from_rgb(0, 0, 255);
    pub const END: Self = Self::from_rgb(255, 165, 0);
    pub const OPEN: Self = Self::from_rgb(64, 192, 64);
    pub const CLOSED: Self = Self::from_rgb(208, 64, 64);
    pub const PATH: Self = Self::from_rgb(128, 64, 192);
    pub const TEXT: Self = Self::from_rgb(200, 200, 200);

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

/// One styled terminal character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Glyph {
    /// A blank glyph with background `bg`.
    #[inline]
    pub const fn fill(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: Color::DEFAULT,
            bg,
        }
    }

    /// Never equal to anything drawn; used to force a full repaint.
    const INVALID: Self = Self {
        ch: '\0',
        fg: Color::DEFAULT,
        bg: Color::DEFAULT,
    };
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self::fill(Color::DEFAULT)
    }
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// A `width × height` buffer of glyphs addressed by `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    width: i32,
    height: i32,
    glyphs: Vec<Glyph>,
}

impl Screen {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); (width * height) as usize],
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    /// The glyph at `(x, y)`, or the default glyph outside the buffer.
    pub fn at(&self, x: i32, y: i32) -> Glyph {
        self.index(x, y)
            .map(|i| self.glyphs[i])
            .unwrap_or_default()
    }

    /// Set the glyph at `(x, y)`. No-op outside the buffer.
    pub fn set(&mut self, x: i32, y: i32, glyph: Glyph) {
        if let Some(i) = self.index(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    /// Clear line `y` and write `text` from its start, truncated to fit.
    pub fn line(&mut self, y: i32, text: &str, fg: Color) {
        for x in 0..self.width {
            self.set(x, y, Glyph::default());
        }
        for (x, ch) in (0..self.width).zip(text.chars()) {
            self.set(
                x,
                y,
                Glyph {
                    ch,
                    fg,
                    bg: Color::DEFAULT,
                },
            );
        }
    }

    /// Text of line `y` with trailing blanks removed.
    pub fn line_text(&self, y: i32) -> String {
        let s: String = (0..self.width).map(|x| self.at(x, y).ch).collect();
        s.trim_end().to_string()
    }

    /// Make every glyph differ from anything a model draws, so the next diff
    /// repaints the whole buffer.
    pub fn invalidate(&mut self) {
        self.glyphs.fill(Glyph::INVALID);
    }

    /// Copy `src` into `self`. Both must have the same size.
    pub fn copy_from(&mut self, src: &Screen) {
        if self.width == src.width && self.height == src.height {
            self.glyphs.copy_from_slice(&src.glyphs);
        } else {
            *self = src.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameGlyph / diff
// ---------------------------------------------------------------------------

/// A single glyph that changed between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameGlyph {
    pub x: i32,
    pub y: i32,
    pub glyph: Glyph,
}

/// A set of glyph changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub glyphs: Vec<FrameGlyph>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Glyphs of `curr` that differ from `prev`, in row-major order.
pub fn diff(prev: &Screen, curr: &Screen) -> Frame {
    let mut glyphs = Vec::new();
    for y in 0..curr.height {
        for x in 0..curr.width {
            let g = curr.at(x, y);
            if prev.at(x, y) != g {
                glyphs.push(FrameGlyph { x, y, glyph: g });
            }
        }
    }
    Frame { glyphs }
}
