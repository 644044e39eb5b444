use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilmError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Item {index} is at {found} dpi, expected {expected} dpi")]
    ResolutionMismatch {
        index: usize,
        expected: u32,
        found: u32,
    },
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to export")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, FilmError>;

/// A physical width/height pair in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PhysicalSize {
    pub const fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    /// Pixel dimensions at the given resolution
    pub fn to_px(self, dpi: u32) -> (u32, u32) {
        (
            crate::mm_to_px(self.width_mm, dpi),
            crate::mm_to_px(self.height_mm, dpi),
        )
    }
}

/// Resolved paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Requested paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageOrientation {
    /// Try both and keep whichever holds more frames (Portrait on a tie)
    #[default]
    Auto,
    Portrait,
    Landscape,
}

impl PageOrientation {
    /// Orientations to evaluate, in tie-break priority order
    pub fn candidates(self) -> &'static [Orientation] {
        match self {
            PageOrientation::Auto => &[Orientation::Portrait, Orientation::Landscape],
            PageOrientation::Portrait => &[Orientation::Portrait],
            PageOrientation::Landscape => &[Orientation::Landscape],
        }
    }
}

/// Supported paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    #[default]
    A4,
    A5,
    A6,
}

impl PaperSize {
    /// Base dimensions (portrait)
    pub fn dimensions_mm(self) -> PhysicalSize {
        match self {
            PaperSize::A4 => PhysicalSize::new(210.0, 297.0),
            PaperSize::A5 => PhysicalSize::new(148.0, 210.0),
            PaperSize::A6 => PhysicalSize::new(105.0, 148.0),
        }
    }

    /// Dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> PhysicalSize {
        let size = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => size,
            Orientation::Landscape => PhysicalSize::new(size.height_mm, size.width_mm),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::A6 => "A6",
        }
    }
}

/// How a photo is mapped onto the 36×24mm image area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CropMode {
    /// Scale to cover the image area, cropping the overflow (short side aligned)
    #[default]
    Fill,
    /// Scale to fit inside the image area, letterboxing the rest (long side aligned)
    Fit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorMode {
    #[default]
    Color,
    Monochrome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    #[default]
    Positive,
    /// Tonally inverted, like an unprinted negative
    Negative,
}

/// Counter-clockwise rotation applied before cropping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    None,
    Ccw90,
    Ccw180,
    Ccw270,
}

impl Rotation {
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::None => 0,
            Rotation::Ccw90 => 90,
            Rotation::Ccw180 => 180,
            Rotation::Ccw270 => 270,
        }
    }

    /// Parse a right-angle rotation in degrees; anything else is rejected
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Ccw90),
            180 => Some(Rotation::Ccw180),
            270 => Some(Rotation::Ccw270),
            _ => None,
        }
    }
}

/// Per-photo rendering choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FrameStyle {
    pub crop_mode: CropMode,
    pub color_mode: ColorMode,
    pub polarity: Polarity,
    pub rotation: Rotation,
}

/// A photo together with how it should be rendered
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameSettings {
    pub source: PathBuf,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub style: FrameStyle,
}

impl FrameSettings {
    /// Settings for a newly added photo (Fill, Color, Positive, no rotation)
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            style: FrameStyle::default(),
        }
    }

    pub fn with_style(mut self, style: FrameStyle) -> Self {
        self.style = style;
        self
    }
}

/// Summary of how a set of frames will be laid out
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStatistics {
    /// Number of frames to lay out
    pub frame_count: usize,
    /// Orientation the packer settles on
    pub orientation: Orientation,
    pub columns: usize,
    pub rows: usize,
    /// Zero when a single frame does not fit the printable area
    pub frames_per_page: usize,
    pub page_count: usize,
    pub page_width_px: u32,
    pub page_height_px: u32,
}
