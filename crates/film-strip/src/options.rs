use crate::constants::{
    DEFAULT_DPI, DEFAULT_GAP_MM, DEFAULT_MARGIN_MM, MAX_GAP_MM, MAX_MARGIN_MM, mm_to_px,
};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page layout configuration shared by every frame of one render pass
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    pub paper_size: PaperSize,
    pub orientation: PageOrientation,
    /// Blank border around the page, 0 to 50mm
    pub margin_mm: f64,
    /// Space between neighbouring frames, 0 to 20mm
    pub gap_mm: f64,
    /// Render resolution; also the resolution embedded in the PDF
    pub dpi: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: PageOrientation::Auto,
            margin_mm: DEFAULT_MARGIN_MM,
            gap_mm: DEFAULT_GAP_MM,
            dpi: DEFAULT_DPI,
        }
    }
}

impl LayoutOptions {
    /// Validate the numeric ranges
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(FilmError::Config("DPI must be a positive integer".to_string()));
        }

        if !self.margin_mm.is_finite() || !(0.0..=MAX_MARGIN_MM).contains(&self.margin_mm) {
            return Err(FilmError::Config(format!(
                "Margin must be between 0 and {} mm, got {}",
                MAX_MARGIN_MM, self.margin_mm
            )));
        }

        if !self.gap_mm.is_finite() || !(0.0..=MAX_GAP_MM).contains(&self.gap_mm) {
            return Err(FilmError::Config(format!(
                "Gap must be between 0 and {} mm, got {}",
                MAX_GAP_MM, self.gap_mm
            )));
        }

        Ok(())
    }

    pub fn margin_px(&self) -> u32 {
        mm_to_px(self.margin_mm, self.dpi)
    }

    pub fn gap_px(&self) -> u32 {
        mm_to_px(self.gap_mm, self.dpi)
    }

    /// Same layout at another resolution, for low-resolution previews
    pub fn at_dpi(&self, dpi: u32) -> Self {
        Self { dpi, ..*self }
    }
}

/// A complete job: the ordered photos and how to lay them out
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilmProject {
    pub photos: Vec<FrameSettings>,
    pub layout: LayoutOptions,
}

impl FilmProject {
    /// Load a project from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let project = serde_json::from_slice(&bytes)
            .map_err(|e| FilmError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(project)
    }

    /// Save the project to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| FilmError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.photos.is_empty() {
            return Err(FilmError::Config("No photos specified".to_string()));
        }
        self.layout.validate()
    }

    /// Apply one style to every photo
    pub fn apply_style(&mut self, style: FrameStyle) {
        for photo in &mut self.photos {
            photo.style = style;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        assert!(LayoutOptions::default().validate().is_ok());
    }

    #[test]
    fn test_margin_bounds() {
        let mut options = LayoutOptions::default();
        options.margin_mm = 50.0;
        assert!(options.validate().is_ok());
        options.margin_mm = 50.5;
        assert!(options.validate().is_err());
        options.margin_mm = -1.0;
        assert!(options.validate().is_err());
        options.margin_mm = f64::NAN;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_gap_bounds() {
        let mut options = LayoutOptions::default();
        options.gap_mm = 0.0;
        assert!(options.validate().is_ok());
        options.gap_mm = 20.0;
        assert!(options.validate().is_ok());
        options.gap_mm = 21.0;
        match options.validate() {
            Err(FilmError::Config(msg)) => assert!(msg.contains("Gap")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_dpi_rejected() {
        let options = LayoutOptions {
            dpi: 0,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_pixel_margins_follow_dpi() {
        let options = LayoutOptions::default();
        assert_eq!(options.margin_px(), 118);
        assert_eq!(options.gap_px(), 23);
        assert_eq!(options.at_dpi(600).margin_px(), 236);
    }

    #[test]
    fn test_apply_style_to_all() {
        let mut project = FilmProject {
            photos: vec![FrameSettings::new("a.jpg"), FrameSettings::new("b.jpg")],
            ..Default::default()
        };
        let style = FrameStyle {
            polarity: Polarity::Negative,
            ..Default::default()
        };
        project.apply_style(style);
        assert!(project.photos.iter().all(|p| p.style.polarity == Polarity::Negative));
    }

    #[test]
    fn test_empty_project_rejected() {
        let project = FilmProject::default();
        assert!(project.validate().is_err());
    }
}
