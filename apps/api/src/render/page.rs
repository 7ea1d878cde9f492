//! Page geometry and typography derived from a resume's formatting block.

use serde::Serialize;

use crate::models::resume::{FontSize, PaperSize, Resume, DEFAULT_FONT_FAMILY};
use crate::render::document::Layout;

const DEFAULT_MARGIN_PX: u32 = 32;
const DEFAULT_LINE_HEIGHT: f32 = 1.5;
const DEFAULT_SECTION_SPACING_PX: u32 = 24;

/// Layout parameters for a rendered page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStyle {
    pub paper: PaperSize,
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_px: u32,
    pub font_family: String,
    pub font_size_rem: f32,
    pub line_height: f32,
    pub section_spacing_px: u32,
    pub item_spacing_px: u32,
    pub accent_color: String,
}

/// Width × height in millimetres.
pub fn paper_dimensions_mm(paper: PaperSize) -> (f32, f32) {
    match paper {
        PaperSize::A4 => (210.0, 297.0),
        PaperSize::Letter => (215.9, 279.4),
    }
}

pub fn font_size_rem(size: FontSize) -> f32 {
    match size {
        FontSize::Small => 0.875,
        FontSize::Medium => 1.0,
        FontSize::Large => 1.125,
    }
}

/// Accent used when the resume has none.
fn default_accent(layout: Layout) -> &'static str {
    match layout {
        Layout::Classic => "#2d3748",
        Layout::Modern => "#10b981",
        Layout::Minimal => "#3b82f6",
    }
}

fn default_item_spacing(layout: Layout) -> u32 {
    match layout {
        Layout::Classic => 12,
        Layout::Modern | Layout::Minimal => 16,
    }
}

/// Zero means "unset" for spacing values, as in the builder UI.
fn or_default(value: u32, default: u32) -> u32 {
    if value == 0 {
        default
    } else {
        value
    }
}

impl PageStyle {
    pub fn for_resume(resume: &Resume, layout: Layout) -> Self {
        let fmt = &resume.formatting;
        let (width_mm, height_mm) = paper_dimensions_mm(fmt.paper_size);

        let font_family = match fmt.font_family.trim() {
            "" => DEFAULT_FONT_FAMILY.to_string(),
            family => family.to_string(),
        };
        let line_height = if fmt.line_height.is_finite() && fmt.line_height > 0.0 {
            fmt.line_height
        } else {
            DEFAULT_LINE_HEIGHT
        };
        let accent_color = match resume.accent_color.trim() {
            "" => default_accent(layout).to_string(),
            color => color.to_string(),
        };

        Self {
            paper: fmt.paper_size,
            width_mm,
            height_mm,
            margin_px: or_default(fmt.margins, DEFAULT_MARGIN_PX),
            font_family,
            font_size_rem: font_size_rem(fmt.font_size),
            line_height,
            section_spacing_px: or_default(fmt.section_spacing, DEFAULT_SECTION_SPACING_PX),
            item_spacing_px: or_default(fmt.item_spacing, default_item_spacing(layout)),
            accent_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_paper_dimensions() {
        assert_eq!(paper_dimensions_mm(PaperSize::A4), (210.0, 297.0));
        assert_eq!(paper_dimensions_mm(PaperSize::Letter), (215.9, 279.4));
    }

    #[test]
    fn test_page_style_reads_formatting() {
        let mut resume = Resume::new(Uuid::new_v4(), None);
        resume.formatting.paper_size = PaperSize::Letter;
        resume.formatting.font_size = FontSize::Large;
        resume.formatting.margins = 48;
        resume.formatting.font_family = "Lato".into();

        let page = PageStyle::for_resume(&resume, Layout::Modern);
        assert_eq!(page.width_mm, 215.9);
        assert_eq!(page.font_size_rem, 1.125);
        assert_eq!(page.margin_px, 48);
        assert_eq!(page.font_family, "Lato");
        assert_eq!(page.item_spacing_px, 12);
    }

    #[test]
    fn test_page_style_falls_back_on_unset_values() {
        let mut resume = Resume::new(Uuid::new_v4(), None);
        resume.formatting.margins = 0;
        resume.formatting.item_spacing = 0;
        resume.formatting.font_family = String::new();
        resume.accent_color = String::new();

        let page = PageStyle::for_resume(&resume, Layout::Minimal);
        assert_eq!(page.margin_px, 32);
        assert_eq!(page.item_spacing_px, 16);
        assert_eq!(page.font_family, DEFAULT_FONT_FAMILY);
        assert_eq!(page.accent_color, "#3b82f6");
    }
}
