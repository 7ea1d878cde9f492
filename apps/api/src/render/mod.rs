//! Template renderer: turns a resume into a paint-ready document tree.
//!
//! Rendering is pure: the same resume and template always produce the same
//! document, and nothing here touches storage or the network.

mod classic;
pub mod document;
pub mod page;
pub mod sections;
mod single_column;

use crate::models::resume::{Resume, Template};

pub use document::{Body, Layout, RenderedDocument};
use page::PageStyle;
use single_column::Variant;

/// Renders `resume` with `template`. Templates without a dedicated layout fall
/// back to the classic one.
pub fn render(resume: &Resume, template: Template) -> RenderedDocument {
    let layout = Layout::for_template(template);

    let (header, body) = match layout {
        Layout::Classic => (classic::header(resume), classic::body(resume)),
        Layout::Modern => {
            let variant = Variant::modern(resume);
            (
                single_column::header(resume, variant),
                single_column::body(resume, variant),
            )
        }
        Layout::Minimal => {
            let variant = Variant::minimal();
            (
                single_column::header(resume, variant),
                single_column::body(resume, variant),
            )
        }
    };

    RenderedDocument {
        template,
        layout,
        page: PageStyle::for_resume(resume, layout),
        header,
        body,
    }
}

/// Renders with the resume's own template.
pub fn render_stored(resume: &Resume) -> RenderedDocument {
    render(resume, resume.template)
}
