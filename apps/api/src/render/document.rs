//! Output types of the template renderer. Serializable so clients can paint them
//! directly; `PartialEq` so renders can be compared.

use serde::Serialize;

use crate::models::resume::{SectionId, Template};
use crate::render::page::PageStyle;

/// The layout strategy a template resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Coloured sidebar beside a main column, fixed section placement.
    Classic,
    /// Single column, photo and icons, sections in `sectionOrder`.
    Modern,
    /// Single column, ATS-oriented: no photo, no icons.
    Minimal,
}

impl Layout {
    pub fn for_template(template: Template) -> Self {
        match template {
            Template::Modern => Layout::Modern,
            Template::Minimal => Layout::Minimal,
            Template::Classic | Template::MinimalImage | Template::TechFocused => Layout::Classic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    pub template: Template,
    pub layout: Layout,
    pub page: PageStyle,
    pub header: Header,
    pub body: Body,
}

impl RenderedDocument {
    /// Every section in reading order (sidebar first for the classic layout).
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        let (first, second): (&[Section], &[Section]) = match &self.body {
            Body::Sidebar { sidebar, main } => (sidebar, main),
            Body::SingleColumn { sections } => (sections, &[]),
        };
        first.iter().chain(second.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Body {
    Sidebar {
        sidebar: Vec<Section>,
        main: Vec<Section>,
    },
    SingleColumn {
        sections: Vec<Section>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub name: String,
    pub profession: String,
    pub photo: Option<String>,
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactKind {
    Email,
    Phone,
    Location,
    Link,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub kind: ContactKind,
    /// Caption shown before the value (a link's name in the classic sidebar).
    pub label: Option<String>,
    pub text: String,
    pub href: Option<String>,
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Mail,
    Phone,
    MapPin,
    Link,
    Award,
    Briefcase,
    GraduationCap,
    Code,
    FolderGit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub icon: Option<Icon>,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Paragraph {
        text: String,
    },
    Entry(Entry),
    SkillGroup {
        heading: Option<String>,
        items: Vec<String>,
    },
}

/// One experience, education or project item.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub title: String,
    pub link: Option<String>,
    pub subtitle: Option<String>,
    pub dates: Option<String>,
    pub location: Option<String>,
    pub details: Vec<String>,
    pub tags: Vec<String>,
    pub bullets: Vec<String>,
}
