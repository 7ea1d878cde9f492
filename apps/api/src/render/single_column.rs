//! Single-column layouts. Sections follow `formatting.sectionOrder`; ids not
//! listed there are not rendered.

use crate::models::resume::{Resume, SectionId};
use crate::render::document::{Body, Header, Icon, Section};
use crate::render::sections::{self, non_empty, EducationStyle};

/// What differs between the modern and minimal variants.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Variant {
    pub photo: bool,
    pub icons: bool,
    pub education: EducationStyle,
    pub titles: Titles,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Titles {
    pub summary: &'static str,
    pub experience: &'static str,
    pub education: &'static str,
    pub skills: &'static str,
    pub projects: &'static str,
}

impl Variant {
    /// Always shows the photo; icons follow the resume's `showIcons` switch.
    pub fn modern(resume: &Resume) -> Self {
        Self {
            photo: true,
            icons: resume.personal_info.show_icons,
            education: EducationStyle::Combined,
            titles: Titles {
                summary: "Professional Summary",
                experience: "Work Experience",
                education: "Education",
                skills: "Skills",
                projects: "Projects",
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            photo: false,
            icons: false,
            education: EducationStyle::Split,
            titles: Titles {
                summary: "Summary",
                experience: "Experience",
                education: "Education",
                skills: "Skills",
                projects: "Projects",
            },
        }
    }

    fn icon(&self, icon: Icon) -> Option<Icon> {
        self.icons.then_some(icon)
    }
}

pub(crate) fn header(resume: &Resume, variant: Variant) -> Header {
    let info = &resume.personal_info;
    Header {
        name: info.full_name.trim().to_string(),
        profession: info.profession.trim().to_string(),
        photo: if variant.photo {
            info.image.as_deref().and_then(non_empty)
        } else {
            None
        },
        contacts: sections::contacts(info, variant.icons, false),
    }
}

fn build_section(resume: &Resume, id: SectionId, variant: Variant) -> Option<Section> {
    let t = variant.titles;
    match id {
        SectionId::Summary => sections::summary(resume, t.summary, variant.icon(Icon::Award)),
        SectionId::Experience => {
            sections::experience(resume, t.experience, variant.icon(Icon::Briefcase))
        }
        SectionId::Education => sections::education(
            resume,
            t.education,
            variant.icon(Icon::GraduationCap),
            variant.education,
        ),
        SectionId::Skills => sections::skills(resume, t.skills, variant.icon(Icon::Code)),
        SectionId::Projects => sections::projects(resume, t.projects, variant.icon(Icon::FolderGit)),
    }
}

pub(crate) fn body(resume: &Resume, variant: Variant) -> Body {
    let sections = resume
        .formatting
        .section_order
        .iter()
        .filter_map(|&id| build_section(resume, id, variant))
        .collect();
    Body::SingleColumn { sections }
}
