//! Two-column layout: a coloured sidebar with photo, contact, education and
//! skills beside a main column of profile, experience and projects.
//!
//! Section placement is fixed; `sectionOrder` does not apply here.

use crate::models::resume::Resume;
use crate::render::document::{Body, Header, Section};
use crate::render::sections::{self, non_empty, EducationStyle};

const PROFILE: &str = "Profile";
const EXPERIENCE: &str = "Experience";
const PROJECTS: &str = "Projects";
const EDUCATION: &str = "Education";
const SKILLS: &str = "Skills";

pub(crate) fn header(resume: &Resume) -> Header {
    let info = &resume.personal_info;
    Header {
        name: info.full_name.trim().to_string(),
        profession: info.profession.trim().to_string(),
        photo: info.image.as_deref().and_then(non_empty),
        contacts: sections::contacts(info, false, true),
    }
}

pub(crate) fn body(resume: &Resume) -> Body {
    let sidebar: Vec<Section> = [
        sections::education(resume, EDUCATION, None, EducationStyle::Split),
        sections::skills(resume, SKILLS, None),
    ]
    .into_iter()
    .flatten()
    .collect();

    let main: Vec<Section> = [
        sections::summary(resume, PROFILE, None),
        sections::experience(resume, EXPERIENCE, None),
        sections::projects(resume, PROJECTS, None),
    ]
    .into_iter()
    .flatten()
    .collect();

    Body::Sidebar { sidebar, main }
}
