//! Fixed plain-text serialization of a stored resume, used as analyzer input.

use crate::models::resume::{Experience, Resume};

/// Renders the resume as labelled plain text, one entry per line.
pub fn resume_to_text(resume: &Resume) -> String {
    let info = &resume.personal_info;
    let mut out = String::new();

    out.push_str(&format!("Name: {}\n", info.full_name));
    out.push_str(&format!("Role: {}\n", info.profession));
    out.push_str(&format!("Summary: {}\n", resume.professional_summary));

    out.push_str("\nExperience:\n");
    for exp in &resume.experience {
        out.push_str(&experience_line(exp));
        out.push('\n');
    }

    out.push_str("\nEducation:\n");
    for edu in &resume.education {
        out.push_str(&format!(
            "{} in {} at {}\n",
            edu.degree, edu.field, edu.institution
        ));
    }

    out.push_str("\nProjects:\n");
    for project in &resume.projects {
        out.push_str(&format!(
            "{}: {}\n",
            project.name,
            project.description.join(". ")
        ));
    }

    out.push_str("\nSkills:\n");
    for line in &resume.skills {
        match line.heading() {
            Some(heading) => out.push_str(&format!("{heading}: {}\n", line.items.join(", "))),
            None => out.push_str(&format!("{}\n", line.items.join(", "))),
        }
    }

    out
}

fn experience_line(exp: &Experience) -> String {
    let end = if exp.is_current {
        "Present"
    } else {
        exp.end_date.year.as_str()
    };
    format!(
        "{} at {} ({}-{}). {}",
        exp.position,
        exp.company,
        exp.start_date.year,
        end,
        exp.description.join(". ")
    )
}
