use std::fmt::Write;

use chrono::{DateTime, Utc};
use profilegen_source::RepositoryRecord;

use crate::{error::RenderError, inputs::AiCredits};

const DATE_FORMAT: &str = "%b %d, %Y";

/// Input of a renderer: the ordered repositories and the static sections.
#[derive(Debug, Clone, Default)]
pub struct ProfileDocument {
    pub title: String,
    pub repositories: Vec<RepositoryRecord>,
    pub contact: Vec<String>,
    pub ai_credits: AiCredits,
}

/// Turns a [`ProfileDocument`] into the text written to the output file.
pub trait Renderer {
    fn render(&self, document: &ProfileDocument) -> Result<String, RenderError>;
}

/// Markdown README with one HTML card per repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadmeRenderer;

impl Renderer for ReadmeRenderer {
    fn render(&self, document: &ProfileDocument) -> Result<String, RenderError> {
        let mut out = String::new();

        writeln!(out, "# {}", escape_html(&document.title))?;
        writeln!(out)?;
        writeln!(out, "<div style=\"display: flex; flex-wrap: wrap;\">")?;
        writeln!(out)?;

        for repo in &document.repositories {
            render_card(&mut out, repo, document)?;
        }

        writeln!(out, "</div>")?;

        if !document.contact.is_empty() {
            writeln!(out)?;
            writeln!(out, "## Contact")?;
            writeln!(out)?;
            for line in &document.contact {
                writeln!(out, "{line}")?;
                writeln!(out)?;
            }
        }

        Ok(out)
    }
}

fn render_card(
    out: &mut String,
    repo: &RepositoryRecord,
    document: &ProfileDocument,
) -> Result<(), RenderError> {
    let name = escape_html(&repo.name);

    writeln!(out, "<!-- Repository: {name} -->")?;
    writeln!(
        out,
        "<div style=\"border: 1px solid #e1e4e8; border-radius: 6px; padding: 16px; margin: 8px; width: 320px;\">"
    )?;
    writeln!(out, "  <h3>")?;
    writeln!(out, "    📦 <a href=\"{}\">{name}</a>", escape_html(&repo.html_url))?;
    writeln!(out, "  </h3>")?;

    if let Some(credit) = document.ai_credits.get(&repo.name) {
        let mut img = format!(
            "<img src=\"{}\" alt=\"{}\" title=\"{}\"",
            escape_html(&credit.image),
            escape_html(&credit.alt),
            escape_html(&credit.title)
        );
        if let Some(width) = &credit.width {
            write!(img, " width=\"{}\"", escape_html(width))?;
        }
        if let Some(height) = &credit.height {
            write!(img, " height=\"{}\"", escape_html(height))?;
        }
        writeln!(out, "  <p>{img}></p>")?;
    }

    match repo.description.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(description) => writeln!(out, "  <p>{}</p>", escape_html(description))?,
        None => writeln!(out, "  <p>No description provided</p>")?,
    }

    writeln!(out, "  <p>")?;
    match repo.language.as_deref().filter(|l| !l.is_empty()) {
        Some(language) => writeln!(out, "    🔵 {}  ", escape_html(language))?,
        None => writeln!(out, "    📄 No language detected  ")?,
    }
    if repo.stargazers_count > 0 {
        writeln!(out, "    ⭐ {}  ", repo.stargazers_count)?;
    }
    writeln!(out)?;
    writeln!(out, "      Created: {}  ", format_date(Some(repo.created_at)))?;
    writeln!(out, "      Updated: {}  ", format_date(Some(repo.updated_at)))?;
    writeln!(out, "       Pushed: {}  ", format_date(repo.pushed_at))?;

    if repo.has_releases {
        writeln!(
            out,
            "    🏷️ <a href=\"{}\">Releases</a>  ",
            escape_html(&repo.releases_url())
        )?;
    }
    if let Some(homepage) = repo.homepage() {
        writeln!(
            out,
            "    🔗 <a href=\"{}\">Homepage</a>  ",
            escape_html(homepage)
        )?;
    }
    if repo.fork {
        match &repo.source {
            Some(source) => writeln!(
                out,
                "    🍴 Forked from <a href=\"{}\">source</a>  ",
                escape_html(&source.html_url)
            )?,
            None => writeln!(out, "    🍴 Forked  ")?,
        }
    }
    if repo.archived {
        writeln!(out, "    🗄️ Archived  ")?;
    }
    writeln!(out, "  </p>")?;
    writeln!(out, "</div>")?;
    writeln!(out)?;

    Ok(())
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "never".to_string())
}

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
