use std::{collections::HashMap, fs, path::Path};

use tracing::debug;

use crate::{
    error::{InputContext, ProfileError},
    names::normalize_name,
    ProfileResult,
};

/// Meaningful lines of a list file: trimmed, with blank lines and `#`
/// comments removed.
pub fn parse_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Reads a newline-delimited list. No path means an empty list.
pub fn load_list(kind: &'static str, path: Option<&Path>) -> ProfileResult<Vec<String>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let content = fs::read_to_string(path).input_context(kind, path)?;
    let lines = parse_list(&content);
    debug!("Loaded {} {} entries from {}", lines.len(), kind, path.display());
    Ok(lines)
}

/// Image credit shown on a repository card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiCredit {
    pub name: String,
    pub image: String,
    pub alt: String,
    pub title: String,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl AiCredit {
    const FIELDS: usize = 6;

    /// Parses `name|image-path|alt-text|title-text|width|height`.
    ///
    /// Width and height may be left empty.
    pub fn parse(line: &str) -> Result<Self, String> {
        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        if fields.len() != Self::FIELDS {
            return Err(format!(
                "expected {} fields, found {}",
                Self::FIELDS,
                fields.len()
            ));
        }
        if fields[0].is_empty() {
            return Err("repository name is empty".to_string());
        }
        if fields[1].is_empty() {
            return Err("image path is empty".to_string());
        }

        let optional = |value: &str| (!value.is_empty()).then(|| value.to_string());

        Ok(Self {
            name: fields[0].to_string(),
            image: fields[1].to_string(),
            alt: fields[2].to_string(),
            title: fields[3].to_string(),
            width: optional(fields[4]),
            height: optional(fields[5]),
        })
    }
}

/// AI credits keyed by repository name, case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct AiCredits {
    credits: HashMap<String, AiCredit>,
}

impl AiCredits {
    pub fn get(&self, name: &str) -> Option<&AiCredit> {
        self.credits.get(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.credits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credits.is_empty()
    }

    /// Parses the credit file content. Later lines for the same repository
    /// replace earlier ones.
    pub fn parse(content: &str, path: &Path) -> ProfileResult<Self> {
        let mut credits = HashMap::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let credit = AiCredit::parse(line).map_err(|reason| {
                ProfileError::MalformedInput {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    reason,
                }
            })?;
            credits.insert(normalize_name(&credit.name), credit);
        }

        Ok(Self { credits })
    }

    pub fn load(path: Option<&Path>) -> ProfileResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path).input_context("AI credits", path)?;
        let credits = Self::parse(&content, path)?;
        debug!("Loaded {} AI credits from {}", credits.len(), path.display());
        Ok(credits)
    }
}
