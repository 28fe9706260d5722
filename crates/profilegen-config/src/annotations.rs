use std::any::type_name;

use documented::{Documented, DocumentedFields};
use toml_edit::{Decor, Item, RawString, Table};
use tracing::warn;

use crate::error::{ConfigError, Result};

/// Turns every line of `docs` into a `#` comment placed before the decorated item.
///
/// Comments already present in the prefix are kept; a bare `#` line separates
/// them from the new block.
pub fn prepend_doc_comments(decor: &mut Decor, docs: &str) {
    let comments: String = docs
        .lines()
        .map(|line| match line.trim_end() {
            "" => "#\n".to_string(),
            line => format!("# {line}\n"),
        })
        .collect();

    let existing = decor
        .prefix()
        .and_then(RawString::as_str)
        .unwrap_or_default();

    let prefix = if existing.is_empty() || existing.ends_with("\n\n") {
        format!("{existing}{comments}")
    } else if existing.ends_with('\n') {
        format!("{existing}#\n{comments}")
    } else {
        format!("{existing}\n{comments}")
    };
    decor.set_prefix(prefix);
}

/// Writes the field docs of `T` as comments above the matching keys of `table`.
///
/// The container docs of `T` go above the table itself unless it is the
/// document root.
pub fn annotate_toml_table<T>(table: &mut Table, is_root: bool) -> Result<()>
where
    T: Documented + DocumentedFields,
{
    if !is_root {
        prepend_doc_comments(table.decor_mut(), T::DOCS);
    }

    for (mut key, item) in table.iter_mut() {
        let name = key.get().to_string();
        let Ok(docs) = T::get_field_docs(&name) else {
            warn!(
                "Field '{}' has no documentation in '{}'",
                name,
                type_name::<T>()
            );
            continue;
        };

        match item {
            Item::None => return Err(ConfigError::UnexpectedTomlItem(name)),
            Item::Value(_) => prepend_doc_comments(key.leaf_decor_mut(), docs),
            Item::Table(sub_table) => prepend_doc_comments(sub_table.decor_mut(), docs),
            Item::ArrayOfTables(_) => return Err(ConfigError::UnexpectedTomlItem(name)),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use toml_edit::{DocumentMut, Decor};

    use super::*;
    use crate::config::Config;

    #[test]
    fn test_prepend_doc_comments() {
        let mut decor = Decor::new("", "");
        prepend_doc_comments(&mut decor, "Where the README is written");

        let prefix = decor.prefix().and_then(|p| p.as_str()).unwrap();
        assert_eq!(prefix, "# Where the README is written\n");
    }

    #[test]
    fn test_prepend_doc_comments_multiline() {
        let mut decor = Decor::new("", "");
        prepend_doc_comments(&mut decor, "Line 1\n\nLine 3");

        let prefix = decor.prefix().and_then(|p| p.as_str()).unwrap();
        assert_eq!(prefix, "# Line 1\n#\n# Line 3\n");
    }

    #[test]
    fn test_prepend_keeps_existing_comments() {
        let mut decor = Decor::new("# existing\n", "");
        prepend_doc_comments(&mut decor, "added");

        let prefix = decor.prefix().and_then(|p| p.as_str()).unwrap();
        assert_eq!(prefix, "# existing\n#\n# added\n");
    }

    #[test]
    fn test_annotate_config_table() {
        let mut doc: DocumentMut = "output = \"README.md\"\ntitle = \"Mine\"\n".parse().unwrap();
        annotate_toml_table::<Config>(doc.as_table_mut(), true).unwrap();

        let rendered = doc.to_string();
        assert!(rendered.contains("# Path of the generated document"));
        assert!(rendered.contains("output = \"README.md\""));
    }

    #[test]
    fn test_unknown_key_is_skipped() {
        let mut doc: DocumentMut = "not_a_field = 1\n".parse().unwrap();
        annotate_toml_table::<Config>(doc.as_table_mut(), true).unwrap();
        assert_eq!(doc.to_string(), "not_a_field = 1\n");
    }
}
