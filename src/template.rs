//! Installer script template injection.
//!
//! The template is a plain text file with `{{NAME}}` placeholders. The
//! catalog placeholder must be present; additional substitutions from the
//! generator config are applied verbatim when their placeholders appear.
//! No escaping is performed beyond what the JSON serializer already
//! guarantees.

use crate::error::{PrintMapperError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

fn placeholder_token(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

/// Substitute the catalog JSON and any extra config values into a template.
///
/// Fails if the catalog placeholder does not appear in the template; extra
/// substitutions are best-effort by design (a template need not use every
/// branding string).
pub fn inject(
    template: &str,
    catalog_placeholder: &str,
    catalog_json: &str,
    substitutions: &BTreeMap<String, String>,
) -> Result<String> {
    let token = placeholder_token(catalog_placeholder);
    if !template.contains(&token) {
        return Err(PrintMapperError::template(format!(
            "template does not contain placeholder {token}"
        )));
    }

    let mut rendered = template.replace(&token, catalog_json);
    for (name, value) in substitutions {
        rendered = rendered.replace(&placeholder_token(name), value);
    }
    Ok(rendered)
}

/// Write the rendered installer script, overwriting any existing file and
/// marking it executable.
///
/// Parent directories are never created; a missing output directory is a
/// fatal I/O error.
pub fn write_executable(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }

    Ok(())
}
