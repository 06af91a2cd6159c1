//! Generator and installer configuration.
//!
//! Every external path, trigger name, and user-facing string lives here so
//! nothing is discovered at runtime and no module carries global state. The
//! defaults mirror the standard managed-Mac deployment; a JSON config file
//! can override any subset of fields.

use crate::error::{PrintMapperError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Delimiter between entries in the CSV `Options` cell.
///
/// Both forms have shipped historically, so this is a documented choice at
/// the CSV-format boundary rather than a hardcoded convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionsDelimiter {
    /// `duplex=DuplexNoTumble,media=A4`
    #[default]
    Comma,
    /// `duplex=DuplexNoTumble media=A4`
    Space,
}

impl OptionsDelimiter {
    /// Split a raw options cell into `key=value` entries.
    pub fn entries<'a>(&self, raw: &'a str) -> Vec<&'a str> {
        match self {
            Self::Comma => raw.split(',').collect(),
            Self::Space => raw.split_whitespace().collect(),
        }
    }
}

/// Configuration for the `generate` subcommand, loaded from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Where to write the queue catalog JSON.
    pub catalog_path: PathBuf,
    /// Where to write the generated installer script.
    pub script_path: PathBuf,
    /// Installer script template containing the catalog placeholder.
    pub template_path: PathBuf,
    /// Name of the placeholder the catalog JSON is substituted into.
    pub catalog_placeholder: String,
    pub options_delimiter: OptionsDelimiter,
    /// Additional placeholder substitutions (branding strings, messages)
    /// applied verbatim to the template.
    pub substitutions: BTreeMap<String, String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("output/printer-queues.json"),
            script_path: PathBuf::from("output/printer-installer.sh"),
            template_path: PathBuf::from("templates/printer-installer.sh.tmpl"),
            catalog_placeholder: "CATALOG_JSON".to_string(),
            options_delimiter: OptionsDelimiter::default(),
            substitutions: BTreeMap::new(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PrintMapperError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            PrintMapperError::config(format!("failed to parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.catalog_placeholder.trim().is_empty() {
            return Err(PrintMapperError::config(
                "catalog_placeholder must not be empty",
            ));
        }
        for field in [
            ("catalog_path", &self.catalog_path),
            ("script_path", &self.script_path),
            ("template_path", &self.template_path),
        ] {
            if field.1.as_os_str().is_empty() {
                return Err(PrintMapperError::config(format!(
                    "{} must not be empty",
                    field.0
                )));
            }
        }
        Ok(())
    }
}

/// User-facing dialog strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Shown when the installation process fails for unknown reasons.
    pub undefined_error: String,
    /// Shown when every available queue is already mapped.
    pub all_mapped: String,
    /// Shown when a required driver could not be installed.
    pub driver_install_failed: String,
    /// Shown when the queue-admin command fails.
    pub mapping_failed: String,
    /// Shown after a successful mapping; `{queue}` expands to the queue name.
    pub success: String,
    pub prompt_title: String,
    pub prompt_text: String,
    pub progress_title: String,
    pub progress_text: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            undefined_error: "An error occured; please contact your support team for assistance."
                .to_string(),
            all_mapped: "All available print queues are already mapped to this computer. \
                         Please contact ITS if you need further assistance."
                .to_string(),
            driver_install_failed: "A driver is required for full control of this printer, but \
                                    an error occurred when attempting to install the software. \
                                    Please contact ITS for assistance."
                .to_string(),
            mapping_failed: "There was a problem mapping the printer queue - please try again. \
                             If the problem persists, contact ITS for further assistance."
                .to_string(),
            success: "The printer queue '{queue}' was successfully added. You should now be \
                      able to send jobs to this printer."
                .to_string(),
            prompt_title: "Select Print Queue".to_string(),
            prompt_text: "Choose a print queue to add to your computer:".to_string(),
            progress_title: "Please wait...".to_string(),
            progress_text: "Installing software...".to_string(),
        }
    }
}

impl Messages {
    /// Expand the success message for a mapped queue.
    pub fn success_for(&self, queue: &str) -> String {
        self.success.replace("{queue}", queue)
    }
}

/// Configuration for the installer runtime.
///
/// Tool locations are fixed deployment paths, never probed for alternates;
/// the only remediation for a missing binary is the install-on-demand policy
/// trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Print-status query utility.
    pub print_status_path: PathBuf,
    /// Queue-administration utility.
    pub queue_admin_path: PathBuf,
    /// GUI dialog helper.
    pub dialog_path: PathBuf,
    /// Device-management agent binary.
    pub management_path: PathBuf,
    /// Fallback PostScript driver used when a queue has no vendor driver.
    pub generic_driver_path: PathBuf,
    /// Icon shown in message dialogs.
    pub brand_icon_path: PathBuf,
    /// Policy trigger that installs the dialog helper when it is missing.
    pub dialog_install_trigger: String,
    /// Title for all dialog windows.
    pub window_title: String,
    pub messages: Messages,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            print_status_path: PathBuf::from("/usr/bin/lpstat"),
            queue_admin_path: PathBuf::from("/usr/sbin/lpadmin"),
            dialog_path: PathBuf::from(
                "/Applications/cocoaDialog.app/Contents/MacOS/cocoaDialog",
            ),
            management_path: PathBuf::from("/usr/local/bin/jamf"),
            generic_driver_path: PathBuf::from(
                "/System/Library/Frameworks/ApplicationServices.framework/Versions/A/\
                 Frameworks/PrintCore.framework/Versions/A/Resources/Generic.ppd",
            ),
            brand_icon_path: PathBuf::from(
                "/System/Library/CoreServices/Certificate Assistant.app/Contents/\
                 Resources/AppIcon.icns",
            ),
            dialog_install_trigger: "InstallcocoaDialog".to_string(),
            window_title: "Printer Installer".to_string(),
            messages: Messages::default(),
        }
    }
}

impl InstallerConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PrintMapperError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            PrintMapperError::config(format!("failed to parse {}: {e}", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_entries() {
        let raw = "duplex=DuplexNoTumble,media=A4";
        assert_eq!(
            OptionsDelimiter::Comma.entries(raw),
            vec!["duplex=DuplexNoTumble", "media=A4"]
        );

        let raw = "duplex=DuplexNoTumble media=A4";
        assert_eq!(
            OptionsDelimiter::Space.entries(raw),
            vec!["duplex=DuplexNoTumble", "media=A4"]
        );
    }

    #[test]
    fn test_generator_config_defaults_validate() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.options_delimiter, OptionsDelimiter::Comma);
    }

    #[test]
    fn test_generator_config_rejects_empty_placeholder() {
        let config = GeneratorConfig {
            catalog_placeholder: "  ".to_string(),
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_overrides_defaults() {
        let json = r#"{ "options_delimiter": "space", "catalog_path": "out/queues.json" }"#;
        let config: GeneratorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.options_delimiter, OptionsDelimiter::Space);
        assert_eq!(config.catalog_path, PathBuf::from("out/queues.json"));
        assert_eq!(config.catalog_placeholder, "CATALOG_JSON");
    }

    #[test]
    fn test_installer_config_defaults() {
        let config = InstallerConfig::default();
        assert_eq!(config.management_path, PathBuf::from("/usr/local/bin/jamf"));
        assert_eq!(config.dialog_install_trigger, "InstallcocoaDialog");
        assert_eq!(
            config.messages.success_for("Lab-1"),
            "The printer queue 'Lab-1' was successfully added. You should now be able to \
             send jobs to this printer."
        );
    }
}
