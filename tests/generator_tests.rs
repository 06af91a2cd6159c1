//! End-to-end tests for the generator workflow.
//!
//! These drive `generator::run` the way an administrator would: a JSON
//! config, a CSV of queue definitions, an optional exclusions file, and a
//! script template, all in a temporary directory.

use printmapper::generator;
use printmapper::QueueCatalog;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CSV: &str = "\
DisplayName,URI,Driver,DriverTrigger,Location,CUPSName,Options
Lib-3F,lpd://10.0.0.5,,,Library 3rd Floor,,duplex=DuplexNoTumble
Lab-1,lpd://10.0.0.6,/Library/Printers/Vendor.ppd,InstallVendorDriver,Lab 1,,
";

const TEMPLATE: &str = "\
#!/bin/sh
cat <<'EOF'
{{CATALOG_JSON}}
EOF
";

struct Fixture {
    _dir: TempDir,
    config_path: PathBuf,
    csv_path: PathBuf,
    catalog_path: PathBuf,
    script_path: PathBuf,
    root: PathBuf,
}

fn fixture(csv: &str) -> Fixture {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_path_buf();

    let csv_path = root.join("queues.csv");
    fs::write(&csv_path, csv).unwrap();

    let template_path = root.join("installer.sh.tmpl");
    fs::write(&template_path, TEMPLATE).unwrap();

    let catalog_path = root.join("printer-queues.json");
    let script_path = root.join("printer-installer.sh");

    let config_path = root.join("generator.json");
    let config = serde_json::json!({
        "catalog_path": catalog_path,
        "script_path": script_path,
        "template_path": template_path,
    });
    fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    Fixture {
        _dir: dir,
        config_path,
        csv_path,
        catalog_path,
        script_path,
        root,
    }
}

#[test]
fn generate_writes_catalog_and_script() {
    let fx = fixture(CSV);
    generator::run(&fx.config_path, &fx.csv_path, None).unwrap();

    let json = fs::read_to_string(&fx.catalog_path).unwrap();
    let catalog = QueueCatalog::from_json(&json).unwrap();
    assert_eq!(catalog.len(), 2);

    let lib = catalog.get("Lib-3F").unwrap();
    assert_eq!(lib.options.get("duplex").unwrap(), "DuplexNoTumble");
    let lab = catalog.get("Lab-1").unwrap();
    assert!(lab.options.is_empty());
    assert_eq!(lab.driver, "/Library/Printers/Vendor.ppd");

    // The script is the template with the catalog JSON substituted verbatim.
    let script = fs::read_to_string(&fx.script_path).unwrap();
    assert!(script.starts_with("#!/bin/sh"));
    assert!(script.contains(&json));
    assert!(!script.contains("{{CATALOG_JSON}}"));
}

#[test]
#[cfg(unix)]
fn generated_script_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let fx = fixture(CSV);
    generator::run(&fx.config_path, &fx.csv_path, None).unwrap();
    let mode = fs::metadata(&fx.script_path).unwrap().permissions().mode();
    assert_ne!(mode & 0o111, 0, "installer script should be executable");
}

#[test]
fn excluded_queues_are_dropped_before_emission() {
    let fx = fixture(CSV);
    let exclude_path = fx.root.join("exclusions.txt");
    fs::write(&exclude_path, "Lab-1\n").unwrap();

    generator::run(&fx.config_path, &fx.csv_path, Some(&exclude_path)).unwrap();

    let json = fs::read_to_string(&fx.catalog_path).unwrap();
    let catalog = QueueCatalog::from_json(&json).unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.get("Lab-1").is_none());
}

#[test]
fn missing_required_column_rejected_before_output() {
    let csv = "\
DisplayName,Driver,DriverTrigger,Location,Options
Lab-1,,,Lab 1,
";
    let fx = fixture(csv);
    let err = generator::run(&fx.config_path, &fx.csv_path, None).unwrap_err();
    assert!(err.to_string().contains("missing required CSV field: URI"));
    assert!(
        !fx.catalog_path.exists(),
        "no catalog may be produced for an invalid CSV"
    );
    assert!(!fx.script_path.exists());
}

#[test]
fn catalog_json_round_trips() {
    let fx = fixture(CSV);
    generator::run(&fx.config_path, &fx.csv_path, None).unwrap();

    let json = fs::read_to_string(&fx.catalog_path).unwrap();
    let catalog = QueueCatalog::from_json(&json).unwrap();
    let rewritten = catalog.to_pretty_json().unwrap();
    assert_eq!(json, rewritten);
}

#[test]
fn catalog_formatting_is_four_space_indent() {
    let fx = fixture(CSV);
    generator::run(&fx.config_path, &fx.csv_path, None).unwrap();

    let json = fs::read_to_string(&fx.catalog_path).unwrap();
    assert!(json.contains("\n    \"Lib-3F\": {\n"));
    assert!(json.contains("\n        \"DisplayName\": \"Lib-3F\",\n"));
    assert!(json.contains("\"URI\": \"lpd://10.0.0.5\""));
}

#[test]
fn insertion_order_preserved_in_catalog() {
    let fx = fixture(CSV);
    generator::run(&fx.config_path, &fx.csv_path, None).unwrap();

    let json = fs::read_to_string(&fx.catalog_path).unwrap();
    let lib_pos = json.find("\"Lib-3F\"").unwrap();
    let lab_pos = json.find("\"Lab-1\"").unwrap();
    assert!(lib_pos < lab_pos, "CSV row order must be preserved");
}

#[test]
fn missing_output_directory_is_fatal() {
    let fx = fixture(CSV);
    // Rewrite the config to point the script at a directory that does not
    // exist; the generator must not create it.
    let config = serde_json::json!({
        "catalog_path": fx.catalog_path,
        "script_path": fx.root.join("no-such-dir").join("installer.sh"),
        "template_path": fx.root.join("installer.sh.tmpl"),
    });
    fs::write(
        &fx.config_path,
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();

    assert!(generator::run(&fx.config_path, &fx.csv_path, None).is_err());
    assert!(!fx.root.join("no-such-dir").exists());
}

#[test]
fn template_without_placeholder_is_rejected() {
    let fx = fixture(CSV);
    fs::write(fx.root.join("installer.sh.tmpl"), "#!/bin/sh\nexit 0\n").unwrap();

    let err = generator::run(&fx.config_path, &fx.csv_path, None).unwrap_err();
    assert!(err.to_string().contains("placeholder"));
}

#[test]
fn config_substitutions_are_applied() {
    let fx = fixture(CSV);
    fs::write(
        fx.root.join("installer.sh.tmpl"),
        "#!/bin/sh\n# {{TITLE}}\ncat <<'EOF'\n{{CATALOG_JSON}}\nEOF\n",
    )
    .unwrap();
    let config = serde_json::json!({
        "catalog_path": fx.catalog_path,
        "script_path": fx.script_path,
        "template_path": fx.root.join("installer.sh.tmpl"),
        "substitutions": { "TITLE": "Printer Installer" },
    });
    fs::write(
        &fx.config_path,
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();

    generator::run(&fx.config_path, &fx.csv_path, None).unwrap();
    let script = fs::read_to_string(&fx.script_path).unwrap();
    assert!(script.contains("# Printer Installer\n"));
}

#[test]
fn shipped_template_accepts_generated_catalog() {
    let fx = fixture(CSV);
    let shipped = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates/printer-installer.sh.tmpl");
    let config = serde_json::json!({
        "catalog_path": fx.catalog_path,
        "script_path": fx.script_path,
        "template_path": shipped,
    });
    fs::write(
        &fx.config_path,
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();

    generator::run(&fx.config_path, &fx.csv_path, None).unwrap();
    let script = fs::read_to_string(&fx.script_path).unwrap();
    assert!(script.contains("printmapper install --catalog"));
    assert!(script.contains("\"Lib-3F\""));
}
