use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, SAMPLE_INDEX, stderr, stdout};

const SAMPLE_TABLE: &str = r#"TECHNIQUES_TESTNUMBERS = [
    (r"T1546.004-1",'echo \'#{command_to_add}\' >> ~/.bash_profile'),
    (r"T1546.004-2",'echo \'#{command_to_add}\' >> ~/.bashrc'),
    (r"T1036.003-2",r'cp -i /bin/sh /tmp/crond; /tmp/crond'),
]
"#;

#[test]
fn test_generate_python_table() -> Result<()> {
    let test = CliTest::with_file("index.yaml", SAMPLE_INDEX)?;

    let output = test
        .generate_command()
        .args(["-i", "index.yaml", "-o", "out.py"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("out.py")?, SAMPLE_TABLE);

    let stdout = stdout(&output);
    let first_line = stdout.lines().next().unwrap_or_default();
    assert_snapshot!(first_line, @"✓ Wrote 3 fingerprints to out.py (python)");
    assert!(stdout.contains("Techniques found: 2"));
    assert!(stdout.contains("Implemented test cases found: 3"));
    assert!(stdout.contains("Manual only test cases found: 1"));

    Ok(())
}

#[test]
fn test_generate_reports_manual_tests() -> Result<()> {
    let test = CliTest::with_file("index.yaml", SAMPLE_INDEX)?;

    let output = test
        .generate_command()
        .args(["-i", "index.yaml", "-o", "out.py", "-l", "WARNING"])
        .output()?;

    assert!(output.status.success());
    let stderr = stderr(&output);
    assert!(stderr.contains("no command line found for this test"));
    assert!(stderr.contains("T1036.003 #1"));
    assert!(stderr.contains("warning: 1 data-quality issue in index.yaml"));

    Ok(())
}

#[test]
fn test_generate_json_table() -> Result<()> {
    let test = CliTest::with_file("index.yaml", SAMPLE_INDEX)?;

    let output = test
        .generate_command()
        .args(["-i", "index.yaml", "-o", "out.json", "--format", "json"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let table: Value = serde_json::from_str(&test.read_file("out.json")?)?;
    assert_eq!(
        table,
        serde_json::json!([
            ["T1546.004-1", "echo '#{command_to_add}' >> ~/.bash_profile"],
            ["T1546.004-2", "echo '#{command_to_add}' >> ~/.bashrc"],
            ["T1036.003-2", "cp -i /bin/sh /tmp/crond; /tmp/crond"],
        ])
    );

    Ok(())
}

#[test]
fn test_generate_uses_default_file_names() -> Result<()> {
    let test = CliTest::with_file("example.index.yaml", SAMPLE_INDEX)?;

    let output = test.generate_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("CANDIDATE-techniques_testnumber.py")?,
        SAMPLE_TABLE
    );

    Ok(())
}

#[test]
fn test_generate_reads_config_file() -> Result<()> {
    let test = CliTest::with_file("atomics/Indexes/index.yaml", SAMPLE_INDEX)?;
    test.write_file(
        ".techtestrc.json",
        r#"{
            "indexFile": "atomics/Indexes/index.yaml",
            "outputFile": "table.json",
            "format": "json",
            "fingerprintLength": 10
        }"#,
    )?;

    let output = test.generate_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let table: Vec<(String, String)> = serde_json::from_str(&test.read_file("table.json")?)?;
    assert_eq!(
        table,
        vec![
            ("T1546.004-1".to_string(), "echo '#{co".to_string()),
            ("T1546.004-2".to_string(), "echo '#{co".to_string()),
            ("T1036.003-2".to_string(), "cp -i /bin".to_string()),
        ]
    );

    Ok(())
}

#[test]
fn test_cli_overrides_config_file() -> Result<()> {
    let test = CliTest::with_file("index.yaml", SAMPLE_INDEX)?;
    test.write_file(
        ".techtestrc.json",
        r#"{ "indexFile": "missing.yaml", "format": "json" }"#,
    )?;

    let output = test
        .generate_command()
        .args(["-i", "index.yaml", "-o", "out.py", "--format", "python"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("out.py")?, SAMPLE_TABLE);

    Ok(())
}

#[test]
fn test_missing_index_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .generate_command()
        .args(["-i", "nope.yaml"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Index file not found: nope.yaml"));
    assert!(!test.root().join("CANDIDATE-techniques_testnumber.py").exists());

    Ok(())
}

#[test]
fn test_invalid_yaml() -> Result<()> {
    let test = CliTest::with_file("index.yaml", "persistence: [unclosed\n")?;

    let output = test
        .generate_command()
        .args(["-i", "index.yaml"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to load index file: index.yaml"));

    Ok(())
}

#[test]
fn test_strict_fails_on_data_quality_issues() -> Result<()> {
    let test = CliTest::with_file("index.yaml", SAMPLE_INDEX)?;

    let output = test
        .generate_command()
        .args(["-i", "index.yaml", "-o", "out.py", "--strict"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: 1 data-quality issue"));
    // The table is still written.
    assert_eq!(test.read_file("out.py")?, SAMPLE_TABLE);

    Ok(())
}

#[test]
fn test_strict_passes_on_clean_index() -> Result<()> {
    let test = CliTest::with_file(
        "index.yaml",
        r#"
discovery:
  T1082:
    technique:
      name: System Information Discovery
    atomic_tests:
    - name: List OS Information
      executor:
        command: uname -a
        name: sh
"#,
    )?;

    let output = test
        .generate_command()
        .args(["-i", "index.yaml", "-o", "out.py", "--strict"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("out.py")?,
        "TECHNIQUES_TESTNUMBERS = [\n    (r\"T1082-1\",r'uname -a'),\n]\n"
    );

    Ok(())
}

#[test]
fn test_malformed_technique_is_skipped() -> Result<()> {
    let test = CliTest::with_file(
        "index.yaml",
        r#"
discovery:
  T1018:
    technique:
      name: Remote System Discovery
  T1082:
    technique:
      name: System Information Discovery
    atomic_tests:
    - name: List OS Information
      executor:
        command: uname -a
        name: sh
"#,
    )?;

    let output = test
        .generate_command()
        .args(["-i", "index.yaml", "-o", "out.py"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stderr = stderr(&output);
    assert!(stderr.contains("technique entry has no test list, technique skipped"));
    assert!(stderr.contains("1 skipped technique"));
    assert!(stdout(&output).contains("Techniques found: 2"));
    assert_eq!(
        test.read_file("out.py")?,
        "TECHNIQUES_TESTNUMBERS = [\n    (r\"T1082-1\",r'uname -a'),\n]\n"
    );

    Ok(())
}

#[test]
fn test_empty_index() -> Result<()> {
    let test = CliTest::with_file("index.yaml", "")?;

    let output = test
        .generate_command()
        .args(["-i", "index.yaml", "-o", "out.py"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("out.py")?, "TECHNIQUES_TESTNUMBERS = [\n]\n");
    assert!(stdout(&output).contains("Techniques found: 0"));

    Ok(())
}

#[test]
fn test_invalid_log_level_defaults_to_error() -> Result<()> {
    let test = CliTest::with_file("index.yaml", SAMPLE_INDEX)?;

    let output = test
        .generate_command()
        .args(["-i", "index.yaml", "-o", "out.py", "-l", "LOUD"])
        .output()?;

    assert!(output.status.success());
    let stderr = stderr(&output);
    assert!(stderr.contains("invalid log level \"LOUD\", defaulting to ERROR"));
    // Per-test warnings are below the ERROR threshold.
    assert!(!stderr.contains("no command line found"));

    Ok(())
}

#[test]
fn test_zero_fingerprint_length_is_rejected() -> Result<()> {
    let test = CliTest::with_file("index.yaml", SAMPLE_INDEX)?;

    let output = test
        .generate_command()
        .args(["-i", "index.yaml", "--fingerprint-length", "0"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("fingerprintLength"));

    Ok(())
}

#[test]
fn test_cli_length_overrides_invalid_config_length() -> Result<()> {
    let test = CliTest::with_file("index.yaml", SAMPLE_INDEX)?;
    test.write_file(".techtestrc.json", r#"{ "fingerprintLength": 0 }"#)?;

    let output = test
        .generate_command()
        .args(["-i", "index.yaml", "-o", "out.json", "--format", "json"])
        .args(["--fingerprint-length", "10"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let table: Vec<(String, String)> = serde_json::from_str(&test.read_file("out.json")?)?;
    assert_eq!(table[2], ("T1036.003-2".to_string(), "cp -i /bin".to_string()));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("generate"));
    assert!(stdout(&output).contains("init"));

    Ok(())
}
