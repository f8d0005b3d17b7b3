use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML file (chosen by extension) into a typed struct.
pub fn read_structured<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let value: T = if is_yaml(&canonical) {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    log::debug!("loaded input from {}", canonical.display());
    Ok(value)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Resolve and validate the path, preventing directory traversal.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortgage_core::LoanParameters;
    use rust_decimal_macros::dec;
    use std::io::Write;

    const YAML: &str = "unit_price: \"37895.28\"\nproperty_value_units: \"3500\"\n\
annual_interest_rate_percent: \"4.5\"\nterm_years: 25\n\
down_payment_fraction: \"0.2\"\nsubsidy_fraction: \"0\"\n";

    #[test]
    fn test_reads_yaml_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loan.yaml");
        fs::File::create(&path).unwrap().write_all(YAML.as_bytes()).unwrap();

        let params: LoanParameters = read_structured(path.to_str().unwrap()).unwrap();
        assert_eq!(params.term_years, 25);
        assert_eq!(params.down_payment_fraction, dec!(0.2));
    }

    #[test]
    fn test_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loan.json");
        let json = r#"{"unit_price":"1","property_value_units":"100000",
            "annual_interest_rate_percent":"6","term_years":30,
            "down_payment_fraction":"0","subsidy_fraction":"0"}"#;
        fs::write(&path, json).unwrap();

        let params: LoanParameters = read_structured(path.to_str().unwrap()).unwrap();
        assert_eq!(params.property_value_units, dec!(100000));
    }

    #[test]
    fn test_missing_file() {
        let err = read_structured::<LoanParameters>("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
