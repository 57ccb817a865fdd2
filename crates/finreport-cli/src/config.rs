use finreport_core::EngineConfig;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load engine configuration from a YAML or JSON file. No path means
/// defaults.
pub fn load(path: Option<&str>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config '{}': {}", path, e))?;
    let config = parse(&contents, is_json(path))
        .map_err(|e| format!("Failed to parse config '{}': {}", path, e))?;
    config.validate()?;
    debug!(path, ?config, "loaded engine config");
    Ok(config)
}

fn is_json(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn parse(contents: &str, json: bool) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    if contents.trim().is_empty() {
        return Ok(EngineConfig::default());
    }
    let config = if json {
        serde_json::from_str(contents)?
    } else {
        serde_yaml::from_str(contents)?
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_overrides() {
        let yaml = "estimation:\n  quick_asset_share: 0.75\nmax_years: 3\n";
        let config = parse(yaml, false).unwrap();
        assert_eq!(config.estimation.quick_asset_share, 0.75);
        assert_eq!(config.estimation.inventory_share, 0.2);
        assert_eq!(config.max_years, 3);
    }

    #[test]
    fn test_json_and_empty() {
        let config = parse(r#"{"max_years": 1}"#, true).unwrap();
        assert_eq!(config.max_years, 1);
        assert_eq!(parse("  \n", false).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_extension_detection() {
        assert!(is_json("engine.JSON"));
        assert!(!is_json("engine.yaml"));
        assert!(!is_json("engine"));
    }
}
