use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use flat_crawler::config::load_config;
///
/// let config = load_config(Path::new("flats.toml")).unwrap();
/// println!("Start URL: {}", config.job.construct_url());
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so stored listings can be traced back to the
/// configuration that produced them.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{AgentIdentity, City, Language, ListingType, RecencyWindow, BASE_URL};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[job]
user-agent = "firefox"
listing-type = "rent"
language = "lv"
city = "Jurmala"
window = "today-2"

[crawler]
base-url = "http://127.0.0.1:8080/"
request-timeout-secs = 10

[output]
database-path = "./test.db"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.job.user_agent(), &AgentIdentity::Firefox);
        assert_eq!(config.job.listing_type(), ListingType::Rent);
        assert_eq!(config.job.language(), Language::Lv);
        assert_eq!(config.job.city(), City::Jurmala);
        assert_eq!(config.job.window(), RecencyWindow::Today2);
        assert_eq!(config.crawler.base_url, "http://127.0.0.1:8080/");
        assert_eq!(config.crawler.request_timeout_secs, 10);
        assert_eq!(config.output.database_path, "./test.db");
    }

    #[test]
    fn test_crawler_section_defaults() {
        let config = parse_config(
            r#"
[job]
listing-type = "sell"
language = "ru"
city = "Riga"
window = "today"

[output]
database-path = "./flats.db"
"#,
        )
        .unwrap();

        assert_eq!(config.job.user_agent(), &AgentIdentity::Chrome);
        assert_eq!(config.crawler.base_url, BASE_URL);
        assert_eq!(config.crawler.request_timeout_secs, 30);
        assert_eq!(
            config.job.construct_url(),
            "https://www.ss.lv/ru/real-estate/flats/Riga/today/sell/"
        );
    }

    #[test]
    fn test_custom_user_agent() {
        let config = parse_config(
            r#"
[job]
user-agent = "FlatCrawler/0.1 (+https://example.com)"
listing-type = "hand_over"
language = "ru"
city = "Riga"
window = "all"

[output]
database-path = "./flats.db"
"#,
        )
        .unwrap();

        assert_eq!(
            config.job.user_agent().as_str(),
            "FlatCrawler/0.1 (+https://example.com)"
        );
        assert_eq!(config.job.listing_type(), ListingType::Rent);
    }

    #[test]
    fn test_unknown_enum_value_is_parse_error() {
        let result = parse_config(
            r#"
[job]
listing-type = "sell"
language = "en"
city = "Riga"
window = "today"

[output]
database-path = "./flats.db"
"#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/flats.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[job]
listing-type = "sell"
language = "ru"
city = "Riga"
window = "today"

[crawler]
request-timeout-secs = 0

[output]
database-path = "./flats.db"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
