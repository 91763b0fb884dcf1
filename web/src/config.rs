use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ListenConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
}

const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
fn default_listen() -> ListenConfig {
    ListenConfig {
        host: DEFAULT_HOST.to_string(),
        port: DEFAULT_HTTP_PORT,
    }
}

// This handles the case where the `listen` block is PRESENT, but a field may be missing.
fn deserialize_listen_with_default_port<'de, D>(deserializer: D) -> Result<ListenConfig, D::Error>
where
    D: Deserializer<'de>,
{
    // Define a helper struct that mirrors ListenConfig but with an optional port or host.
    #[derive(Deserialize)]
    struct PartialListenConfig {
        host: Option<String>,
        port: Option<u16>,
    }

    let partial_config = PartialListenConfig::deserialize(deserializer)?;

    Ok(ListenConfig {
        host: partial_config
            .host
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: partial_config.port.unwrap_or(DEFAULT_HTTP_PORT),
    })
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EnvConfig {
    #[serde(default = "default_listen")]
    #[serde(deserialize_with = "deserialize_listen_with_default_port")]
    pub(crate) listen: ListenConfig,
    pub(crate) database: String,
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_parse_config() {
        let yaml = r#"dev:
  database: dev-database.sqlite
  listen:
    host: "127.0.0.1"
    port: 8080
prod:
  database: prod-database.sqlite
  listen:
    host: "0.0.0.0"
    port: 80"#;
        let configs: HashMap<String, EnvConfig> =
            serde_yaml::from_str(yaml).expect("Failed to parse yaml");
        assert_eq!(configs.len(), 2);
        assert_eq!(
            configs["dev"],
            EnvConfig {
                database: "dev-database.sqlite".to_string(),
                listen: ListenConfig {
                    host: "127.0.0.1".to_string(),
                    port: 8080,
                },
            }
        );
        assert_eq!(
            configs["prod"],
            EnvConfig {
                database: "prod-database.sqlite".to_string(),
                listen: ListenConfig {
                    host: "0.0.0.0".to_string(),
                    port: 80,
                },
            }
        );
    }

    #[test]
    fn test_default_listen() {
        let yaml = r#"dev:
  database: dev-database.sqlite"#;
        let configs: HashMap<String, EnvConfig> =
            serde_yaml::from_str(yaml).expect("Failed to parse yaml");
        assert_eq!(configs["dev"].listen, default_listen());
    }

    #[test]
    fn test_default_port() {
        let yaml = r#"dev:
  database: dev-database.sqlite
  listen:
    host: "127.0.0.1""#;
        let configs: HashMap<String, EnvConfig> =
            serde_yaml::from_str(yaml).expect("Failed to parse yaml");
        assert_eq!(configs["dev"].listen.host, "127.0.0.1");
        assert_eq!(configs["dev"].listen.port, 8080);
    }
}
