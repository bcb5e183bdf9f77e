use clap::Parser;
use std::path::PathBuf;

/// Server settings, from flags or environment
#[derive(Parser, Debug, Clone)]
#[command(name = "website", version, about = "Serve the user directory and its XLSX report")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "USER_REPORT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "USER_REPORT_PORT", default_value_t = 3000)]
    pub port: u16,

    /// JSON file with the users to serve instead of the demo set
    #[arg(long, env = "USER_REPORT_USERS")]
    pub users: Option<PathBuf>,

    /// Title of the HTML page
    #[arg(long, env = "USER_REPORT_TITLE", default_value = "User Report")]
    pub title: String,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["website"]).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert!(config.users.is_none());
        assert_eq!(config.title, "User Report");
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "website",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--users",
            "/srv/users.json",
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.users, Some(PathBuf::from("/srv/users.json")));
    }

    #[test]
    fn test_invalid_port() {
        assert!(Config::try_parse_from(["website", "--port", "70000"]).is_err());
    }
}
