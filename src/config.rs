/// Which backend answers `/api` requests.
///
/// `Mock` serves everything from the in-memory stores; `Remote` bypasses the
/// mock logic entirely and forwards requests to an external API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiTarget {
    Mock,
    Remote,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_name: String,
    pub rest_port: u16,
    pub api_target: ApiTarget,
    pub remote_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_target = match std::env::var("VOBLAKO_API_TARGET") {
            Ok(value) if value.eq_ignore_ascii_case("remote") => ApiTarget::Remote,
            _ => ApiTarget::Mock,
        };

        let remote_base_url = std::env::var("VOBLAKO_REMOTE_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Config {
            server_name: std::env::var("SERVER_NAME")
                .unwrap_or_else(|_| "VOblako".to_string()),
            rest_port: std::env::var("REST_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            api_target,
            remote_base_url,
        })
    }

    pub fn is_remote(&self) -> bool {
        self.api_target == ApiTarget::Remote
    }

    /// Join a request path onto the remote API base URL.
    pub fn remote_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.remote_base_url, path)
        } else {
            format!("{}/{}", self.remote_base_url, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_config() -> Config {
        Config {
            server_name: "VOblako".into(),
            rest_port: 3000,
            api_target: ApiTarget::Mock,
            remote_base_url: "http://localhost:8080/api".into(),
        }
    }

    #[test]
    fn remote_url_joins_paths() {
        let config = mock_config();
        assert_eq!(config.remote_url("/auth/check"), "http://localhost:8080/api/auth/check");
        assert_eq!(config.remote_url("files"), "http://localhost:8080/api/files");
    }
}
