//! Base configuration skeleton.

use crate::caddy::codec::encode_json_string;

/// Port the skeleton's HTTP server listens on unless configured otherwise.
pub const DEFAULT_LISTEN_PORT: u16 = 443;

/// JSON text of a base configuration: admin listener, one HTTP server under
/// `server_key` with automatic HTTPS skipping nothing, and an empty route list.
///
/// `admin_listen` is a bare `host:port`; Caddy rejects a scheme there.
/// The result can be passed to `AdminClient::load` and then filled with routes.
pub fn base_config(admin_listen: &str, server_key: &str, listen_port: u16) -> String {
    let listen = format!(":{}", listen_port);
    format!(
        r#"{{
	"admin": {{
		"listen": {admin}
	}},
	"apps": {{
		"http": {{
			"servers": {{
				{key}: {{
					"automatic_https": {{
						"skip": []
					}},
					"listen": [
						{listen}
					],
					"routes": []
				}}
			}}
		}}
	}}
}}
"#,
        admin = encode_json_string(strip_scheme(admin_listen)),
        key = encode_json_string(server_key),
        listen = encode_json_string(&listen),
    )
}

fn strip_scheme(address: &str) -> &str {
    address
        .strip_prefix("http://")
        .or_else(|| address.strip_prefix("https://"))
        .unwrap_or(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_base_config_shape() {
        let text = base_config("localhost:20259", "myserver", DEFAULT_LISTEN_PORT);
        let doc: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(doc["admin"]["listen"], "localhost:20259");
        let server = &doc["apps"]["http"]["servers"]["myserver"];
        assert_eq!(server["listen"][0], ":443");
        assert_eq!(server["automatic_https"]["skip"].as_array().unwrap().len(), 0);
        assert_eq!(server["routes"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_base_config_strips_scheme_and_escapes_key() {
        let text = base_config("http://127.0.0.1:2019", "odd\"key", 8443);
        let doc: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(doc["admin"]["listen"], "127.0.0.1:2019");
        assert_eq!(doc["apps"]["http"]["servers"]["odd\"key"]["listen"][0], ":8443");
    }
}
