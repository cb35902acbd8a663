fn main() {
    // Load .env for build-time WiFi/OTA configuration
    load_env_config();
}

/// Load OTA configuration from a gitignored .env file.
/// Real environment variables take priority over .env values.
fn load_env_config() {
    use std::env;
    use std::path::Path;

    const KEYS: [&str; 4] = [
        "PENDANT_WIFI_SSID",
        "PENDANT_WIFI_PASS",
        "PENDANT_OTA_HOSTNAME",
        "PENDANT_OTA_AUTH",
    ];

    println!("cargo:rerun-if-changed=.env");
    for key in KEYS {
        println!("cargo:rerun-if-env-changed={key}");
    }

    if Path::new(".env").exists() {
        if let Err(e) = dotenvy::dotenv() {
            println!("cargo:warning=Failed to load .env file: {e}");
        }
    }

    // Always re-export every key so `option_env!` sees a consistent set;
    // empty string means "not configured".
    for key in KEYS {
        let value = env::var(key).unwrap_or_default();
        println!("cargo:rustc-env={key}={}", value.trim());
    }

    if env::var("PENDANT_WIFI_SSID").unwrap_or_default().trim().is_empty() {
        println!("cargo:warning=PENDANT_WIFI_SSID is empty - OTA updates will be disabled");
    }
}
