use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the confirmation endpoint listens on
    pub listen_addr: SocketAddr,
    /// JSON data file backing the store
    pub data_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            // SAFETY: This is a hardcoded valid address that will always parse
            listen_addr: "127.0.0.1:8080"
                .parse()
                .expect("default listen address is valid"),
            data_path: PathBuf::from("scheduler-data.json"),
        }
    }
}
