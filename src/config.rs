/// Runtime settings for the server.
///
/// Constructed by the process entry point and passed down explicitly; there
/// is no environment, CLI, or file surface behind it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Loopback address the listener binds to.
    pub listen_addr: String,
    /// Body served when a request carries no body of its own.
    pub default_body: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:5555".to_string(),
            default_body: "<html><body>Beacon is up</body></html>".to_string(),
        }
    }
}
