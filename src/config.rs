//! NNTP client configuration

use std::time::Duration;

/// Default port for plaintext or STARTTLS-capable connections
pub const DEFAULT_PORT: u16 = 119;

/// Default port for implicit TLS connections
pub const DEFAULT_TLS_PORT: u16 = 563;

/// Default I/O deadline applied to connect and every subsequent operation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Transport security policy for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TlsMode {
    /// Plaintext for the whole session
    #[default]
    None,
    /// TLS from the first byte (port 563 style)
    Implicit,
    /// Upgrade via STARTTLS when the server advertises it; continue in
    /// plaintext otherwise
    StartTlsOpportunistic,
    /// Upgrade via STARTTLS; fail the connect if the upgrade cannot be
    /// completed
    StartTlsRequired,
}

/// Certificate trust configuration for TLS connections
///
/// By default certificates are validated against the Mozilla root program
/// (webpki-roots) with the configured host as the expected server name.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TlsOptions {
    /// Accept any certificate without validation.
    ///
    /// **Security Warning:** this disables all certificate validation,
    /// making the connection vulnerable to man-in-the-middle attacks. Only
    /// use it for testing or with servers you trust on a secure network.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_insecure_tls: bool,

    /// Server name to present via SNI and validate against, when it differs
    /// from the connect host
    #[cfg_attr(feature = "serde", serde(default))]
    pub sni_hostname: Option<String>,

    /// Additional trust anchors as DER-encoded certificates, appended to the
    /// webpki roots
    #[cfg_attr(feature = "serde", serde(default))]
    pub extra_root_certs: Vec<Vec<u8>>,
}

/// NNTP client configuration
///
/// # Example
///
/// ```
/// use nntp_client::{ClientConfig, TlsMode};
///
/// // Implicit TLS on port 563
/// let config = ClientConfig::tls("news.example.com");
///
/// // Plaintext on port 119, upgrading via STARTTLS when offered
/// let mut config = ClientConfig::plain("news.example.com");
/// config.tls_mode = TlsMode::StartTlsOpportunistic;
/// ```
#[must_use]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClientConfig {
    /// Server hostname (e.g. "news.example.com")
    pub host: String,

    /// Server port (typically 119 for plain/STARTTLS, 563 for implicit TLS)
    pub port: u16,

    /// Deadline for connect and for each subsequent I/O operation
    #[cfg_attr(feature = "serde", serde(default = "default_timeout"))]
    pub timeout: Duration,

    /// Ask for reader mode at connect time when the server does not already
    /// advertise the READER capability
    #[cfg_attr(feature = "serde", serde(default))]
    pub reader_mode: bool,

    /// Transport security policy
    #[cfg_attr(feature = "serde", serde(default))]
    pub tls_mode: TlsMode,

    /// Certificate trust configuration
    #[cfg_attr(feature = "serde", serde(default))]
    pub trust: TlsOptions,
}

#[cfg(feature = "serde")]
fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl ClientConfig {
    /// Create a configuration with an explicit port and TLS mode
    pub fn new(host: impl Into<String>, port: u16, tls_mode: TlsMode) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: DEFAULT_TIMEOUT,
            reader_mode: false,
            tls_mode,
            trust: TlsOptions::default(),
        }
    }

    /// Plaintext connection on the standard port (119)
    ///
    /// **Warning:** plaintext connections transmit credentials in the clear.
    /// Prefer [`tls`](Self::tls) or a STARTTLS mode whenever possible.
    pub fn plain(host: impl Into<String>) -> Self {
        Self::new(host, DEFAULT_PORT, TlsMode::None)
    }

    /// Implicit TLS connection on the standard secure port (563)
    pub fn tls(host: impl Into<String>) -> Self {
        Self::new(host, DEFAULT_TLS_PORT, TlsMode::Implicit)
    }

    /// Plaintext connection on port 119 that must upgrade via STARTTLS
    pub fn starttls(host: impl Into<String>) -> Self {
        Self::new(host, DEFAULT_PORT, TlsMode::StartTlsRequired)
    }

    /// Set the I/O deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Request reader mode at connect time
    pub fn with_reader_mode(mut self) -> Self {
        self.reader_mode = true;
        self
    }

    /// Accept any TLS certificate (self-signed, expired, wrong host)
    ///
    /// **Security Warning:** disables certificate validation; see
    /// [`TlsOptions::allow_insecure_tls`].
    pub fn with_insecure_tls(mut self) -> Self {
        self.trust.allow_insecure_tls = true;
        self
    }
}
