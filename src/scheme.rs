/// Special-scheme classification and default ports.
/// The six special schemes get authority-mandatory parsing and default-port
/// elision; everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeType {
    #[default]
    Http,
    Https,
    Ws,
    Wss,
    Ftp,
    File,
    Other,
}

impl SchemeType {
    /// Classify a lower-cased scheme string.
    /// Filters by length + first byte before the full comparison.
    pub fn from_scheme(scheme: &str) -> Self {
        let bytes = scheme.as_bytes();
        match (bytes.len(), bytes.first()) {
            (2, Some(b'w')) if bytes == b"ws" => Self::Ws,
            (3, Some(b'w')) if bytes == b"wss" => Self::Wss,
            (3, Some(b'f')) if bytes == b"ftp" => Self::Ftp,
            (4, Some(b'h')) if bytes == b"http" => Self::Http,
            (4, Some(b'f')) if bytes == b"file" => Self::File,
            (5, Some(b'h')) if bytes == b"https" => Self::Https,
            _ => Self::Other,
        }
    }

    /// Check if this is a special scheme
    pub fn is_special(self) -> bool {
        self != Self::Other
    }

    /// Get the default port for this scheme
    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Http | Self::Ws => Some(80),
            Self::Https | Self::Wss => Some(443),
            Self::Ftp => Some(21),
            Self::File | Self::Other => None,
        }
    }
}
