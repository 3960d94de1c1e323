use std::fmt;

/// TcpType is the type of an ICE TCP candidate.
///
/// ## Specifications
///
/// * [RFC 6544 §4.5]
///
/// [RFC 6544 §4.5]: https://tools.ietf.org/html/rfc6544#section-4.5
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum TcpType {
    /// The default value. For example UDP candidates do not need this field.
    Unspecified,
    /// Active TCP candidate, which initiates TCP connections.
    Active,
    /// Passive TCP candidate, only accepts TCP connections.
    Passive,
    /// Like `Active` and `Passive` at the same time.
    SimultaneousOpen,
}

impl TcpType {
    /// The TCP type the remote side of a pair must carry:
    ///
    /// Local           Remote
    /// Candidate       Candidate
    /// ---------------------------
    /// tcp-so          tcp-so
    /// tcp-active      tcp-passive
    /// tcp-passive     tcp-active
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::SimultaneousOpen => Self::SimultaneousOpen,
            Self::Active => Self::Passive,
            Self::Passive => Self::Active,
            Self::Unspecified => Self::Unspecified,
        }
    }
}

impl From<&str> for TcpType {
    fn from(raw: &str) -> Self {
        match raw {
            "active" => Self::Active,
            "passive" => Self::Passive,
            "so" => Self::SimultaneousOpen,
            _ => Self::Unspecified,
        }
    }
}

impl fmt::Display for TcpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Self::Active => "active",
            Self::Passive => "passive",
            Self::SimultaneousOpen => "so",
            Self::Unspecified => "unspecified",
        };
        write!(f, "{s}")
    }
}

impl Default for TcpType {
    fn default() -> Self {
        Self::Unspecified
    }
}
