use crate::DomainError;
use std::fmt;

/// Path used for DNS-over-HTTPS endpoints configured without one.
pub const DEFAULT_DOH_PATH: &str = "/dns-query";

/// Transport family selected by an upstream server string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamScheme {
    /// `https://` or `doh://`
    Https,
    /// `tls://` or `dot://`
    Tls,
    Tcp,
    Udp,
}

impl UpstreamScheme {
    fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "https" | "doh" => Some(Self::Https),
            "tls" | "dot" => Some(Self::Tls),
            "tcp" => Some(Self::Tcp),
            "udp" => Some(Self::Udp),
            _ => None,
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Self::Https => 443,
            Self::Tls => 853,
            Self::Tcp | Self::Udp => 53,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Tls => "tls",
            Self::Tcp => "tcp",
            Self::Udp => "udp",
        }
    }
}

/// An upstream resolver parsed from its configured string.
///
/// Accepted forms:
/// - `8.8.8.8`, `8.8.8.8:5353`, `[2001:db8::1]:53`, `2001:db8::1` (plain UDP)
/// - `udp://host[:port]`, `tcp://host[:port]`
/// - `tls://host[:port]`, `dot://host[:port]` (port 853 by default)
/// - `https://host[:port][/path]`, `doh://host[:port][/path]` (port 443 by default)
/// - `http://host[:port][/path]`: DoH without TLS (port 80 by default)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpstreamServer {
    pub scheme: UpstreamScheme,
    /// Host name or IP literal, never bracketed.
    pub host: String,
    pub port: u16,
    /// Request path for HTTPS upstreams.
    pub path: Option<String>,
    /// DoH over plain `http://`.
    pub plaintext: bool,
}

impl UpstreamServer {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DomainError::InvalidUpstream("empty upstream".to_string()));
        }

        let (scheme, plaintext, rest) = match raw.split_once("://") {
            Some((scheme, rest)) => {
                let scheme = scheme.to_ascii_lowercase();
                if scheme == "http" {
                    (UpstreamScheme::Https, true, rest)
                } else {
                    let scheme = UpstreamScheme::from_scheme(&scheme).ok_or_else(|| {
                        DomainError::InvalidUpstream(format!(
                            "unknown scheme '{}' in {}",
                            scheme, raw
                        ))
                    })?;
                    (scheme, false, rest)
                }
            }
            None => (UpstreamScheme::Udp, false, raw),
        };

        let (authority, path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], Some(&rest[idx..])),
            None => (rest, None),
        };

        let (host, port) = split_host_port(authority)
            .map_err(|reason| DomainError::InvalidUpstream(format!("{}: {}", raw, reason)))?;

        let path = match scheme {
            UpstreamScheme::Https => Some(
                path.filter(|p| *p != "/")
                    .unwrap_or(DEFAULT_DOH_PATH)
                    .to_string(),
            ),
            _ => None,
        };

        let default_port = if plaintext { 80 } else { scheme.default_port() };

        Ok(Self {
            scheme,
            port: port.unwrap_or(default_port),
            host: host.to_string(),
            path,
            plaintext,
        })
    }

    /// `host:port`, with IPv6 literals bracketed.
    pub fn authority(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Endpoint URL for DNS-over-HTTPS.
    pub fn https_url(&self) -> String {
        format!(
            "{}://{}{}",
            if self.plaintext { "http" } else { "https" },
            self.authority(),
            self.path.as_deref().unwrap_or(DEFAULT_DOH_PATH)
        )
    }
}

impl fmt::Display for UpstreamServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scheme {
            UpstreamScheme::Https => write!(f, "{}", self.https_url()),
            scheme => write!(f, "{}://{}", scheme.as_str(), self.authority()),
        }
    }
}

fn split_host_port(authority: &str) -> Result<(&str, Option<u16>), String> {
    if authority.is_empty() {
        return Err("missing host".to_string());
    }

    if let Some(inner) = authority.strip_prefix('[') {
        let end = inner
            .find(']')
            .ok_or_else(|| "unterminated IPv6 literal".to_string())?;
        let host = &inner[..end];
        let tail = &inner[end + 1..];
        if host.is_empty() {
            return Err("missing host".to_string());
        }
        return match tail {
            "" => Ok((host, None)),
            _ => match tail.strip_prefix(':') {
                Some(port) => Ok((host, Some(parse_port(port)?))),
                None => Err(format!("unexpected '{}' after IPv6 literal", tail)),
            },
        };
    }

    match authority.matches(':').count() {
        0 => Ok((authority, None)),
        1 => {
            let (host, port) = authority
                .split_once(':')
                .ok_or_else(|| "missing port".to_string())?;
            if host.is_empty() {
                return Err("missing host".to_string());
            }
            Ok((host, Some(parse_port(port)?)))
        }
        // bare IPv6 literal
        _ => Ok((authority, None)),
    }
}

fn parse_port(port: &str) -> Result<u16, String> {
    port.parse::<u16>()
        .map_err(|_| format!("invalid port '{}'", port))
}

/// Fallback rank of a configured upstream string; lower is tried first.
///
/// Strings without a scheme are plain UDP. Unknown schemes sort last.
pub fn scheme_priority(raw: &str) -> u8 {
    let Some((scheme, _)) = raw.trim().split_once("://") else {
        return 3;
    };
    match scheme.to_ascii_lowercase().as_str() {
        "https" | "doh" | "http" => 0,
        "tls" | "dot" => 1,
        "tcp" => 2,
        "udp" => 3,
        _ => 99,
    }
}

/// Stable ordering of configured upstreams by [`scheme_priority`].
pub fn sort_by_priority<S: AsRef<str>>(servers: &[S]) -> Vec<&str> {
    let mut ordered: Vec<&str> = servers.iter().map(AsRef::as_ref).collect();
    ordered.sort_by_key(|s| scheme_priority(s));
    ordered
}
