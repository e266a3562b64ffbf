//! Input validators applied to accepted dialog results
//!
//! Every validator is a pure predicate over one string. The patterns are
//! compiled once on first use and shared read-only afterwards.

use crate::constants::diagnostics;
use crate::ext::PathExt;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

const OCTET: &str = r"(?:[1-9]?[0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])";

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("integer pattern is valid"));

static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9](\.[0-9]+)?$").expect("decimal pattern is valid"));

static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?:{OCTET}\.){{3}}{OCTET}$")).expect("ipv4 pattern is valid")
});

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z0-9]+(-[a-z0-9]+)*\.)+[a-z]{2,}$").expect("domain pattern is valid")
});

static PORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{1,4}|[1-5][0-9]{4}|6[0-4][0-9]{3}|65[0-4][0-9]{2}|655[0-2][0-9]|6553[0-5])$",
    )
    .expect("port pattern is valid")
});

static FILE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[^\\/?%*:|"<>]+$"#).expect("file name pattern is valid")
});

/// The token accepted by [`ValidatorKind::Host`] besides addresses and domains.
pub const LOCALHOST: &str = "localhost";

/// Allowed file extensions for a file selection.
///
/// Extensions may be written with or without the leading dot; comparison is
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ExtensionPolicy {
    /// Exactly one extension is acceptable.
    Single(String),
    /// Any extension of the set is acceptable.
    AnyOf(Vec<String>),
}

impl ExtensionPolicy {
    pub fn single(extension: impl Into<String>) -> Self {
        ExtensionPolicy::Single(extension.into())
    }

    pub fn any_of<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ExtensionPolicy::AnyOf(extensions.into_iter().map(Into::into).collect())
    }

    /// Whether the policy can accept anything at all.
    pub fn is_satisfiable(&self) -> bool {
        match self {
            ExtensionPolicy::Single(_) => true,
            ExtensionPolicy::AnyOf(set) => !set.is_empty(),
        }
    }

    /// Checks the suffix of `path` against the policy.
    ///
    /// A single extension is compared with the final suffix only. A set also
    /// admits a compound suffix such as `.tar.gz`.
    pub fn matches(&self, path: &Path) -> bool {
        let last = path.final_suffix();
        match self {
            ExtensionPolicy::Single(expected) => normalize_extension(expected) == last,
            ExtensionPolicy::AnyOf(allowed) => {
                let compound = path.compound_suffix();
                allowed.iter().map(|ext| normalize_extension(ext)).any(|ext| {
                    ext == last || (!compound.is_empty() && ext == compound)
                })
            }
        }
    }

    /// Human readable list used in diagnostics, e.g. `.yaml` or `.yml/.yaml`.
    pub fn describe(&self) -> String {
        match self {
            ExtensionPolicy::Single(ext) => normalize_extension(ext),
            ExtensionPolicy::AnyOf(set) => {
                set.iter().map(|ext| normalize_extension(ext)).collect::<Vec<_>>().join("/")
            }
        }
    }
}

fn normalize_extension(ext: &str) -> String {
    if ext.is_empty() || ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

/// Named input-format checks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorKind {
    /// Any non-empty string.
    NonEmpty,
    /// One or more ASCII digits, no sign.
    Integer,
    /// One digit 1-9 with an optional fractional part.
    Decimal,
    /// An IPv4 address, a lowercase domain name, or `localhost`.
    Host,
    /// An IPv4 address only.
    IpAddress,
    /// A port number between 0 and 65535.
    Port,
    /// A name free of `\ / ? % * : | " < >`.
    FileName,
    /// A path whose suffix satisfies the policy.
    Extension(ExtensionPolicy),
}

impl ValidatorKind {
    /// Evaluates the validator. Never panics, whatever the input.
    pub fn validate(&self, raw: &str) -> bool {
        match self {
            ValidatorKind::NonEmpty => !raw.is_empty(),
            ValidatorKind::Integer => INTEGER_RE.is_match(raw),
            ValidatorKind::Decimal => DECIMAL_RE.is_match(raw),
            ValidatorKind::Host => {
                raw == LOCALHOST || IPV4_RE.is_match(raw) || DOMAIN_RE.is_match(raw)
            }
            ValidatorKind::IpAddress => IPV4_RE.is_match(raw),
            ValidatorKind::Port => PORT_RE.is_match(raw),
            ValidatorKind::FileName => FILE_NAME_RE.is_match(raw),
            ValidatorKind::Extension(policy) => !raw.is_empty() && policy.matches(Path::new(raw)),
        }
    }

    /// The text of the message box shown when a value is rejected.
    pub fn diagnostic(&self) -> String {
        match self {
            ValidatorKind::NonEmpty => diagnostics::EMPTY_VALUE.to_string(),
            ValidatorKind::Integer => diagnostics::INTEGER.to_string(),
            ValidatorKind::Decimal => diagnostics::DECIMAL.to_string(),
            ValidatorKind::Host => diagnostics::HOST.to_string(),
            ValidatorKind::IpAddress => diagnostics::IP_ADDRESS.to_string(),
            ValidatorKind::Port => diagnostics::PORT.to_string(),
            ValidatorKind::FileName => diagnostics::FILE_NAME.to_string(),
            ValidatorKind::Extension(policy) => {
                format!("\nInvalid data. Required value: {} file.", policy.describe())
            }
        }
    }

    /// Height of the diagnostic box for this validator.
    pub fn diagnostic_height(&self) -> u16 {
        match self {
            ValidatorKind::NonEmpty | ValidatorKind::Host | ValidatorKind::IpAddress => {
                diagnostics::TALL_HEIGHT
            }
            _ => diagnostics::SHORT_HEIGHT,
        }
    }
}

/// Free-function form of [`ValidatorKind::validate`].
pub fn validate(kind: &ValidatorKind, raw: &str) -> bool {
    kind.validate(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts(kind: ValidatorKind, values: &[&str]) {
        for value in values {
            assert!(validate(&kind, value), "{kind:?} should accept {value:?}");
        }
    }

    fn rejects(kind: ValidatorKind, values: &[&str]) {
        for value in values {
            assert!(!validate(&kind, value), "{kind:?} should reject {value:?}");
        }
    }

    #[test]
    fn test_non_empty() {
        accepts(ValidatorKind::NonEmpty, &["a", " ", "0"]);
        rejects(ValidatorKind::NonEmpty, &[""]);
    }

    #[test]
    fn test_integer() {
        accepts(ValidatorKind::Integer, &["0", "7", "0042", "123456789012345678901234567890"]);
        rejects(
            ValidatorKind::Integer,
            &["", "12a", "-1", "+1", " 1", "1 ", "1\n", "1.0", "\u{0663}"],
        );
    }

    #[test]
    fn test_decimal_keeps_single_leading_digit_shape() {
        accepts(ValidatorKind::Decimal, &["1", "9", "1.5", "3.14159"]);
        rejects(ValidatorKind::Decimal, &["", "0", "0.5", "12", "12.5", "1.", ".5", "1.5.2"]);
    }

    #[test]
    fn test_host() {
        accepts(
            ValidatorKind::Host,
            &["192.168.0.1", "0.0.0.0", "255.255.255.255", "localhost", "example.com"],
        );
        accepts(ValidatorKind::Host, &["my-host.internal.example.org", "a1.io"]);
        rejects(
            ValidatorKind::Host,
            &["256.1.1.1", "", "not a host!", "Example.com", "example", "-a.com", "a-.com"],
        );
        rejects(ValidatorKind::Host, &["example.c", "1.2.3", "localhost.", " localhost"]);
    }

    #[test]
    fn test_ip_address_excludes_names() {
        accepts(ValidatorKind::IpAddress, &["10.0.0.1", "10.0.0.2", "172.16.254.1"]);
        rejects(ValidatorKind::IpAddress, &["localhost", "example.com", "10.0.0.256", "not-an-ip"]);
    }

    #[test]
    fn test_port_range() {
        accepts(ValidatorKind::Port, &["0", "1", "80", "8080", "9999", "10000", "65535"]);
        accepts(ValidatorKind::Port, &["59999", "64999", "65499", "65529", "0080"]);
        rejects(ValidatorKind::Port, &["65536", "65540", "70000", "99999", "-1", "", "abc"]);
        rejects(ValidatorKind::Port, &["100000", " 80", "80 "]);
    }

    #[test]
    fn test_port_matches_numeric_bound_for_all_digit_strings() {
        for n in (0u32..70_000).step_by(7) {
            let s = n.to_string();
            assert_eq!(validate(&ValidatorKind::Port, &s), n <= 65535, "{s}");
        }
        assert!(validate(&ValidatorKind::Port, "65535"));
        assert!(!validate(&ValidatorKind::Port, "65536"));
    }

    #[test]
    fn test_file_name() {
        accepts(ValidatorKind::FileName, &["report.txt", "my folder", "a-b_c", ".hidden"]);
        rejects(ValidatorKind::FileName, &["", "a/b", "a\\b", "what?", "100%", "*.rs"]);
        rejects(ValidatorKind::FileName, &["c:", "a|b", "\"q\"", "<tag>"]);
    }

    #[test]
    fn test_arbitrary_input_never_panics() {
        let long = "9".repeat(100_000);
        let weird: [&str; 6] = ["\0", "\u{7f}", "\u{1b}[31m", "\r\n", long.as_str(), "ü.com"];
        let kinds = [
            ValidatorKind::Integer,
            ValidatorKind::Decimal,
            ValidatorKind::Host,
            ValidatorKind::Port,
            ValidatorKind::FileName,
            ValidatorKind::Extension(ExtensionPolicy::single("yaml")),
        ];
        for kind in &kinds {
            for value in &weird {
                let _ = validate(kind, value);
            }
        }
        assert!(!validate(&ValidatorKind::Port, &long));
        assert!(validate(&ValidatorKind::Integer, &long));
    }

    #[test]
    fn test_extension_single() {
        let kind = ValidatorKind::Extension(ExtensionPolicy::single(".yaml"));
        accepts(kind.clone(), &["conf/app.yaml", "x.yaml"]);
        rejects(kind, &["", "conf/app.yml", "conf/app.YAML", "yaml", "app.yaml.bak"]);

        let without_dot = ValidatorKind::Extension(ExtensionPolicy::single("yaml"));
        accepts(without_dot, &["a.yaml"]);
    }

    #[test]
    fn test_extension_set() {
        let kind = ValidatorKind::Extension(ExtensionPolicy::any_of([".yml", "yaml", ".tar.gz"]));
        accepts(kind.clone(), &["a.yml", "b.yaml", "backup.tar.gz"]);
        rejects(kind, &["a.json", "b.gz", "README"]);

        let empty = ExtensionPolicy::AnyOf(vec![]);
        assert!(!empty.is_satisfiable());
        assert!(!empty.matches(Path::new("a.yml")));
    }

    #[test]
    fn test_diagnostics_name_the_expected_format() {
        assert!(ValidatorKind::Integer.diagnostic().contains("Integer number"));
        assert!(ValidatorKind::Port.diagnostic().contains("0-65535"));
        assert!(ValidatorKind::Host.diagnostic().contains("IP address, hostname or domain name"));
        let ext = ValidatorKind::Extension(ExtensionPolicy::any_of(["yml", ".yaml"]));
        assert_eq!(ext.diagnostic(), "\nInvalid data. Required value: .yml/.yaml file.");
        assert_eq!(ValidatorKind::Host.diagnostic_height(), 8);
        assert_eq!(ValidatorKind::Port.diagnostic_height(), 7);
    }

    #[test]
    fn test_validator_kind_deserialize() {
        let kind: ValidatorKind = serde_json::from_str(r#""ip_address""#).unwrap();
        assert_eq!(kind, ValidatorKind::IpAddress);

        let kind: ValidatorKind = serde_json::from_str(r#"{"extension": ".json"}"#).unwrap();
        assert_eq!(kind, ValidatorKind::Extension(ExtensionPolicy::single(".json")));

        let kind: ValidatorKind = serde_json::from_str(r#"{"extension": ["yml", "yaml"]}"#).unwrap();
        assert_eq!(kind, ValidatorKind::Extension(ExtensionPolicy::any_of(["yml", "yaml"])));

        let kind: ValidatorKind = serde_yaml::from_str("port").unwrap();
        assert_eq!(kind, ValidatorKind::Port);
    }
}
