//! Extension points and the SDK capabilities available for them.
//!
//! An [`ExtensionPoint`] is built once from its configuration mapping and is
//! immutable afterwards. Its SDK set holds exactly the languages whose key is
//! present in that mapping; a missing key means the capability does not exist
//! for the extension point.

pub mod catalog;

use std::fmt;
use std::str::FromStr;

use serde_yaml::Value;

pub use catalog::ExtensionPointCatalog;

/// Languages an extension point can ship an SDK for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SdkLanguage {
    AssemblyScript,
    Rust,
}

impl SdkLanguage {
    /// All languages, in capability order.
    pub const ALL: [Self; 2] = [Self::AssemblyScript, Self::Rust];

    /// Configuration key for this language.
    pub const fn key(self) -> &'static str {
        match self {
            Self::AssemblyScript => "assemblyscript",
            Self::Rust => "rust",
        }
    }
}

impl fmt::Display for SdkLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SdkLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|language| language.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown language: {s}. Supported: assemblyscript, rust"))
    }
}

/// AssemblyScript SDK descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssemblyScriptSdk {
    pub beta: bool,
    pub package: Option<String>,
    pub sdk_version: Option<String>,
    pub toolchain_version: Option<String>,
}

/// Rust SDK descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RustSdk {
    pub beta: bool,
    pub package: Option<String>,
}

/// One SDK capability of an extension point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionPointSdk {
    AssemblyScript(AssemblyScriptSdk),
    Rust(RustSdk),
}

impl ExtensionPointSdk {
    pub fn language(&self) -> SdkLanguage {
        match self {
            Self::AssemblyScript(_) => SdkLanguage::AssemblyScript,
            Self::Rust(_) => SdkLanguage::Rust,
        }
    }

    pub fn is_beta(&self) -> bool {
        match self {
            Self::AssemblyScript(sdk) => sdk.beta,
            Self::Rust(sdk) => sdk.beta,
        }
    }

    /// Package identifier, passed through from configuration unvalidated.
    pub fn package(&self) -> Option<&str> {
        match self {
            Self::AssemblyScript(sdk) => sdk.package.as_deref(),
            Self::Rust(sdk) => sdk.package.as_deref(),
        }
    }
}

/// The SDK capability set of one extension point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtensionPointSdks {
    assemblyscript: Option<AssemblyScriptSdk>,
    rust: Option<RustSdk>,
}

impl ExtensionPointSdks {
    fn from_config(config: &Value) -> Self {
        let section = |language: SdkLanguage| config.get(language.key()).filter(|v| v.is_mapping());

        Self {
            assemblyscript: section(SdkLanguage::AssemblyScript).map(|sdk| AssemblyScriptSdk {
                beta: bool_field(sdk, "beta"),
                package: string_field(sdk, "package"),
                sdk_version: string_field(sdk, "sdk-version"),
                toolchain_version: string_field(sdk, "toolchain-version"),
            }),
            rust: section(SdkLanguage::Rust).map(|sdk| RustSdk {
                beta: bool_field(sdk, "beta"),
                package: string_field(sdk, "package"),
            }),
        }
    }

    pub fn assemblyscript(&self) -> Option<&AssemblyScriptSdk> {
        self.assemblyscript.as_ref()
    }

    pub fn rust(&self) -> Option<&RustSdk> {
        self.rust.as_ref()
    }

    /// Every present capability, AssemblyScript before Rust.
    pub fn all(&self) -> Vec<ExtensionPointSdk> {
        let assemblyscript = self
            .assemblyscript
            .clone()
            .map(ExtensionPointSdk::AssemblyScript);
        let rust = self.rust.clone().map(ExtensionPointSdk::Rust);
        assemblyscript.into_iter().chain(rust).collect()
    }

    pub fn get(&self, language: SdkLanguage) -> Option<ExtensionPointSdk> {
        self.all().into_iter().find(|sdk| sdk.language() == language)
    }

    pub fn languages(&self) -> Vec<SdkLanguage> {
        self.all().iter().map(ExtensionPointSdk::language).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.assemblyscript.is_none() && self.rust.is_none()
    }
}

/// A named integration surface scripts can target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionPoint {
    extension_type: String,
    deprecated: bool,
    domain: Option<String>,
    sdks: ExtensionPointSdks,
}

impl ExtensionPoint {
    /// Build an extension point from its configuration mapping.
    ///
    /// Never fails: absent or mistyped fields fall back to their defaults and
    /// SDK sections that are not mappings are left out of the capability set.
    pub fn new(extension_type: impl Into<String>, config: &Value) -> Self {
        Self {
            extension_type: extension_type.into(),
            deprecated: bool_field(config, "deprecated"),
            domain: string_field(config, "domain"),
            sdks: ExtensionPointSdks::from_config(config),
        }
    }

    pub fn extension_type(&self) -> &str {
        &self.extension_type
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn sdks(&self) -> &ExtensionPointSdks {
        &self.sdks
    }

    /// Whether new scripts can target this point: not deprecated and at
    /// least one SDK to write them in.
    pub fn is_available(&self) -> bool {
        !self.deprecated && !self.sdks.is_empty()
    }

    /// The type with underscores turned into dashes, as used in package names.
    pub fn dasherize_type(&self) -> String {
        self.extension_type.replace('_', "-")
    }
}

fn bool_field(config: &Value, key: &str) -> bool {
    config.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn string_field(config: &Value, key: &str) -> Option<String> {
    config.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_defaults_when_keys_absent() {
        let ep = ExtensionPoint::new("discount", &parse("{}"));

        assert_eq!(ep.extension_type(), "discount");
        assert!(!ep.is_deprecated());
        assert_eq!(ep.domain(), None);
        assert!(ep.sdks().is_empty());
        assert!(ep.sdks().all().is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
deprecated: true
domain: checkout
assemblyscript:
  beta: true
  package: "@org/as-discount"
  sdk-version: "^9.0.0"
  toolchain-version: "^1.0.0"
rust:
  package: "https://example.com/sdk-rs"
"#,
        );
        let ep = ExtensionPoint::new("discount", &config);

        assert!(ep.is_deprecated());
        assert_eq!(ep.domain(), Some("checkout"));

        let assemblyscript = ep.sdks().assemblyscript().unwrap();
        assert!(assemblyscript.beta);
        assert_eq!(assemblyscript.package.as_deref(), Some("@org/as-discount"));
        assert_eq!(assemblyscript.sdk_version.as_deref(), Some("^9.0.0"));
        assert_eq!(assemblyscript.toolchain_version.as_deref(), Some("^1.0.0"));

        let rust = ep.sdks().rust().unwrap();
        assert!(!rust.beta);
        assert_eq!(rust.package.as_deref(), Some("https://example.com/sdk-rs"));
    }

    #[test]
    fn test_capability_set_matches_present_keys() {
        let cases = [
            ("{}", vec![]),
            ("assemblyscript: {}", vec![SdkLanguage::AssemblyScript]),
            ("rust: {}", vec![SdkLanguage::Rust]),
            (
                "rust: {}\nassemblyscript: {}",
                vec![SdkLanguage::AssemblyScript, SdkLanguage::Rust],
            ),
            ("python: {}\nrust: {}", vec![SdkLanguage::Rust]),
        ];

        for (yaml, expected) in cases {
            let ep = ExtensionPoint::new("ep", &parse(yaml));
            assert_eq!(ep.sdks().languages(), expected, "config: {yaml}");
        }
    }

    #[test]
    fn test_missing_package_passes_through_as_none() {
        let ep = ExtensionPoint::new("ep", &parse("rust:\n  beta: true"));
        let sdk = ep.sdks().get(SdkLanguage::Rust).unwrap();

        assert!(sdk.is_beta());
        assert_eq!(sdk.package(), None);
        assert!(ep.sdks().get(SdkLanguage::AssemblyScript).is_none());
    }

    #[test]
    fn test_malformed_fields_fall_back() {
        let ep = ExtensionPoint::new(
            "ep",
            &parse("deprecated: \"yes\"\ndomain: 42\nassemblyscript: just-a-string"),
        );

        assert!(!ep.is_deprecated());
        assert_eq!(ep.domain(), None);
        assert!(ep.sdks().is_empty());
    }

    #[test]
    fn test_dasherize_type() {
        let ep = ExtensionPoint::new("unit_limit_per_order", &parse("{}"));
        assert_eq!(ep.dasherize_type(), "unit-limit-per-order");
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("Rust".parse::<SdkLanguage>(), Ok(SdkLanguage::Rust));
        assert_eq!(
            " assemblyscript ".parse::<SdkLanguage>(),
            Ok(SdkLanguage::AssemblyScript)
        );
        assert!("go".parse::<SdkLanguage>().is_err());
    }
}
