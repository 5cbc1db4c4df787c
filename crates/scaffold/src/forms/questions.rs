//! Questions asked by the create forms.

use std::sync::Arc;

use crate::extension_point::{ExtensionPoint, ExtensionPointCatalog, SdkLanguage};
use crate::messages;
use crate::tasks::create_api_client::VALID_APP_TYPES;

use super::{ProjectDetails, Question};

/// Longest title the Partner Dashboard accepts.
pub const MAX_TITLE_LENGTH: usize = 50;

/// Project or app name.
#[derive(Debug, Clone, Default)]
pub struct AskName {
    pub name: Option<String>,
}

impl AskName {
    pub fn new(name: Option<String>) -> Self {
        Self { name }
    }

    pub fn is_valid_title(title: &str) -> bool {
        let title = title.trim();
        !title.is_empty() && title.chars().count() <= MAX_TITLE_LENGTH
    }
}

impl Question for AskName {
    fn prompt_message(&self, _details: &ProjectDetails) -> String {
        messages::ASK_NAME.to_string()
    }

    fn reprompt_message(&self, _details: &ProjectDetails) -> String {
        messages::invalid_name(MAX_TITLE_LENGTH)
    }

    fn initial_value(&self, _details: &ProjectDetails) -> Option<String> {
        self.name.clone()
    }

    fn accepts(&self, _details: &ProjectDetails, candidate: &str) -> bool {
        Self::is_valid_title(candidate)
    }

    fn apply(&self, details: &mut ProjectDetails, value: String) {
        details.name = Some(value);
    }
}

/// App type, stored lowercase.
#[derive(Debug, Clone, Default)]
pub struct AskAppType {
    pub app_type: Option<String>,
}

impl AskAppType {
    pub fn new(app_type: Option<String>) -> Self {
        Self { app_type }
    }
}

impl Question for AskAppType {
    fn prompt_message(&self, _details: &ProjectDetails) -> String {
        messages::ASK_APP_TYPE.to_string()
    }

    fn reprompt_message(&self, _details: &ProjectDetails) -> String {
        messages::invalid_app_type(&VALID_APP_TYPES)
    }

    fn initial_value(&self, _details: &ProjectDetails) -> Option<String> {
        self.app_type.clone()
    }

    fn accepts(&self, _details: &ProjectDetails, candidate: &str) -> bool {
        VALID_APP_TYPES
            .iter()
            .any(|valid| valid.eq_ignore_ascii_case(candidate))
    }

    fn apply(&self, details: &mut ProjectDetails, value: String) {
        details.project_type = Some(value.to_lowercase());
    }
}

/// Partner organization id; must be a positive integer.
#[derive(Debug, Clone, Default)]
pub struct AskOrganization {
    pub organization_id: Option<String>,
}

impl AskOrganization {
    pub fn new(organization_id: Option<String>) -> Self {
        Self { organization_id }
    }
}

impl Question for AskOrganization {
    fn prompt_message(&self, _details: &ProjectDetails) -> String {
        messages::ASK_ORGANIZATION.to_string()
    }

    fn reprompt_message(&self, _details: &ProjectDetails) -> String {
        messages::INVALID_ORGANIZATION.to_string()
    }

    fn initial_value(&self, _details: &ProjectDetails) -> Option<String> {
        self.organization_id.clone()
    }

    fn accepts(&self, _details: &ProjectDetails, candidate: &str) -> bool {
        candidate.parse::<u64>().is_ok_and(|id| id > 0)
    }

    fn apply(&self, details: &mut ProjectDetails, value: String) {
        details.organization_id = Some(value);
    }
}

/// API key of an existing app, stored lowercase.
///
/// When `known_keys` is non-empty the answer must be one of them.
#[derive(Debug, Clone, Default)]
pub struct AskApiKey {
    pub api_key: Option<String>,
    pub known_keys: Vec<String>,
}

impl AskApiKey {
    pub fn new(api_key: Option<String>, known_keys: Vec<String>) -> Self {
        Self {
            api_key,
            known_keys,
        }
    }
}

impl Question for AskApiKey {
    fn prompt_message(&self, _details: &ProjectDetails) -> String {
        messages::ASK_API_KEY.to_string()
    }

    fn reprompt_message(&self, _details: &ProjectDetails) -> String {
        if self.known_keys.is_empty() {
            messages::BLANK_API_KEY.to_string()
        } else {
            messages::INVALID_API_KEY.to_string()
        }
    }

    fn initial_value(&self, _details: &ProjectDetails) -> Option<String> {
        self.api_key.clone()
    }

    fn accepts(&self, _details: &ProjectDetails, candidate: &str) -> bool {
        !candidate.is_empty()
            && (self.known_keys.is_empty()
                || self
                    .known_keys
                    .iter()
                    .any(|key| key.eq_ignore_ascii_case(candidate)))
    }

    fn apply(&self, details: &mut ProjectDetails, value: String) {
        details.api_key = Some(value.to_lowercase());
    }
}

/// Extension type, stored uppercase.
#[derive(Debug, Clone, Default)]
pub struct AskExtensionType {
    pub extension_type: Option<String>,
    pub types: Vec<String>,
}

impl AskExtensionType {
    pub fn new(extension_type: Option<String>, types: Vec<String>) -> Self {
        Self {
            extension_type,
            types,
        }
    }
}

impl Question for AskExtensionType {
    fn prompt_message(&self, _details: &ProjectDetails) -> String {
        let types: Vec<&str> = self.types.iter().map(String::as_str).collect();
        messages::ask_extension_type(&types)
    }

    fn reprompt_message(&self, _details: &ProjectDetails) -> String {
        messages::INVALID_EXTENSION_TYPE.to_string()
    }

    fn initial_value(&self, _details: &ProjectDetails) -> Option<String> {
        self.extension_type.clone()
    }

    fn accepts(&self, _details: &ProjectDetails, candidate: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(candidate))
    }

    fn apply(&self, details: &mut ProjectDetails, value: String) {
        details.project_type = Some(value.to_uppercase());
    }
}

/// Extension point a script targets.
///
/// Deprecated points and points without any SDK are refused, since no
/// language could be chosen for them.
#[derive(Debug, Clone)]
pub struct AskExtensionPoint {
    pub extension_point: Option<String>,
    catalog: Arc<ExtensionPointCatalog>,
}

impl AskExtensionPoint {
    pub fn new(extension_point: Option<String>, catalog: Arc<ExtensionPointCatalog>) -> Self {
        Self {
            extension_point,
            catalog,
        }
    }
}

impl Question for AskExtensionPoint {
    fn prompt_message(&self, _details: &ProjectDetails) -> String {
        messages::ask_extension_point(&self.catalog.types())
    }

    fn reprompt_message(&self, _details: &ProjectDetails) -> String {
        messages::INVALID_EXTENSION_POINT.to_string()
    }

    fn initial_value(&self, _details: &ProjectDetails) -> Option<String> {
        self.extension_point.clone()
    }

    fn accepts(&self, _details: &ProjectDetails, candidate: &str) -> bool {
        self.catalog
            .get(candidate)
            .is_some_and(ExtensionPoint::is_available)
    }

    fn apply(&self, details: &mut ProjectDetails, value: String) {
        // Store the catalog's spelling so dashed input resolves to the real type
        let extension_type = self
            .catalog
            .get(&value)
            .map_or(value, |ep| ep.extension_type().to_string());
        details.extension_point = Some(extension_type);
    }
}

/// Script language, limited to the SDKs of the chosen extension point.
///
/// With a single available SDK and no flag, that language is picked without
/// asking.
#[derive(Debug, Clone)]
pub struct AskLanguage {
    pub language: Option<String>,
    catalog: Arc<ExtensionPointCatalog>,
}

impl AskLanguage {
    pub fn new(language: Option<String>, catalog: Arc<ExtensionPointCatalog>) -> Self {
        Self { language, catalog }
    }

    fn available(&self, details: &ProjectDetails) -> Vec<SdkLanguage> {
        details
            .extension_point
            .as_deref()
            .map(|ep| self.catalog.languages(ep))
            .unwrap_or_default()
    }
}

impl Question for AskLanguage {
    fn prompt_message(&self, details: &ProjectDetails) -> String {
        let languages: Vec<String> = self
            .available(details)
            .iter()
            .map(ToString::to_string)
            .collect();
        messages::ask_language(&languages)
    }

    fn reprompt_message(&self, _details: &ProjectDetails) -> String {
        messages::INVALID_LANGUAGE.to_string()
    }

    fn initial_value(&self, details: &ProjectDetails) -> Option<String> {
        if self.language.is_some() {
            return self.language.clone();
        }
        match self.available(details).as_slice() {
            [only] => Some(only.key().to_string()),
            _ => None,
        }
    }

    fn accepts(&self, details: &ProjectDetails, candidate: &str) -> bool {
        candidate
            .parse::<SdkLanguage>()
            .is_ok_and(|language| self.available(details).contains(&language))
    }

    fn apply(&self, details: &mut ProjectDetails, value: String) {
        let language = value
            .parse::<SdkLanguage>()
            .map_or(value, |language| language.key().to_string());
        details.language = Some(language);
    }
}
