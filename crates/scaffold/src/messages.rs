//! User-facing message catalog.

/// Abort message when the transport produced no response.
pub const EMPTY_RESPONSE: &str = "Error - empty response";

/// Abort message when the response carried a result we could not read.
pub const UNEXPECTED_RESPONSE: &str = "Error - unexpected response";

pub const ASK_NAME: &str = "Project name";

pub fn invalid_name(max_length: usize) -> String {
    format!("Name must be between 1 and {max_length} characters, please try again.")
}

pub const ASK_APP_TYPE: &str = "What type of app are you building? (public, custom)";

pub fn invalid_app_type(valid: &[&str]) -> String {
    format!("App type must be one of: {}", valid.join(", "))
}

pub const ASK_ORGANIZATION: &str = "Partner organization ID";
pub const INVALID_ORGANIZATION: &str = "Organization ID must be a positive number.";

pub const ASK_API_KEY: &str = "API key of the app this extension belongs to";
pub const INVALID_API_KEY: &str = "That API key doesn't match any of your apps.";
pub const BLANK_API_KEY: &str = "API key can't be blank.";

pub fn ask_extension_type(types: &[&str]) -> String {
    format!("Extension type ({})", types.join(", "))
}

pub const INVALID_EXTENSION_TYPE: &str = "Unknown extension type, please pick one from the list.";

pub fn ask_extension_point(types: &[&str]) -> String {
    format!("Extension point ({})", types.join(", "))
}

pub const INVALID_EXTENSION_POINT: &str =
    "Unknown or deprecated extension point, please pick one from the list.";

pub fn ask_language(languages: &[String]) -> String {
    format!("Script language ({})", languages.join(", "))
}

pub const INVALID_LANGUAGE: &str = "That language isn't available for this extension point.";

pub fn directory_exists(directory: &str) -> String {
    format!("Directory {directory} already exists, please choose another name.")
}

pub fn app_created(title: &str, api_key: &str) -> String {
    format!("{title} was created in your Partner Dashboard (API key: {api_key})")
}

pub fn extension_ready(directory: &str, name: &str) -> String {
    format!("{name} is ready to build! Run `cd {directory}` to start.")
}

pub fn script_ready(directory: &str) -> String {
    format!("Change directories to your new script with `cd {directory}`")
}

pub fn beta_language(language: &str, extension_point: &str) -> String {
    format!("The {language} SDK for {extension_point} is in beta and may change.")
}

pub const FORM_CANCELLED: &str = "Cancelled, nothing was created.";
