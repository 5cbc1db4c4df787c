//! GraphQL documents for the Partners API, addressed by operation name.

/// Operation name of the app creation mutation.
pub const CREATE_APP: &str = "create_app";

/// Operation name of the app URL update mutation.
pub const UPDATE_DASHBOARD_URLS: &str = "update_dashboard_urls";

const CREATE_APP_MUTATION: &str = r"
    mutation AppCreate($org: Int!, $title: String!, $type: AppType!, $app_url: Url!, $redir: [Url]!) {
        appCreate(input: {organizationID: $org, title: $title, appType: $type, applicationUrl: $app_url, redirectUrlWhitelist: $redir}) {
            app {
                id
                title
                apiKey
                apiSecretKeys {
                    secret
                }
            }
            userErrors {
                field
                message
            }
        }
    }
";

const UPDATE_DASHBOARD_URLS_MUTATION: &str = r"
    mutation AppUpdate($input: AppUpdateInput!) {
        appUpdate(input: $input) {
            userErrors {
                field
                message
            }
        }
    }
";

/// Look up the GraphQL document for an operation.
pub fn document(operation: &str) -> Option<&'static str> {
    match operation {
        CREATE_APP => Some(CREATE_APP_MUTATION),
        UPDATE_DASHBOARD_URLS => Some(UPDATE_DASHBOARD_URLS_MUTATION),
        _ => None,
    }
}
