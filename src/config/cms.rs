//! The CMS side of the configuration: what the framework reads from the
//! environment at bootstrap, assembled once into plain values.

use serde::Serialize;
use std::collections::BTreeMap;

const REDACTED: &str = "********";

#[derive(Clone, PartialEq, Serialize)]
pub struct CmsConfig {
    /// `ENVIRONMENT`, `production` when unset or empty
    pub environment: String,
    pub app: AppConfig,
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub id: String,
    pub deprecator_throw_exceptions: bool,
}

#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralConfig {
    pub aliases: BTreeMap<String, Option<String>>,
    pub allow_admin_changes: bool,
    pub allow_updates: bool,
    pub backup_on_update: bool,
    pub dev_mode: bool,
    pub disallow_robots: bool,
    pub enable_template_caching: bool,
    pub max_upload_file_size: Option<String>,
    pub run_queue_automatically: bool,
    pub security_key: Option<String>,
    pub user_session_duration: Option<String>,

    pub cache_duration: u32,
    pub default_week_start_day: u8,
    pub error_template_prefix: String,
    pub generate_transforms_before_page_load: bool,
    pub max_cached_cloud_image_size: u32,
    pub omit_script_name_in_urls: bool,
    pub timezone: String,
    pub use_email_as_username: bool,
    pub use_path_info: bool,
}

impl CmsConfig {
    /// Later entries win, so pass the `.env` pairs before the process
    /// environment.
    pub fn from_vars<'a>(vars: impl IntoIterator<Item = &'a (String, String)>) -> Self {
        let env: BTreeMap<&str, &str> = vars
            .into_iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let text = |key: &str| env.get(key).map(|val| val.to_string());
        let flag = |key: &str| env.get(key).is_some_and(|val| truthy(val));

        let aliases = [
            ("@assetsUrl", "ASSETS_URL"),
            ("@cloudfrontUrl", "CLOUDFRONT_URL"),
            ("@web", "SITE_URL"),
        ]
        .into_iter()
        .map(|(alias, key)| (alias.to_string(), text(key)))
        .collect();

        Self {
            environment: non_empty(text("ENVIRONMENT")).unwrap_or_else(|| "production".to_string()),
            app: AppConfig {
                id: non_empty(text("APP_ID")).unwrap_or_else(|| "CraftCMS".to_string()),
                deprecator_throw_exceptions: flag("DEV_MODE"),
            },
            general: GeneralConfig {
                aliases,
                allow_admin_changes: flag("ALLOW_ADMIN_CHANGES"),
                allow_updates: flag("ALLOW_UPDATES"),
                backup_on_update: flag("BACKUP_ON_UPDATE"),
                dev_mode: flag("DEV_MODE"),
                disallow_robots: flag("DISALLOW_ROBOTS"),
                enable_template_caching: flag("ENABLE_TEMPLATE_CACHING"),
                max_upload_file_size: text("MAX_UPLOAD_FILE_SIZE"),
                run_queue_automatically: flag("RUN_QUEUE_AUTOMATICALLY"),
                security_key: text("SECURITY_KEY"),
                user_session_duration: text("USER_SESSION_DURATION"),

                cache_duration: 0,
                default_week_start_day: 0,
                error_template_prefix: "errors/".to_string(),
                generate_transforms_before_page_load: true,
                max_cached_cloud_image_size: 3840,
                omit_script_name_in_urls: true,
                timezone: "Asia/Riyadh".to_string(),
                use_email_as_username: true,
                use_path_info: true,
            },
        }
    }

    /// Copy safe to print: the security key, when set, is masked.
    pub fn redacted(&self) -> Self {
        let mut conf = self.clone();
        if conf.general.security_key.is_some() {
            conf.general.security_key = Some(REDACTED.to_string());
        }
        conf
    }
}

/// The framework's boolean cast of an environment string: empty and `"0"`
/// are false, anything else (`"false"` included) is true. This is Craft 3
/// before 3.7, where `getenv()` strings go through PHP's `(bool)`; 3.7 and
/// later turn `"false"` into `false` in `App::env`.
pub fn truthy(val: &str) -> bool {
    !(val.is_empty() || val == "0")
}

fn non_empty(val: Option<String>) -> Option<String> {
    val.filter(|v| !v.is_empty())
}

impl std::fmt::Debug for CmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsConfig")
            .field("environment", &self.environment)
            .field("app", &self.app)
            .field("general", &self.general)
            .finish()
    }
}

impl std::fmt::Debug for GeneralConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneralConfig")
            .field("aliases", &self.aliases)
            .field("dev_mode", &self.dev_mode)
            .field("allow_admin_changes", &self.allow_admin_changes)
            .field("allow_updates", &self.allow_updates)
            .field(
                "security_key",
                &self.security_key.as_ref().map(|_| REDACTED),
            )
            .finish_non_exhaustive()
    }
}
