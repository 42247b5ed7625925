use std::path::Path;
use std::time::Duration;

use ::config::{ConfigError, Environment, File, FileFormat, Source};

use crate::launcher::BrowserKiosk;
use crate::notifier::SmtpNotifier;
use crate::poller::{TcpProbe, ThreadSleeper};
use crate::service::AgentStart;

/// Looked up in the working directory as agentstart.yaml or agentstart.yml.
pub const CONFIG_FILE_NAME: &str = "agentstart";
pub const ENV_PREFIX: &str = "AGENTSTART";
pub const DEFAULT_SMTP_PORT: u16 = 465;

type Sources = Vec<Box<dyn Source + Send + Sync>>;

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Config {
    #[serde(rename = "fromname")]
    pub from_name: String,
    #[serde(rename = "fromaddress")]
    pub from_address: String,
    #[serde(rename = "toname")]
    pub to_name: String,
    #[serde(rename = "toaddress")]
    pub to_address: String,
    /// host:port of an implicit TLS submission server.
    #[serde(rename = "smtpserver")]
    pub smtp_server: String,
    #[serde(rename = "authuser")]
    pub auth_user: String,
    #[serde(rename = "authpassword")]
    pub auth_password: String,

    pub host: String,
    pub port: u16,
    pub url: url::Url,
    pub browser: String,
    #[serde(rename = "browserflags")]
    pub browser_flags: String,
    #[serde(rename = "pollseconds")]
    pub poll_seconds: u64,
    #[serde(rename = "settleseconds")]
    pub settle_seconds: u64,
    #[serde(rename = "camerafile")]
    pub camera_file: String,
    #[serde(rename = "systemdrive")]
    pub system_drive: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            from_name: "AgentStart".into(),
            from_address: "agentstart@example.com".into(),
            to_name: "".into(),
            to_address: "operator@example.com".into(),
            smtp_server: format!("smtp.example.com:{DEFAULT_SMTP_PORT}"),
            auth_user: "agentstart@example.com".into(),
            auth_password: "".into(),
            host: "127.0.0.1".into(),
            port: 8090,
            url: url::Url::parse("http://localhost:8090").expect("static url is valid"),
            browser: "msedge".into(),
            browser_flags: "--kiosk --edge-kiosk-type=fullscreen".into(),
            poll_seconds: 20,
            settle_seconds: 20,
            camera_file: r"C:\Program Files\Agent\Media\XML\objects.xml".into(),
            system_drive: if cfg!(windows) { r"C:\" } else { "/" }.into(),
        }
    }
}

impl Config {
    /// Defaults, then the optional override file in the working directory,
    /// then AGENTSTART_* environment variables.
    pub fn load() -> Self {
        Self::load_in(Path::new("."))
    }

    /// Like [`Config::load`], with the override file looked up in `dir`.
    pub fn load_in(dir: &Path) -> Self {
        let name = dir.join(CONFIG_FILE_NAME);
        let sources: Sources = vec![
            Box::new(File::with_name(&name.to_string_lossy()).required(false)),
            Box::new(Environment::with_prefix(ENV_PREFIX)),
        ];
        Self::or_defaults(Self::layered(sources))
    }

    /// Defaults overridden by a single YAML file, if it exists.
    pub fn load_from(path: &Path) -> Self {
        let sources: Sources = vec![Box::new(
            File::new(&path.to_string_lossy(), FileFormat::Yaml).required(false),
        )];
        Self::or_defaults(Self::layered(sources))
    }

    /// Wires the real probe, mailer and browser around this configuration.
    pub fn get_service(self) -> AgentStart {
        let probe = Box::new(TcpProbe::from(&self));
        let notifier = Box::new(SmtpNotifier::from(&self));
        let kiosk = Box::new(BrowserKiosk::from(&self));
        AgentStart::new(self, probe, Box::new(ThreadSleeper), notifier, kiosk)
    }

    fn layered(sources: Sources) -> std::result::Result<Self, ConfigError> {
        ::config::Config::builder()
            .add_source(::config::Config::try_from(&Self::default())?)
            .add_source(sources)
            .build()?
            .try_deserialize()
    }

    fn or_defaults(result: std::result::Result<Self, ConfigError>) -> Self {
        match result {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring configuration overrides, using defaults");
                Self::default()
            }
        }
    }

    /// Splits `smtpserver` into host and port. A missing or invalid port
    /// falls back to the implicit TLS submission port.
    pub fn smtp_endpoint(&self) -> (String, u16) {
        match self.smtp_server.rsplit_once(':') {
            Some((host, port)) => match port.parse() {
                Ok(port) => (host.to_string(), port),
                Err(_) => {
                    tracing::warn!(
                        smtpserver = self.smtp_server,
                        "Invalid SMTP port, using {DEFAULT_SMTP_PORT}"
                    );
                    (host.to_string(), DEFAULT_SMTP_PORT)
                }
            },
            None => (self.smtp_server.clone(), DEFAULT_SMTP_PORT),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_seconds)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_seconds)
    }

    // config-rs makes lists awkward to set from the environment, so the
    // flags are kept as one string and split here.
    pub fn browser_flags(&self) -> Vec<String> {
        self.browser_flags
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}
