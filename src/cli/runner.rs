//! CLI runner - executes commands

use crate::auth::registered_schemes;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::template::{RenderUrl, UrlTemplate};
use crate::types::{Credential, UrlTemplateParams};
use serde_json::json;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Get {
                db_name,
                username,
                token,
            } => self.get(db_name, username, token).await,
            Commands::Schemes => {
                for scheme in registered_schemes() {
                    println!("{scheme}");
                }
                Ok(())
            }
            Commands::Validate => self.validate(),
        }
    }

    /// Settings from the file (if any) with command-line overrides applied
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.cli.settings {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        if let Some(template) = &self.cli.url_template {
            settings.url_template = Some(template.clone());
        }
        if let Some(ms) = self.cli.read_timeout_ms {
            settings.read_timeout_ms = Some(ms);
        }
        if let Some(ms) = self.cli.connect_timeout_ms {
            settings.connect_timeout_ms = Some(ms);
        }
        if let Some(scheme) = &self.cli.auth_scheme {
            settings.auth.scheme = scheme.clone();
        }

        Ok(settings)
    }

    async fn get(&self, db_name: &str, username: &str, token: &str) -> Result<()> {
        let client = self
            .settings()?
            .build_client()?
            .ok_or_else(|| Error::config("credential client is disabled in settings"))?;

        debug!(
            "Using auth scheme {} (read timeout: {:?}, connect timeout: {:?})",
            client.auth_scheme(),
            client.read_timeout(),
            client.connect_timeout()
        );

        let credential = client.get_credentials(db_name, username, token).await?;
        println!("{}", format_credential(&credential, self.cli.format));
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let settings = self.settings()?;
        let source = settings.url_template.clone().unwrap_or_default();
        let config = settings.into_client_config()?;
        let template = UrlTemplate::parse(&source)?;

        // Unknown placeholders only surface at render time
        template.render(&UrlTemplateParams::new("db", "user", "token"))?;

        info!(
            "Settings valid (placeholders: [{}], auth scheme: {}, read timeout: {:?}, connect timeout: {:?})",
            template.variables().join(", "),
            config.auth_config.scheme,
            config.read_timeout,
            config.connect_timeout
        );
        println!("ok");
        Ok(())
    }
}

/// Render a credential for stdout
pub fn format_credential(credential: &Credential, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json!({
            "username": credential.username,
            "password": credential.password,
        })
        .to_string(),
        OutputFormat::Pretty => format!(
            "username={} password={}",
            credential.username, credential.password
        ),
    }
}
