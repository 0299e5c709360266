//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::{FabricClient, FabricClientConfig, PipelineClient};
use crate::connectors::list_connectors;
use crate::error::{Error, Result, ResultExt};
use crate::loader::{load_copy_job, CopyJob};
use crate::sink::CopySink;
use crate::source::CopySource;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

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
            Commands::Compile {
                job,
                pretty,
                output,
            } => self.compile(job, *pretty, output.as_deref()),
            Commands::Validate { job } => self.validate(job),
            Commands::Deploy {
                job,
                token,
                base_url,
                timeout,
            } => {
                let Some(token) = token.as_deref().filter(|t| !t.trim().is_empty()) else {
                    return Err(Error::config(
                        "Access token not specified (use --token or FABRIC_ACCESS_TOKEN)",
                    ));
                };
                let config = FabricClientConfig::builder()
                    .base_url(base_url.as_str())
                    .timeout(Duration::from_secs(*timeout))
                    .token(token)
                    .build();
                let client = FabricClient::with_config(config)?;
                self.deploy(&client, job).await
            }
            Commands::Connectors => self.list_connectors(),
        }
    }

    /// Compile a job and print or write the pipeline document
    fn compile(&self, path: &Path, pretty: bool, output: Option<&Path>) -> Result<()> {
        let job = load_copy_job(path)?;
        let definition = job.compile()?;
        let pretty = pretty || self.cli.format == OutputFormat::Pretty;
        let document = definition.to_json_string(pretty)?;

        match output {
            Some(output) => {
                fs::write(output, document)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                info!("Wrote pipeline '{}' to {}", job.pipeline_name, output.display());
            }
            None => println!("{document}"),
        }
        Ok(())
    }

    /// Validate a job and its connector configurations
    fn validate(&self, path: &Path) -> Result<()> {
        let job = load_copy_job(path)?;
        let source = job.source_model()?;
        let sink = job.sink_model()?;

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "Copy job '{}' is valid: {} to {}",
                    job.pipeline_name,
                    source.kind(),
                    sink.kind()
                )
            }
        }));
        Ok(())
    }

    /// Compile a job and publish it through `client`
    async fn deploy(&self, client: &dyn PipelineClient, path: &Path) -> Result<()> {
        let job = load_copy_job(path)?;
        let definition = job.compile()?;

        match client
            .create_or_update(&job.workspace_id, &job.pipeline_name, &definition)
            .await
        {
            Ok(id) => {
                self.output_message(&deployed_message(&job, Some(id.as_str()), None));
                Ok(())
            }
            Err(Error::OperationPending { location }) => {
                warn!("Pipeline '{}' is still being created", job.pipeline_name);
                self.output_message(&deployed_message(&job, None, Some(&location)));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// List known connectors
    fn list_connectors(&self) -> Result<()> {
        let connectors: Vec<Value> = list_connectors()
            .iter()
            .map(|info| {
                json!({
                    "name": info.name,
                    "description": info.description,
                    "aliases": info.aliases,
                    "source": info.source,
                    "sink": info.sink
                })
            })
            .collect();

        self.output_message(&json!({
            "type": "CONNECTORS",
            "connectors": connectors
        }));
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

fn deployed_message(job: &CopyJob, id: Option<&str>, location: Option<&str>) -> Value {
    let status = if id.is_some() { "DEPLOYED" } else { "PENDING" };
    json!({
        "type": status,
        "pipeline": {
            "workspace_id": job.workspace_id,
            "name": job.pipeline_name,
            "id": id,
            "operation": location
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_compile() {
        let cli = Cli::try_parse_from(["fabric-copy", "compile", "--job", "job.yaml", "--pretty"])
            .unwrap();
        match cli.command {
            Commands::Compile { job, pretty, output } => {
                assert_eq!(job, PathBuf::from("job.yaml"));
                assert!(pretty);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_deploy_defaults() {
        let cli = Cli::try_parse_from([
            "fabric-copy",
            "deploy",
            "-j",
            "job.yaml",
            "--token",
            "abc",
        ])
        .unwrap();
        match cli.command {
            Commands::Deploy {
                token,
                base_url,
                timeout,
                ..
            } => {
                assert_eq!(token.as_deref(), Some("abc"));
                assert_eq!(base_url, "https://api.fabric.microsoft.com");
                assert_eq!(timeout, 60);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_compile_requires_job() {
        assert!(Cli::try_parse_from(["fabric-copy", "compile"]).is_err());
    }

    #[test]
    fn test_deployed_message() {
        let job = crate::loader::load_copy_job_from_str(
            r"
workspace_id: ws-1
pipeline_name: p
source: {type: S3, config: {connection_id: s3, bucket_name: in, file_path_config: {prefix: raw/}}}
sink: {type: S3, config: {connection_id: s3, bucket_name: out, file_config: {folder_path: copy}}}
",
        )
        .unwrap();

        let message = deployed_message(&job, None, Some("https://ops/1"));
        assert_eq!(message["type"], "PENDING");
        assert_eq!(message["pipeline"]["operation"], "https://ops/1");
        assert!(message["pipeline"]["id"].is_null());
    }
}
