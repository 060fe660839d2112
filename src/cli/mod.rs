//! CLI command handling
//!
//! Resolves configuration, builds the client and reporter, and runs checks.

use crate::api::PostsClient;
use crate::commands::{Commands, GlobalArgs};
use crate::common::config::{Config, OutputMode};
use crate::common::Result;
use crate::scenario::{run_checks, Check, CheckContext, ConsoleReporter, LogReporter, Reporter};

/// Dispatch a CLI command
///
/// Returns `Ok(false)` when a check failed; the failure has already been
/// reported by then.
pub async fn dispatch(command: Commands, args: &GlobalArgs) -> Result<bool> {
    match command {
        Commands::List => {
            for check in Check::ALL {
                println!("{}. {}", check.number(), check.name());
            }
            Ok(true)
        }

        Commands::Run => run(&Check::ALL, args).await,

        Commands::Check { checks } => run(&checks, args).await,
    }
}

/// Load the config file and apply command-line overrides
pub fn resolve_config(args: &GlobalArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(base_url) = &args.base_url {
        config.service.base_url = base_url.clone();
    }
    if let Some(mode) = args.output {
        config.output.mode = mode;
    }
    if args.no_color {
        config.output.color = false;
    }

    config.validate()?;
    Ok(config)
}

async fn run(checks: &[Check], args: &GlobalArgs) -> Result<bool> {
    let config = resolve_config(args)?;
    tracing::debug!(base_url = %config.service.base_url, "resolved configuration");

    let client = PostsClient::new(&config.service.base_url, config.service.request_timeout())?;

    let reporter: Box<dyn Reporter> = match config.output.mode {
        OutputMode::Console => Box::new(ConsoleReporter::new(config.output.color)),
        OutputMode::Log => Box::new(LogReporter),
    };

    let ctx = CheckContext {
        client: &client,
        fixtures: &config.fixtures,
        reporter: reporter.as_ref(),
    };

    let report = run_checks(checks, &ctx).await;
    Ok(report.passed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Args pointing at `server` with an empty config file
    fn args_for(server: &MockServer, file: &tempfile::NamedTempFile) -> GlobalArgs {
        GlobalArgs {
            config: Some(file.path().to_path_buf()),
            base_url: Some(server.uri()),
            output: Some(OutputMode::Log),
            no_color: true,
            ..Default::default()
        }
    }

    async fn sent(server: &MockServer) -> Vec<(String, String)> {
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| (r.method.to_string(), r.url.path().to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_check_command_runs_only_named_checks() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/posts/4"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/posts/4"))
            .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
            .mount(&server)
            .await;

        let file = tempfile::NamedTempFile::new().unwrap();
        let command = Commands::Check {
            checks: vec![Check::Delete],
        };
        let passed = dispatch(command, &args_for(&server, &file)).await.unwrap();

        assert!(passed);
        assert_eq!(
            sent(&server).await,
            vec![
                ("DELETE".to_string(), "/posts/4".to_string()),
                ("GET".to_string(), "/posts/4".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_check_command_reports_failure_as_false() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let file = tempfile::NamedTempFile::new().unwrap();
        let command = Commands::Check {
            checks: vec![Check::List, Check::GetOne],
        };
        let passed = dispatch(command, &args_for(&server, &file)).await.unwrap();

        assert!(!passed);
        // The run stops at the failing list check
        assert_eq!(sent(&server).await, vec![("GET".to_string(), "/posts".to_string())]);
    }

    #[tokio::test]
    async fn test_list_command_sends_nothing() {
        let server = MockServer::start().await;
        let file = tempfile::NamedTempFile::new().unwrap();

        let passed = dispatch(Commands::List, &args_for(&server, &file)).await.unwrap();

        assert!(passed);
        assert!(sent(&server).await.is_empty());
    }

    #[test]
    fn test_overrides_beat_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[service]\nbase_url = \"http://from-file:1\"\n\n[output]\nmode = \"log\""
        )
        .unwrap();

        let args = GlobalArgs {
            config: Some(file.path().to_path_buf()),
            base_url: Some("http://127.0.0.1:9".to_string()),
            no_color: true,
            ..Default::default()
        };

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.service.base_url, "http://127.0.0.1:9");
        assert_eq!(config.output.mode, OutputMode::Log);
        assert!(!config.output.color);
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let args = GlobalArgs {
            config: Some("/nonexistent/posts-smoke.toml".into()),
            ..Default::default()
        };
        assert!(matches!(
            resolve_config(&args),
            Err(crate::Error::FileRead { .. })
        ));
    }

    #[test]
    fn test_invalid_base_url_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file).unwrap();
        let args = GlobalArgs {
            config: Some(file.path().to_path_buf()),
            base_url: Some("localhost:3000".to_string()),
            ..Default::default()
        };
        assert!(matches!(resolve_config(&args), Err(crate::Error::Config(_))));
    }
}
