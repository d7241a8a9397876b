mod args;

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use resolvgen_codegen::Generator;
use resolvgen_core::errors::{ErrorCode, ResolvgenError};
use resolvgen_core::tracing::init_tracing;
use resolvgen_core::ResolvgenConfig;

use args::Args;

fn main() -> ExitCode {
    let args = args::parse();
    init_tracing(&args.log_level);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[{}] {e:#}", error_code(&e));
            ExitCode::FAILURE
        }
    }
}

fn error_code(e: &anyhow::Error) -> &'static str {
    e.downcast_ref::<ResolvgenError>()
        .map(|e| e.error_code())
        .unwrap_or("RESOLVGEN_ERROR")
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let config = ResolvgenConfig::load(&args.root, args.config.as_deref()).map_err(ResolvgenError::from)?;
    let generator = Generator::new(&args.root, config);
    let mut stdout = std::io::stdout().lock();

    if args.dump_model {
        let model = generator.analyze()?;
        let json = serde_json::to_string_pretty(&model.dump()).context("serializing schema model")?;
        writeln!(stdout, "{json}").context("writing schema model")?;
        return Ok(ExitCode::SUCCESS);
    }

    if args.dry_run {
        let report = generator.plan()?;
        let pending = report.artifacts.pending().map_err(ResolvgenError::from)?;
        for artifact in &pending {
            writeln!(stdout, "would write {}", display_path(&args.root, &artifact.path))
                .context("writing dry-run report")?;
        }
        return Ok(if pending.is_empty() {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    let report = generator.run()?;
    for stage in &report.stages {
        writeln!(stdout, "{stage}").context("writing stage markers")?;
    }
    if let Some(commit) = &report.commit {
        tracing::info!(
            written = commit.written,
            unchanged = commit.unchanged,
            archived = report.services.archived,
            drifted = report.services.merge.drifted,
            "generation finished"
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use resolvgen_core::errors::ConfigError;
    use std::path::PathBuf;

    #[test]
    fn test_error_code_of_generator_errors() {
        let e = anyhow::Error::from(ResolvgenError::from(ConfigError::MissingGoModule {
            root: PathBuf::from("."),
        }));
        assert_eq!(error_code(&e), "CONFIG_MISSING_GO_MODULE");
        assert_eq!(error_code(&anyhow::anyhow!("other")), "RESOLVGEN_ERROR");
    }

    #[test]
    fn test_dry_run_on_fresh_project_reports_changes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("go.mod"), "module example.com/api\n").unwrap();
        let schemas = dir.path().join("modules/shop/user/schemas");
        std::fs::create_dir_all(&schemas).unwrap();
        std::fs::write(schemas.join("user_query.graphqls"), "type Query {\n  ping: PingResponse!\n}\n").unwrap();

        let args = Args {
            root: dir.path().to_path_buf(),
            config: None,
            log_level: "off".to_string(),
            dry_run: true,
            dump_model: false,
        };
        assert_eq!(run(&args).unwrap(), ExitCode::from(1));
        assert!(!dir.path().join("graph").exists());
    }

    #[test]
    fn test_display_path_is_root_relative() {
        assert_eq!(
            display_path(Path::new("/p"), Path::new("/p/graph/schema.graphqls")),
            "graph/schema.graphqls"
        );
    }
}
