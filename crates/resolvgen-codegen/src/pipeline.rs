//! Generator pipeline: discover → analyze → render → commit.
//!
//! Rendering never writes; a contract violation anywhere aborts before the
//! commit, leaving the project untouched.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Local;
use resolvgen_analysis::scanner::walk_directory;
use resolvgen_analysis::{SchemaModel, SchemaModelBuilder};
use resolvgen_core::errors::Result;
use resolvgen_core::ResolvgenConfig;

use crate::artifacts::{ArtifactSet, CommitStats};
use crate::assembler::assemble_schema;
use crate::context::EmitContext;
use crate::resolver::render_resolver;
use crate::service::{format_stamp, render_services, ServiceStats};

/// Completed rendering stage, reported on stdout by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    RenderSchemas,
    RenderResolver,
    RenderService,
}

impl Stage {
    pub fn marker(&self) -> &'static str {
        match self {
            Self::RenderSchemas => "RenderSchemas",
            Self::RenderResolver => "RenderResolver",
            Self::RenderService => "RenderService",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub stages: Vec<Stage>,
    pub artifacts: ArtifactSet,
    pub services: ServiceStats,
    /// `None` until the artifacts were committed.
    pub commit: Option<CommitStats>,
}

/// Runs the whole generation for one project root.
pub struct Generator {
    root: PathBuf,
    config: ResolvgenConfig,
    stamp: Option<String>,
}

impl Generator {
    pub fn new(root: impl Into<PathBuf>, config: ResolvgenConfig) -> Self {
        Self {
            root: root.into(),
            config,
            stamp: None,
        }
    }

    /// Fix the backup stamp instead of using the local time.
    pub fn with_stamp(mut self, stamp: impl Into<String>) -> Self {
        self.stamp = Some(stamp.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ResolvgenConfig {
        &self.config
    }

    /// Discover schema files and build the model.
    pub fn analyze(&self) -> Result<SchemaModel> {
        let discovery = walk_directory(&self.root, &self.config.scan)?;
        Ok(SchemaModelBuilder::new(&self.config).build(&discovery)?)
    }

    /// Render every artifact of a model without writing anything.
    pub fn render(&self, model: &SchemaModel) -> Result<GenerationReport> {
        let go_module = self.config.go_module_for(&self.root)?;
        let ctx = EmitContext::new(&self.root, &go_module, &self.config);
        let paths = &self.config.paths;
        let mut artifacts = ArtifactSet::new();
        let mut stages = Vec::with_capacity(3);

        artifacts.push(ctx.output_path(&paths.schema_output), assemble_schema(model));
        stages.push(Stage::RenderSchemas);
        tracing::info!(stage = %Stage::RenderSchemas, documents = model.documents.len(), "stage complete");

        artifacts.push(ctx.output_path(&paths.resolver_output), render_resolver(model, &ctx));
        stages.push(Stage::RenderResolver);
        tracing::info!(stage = %Stage::RenderResolver, actions = model.action_count(), "stage complete");

        let stamp = self
            .stamp
            .clone()
            .unwrap_or_else(|| format_stamp(Local::now().naive_local()));
        let services = render_services(model, &ctx, &stamp, &mut artifacts)?;
        stages.push(Stage::RenderService);
        tracing::info!(
            stage = %Stage::RenderService,
            services = services.services,
            archived = services.archived,
            "stage complete"
        );

        Ok(GenerationReport {
            stages,
            artifacts,
            services,
            commit: None,
        })
    }

    /// Analyze and render; nothing is written.
    pub fn plan(&self) -> Result<GenerationReport> {
        let model = self.analyze()?;
        self.render(&model)
    }

    /// Analyze, render and commit.
    pub fn run(&self) -> Result<GenerationReport> {
        let mut report = self.plan()?;
        report.commit = Some(report.artifacts.commit()?);
        Ok(report)
    }
}
