//! Service emitter: one `service_<kind>.go` per module and operation kind,
//! plus an append-only `service_<kind>_bkp.go` archive.

pub mod backup;
pub mod merge;
pub mod stub;

use std::collections::BTreeMap;
use std::path::PathBuf;

use resolvgen_analysis::SchemaModel;
use resolvgen_core::errors::EmitError;
use resolvgen_core::types::{Action, ModuleRef, OperationKind};

use crate::artifacts::{read_existing, ArtifactSet};
use crate::context::EmitContext;

pub use backup::{backup_name, format_stamp, render_backup, BACKUP_PREFIX};
pub use merge::{render_service, MergeStats, ServiceRender, DRIFT_BANNER};
pub use stub::{is_unimplemented, render_stub, STUB_PANIC};

/// Actions of one module and kind, ordered by name.
#[derive(Debug, Clone)]
pub struct ServiceGroup<'a> {
    pub module: &'a ModuleRef,
    pub kind: OperationKind,
    pub has_upload_field: bool,
    pub actions: Vec<&'a Action>,
}

/// Totals over every service file of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    pub services: usize,
    pub merge: MergeStats,
    pub archived: usize,
}

/// Group schema files by `(module, kind)`. Within a group a later action
/// with the same name replaces an earlier one.
pub fn group_services(model: &SchemaModel) -> Vec<ServiceGroup<'_>> {
    let mut groups: BTreeMap<(&ModuleRef, OperationKind), (bool, BTreeMap<&str, &Action>)> =
        BTreeMap::new();

    for file in &model.files {
        let (upload, actions) = groups.entry((&file.module, file.kind)).or_default();
        *upload |= file.has_upload_field;
        for action in &file.actions {
            actions.insert(action.name.as_str(), action);
        }
    }

    groups
        .into_iter()
        .map(|((module, kind), (has_upload_field, actions))| ServiceGroup {
            module,
            kind,
            has_upload_field,
            actions: actions.into_values().collect(),
        })
        .collect()
}

/// `<root>/<modules>/<project>/<package>/service_<kind>.go`
pub fn service_path(ctx: &EmitContext<'_>, module: &ModuleRef, kind: OperationKind) -> PathBuf {
    module_dir(ctx, module).join(format!("service_{kind}.go"))
}

/// `<root>/<modules>/<project>/<package>/service_<kind>_bkp.go`
pub fn backup_path(ctx: &EmitContext<'_>, module: &ModuleRef, kind: OperationKind) -> PathBuf {
    module_dir(ctx, module).join(format!("service_{kind}_bkp.go"))
}

fn module_dir(ctx: &EmitContext<'_>, module: &ModuleRef) -> PathBuf {
    ctx.root
        .join(&ctx.config.paths.modules_dir)
        .join(&module.project)
        .join(&module.package)
}

/// Render every service file (and backup, when needed) into `artifacts`.
pub fn render_services(
    model: &SchemaModel,
    ctx: &EmitContext<'_>,
    stamp: &str,
    artifacts: &mut ArtifactSet,
) -> Result<ServiceStats, EmitError> {
    let mut stats = ServiceStats::default();

    for group in group_services(model) {
        let path = service_path(ctx, group.module, group.kind);
        let existing = read_existing(&path)?;
        let render = render_service(&group, &model.registry, ctx, existing.as_deref());

        if !render.leftovers.is_empty() {
            let bkp_path = backup_path(ctx, group.module, group.kind);
            let previous = read_existing(&bkp_path)?;
            if let Some(content) =
                render_backup(&group.module.package, previous.as_deref(), &render.leftovers, stamp)
            {
                stats.archived += render
                    .leftovers
                    .iter()
                    .filter(|f| !is_unimplemented(f))
                    .count();
                artifacts.push(bkp_path, content);
            }
        }

        stats.services += 1;
        stats.merge.stubs += render.stats.stubs;
        stats.merge.kept += render.stats.kept;
        stats.merge.drifted += render.stats.drifted;
        stats.merge.carried += render.stats.carried;
        artifacts.push(path, render.content);
    }

    Ok(stats)
}
