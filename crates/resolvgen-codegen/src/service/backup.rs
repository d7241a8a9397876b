//! Archive of implemented service functions whose action disappeared.

use chrono::NaiveDateTime;

use crate::go_source::GoFunction;

use super::stub::is_unimplemented;

pub const BACKUP_PREFIX: &str = "BKP__";

/// `ddmmyyyy_HHMMSS`, the stamp embedded in archived function names.
pub fn format_stamp(at: NaiveDateTime) -> String {
    at.format("%d%m%Y_%H%M%S").to_string()
}

/// `BKP__<stamp>_<Name>`
pub fn backup_name(stamp: &str, name: &str) -> String {
    format!("{BACKUP_PREFIX}{stamp}_{name}")
}

/// Header of a new backup file. The build constraint keeps archived code,
/// which may no longer compile, out of the package.
fn backup_header(package: &str) -> String {
    format!("//go:build ignore\n\npackage {package}\n\n")
}

/// Append implemented leftovers to the backup content.
///
/// Returns `None` when nothing needs archiving. Stubs that were never
/// implemented are dropped.
pub fn render_backup(
    package: &str,
    existing: Option<&str>,
    leftovers: &[GoFunction],
    stamp: &str,
) -> Option<String> {
    let implemented: Vec<&GoFunction> = leftovers
        .iter()
        .filter(|f| {
            let keep = !is_unimplemented(f);
            if !keep {
                tracing::debug!(function = %f.name, "dropping unimplemented stub");
            }
            keep
        })
        .collect();
    if implemented.is_empty() {
        return None;
    }

    let existing = existing.unwrap_or_default();
    let mut out = String::with_capacity(existing.len() + 512);
    if !existing.contains("package") {
        out.push_str(&backup_header(package));
    }
    out.push_str(existing);
    if !out.ends_with('\n') {
        out.push('\n');
    }

    for function in implemented {
        let renamed = backup_name(stamp, &function.name);
        tracing::warn!(function = %function.name, archived_as = %renamed, "archiving function without action");
        out.push_str(&function.renamed(&renamed));
        out.push_str("\n\n");
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::go_source::GoSource;
    use chrono::NaiveDate;

    const LEFTOVERS: &str = "package user\n\n\
        func DeleteUserMutation(ctx context.Context, id string) (*model.DeleteUserResponse, error) {\n\
        \treturn &response, nil\n}\n\n\
        func OldQuery(ctx context.Context) (*model.OldResponse, error) {\n\
        \tpanic(fmt.Errorf(\"not implemented\"))\n\
        \treturn &response, nil\n}\n";

    fn leftovers() -> Vec<GoFunction> {
        GoSource::parse(LEFTOVERS).functions
    }

    #[test]
    fn test_format_stamp() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap();
        assert_eq!(format_stamp(at), "07032024_090501");
    }

    #[test]
    fn test_new_backup_gets_header_once() {
        let first = render_backup("user", None, &leftovers(), "07032024_090501").unwrap();
        assert_eq!(
            first,
            "//go:build ignore\n\npackage user\n\n\
             func BKP__07032024_090501_DeleteUserMutation(ctx context.Context, id string) (*model.DeleteUserResponse, error) {\n\
             \treturn &response, nil\n}\n\n"
        );
        assert!(!first.contains("OldQuery"));

        let second = render_backup("user", Some(&first), &leftovers(), "08032024_000000").unwrap();
        assert_eq!(second.matches("package user").count(), 1);
        assert!(second.starts_with(&first));
        assert!(second.contains("BKP__08032024_000000_DeleteUserMutation"));
    }

    #[test]
    fn test_nothing_to_archive() {
        let only_stubs: Vec<_> = leftovers().into_iter().filter(|f| f.name == "OldQuery").collect();
        assert!(render_backup("user", None, &only_stubs, "x").is_none());
        assert!(render_backup("user", None, &[], "x").is_none());
    }
}
