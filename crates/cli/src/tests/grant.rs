use acl::{AccessAce, AccessMask, Ace, Acl};

use super::common::*;
use super::*;

fn deny_then_inherited() -> Acl {
    Acl::with_entries(
        2,
        vec![
            Ace::deny(sid("S-1-5-7"), AccessMask::from_raw(AccessMask::SERVICE_CHANGE_CONFIG)),
            AccessAce::allow(sid("S-1-5-11"), AccessMask::from_raw(AccessMask::SERVICE_QUERY_STATUS))
                .inherited()
                .into(),
        ],
    )
}

#[test]
fn default_grant_gives_interactive_start() {
    let dir = tempfile::tempdir().unwrap();
    store(dir.path(), SVC, &deny_then_inherited());
    let blob_dir = dir.path().to_str().unwrap();

    let (code, stdout, stderr) = run_with_args(["svcperm", "grant", SVC, "--blob-dir", blob_dir]);

    assert_eq!(code, 0, "{}", text(stderr));
    assert_eq!(text(stdout), "inserted  S-1-5-4 0x00000010\n");

    let after = load(dir.path(), SVC);
    assert_eq!(after.len(), 3);
    assert_eq!(
        after.entries()[1],
        Ace::allow(sid("S-1-5-4"), AccessMask::from_raw(AccessMask::SERVICE_START))
    );
}

#[test]
fn rights_are_combined_into_one_mask() {
    let dir = tempfile::tempdir().unwrap();
    store(dir.path(), SVC, &Acl::new(2));
    let blob_dir = dir.path().to_str().unwrap();

    let (code, stdout, _) = run_with_args([
        "svcperm", "grant", SVC, "--blob-dir", blob_dir, "--right", "start", "--right", "stop",
        "-r", "query-status",
    ]);

    assert_eq!(code, 0);
    assert_eq!(text(stdout), "appended  S-1-5-4 0x00000034\n");
}

#[test]
fn each_principal_gets_its_own_line() {
    let dir = tempfile::tempdir().unwrap();
    store(dir.path(), SVC, &Acl::new(2));
    let blob_dir = dir.path().to_str().unwrap();

    let (code, stdout, _) = run_with_args([
        "svcperm",
        "grant",
        SVC,
        "--blob-dir",
        blob_dir,
        "--principal",
        "authenticated-users",
        "-p",
        "S-1-5-32-545",
    ]);

    assert_eq!(code, 0);
    assert_eq!(
        text(stdout),
        "appended  S-1-5-11 0x00000010\nappended  S-1-5-32-545 0x00000010\n"
    );
    assert_eq!(load(dir.path(), SVC).len(), 2);
}

#[test]
fn repeated_grant_reports_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    store(dir.path(), SVC, &Acl::new(2));
    let blob_dir = dir.path().to_str().unwrap();

    run_with_args(["svcperm", "grant", SVC, "--blob-dir", blob_dir]);
    let (code, stdout, _) = run_with_args(["svcperm", "grant", SVC, "--blob-dir", blob_dir]);

    assert_eq!(code, 0);
    assert_eq!(text(stdout), "unchanged S-1-5-4 0x00000010\n");
}

#[test]
fn existing_entry_is_widened() {
    let dir = tempfile::tempdir().unwrap();
    let acl = Acl::with_entries(
        2,
        vec![Ace::allow(
            sid("S-1-5-4"),
            AccessMask::from_raw(AccessMask::SERVICE_QUERY_STATUS),
        )],
    );
    store(dir.path(), SVC, &acl);
    let blob_dir = dir.path().to_str().unwrap();

    let (code, stdout, _) = run_with_args(["svcperm", "grant", SVC, "--blob-dir", blob_dir]);

    assert_eq!(code, 0);
    assert_eq!(text(stdout), "updated   S-1-5-4 0x00000014\n");
}

#[test]
fn dry_run_leaves_blob_untouched() {
    let dir = tempfile::tempdir().unwrap();
    store(dir.path(), SVC, &deny_then_inherited());
    let before = std::fs::read(dir.path().join("Spooler.dacl")).unwrap();
    let blob_dir = dir.path().to_str().unwrap();

    let (code, stdout, _) =
        run_with_args(["svcperm", "grant", SVC, "--blob-dir", blob_dir, "--dry-run"]);

    assert_eq!(code, 0);
    assert_eq!(text(stdout), "inserted  S-1-5-4 0x00000010 (dry run)\n");
    assert_eq!(std::fs::read(dir.path().join("Spooler.dacl")).unwrap(), before);
}

#[test]
fn mask_defaults_and_unions() {
    let parsed = Cli::try_parse_from(["svcperm", "grant", SVC]).unwrap();
    let Command::Grant(args) = parsed.command else {
        panic!("expected grant");
    };
    assert_eq!(args.principal_names(), vec![DEFAULT_PRINCIPAL]);
    assert_eq!(args.mask().as_raw(), AccessMask::SERVICE_START);
    assert_eq!(args.target.kind, Kind::Service);

    let parsed = Cli::try_parse_from(["svcperm", "grant", SVC, "-r", "all", "-r", "write-dac"]).unwrap();
    let Command::Grant(args) = parsed.command else {
        panic!("expected grant");
    };
    assert_eq!(args.mask().as_raw(), AccessMask::SERVICE_ALL_ACCESS);
}
