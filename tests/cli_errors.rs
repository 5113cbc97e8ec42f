use predicates::prelude::predicate;

mod common;

#[test]
fn refuses_to_run_outside_a_repository() -> Result<(), Box<dyn std::error::Error>> {
    let dir = common::repository_dir();

    common::run_cleaner(dir.path(), &[])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));

    Ok(())
}

#[test]
fn rejects_the_size_criterion_before_touching_the_repository()
-> Result<(), Box<dyn std::error::Error>> {
    let dir = common::repository_dir();
    common::init_repo(dir.path());

    let orphan = common::dangling_commit(dir.path(), "would be deleted");
    common::git(dir.path(), &["tag", "stale", &orphan]);

    common::run_cleaner(dir.path(), &["--delete", "size"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no decision rule"));

    // nothing was swept
    assert_eq!(common::tag_names(dir.path()), vec!["stale"]);

    Ok(())
}

#[test]
fn rejects_unknown_remotes_before_any_deletion() -> Result<(), Box<dyn std::error::Error>> {
    let dir = common::repository_dir();
    common::init_repo(dir.path());

    let orphan = common::dangling_commit(dir.path(), "would be deleted");
    common::git(dir.path(), &["tag", "stale", &orphan]);

    common::run_cleaner(dir.path(), &["--delete", "no-branch", "--remotes", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown remote: nowhere"));

    assert_eq!(common::tag_names(dir.path()), vec!["stale"]);

    Ok(())
}

#[test]
fn rejects_a_malformed_preserve_pattern() -> Result<(), Box<dyn std::error::Error>> {
    let dir = common::repository_dir();
    common::init_repo(dir.path());

    common::run_cleaner(dir.path(), &["--preserve", "[unclosed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid preserve pattern"));

    Ok(())
}

#[test]
fn unknown_flags_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = common::repository_dir();

    common::run_cleaner(dir.path(), &["--frobnicate"]).assert().failure();

    Ok(())
}
