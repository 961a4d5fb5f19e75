use assert_fs::prelude::*;
use codest::error::CodestError;
use codest::normalize::PathNormalizer;
use codest::target::Targets;

const NONE: [&str; 0] = [];

#[test]
fn resolves_relative_roots() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = assert_fs::TempDir::new()?;
    tmp.child("src/frontend").create_dir_all()?;
    tmp.child("tests").create_dir_all()?;
    let normalizer = PathNormalizer::new(tmp.path());

    let targets = Targets::resolve(&normalizer, ["src", "src/frontend", "tests", "./src"], NONE)?;
    assert_eq!(
        targets.roots(),
        [tmp.path().join("src"), tmp.path().join("tests")]
    );
    assert!(targets.excluded().is_empty());
    tmp.close()?;
    Ok(())
}

#[test]
fn rejects_file_root() {
    let tmp = assert_fs::TempDir::new().unwrap();
    let f = tmp.child("README.md");
    f.write_str("x").unwrap();
    let err = Targets::resolve(&PathNormalizer::new(tmp.path()), [f.path()], NONE).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("not a directory"), "got: {msg}");
}

#[test]
fn rejects_missing_root() {
    let tmp = assert_fs::TempDir::new().unwrap();
    let err = Targets::resolve(&PathNormalizer::new(tmp.path()), ["gone"], NONE).unwrap_err();
    assert!(
        matches!(err, CodestError::Configuration { .. }),
        "got: {err}"
    );
}

#[test]
fn rejects_empty_root_list() {
    let tmp = assert_fs::TempDir::new().unwrap();
    assert!(Targets::resolve(&PathNormalizer::new(tmp.path()), NONE, NONE).is_err());
}

#[test]
fn excluded_dirs_are_absolute_and_deduplicated() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = assert_fs::TempDir::new()?;
    tmp.child("proj/tests").create_dir_all()?;
    tmp.child("elsewhere").create_dir_all()?;
    let normalizer = PathNormalizer::new(tmp.path());

    let targets = Targets::resolve(
        &normalizer,
        ["proj"],
        ["proj/tests", "./proj/tests", "elsewhere"],
    )?;
    assert_eq!(
        targets.excluded(),
        [tmp.path().join("elsewhere"), tmp.path().join("proj/tests")]
    );
    Ok(())
}

#[test]
fn rejects_exclude_that_is_a_file() {
    let tmp = assert_fs::TempDir::new().unwrap();
    tmp.child("proj/notes.md").write_str("x").unwrap();
    let err = Targets::resolve(
        &PathNormalizer::new(tmp.path()),
        ["proj"],
        ["proj/notes.md"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("not a directory"), "got: {err}");
}
