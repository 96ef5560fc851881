use std::io::{Cursor, Read};
use sonar_issue_analyzer::errors::AnalyzerError;
use sonar_issue_analyzer::services::archive_exporter::ArchiveExporter;

#[test]
fn archive_contains_every_report_under_results_root() {
    let dir = tempfile::tempdir().unwrap();
    let issue_dir = dir.path().join("my-app").join("AX-1");
    std::fs::create_dir_all(&issue_dir).unwrap();
    std::fs::write(issue_dir.join("solution.md"), "Use a guard clause.").unwrap();
    std::fs::write(issue_dir.join("report.html"), "<html></html>").unwrap();
    std::fs::create_dir_all(dir.path().join("other-app")).unwrap();

    let bytes = ArchiveExporter::new(dir.path()).build_archive().unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    assert!(names.contains(&"results/my-app/AX-1/solution.md".to_string()));
    assert!(names.contains(&"results/my-app/AX-1/report.html".to_string()));
    assert!(names.contains(&"results/other-app/".to_string()));
    assert!(names.iter().all(|n| n.starts_with("results")));

    let mut solution = String::new();
    archive
        .by_name("results/my-app/AX-1/solution.md")
        .unwrap()
        .read_to_string(&mut solution)
        .unwrap();
    assert_eq!(solution, "Use a guard clause.");
}

#[test]
fn empty_results_directory_still_produces_an_archive() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = ArchiveExporter::new(dir.path()).build_archive().unwrap();
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.file_names().filter(|n| !n.ends_with('/')).count(), 0);
}

#[test]
fn missing_results_directory_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let result = ArchiveExporter::new(dir.path().join("nope")).export_archive(Cursor::new(Vec::new()));
    assert!(matches!(result, Err(AnalyzerError::NotFoundError { .. })));
}
