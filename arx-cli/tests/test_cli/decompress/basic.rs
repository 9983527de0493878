use std::fs;

use crate::add_test;
use crate::common::Fixture;

// Without a destination, extraction targets the working directory.
add_test!(decompress_without_dest_uses_current_directory, async {
    let producer = Fixture::with_project_tree();
    let output = producer
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "project"),
            ("FORMAT", "tar"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);

    let consumer = Fixture::empty();
    fs::copy(producer.path("project.tar"), consumer.path("project.tar")).unwrap();

    let output = consumer
        .run_arx(&[
            ("COMMAND", "decompress"),
            ("SOURCE", "project.tar"),
            ("FORMAT", "tar"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert_eq!(consumer.read("project/a.txt"), b"alpha");
});

add_test!(extracted_contents_are_listed, async {
    let fixture = Fixture::with_project_tree();
    let output = fixture
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "project"),
            ("FORMAT", "tar"),
            ("INCLUDEROOT", "false"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);

    let output = fixture
        .run_arx(&[
            ("COMMAND", "decompress"),
            ("SOURCE", "project/project.tar"),
            ("FORMAT", "tar"),
            ("DEST", "out"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("Decompressed contents"));
    assert!(output.stdout.contains("a.txt"));
    assert!(output.stdout.contains("sub/ (directory)"));
});

add_test!(missing_archive_fails_fast, async {
    let fixture = Fixture::empty();

    let output = fixture
        .run_arx(&[
            ("COMMAND", "decompress"),
            ("SOURCE", "gone.tar"),
            ("FORMAT", "tar"),
            ("FAIL_ON_ERROR", "true"),
        ])
        .await;
    assert_eq!(output.status.code(), Some(1));
    assert!(
        output.stderr.contains("gone.tar"),
        "stderr: {}",
        output.stderr
    );
});

add_test!(unsupported_format_is_rejected, async {
    let fixture = Fixture::empty();
    fixture.write("bundle.rar", b"not really an archive");

    let output = fixture
        .run_arx(&[
            ("COMMAND", "decompress"),
            ("SOURCE", "bundle.rar"),
            ("FORMAT", "rar"),
        ])
        .await;
    assert_eq!(output.status.code(), Some(1));
    assert!(
        output.stderr.contains("unsupported format"),
        "stderr: {}",
        output.stderr
    );
    assert!(!output.stdout.contains("executing:"));
});

// Decompression publishes the destination directory as its result path.
add_test!(file_path_points_at_destination, async {
    let fixture = Fixture::with_project_tree();
    let output = fixture
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "project"),
            ("FORMAT", "tar"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);

    fixture.write("outputs.txt", b"");
    let output_file = fixture.path("outputs.txt");

    let output = fixture
        .run_arx(&[
            ("COMMAND", "decompress"),
            ("SOURCE", "project.tar"),
            ("FORMAT", "tar"),
            ("DEST", "out"),
            ("GITHUB_OUTPUT", output_file.to_str().unwrap()),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);

    let contents = fs::read_to_string(&output_file).unwrap();
    assert!(contents.contains("file_path="));
    assert!(contents.contains("out"));
});
