use std::fs;

use crate::add_test;
use crate::common::{have_tool, Fixture};

// Round trip with the root entry included: the extracted tree carries the
// source directory name.
add_test!(tar_round_trip_with_root, async {
    let fixture = Fixture::with_project_tree();

    let output = fixture
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "project"),
            ("FORMAT", "tar"),
            ("INCLUDEROOT", "true"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert!(fixture.exists("project.tar"));
    assert!(output.stdout.contains("file_path="));

    let output = fixture
        .run_arx(&[
            ("COMMAND", "decompress"),
            ("SOURCE", "project.tar"),
            ("FORMAT", "tar"),
            ("DEST", "out"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert_eq!(fixture.read("out/project/a.txt"), b"alpha");
    assert_eq!(fixture.read("out/project/sub/b.txt"), b"beta");
});

// Without the root, the archive holds the contents directly and defaults to
// being written inside the source.
add_test!(tar_round_trip_without_root, async {
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
    assert!(fixture.exists("project/project.tar"));
    // The scratch file was renamed away.
    assert!(!fixture.exists("project/.project.tar.partial"));

    let output = fixture
        .run_arx(&[
            ("COMMAND", "decompress"),
            ("SOURCE", "project/project.tar"),
            ("FORMAT", "tar"),
            ("DEST", "out"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert_eq!(fixture.read("out/a.txt"), b"alpha");
    assert_eq!(fixture.read("out/sub/b.txt"), b"beta");
    assert!(!fixture.exists("out/project"));
});

add_test!(tgz_round_trip_with_root, async {
    if !have_tool("gzip") {
        return;
    }
    let fixture = Fixture::with_project_tree();

    let output = fixture
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "project"),
            ("FORMAT", "tgz"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert!(fixture.exists("project.tgz"));

    let output = fixture
        .run_arx(&[
            ("COMMAND", "decompress"),
            ("SOURCE", "project.tgz"),
            ("FORMAT", "tgz"),
            ("DEST", "out"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert_eq!(fixture.read("out/project/a.txt"), b"alpha");
});

// Rootless tgz goes through the staging strategy; the staging directory
// must be gone afterwards and the archive must not contain itself.
add_test!(tgz_without_root_stages_and_cleans_up, async {
    if !have_tool("gzip") {
        return;
    }
    let fixture = Fixture::with_project_tree();

    let output = fixture
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "project"),
            ("FORMAT", "tgz"),
            ("INCLUDEROOT", "false"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert!(fixture.exists("project/project.tgz"));
    assert!(fixture.entries_with_prefix(".project-").is_empty());

    let output = fixture
        .run_arx(&[
            ("COMMAND", "decompress"),
            ("SOURCE", "project/project.tgz"),
            ("FORMAT", "tgz"),
            ("DEST", "out"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert_eq!(fixture.read("out/a.txt"), b"alpha");
    assert!(!fixture.exists("out/project.tgz"));
    assert!(!fixture.exists("out/.project.tgz.partial"));
});

add_test!(tbz2_round_trip, async {
    if !have_tool("bzip2") {
        return;
    }
    let fixture = Fixture::with_project_tree();

    let output = fixture
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "project"),
            ("FORMAT", "tbz2"),
            ("INCLUDEROOT", "false"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert!(fixture.exists("project/project.tbz2"));

    let output = fixture
        .run_arx(&[
            ("COMMAND", "decompress"),
            ("SOURCE", "project/project.tbz2"),
            ("FORMAT", "tbz2"),
            ("DEST", "out"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert_eq!(fixture.read("out/sub/b.txt"), b"beta");
});

add_test!(zip_round_trip_with_root, async {
    if !have_tool("zip") || !have_tool("unzip") {
        return;
    }
    let fixture = Fixture::with_project_tree();

    let output = fixture
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "project"),
            ("FORMAT", "zip"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert!(fixture.exists("project.zip"));

    let output = fixture
        .run_arx(&[
            ("COMMAND", "decompress"),
            ("SOURCE", "project.zip"),
            ("FORMAT", "zip"),
            ("DEST", "out"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert_eq!(fixture.read("out/project/a.txt"), b"alpha");
    assert_eq!(fixture.read("out/project/sub/b.txt"), b"beta");
});

add_test!(zip_round_trip_without_root, async {
    if !have_tool("zip") || !have_tool("unzip") {
        return;
    }
    let fixture = Fixture::with_project_tree();

    let output = fixture
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "project"),
            ("FORMAT", "zip"),
            ("INCLUDEROOT", "false"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert!(fixture.exists("project/project.zip"));

    let output = fixture
        .run_arx(&[
            ("COMMAND", "decompress"),
            ("SOURCE", "project/project.zip"),
            ("FORMAT", "zip"),
            ("DEST", "out"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert_eq!(fixture.read("out/a.txt"), b"alpha");
});

// A glob source archives the matched files with their relative paths.
add_test!(glob_source_archives_matched_files, async {
    let fixture = Fixture::empty();
    fixture.write("a.doc", b"one");
    fixture.write("sub/b.doc", b"two");
    fixture.write("sub/c.txt", b"three");

    let output = fixture
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "**/*.doc"),
            ("FORMAT", "tar"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert!(fixture.exists("archive.tar"));

    let output = fixture
        .run_arx(&[
            ("COMMAND", "decompress"),
            ("SOURCE", "archive.tar"),
            ("FORMAT", "tar"),
            ("DEST", "out"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert_eq!(fixture.read("out/a.doc"), b"one");
    assert_eq!(fixture.read("out/sub/b.doc"), b"two");
    assert!(!fixture.exists("out/sub/c.txt"));
});

add_test!(dest_and_filename_override_placement, async {
    let fixture = Fixture::with_project_tree();

    let output = fixture
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "project"),
            ("FORMAT", "tar"),
            ("DEST", "dist"),
            ("DESTFILENAME", "bundle"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert!(fixture.exists("dist/bundle.tar"));
    assert!(!fixture.exists("project.tar"));
});

// The result path lands in the CI output file when one is configured.
add_test!(file_path_appended_to_github_output, async {
    let fixture = Fixture::with_project_tree();
    fixture.write("outputs.txt", b"");
    let output_file = fixture.path("outputs.txt");

    let output = fixture
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "project"),
            ("FORMAT", "tar"),
            ("GITHUB_OUTPUT", output_file.to_str().unwrap()),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);

    let contents = fs::read_to_string(&output_file).unwrap();
    assert!(contents.contains("file_path="));
    assert!(contents.contains("project.tar"));
    // Written to the file, not the console.
    assert!(!output.stdout.contains("file_path="));
});
