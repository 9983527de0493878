use crate::add_test;
use crate::common::{have_tool, Fixture};

// Excluding a directory must remove the directory entry and everything
// under it, with the root included.
add_test!(exclude_directory_with_root, async {
    let fixture = Fixture::with_project_tree();

    let output = fixture
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "project"),
            ("FORMAT", "tar"),
            ("INCLUDEROOT", "true"),
            ("EXCLUDE", "build"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);

    let output = fixture
        .run_arx(&[
            ("COMMAND", "decompress"),
            ("SOURCE", "project.tar"),
            ("FORMAT", "tar"),
            ("DEST", "out"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert!(fixture.exists("out/project/a.txt"));
    assert!(fixture.exists("out/project/sub/b.txt"));
    assert!(!fixture.exists("out/project/build"));
});

// Same pruning without the root entry.
add_test!(exclude_directory_without_root, async {
    let fixture = Fixture::with_project_tree();

    let output = fixture
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "project"),
            ("FORMAT", "tar"),
            ("INCLUDEROOT", "false"),
            ("EXCLUDE", "build"),
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
    assert!(fixture.exists("out/a.txt"));
    assert!(!fixture.exists("out/build"));
});

add_test!(exclude_directory_zip, async {
    if !have_tool("zip") || !have_tool("unzip") {
        return;
    }
    let fixture = Fixture::with_project_tree();

    let output = fixture
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "project"),
            ("FORMAT", "zip"),
            ("INCLUDEROOT", "true"),
            ("EXCLUDE", "build"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);

    let output = fixture
        .run_arx(&[
            ("COMMAND", "decompress"),
            ("SOURCE", "project.zip"),
            ("FORMAT", "zip"),
            ("DEST", "out"),
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", output.stderr);
    assert!(fixture.exists("out/project/a.txt"));
    assert!(!fixture.exists("out/project/build"));
});

// Multiple space-separated patterns all apply.
add_test!(exclude_multiple_patterns, async {
    let fixture = Fixture::with_project_tree();

    let output = fixture
        .run_arx(&[
            ("COMMAND", "compress"),
            ("SOURCE", "project"),
            ("FORMAT", "tar"),
            ("INCLUDEROOT", "false"),
            ("EXCLUDE", "build sub"),
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
    assert!(fixture.exists("out/a.txt"));
    assert!(!fixture.exists("out/build"));
    assert!(!fixture.exists("out/sub"));
});
