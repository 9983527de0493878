//! Compress/decompress action entrypoint.
//!
//! Reads the action inputs from flags or their environment variables,
//! prints the configuration, runs the requested operation, and maps the
//! outcome to an exit code under the fail-fast policy.

use std::process;

mod opts;

use opts::ArxOpts;

use arx_cli::{report, run};

fn main() {
    let opts = ArxOpts::parse();

    // Input validation failures are always fatal; the fail-fast flag only
    // softens runtime errors.
    let config = match opts.config() {
        Ok(config) => config,
        Err(err) => {
            report::error(&err.to_string());
            process::exit(1);
        }
    };

    report::header("Compress/Decompress Action");
    report::section("Environment configuration");
    report::item("Command", config.command.name());
    report::item("Source", &config.source);
    report::item("Format", config.format);
    report::item("Include root", config.include_root);
    report::item("Verbose", config.verbose);
    report::item("Fail on error", config.fail_on_error);
    if let Some(dest) = &config.dest {
        report::item("Destination", dest.display());
    }
    if let Some(name) = &config.dest_file_name {
        report::item("Destination filename", name);
    }

    if let Err(err) = run(&config) {
        if config.fail_on_error {
            report::error(&err.to_string());
            process::exit(1);
        }
        report::warning(&err.to_string());
    }
}
