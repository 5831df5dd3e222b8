use std::fs;
use std::path::{Path, PathBuf};

use clap::CommandFactory;

// The command tree is shared with the binary; it needs nothing beyond
// the clap crates listed under [build-dependencies].
#[allow(dead_code)]
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir: PathBuf = std::env::var_os("OUT_DIR")
        .expect("cargo sets OUT_DIR for build scripts")
        .into();
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("man directory under OUT_DIR");

    write_pages(&cli::Cli::command(), &man_dir);
}

/// One page per visible command: `syncly.1`, `syncly-folders.1`,
/// `syncly-folders-scan.1`, ...
fn write_pages(cmd: &clap::Command, dir: &Path) {
    let page_name = cmd.get_name().to_owned();

    let mut page = Vec::new();
    if let Err(e) = clap_mangen::Man::new(cmd.clone()).render(&mut page) {
        panic!("rendering {page_name}.1: {e}");
    }
    let target = dir.join(format!("{page_name}.1"));
    if let Err(e) = fs::write(&target, page) {
        panic!("writing {}: {e}", target.display());
    }

    cmd.get_subcommands()
        .filter(|sub| !sub.is_hide_set())
        .for_each(|sub| {
            let nested = sub.clone().name(format!("{page_name}-{}", sub.get_name()));
            write_pages(&nested, dir);
        });
}
