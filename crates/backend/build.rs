use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// target/<profile>, found by walking up from OUT_DIR
fn profile_dir() -> Option<PathBuf> {
    let out_dir = env::var("OUT_DIR").ok()?;
    let profile = env::var("PROFILE").ok()?;
    Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let Some(workspace_root) = manifest_dir.parent().and_then(Path::parent) else {
        println!("cargo:warning=workspace root not found, config.toml not copied");
        return;
    };
    let source = workspace_root.join("config.toml");

    let Some(target_dir) = profile_dir() else {
        println!("cargo:warning=target profile directory not found, config.toml not copied");
        return;
    };

    if !source.exists() {
        println!(
            "cargo:warning=config.toml not found at {:?}, the server will use built-in defaults",
            source
        );
        return;
    }

    let dest = target_dir.join("config.toml");
    if let Err(e) = fs::copy(&source, &dest) {
        panic!("Failed to copy config.toml to {:?}: {}", dest, e);
    }
}
