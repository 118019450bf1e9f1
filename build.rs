//! Build script for pkgprobe.
//!
//! When the `embedded-worker` feature is enabled, copies a pre-built
//! `pkgprobe-worker` binary into OUT_DIR for embedding.

fn main() {
    #[cfg(feature = "embedded-worker")]
    embed_worker();

    println!("cargo:rerun-if-changed=build.rs");
}

#[cfg(feature = "embedded-worker")]
fn embed_worker() {
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
    let target = out_dir.join("pkgprobe-worker");

    // The worker is an opaque pre-built artifact; there is nothing to compile.
    let prebuilt_paths = [
        manifest_dir.join("worker").join("bin").join("pkgprobe-worker"),
        manifest_dir.join("pkgprobe-worker"),
    ];

    for path in &prebuilt_paths {
        if path.exists() {
            fs::copy(path, &target).expect("Failed to copy pre-built worker binary");
            println!("cargo:rerun-if-changed={}", path.display());
            return;
        }
    }

    panic!(
        "Cannot embed worker: no pre-built pkgprobe-worker binary found.\n\
         Place one at worker/bin/pkgprobe-worker or build without the embedded-worker feature."
    );
}
