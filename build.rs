//! Makes sure the embedded sidebar bundle exists before `rust-embed` runs.

use std::path::Path;

const DIST: &str = "crates/pdbview-ui/dist";

const PLACEHOLDER: &str = "<!DOCTYPE html><html><body>\
<p>pdbview-ui not built. Run <code>cargo xtask build-ui</code>.</p>\
</body></html>";

fn main() -> std::io::Result<()> {
    // Only needed when the gui feature is enabled.
    if std::env::var("CARGO_FEATURE_GUI").is_err() {
        return Ok(());
    }

    // rust-embed needs the folder to exist even before `trunk build`.
    let dist = Path::new(DIST);
    std::fs::create_dir_all(dist)?;
    let index = dist.join("index.html");
    if !index.exists() {
        std::fs::write(&index, PLACEHOLDER)?;
    }

    #[allow(clippy::print_stdout)]
    {
        println!("cargo:rerun-if-changed={DIST}");
    }
    Ok(())
}
