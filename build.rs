fn main() {
    // Build metadata (git commit, rustc version) consumed via `built_info`.
    if let Err(err) = built::write_built_file() {
        println!("cargo:warning=failed to acquire build-time information: {err}");
    }
}
