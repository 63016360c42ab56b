fn main() {
    // Bindings come from proc-macros in uniffi_bindings.rs; the prompt is
    // pulled in with include_str!, so both must trigger a rebuild.
    for path in [
        "src/uniffi_bindings.rs",
        "src/providers/prompt.txt",
        "build.rs",
    ] {
        println!("cargo:rerun-if-changed={}", path);
    }
}
