/// Command-line entry point for native builds
#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;
    use photocheck::native::{run, Cli};

    run(Cli::parse())
}

/// Browser entry point; mounts the app on the page
#[cfg(target_arch = "wasm32")]
fn main() {
    photocheck::start();
}
