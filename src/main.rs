/// Binary entrypoint for the `galpick` executable.
///
/// Keeps the binary thin: all business logic lives in the `galpick_lib` crate
/// so unit tests can import library functions directly.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = galpick_lib::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
