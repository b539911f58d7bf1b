use sqview::cli::{exit_code, format_error, run};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Colors are always on, so make sure the Windows console understands them
    if let Err(code) = enable_ansi_support::enable_ansi_support() {
        log::warn!("Could not enable ANSI support (error {})", code);
    }

    if let Err(e) = run() {
        eprintln!("{}", format_error(&e));
        std::process::exit(exit_code(&e));
    }
}
