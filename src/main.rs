fn main() {
    if let Err(err) = drift_monitor::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
