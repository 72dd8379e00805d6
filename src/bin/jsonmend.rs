fn main() {
    if let Err(e) = jsonmend::cli::run() {
        eprintln!("jsonmend: {e}");
        std::process::exit(1);
    }
}
