fn main() {
    if let Err(err) = heatmap_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
