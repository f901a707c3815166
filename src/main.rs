fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    fractal_dive::snapshot_to_ppm("output/mandelbrot.ppm")?;

    Ok(())
}
