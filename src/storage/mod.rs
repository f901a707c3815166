pub mod write_ppm;

pub use write_ppm::write_ppm;
