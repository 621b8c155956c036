//! Procedural terrain generation

pub mod noise;
pub use self::noise::FractalNoise;

pub mod config;
pub use config::GenerationConfig;

pub mod biome;
pub use biome::{select_biome, Biome, BiomeMap};

pub mod generator;
pub use generator::TerrainGenerator;
