//! Scenario configuration for the interactive demo, read from YAML.
//!
//! Every field has a default, so a file only lists what it changes:
//!
//! ```yaml
//! model: pm            # "pp" or "pm"
//! window: [800, 600]   # pixels, also the simulation domain
//! capacity: 100
//! grid_spacing: 7.0    # pm only, pixels between field samples
//! singularity: skip    # or "propagate"
//! seed: 42             # pp randomize seed, thread rng when absent
//! constants:
//!   coulomb: 8.9875e9
//!   mass: 1.0e-3
//!   charge: 1.0e-5
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, ensure};
use serde::Deserialize;

use crate::params::{Constants, Singularity};
use crate::pm::ParticleMesh;
use crate::pp::ParticleParticle;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Model {
    #[serde(rename = "pp")]
    #[value(name = "pp")]
    #[default]
    ParticleParticle,
    #[serde(rename = "pm")]
    #[value(name = "pm")]
    ParticleMesh,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub model: Model,
    pub window: [u32; 2],
    pub capacity: Option<usize>, // per-model default when absent
    pub grid_spacing: f32,
    pub singularity: Singularity,
    pub seed: Option<u64>,
    pub constants: Constants,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            model: Model::default(),
            window: [800, 600],
            capacity: None,
            grid_spacing: 7.0,
            singularity: Singularity::default(),
            seed: None,
            constants: Constants::default(),
        }
    }
}

impl SimConfig {
    pub fn from_yaml_str(text: &str) -> anyhow::Result<SimConfig> {
        let config: SimConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> anyhow::Result<SimConfig> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let config: SimConfig = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.window[0] > 0 && self.window[1] > 0, "window must not be empty");
        ensure!(self.constants.mass > 0.0, "mass must be positive");
        Ok(())
    }

    /// 1000 bodies for pp, 100 charges for pm unless overridden.
    pub fn capacity(&self) -> usize {
        self.capacity.unwrap_or(match self.model {
            Model::ParticleParticle => 1000,
            Model::ParticleMesh => 100,
        })
    }

    pub fn domain(&self) -> [f32; 2] {
        [self.window[0] as f32, self.window[1] as f32]
    }

    /// Mesh covering the window, one sample every `grid_spacing` pixels.
    pub fn field_size(&self) -> (usize, usize) {
        let spacing = self.grid_spacing;
        (
            (self.window[0] as f32 / spacing) as usize,
            (self.window[1] as f32 / spacing) as usize,
        )
    }

    pub fn build_pp(&self) -> anyhow::Result<ParticleParticle> {
        Ok(ParticleParticle::new(self.capacity())?
            .with_constants(self.constants)
            .with_singularity(self.singularity))
    }

    pub fn build_pm(&self) -> anyhow::Result<ParticleMesh> {
        let (width, height) = self.field_size();
        Ok(ParticleMesh::new(width, height, self.grid_spacing, self.capacity())?
            .with_constants(self.constants)
            .with_singularity(self.singularity))
    }
}
