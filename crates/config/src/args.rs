use crate::ConfigError;
use clap::Parser;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to .env file (e.g., .env.mainnet)
    #[arg(short, long, default_value = ".env")]
    pub env_file: String,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Load the env file into the process environment when it exists.
    ///
    /// Returns whether a file was loaded. Variables already present in the
    /// environment are not overwritten.
    pub fn load_env_file(&self) -> Result<bool, ConfigError> {
        if !Path::new(&self.env_file).exists() {
            return Ok(false);
        }

        dotenv::from_filename(&self.env_file).map_err(|source| ConfigError::EnvFileError {
            path: self.env_file.clone(),
            source,
        })?;
        Ok(true)
    }
}
