use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;
use tokio::process::Command;
use tracing::info;

#[derive(Error, Debug)]
pub enum DownstreamError {
    #[error("Failed to start generator {}: {}", .0.display(), .1)]
    SpawnFailed(PathBuf, #[source] std::io::Error),

    #[error("Generator {} failed with {}", .0.display(), .1)]
    Failed(PathBuf, std::process::ExitStatus),
}

/// Regenerates the actions after the variant store has been rewritten
#[async_trait]
pub trait DownstreamGenerator: Send + Sync {
    async fn regenerate(&self) -> Result<(), DownstreamError>;
}

/// Runs the generator binary as a blocking child process
#[derive(Debug, Clone)]
pub struct ProcessGenerator {
    program: PathBuf,
    tag: Option<String>,
    variants: Option<PathBuf>,
}

impl ProcessGenerator {
    pub fn new(program: impl Into<PathBuf>, tag: Option<String>) -> Self {
        Self {
            program: program.into(),
            tag,
            variants: None,
        }
    }

    /// The `generate` binary installed next to the running executable
    pub fn sibling(tag: Option<String>) -> Self {
        let program = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(Self::binary_name())))
            .unwrap_or_else(|| PathBuf::from(Self::binary_name()));
        Self::new(program, tag)
    }

    /// Point the generator at the store that was just rewritten
    pub fn with_variants(mut self, variants: impl Into<PathBuf>) -> Self {
        self.variants = Some(variants.into());
        self
    }

    fn binary_name() -> String {
        format!("generate{}", std::env::consts::EXE_SUFFIX)
    }

    fn args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        if let Some(variants) = &self.variants {
            args.push(OsString::from("--variants"));
            args.push(variants.as_os_str().to_owned());
        }
        if let Some(tag) = &self.tag {
            args.push(OsString::from(tag));
        }
        args
    }
}

#[async_trait]
impl DownstreamGenerator for ProcessGenerator {
    async fn regenerate(&self) -> Result<(), DownstreamError> {
        let args = self.args();
        info!(program = %self.program.display(), ?args, "Running generator");

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .await
            .map_err(|e| DownstreamError::SpawnFailed(self.program.clone(), e))?;

        if !status.success() {
            return Err(DownstreamError::Failed(self.program.clone(), status));
        }

        info!("Generator finished successfully");
        Ok(())
    }
}
