use tokio::process::Command;

use super::{RenderLayout, Renderer, write_matrix_csv};
use crate::{config, errors::TimelapseError, timeline::DailyCountMatrix};

/// Renders by running an external program.
///
/// The program is called as `<command> <matrix.csv> <layout.json> <output.mp4>`
/// inside a temporary directory and must write the video to the last path.
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    /// `command` may carry leading arguments, e.g. `python3 render.py`.
    pub fn new(command: &str) -> Result<Self, TimelapseError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| TimelapseError::MissingConfig("TIMELAPSE_RENDER_COMMAND".to_string()))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Uses the command configured in `TIMELAPSE_RENDER_COMMAND`.
    ///
    /// # Errors
    ///
    /// [`TimelapseError::MissingConfig`] when the variable is set but blank.
    pub fn from_env() -> Result<Self, TimelapseError> {
        Self::new(&config::render_command())
    }
}

impl Renderer for CommandRenderer {
    async fn render(
        &self,
        matrix: &DailyCountMatrix,
        layout: &RenderLayout,
    ) -> Result<Vec<u8>, TimelapseError> {
        if matrix.is_empty() {
            return Err(TimelapseError::NoDataInRange);
        }

        let workdir = tempfile::tempdir()?;
        let matrix_path = workdir.path().join("matrix.csv");
        let layout_path = workdir.path().join("layout.json");
        let output_path = workdir.path().join("timelapse.mp4");

        let mut csv = Vec::new();
        write_matrix_csv(&mut csv, matrix)?;
        async_fs::write(&matrix_path, csv).await?;
        async_fs::write(&layout_path, serde_json::to_vec_pretty(layout)?).await?;

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&matrix_path)
            .arg(&layout_path)
            .arg(&output_path)
            .output()
            .await
            .map_err(|e| TimelapseError::Render(format!("cannot run {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(TimelapseError::Render(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        async_fs::read(&output_path).await.map_err(|e| {
            TimelapseError::Render(format!("{} produced no video: {}", self.program, e))
        })
    }
}
