//! Export job files.
//!
//! Jobs are TOML files naming the survey, the responses payload, the rubric
//! documents the survey draws from, and the output directory. Paths are
//! resolved relative to the job file's directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// A parsed export job.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExportJob {
    /// Survey JSON file.
    pub survey: PathBuf,
    /// Results payload JSON file.
    pub responses: PathBuf,
    /// Directory the CSV and its metadata are written into.
    pub output_dir: PathBuf,
    #[serde(default)]
    pub rubrics: Vec<RubricRef>,
}

/// One rubric document the survey's items point into.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RubricRef {
    /// Learning-outcome id the survey items carry.
    pub id: i64,
    pub path: PathBuf,
}

impl ExportJob {
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let mut job: ExportJob =
            toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
        job.validate()?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        job.anchor(base);
        Ok(job)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::BTreeSet::new();
        for rubric in &self.rubrics {
            if !seen.insert(rubric.id) {
                bail!("duplicate rubric id {} in job", rubric.id);
            }
        }
        Ok(())
    }

    /// Re-anchor relative paths on the job file's directory.
    fn anchor(&mut self, base: &Path) {
        self.survey = anchor_path(base, &self.survey);
        self.responses = anchor_path(base, &self.responses);
        self.output_dir = anchor_path(base, &self.output_dir);
        for rubric in &mut self.rubrics {
            rubric.path = anchor_path(base, &rubric.path);
        }
    }
}

fn anchor_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB: &str = r#"
survey = "encuesta.json"
responses = "resultados.json"
output_dir = "exports"

[[rubrics]]
id = 42
path = "ra42.json"
"#;

    #[test]
    fn loads_and_anchors_relative_paths() {
        let temp = tempfile::tempdir().expect("tempdir");
        let job_path = temp.path().join("job.toml");
        fs::write(&job_path, JOB).expect("write job");

        let job = ExportJob::load(&job_path).expect("load");
        assert_eq!(job.survey, temp.path().join("encuesta.json"));
        assert_eq!(job.output_dir, temp.path().join("exports"));
        assert_eq!(job.rubrics.len(), 1);
        assert_eq!(job.rubrics[0].id, 42);
        assert_eq!(job.rubrics[0].path, temp.path().join("ra42.json"));
    }

    #[test]
    fn rejects_duplicate_rubric_ids() {
        let temp = tempfile::tempdir().expect("tempdir");
        let job_path = temp.path().join("job.toml");
        let doubled = format!("{JOB}\n[[rubrics]]\nid = 42\npath = \"other.json\"\n");
        fs::write(&job_path, doubled).expect("write job");
        assert!(ExportJob::load(&job_path).is_err());
    }
}
