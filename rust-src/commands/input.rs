//! Schedule loading shared by all commands.

use std::path::Path;

use anyhow::{Context, Result};

use crate::aggregation::{organize, WeeklySchedule};
use crate::data::load_subjects;


/// Load and organize the schedule file at `data_path`.
pub fn load_schedule(data_path: &Path) -> Result<WeeklySchedule> {
    if !data_path.exists() {
        anyhow::bail!("No se encontró el archivo {}", data_path.display());
    }

    let subjects = load_subjects(data_path).context("Error en formato de datos")?;
    Ok(organize(&subjects))
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file() {
        let err = load_schedule(Path::new("data/non_existent_file.json")).unwrap_err();
        assert!(err.to_string().contains("No se encontró el archivo"));
    }

    #[test]
    fn test_bad_format() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"nombre": "Test subject"}}"#).unwrap();

        let err = load_schedule(file.path()).unwrap_err();
        assert_eq!(err.to_string(), "Error en formato de datos");
        assert!(format!("{err:#}").contains("data should be a list of subjects"));
    }
}
