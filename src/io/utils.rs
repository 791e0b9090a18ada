//! Utilities for input/output.

use super::OverwriteMode;
use ndarray::Array2;
use std::{
    fmt::Display,
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// An output path that is written through a temporary file in the same
/// directory, which replaces the target only once writing has completed.
#[derive(Debug)]
pub struct AtomicOutputPath {
    target_path: PathBuf,
    temporary_file: NamedTempFile,
}

impl AtomicOutputPath {
    /// Creates a temporary file next to the given target path.
    pub fn new<P: AsRef<Path>>(target_path: P) -> io::Result<Self> {
        let target_path = target_path.as_ref().to_path_buf();
        let directory = match target_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let temporary_file = NamedTempFile::new_in(directory)?;
        Ok(Self {
            target_path,
            temporary_file,
        })
    }

    /// Returns the path where the output will finally be placed.
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Returns the path of the temporary file that should be written to.
    pub fn temporary_path(&self) -> &Path {
        self.temporary_file.path()
    }

    /// Checks whether the target may be written with the given overwrite mode.
    pub fn write_allowed(&self, overwrite_mode: OverwriteMode) -> bool {
        overwrite_mode == OverwriteMode::Always || !self.target_path.exists()
    }

    /// Moves the temporary file to the target path.
    pub fn perform_replace(self) -> io::Result<()> {
        self.temporary_file
            .persist(&self.target_path)
            .map(|_| ())
            .map_err(|err| err.error)
    }
}

/// Writes the given matrix as plain text, with the elements of each row
/// separated by whitespace and one row per line.
pub fn write_text_matrix<W, T>(writer: W, matrix: &Array2<T>) -> io::Result<()>
where
    W: Write,
    T: Display,
{
    let mut writer = BufWriter::new(writer);
    for row in matrix.rows() {
        let mut first = true;
        for value in row {
            if !first {
                write!(writer, " \t")?;
            }
            write!(writer, "{}", value)?;
            first = false;
        }
        writeln!(writer)?;
    }
    writer.flush()
}

/// Writes the given matrix as a plain text file at the given path.
pub fn save_text_matrix<P, T>(file_path: P, matrix: &Array2<T>) -> io::Result<()>
where
    P: AsRef<Path>,
    T: Display,
{
    let file = fs::File::create(file_path)?;
    write_text_matrix(file, matrix)
}

/// Serializes the given data into JSON format and saves it at the given path.
#[cfg(feature = "json")]
pub fn save_data_as_json<P, T>(file_path: P, data: &T) -> io::Result<()>
where
    P: AsRef<Path>,
    T: serde::Serialize,
{
    let file = fs::File::create(file_path)?;
    serde_json::to_writer(BufWriter::new(file), data)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn text_matrix_has_one_line_per_row() {
        let matrix = array![[1.0, 2.5, -3.0], [0.0, 4.0, 5.0]];
        let mut buffer = Vec::new();
        write_text_matrix(&mut buffer, &matrix).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let values: Vec<f64> = lines[0]
            .split_whitespace()
            .map(|value| value.parse().unwrap())
            .collect();
        assert_eq!(values, vec![1.0, 2.5, -3.0]);
    }

    #[test]
    fn atomic_output_replaces_target_only_when_asked() {
        let directory = tempfile::tempdir().unwrap();
        let target = directory.path().join("field.txt");
        let output = AtomicOutputPath::new(&target).unwrap();
        assert!(output.write_allowed(OverwriteMode::Never));
        save_text_matrix(output.temporary_path(), &ndarray::Array2::<f64>::zeros((2, 2)))
            .unwrap();
        assert!(!target.exists());
        output.perform_replace().unwrap();
        assert!(target.exists());

        let output = AtomicOutputPath::new(&target).unwrap();
        assert!(!output.write_allowed(OverwriteMode::Never));
        assert!(output.write_allowed(OverwriteMode::Always));
    }
}
