//! Comma-separated text encoding of distance matrices.
//!
//! One line per row, one field per column. An empty field means there is no
//! edge between the two nodes. By default the first line of an input is a
//! header and is discarded whatever it contains.

use std::{
    fmt::Write as _,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use tracing::debug;

use crate::{distance::Distance, distance_matrix::DistanceMatrix, error::MatrixError};

pub const FIELD_SEPARATOR: char = ',';
pub const DEFAULT_PRECISION: usize = 2;

#[derive(Debug, Clone)]
pub struct MatrixReader {
    skip_header: bool,
}

impl Default for MatrixReader {
    fn default() -> Self {
        Self { skip_header: true }
    }
}

impl MatrixReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_header(mut self, skip_header: bool) -> Self {
        self.skip_header = skip_header;
        self
    }

    pub fn parse(&self, text: &str) -> Result<DistanceMatrix, MatrixError> {
        let lines = text
            .lines()
            .skip(if self.skip_header { 1 } else { 0 })
            .collect::<Vec<_>>();
        let num_nodes = lines.len();

        let mut rows = Vec::with_capacity(num_nodes);
        for (row, line) in lines.into_iter().enumerate() {
            let fields = line
                .split(FIELD_SEPARATOR)
                .enumerate()
                .map(|(column, field)| parse_field(row, column, field))
                .collect::<Result<Vec<_>, _>>()?;

            if fields.len() != num_nodes {
                return Err(MatrixError::NotSquare {
                    row,
                    expected: num_nodes,
                    found: fields.len(),
                });
            }

            rows.push(fields);
        }

        DistanceMatrix::from_rows(rows)
    }

    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<DistanceMatrix, MatrixError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| MatrixError::io(path, err))?;
        let matrix = self.parse(&text)?;

        debug!(
            "Read {}x{} matrix from {:?}",
            matrix.num_nodes(),
            matrix.num_nodes(),
            path
        );

        Ok(matrix)
    }
}

fn parse_field(row: usize, column: usize, field: &str) -> Result<Distance, MatrixError> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(Distance::NoEdge);
    }

    let value: f64 = field.parse().map_err(|source| MatrixError::Parse {
        row,
        column,
        field: field.to_string(),
        source,
    })?;

    if !value.is_finite() {
        return Err(MatrixError::NonFinite { row, column });
    }

    Ok(Distance::Finite(value))
}

#[derive(Debug, Clone)]
pub struct MatrixWriter {
    precision: usize,
    write_header: bool,
}

impl Default for MatrixWriter {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            write_header: false,
        }
    }
}

impl MatrixWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn write_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }

    pub fn format(&self, matrix: &DistanceMatrix) -> String {
        let precision = self.precision;

        let mut lines = Vec::with_capacity(matrix.num_nodes() + 1);
        if self.write_header {
            lines.push(matrix.num_nodes().to_string());
        }

        for row in matrix.rows() {
            let mut line = String::with_capacity(row.len() * (precision + 4));
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    line.push(FIELD_SEPARATOR);
                }
                let _ = write!(line, "{cell:.precision$}");
            }
            lines.push(line);
        }

        lines.join("\n")
    }

    /// The whole matrix is formatted before the file is created.
    pub fn write_file<P: AsRef<Path>>(
        &self,
        path: P,
        matrix: &DistanceMatrix,
    ) -> Result<(), MatrixError> {
        let path = path.as_ref();
        let text = self.format(matrix);

        let file = File::create(path).map_err(|err| MatrixError::io(path, err))?;
        let mut writer = BufWriter::with_capacity(64 * 1024, file);
        writer
            .write_all(text.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|err| MatrixError::io(path, err))?;

        debug!("Wrote {} rows to {:?}", matrix.num_nodes(), path);

        Ok(())
    }
}

pub fn read_matrix_file<P: AsRef<Path>>(path: P) -> Result<DistanceMatrix, MatrixError> {
    MatrixReader::default().read_file(path)
}

pub fn write_matrix_file<P: AsRef<Path>>(
    path: P,
    matrix: &DistanceMatrix,
) -> Result<(), MatrixError> {
    MatrixWriter::default().write_file(path, matrix)
}

pub fn read_matrix_json<P: AsRef<Path>>(path: P) -> Result<DistanceMatrix, MatrixError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| MatrixError::io(path, err))?;
    let matrix = serde_json::from_reader(BufReader::new(file))?;
    Ok(matrix)
}

pub fn write_matrix_json<P: AsRef<Path>>(
    path: P,
    matrix: &DistanceMatrix,
) -> Result<(), MatrixError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|err| MatrixError::io(path, err))?;
    let mut writer = BufWriter::with_capacity(64 * 1024, file);
    serde_json::to_writer(&mut writer, matrix)?;
    writer.flush().map_err(|err| MatrixError::io(path, err))?;
    Ok(())
}
