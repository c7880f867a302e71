//! Mesh I/O helpers.
//!
//! Trait-based readers and writers for loading the meshes handed to the
//! comparison engine and saving the difference mesh it returns.

pub mod vtk;

use crate::mesh_error::MeshCompareError;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Trait for mesh readers.
pub trait MeshReader {
    /// Mesh type produced by the reader.
    type Mesh;

    /// Parse a mesh from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<Self::Mesh, MeshCompareError>;

    /// Parse a mesh from the file at `path`.
    fn read_path(&self, path: impl AsRef<Path>) -> Result<Self::Mesh, MeshCompareError> {
        let file = File::open(path)?;
        self.read(BufReader::new(file))
    }
}

/// Trait for mesh writers.
pub trait MeshWriter {
    /// Mesh type accepted by the writer.
    type Mesh;

    /// Serialize `mesh` to a writer.
    fn write<W: Write>(&self, writer: W, mesh: &Self::Mesh) -> Result<(), MeshCompareError>;

    /// Serialize `mesh` to the file at `path`, replacing it.
    fn write_path(&self, path: impl AsRef<Path>, mesh: &Self::Mesh) -> Result<(), MeshCompareError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer, mesh)?;
        writer.flush()?;
        Ok(())
    }
}
