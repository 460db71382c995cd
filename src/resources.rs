use std::{
    fs,
    io::{Read, Seek},
    path::Path,
};
use zip::read::ZipArchive;

use crate::{definitions::cpu, LoadError, ResourceError};

/// Represents an archive of roms, every file inside of the zip archive is a single program.
pub struct RomArchive<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> RomArchive<R> {
    /// Will open the zip archive provided by the reader.
    pub fn new(reader: R) -> Result<Self, ResourceError> {
        Ok(RomArchive {
            archive: ZipArchive::new(reader)?,
        })
    }

    /// Will return all the rom names available to be chosen
    pub fn file_names(&self) -> Vec<&'_ str> {
        self.archive.file_names().collect()
    }

    /// Will decompress the program with the given name from the archive.
    pub fn get_file_data(&mut self, name: &str) -> Result<Rom, ResourceError> {
        let mut file = self.archive.by_name(name)?;
        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)?;
        Ok(Rom::new(name, data.into_boxed_slice())?)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The raw program, loaded verbatim at the program start
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data, rejecting programs that do not fit into
    /// memory.
    pub fn new(name: &str, data: Box<[u8]>) -> Result<Self, LoadError> {
        if data.len() > cpu::PROGRAM_MAX_SIZE {
            return Err(LoadError::ProgramTooLarge {
                size: data.len(),
                max: cpu::PROGRAM_MAX_SIZE,
            });
        }
        Ok(Rom {
            name: name.to_string(),
            data,
        })
    }

    /// Will read the program stored at the given path, the file name is used as the rom name.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        log::info!("read rom '{}' with {} bytes", name, data.len());
        Ok(Rom::new(&name, data.into_boxed_slice())?)
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::{write::FileOptions, ZipWriter};

    const PONG: [u8; 6] = [0x6A, 0x02, 0xA2, 0xEA, 0xDA, 0xB6];
    const MAZE: [u8; 4] = [0xA2, 0x1E, 0xC2, 0x01];

    fn build_archive(files: &[(&str, &[u8])]) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in files {
            writer
                .start_file(*name, FileOptions::default())
                .expect("unable to start the file");
            writer.write_all(data).expect("unable to write the file");
        }
        let mut cursor = writer.finish().expect("unable to finish the archive");
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_rom_extract() {
        let archive = build_archive(&[("PONG", &PONG[..]), ("MAZE", &MAZE[..])]);
        let mut ra = RomArchive::new(archive).unwrap();

        let rom = ra.get_file_data("PONG").unwrap();
        assert_eq!(rom.get_name(), "PONG");
        assert_eq!(rom.get_data(), &PONG);

        let rom = ra.get_file_data("MAZE").unwrap();
        assert_eq!(rom.get_data(), &MAZE);
    }

    #[test]
    fn test_file_names() {
        let archive = build_archive(&[("PONG", &PONG[..]), ("MAZE", &MAZE[..])]);
        let ra = RomArchive::new(archive).unwrap();
        let mut files = ra.file_names();
        files.sort_unstable();

        assert_eq!(files, vec!["MAZE", "PONG"]);
    }

    #[test]
    fn test_missing_rom() {
        let archive = build_archive(&[("PONG", &PONG[..])]);
        let mut ra = RomArchive::new(archive).unwrap();
        assert!(matches!(
            ra.get_file_data("TETRIS"),
            Err(ResourceError::Zip(_))
        ));
    }

    #[test]
    fn test_too_large_rom() {
        let data = vec![0; cpu::PROGRAM_MAX_SIZE + 1].into_boxed_slice();
        assert_eq!(
            Rom::new("BIG", data),
            Err(LoadError::ProgramTooLarge {
                size: cpu::PROGRAM_MAX_SIZE + 1,
                max: cpu::PROGRAM_MAX_SIZE,
            })
        );

        let data = vec![0; cpu::PROGRAM_MAX_SIZE].into_boxed_slice();
        assert!(Rom::new("FITS", data).is_ok());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("chip8-core-rom-{}", std::process::id()));
        fs::write(&path, &PONG).unwrap();

        let rom = Rom::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(rom.get_data(), &PONG);
        assert_eq!(
            rom.get_name(),
            path.file_name().unwrap().to_string_lossy().as_ref()
        );
    }

    #[test]
    fn test_from_missing_file() {
        let path = std::env::temp_dir().join("chip8-core-this-rom-does-not-exist");
        assert!(matches!(Rom::from_file(path), Err(ResourceError::Io(_))));
    }
}
