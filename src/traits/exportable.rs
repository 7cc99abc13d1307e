use anyhow::{Context, Result, anyhow};
use std::{
    fs::{self, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
};

pub trait Exportable {
    fn export(&self, f: &mut dyn std::io::Write) -> Result<()>;

    /// Writes to `path`, creating parent directories as needed.
    /// The content goes to a sibling `.partial` file first, so a failed export leaves nothing behind.
    /// Fails if that `.partial` file already exists.
    fn export_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create directory {}", parent.display()))?;
        }

        let file_name = path
            .file_name()
            .ok_or_else(|| anyhow!("output path {} has no file name", path.display()))?;
        let mut temporary_name = file_name.to_os_string();
        temporary_name.push(".partial");
        let temporary_path = path.with_file_name(temporary_name);

        //never touch a temporary file that this export did not create
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temporary_path)
            .with_context(|| format!("cannot create {}", temporary_path.display()))?;

        let result = (|| -> Result<()> {
            let mut writer = BufWriter::new(file);
            self.export(&mut writer)?;
            writer.flush()?;
            fs::rename(&temporary_path, path)
                .with_context(|| format!("cannot move output into {}", path.display()))?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temporary_path);
        }
        result
    }
}
