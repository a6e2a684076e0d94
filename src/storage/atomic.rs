use std::{
    io::{self, BufWriter, Write},
    path::Path,
};

/// Writes a file by filling a temporary sibling and renaming it over `path`.
///
/// The temporary file lives in the same directory as `path` so that the
/// final rename does not cross filesystems. If `write` or any later step
/// fails, the temporary file is closed and deleted and `path` is left as it
/// was. Missing parent directories are created.
pub fn write_atomically<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = tempfile::Builder::new()
        .prefix(".inventory-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tracing::trace!(temp = %temp.path().display(), "writing temporary file");

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| e.error)?;
    tracing::debug!(path = %path.display(), "file replaced");
    Ok(())
}
