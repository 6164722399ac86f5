use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{
    error::{BundleFile, CertbunError, CertbunResult},
    wire::ssl::RetrieveResult,
};

const SECRET_FILE_MODE: u32 = 0o600;

/// Paths written by [`install_bundle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledBundle {
    pub private_key: PathBuf,
    pub public_key: PathBuf,
    pub certificate: PathBuf,
}

/// Writes the private key, public key and certificate chain under `dir`, in
/// that order. Existing files are overwritten. The first failure aborts the
/// install; files written before it are left in place.
pub fn install_bundle(dir: &Path, bundle: &RetrieveResult) -> CertbunResult<InstalledBundle> {
    Ok(InstalledBundle {
        private_key: install_file(dir, BundleFile::PrivateKey, &bundle.private_key)?,
        public_key: install_file(dir, BundleFile::PublicKey, &bundle.public_key)?,
        certificate: install_file(dir, BundleFile::Certificate, &bundle.certificate_chain)?,
    })
}

fn install_file(dir: &Path, file: BundleFile, contents: &str) -> CertbunResult<PathBuf> {
    let path = dir.join(file.file_name());
    write_secret(&path, contents.as_bytes())
        .map_err(|source| CertbunError::Write { file, source })?;
    tracing::info!(path = %path.display(), "wrote {file}");
    Ok(path)
}

fn write_secret(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = open_secret(path)?;
    file.write_all(contents)?;
    restrict_permissions(&file)
}

#[cfg(unix)]
fn open_secret(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(SECRET_FILE_MODE)
        .open(path)
}

#[cfg(not(unix))]
fn open_secret(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

// `mode` only applies on creation; an overwritten file keeps its old bits.
#[cfg(unix)]
fn restrict_permissions(file: &File) -> io::Result<()> {
    use std::{fs::Permissions, os::unix::fs::PermissionsExt};

    file.set_permissions(Permissions::from_mode(SECRET_FILE_MODE))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> io::Result<()> {
    Ok(())
}
