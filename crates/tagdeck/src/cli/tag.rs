//! The `tagdeck tag` command: interactive tagging of a folder.

use clap::Args;
use std::path::PathBuf;
use tagdeck_core::config::expand_path;
use tagdeck_core::{AssociationCodec, Config, ImageDiscovery, Session};

use super::interactive;

/// Arguments for the `tag` command.
#[derive(Args, Debug)]
pub struct TagArgs {
    /// Folder containing the images to tag
    #[arg(required = true)]
    pub folder: PathBuf,

    /// Association file to load before starting
    #[arg(short, long)]
    pub import: Option<PathBuf>,

    /// Association file to write on save / quit
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Tag to register at startup (repeatable)
    #[arg(short, long = "tag", value_name = "NAME")]
    pub tags: Vec<String>,

    /// Include images in subfolders
    #[arg(short, long)]
    pub recursive: bool,
}

/// Build the session described by `args`.
///
/// Tags from `--import` are registered first, then `--tag` names.
pub fn build_session(args: &TagArgs, config: &Config) -> anyhow::Result<Session> {
    let mut discovery_config = config.discovery.clone();
    discovery_config.recursive |= args.recursive;

    let folder = expand_path(&args.folder.to_string_lossy());
    if !folder.is_dir() {
        anyhow::bail!("Not a folder: {}", folder.display());
    }
    let images = ImageDiscovery::new(discovery_config).discover(&folder);
    if images.is_empty() {
        tracing::warn!("No supported images found in {}", folder.display());
    }

    let mut session = Session::new(AssociationCodec::from_config(&config.codec));
    session.load_images(&images);

    if let Some(import) = &args.import {
        session.import_from_path(&expand_path(&import.to_string_lossy()))?;
    }
    for tag in &args.tags {
        session.add_tag(tag)?;
    }

    Ok(session)
}

/// Execute the tag command.
pub fn execute(args: TagArgs, config: &Config) -> anyhow::Result<()> {
    let session = build_session(&args, config)?;
    let export = args
        .export
        .as_ref()
        .map(|path| expand_path(&path.to_string_lossy()));
    interactive::run(session, config, export)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(folder: PathBuf) -> TagArgs {
        TagArgs {
            folder,
            import: None,
            export: None,
            tags: vec![],
            recursive: false,
        }
    }

    #[test]
    fn test_build_session_discovers_and_registers() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.jpg", "skip.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let import = dir.path().join("tags.csv");
        let a = dir.path().join("a.jpg");
        std::fs::write(
            &import,
            format!("Image Path,Tags\n{},dog\n", a.to_string_lossy()),
        )
        .unwrap();

        let mut args = args(dir.path().to_path_buf());
        args.import = Some(import);
        args.tags = vec!["cat".into(), "dog".into()];

        let session = build_session(&args, &Config::default()).unwrap();
        assert_eq!(session.images().len(), 2);
        assert!(session.current_image().unwrap().ends_with("a.jpg"));

        let names: Vec<&str> = session.registry().names().collect();
        assert_eq!(names, vec!["dog", "cat"]);
        assert!(session.current_tags().contains("dog"));
    }

    #[test]
    fn test_build_session_rejects_tag_with_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path().to_path_buf());
        args.tags = vec!["black cat".into()];

        let err = build_session(&args, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("delimiter"));
    }

    #[test]
    fn test_build_session_rejects_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_session(&args(dir.path().join("nope")), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("Not a folder"));
    }

    #[test]
    fn test_build_session_fails_on_malformed_import() {
        let dir = tempfile::tempdir().unwrap();
        let import = dir.path().join("tags.csv");
        std::fs::write(&import, "Image Path,Tags\nbroken\n").unwrap();

        let mut args = args(dir.path().to_path_buf());
        args.import = Some(import);
        let err = build_session(&args, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("Malformed row"));
    }
}
