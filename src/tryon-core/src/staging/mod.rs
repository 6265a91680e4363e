use crate::error::fs::FsError;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Empties a working directory, creating it if missing. Only plain files
/// are removed; anything else in there was not put there by us.
pub fn clear_dir(dir: &Path) -> Result<(), FsError> {
    if !dir.exists() {
        return crate::fs::create_dir_all(dir);
    }
    for file in crate::fs::files_in_dir(dir)? {
        crate::fs::remove_file(&file)?;
    }
    Ok(())
}

/// Copies the input image into the input directory under a
/// timestamp-unique name, so successive runs never collide.
pub fn stage_image(source: &Path, input_dir: &Path) -> Result<PathBuf, FsError> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let staged = input_dir.join(format!("jewelry_{timestamp}.png"));
    crate::fs::copy(source, &staged)?;
    Ok(staged)
}

/// Copies every file in the server's output directory whose name starts
/// with `prefix` into `output_dir`, returning the destinations sorted.
pub fn collect_outputs(
    rendered_dir: &Path,
    output_dir: &Path,
    prefix: &str,
) -> Result<Vec<PathBuf>, FsError> {
    let mut collected = vec![];
    for file in crate::fs::files_in_dir(rendered_dir)? {
        let name = crate::fs::file_name(&file)?;
        if name.starts_with(prefix) {
            let destination = output_dir.join(&name);
            crate::fs::copy(&file, &destination)?;
            collected.push(destination);
        }
    }
    collected.sort();
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_dir_creates_a_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("input");
        clear_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn clear_dir_removes_leftover_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("stale.png"), b"x").unwrap();
        std::fs::write(tmp.path().join("stale.json"), b"{}").unwrap();

        clear_dir(tmp.path()).unwrap();

        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn stage_image_places_a_timestamped_png_in_the_input_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("ring.png");
        std::fs::write(&source, b"png-bytes").unwrap();
        let input_dir = tmp.path().join("input");
        std::fs::create_dir(&input_dir).unwrap();

        let staged = stage_image(&source, &input_dir).unwrap();

        let name = staged.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("jewelry_"), "unexpected name {name}");
        assert!(name.ends_with(".png"));
        assert_eq!(std::fs::read(&staged).unwrap(), b"png-bytes");
    }

    #[test]
    fn collect_outputs_filters_on_the_prefix_and_sorts() {
        let tmp = tempfile::tempdir().unwrap();
        let rendered = tmp.path().join("rendered");
        let output = tmp.path().join("output");
        std::fs::create_dir(&rendered).unwrap();
        std::fs::create_dir(&output).unwrap();
        std::fs::write(rendered.join("ComfyUI_00002_.png"), b"b").unwrap();
        std::fs::write(rendered.join("ComfyUI_00001_.png"), b"a").unwrap();
        std::fs::write(rendered.join("preview.png"), b"nope").unwrap();

        let collected = collect_outputs(&rendered, &output, "ComfyUI_").unwrap();

        assert_eq!(
            collected,
            vec![
                output.join("ComfyUI_00001_.png"),
                output.join("ComfyUI_00002_.png"),
            ]
        );
        assert!(!output.join("preview.png").exists());
    }

    #[test]
    fn collect_outputs_from_an_empty_directory_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let rendered = tmp.path().join("rendered");
        std::fs::create_dir(&rendered).unwrap();

        let collected = collect_outputs(&rendered, tmp.path(), "ComfyUI_").unwrap();
        assert!(collected.is_empty());
    }
}
