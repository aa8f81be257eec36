// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::PixfitError;

/// Ensures a new directory is created with an incrementing suffix if necessary.
///
/// # Arguments
///
/// * `directory` - Path to new directory - no overwrites allowed
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use pixfit_core::ut::path::create_directory;
///
/// let base = std::env::temp_dir().join("PIXFIT_TEST_CREATE_DIRECTORY");
/// let _ = std::fs::remove_dir(&base);
///
/// let first = create_directory(&base).unwrap();
/// let second = create_directory(&base).unwrap();
///
/// assert_eq!(first, base);
/// assert!(second.ends_with("PIXFIT_TEST_CREATE_DIRECTORY_0"));
///
/// std::fs::remove_dir(first).unwrap();
/// std::fs::remove_dir(second).unwrap();
/// ```
pub fn create_directory<P: AsRef<Path>>(directory: P) -> Result<PathBuf, PixfitError> {
    let directory = directory.as_ref();

    if !directory.exists() {
        std::fs::create_dir_all(directory).map_err(|err| PixfitError::DirError(err.to_string()))?;
        return Ok(directory.to_path_buf());
    }

    let parent = directory.parent().unwrap_or_else(|| Path::new("."));
    let base_name = directory
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| PixfitError::DirError("Invalid directory name".to_string()))?;

    for index in 0..30 {
        let new_dir = parent.join(format!("{}_{}", base_name, index));

        if !new_dir.exists() {
            std::fs::create_dir(&new_dir).map_err(|err| PixfitError::DirError(err.to_string()))?;
            return Ok(new_dir);
        }
    }

    Err(PixfitError::DirError(format!(
        "Could not create a directory in alotted increments. Check the directory path: {}",
        directory.display()
    )))
}

/// Collect file paths from a directory with an optional substring filter
///
/// Extensions are matched case-insensitively and the result is sorted.
///
/// # Arguments
///
/// * `directory` - Path to directory containing files
/// * `valid_ext` - Lowercase extensions to keep
/// * `substring` - Only include files containing this substring
///
/// # Examples
///
/// ```no_run
/// use pixfit_core::ut::path::collect_file_paths;
/// use pixfit_core::constant::SUPPORTED_IMAGE_FORMATS;
/// let files = collect_file_paths("directory/", SUPPORTED_IMAGE_FORMATS.as_slice(), None);
/// ```
pub fn collect_file_paths<P>(
    directory: P,
    valid_ext: &[&str],
    substring: Option<String>,
) -> Result<Vec<PathBuf>, PixfitError>
where
    P: AsRef<Path>,
{
    let message = directory.as_ref().display().to_string();

    let mut files: Vec<PathBuf> = std::fs::read_dir(directory)
        .map_err(|_| PixfitError::DirError(message))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| valid_ext.contains(&ext.to_lowercase().as_str()))
        })
        .collect();

    if let Some(substring) = substring {
        files.retain(|f| {
            f.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.contains(&substring))
        });
    }

    files.sort_unstable();

    Ok(files)
}

/// Assign every input a distinct output path in `directory`
///
/// Outputs are named after the input stem with `extension` appended. Inputs
/// sharing a stem (e.g. `a.png` and `a.jpg`) keep their source extension in
/// the name (`a.png.jpg`, `a.jpg.jpg`), and any name still taken gets a `_N`
/// suffix, so no two inputs ever write to the same file.
///
/// # Arguments
///
/// * `directory` - Output directory
/// * `inputs` - Input file paths
/// * `extension` - Extension of the output format
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use pixfit_core::ut::path::output_paths;
///
/// let inputs = [PathBuf::from("in/a.png"), PathBuf::from("in/a.jpg"), PathBuf::from("in/b.png")];
/// let outputs = output_paths(Path::new("out"), &inputs, "jpg");
///
/// assert_eq!(outputs[0], PathBuf::from("out/a.png.jpg"));
/// assert_eq!(outputs[1], PathBuf::from("out/a.jpg.jpg"));
/// assert_eq!(outputs[2], PathBuf::from("out/b.jpg"));
/// ```
pub fn output_paths(directory: &Path, inputs: &[PathBuf], extension: &str) -> Vec<PathBuf> {
    let stem = |input: &PathBuf| {
        input
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string())
    };

    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for input in inputs {
        *stem_counts.entry(stem(input)).or_insert(0) += 1;
    }

    let mut taken: HashSet<String> = HashSet::with_capacity(inputs.len());

    inputs
        .iter()
        .map(|input| {
            let base = stem(input);
            let base = if stem_counts[&base] > 1 {
                input
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or(base)
            } else {
                base
            };

            let mut name = format!("{}.{}", base, extension);
            let mut index = 0;

            while taken.contains(&name) {
                name = format!("{}_{}.{}", base, index, extension);
                index += 1;
            }

            taken.insert(name.clone());
            directory.join(name)
        })
        .collect()
}
